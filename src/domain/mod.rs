//! Domain layer - Core risk mathematics and models.
//!
//! This module contains the pure computational core of the risk engine.
//! No I/O and no shared state here (hexagonal architecture inner ring).
//! All output types are serializable and testable in isolation.

pub mod games;
pub mod kelly;
pub mod profiles;
pub mod report;
pub mod ruin;

// Re-export core types for convenience
pub use games::{CountModel, GameParameterResolver, GameParameters};
pub use kelly::KellyCriterion;
pub use profiles::{all_profiles, GameProfile, Volatility, WashingEfficiency};
pub use report::{InvalidInputReport, Recommendation, RiskReport, SimulationOutcome};
pub use ruin::{RuinSimulator, SimulationRequest};

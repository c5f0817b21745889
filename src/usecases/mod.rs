//! Use Cases Layer - Application Business Logic
//!
//! Orchestrates the domain pieces into the engine's single workflow.
//!
//! Use cases:
//! - `RiskAssessor`: resolve game parameters, apply caller overrides,
//!   run the ruin simulation, and package the response

pub mod risk_assessment;

pub use risk_assessment::{AssessmentResponse, EngineError, RiskAssessor, RiskQuery};

//! Bankroll Risk-of-Ruin Engine — Library Root
//!
//! Re-exports all modules for integration tests and benchmarks.

pub mod config;
pub mod domain;
pub mod usecases;

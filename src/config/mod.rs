//! Configuration Module - TOML-based Engine Configuration
//!
//! Loads and validates configuration from `config.toml`. Every section is
//! optional with documented defaults, so library users can run on
//! `AppConfig::default()` without a file. The count-model heuristics live
//! here rather than in code: they are tunable data, not derived constants.

pub mod loader;

use serde::Deserialize;

use crate::domain::games::CountModel;
use crate::domain::ruin::SimulationRequest;

/// Top-level engine configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
  /// Process identity and logging.
  #[serde(default)]
  pub app: AppSettings,
  /// Simulation batch defaults.
  #[serde(default)]
  pub engine: EngineConfig,
  /// Count-to-probability heuristic for count-sensitive games.
  #[serde(default)]
  pub count_model: CountModel,
}

/// Process identity configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
  /// Human-readable name used in startup logs.
  #[serde(default = "default_name")]
  pub name: String,
  /// Log level (trace, debug, info, warn, error).
  #[serde(default = "default_log_level")]
  pub log_level: String,
}

impl Default for AppSettings {
  fn default() -> Self {
    Self {
      name: default_name(),
      log_level: default_log_level(),
    }
  }
}

/// Simulation batch defaults, applied when a request does not override them.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
  /// Rounds per trajectory.
  #[serde(default = "default_total_rounds")]
  pub default_total_rounds: u32,
  /// Monte Carlo trajectories per batch.
  #[serde(default = "default_trial_count")]
  pub default_trial_count: u32,
}

impl Default for EngineConfig {
  fn default() -> Self {
    Self {
      default_total_rounds: default_total_rounds(),
      default_trial_count: default_trial_count(),
    }
  }
}

// Default value functions for serde

fn default_name() -> String {
  "ruin-engine".to_string()
}

fn default_log_level() -> String {
  "info".to_string()
}

fn default_total_rounds() -> u32 {
  SimulationRequest::DEFAULT_TOTAL_ROUNDS
}

fn default_trial_count() -> u32 {
  SimulationRequest::DEFAULT_TRIAL_COUNT
}

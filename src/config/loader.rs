//! Configuration Loader - File Loading and Validation
//!
//! Handles loading `config.toml`, validating all parameters,
//! and providing clear error messages for misconfiguration.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use super::AppConfig;

/// Load and validate configuration from a TOML file.
///
/// # Errors
/// Returns detailed error if:
/// - File doesn't exist or can't be read
/// - TOML parsing fails
/// - Validation rules are violated
pub fn load_config(path: &str) -> Result<AppConfig> {
  let path = Path::new(path);

  let content = std::fs::read_to_string(path)
    .with_context(|| format!("Failed to read config file: {}", path.display()))?;

  let config: AppConfig = toml::from_str(&content)
    .with_context(|| "Failed to parse config.toml")?;

  validate_config(&config)?;

  info!(
    total_rounds = config.engine.default_total_rounds,
    trial_count = config.engine.default_trial_count,
    count_base = config.count_model.base_probability,
    "Configuration loaded successfully"
  );

  Ok(config)
}

/// Validate all configuration parameters.
///
/// Checks for:
/// - Batch defaults of at least one round and one trial
/// - Count-model probabilities inside [0, 1]
/// - A non-inverted clamp band containing the base probability
pub fn validate_config(config: &AppConfig) -> Result<()> {
  anyhow::ensure!(
    config.engine.default_total_rounds >= 1,
    "default_total_rounds must be at least 1"
  );
  anyhow::ensure!(
    config.engine.default_trial_count >= 1,
    "default_trial_count must be at least 1"
  );

  let cm = &config.count_model;
  anyhow::ensure!(
    (0.0..=1.0).contains(&cm.base_probability),
    "count_model base_probability must be in [0, 1], got {}",
    cm.base_probability
  );
  anyhow::ensure!(
    cm.sensitivity.is_finite(),
    "count_model sensitivity must be finite"
  );
  anyhow::ensure!(
    (0.0..=1.0).contains(&cm.floor) && (0.0..=1.0).contains(&cm.ceiling),
    "count_model clamp band must be in [0, 1], got [{}, {}]",
    cm.floor,
    cm.ceiling
  );
  anyhow::ensure!(
    cm.floor <= cm.ceiling,
    "count_model clamp band is inverted: floor {} > ceiling {}",
    cm.floor,
    cm.ceiling
  );
  anyhow::ensure!(
    (cm.floor..=cm.ceiling).contains(&cm.base_probability),
    "count_model base_probability {} is outside the clamp band [{}, {}]",
    cm.base_probability,
    cm.floor,
    cm.ceiling
  );

  Ok(())
}

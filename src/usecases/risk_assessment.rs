//! Risk Assessment - Resolve, Override, Simulate
//!
//! The engine's single workflow: resolve game parameters (count-adjusted
//! where the game supports it), let the caller's decimal odds override the
//! resolved payout, run the Monte Carlo batch, and echo the resolved
//! parameters next to the outcome.
//!
//! Failure split: invalid numeric input is a NORMAL outcome inside the
//! response; `EngineError::Unavailable` is the hard failure reserved for a
//! numeric backend that cannot run at all. Embedding services map the
//! latter to a service-unavailable status.

use std::panic::{catch_unwind, AssertUnwindSafe};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::AppConfig;
use crate::domain::games::{GameParameterResolver, GameParameters};
use crate::domain::report::SimulationOutcome;
use crate::domain::ruin::{RuinSimulator, SimulationRequest};

/// Hard engine failures, distinct from invalid input by design.
#[derive(Debug, Error)]
pub enum EngineError {
  /// The numeric backend could not complete the batch.
  #[error("risk engine unavailable: {0}")]
  Unavailable(String),
}

/// One caller request: which game, with how much money, at what stake.
#[derive(Debug, Clone, Deserialize)]
pub struct RiskQuery {
  /// Game identifier; unknown games resolve to a neutral coin flip.
  pub game: String,
  /// Starting bankroll.
  pub bankroll: f64,
  /// Stake per round.
  pub bet_size: f64,
  /// Decimal odds override; `payout_ratio = odds - 1`.
  #[serde(default)]
  pub odds: Option<f64>,
  /// True count for count-sensitive games.
  #[serde(default)]
  pub count: Option<f64>,
  /// Rounds per trajectory (engine default when absent).
  #[serde(default)]
  pub total_rounds: Option<u32>,
  /// Trajectories per batch (engine default when absent).
  #[serde(default)]
  pub trial_count: Option<u32>,
}

/// Assessment result: the simulation outcome plus an echo of the resolved
/// game parameters the batch actually ran with.
#[derive(Debug, Clone, Serialize)]
pub struct AssessmentResponse {
  /// Game identifier as supplied by the caller.
  pub game: String,
  /// Parameters the simulation ran with, after count adjustment and any
  /// odds override.
  pub game_parameters: GameParameters,
  /// Full report or flagged invalid-input result.
  pub outcome: SimulationOutcome,
}

/// Orchestrates resolver and simulator for one assessment call.
pub struct RiskAssessor {
  /// Game parameter resolver with the configured count model.
  resolver: GameParameterResolver,
  /// Monte Carlo backend.
  simulator: RuinSimulator,
  /// Rounds per trajectory when the query does not override.
  default_total_rounds: u32,
  /// Trajectories per batch when the query does not override.
  default_trial_count: u32,
}

impl RiskAssessor {
  /// Create an assessor from config, with entropy-seeded simulation.
  pub fn new(config: &AppConfig) -> Self {
    Self::with_simulator(config, RuinSimulator::new())
  }

  /// Create an assessor with an explicit simulator (pinned seed for
  /// reproducible batches).
  pub fn with_simulator(config: &AppConfig, simulator: RuinSimulator) -> Self {
    Self {
      resolver: GameParameterResolver::with_count_model(config.count_model),
      simulator,
      default_total_rounds: config.engine.default_total_rounds,
      default_trial_count: config.engine.default_trial_count,
    }
  }

  /// Run one assessment.
  ///
  /// Synchronous and atomic from the caller's view: either a complete
  /// response or `EngineError`. Invalid input comes back inside the
  /// response, never as an error.
  pub fn assess(&self, query: &RiskQuery) -> Result<AssessmentResponse, EngineError> {
    let mut params = self.resolver.resolve(&query.game, query.count);
    if let Some(odds) = query.odds {
      params.payout_ratio = odds - 1.0;
    }

    let request = SimulationRequest {
      bankroll: query.bankroll,
      bet_size: query.bet_size,
      win_probability: params.win_probability,
      payout_ratio: params.payout_ratio,
      total_rounds: query.total_rounds.unwrap_or(self.default_total_rounds),
      trial_count: query.trial_count.unwrap_or(self.default_trial_count),
    };

    debug!(
      game = %query.game,
      win_probability = request.win_probability,
      payout_ratio = request.payout_ratio,
      total_rounds = request.total_rounds,
      trial_count = request.trial_count,
      "Resolved simulation request"
    );

    // A panic out of the numeric stack is the one in-process form of
    // "backend unavailable"; it must not unwind through the caller.
    let outcome = catch_unwind(AssertUnwindSafe(|| self.simulator.run(&request)))
      .map_err(|_| {
        EngineError::Unavailable("numeric backend failed during simulation".to_string())
      })?;

    match &outcome {
      SimulationOutcome::Invalid(invalid) => {
        warn!(game = %query.game, error = %invalid.error, "Rejected simulator input");
      }
      SimulationOutcome::Report(report) => {
        info!(
          game = %query.game,
          risk_of_ruin_percent = report.risk_of_ruin_percent,
          recommendation = %report.recommendation,
          "Risk assessment complete"
        );
      }
    }

    Ok(AssessmentResponse {
      game: query.game.clone(),
      game_parameters: params,
      outcome,
    })
  }
}

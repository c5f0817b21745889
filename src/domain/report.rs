//! Risk report types produced by the ruin simulator.
//!
//! All numeric fields are rounded once, at construction: two decimal places
//! for currency-like values, four for fractions and ratios. Everything
//! upstream of these types stays full-precision `f64`.
//!
//! `SimulationOutcome` is serialized untagged so invalid-input results keep
//! the same flat JSON shape callers already consume.

use rust_decimal::Decimal;
use rust_decimal::prelude::*;
use serde::Serialize;

/// Actionable risk tier derived from the ruin probability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Recommendation {
    /// Ruin probability below 1%.
    Safe,
    /// Ruin probability in [1%, 5%).
    Caution,
    /// Ruin probability in [5%, 20%).
    Dangerous,
    /// Ruin probability at or above 20%.
    ExtremeRisk,
    /// Input rejected before simulation.
    Invalid,
}

impl Recommendation {
    /// Classify a ruin probability (percent) into a tier.
    pub fn from_ruin_percent(percent: f64) -> Self {
        if percent < 1.0 {
            Self::Safe
        } else if percent < 5.0 {
            Self::Caution
        } else if percent < 20.0 {
            Self::Dangerous
        } else {
            Self::ExtremeRisk
        }
    }

    /// Ordinal severity label paired with the tier.
    pub fn risk_level(&self) -> &'static str {
        match self {
            Self::Safe => "Low",
            Self::Caution => "Medium",
            Self::Dangerous => "High",
            Self::ExtremeRisk => "Critical",
            Self::Invalid => "Invalid",
        }
    }
}

impl std::fmt::Display for Recommendation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Safe => write!(f, "SAFE"),
            Self::Caution => write!(f, "CAUTION"),
            Self::Dangerous => write!(f, "DANGEROUS"),
            Self::ExtremeRisk => write!(f, "EXTREME_RISK"),
            Self::Invalid => write!(f, "INVALID"),
        }
    }
}

/// Full risk analysis for one simulation batch.
///
/// Produced fresh per call; carries no identity beyond the call that built
/// it. Expected value is analytic (closed form), not sampled.
#[derive(Debug, Clone, Serialize)]
pub struct RiskReport {
    /// Share of trials whose bankroll path touched zero, in percent.
    pub risk_of_ruin_percent: f64,
    /// Mean bankroll at the final round across all trials.
    pub mean_final_bankroll: f64,
    /// Median bankroll at the final round.
    pub median_final_bankroll: f64,
    /// Worst final bankroll observed (can be negative; ruined trajectories
    /// keep playing to the final round).
    pub min_final_bankroll: f64,
    /// Best final bankroll observed.
    pub max_final_bankroll: f64,
    /// Closed-form expected value over the whole session.
    pub expected_value: f64,
    /// Closed-form expected value of a single round.
    pub ev_per_round: f64,
    /// Kelly-optimal fraction of bankroll to stake, clamped to [0, 1].
    pub kelly_fraction: f64,
    /// Kelly-optimal bet in currency units.
    pub optimal_bet_size: f64,
    /// Actual bet as a fraction of bankroll.
    pub bet_to_bankroll_ratio: f64,
    /// Risk tier for the simulated configuration.
    pub recommendation: Recommendation,
    /// Ordinal severity label (Low / Medium / High / Critical).
    pub risk_level: &'static str,
    /// Number of Monte Carlo trials executed.
    pub trials_run: u32,
    /// Rounds simulated per trial.
    pub rounds_simulated: u32,
}

/// Structured rejection of unusable simulator input.
///
/// Not an error type: invalid input is a normal, flagged outcome so callers
/// render a configuration message without exception plumbing. Ruin is pinned
/// to 100% because no play is possible under the rejected parameters.
#[derive(Debug, Clone, Serialize)]
pub struct InvalidInputReport {
    /// Human-readable description of the rejected parameter.
    pub error: String,
    /// Always 100.0.
    pub risk_of_ruin_percent: f64,
    /// Always `Recommendation::Invalid`.
    pub recommendation: Recommendation,
}

impl InvalidInputReport {
    pub(crate) fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            risk_of_ruin_percent: 100.0,
            recommendation: Recommendation::Invalid,
        }
    }
}

/// Result of one simulator invocation: either a full report or a flagged
/// invalid-input result. Never a panic, never a partial report.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum SimulationOutcome {
    Report(RiskReport),
    Invalid(InvalidInputReport),
}

impl SimulationOutcome {
    /// The full report, if the input was valid.
    pub fn report(&self) -> Option<&RiskReport> {
        match self {
            Self::Report(r) => Some(r),
            Self::Invalid(_) => None,
        }
    }

    /// The invalid-input result, if the input was rejected.
    pub fn invalid(&self) -> Option<&InvalidInputReport> {
        match self {
            Self::Report(_) => None,
            Self::Invalid(i) => Some(i),
        }
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self, Self::Invalid(_))
    }
}

// ────────────────────────────────────────────
// Reporting-boundary rounding
// ────────────────────────────────────────────

/// Round a currency-like value to two decimal places.
pub(crate) fn round2(value: f64) -> f64 {
    round_dp(value, 2)
}

/// Round a fraction or ratio to four decimal places.
pub(crate) fn round4(value: f64) -> f64 {
    round_dp(value, 4)
}

fn round_dp(value: f64, places: u32) -> f64 {
    // NaN and infinities fall through untouched; validation upstream keeps
    // them out of reports.
    Decimal::from_f64(value)
        .map(|d| d.round_dp(places).to_f64().unwrap_or(value))
        .unwrap_or(value)
}

//! Kelly Criterion bet sizing.
//!
//! Computes the full-Kelly stake fraction for a binary-outcome game from a
//! win probability and a net payout ratio (1.0 = even money). The fraction
//! is clamped to [0, 1]: a non-positive edge means no bet, and no bet can
//! exceed the whole bankroll.
//!
//! Exposes both `KellyCriterion` (Decimal API) and f64 helpers for the
//! simulator boundary.

use rust_decimal::Decimal;
use rust_decimal::prelude::*;

/// Kelly Criterion calculator (Decimal API).
///
/// Kelly formula for binary outcomes:
///   f* = (p * b - q) / b
/// where:
///   p = probability of winning
///   q = 1 - p
///   b = net payout ratio on a win
#[derive(Debug, Clone, Copy)]
pub struct KellyCriterion;

impl KellyCriterion {
    /// Computes the clamped full-Kelly fraction.
    ///
    /// Returns zero when the payout ratio is non-positive (there is nothing
    /// to win, so the optimal stake is nothing).
    pub fn fraction(win_probability: Decimal, payout_ratio: Decimal) -> Decimal {
        if payout_ratio <= Decimal::ZERO {
            return Decimal::ZERO;
        }

        let q = Decimal::ONE - win_probability;
        let full_kelly = (win_probability * payout_ratio - q) / payout_ratio;

        full_kelly.clamp(Decimal::ZERO, Decimal::ONE)
    }

    /// Computes the Kelly-optimal bet in currency units, rounded to cents.
    pub fn optimal_bet(
        bankroll: Decimal,
        win_probability: Decimal,
        payout_ratio: Decimal,
    ) -> Decimal {
        (bankroll * Self::fraction(win_probability, payout_ratio)).round_dp(2)
    }
}

// ────────────────────────────────────────────
// f64 boundary API for the simulator
// ────────────────────────────────────────────

/// Clamped full-Kelly fraction over f64 inputs.
///
/// Non-finite inputs resolve to a zero stake.
pub fn kelly_fraction(win_probability: f64, payout_ratio: f64) -> f64 {
    let p = match Decimal::from_f64(win_probability) {
        Some(p) => p,
        None => return 0.0,
    };
    let b = match Decimal::from_f64(payout_ratio) {
        Some(b) => b,
        None => return 0.0,
    };

    KellyCriterion::fraction(p, b).to_f64().unwrap_or(0.0)
}

/// Kelly-optimal bet in currency units over f64 inputs.
pub fn optimal_bet_size(bankroll: f64, win_probability: f64, payout_ratio: f64) -> f64 {
    let bank = Decimal::from_f64(bankroll).unwrap_or(Decimal::ZERO);
    let p = Decimal::from_f64(win_probability).unwrap_or(Decimal::ZERO);
    let b = match Decimal::from_f64(payout_ratio) {
        Some(b) => b,
        None => return 0.0,
    };

    KellyCriterion::optimal_bet(bank, p, b).to_f64().unwrap_or(0.0)
}

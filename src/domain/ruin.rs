//! Monte Carlo risk-of-ruin simulator.
//!
//! Runs a batch of independent bankroll trajectories under fixed per-round
//! odds and reports the probability of ruin, final-bankroll statistics, the
//! analytic expected value, and the Kelly-optimal stake.
//!
//! A trajectory counts as ruined if its bankroll touches zero at ANY round,
//! not just the last one: a path that dips to zero and recovers on paper is
//! still a bust, because play stops the moment the money is gone. Ruined
//! paths keep accumulating to the final round so the final-bankroll
//! statistics describe the full unconstrained distribution (the minimum can
//! be negative).
//!
//! Trials are partitioned across the rayon pool. Each trial draws from its
//! own counter-derived ChaCha8 stream, so a given master seed reproduces the
//! exact batch regardless of thread count.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::kelly;
use super::report::{round2, round4, InvalidInputReport, Recommendation, RiskReport, SimulationOutcome};

/// Immutable input to one simulation batch.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SimulationRequest {
    /// Starting bankroll (must be positive).
    pub bankroll: f64,
    /// Stake per round (must be positive).
    pub bet_size: f64,
    /// Probability of winning a single round, in [0, 1].
    pub win_probability: f64,
    /// Net payout multiple on a win (1.0 = even money, 0 allowed).
    pub payout_ratio: f64,
    /// Rounds per trajectory.
    pub total_rounds: u32,
    /// Number of Monte Carlo trajectories.
    pub trial_count: u32,
}

impl SimulationRequest {
    pub const DEFAULT_TOTAL_ROUNDS: u32 = 1_000;
    pub const DEFAULT_TRIAL_COUNT: u32 = 10_000;

    /// Build a request with the default round and trial counts.
    pub fn new(bankroll: f64, bet_size: f64, win_probability: f64, payout_ratio: f64) -> Self {
        Self {
            bankroll,
            bet_size,
            win_probability,
            payout_ratio,
            total_rounds: Self::DEFAULT_TOTAL_ROUNDS,
            trial_count: Self::DEFAULT_TRIAL_COUNT,
        }
    }

    /// Override the number of rounds per trajectory.
    pub fn with_rounds(mut self, total_rounds: u32) -> Self {
        self.total_rounds = total_rounds;
        self
    }

    /// Override the number of trajectories.
    pub fn with_trials(mut self, trial_count: u32) -> Self {
        self.trial_count = trial_count;
        self
    }

    /// Reject parameters the simulator cannot meaningfully run.
    ///
    /// Returns the caller-facing message for the invalid-input report.
    fn validate(&self) -> Result<(), &'static str> {
        if !(self.bankroll > 0.0) || !(self.bet_size > 0.0) {
            return Err("Bankroll and bet size must be positive");
        }
        if !(0.0..=1.0).contains(&self.win_probability) {
            return Err("Win probability must be between 0 and 1");
        }
        if !self.payout_ratio.is_finite() || self.payout_ratio < 0.0 {
            return Err("Payout ratio must be non-negative");
        }
        if self.total_rounds == 0 || self.trial_count == 0 {
            return Err("Round and trial counts must be at least 1");
        }
        Ok(())
    }
}

/// Stateless Monte Carlo ruin simulator.
///
/// Production use draws a fresh master seed from OS entropy per run;
/// `seeded` pins the seed for reproducible batches.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuinSimulator {
    master_seed: Option<u64>,
}

impl RuinSimulator {
    /// Simulator with entropy-derived seeding (one seed per run).
    pub fn new() -> Self {
        Self { master_seed: None }
    }

    /// Simulator with a pinned master seed. Identical requests produce
    /// bitwise-identical reports, independent of the rayon thread count.
    pub fn seeded(master_seed: u64) -> Self {
        Self {
            master_seed: Some(master_seed),
        }
    }

    /// Run one simulation batch.
    ///
    /// Either computes a full `RiskReport` or returns the flagged
    /// invalid-input result; never panics on bad numeric input and never
    /// exposes a partial batch.
    pub fn run(&self, request: &SimulationRequest) -> SimulationOutcome {
        if let Err(message) = request.validate() {
            return SimulationOutcome::Invalid(InvalidInputReport::new(message));
        }

        let master_seed = self.master_seed.unwrap_or_else(rand::random);
        let trials = request.trial_count as usize;

        let results: Vec<TrialResult> = (0..trials as u64)
            .into_par_iter()
            .map(|index| {
                let mut rng = trial_rng(master_seed, index);
                run_trial(&mut rng, request)
            })
            .collect();

        let ruined = results.iter().filter(|t| t.ruined).count();
        let ruin_percent = ruined as f64 / trials as f64 * 100.0;

        let mut finals: Vec<f64> = results.iter().map(|t| t.final_bankroll).collect();
        finals.sort_unstable_by(f64::total_cmp);

        let mean = finals.iter().sum::<f64>() / trials as f64;

        // Closed-form EV; reported analytically rather than sampled so it is
        // exact for any trial count.
        let ev_per_round = request.win_probability * request.bet_size * request.payout_ratio
            - (1.0 - request.win_probability) * request.bet_size;
        let expected_value = ev_per_round * f64::from(request.total_rounds);

        let kelly_fraction = kelly::kelly_fraction(request.win_probability, request.payout_ratio);
        let optimal_bet_size =
            kelly::optimal_bet_size(request.bankroll, request.win_probability, request.payout_ratio);

        let recommendation = Recommendation::from_ruin_percent(ruin_percent);

        SimulationOutcome::Report(RiskReport {
            risk_of_ruin_percent: round2(ruin_percent),
            mean_final_bankroll: round2(mean),
            median_final_bankroll: round2(median(&finals)),
            min_final_bankroll: round2(finals[0]),
            max_final_bankroll: round2(finals[trials - 1]),
            expected_value: round2(expected_value),
            ev_per_round: round4(ev_per_round),
            kelly_fraction: round4(kelly_fraction),
            optimal_bet_size: round2(optimal_bet_size),
            bet_to_bankroll_ratio: round4(request.bet_size / request.bankroll),
            recommendation,
            risk_level: recommendation.risk_level(),
            trials_run: request.trial_count,
            rounds_simulated: request.total_rounds,
        })
    }
}

/// Outcome of a single trajectory.
struct TrialResult {
    ruined: bool,
    final_bankroll: f64,
}

/// Odd multiplier (splitmix increment) spreading trial indices into
/// well-separated seed streams.
const STREAM_MULTIPLIER: u64 = 0x9E37_79B9_7F4A_7C15;

fn trial_rng(master_seed: u64, trial_index: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(master_seed.wrapping_add(trial_index.wrapping_mul(STREAM_MULTIPLIER)))
}

fn run_trial(rng: &mut impl Rng, request: &SimulationRequest) -> TrialResult {
    let wins = (0..request.total_rounds).map(|_| rng.random::<f64>() < request.win_probability);
    play_rounds(wins, request.bankroll, request.bet_size, request.payout_ratio)
}

/// Walk one bankroll path over a fixed win/loss sequence.
///
/// Ruin latches on the first touch of zero; the path still runs to the final
/// round so callers see the unconstrained final balance.
fn play_rounds(
    outcomes: impl IntoIterator<Item = bool>,
    bankroll: f64,
    bet_size: f64,
    payout_ratio: f64,
) -> TrialResult {
    let win_profit = bet_size * payout_ratio;
    let mut balance = bankroll;
    let mut ruined = false;

    for won in outcomes {
        balance += if won { win_profit } else { -bet_size };
        if balance <= 0.0 {
            ruined = true;
        }
    }

    TrialResult {
        ruined,
        final_bankroll: balance,
    }
}

/// Median of a sorted slice; even lengths average the two central values.
fn median(sorted: &[f64]) -> f64 {
    let n = sorted.len();
    if n % 2 == 1 {
        sorted[n / 2]
    } else {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn run_seeded(request: &SimulationRequest) -> RiskReport {
        match RuinSimulator::seeded(0xDEAD_BEEF).run(request) {
            SimulationOutcome::Report(report) => report,
            SimulationOutcome::Invalid(invalid) => {
                panic!("expected a report, got invalid input: {}", invalid.error)
            }
        }
    }

    #[test]
    fn test_negative_bankroll_is_invalid() {
        let request = SimulationRequest::new(-10.0, 25.0, 0.48, 1.0);
        let outcome = RuinSimulator::new().run(&request);
        let invalid = outcome.invalid().expect("must be invalid");
        assert_eq!(invalid.risk_of_ruin_percent, 100.0);
        assert_eq!(invalid.recommendation, Recommendation::Invalid);
    }

    #[test]
    fn test_zero_bet_is_invalid() {
        let request = SimulationRequest::new(1000.0, 0.0, 0.48, 1.0);
        assert!(RuinSimulator::new().run(&request).is_invalid());
    }

    #[test]
    fn test_out_of_range_probability_is_invalid() {
        let request = SimulationRequest::new(1000.0, 25.0, 1.5, 1.0);
        assert!(RuinSimulator::new().run(&request).is_invalid());

        let request = SimulationRequest::new(1000.0, 25.0, -0.1, 1.0);
        assert!(RuinSimulator::new().run(&request).is_invalid());
    }

    #[test]
    fn test_nan_inputs_are_invalid_not_panics() {
        let request = SimulationRequest::new(f64::NAN, 25.0, 0.48, 1.0);
        assert!(RuinSimulator::new().run(&request).is_invalid());

        let request = SimulationRequest::new(1000.0, 25.0, f64::NAN, 1.0);
        assert!(RuinSimulator::new().run(&request).is_invalid());

        let request = SimulationRequest::new(1000.0, 25.0, 0.48, f64::NAN);
        assert!(RuinSimulator::new().run(&request).is_invalid());
    }

    #[test]
    fn test_certain_loss_is_certain_ruin() {
        // p=0 with enough rounds to burn the whole bankroll.
        let request = SimulationRequest::new(100.0, 10.0, 0.0, 1.0)
            .with_rounds(50)
            .with_trials(200);
        let report = run_seeded(&request);
        assert_eq!(report.risk_of_ruin_percent, 100.0);
        assert_eq!(report.recommendation, Recommendation::ExtremeRisk);
        // 50 straight losses of 10 against a 100 bankroll.
        assert_eq!(report.min_final_bankroll, -400.0);
        assert_eq!(report.max_final_bankroll, -400.0);
    }

    #[test]
    fn test_certain_win_is_never_ruin() {
        let request = SimulationRequest::new(100.0, 10.0, 1.0, 1.5)
            .with_rounds(100)
            .with_trials(500);
        let report = run_seeded(&request);
        assert_eq!(report.risk_of_ruin_percent, 0.0);
        assert_eq!(report.recommendation, Recommendation::Safe);
        // Deterministic path: 100 wins of 15 each.
        assert_eq!(report.mean_final_bankroll, 1600.0);
        assert_eq!(report.median_final_bankroll, 1600.0);
    }

    #[test]
    fn test_dip_and_recover_still_counts_as_ruin() {
        // One losing round empties the bankroll; two wins then rebuild it.
        // The trajectory ends positive but the session was already over.
        let result = play_rounds([false, true, true], 10.0, 10.0, 1.0);
        assert!(result.ruined);
        assert_eq!(result.final_bankroll, 30.0);
    }

    #[test]
    fn test_path_that_never_touches_zero_is_not_ruin() {
        let result = play_rounds([false, true, false, true], 100.0, 10.0, 1.0);
        assert!(!result.ruined);
        assert_eq!(result.final_bankroll, 100.0);
    }

    #[test]
    fn test_zero_payout_ratio_is_valid_and_kelly_free() {
        let request = SimulationRequest::new(1000.0, 10.0, 0.9, 0.0)
            .with_rounds(20)
            .with_trials(100);
        let report = run_seeded(&request);
        assert_eq!(report.kelly_fraction, 0.0);
        assert_eq!(report.optimal_bet_size, 0.0);
        // Wins pay nothing, losses still cost: EV is -(1-p)*bet per round.
        assert_eq!(report.ev_per_round, -1.0);
    }

    #[test]
    fn test_expected_value_matches_closed_form_exactly() {
        let request = SimulationRequest::new(1000.0, 25.0, 0.48, 1.0)
            .with_rounds(1000)
            .with_trials(50);
        let report = run_seeded(&request);
        // ev/round = 0.48*25*1 - 0.52*25 = -1.0
        assert_eq!(report.ev_per_round, -1.0);
        assert_eq!(report.expected_value, -1000.0);
        assert_eq!(report.bet_to_bankroll_ratio, 0.025);
    }

    #[test]
    fn test_same_seed_reproduces_report() {
        let request = SimulationRequest::new(500.0, 20.0, 0.49, 1.0)
            .with_rounds(200)
            .with_trials(1_000);
        let a = run_seeded(&request);
        let b = run_seeded(&request);
        assert_eq!(a.risk_of_ruin_percent, b.risk_of_ruin_percent);
        assert_eq!(a.mean_final_bankroll, b.mean_final_bankroll);
        assert_eq!(a.median_final_bankroll, b.median_final_bankroll);
        assert_eq!(a.min_final_bankroll, b.min_final_bankroll);
        assert_eq!(a.max_final_bankroll, b.max_final_bankroll);
    }

    #[test]
    fn test_bigger_bets_never_reduce_ruin() {
        let base = SimulationRequest::new(500.0, 10.0, 0.47, 1.0)
            .with_rounds(300)
            .with_trials(4_000);
        let small = run_seeded(&base);
        let large = run_seeded(&SimulationRequest {
            bet_size: 50.0,
            ..base
        });
        assert!(
            large.risk_of_ruin_percent >= small.risk_of_ruin_percent,
            "bet 50 ruin {} < bet 10 ruin {}",
            large.risk_of_ruin_percent,
            small.risk_of_ruin_percent
        );
    }

    #[test]
    fn test_smaller_bankroll_never_reduces_ruin() {
        let base = SimulationRequest::new(2_000.0, 25.0, 0.48, 1.0)
            .with_rounds(300)
            .with_trials(4_000);
        let rich = run_seeded(&base);
        let poor = run_seeded(&SimulationRequest {
            bankroll: 200.0,
            ..base
        });
        assert!(poor.risk_of_ruin_percent >= rich.risk_of_ruin_percent);
    }

    #[test]
    fn test_mean_final_converges_to_bankroll_plus_ev() {
        // Law of large numbers: the sampled mean tracks the analytic EV.
        let request = SimulationRequest::new(1000.0, 10.0, 0.55, 1.0)
            .with_rounds(400)
            .with_trials(12_500);
        let report = run_seeded(&request);
        let expected_final = 1000.0 + report.expected_value;
        let tolerance = expected_final.abs() * 0.05;
        assert!(
            (report.mean_final_bankroll - expected_final).abs() < tolerance,
            "mean {} expected {}",
            report.mean_final_bankroll,
            expected_final
        );
    }

    #[test]
    fn test_near_even_money_disadvantage_scenario() {
        // bankroll 1000, bet 25, p 0.48 even money: empirically 2-10% ruin.
        let request = SimulationRequest::new(1000.0, 25.0, 0.48, 1.0);
        let report = run_seeded(&request);
        assert!(
            report.risk_of_ruin_percent >= 1.0 && report.risk_of_ruin_percent < 20.0,
            "ruin {} outside the expected band",
            report.risk_of_ruin_percent
        );
        assert!(matches!(
            report.recommendation,
            Recommendation::Caution | Recommendation::Dangerous
        ));
        assert_eq!(report.kelly_fraction, 0.0);
    }

    #[test]
    fn test_favorable_game_scenario() {
        // bankroll 1000, bet 10, p 0.55 even money: ruin near zero, positive Kelly.
        let request = SimulationRequest::new(1000.0, 10.0, 0.55, 1.0);
        let report = run_seeded(&request);
        assert!(report.risk_of_ruin_percent < 1.0);
        assert_eq!(report.recommendation, Recommendation::Safe);
        assert!(report.kelly_fraction > 0.0);
        assert_eq!(report.optimal_bet_size, 100.0);
    }

    #[test]
    fn test_median_even_and_odd() {
        assert_eq!(median(&[1.0, 2.0, 3.0]), 2.0);
        assert_eq!(median(&[1.0, 2.0, 3.0, 4.0]), 2.5);
        assert_eq!(median(&[5.0]), 5.0);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(48))]

        #[test]
        fn prop_report_invariants_hold(
            bankroll in 1.0f64..10_000.0,
            bet_size in 0.5f64..500.0,
            win_probability in 0.0f64..=1.0,
            payout_ratio in 0.0f64..4.0,
            seed in any::<u64>(),
        ) {
            let request = SimulationRequest::new(bankroll, bet_size, win_probability, payout_ratio)
                .with_rounds(40)
                .with_trials(80);
            let outcome = RuinSimulator::seeded(seed).run(&request);
            let report = outcome.report().expect("valid input must yield a report");

            prop_assert!((0.0..=100.0).contains(&report.risk_of_ruin_percent));
            prop_assert!((0.0..=1.0).contains(&report.kelly_fraction));
            prop_assert!(report.min_final_bankroll <= report.median_final_bankroll);
            prop_assert!(report.median_final_bankroll <= report.max_final_bankroll);
            prop_assert_eq!(
                report.optimal_bet_size,
                kelly::optimal_bet_size(bankroll, win_probability, payout_ratio)
            );

            let ev_per_round = win_probability * bet_size * payout_ratio
                - (1.0 - win_probability) * bet_size;
            prop_assert_eq!(report.expected_value, round2(ev_per_round * 40.0));
        }
    }
}

//! Game parameter resolution.
//!
//! Maps a game identifier (and, for count-sensitive games, a true-count
//! signal) to the default win probability and payout ratio fed into the
//! simulator. The per-game table is an immutable constant; count handling
//! is a linear heuristic with a clamp band, carried as plain configurable
//! data with no claim of deeper correctness.

use serde::{Deserialize, Serialize};

/// Per-round odds for one game configuration. Derived per request, never
/// stored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GameParameters {
    /// Probability of winning a single round.
    pub win_probability: f64,
    /// Net payout multiple on a win.
    pub payout_ratio: f64,
}

/// Linear count-to-probability model for count-sensitive games.
///
/// `p = base_probability + count * sensitivity`, clamped to
/// `[floor, ceiling]` so implausible counts cannot feed the simulator
/// probabilities outside a credible band.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct CountModel {
    /// Win probability at a zero count (basic-strategy baseline).
    pub base_probability: f64,
    /// Probability shift per unit of true count (~0.5% edge per +1).
    pub sensitivity: f64,
    /// Lower clamp of the adjusted probability.
    pub floor: f64,
    /// Upper clamp of the adjusted probability.
    pub ceiling: f64,
}

impl Default for CountModel {
    fn default() -> Self {
        Self {
            base_probability: 0.48,
            sensitivity: 0.005,
            floor: 0.30,
            ceiling: 0.65,
        }
    }
}

impl CountModel {
    /// Adjusted win probability for a given true count.
    pub fn win_probability(&self, count: f64) -> f64 {
        (self.base_probability + count * self.sensitivity).clamp(self.floor, self.ceiling)
    }
}

/// Fixed defaults for games without count sensitivity.
struct GameEntry {
    id: &'static str,
    win_probability: f64,
    payout_ratio: f64,
}

static GAME_TABLE: &[GameEntry] = &[
    GameEntry {
        id: "blackjack",
        // Basic-strategy baseline; replaced by the count model when a
        // count is supplied.
        win_probability: 0.48,
        payout_ratio: 1.0,
    },
    GameEntry {
        id: "roulette",
        // European single-zero, even-money bets.
        win_probability: 0.486,
        payout_ratio: 1.0,
    },
    GameEntry {
        id: "slots",
        win_probability: 0.10,
        payout_ratio: 9.0,
    },
    GameEntry {
        id: "craps",
        // Pass line.
        win_probability: 0.493,
        payout_ratio: 1.0,
    },
    GameEntry {
        id: "sportsbook",
        // -110 pricing.
        win_probability: 0.50,
        payout_ratio: 0.91,
    },
];

/// Parameters handed out for game identifiers the table does not know:
/// a neutral coin flip, so custom game definitions always simulate.
const NEUTRAL_DEFAULT: GameParameters = GameParameters {
    win_probability: 0.5,
    payout_ratio: 1.0,
};

/// Resolves game identifiers to simulator parameters.
#[derive(Debug, Clone, Copy, Default)]
pub struct GameParameterResolver {
    count_model: CountModel,
}

impl GameParameterResolver {
    /// Resolver with the stock count model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolver with a configured count model.
    pub fn with_count_model(count_model: CountModel) -> Self {
        Self { count_model }
    }

    /// Resolve a game identifier, with an optional true count for
    /// count-sensitive games.
    ///
    /// Matching is case-insensitive. Unknown identifiers resolve to the
    /// neutral default rather than failing; the count is ignored for games
    /// without count sensitivity.
    pub fn resolve(&self, game: &str, count: Option<f64>) -> GameParameters {
        let key = game.trim().to_ascii_lowercase();

        if key == "blackjack" {
            let win_probability = match count {
                Some(count) => self.count_model.win_probability(count),
                None => self.count_model.base_probability,
            };
            return GameParameters {
                win_probability,
                payout_ratio: 1.0,
            };
        }

        GAME_TABLE
            .iter()
            .find(|entry| entry.id == key)
            .map(|entry| GameParameters {
                win_probability: entry.win_probability,
                payout_ratio: entry.payout_ratio,
            })
            .unwrap_or(NEUTRAL_DEFAULT)
    }
}

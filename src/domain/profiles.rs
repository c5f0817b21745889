//! Static game profile catalog.
//!
//! Descriptive reference data for the supported games: theoretical return
//! to player, volatility class, washing efficiency, table minimum, and
//! throughput. Consumed by comparison/recommendation layers; the simulator
//! itself never reads it.
//!
//! The catalog is a process-wide constant. Order is fixed and meaningful
//! for presentation.

use serde::Serialize;

/// Variance class of a game's per-round outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum Volatility {
    Low,
    Medium,
    High,
    Extreme,
}

/// How well a game converts wagering requirements into retained value:
/// high RTP with low volatility washes best.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum WashingEfficiency {
    #[serde(rename = "Very Low")]
    VeryLow,
    Low,
    Medium,
    High,
    #[serde(rename = "Very High")]
    VeryHigh,
}

/// Static descriptive profile of one game.
#[derive(Debug, Clone, Serialize)]
pub struct GameProfile {
    /// Stable identifier used for lookup.
    pub id: &'static str,
    /// Human-readable name.
    pub display_name: &'static str,
    /// Theoretical return to player as a fraction (1.0 = 100%; above 1.0
    /// means a player edge).
    pub return_to_player: f64,
    /// Variance class.
    pub volatility: Volatility,
    /// Bonus-clearing quality.
    pub washing_efficiency: WashingEfficiency,
    /// Typical table/machine minimum bet.
    pub min_bet: f64,
    /// Typical rounds played per hour.
    pub rounds_per_hour: u32,
}

static PROFILES: &[GameProfile] = &[
    GameProfile {
        id: "blackjack",
        display_name: "Blackjack (Basic Strategy)",
        return_to_player: 0.995,
        volatility: Volatility::Low,
        washing_efficiency: WashingEfficiency::High,
        min_bet: 10.0,
        rounds_per_hour: 60,
    },
    GameProfile {
        id: "blackjack_card_counting",
        display_name: "Blackjack (Card Counting)",
        // Player edge around 1%, varies with penetration and spread.
        return_to_player: 1.01,
        volatility: Volatility::Medium,
        washing_efficiency: WashingEfficiency::VeryHigh,
        min_bet: 25.0,
        rounds_per_hour: 50,
    },
    GameProfile {
        id: "roulette_even",
        display_name: "Roulette (Red/Black)",
        return_to_player: 0.973,
        volatility: Volatility::Low,
        washing_efficiency: WashingEfficiency::Medium,
        min_bet: 5.0,
        rounds_per_hour: 40,
    },
    GameProfile {
        id: "roulette_straight",
        display_name: "Roulette (Straight Up)",
        return_to_player: 0.973,
        volatility: Volatility::High,
        washing_efficiency: WashingEfficiency::VeryLow,
        min_bet: 1.0,
        rounds_per_hour: 40,
    },
    GameProfile {
        id: "slots_low_vol",
        display_name: "Slots (Low Volatility)",
        return_to_player: 0.96,
        volatility: Volatility::Medium,
        washing_efficiency: WashingEfficiency::Medium,
        min_bet: 0.50,
        rounds_per_hour: 500,
    },
    GameProfile {
        id: "slots_high_vol",
        display_name: "Slots (High Volatility/Jackpot)",
        return_to_player: 0.94,
        volatility: Volatility::Extreme,
        washing_efficiency: WashingEfficiency::Low,
        min_bet: 1.0,
        rounds_per_hour: 500,
    },
    GameProfile {
        id: "craps_pass",
        display_name: "Craps (Pass Line + Odds)",
        // With full odds behind the line.
        return_to_player: 0.99,
        volatility: Volatility::Low,
        washing_efficiency: WashingEfficiency::High,
        min_bet: 10.0,
        rounds_per_hour: 40,
    },
    GameProfile {
        id: "video_poker",
        display_name: "Video Poker (Jacks or Better)",
        return_to_player: 0.9954,
        volatility: Volatility::Medium,
        washing_efficiency: WashingEfficiency::High,
        min_bet: 1.25,
        rounds_per_hour: 400,
    },
];

/// All game profiles in presentation order. Same data on every call.
pub fn all_profiles() -> &'static [GameProfile] {
    PROFILES
}

/// Keyed lookup by stable identifier.
pub fn find(id: &str) -> Option<&'static GameProfile> {
    PROFILES.iter().find(|profile| profile.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_order_is_stable() {
        let ids: Vec<&str> = all_profiles().iter().map(|p| p.id).collect();
        assert_eq!(
            ids,
            vec![
                "blackjack",
                "blackjack_card_counting",
                "roulette_even",
                "roulette_straight",
                "slots_low_vol",
                "slots_high_vol",
                "craps_pass",
                "video_poker",
            ]
        );
    }

    #[test]
    fn test_rtp_values_are_credible() {
        for profile in all_profiles() {
            assert!(
                profile.return_to_player > 0.90 && profile.return_to_player < 1.05,
                "{} rtp {}",
                profile.id,
                profile.return_to_player
            );
            assert!(profile.min_bet > 0.0);
            assert!(profile.rounds_per_hour > 0);
        }
    }

    #[test]
    fn test_only_card_counting_has_player_edge() {
        for profile in all_profiles() {
            if profile.id == "blackjack_card_counting" {
                assert!(profile.return_to_player > 1.0);
            } else {
                assert!(profile.return_to_player < 1.0);
            }
        }
    }

    #[test]
    fn test_find_by_id() {
        let profile = find("video_poker").expect("video poker is in the catalog");
        assert_eq!(profile.display_name, "Video Poker (Jacks or Better)");
        assert_eq!(profile.rounds_per_hour, 400);
        assert!(find("baccarat").is_none());
    }

    #[test]
    fn test_washing_efficiency_serializes_with_spaces() {
        let json = serde_json::to_value(WashingEfficiency::VeryHigh).unwrap();
        assert_eq!(json, "Very High");
        let json = serde_json::to_value(WashingEfficiency::VeryLow).unwrap();
        assert_eq!(json, "Very Low");
    }

    #[test]
    fn test_volatility_ordering() {
        assert!(Volatility::Low < Volatility::Medium);
        assert!(Volatility::Medium < Volatility::High);
        assert!(Volatility::High < Volatility::Extreme);
    }
}

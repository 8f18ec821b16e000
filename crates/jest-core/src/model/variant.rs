use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

pub const DEFAULT_BLACK_PAIR_BONUS: i32 = 2;
pub const QUICK_MAX_ROUNDS: u32 = 4;

/// Parameters a rule set controls. All methods are pure.
pub trait RuleVariant {
    fn name(&self) -> &'static str;

    /// Cards dealt to each player at the start of a round (`k`).
    fn per_player_deal_count(&self, round: u32, stack_size: usize, player_count: usize) -> usize;

    fn trophy_count(&self, player_count: usize) -> usize;

    /// `insufficient_cards` is set when residue plus stack cannot fill another
    /// full deal; `round_number` counts rounds already played.
    fn is_game_over(&self, insufficient_cards: bool, round_number: u32) -> bool;

    fn black_pair_bonus(&self) -> i32 {
        DEFAULT_BLACK_PAIR_BONUS
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Variant {
    #[default]
    Standard,
    /// Three cards per player, so every offer shows two cards.
    Tactical,
    /// Capped number of rounds with an extra trophy and richer black pairs.
    Quick { max_rounds: u32 },
    Custom {
        deal_count: usize,
        trophies: Option<usize>,
        max_rounds: Option<u32>,
        black_pair_bonus: i32,
    },
}

impl Variant {
    pub const fn quick() -> Self {
        Variant::Quick {
            max_rounds: QUICK_MAX_ROUNDS,
        }
    }

    const fn default_trophy_count(player_count: usize) -> usize {
        if player_count <= 3 { 2 } else { 1 }
    }
}

impl RuleVariant for Variant {
    fn name(&self) -> &'static str {
        match self {
            Variant::Standard => "standard",
            Variant::Tactical => "tactical",
            Variant::Quick { .. } => "quick",
            Variant::Custom { .. } => "custom",
        }
    }

    fn per_player_deal_count(&self, _round: u32, _stack_size: usize, _player_count: usize) -> usize {
        match self {
            Variant::Standard | Variant::Quick { .. } => 2,
            Variant::Tactical => 3,
            Variant::Custom { deal_count, .. } => (*deal_count).max(2),
        }
    }

    fn trophy_count(&self, player_count: usize) -> usize {
        match self {
            Variant::Standard | Variant::Tactical => Self::default_trophy_count(player_count),
            Variant::Quick { .. } => 3,
            Variant::Custom { trophies, .. } => {
                trophies.unwrap_or_else(|| Self::default_trophy_count(player_count))
            }
        }
    }

    fn is_game_over(&self, insufficient_cards: bool, round_number: u32) -> bool {
        if insufficient_cards {
            return true;
        }
        match self {
            Variant::Standard | Variant::Tactical => false,
            Variant::Quick { max_rounds } => round_number >= *max_rounds,
            Variant::Custom { max_rounds, .. } => {
                max_rounds.is_some_and(|max| round_number >= max)
            }
        }
    }

    fn black_pair_bonus(&self) -> i32 {
        match self {
            Variant::Quick { .. } => 3,
            Variant::Custom {
                black_pair_bonus, ..
            } => *black_pair_bonus,
            _ => DEFAULT_BLACK_PAIR_BONUS,
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Variant {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" => Ok(Variant::Standard),
            "tactical" => Ok(Variant::Tactical),
            "quick" => Ok(Variant::quick()),
            _ => Err(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{RuleVariant, Variant};

    #[test]
    fn standard_deals_two_and_scales_trophies() {
        let variant = Variant::Standard;
        assert_eq!(variant.per_player_deal_count(1, 15, 3), 2);
        assert_eq!(variant.trophy_count(3), 2);
        assert_eq!(variant.trophy_count(4), 1);
        assert!(!variant.is_game_over(false, 10));
        assert!(variant.is_game_over(true, 1));
    }

    #[test]
    fn tactical_deals_three() {
        assert_eq!(Variant::Tactical.per_player_deal_count(2, 10, 4), 3);
    }

    #[test]
    fn quick_caps_rounds_and_awards_three_trophies() {
        let variant = Variant::quick();
        assert_eq!(variant.trophy_count(4), 3);
        assert!(!variant.is_game_over(false, 3));
        assert!(variant.is_game_over(false, 4));
        assert_eq!(variant.black_pair_bonus(), 3);
    }

    #[test]
    fn custom_respects_optional_cap() {
        let variant = Variant::Custom {
            deal_count: 2,
            trophies: None,
            max_rounds: Some(2),
            black_pair_bonus: 4,
        };
        assert_eq!(variant.trophy_count(3), 2);
        assert!(variant.is_game_over(false, 2));
        assert_eq!(variant.black_pair_bonus(), 4);
    }

    #[test]
    fn parses_names_case_insensitively() {
        assert_eq!("Tactical".parse::<Variant>(), Ok(Variant::Tactical));
        assert_eq!("quick".parse::<Variant>(), Ok(Variant::quick()));
        assert!("hearts".parse::<Variant>().is_err());
    }
}

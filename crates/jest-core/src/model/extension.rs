use crate::model::card::{Card, MagicCard};
use core::str::FromStr;
use rand::Rng;
use serde::{Deserialize, Serialize};

pub const MAX_ROLL: u8 = 5;

/// Optional card packs shuffled into the deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Extension {
    Magic,
}

impl Extension {
    pub const fn name(self) -> &'static str {
        match self {
            Extension::Magic => "magic",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Extension::Magic => {
                "Multiplier doubles Spades, Shield cancels Diamonds, Luck and Misfortune carry a rolled value"
            }
        }
    }

    /// Builds the extra cards for a table of `player_count`. Rolled values are drawn
    /// from `rng` once and stay fixed for the game.
    pub fn cards<R: Rng + ?Sized>(self, player_count: usize, rng: &mut R) -> Vec<Card> {
        match self {
            Extension::Magic => {
                let mut cards = vec![
                    Card::Magic(MagicCard::Multiplier),
                    Card::Magic(MagicCard::Shield),
                    Card::Magic(MagicCard::Luck(rng.gen_range(0..=MAX_ROLL))),
                ];
                if player_count == 4 {
                    cards.push(Card::Magic(MagicCard::Misfortune(
                        rng.gen_range(0..=MAX_ROLL),
                    )));
                }
                cards
            }
        }
    }
}

impl FromStr for Extension {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "magic" => Ok(Extension::Magic),
            _ => Err(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Extension, MAX_ROLL};
    use crate::model::card::{Card, MagicCard};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn magic_adds_misfortune_only_for_four_players() {
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(Extension::Magic.cards(3, &mut rng).len(), 3);
        let four = Extension::Magic.cards(4, &mut rng);
        assert_eq!(four.len(), 4);
        assert!(
            four.iter()
                .any(|card| matches!(card, Card::Magic(MagicCard::Misfortune(_))))
        );
    }

    #[test]
    fn rolled_values_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(99);
        for _ in 0..32 {
            for card in Extension::Magic.cards(4, &mut rng) {
                if let Card::Magic(MagicCard::Luck(v) | MagicCard::Misfortune(v)) = card {
                    assert!(v <= MAX_ROLL);
                }
            }
        }
    }

    #[test]
    fn all_extension_cards_are_special() {
        let mut rng = StdRng::seed_from_u64(1);
        for card in Extension::Magic.cards(4, &mut rng) {
            assert!(!card.suit().is_ranked());
            assert!(card.is_magic());
        }
        assert_eq!("Magic".parse::<Extension>(), Ok(Extension::Magic));
    }
}

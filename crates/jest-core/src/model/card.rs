use crate::model::suit::Suit;
use core::cmp::Ordering;
use core::fmt;
use serde::{Deserialize, Serialize};

/// Extension cards. Rolled values are fixed when the card is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MagicCard {
    /// Worth the total of the Spades held alongside it.
    Multiplier,
    /// Worth the total of the Diamonds held alongside it, cancelling their penalty.
    Shield,
    Luck(u8),
    Misfortune(u8),
}

impl MagicCard {
    pub const fn label(self) -> &'static str {
        match self {
            MagicCard::Multiplier => "Multiplier",
            MagicCard::Shield => "Shield",
            MagicCard::Luck(_) => "Luck",
            MagicCard::Misfortune(_) => "Misfortune",
        }
    }

    fn effective_value(self, context: &[Card]) -> i32 {
        match self {
            MagicCard::Multiplier => suit_total(context, Suit::Spades),
            MagicCard::Shield => suit_total(context, Suit::Diamonds),
            MagicCard::Luck(value) => value as i32,
            MagicCard::Misfortune(value) => -(value as i32),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Card {
    Ace(Suit),
    Pip { suit: Suit, value: u8 },
    Joker,
    Magic(MagicCard),
}

impl Card {
    /// Builds a ranked-suit card; face value 1 yields the Ace.
    pub const fn suited(suit: Suit, value: u8) -> Self {
        if value == 1 {
            Card::Ace(suit)
        } else {
            Card::Pip { suit, value }
        }
    }

    pub const fn suit(self) -> Suit {
        match self {
            Card::Ace(suit) | Card::Pip { suit, .. } => suit,
            Card::Joker | Card::Magic(_) => Suit::Special,
        }
    }

    pub const fn face_value(self) -> u8 {
        match self {
            Card::Ace(_) => 1,
            Card::Pip { value, .. } => value,
            Card::Joker => 0,
            Card::Magic(_) => 1,
        }
    }

    pub const fn is_joker(self) -> bool {
        matches!(self, Card::Joker)
    }

    pub const fn is_ace(self) -> bool {
        matches!(self, Card::Ace(_))
    }

    pub const fn is_magic(self) -> bool {
        matches!(self, Card::Magic(_))
    }

    /// Ordering key: face value first, suit strength as tie-break.
    pub const fn strength(self) -> (u8, u8) {
        (self.face_value(), self.suit().strength())
    }

    pub fn compare_strength(self, other: Card) -> Ordering {
        self.strength().cmp(&other.strength())
    }

    /// Points this card is worth inside `context`, the full collection being scored
    /// (the card itself included). Nothing is cached; every call re-reads the context.
    pub fn effective_value(self, context: &[Card]) -> i32 {
        match self {
            Card::Ace(suit) => {
                if suit_count(context, suit) <= 1 {
                    5
                } else {
                    1
                }
            }
            Card::Pip { value, .. } => value as i32,
            Card::Joker => {
                if suit_count(context, Suit::Hearts) == 0 {
                    4
                } else {
                    0
                }
            }
            Card::Magic(magic) => magic.effective_value(context),
        }
    }
}

fn suit_count(context: &[Card], suit: Suit) -> usize {
    context.iter().filter(|card| card.suit() == suit).count()
}

fn suit_total(context: &[Card], suit: Suit) -> i32 {
    context
        .iter()
        .filter(|card| card.suit() == suit)
        .map(|card| card.effective_value(context))
        .sum()
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Card::Ace(suit) => write!(f, "A{suit}"),
            Card::Pip { suit, value } => write!(f, "{value}{suit}"),
            Card::Joker => f.write_str("Joker"),
            Card::Magic(MagicCard::Luck(value)) => write!(f, "Luck+{value}"),
            Card::Magic(MagicCard::Misfortune(value)) => write!(f, "Misfortune-{value}"),
            Card::Magic(magic) => f.write_str(magic.label()),
        }
    }
}

use crate::model::card::Card;
use crate::model::jest::Jest;
use crate::model::player::PlayerId;
use crate::model::suit::Suit;
use core::fmt;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrophyCondition {
    MajorityOf(u8),
    Highest(Suit),
    Lowest(Suit),
    HasJoker,
    BestJest,
    BestJestWithoutJoker,
}

/// One player's standing as seen by a trophy condition. `score` is the base
/// score computed before any trophy is handed out.
#[derive(Debug, Clone, Copy)]
pub struct Contender<'a> {
    pub id: PlayerId,
    pub jest: &'a Jest,
    pub score: i32,
}

impl TrophyCondition {
    /// Fixed card-to-condition table. Anything outside the four ranked suits and the
    /// Joker falls back to the best collection.
    pub const fn for_card(card: Card) -> Self {
        match card {
            Card::Ace(Suit::Spades) => TrophyCondition::Highest(Suit::Clubs),
            Card::Pip {
                suit: Suit::Spades,
                value: 2,
            } => TrophyCondition::MajorityOf(3),
            Card::Pip {
                suit: Suit::Spades,
                value: 3,
            } => TrophyCondition::MajorityOf(2),
            Card::Pip {
                suit: Suit::Spades,
                value: 4,
            } => TrophyCondition::Lowest(Suit::Clubs),
            Card::Ace(Suit::Clubs) => TrophyCondition::Highest(Suit::Spades),
            Card::Pip {
                suit: Suit::Clubs,
                value: 2,
            } => TrophyCondition::Lowest(Suit::Hearts),
            Card::Pip {
                suit: Suit::Clubs,
                value: 3,
            } => TrophyCondition::Highest(Suit::Hearts),
            Card::Pip {
                suit: Suit::Clubs,
                value: 4,
            } => TrophyCondition::Lowest(Suit::Spades),
            Card::Ace(Suit::Diamonds) => TrophyCondition::MajorityOf(4),
            Card::Pip {
                suit: Suit::Diamonds,
                value: 2,
            } => TrophyCondition::Highest(Suit::Diamonds),
            Card::Pip {
                suit: Suit::Diamonds,
                value: 3,
            } => TrophyCondition::Lowest(Suit::Diamonds),
            Card::Pip {
                suit: Suit::Diamonds,
                value: 4,
            } => TrophyCondition::BestJestWithoutJoker,
            Card::Ace(Suit::Hearts) | Card::Pip {
                suit: Suit::Hearts, ..
            } => TrophyCondition::HasJoker,
            _ => TrophyCondition::BestJest,
        }
    }

    /// Returns the single winner, or `None` when nobody qualifies.
    pub fn evaluate(self, contenders: &[Contender<'_>]) -> Option<PlayerId> {
        match self {
            TrophyCondition::MajorityOf(value) => majority(contenders, value),
            TrophyCondition::Highest(suit) => contenders
                .iter()
                .filter_map(|c| c.jest.highest_of_suit(suit).map(|card| (c.id, card)))
                .fold(None, |best: Option<(PlayerId, Card)>, (id, card)| match best {
                    Some((_, held)) if !card.compare_strength(held).is_gt() => best,
                    _ => Some((id, card)),
                })
                .map(|(id, _)| id),
            TrophyCondition::Lowest(suit) => contenders
                .iter()
                .filter_map(|c| c.jest.lowest_of_suit(suit).map(|card| (c.id, card)))
                .fold(None, |best: Option<(PlayerId, Card)>, (id, card)| match best {
                    Some((_, held)) if !card.compare_strength(held).is_lt() => best,
                    _ => Some((id, card)),
                })
                .map(|(id, _)| id),
            TrophyCondition::HasJoker => contenders
                .iter()
                .find(|c| c.jest.contains_joker())
                .map(|c| c.id),
            TrophyCondition::BestJest => best_jest(contenders, false),
            TrophyCondition::BestJestWithoutJoker => best_jest(contenders, true),
        }
    }
}

fn majority(contenders: &[Contender<'_>], value: u8) -> Option<PlayerId> {
    let mut best: Option<(PlayerId, usize, Option<Card>)> = None;
    for contender in contenders {
        let count = contender.jest.count_value(value);
        if count == 0 {
            continue;
        }
        let strongest = contender.jest.strongest_of_value(value);
        let replaces = match best {
            None => true,
            Some((_, best_count, best_card)) => {
                count > best_count
                    || (count == best_count && strength_key(strongest) > strength_key(best_card))
            }
        };
        if replaces {
            best = Some((contender.id, count, strongest));
        }
    }
    best.map(|(id, _, _)| id)
}

fn best_jest(contenders: &[Contender<'_>], exclude_joker: bool) -> Option<PlayerId> {
    let mut best: Option<&Contender<'_>> = None;
    for contender in contenders {
        if exclude_joker && contender.jest.contains_joker() {
            continue;
        }
        let replaces = match best {
            None => true,
            Some(held) => {
                contender.score > held.score
                    || (contender.score == held.score
                        && strength_key(contender.jest.strongest_card())
                            > strength_key(held.jest.strongest_card()))
            }
        };
        if replaces {
            best = Some(contender);
        }
    }
    best.map(|c| c.id)
}

fn strength_key(card: Option<Card>) -> Option<(u8, u8)> {
    card.map(Card::strength)
}

impl fmt::Display for TrophyCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrophyCondition::MajorityOf(1) => f.write_str("Majority of Aces"),
            TrophyCondition::MajorityOf(value) => write!(f, "Majority of {value}s"),
            TrophyCondition::Highest(suit) => write!(f, "Highest {suit}"),
            TrophyCondition::Lowest(suit) => write!(f, "Lowest {suit}"),
            TrophyCondition::HasJoker => f.write_str("Joker"),
            TrophyCondition::BestJest => f.write_str("Best Jest"),
            TrophyCondition::BestJestWithoutJoker => f.write_str("Best Jest without Joker"),
        }
    }
}

/// A card set aside at the start of the game and handed to whoever satisfies
/// its condition at the end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Trophy {
    card: Card,
    condition: TrophyCondition,
}

impl Trophy {
    pub const fn new(card: Card, condition: TrophyCondition) -> Self {
        Self { card, condition }
    }

    pub const fn from_card(card: Card) -> Self {
        Self::new(card, TrophyCondition::for_card(card))
    }

    pub const fn card(&self) -> Card {
        self.card
    }

    pub const fn condition(&self) -> TrophyCondition {
        self.condition
    }

    /// Scores the wrapped card inside the winner's collection. `context` must
    /// already include the wrapped card.
    pub fn effective_value(&self, context: &[Card]) -> i32 {
        self.card.effective_value(context)
    }

    pub fn evaluate(&self, contenders: &[Contender<'_>]) -> Option<PlayerId> {
        self.condition.evaluate(contenders)
    }
}

impl fmt::Display for Trophy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.card, self.condition)
    }
}

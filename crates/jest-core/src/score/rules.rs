//! Scoring rules. Each one reads the whole card set and returns its partial
//! score; none of them keep state between passes.

use crate::model::card::Card;
use crate::model::suit::Suit;
use crate::model::variant::DEFAULT_BLACK_PAIR_BONUS;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleParams {
    pub black_pair_bonus: i32,
}

impl Default for RuleParams {
    fn default() -> Self {
        Self {
            black_pair_bonus: DEFAULT_BLACK_PAIR_BONUS,
        }
    }
}

pub type RuleFn = fn(&[Card], &RuleParams) -> i32;

#[derive(Debug, Clone, Copy)]
pub struct ScoreRule {
    pub name: &'static str,
    pub apply: RuleFn,
}

pub const STANDARD_RULES: [ScoreRule; 5] = [
    ScoreRule {
        name: "spades",
        apply: spades,
    },
    ScoreRule {
        name: "clubs",
        apply: clubs,
    },
    ScoreRule {
        name: "diamonds",
        apply: diamonds,
    },
    ScoreRule {
        name: "hearts_joker",
        apply: hearts_and_joker,
    },
    ScoreRule {
        name: "black_pairs",
        apply: black_pairs,
    },
];

pub const MAGIC_RULE: ScoreRule = ScoreRule {
    name: "magic",
    apply: magic,
};

fn suit_total(cards: &[Card], suit: Suit) -> i32 {
    cards
        .iter()
        .filter(|card| card.suit() == suit)
        .map(|card| card.effective_value(cards))
        .sum()
}

pub fn spades(cards: &[Card], _params: &RuleParams) -> i32 {
    suit_total(cards, Suit::Spades)
}

pub fn clubs(cards: &[Card], _params: &RuleParams) -> i32 {
    suit_total(cards, Suit::Clubs)
}

pub fn diamonds(cards: &[Card], _params: &RuleParams) -> i32 {
    -suit_total(cards, Suit::Diamonds)
}

/// Hearts and the Joker are resolved together. Joker presence and the Heart count
/// are settled first; only then is any Heart valued:
/// no Joker: Hearts are worth nothing;
/// Joker and no Hearts: the Joker is worth 4;
/// Joker and 1 to 3 Hearts: Hearts subtract, the Joker is worth 0;
/// Joker and all 4 Hearts: Hearts add, the Joker is worth 0.
pub fn hearts_and_joker(cards: &[Card], _params: &RuleParams) -> i32 {
    let has_joker = cards.iter().any(|card| card.is_joker());
    if !has_joker {
        return 0;
    }

    let heart_count = cards
        .iter()
        .filter(|card| card.suit() == Suit::Hearts)
        .count();
    let joker_total: i32 = cards
        .iter()
        .filter(|card| card.is_joker())
        .map(|card| card.effective_value(cards))
        .sum();
    let heart_total = suit_total(cards, Suit::Hearts);

    match heart_count {
        0 => joker_total,
        1..=3 => joker_total - heart_total,
        _ => joker_total + heart_total,
    }
}

/// One bonus per face value held in both Spades and Clubs.
pub fn black_pairs(cards: &[Card], params: &RuleParams) -> i32 {
    let holds = |suit: Suit, value: u8| {
        cards
            .iter()
            .any(|card| card.suit() == suit && card.face_value() == value)
    };
    let pairs = (1..=4u8)
        .filter(|value| holds(Suit::Spades, *value) && holds(Suit::Clubs, *value))
        .count() as i32;
    pairs * params.black_pair_bonus
}

pub fn magic(cards: &[Card], _params: &RuleParams) -> i32 {
    cards
        .iter()
        .filter(|card| card.is_magic())
        .map(|card| card.effective_value(cards))
        .sum()
}

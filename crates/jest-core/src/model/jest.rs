use crate::model::card::Card;
use crate::model::suit::Suit;
use crate::model::trophy::Trophy;
use serde::{Deserialize, Serialize};

/// A player's collection: every card taken during the game plus trophies won.
/// Cards are only ever added.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Jest {
    cards: Vec<Card>,
    trophies: Vec<Trophy>,
    revealed: bool,
}

impl Jest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cards(cards: Vec<Card>) -> Self {
        Self {
            cards,
            ..Self::default()
        }
    }

    pub fn add(&mut self, card: Card) {
        self.cards.push(card);
    }

    pub fn add_trophy(&mut self, trophy: Trophy) {
        self.trophies.push(trophy);
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn trophies(&self) -> &[Trophy] {
        &self.trophies
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn contains(&self, card: Card) -> bool {
        self.cards.contains(&card)
    }

    pub fn contains_joker(&self) -> bool {
        self.cards.iter().any(|card| card.is_joker())
    }

    pub fn count_suit(&self, suit: Suit) -> usize {
        self.cards.iter().filter(|card| card.suit() == suit).count()
    }

    /// Counts ranked-suit cards of the given face value; the Joker and extension
    /// cards never count.
    pub fn count_value(&self, value: u8) -> usize {
        self.ranked_cards()
            .filter(|card| card.face_value() == value)
            .count()
    }

    pub fn strongest_of_value(&self, value: u8) -> Option<Card> {
        self.ranked_cards()
            .filter(|card| card.face_value() == value)
            .max_by(|a, b| a.compare_strength(*b))
    }

    pub fn highest_of_suit(&self, suit: Suit) -> Option<Card> {
        self.cards
            .iter()
            .copied()
            .filter(|card| card.suit() == suit)
            .max_by(|a, b| a.compare_strength(*b))
    }

    pub fn lowest_of_suit(&self, suit: Suit) -> Option<Card> {
        self.cards
            .iter()
            .copied()
            .filter(|card| card.suit() == suit)
            .min_by(|a, b| a.compare_strength(*b))
    }

    pub fn strongest_card(&self) -> Option<Card> {
        self.cards
            .iter()
            .copied()
            .max_by(|a, b| a.compare_strength(*b))
    }

    pub fn reveal(&mut self) {
        self.revealed = true;
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    /// The card set a scoring pass evaluates. Trophies contribute their wrapped
    /// card as if it had been taken like any other.
    pub fn scoring_cards(&self, include_trophies: bool) -> Vec<Card> {
        let mut cards = self.cards.clone();
        if include_trophies {
            cards.extend(self.trophies.iter().map(|trophy| trophy.card()));
        }
        cards
    }

    fn ranked_cards(&self) -> impl Iterator<Item = Card> + '_ {
        self.cards
            .iter()
            .copied()
            .filter(|card| card.suit().is_ranked())
    }
}

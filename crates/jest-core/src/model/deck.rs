use crate::error::DeckError;
use crate::model::card::Card;
use crate::model::suit::Suit;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

pub const STANDARD_DECK_SIZE: usize = 17;

/// The full card set for one game, before trophies are set aside.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Ace to 4 in each ranked suit, plus the Joker.
    pub fn standard() -> Self {
        let mut cards = Vec::with_capacity(STANDARD_DECK_SIZE);
        for suit in Suit::RANKED.iter().copied() {
            for value in 1..=4 {
                cards.push(Card::suited(suit, value));
            }
        }
        cards.push(Card::Joker);
        Self { cards }
    }

    pub fn with_extra(extra: impl IntoIterator<Item = Card>) -> Self {
        let mut deck = Self::standard();
        deck.cards.extend(extra);
        deck
    }

    pub fn shuffled_with_seed(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut deck = Self::standard();
        deck.shuffle_in_place(&mut rng);
        deck
    }

    pub fn shuffle_in_place<R: rand::Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn into_draw_stack(self) -> DrawStack {
        DrawStack::from_cards(self.cards)
    }
}

/// Face-down pile the rounds draw from. The top of the stack is the end of the
/// vector.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawStack {
    cards: Vec<Card>,
}

impl DrawStack {
    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    pub fn shuffle<R: rand::Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
    }

    /// Pops `n` cards off the top. Asking for more than remain leaves the stack
    /// untouched and fails.
    pub fn draw(&mut self, n: usize) -> Result<Vec<Card>, DeckError> {
        if n > self.cards.len() {
            return Err(DeckError::NotEnoughCards {
                requested: n,
                available: self.cards.len(),
            });
        }
        let split = self.cards.len() - n;
        let mut drawn = self.cards.split_off(split);
        drawn.reverse();
        Ok(drawn)
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

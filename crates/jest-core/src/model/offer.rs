use crate::error::OfferError;
use crate::model::card::Card;
use crate::model::player::PlayerId;
use serde::{Deserialize, Serialize};

/// What a taker picks from an offer. The hidden card is picked blind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardChoice {
    Visible(Card),
    Hidden,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Face {
    Visible,
    Hidden,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Offer {
    owner: PlayerId,
    visible: Vec<Card>,
    hidden: Option<Card>,
}

impl Offer {
    pub fn new(owner: PlayerId) -> Self {
        Self {
            owner,
            visible: Vec::new(),
            hidden: None,
        }
    }

    /// Lays out a dealt hand: `hidden` goes face down, the rest face up.
    pub fn from_hand(owner: PlayerId, hand: &[Card], hidden: Card) -> Result<Self, OfferError> {
        let mut offer = Self::new(owner);
        offer.set_hidden(hidden)?;
        let mut hidden_skipped = false;
        for card in hand.iter().copied() {
            if card == hidden && !hidden_skipped {
                hidden_skipped = true;
                continue;
            }
            offer.add_visible(card);
        }
        Ok(offer)
    }

    pub fn owner(&self) -> PlayerId {
        self.owner
    }

    pub fn visible(&self) -> &[Card] {
        &self.visible
    }

    pub fn hidden(&self) -> Option<Card> {
        self.hidden
    }

    pub fn add_visible(&mut self, card: Card) {
        self.visible.push(card);
    }

    pub fn set_hidden(&mut self, card: Card) -> Result<(), OfferError> {
        if self.hidden.is_some() {
            return Err(OfferError::HiddenAlreadySet { owner: self.owner });
        }
        self.hidden = Some(card);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.visible.len() + usize::from(self.hidden.is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// At least two cards remain, so the offer can still be taken from.
    pub fn is_complete(&self) -> bool {
        self.len() >= 2
    }

    pub fn strongest_visible(&self) -> Option<Card> {
        self.visible
            .iter()
            .copied()
            .max_by(|a, b| a.compare_strength(*b))
    }

    pub fn take(&mut self, choice: CardChoice) -> Result<Card, OfferError> {
        match choice {
            CardChoice::Visible(card) => {
                let index = self
                    .visible
                    .iter()
                    .position(|held| *held == card)
                    .ok_or(OfferError::CardNotInOffer {
                        owner: self.owner,
                        card,
                    })?;
                Ok(self.visible.remove(index))
            }
            CardChoice::Hidden => self
                .hidden
                .take()
                .ok_or(OfferError::NoHiddenCard { owner: self.owner }),
        }
    }

    pub fn view(&self) -> OfferView {
        OfferView {
            owner: self.owner,
            visible: self.visible.clone(),
            has_hidden: self.hidden.is_some(),
        }
    }

    /// Remaining cards, face-up ones first.
    pub fn into_cards(self) -> Vec<Card> {
        let mut cards = self.visible;
        cards.extend(self.hidden);
        cards
    }
}

/// The part of an offer other players may see.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfferView {
    pub owner: PlayerId,
    pub visible: Vec<Card>,
    pub has_hidden: bool,
}

impl OfferView {
    pub fn strongest_visible(&self) -> Option<Card> {
        self.visible
            .iter()
            .copied()
            .max_by(|a, b| a.compare_strength(*b))
    }

    pub fn weakest_visible(&self) -> Option<Card> {
        self.visible
            .iter()
            .copied()
            .min_by(|a, b| a.compare_strength(*b))
    }

    pub fn holds(&self, choice: CardChoice) -> bool {
        match choice {
            CardChoice::Visible(card) => self.visible.contains(&card),
            CardChoice::Hidden => self.has_hidden,
        }
    }

    /// Every pick currently available, face-up cards first.
    pub fn choices(&self) -> Vec<CardChoice> {
        let mut choices: Vec<CardChoice> =
            self.visible.iter().copied().map(CardChoice::Visible).collect();
        if self.has_hidden {
            choices.push(CardChoice::Hidden);
        }
        choices
    }
}

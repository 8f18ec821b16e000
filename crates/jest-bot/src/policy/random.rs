use super::{Policy, PolicyContext};
use jest_core::PlayerId;
use jest_core::model::card::Card;
use jest_core::model::offer::{CardChoice, OfferView};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

/// Uniform choice among whatever is offered. Seeded, so a table replays
/// identically for the same seed.
#[derive(Debug, Clone)]
pub struct RandomPolicy {
    rng: StdRng,
}

impl RandomPolicy {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Policy for RandomPolicy {
    fn name(&self) -> &'static str {
        "random"
    }

    fn choose_hidden(&mut self, _ctx: &PolicyContext, hand: &[Card]) -> Card {
        hand.choose(&mut self.rng).copied().unwrap_or(Card::Joker)
    }

    fn choose_target(&mut self, ctx: &PolicyContext, offers: &[OfferView]) -> PlayerId {
        offers
            .choose(&mut self.rng)
            .map(|offer| offer.owner)
            .unwrap_or(ctx.seat)
    }

    fn choose_card(&mut self, _ctx: &PolicyContext, offer: &OfferView) -> CardChoice {
        offer
            .choices()
            .choose(&mut self.rng)
            .copied()
            .unwrap_or(CardChoice::Hidden)
    }
}

use crate::model::card::Card;
use crate::model::jest::Jest;
use crate::model::offer::{CardChoice, OfferView};
use crate::model::player::PlayerId;

/// What a decision maker may know about itself when asked to choose.
#[derive(Debug, Clone, Copy)]
pub struct DecisionContext<'a> {
    pub player: PlayerId,
    pub round: u32,
    pub jest: &'a Jest,
}

/// Source of player decisions. The engine calls it synchronously, once per
/// decision, and validates every answer against what it offered.
pub trait ChoiceProvider {
    /// Must return one of the cards in `hand`.
    fn choose_hidden_card(&mut self, ctx: &DecisionContext<'_>, hand: &[Card]) -> Card;

    /// Must return the owner of one of the `eligible` offers.
    fn choose_target_offer(&mut self, ctx: &DecisionContext<'_>, eligible: &[OfferView])
    -> PlayerId;

    /// Must name a card still present in `offer`.
    fn choose_card_within_offer(
        &mut self,
        ctx: &DecisionContext<'_>,
        offer: &OfferView,
    ) -> CardChoice;
}

impl<P: ChoiceProvider + ?Sized> ChoiceProvider for &mut P {
    fn choose_hidden_card(&mut self, ctx: &DecisionContext<'_>, hand: &[Card]) -> Card {
        (**self).choose_hidden_card(ctx, hand)
    }

    fn choose_target_offer(
        &mut self,
        ctx: &DecisionContext<'_>,
        eligible: &[OfferView],
    ) -> PlayerId {
        (**self).choose_target_offer(ctx, eligible)
    }

    fn choose_card_within_offer(
        &mut self,
        ctx: &DecisionContext<'_>,
        offer: &OfferView,
    ) -> CardChoice {
        (**self).choose_card_within_offer(ctx, offer)
    }
}

/// Always picks the first option on offer: first card of the hand, first
/// eligible offer, first face-up card. Deterministic, handy for replays.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstChoice;

impl ChoiceProvider for FirstChoice {
    fn choose_hidden_card(&mut self, _ctx: &DecisionContext<'_>, hand: &[Card]) -> Card {
        hand.first().copied().unwrap_or(Card::Joker)
    }

    fn choose_target_offer(
        &mut self,
        ctx: &DecisionContext<'_>,
        eligible: &[OfferView],
    ) -> PlayerId {
        eligible.first().map(|offer| offer.owner).unwrap_or(ctx.player)
    }

    fn choose_card_within_offer(
        &mut self,
        _ctx: &DecisionContext<'_>,
        offer: &OfferView,
    ) -> CardChoice {
        offer
            .choices()
            .first()
            .copied()
            .unwrap_or(CardChoice::Hidden)
    }
}

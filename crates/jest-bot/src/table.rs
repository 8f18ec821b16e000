use crate::policy::{BotStyle, Policy, PolicyContext};
use jest_core::model::card::Card;
use jest_core::model::offer::{CardChoice, OfferView};
use jest_core::{ChoiceProvider, DecisionContext, PlayerId};
use tracing::{Level, event};

/// One policy per seat, exposed to the engine as a single choice provider.
pub struct Table {
    seats: Vec<Box<dyn Policy>>,
}

impl Table {
    pub fn new(seats: Vec<Box<dyn Policy>>) -> Self {
        Self { seats }
    }

    /// Seat `i` plays `styles[i]`. Random seats get distinct seeds derived from `seed`.
    pub fn from_styles(styles: &[BotStyle], seed: u64) -> Self {
        let seats = styles
            .iter()
            .enumerate()
            .map(|(idx, style)| style.build(seed.wrapping_add(idx as u64)))
            .collect();
        Self::new(seats)
    }

    pub fn seat_count(&self) -> usize {
        self.seats.len()
    }

    pub fn policy_name(&self, seat: PlayerId) -> Option<&'static str> {
        self.seats.get(seat.index()).map(|policy| policy.name())
    }

    fn seat(&mut self, seat: PlayerId) -> Option<&mut Box<dyn Policy>> {
        self.seats.get_mut(seat.index())
    }
}

impl ChoiceProvider for Table {
    fn choose_hidden_card(&mut self, ctx: &DecisionContext<'_>, hand: &[Card]) -> Card {
        let policy_ctx = PolicyContext::from(ctx);
        let (policy, card) = match self.seat(ctx.player) {
            Some(policy) => (policy.name(), policy.choose_hidden(&policy_ctx, hand)),
            None => ("unseated", hand.first().copied().unwrap_or(Card::Joker)),
        };
        log_decision(ctx, policy, "hide", &card.to_string(), hand.len());
        card
    }

    fn choose_target_offer(
        &mut self,
        ctx: &DecisionContext<'_>,
        eligible: &[OfferView],
    ) -> PlayerId {
        let policy_ctx = PolicyContext::from(ctx);
        let (policy, target) = match self.seat(ctx.player) {
            Some(policy) => (policy.name(), policy.choose_target(&policy_ctx, eligible)),
            None => (
                "unseated",
                eligible.first().map(|offer| offer.owner).unwrap_or(ctx.player),
            ),
        };
        log_decision(ctx, policy, "target", &target.to_string(), eligible.len());
        target
    }

    fn choose_card_within_offer(
        &mut self,
        ctx: &DecisionContext<'_>,
        offer: &OfferView,
    ) -> CardChoice {
        let policy_ctx = PolicyContext::from(ctx);
        let options = offer.choices();
        let (policy, choice) = match self.seat(ctx.player) {
            Some(policy) => (policy.name(), policy.choose_card(&policy_ctx, offer)),
            None => (
                "unseated",
                options.first().copied().unwrap_or(CardChoice::Hidden),
            ),
        };
        let label = match choice {
            CardChoice::Visible(card) => card.to_string(),
            CardChoice::Hidden => "hidden".to_string(),
        };
        log_decision(ctx, policy, "take", &label, options.len());
        choice
    }
}

fn log_decision(
    ctx: &DecisionContext<'_>,
    policy: &'static str,
    decision: &'static str,
    chosen: &str,
    options: usize,
) {
    if !tracing::enabled!(target: "jest_bot::decision", Level::INFO) {
        return;
    }

    event!(
        target: "jest_bot::decision",
        Level::INFO,
        seat = %ctx.player,
        round = ctx.round,
        policy,
        decision,
        options,
        chosen = %chosen,
        jest_size = ctx.jest.len()
    );
}

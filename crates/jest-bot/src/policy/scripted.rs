use super::{Policy, PolicyContext};
use jest_core::PlayerId;
use jest_core::model::card::Card;
use jest_core::model::offer::{CardChoice, OfferView};
use jest_core::model::suit::Suit;

fn weakest(cards: &[Card]) -> Option<Card> {
    cards.iter().copied().min_by(|a, b| a.compare_strength(*b))
}

fn is_diamond(card: Card) -> bool {
    card.suit() == Suit::Diamonds
}

/// Chases the biggest face values on the table and hides its weakest card.
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedyPolicy;

impl Policy for GreedyPolicy {
    fn name(&self) -> &'static str {
        "greedy"
    }

    fn choose_hidden(&mut self, _ctx: &PolicyContext, hand: &[Card]) -> Card {
        weakest(hand).unwrap_or(Card::Joker)
    }

    fn choose_target(&mut self, ctx: &PolicyContext, offers: &[OfferView]) -> PlayerId {
        // Earliest offer wins a tie.
        offers
            .iter()
            .reduce(|best, offer| {
                let held = best.strongest_visible().map(Card::strength);
                if offer.strongest_visible().map(Card::strength) > held {
                    offer
                } else {
                    best
                }
            })
            .map(|offer| offer.owner)
            .unwrap_or(ctx.seat)
    }

    fn choose_card(&mut self, _ctx: &PolicyContext, offer: &OfferView) -> CardChoice {
        offer
            .strongest_visible()
            .map(CardChoice::Visible)
            .unwrap_or(CardChoice::Hidden)
    }
}

/// Keeps Diamonds away from its own collection.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefensivePolicy;

impl Policy for DefensivePolicy {
    fn name(&self) -> &'static str {
        "defensive"
    }

    fn choose_hidden(&mut self, _ctx: &PolicyContext, hand: &[Card]) -> Card {
        hand.iter()
            .copied()
            .filter(|card| is_diamond(*card))
            .max_by(|a, b| a.compare_strength(*b))
            .or_else(|| weakest(hand))
            .unwrap_or(Card::Joker)
    }

    fn choose_target(&mut self, ctx: &PolicyContext, offers: &[OfferView]) -> PlayerId {
        let safe = offers.iter().find(|offer| {
            offer
                .strongest_visible()
                .is_some_and(|card| !is_diamond(card))
        });
        safe.or_else(|| {
            offers.iter().min_by(|a, b| {
                let a = a.weakest_visible().map(Card::strength);
                let b = b.weakest_visible().map(Card::strength);
                a.cmp(&b)
            })
        })
        .map(|offer| offer.owner)
        .unwrap_or(ctx.seat)
    }

    fn choose_card(&mut self, _ctx: &PolicyContext, offer: &OfferView) -> CardChoice {
        let clean = offer
            .visible
            .iter()
            .copied()
            .filter(|card| !is_diamond(*card))
            .max_by(|a, b| a.compare_strength(*b));
        match clean {
            Some(card) => CardChoice::Visible(card),
            None if offer.has_hidden => CardChoice::Hidden,
            None => offer
                .weakest_visible()
                .map(CardChoice::Visible)
                .unwrap_or(CardChoice::Hidden),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{DefensivePolicy, GreedyPolicy};
    use crate::policy::{Policy, PolicyContext};
    use jest_core::PlayerId;
    use jest_core::model::card::Card;
    use jest_core::model::jest::Jest;
    use jest_core::model::offer::{CardChoice, OfferView};
    use jest_core::model::suit::Suit;

    fn view(owner: u8, visible: Vec<Card>, has_hidden: bool) -> OfferView {
        OfferView {
            owner: PlayerId::new(owner),
            visible,
            has_hidden,
        }
    }

    fn with_ctx(run: impl FnOnce(&PolicyContext)) {
        let jest = Jest::new();
        let ctx = PolicyContext {
            seat: PlayerId::new(0),
            round: 1,
            jest: &jest,
        };
        run(&ctx);
    }

    #[test]
    fn greedy_hides_weakest_and_chases_highest() {
        with_ctx(|ctx| {
            let mut greedy = GreedyPolicy;
            let hand = [Card::suited(Suit::Spades, 4), Card::suited(Suit::Hearts, 2)];
            assert_eq!(greedy.choose_hidden(ctx, &hand), hand[1]);

            let offers = vec![
                view(1, vec![Card::suited(Suit::Clubs, 3)], true),
                view(2, vec![Card::suited(Suit::Diamonds, 4)], true),
                view(3, vec![Card::suited(Suit::Spades, 2)], true),
            ];
            assert_eq!(greedy.choose_target(ctx, &offers), PlayerId::new(2));
            assert_eq!(
                greedy.choose_card(ctx, &offers[1]),
                CardChoice::Visible(Card::suited(Suit::Diamonds, 4))
            );
        });
    }

    #[test]
    fn greedy_keeps_the_first_of_equal_offers() {
        with_ctx(|ctx| {
            let offers = vec![
                view(2, Vec::new(), true),
                view(1, Vec::new(), true),
                view(3, Vec::new(), true),
            ];
            assert_eq!(GreedyPolicy.choose_target(ctx, &offers), PlayerId::new(2));

            let offers = vec![
                view(3, Vec::new(), true),
                view(1, vec![Card::suited(Suit::Hearts, 1)], true),
            ];
            assert_eq!(GreedyPolicy.choose_target(ctx, &offers), PlayerId::new(1));
        });
    }

    #[test]
    fn greedy_takes_hidden_when_nothing_is_face_up() {
        with_ctx(|ctx| {
            let offer = view(0, Vec::new(), true);
            assert_eq!(GreedyPolicy.choose_card(ctx, &offer), CardChoice::Hidden);
        });
    }

    #[test]
    fn defensive_hides_diamonds() {
        with_ctx(|ctx| {
            let mut defensive = DefensivePolicy;
            let hand = [Card::suited(Suit::Diamonds, 3), Card::suited(Suit::Clubs, 2)];
            assert_eq!(defensive.choose_hidden(ctx, &hand), hand[0]);
            let hand = [Card::suited(Suit::Spades, 4), Card::suited(Suit::Clubs, 2)];
            assert_eq!(defensive.choose_hidden(ctx, &hand), hand[1]);
        });
    }

    #[test]
    fn defensive_avoids_diamond_offers() {
        with_ctx(|ctx| {
            let mut defensive = DefensivePolicy;
            let offers = vec![
                view(1, vec![Card::suited(Suit::Diamonds, 4)], true),
                view(2, vec![Card::suited(Suit::Hearts, 2)], true),
            ];
            assert_eq!(defensive.choose_target(ctx, &offers), PlayerId::new(2));

            let all_diamonds = vec![
                view(1, vec![Card::suited(Suit::Diamonds, 4)], true),
                view(2, vec![Card::suited(Suit::Diamonds, 2)], true),
            ];
            assert_eq!(defensive.choose_target(ctx, &all_diamonds), PlayerId::new(2));
            assert_eq!(
                defensive.choose_card(ctx, &all_diamonds[0]),
                CardChoice::Hidden
            );
            assert_eq!(
                defensive.choose_card(ctx, &offers[1]),
                CardChoice::Visible(Card::suited(Suit::Hearts, 2))
            );
        });
    }
}

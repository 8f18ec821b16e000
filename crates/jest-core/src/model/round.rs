use crate::error::{ContractViolation, DeckError, RoundError};
use crate::game::choices::{ChoiceProvider, DecisionContext};
use crate::game::events::{GameEvent, GameObserver, PlayerCards};
use crate::model::card::Card;
use crate::model::deck::DrawStack;
use crate::model::offer::{CardChoice, Face, Offer, OfferView};
use crate::model::player::{Player, PlayerId};
use rand::seq::SliceRandom;
use std::collections::BTreeSet;
use tracing::{Level, event};

/// One distribute/offer/take cycle. Created by the game for each round and
/// consumed once its residue has been harvested.
#[derive(Debug, Clone)]
pub struct Round {
    number: u32,
    deal_count: usize,
    player_count: usize,
    offers: Vec<Offer>,
    played: BTreeSet<PlayerId>,
}

impl Round {
    pub fn new(number: u32, player_count: usize, deal_count: usize) -> Self {
        Self {
            number,
            deal_count,
            player_count,
            offers: Vec::with_capacity(player_count),
            played: BTreeSet::new(),
        }
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn deal_count(&self) -> usize {
        self.deal_count
    }

    pub fn offers(&self) -> &[Offer] {
        &self.offers
    }

    pub fn has_played(&self, player: PlayerId) -> bool {
        self.played.contains(&player)
    }

    /// Cards needed for a full deal: `k` per player.
    pub fn cards_needed(&self) -> usize {
        self.deal_count * self.player_count
    }

    /// Deals `k` cards per player. Without residue the cards come straight off the
    /// stack; otherwise the residue is topped up from the stack and the pool is
    /// shuffled before dealing so nobody can track their leftover card.
    pub fn distribute<R: rand::Rng + ?Sized>(
        &self,
        residue: Vec<Card>,
        stack: &mut DrawStack,
        rng: &mut R,
    ) -> Result<Vec<Vec<Card>>, DeckError> {
        let needed = self.cards_needed();
        let pool = if residue.is_empty() {
            stack.draw(needed)?
        } else {
            let mut pool = residue;
            let top_up = stack.draw(needed.saturating_sub(pool.len()))?;
            pool.extend(top_up);
            pool.shuffle(rng);
            pool
        };

        Ok(pool
            .chunks(self.deal_count)
            .take(self.player_count)
            .map(<[Card]>::to_vec)
            .collect())
    }

    /// Asks every player which dealt card to hide and lays out the offers.
    pub fn build_offers<P, O>(
        &mut self,
        hands: Vec<Vec<Card>>,
        players: &[Player],
        provider: &mut P,
        observer: &mut O,
    ) -> Result<(), RoundError>
    where
        P: ChoiceProvider + ?Sized,
        O: GameObserver + ?Sized,
    {
        if hands.len() != players.len() {
            return Err(RoundError::HandCountMismatch {
                dealt: hands.len(),
                players: players.len(),
            });
        }

        self.offers.clear();
        for (player, hand) in players.iter().zip(hands.iter()) {
            let ctx = DecisionContext {
                player: player.id(),
                round: self.number,
                jest: player.jest(),
            };
            let hidden = provider.choose_hidden_card(&ctx, hand);
            if !hand.contains(&hidden) {
                return Err(ContractViolation::HiddenCardNotInHand {
                    player: player.id(),
                    card: hidden,
                }
                .into());
            }
            self.offers.push(Offer::from_hand(player.id(), hand, hidden)?);
        }

        observer.on_event(&GameEvent::OffersCreated {
            round: self.number,
            offers: self.offers.iter().map(Offer::view).collect(),
        });
        Ok(())
    }

    /// The owner of the offer showing the strongest face-up card opens the taking.
    pub fn first_player(&self) -> Option<PlayerId> {
        strongest_offer_owner(self.offers.iter())
    }

    /// Complete offers other than the active player's own; the own offer only
    /// when nothing else is left.
    pub fn eligible_offers(&self, active: PlayerId) -> Vec<PlayerId> {
        let others: Vec<PlayerId> = self
            .offers
            .iter()
            .filter(|offer| offer.owner() != active && offer.is_complete())
            .map(Offer::owner)
            .collect();
        if !others.is_empty() {
            return others;
        }
        self.offers
            .iter()
            .filter(|offer| offer.owner() == active && offer.is_complete())
            .map(Offer::owner)
            .collect()
    }

    /// The raided owner plays next if they have not played yet. Otherwise the
    /// waiting player with the strongest face-up card goes.
    pub fn next_player(&self, taken_from: PlayerId) -> Option<PlayerId> {
        if !self.played.contains(&taken_from) {
            return Some(taken_from);
        }
        strongest_offer_owner(
            self.offers
                .iter()
                .filter(|offer| !self.played.contains(&offer.owner())),
        )
    }

    /// Runs one take for `active` and returns the owner of the offer taken from.
    pub fn take_turn<P, O>(
        &mut self,
        active: PlayerId,
        players: &mut [Player],
        provider: &mut P,
        observer: &mut O,
    ) -> Result<PlayerId, RoundError>
    where
        P: ChoiceProvider + ?Sized,
        O: GameObserver + ?Sized,
    {
        let eligible: Vec<OfferView> = self
            .eligible_offers(active)
            .into_iter()
            .filter_map(|owner| self.offer(owner).map(Offer::view))
            .collect();
        if eligible.is_empty() {
            return Err(RoundError::NoEligibleOffer {
                round: self.number,
                player: active,
            });
        }

        let (target, choice) = {
            let player = &players[active.index()];
            let ctx = DecisionContext {
                player: active,
                round: self.number,
                jest: player.jest(),
            };
            let target = provider.choose_target_offer(&ctx, &eligible);
            let Some(view) = eligible.iter().find(|view| view.owner == target) else {
                return Err(ContractViolation::OfferNotEligible {
                    player: active,
                    target,
                }
                .into());
            };
            let choice = provider.choose_card_within_offer(&ctx, view);
            if !view.holds(choice) {
                return Err(ContractViolation::CardNotInOffer {
                    player: active,
                    target,
                    choice,
                }
                .into());
            }
            (target, choice)
        };

        let card = self.offers[target.index()].take(choice)?;
        let face = match choice {
            CardChoice::Visible(_) => Face::Visible,
            CardChoice::Hidden => Face::Hidden,
        };
        players[active.index()].jest_mut().add(card);
        self.played.insert(active);

        if tracing::enabled!(target: "jest_core::round", Level::DEBUG) {
            event!(
                target: "jest_core::round",
                Level::DEBUG,
                round = self.number,
                player = %active,
                from = %target,
                card = %card,
                face = ?face
            );
        }
        observer.on_event(&GameEvent::CardTaken {
            round: self.number,
            player: active,
            card,
            from: target,
            face,
        });
        Ok(target)
    }

    /// Every player takes exactly once, in the dynamic turn order.
    pub fn play_taking_phase<P, O>(
        &mut self,
        players: &mut [Player],
        provider: &mut P,
        observer: &mut O,
    ) -> Result<(), RoundError>
    where
        P: ChoiceProvider + ?Sized,
        O: GameObserver + ?Sized,
    {
        let Some(mut active) = self.first_player() else {
            return Ok(());
        };
        for turn in 0..self.player_count {
            let taken_from = self.take_turn(active, players, provider, observer)?;
            if turn + 1 == self.player_count {
                break;
            }
            match self.next_player(taken_from) {
                Some(next) => active = next,
                None => break,
            }
        }
        Ok(())
    }

    /// Full round: distribution, offers, taking. Returns the residue.
    pub fn play<R, P, O>(
        mut self,
        residue: Vec<Card>,
        stack: &mut DrawStack,
        rng: &mut R,
        players: &mut [Player],
        provider: &mut P,
        observer: &mut O,
    ) -> Result<Vec<Card>, RoundError>
    where
        R: rand::Rng + ?Sized,
        P: ChoiceProvider + ?Sized,
        O: GameObserver + ?Sized,
    {
        observer.on_event(&GameEvent::RoundStarted { round: self.number });
        let hands = self.distribute(residue, stack, rng)?;
        observer.on_event(&GameEvent::CardsDistributed {
            round: self.number,
            hands: players
                .iter()
                .zip(hands.iter())
                .map(|(player, cards)| PlayerCards {
                    player: player.id(),
                    cards: cards.clone(),
                })
                .collect(),
        });
        self.build_offers(hands, players, provider, observer)?;
        self.play_taking_phase(players, provider, observer)?;
        observer.on_event(&GameEvent::RoundEnded { round: self.number });
        Ok(self.into_residue())
    }

    /// Whatever is left in the offers, in player order.
    pub fn into_residue(self) -> Vec<Card> {
        self.offers.into_iter().flat_map(Offer::into_cards).collect()
    }

    fn offer(&self, owner: PlayerId) -> Option<&Offer> {
        self.offers.iter().find(|offer| offer.owner() == owner)
    }
}

fn strongest_offer_owner<'a>(offers: impl Iterator<Item = &'a Offer>) -> Option<PlayerId> {
    offers
        .fold(None, |best: Option<(PlayerId, Option<(u8, u8)>)>, offer| {
            let key = offer.strongest_visible().map(Card::strength);
            match best {
                Some((_, held)) if key <= held => best,
                _ => Some((offer.owner(), key)),
            }
        })
        .map(|(owner, _)| owner)
}

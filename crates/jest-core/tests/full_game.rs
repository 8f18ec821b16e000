use jest_core::game::choices::{ChoiceProvider, DecisionContext, FirstChoice};
use jest_core::game::events::{GameEvent, NullObserver};
use jest_core::error::{ContractViolation, GameError, RoundError};
use jest_core::game::game_state::{Game, GamePhase};
use jest_core::model::card::Card;
use jest_core::model::extension::Extension;
use jest_core::model::offer::{CardChoice, OfferView};
use jest_core::model::player::PlayerId;
use jest_core::model::variant::Variant;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::collections::HashSet;

/// Makes legal but random decisions.
struct Shuffler {
    rng: StdRng,
}

impl Shuffler {
    fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl ChoiceProvider for Shuffler {
    fn choose_hidden_card(&mut self, _ctx: &DecisionContext<'_>, hand: &[Card]) -> Card {
        hand[self.rng.gen_range(0..hand.len())]
    }

    fn choose_target_offer(
        &mut self,
        _ctx: &DecisionContext<'_>,
        eligible: &[OfferView],
    ) -> PlayerId {
        eligible[self.rng.gen_range(0..eligible.len())].owner
    }

    fn choose_card_within_offer(
        &mut self,
        _ctx: &DecisionContext<'_>,
        offer: &OfferView,
    ) -> CardChoice {
        let choices = offer.choices();
        choices[self.rng.gen_range(0..choices.len())]
    }
}

fn names(count: usize) -> Vec<String> {
    (0..count).map(|i| format!("seat{i}")).collect()
}

#[test]
fn three_player_opening_matches_card_counts() {
    let mut log: Vec<GameEvent> = Vec::new();
    let mut game = Game::initialize(names(3), None, Variant::Standard, 2024, &mut log).unwrap();

    match &log[0] {
        GameEvent::Initialized {
            trophy_count,
            stack_size,
            ..
        } => {
            assert_eq!(*trophy_count, 2);
            assert_eq!(*stack_size, 15);
        }
        other => panic!("unexpected first event {other:?}"),
    }

    game.execute_next_round(&mut Shuffler::new(1), &mut log)
        .unwrap();
    assert_eq!(game.stack().len(), 9);
    assert_eq!(game.residue().len(), 3);
    for player in game.players() {
        assert_eq!(player.jest().len(), 1);
    }
}

#[test]
fn every_card_is_accounted_for_at_the_end() {
    for seed in 0..40u64 {
        for (count, extension, variant) in [
            (3, None, Variant::Standard),
            (4, None, Variant::Standard),
            (3, Some(Extension::Magic), Variant::Tactical),
            (4, Some(Extension::Magic), Variant::quick()),
            (4, None, Variant::Tactical),
        ] {
            let mut game =
                Game::initialize(names(count), extension, variant, seed, &mut NullObserver)
                    .unwrap();
            let total_cards = game.stack().len() + game.trophies().len();
            let outcome = game
                .play_to_completion(&mut Shuffler::new(seed ^ 0xA5), &mut NullObserver)
                .unwrap();

            let mut seen = HashSet::new();
            let mut held = 0;
            for player in game.players() {
                for card in player.jest().cards() {
                    assert!(seen.insert(*card), "card {card} held twice");
                    held += 1;
                }
                assert!(player.jest().is_revealed());
            }
            assert_eq!(
                held + game.trophies().len() + game.residue().len() + game.stack().len(),
                total_cards,
                "seed {seed} variant {variant}"
            );
            assert_eq!(outcome.standings.len(), count);
            assert_eq!(outcome.awards.len(), game.trophies().len());
        }
    }
}

#[test]
fn residue_is_claimed_one_card_per_player() {
    let mut log: Vec<GameEvent> = Vec::new();
    let mut game = Game::initialize(names(4), None, Variant::Standard, 77, &mut log).unwrap();
    game.play_to_completion(&mut FirstChoice, &mut log).unwrap();

    let claimed = log
        .iter()
        .find_map(|event| match event {
            GameEvent::ResidueCollected { cards } => Some(cards.clone()),
            _ => None,
        })
        .expect("residue event");
    assert_eq!(claimed.len(), 4);
    let owners: Vec<PlayerId> = claimed.iter().map(|c| c.player).collect();
    assert_eq!(owners, PlayerId::all(4).collect::<Vec<_>>());
    assert!(game.residue().is_empty());
    // 3 rounds of taking plus the residue card.
    assert!(game.players().iter().all(|p| p.jest().len() == 4));
}

#[test]
fn trophies_are_resolved_in_creation_order() {
    let mut log: Vec<GameEvent> = Vec::new();
    let mut game = Game::initialize(names(3), None, Variant::quick(), 31, &mut log).unwrap();
    let created = game.trophies().to_vec();
    game.play_to_completion(&mut Shuffler::new(9), &mut log)
        .unwrap();
    let resolved: Vec<_> = log
        .iter()
        .filter_map(|event| match event {
            GameEvent::TrophyAwarded { trophy, winner } => Some((*trophy, *winner)),
            _ => None,
        })
        .collect();
    assert_eq!(resolved.len(), 3);
    for ((trophy, winner), expected) in resolved.iter().zip(created.iter()) {
        assert_eq!(trophy, expected);
        if let Some(id) = winner {
            assert!(game.players()[id.index()].jest().trophies().contains(trophy));
        }
    }
}

#[test]
fn final_scores_differ_from_base_only_by_trophies() {
    let mut game = Game::initialize(names(3), None, Variant::Standard, 404, &mut NullObserver)
        .unwrap();
    let outcome = game
        .play_to_completion(&mut Shuffler::new(3), &mut NullObserver)
        .unwrap();
    for (base, fin) in outcome.base_scores.iter().zip(outcome.final_scores.iter()) {
        let player = &game.players()[base.player.index()];
        if player.jest().trophies().is_empty() {
            assert_eq!(base.breakdown.total, fin.breakdown.total);
        }
    }
    let top = &outcome.standings[0];
    assert_eq!(outcome.final_score(top.player), Some(top.score));
    assert!(
        outcome
            .standings
            .windows(2)
            .all(|pair| pair[0].score >= pair[1].score)
    );
}

/// Plays legally but always raids its own offer once it has one.
struct SelfRaider;

impl ChoiceProvider for SelfRaider {
    fn choose_hidden_card(&mut self, _ctx: &DecisionContext<'_>, hand: &[Card]) -> Card {
        hand[0]
    }

    fn choose_target_offer(
        &mut self,
        ctx: &DecisionContext<'_>,
        _eligible: &[OfferView],
    ) -> PlayerId {
        ctx.player
    }

    fn choose_card_within_offer(
        &mut self,
        _ctx: &DecisionContext<'_>,
        offer: &OfferView,
    ) -> CardChoice {
        offer.choices()[0]
    }
}

#[test]
fn failed_round_restores_the_table_and_aborts_the_game() {
    let mut game = Game::initialize(names(3), None, Variant::Standard, 5, &mut NullObserver)
        .unwrap();
    assert!(game.execute_next_round(&mut FirstChoice, &mut NullObserver).unwrap());

    let stack_before = game.stack().cards().to_vec();
    let residue_before = game.residue().to_vec();
    let jests_before: Vec<Vec<Card>> = game
        .players()
        .iter()
        .map(|player| player.jest().cards().to_vec())
        .collect();

    let err = game
        .execute_next_round(&mut SelfRaider, &mut NullObserver)
        .unwrap_err();
    assert!(matches!(
        err,
        GameError::Round(RoundError::Contract(ContractViolation::OfferNotEligible { .. }))
    ));

    assert_eq!(game.phase(), GamePhase::Aborted);
    assert_eq!(game.round_number(), 1);
    assert_eq!(game.stack().cards(), stack_before.as_slice());
    assert_eq!(game.residue(), residue_before.as_slice());
    for (player, before) in game.players().iter().zip(jests_before.iter()) {
        assert_eq!(player.jest().cards(), before.as_slice());
    }

    assert_eq!(
        game.execute_next_round(&mut FirstChoice, &mut NullObserver),
        Err(GameError::Aborted)
    );
    assert_eq!(
        game.play_to_completion(&mut FirstChoice, &mut NullObserver),
        Err(GameError::Aborted)
    );
    assert_eq!(game.round_number(), 1);
}

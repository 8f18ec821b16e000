use crate::error::GameError;
use crate::game::choices::ChoiceProvider;
use crate::game::events::{GameEvent, GameObserver, PlayerCard, PlayerCards, PlayerScore};
use crate::game::ranking::{Standing, rank_players};
use crate::model::card::Card;
use crate::model::deck::{Deck, DrawStack};
use crate::model::extension::Extension;
use crate::model::player::{MAX_PLAYERS, MIN_PLAYERS, Player, PlayerId};
use crate::model::round::Round;
use crate::model::trophy::{Contender, Trophy};
use crate::model::variant::{RuleVariant, Variant};
use crate::score::{ScoreCalculator, ScorePass};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use tracing::{Level, event};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GamePhase {
    InProgress,
    Finished,
    /// A round failed; the table was put back as it stood before that round.
    Aborted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TrophyAward {
    pub trophy: Trophy,
    pub winner: Option<PlayerId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameOutcome {
    pub standings: Vec<Standing>,
    pub base_scores: Vec<PlayerScore>,
    pub final_scores: Vec<PlayerScore>,
    pub awards: Vec<TrophyAward>,
    pub rounds_played: u32,
}

impl GameOutcome {
    pub fn final_score(&self, player: PlayerId) -> Option<i32> {
        self.final_scores
            .iter()
            .find(|score| score.player == player)
            .map(|score| score.breakdown.total)
    }

    pub fn has_unresolved_tie(&self) -> bool {
        self.standings.iter().any(|standing| standing.tied)
    }
}

/// Top-level game: owns the players, the draw stack and the trophies, and
/// sequences rounds until the variant's end condition fires.
#[derive(Debug, Clone)]
pub struct Game {
    players: Vec<Player>,
    stack: DrawStack,
    trophies: Vec<Trophy>,
    residue: Vec<Card>,
    round_number: u32,
    variant: Variant,
    extension: Option<Extension>,
    calculator: ScoreCalculator,
    phase: GamePhase,
    outcome: Option<GameOutcome>,
    seed: u64,
}

/// Everything needed to put a game back on the table between rounds.
#[derive(Debug, Clone)]
pub struct GameParts {
    pub players: Vec<Player>,
    pub stack: DrawStack,
    pub trophies: Vec<Trophy>,
    pub residue: Vec<Card>,
    pub round_number: u32,
    pub variant: Variant,
    pub extension: Option<Extension>,
    pub phase: GamePhase,
    pub seed: u64,
}

impl Game {
    pub fn initialize<N, O>(
        names: impl IntoIterator<Item = N>,
        extension: Option<Extension>,
        variant: Variant,
        seed: u64,
        observer: &mut O,
    ) -> Result<Self, GameError>
    where
        N: Into<String>,
        O: GameObserver + ?Sized,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        let player_count = validate_player_count(names.len())?;
        let players: Vec<Player> = names
            .iter()
            .zip(PlayerId::all(player_count))
            .map(|(name, id)| Player::new(id, name.clone()))
            .collect();

        let mut rng = StdRng::seed_from_u64(seed);
        let extra = extension
            .map(|ext| ext.cards(player_count, &mut rng))
            .unwrap_or_default();
        let mut deck = Deck::with_extra(extra);
        deck.shuffle_in_place(&mut rng);

        let mut stack = deck.into_draw_stack();
        let trophies: Vec<Trophy> = stack
            .draw(variant.trophy_count(player_count))?
            .into_iter()
            .map(Trophy::from_card)
            .collect();
        stack.shuffle(&mut rng);

        event!(
            target: "jest_core::game",
            Level::INFO,
            players = player_count,
            variant = variant.name(),
            extension = extension.map(Extension::name).unwrap_or("none"),
            trophies = trophies.len(),
            stack = stack.len(),
            seed,
            "game initialized"
        );
        observer.on_event(&GameEvent::Initialized {
            players: names,
            trophy_count: trophies.len(),
            trophies: trophies.clone(),
            stack_size: stack.len(),
        });

        Ok(Self {
            players,
            stack,
            trophies,
            residue: Vec::new(),
            round_number: 0,
            variant,
            extension,
            calculator: ScoreCalculator::for_game(&variant, extension),
            phase: GamePhase::InProgress,
            outcome: None,
            seed,
        })
    }

    /// Rebuilds a game from captured state. A finished game gets its outcome
    /// recomputed from the collections.
    pub fn resume(parts: GameParts) -> Result<Self, GameError> {
        validate_player_count(parts.players.len())?;
        let mut game = Self {
            calculator: ScoreCalculator::for_game(&parts.variant, parts.extension),
            players: parts.players,
            stack: parts.stack,
            trophies: parts.trophies,
            residue: parts.residue,
            round_number: parts.round_number,
            variant: parts.variant,
            extension: parts.extension,
            phase: parts.phase,
            outcome: None,
            seed: parts.seed,
        };
        if game.phase == GamePhase::Finished {
            game.outcome = Some(game.summarize());
        }
        Ok(game)
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    pub fn stack(&self) -> &DrawStack {
        &self.stack
    }

    pub fn trophies(&self) -> &[Trophy] {
        &self.trophies
    }

    pub fn residue(&self) -> &[Card] {
        &self.residue
    }

    pub fn round_number(&self) -> u32 {
        self.round_number
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn extension(&self) -> Option<Extension> {
        self.extension
    }

    pub fn calculator(&self) -> &ScoreCalculator {
        &self.calculator
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_finished(&self) -> bool {
        self.phase == GamePhase::Finished
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn outcome(&self) -> Option<&GameOutcome> {
        self.outcome.as_ref()
    }

    /// Plays one round. Returns `Ok(false)` without doing anything once the game
    /// is finished; when the round triggers the end condition the finale runs
    /// before returning. A failed round restores the stack, residue and
    /// collections, then leaves the game `Aborted` for good.
    pub fn execute_next_round<P, O>(
        &mut self,
        provider: &mut P,
        observer: &mut O,
    ) -> Result<bool, GameError>
    where
        P: ChoiceProvider + ?Sized,
        O: GameObserver + ?Sized,
    {
        match self.phase {
            GamePhase::Finished => return Ok(false),
            GamePhase::Aborted => return Err(GameError::Aborted),
            GamePhase::InProgress => {}
        }

        let player_count = self.player_count();
        let number = self.round_number + 1;
        let deal_count =
            self.variant
                .per_player_deal_count(number, self.stack.len(), player_count);
        let mut rng = round_rng(self.seed, number);
        let stack_before = self.stack.clone();
        let players_before = self.players.clone();
        let residue_before = self.residue.clone();

        let played = Round::new(number, player_count, deal_count).play(
            std::mem::take(&mut self.residue),
            &mut self.stack,
            &mut rng,
            &mut self.players,
            provider,
            observer,
        );
        self.residue = match played {
            Ok(residue) => residue,
            Err(err) => {
                self.stack = stack_before;
                self.players = players_before;
                self.residue = residue_before;
                self.phase = GamePhase::Aborted;
                event!(
                    target: "jest_core::game",
                    Level::WARN,
                    round = number,
                    error = %err,
                    "round aborted"
                );
                return Err(err.into());
            }
        };
        self.round_number = number;

        let next_deal =
            self.variant
                .per_player_deal_count(number + 1, self.stack.len(), player_count);
        let insufficient = self.residue.len() + self.stack.len() < player_count * next_deal;
        event!(
            target: "jest_core::game",
            Level::DEBUG,
            round = number,
            residue = self.residue.len(),
            stack = self.stack.len(),
            insufficient,
            "round complete"
        );

        if self.variant.is_game_over(insufficient, number) {
            self.finish(observer);
        }
        Ok(true)
    }

    pub fn play_to_completion<P, O>(
        &mut self,
        provider: &mut P,
        observer: &mut O,
    ) -> Result<GameOutcome, GameError>
    where
        P: ChoiceProvider + ?Sized,
        O: GameObserver + ?Sized,
    {
        match self.phase {
            GamePhase::Finished => return Err(GameError::AlreadyFinished),
            GamePhase::Aborted => return Err(GameError::Aborted),
            GamePhase::InProgress => {}
        }
        while self.execute_next_round(provider, observer)? {}
        Ok(self.summarize())
    }

    fn finish<O: GameObserver + ?Sized>(&mut self, observer: &mut O) {
        let claimed = self.residue.len().min(self.players.len());
        let residue: Vec<Card> = self.residue.drain(..claimed).collect();
        let mut collected = Vec::with_capacity(residue.len());
        for (player, card) in self.players.iter_mut().zip(residue) {
            player.jest_mut().add(card);
            collected.push(PlayerCard {
                player: player.id(),
                card,
            });
        }
        observer.on_event(&GameEvent::ResidueCollected { cards: collected });

        for player in &mut self.players {
            player.jest_mut().reveal();
        }
        observer.on_event(&GameEvent::CollectionsRevealed {
            jests: self
                .players
                .iter()
                .map(|player| PlayerCards {
                    player: player.id(),
                    cards: player.jest().cards().to_vec(),
                })
                .collect(),
        });

        let base_scores = self.scores(ScorePass::Base);
        observer.on_event(&GameEvent::BaseScores {
            scores: base_scores.clone(),
        });

        let base_totals: Vec<i32> = base_scores
            .iter()
            .map(|score| score.breakdown.total)
            .collect();
        for trophy in self.trophies.clone() {
            let winner = {
                let contenders: Vec<Contender<'_>> = self
                    .players
                    .iter()
                    .zip(base_totals.iter())
                    .map(|(player, score)| Contender {
                        id: player.id(),
                        jest: player.jest(),
                        score: *score,
                    })
                    .collect();
                trophy.evaluate(&contenders)
            };
            if let Some(id) = winner {
                self.players[id.index()].jest_mut().add_trophy(trophy);
            }
            event!(
                target: "jest_core::game",
                Level::DEBUG,
                trophy = %trophy,
                winner = ?winner,
                "trophy resolved"
            );
            observer.on_event(&GameEvent::TrophyAwarded { trophy, winner });
        }

        let outcome = self.summarize();
        observer.on_event(&GameEvent::FinalScores {
            scores: outcome.final_scores.clone(),
        });
        observer.on_event(&GameEvent::GameEnded {
            standings: outcome.standings.clone(),
        });
        event!(
            target: "jest_core::game",
            Level::INFO,
            rounds = self.round_number,
            tied = outcome.has_unresolved_tie(),
            "game finished"
        );

        self.phase = GamePhase::Finished;
        self.outcome = Some(outcome);
    }

    fn scores(&self, pass: ScorePass) -> Vec<PlayerScore> {
        self.players
            .iter()
            .map(|player| PlayerScore {
                player: player.id(),
                breakdown: self.calculator.score(player.jest(), pass),
            })
            .collect()
    }

    /// Derives the outcome from the collections as they stand.
    fn summarize(&self) -> GameOutcome {
        let base_scores = self.scores(ScorePass::Base);
        let final_scores = self.scores(ScorePass::Final);
        let totals: Vec<i32> = final_scores
            .iter()
            .map(|score| score.breakdown.total)
            .collect();
        let awards = self
            .trophies
            .iter()
            .map(|trophy| TrophyAward {
                trophy: *trophy,
                winner: self
                    .players
                    .iter()
                    .find(|player| player.jest().trophies().contains(trophy))
                    .map(Player::id),
            })
            .collect();
        GameOutcome {
            standings: rank_players(&self.players, &totals),
            base_scores,
            final_scores,
            awards,
            rounds_played: self.round_number,
        }
    }
}

fn validate_player_count(count: usize) -> Result<usize, GameError> {
    if (MIN_PLAYERS..=MAX_PLAYERS).contains(&count) {
        Ok(count)
    } else {
        Err(GameError::InvalidPlayerCount(count))
    }
}

/// Each round shuffles with its own generator so a restored game replays the
/// same shuffles as the original.
fn round_rng(seed: u64, round: u32) -> StdRng {
    StdRng::seed_from_u64(seed ^ u64::from(round).wrapping_mul(0x9E37_79B9_7F4A_7C15))
}

#[cfg(test)]
mod tests {
    use super::{Game, GamePhase};
    use crate::error::GameError;
    use crate::game::choices::FirstChoice;
    use crate::game::events::{GameEvent, NullObserver};
    use crate::model::extension::Extension;
    use crate::model::variant::Variant;

    fn names(count: usize) -> Vec<String> {
        (0..count).map(|i| format!("player{i}")).collect()
    }

    #[test]
    fn rejects_bad_player_counts() {
        for count in [0, 2, 5] {
            let err = Game::initialize(names(count), None, Variant::Standard, 1, &mut NullObserver)
                .unwrap_err();
            assert_eq!(err, GameError::InvalidPlayerCount(count));
        }
    }

    #[test]
    fn three_players_set_aside_two_trophies() {
        let game =
            Game::initialize(names(3), None, Variant::Standard, 5, &mut NullObserver).unwrap();
        assert_eq!(game.trophies().len(), 2);
        assert_eq!(game.stack().len(), 15);
        assert_eq!(game.phase(), GamePhase::InProgress);
    }

    #[test]
    fn four_players_with_magic_extension() {
        let game = Game::initialize(
            names(4),
            Some(Extension::Magic),
            Variant::Standard,
            5,
            &mut NullObserver,
        )
        .unwrap();
        assert_eq!(game.trophies().len(), 1);
        assert_eq!(game.stack().len(), 17 + 4 - 1);
        assert_eq!(game.calculator().rules().len(), 6);
    }

    #[test]
    fn first_round_follows_expected_card_flow() {
        let mut game =
            Game::initialize(names(3), None, Variant::Standard, 21, &mut NullObserver).unwrap();
        assert!(game.execute_next_round(&mut FirstChoice, &mut NullObserver).unwrap());
        assert_eq!(game.round_number(), 1);
        assert_eq!(game.stack().len(), 9);
        assert_eq!(game.residue().len(), 3);
        assert!(game.players().iter().all(|p| p.jest().len() == 1));
    }

    #[test]
    fn finished_game_refuses_more_rounds() {
        let mut game =
            Game::initialize(names(4), None, Variant::Standard, 2, &mut NullObserver).unwrap();
        let outcome = game
            .play_to_completion(&mut FirstChoice, &mut NullObserver)
            .unwrap();
        assert!(game.is_finished());
        assert_eq!(outcome.rounds_played, 3);
        assert!(!game.execute_next_round(&mut FirstChoice, &mut NullObserver).unwrap());
        assert_eq!(game.outcome(), Some(&outcome));
        assert_eq!(
            game.play_to_completion(&mut FirstChoice, &mut NullObserver),
            Err(GameError::AlreadyFinished)
        );
    }

    #[test]
    fn quick_variant_stops_at_round_cap() {
        let variant = Variant::Custom {
            deal_count: 2,
            trophies: None,
            max_rounds: Some(2),
            black_pair_bonus: 2,
        };
        let mut game = Game::initialize(names(3), None, variant, 8, &mut NullObserver).unwrap();
        let outcome = game
            .play_to_completion(&mut FirstChoice, &mut NullObserver)
            .unwrap();
        assert_eq!(outcome.rounds_played, 2);
    }

    #[test]
    fn finale_emits_events_in_order() {
        let mut log: Vec<GameEvent> = Vec::new();
        let mut game =
            Game::initialize(names(3), None, Variant::Standard, 13, &mut log).unwrap();
        game.play_to_completion(&mut FirstChoice, &mut log).unwrap();

        let kinds: Vec<&str> = log.iter().map(GameEvent::kind).collect();
        assert_eq!(kinds.first(), Some(&"initialized"));
        assert_eq!(
            &kinds[kinds.len() - 8..],
            &[
                "round_ended",
                "residue_collected",
                "collections_revealed",
                "base_scores",
                "trophy_awarded",
                "trophy_awarded",
                "final_scores",
                "game_ended",
            ]
        );
        let taken = kinds.iter().filter(|kind| **kind == "card_taken").count();
        assert_eq!(taken, 3 * 4);
    }
}

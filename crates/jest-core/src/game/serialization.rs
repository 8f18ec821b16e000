use super::game_state::{Game, GameParts, GamePhase};
use crate::error::SnapshotError;
use crate::model::card::Card;
use crate::model::deck::DrawStack;
use crate::model::extension::Extension;
use crate::model::player::Player;
use crate::model::trophy::Trophy;
use crate::model::variant::Variant;
use serde::{Deserialize, Serialize};

/// Flat, between-rounds picture of a game.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GameSnapshot {
    pub seed: u64,
    pub round_number: u32,
    pub variant: Variant,
    #[serde(default)]
    pub extension: Option<Extension>,
    pub phase: GamePhase,
    pub players: Vec<Player>,
    pub stack: Vec<Card>,
    pub trophies: Vec<Trophy>,
    #[serde(default)]
    pub residue: Vec<Card>,
}

impl GameSnapshot {
    pub fn capture(game: &Game) -> Self {
        GameSnapshot {
            seed: game.seed(),
            round_number: game.round_number(),
            variant: game.variant(),
            extension: game.extension(),
            phase: game.phase(),
            players: game.players().to_vec(),
            stack: game.stack().cards().to_vec(),
            trophies: game.trophies().to_vec(),
            residue: game.residue().to_vec(),
        }
    }

    pub fn restore(self) -> Result<Game, SnapshotError> {
        for (position, player) in self.players.iter().enumerate() {
            if player.id().index() != position {
                return Err(SnapshotError::SeatMismatch {
                    position,
                    found: player.id(),
                });
            }
        }
        let game = Game::resume(GameParts {
            players: self.players,
            stack: DrawStack::from_cards(self.stack),
            trophies: self.trophies,
            residue: self.residue,
            round_number: self.round_number,
            variant: self.variant,
            extension: self.extension,
            phase: self.phase,
            seed: self.seed,
        })?;
        Ok(game)
    }

    pub fn to_json(game: &Game) -> serde_json::Result<String> {
        let snapshot = Self::capture(game);
        serde_json::to_string_pretty(&snapshot)
    }

    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(json)?)
    }
}

use crate::model::jest::Jest;
use core::fmt;
use serde::{Deserialize, Serialize};

pub const MIN_PLAYERS: usize = 3;
pub const MAX_PLAYERS: usize = 4;

/// Seat index in player order; displayed 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(u8);

impl PlayerId {
    pub const fn new(index: u8) -> Self {
        Self(index)
    }

    pub const fn from_index(index: usize) -> Option<Self> {
        if index < MAX_PLAYERS {
            Some(Self(index as u8))
        } else {
            None
        }
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }

    pub fn all(count: usize) -> impl Iterator<Item = PlayerId> {
        (0..count.min(MAX_PLAYERS)).map(|index| PlayerId(index as u8))
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.0 + 1)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    id: PlayerId,
    name: String,
    jest: Jest,
}

impl Player {
    pub fn new(id: PlayerId, name: impl Into<String>) -> Self {
        Self::with_jest(id, name, Jest::new())
    }

    pub fn with_jest(id: PlayerId, name: impl Into<String>, jest: Jest) -> Self {
        Self {
            id,
            name: name.into(),
            jest,
        }
    }

    pub fn id(&self) -> PlayerId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn jest(&self) -> &Jest {
        &self.jest
    }

    pub fn jest_mut(&mut self) -> &mut Jest {
        &mut self.jest
    }
}

#[cfg(test)]
mod tests {
    use super::{Player, PlayerId};

    #[test]
    fn display_is_one_based() {
        assert_eq!(PlayerId::new(0).to_string(), "P1");
        assert_eq!(PlayerId::new(3).to_string(), "P4");
    }

    #[test]
    fn index_roundtrip() {
        for (i, id) in PlayerId::all(4).enumerate() {
            assert_eq!(PlayerId::from_index(i), Some(id));
            assert_eq!(id.index(), i);
        }
        assert_eq!(PlayerId::from_index(4), None);
    }

    #[test]
    fn new_player_starts_with_empty_jest() {
        let player = Player::new(PlayerId::new(1), "Ada");
        assert_eq!(player.name(), "Ada");
        assert!(player.jest().is_empty());
    }
}

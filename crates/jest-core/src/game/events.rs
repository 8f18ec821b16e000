use crate::game::ranking::Standing;
use crate::model::card::Card;
use crate::model::offer::{Face, OfferView};
use crate::model::player::PlayerId;
use crate::model::trophy::Trophy;
use crate::score::ScoreBreakdown;
use serde::Serialize;
use tracing::{Level, event};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerCards {
    pub player: PlayerId,
    pub cards: Vec<Card>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PlayerCard {
    pub player: PlayerId,
    pub card: Card,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerScore {
    pub player: PlayerId,
    pub breakdown: ScoreBreakdown,
}

/// State changes published by the engine, in the order they happen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GameEvent {
    Initialized {
        players: Vec<String>,
        trophy_count: usize,
        trophies: Vec<Trophy>,
        stack_size: usize,
    },
    RoundStarted {
        round: u32,
    },
    CardsDistributed {
        round: u32,
        hands: Vec<PlayerCards>,
    },
    OffersCreated {
        round: u32,
        offers: Vec<OfferView>,
    },
    CardTaken {
        round: u32,
        player: PlayerId,
        card: Card,
        from: PlayerId,
        face: Face,
    },
    RoundEnded {
        round: u32,
    },
    ResidueCollected {
        cards: Vec<PlayerCard>,
    },
    CollectionsRevealed {
        jests: Vec<PlayerCards>,
    },
    BaseScores {
        scores: Vec<PlayerScore>,
    },
    TrophyAwarded {
        trophy: Trophy,
        winner: Option<PlayerId>,
    },
    FinalScores {
        scores: Vec<PlayerScore>,
    },
    GameEnded {
        standings: Vec<Standing>,
    },
}

impl GameEvent {
    pub const fn kind(&self) -> &'static str {
        match self {
            GameEvent::Initialized { .. } => "initialized",
            GameEvent::RoundStarted { .. } => "round_started",
            GameEvent::CardsDistributed { .. } => "cards_distributed",
            GameEvent::OffersCreated { .. } => "offers_created",
            GameEvent::CardTaken { .. } => "card_taken",
            GameEvent::RoundEnded { .. } => "round_ended",
            GameEvent::ResidueCollected { .. } => "residue_collected",
            GameEvent::CollectionsRevealed { .. } => "collections_revealed",
            GameEvent::BaseScores { .. } => "base_scores",
            GameEvent::TrophyAwarded { .. } => "trophy_awarded",
            GameEvent::FinalScores { .. } => "final_scores",
            GameEvent::GameEnded { .. } => "game_ended",
        }
    }
}

/// Fire-and-forget sink for engine notifications.
pub trait GameObserver {
    fn on_event(&mut self, event: &GameEvent);
}

impl GameObserver for Vec<GameEvent> {
    fn on_event(&mut self, event: &GameEvent) {
        self.push(event.clone());
    }
}

impl<O: GameObserver + ?Sized> GameObserver for &mut O {
    fn on_event(&mut self, event: &GameEvent) {
        (**self).on_event(event);
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NullObserver;

impl GameObserver for NullObserver {
    fn on_event(&mut self, _event: &GameEvent) {}
}

/// Forwards every event to `tracing` as JSON under the `jest_core::events` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl GameObserver for TracingObserver {
    fn on_event(&mut self, game_event: &GameEvent) {
        if !tracing::enabled!(target: "jest_core::events", Level::DEBUG) {
            return;
        }
        let payload = serde_json::to_string(game_event).unwrap_or_default();
        event!(
            target: "jest_core::events",
            Level::DEBUG,
            kind = game_event.kind(),
            payload = %payload,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::{GameEvent, GameObserver};
    use crate::model::card::Card;
    use crate::model::offer::Face;
    use crate::model::player::PlayerId;

    #[test]
    fn vec_observer_records_in_order() {
        let mut log: Vec<GameEvent> = Vec::new();
        log.on_event(&GameEvent::RoundStarted { round: 1 });
        log.on_event(&GameEvent::RoundEnded { round: 1 });
        let kinds: Vec<&str> = log.iter().map(GameEvent::kind).collect();
        assert_eq!(kinds, vec!["round_started", "round_ended"]);
    }

    #[test]
    fn events_serialize_with_a_tag() {
        let event = GameEvent::CardTaken {
            round: 2,
            player: PlayerId::new(0),
            card: Card::Joker,
            from: PlayerId::new(1),
            face: Face::Hidden,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event"], "card_taken");
        assert_eq!(json["round"], 2);
        assert_eq!(json["face"], "Hidden");
    }
}

#![deny(warnings)]
pub mod error;
pub mod game;
pub mod model;
pub mod score;

pub use error::{ContractViolation, DeckError, GameError, OfferError, RoundError, SnapshotError};
pub use game::choices::{ChoiceProvider, DecisionContext, FirstChoice};
pub use game::events::{GameEvent, GameObserver, NullObserver, TracingObserver};
pub use game::game_state::{Game, GameOutcome, GamePhase};
pub use model::card::Card;
pub use model::player::PlayerId;

pub struct AppInfo;

impl AppInfo {
    pub const fn name() -> &'static str {
        "jest"
    }

    pub const fn codename() -> &'static str {
        "Trick Collector"
    }

    pub const fn version() -> &'static str {
        env!("CARGO_PKG_VERSION")
    }
}

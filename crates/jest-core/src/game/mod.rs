pub mod choices;
pub mod events;
pub mod game_state;
pub mod ranking;
pub mod serialization;

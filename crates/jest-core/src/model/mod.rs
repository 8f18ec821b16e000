pub mod card;
pub mod deck;
pub mod extension;
pub mod jest;
pub mod offer;
pub mod player;
pub mod round;
pub mod suit;
pub mod trophy;
pub mod variant;

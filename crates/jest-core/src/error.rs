use crate::model::card::Card;
use crate::model::offer::CardChoice;
use crate::model::player::PlayerId;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeckError {
    #[error("cannot draw {requested} cards, only {available} remain")]
    NotEnoughCards { requested: usize, available: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OfferError {
    #[error("offer of {owner} already holds a hidden card")]
    HiddenAlreadySet { owner: PlayerId },
    #[error("{card} is not in the offer of {owner}")]
    CardNotInOffer { owner: PlayerId, card: Card },
    #[error("offer of {owner} has no hidden card left")]
    NoHiddenCard { owner: PlayerId },
}

/// A player-choice provider answered with something it was not offered.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContractViolation {
    #[error("{player} hid {card}, which is not in their hand")]
    HiddenCardNotInHand { player: PlayerId, card: Card },
    #[error("{player} targeted the offer of {target}, which was not eligible")]
    OfferNotEligible { player: PlayerId, target: PlayerId },
    #[error("{player} picked {choice:?} from the offer of {target}, which it does not hold")]
    CardNotInOffer {
        player: PlayerId,
        target: PlayerId,
        choice: CardChoice,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoundError {
    #[error(transparent)]
    Deck(#[from] DeckError),
    #[error(transparent)]
    Offer(#[from] OfferError),
    #[error(transparent)]
    Contract(#[from] ContractViolation),
    #[error("round {round}: {player} has no complete offer to take from")]
    NoEligibleOffer { round: u32, player: PlayerId },
    #[error("dealt {dealt} hands for {players} players")]
    HandCountMismatch { dealt: usize, players: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("a game needs 3 or 4 players, got {0}")]
    InvalidPlayerCount(usize),
    #[error("the game is already finished")]
    AlreadyFinished,
    #[error("the game was aborted after a failed round")]
    Aborted,
    #[error(transparent)]
    Deck(#[from] DeckError),
    #[error(transparent)]
    Round(#[from] RoundError),
}

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("snapshot seat {position} holds {found}")]
    SeatMismatch { position: usize, found: PlayerId },
    #[error(transparent)]
    Game(#[from] GameError),
}

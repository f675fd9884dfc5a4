use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("Deck is empty; reshuffle before dealing")]
    EmptyDeck,
    #[error("Player total {player_total} is outside the encodable range 4..=21")]
    InvalidState { player_total: u8 },
    #[error("Dealer up-card value {value} is outside the encodable range 2..=11")]
    InvalidUpcard { value: u8 },
    #[error("No round in progress")]
    NoRoundInProgress,
    #[error("Round already complete")]
    RoundAlreadyComplete,
}

use crapstable_types::craps::{GameState, Money};
use thiserror::Error;

/// Why a table operation was rejected. A rejected operation leaves the table,
/// the player's bankroll and their bets untouched.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TableError {
    #[error("player {0} is already seated")]
    PlayerExists(String),
    #[error("player {0} not found")]
    PlayerNotFound(String),
    #[error("invalid player id or name: {0:?}")]
    InvalidPlayerId(String),
    #[error("bankroll must not be negative (got {0})")]
    InvalidBankroll(Money),
    #[error("unknown bet type: {0}")]
    UnknownBetType(String),
    #[error("bet amount must be positive (got {0})")]
    NonPositiveAmount(Money),
    #[error("{amount} is below the {minimum} minimum")]
    BelowMinimum { amount: Money, minimum: Money },
    #[error("{amount} is above the {maximum} maximum")]
    AboveMaximum { amount: Money, maximum: Money },
    #[error("insufficient funds: have {available}, need {required}")]
    InsufficientFunds { available: Money, required: Money },
    #[error("{bet_type} cannot be placed during {state}")]
    WrongPhase { bet_type: String, state: GameState },
    #[error("{bet_type} does not accept numbers {numbers:?}")]
    InvalidNumbers { bet_type: String, numbers: Vec<u8> },
    #[error("{bet_type} needs a {base} bet to back")]
    MissingBaseBet { bet_type: String, base: String },
    #[error("odds of {requested} exceed the {allowed} allowed")]
    OddsLimitExceeded { requested: Money, allowed: Money },
    #[error("{0} is only taken before the shooter's first roll")]
    BonusClosed(String),
    #[error("player {0} has reached their session limit")]
    SessionLimitReached(String),
    #[error("player {player} already has {limit} bets on the table")]
    TooManyBets { player: String, limit: usize },
    #[error("player {player} has no {bet_type} bet")]
    BetNotFound { player: String, bet_type: String },
    #[error("{0} is a contract bet and cannot be taken down")]
    ContractBet(String),
    #[error("{0} cannot be turned off")]
    CannotTurnOff(String),
}

//! Error types for rejected commands.
//!
//! Every variant is an *invalid-command* condition: the command is refused
//! and the session is left exactly as it was. Running out of money during
//! a landing or card flow is not an error; those paths report the shortfall
//! as data (a debt entry or a failed outcome) instead.

use thiserror::Error;

use super::player::PlayerId;
use crate::board::{CellId, DreamId};
use crate::cards::CardCategory;
use crate::finance::Envelope;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GameError>;

/// A rejected command.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("player {0} not found")]
    PlayerNotFound(PlayerId),

    #[error("it is not {player}'s turn")]
    NotYourTurn { player: PlayerId, current: Option<PlayerId> },

    #[error("game already in progress")]
    AlreadyStarted,

    #[error("game is not in progress")]
    NotInProgress,

    #[error("game has finished; reset the session first")]
    GameFinished,

    #[error("game has no players")]
    NoPlayers,

    #[error("session is full ({0} players)")]
    SessionFull(usize),

    #[error("cell {0} does not exist")]
    UnknownCell(CellId),

    #[error("cell {0} is not a fork")]
    NotAFork(CellId),

    #[error("{0} has already selected a dream")]
    DreamAlreadySelected(PlayerId),

    #[error("dream {0} is not in the catalogue")]
    UnknownDream(DreamId),

    #[error("a move must cover at least one step")]
    InvalidSteps,

    #[error("no {0} card draw is pending")]
    NoPendingDraw(CardCategory),

    #[error("the {0} deck has no cards")]
    EmptyDeck(CardCategory),

    #[error("nothing to resolve: no pending {0}")]
    NothingPending(&'static str),

    #[error("a pending {0} must be resolved first")]
    DecisionPending(&'static str),

    #[error("unknown choice option '{0}'")]
    UnknownOption(String),

    #[error("cell {0} was not passed on the last move or was already collected")]
    NotCollectible(CellId),

    #[error("insufficient funds in {envelope} envelope: need {needed}, have {available}")]
    InsufficientFunds {
        envelope: Envelope,
        needed: u64,
        available: u64,
    },

    #[error("invalid board: {0}")]
    InvalidBoard(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to parse {what}: {message}")]
    Parse { what: &'static str, message: String },

    #[error("failed to encode {what}: {message}")]
    Encode { what: &'static str, message: String },
}

impl GameError {
    pub(crate) fn parse(what: &'static str, err: impl std::fmt::Display) -> Self {
        Self::Parse {
            what,
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = GameError::NotYourTurn {
            player: PlayerId::new(2),
            current: Some(PlayerId::new(1)),
        };
        assert_eq!(err.to_string(), "it is not Player 2's turn");

        let err = GameError::InsufficientFunds {
            envelope: Envelope::Charity,
            needed: 50,
            available: 10,
        };
        assert_eq!(
            err.to_string(),
            "insufficient funds in charity envelope: need 50, have 10"
        );
    }

    #[test]
    fn test_parse_helper() {
        let err = GameError::parse("cards", "expected value at line 1");
        assert!(matches!(err, GameError::Parse { what: "cards", .. }));
    }
}

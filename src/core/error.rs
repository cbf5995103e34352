//! Error type for construction and configuration failures.
//!
//! Gameplay never fails loudly: a rejected click is reported as
//! [`FlipOutcome::Rejected`](crate::game::FlipOutcome::Rejected) and leaves
//! the board untouched. `GameError` covers the cases where a caller hands the
//! engine something it cannot play with.

use std::fmt;

use super::card::{CardId, FaceValue};

#[derive(Debug)]
pub enum GameError {
    /// No cards were supplied.
    EmptyDeck,
    /// A face value appears an odd number of times, so the board can never be cleared.
    UnpairedCard(FaceValue),
    /// Two cards share the same identifier.
    DuplicateCardId(CardId),
    /// A configuration value is out of range.
    InvalidConfig(String),
    /// `start_game` was called while the previous start is still shuffling.
    AlreadyStarting,
    Io(std::io::Error),
    Json(serde_json::Error),
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::EmptyDeck => write!(f, "no cards to play with"),
            GameError::UnpairedCard(face) => write!(f, "card face '{face}' has no partner"),
            GameError::DuplicateCardId(id) => write!(f, "duplicate card id {id}"),
            GameError::InvalidConfig(msg) => write!(f, "invalid config: {msg}"),
            GameError::AlreadyStarting => write!(f, "a game is already starting"),
            GameError::Io(e) => write!(f, "I/O error: {e}"),
            GameError::Json(e) => write!(f, "JSON error: {e}"),
        }
    }
}

impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GameError::Io(e) => Some(e),
            GameError::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for GameError {
    fn from(e: std::io::Error) -> Self {
        GameError::Io(e)
    }
}

impl From<serde_json::Error> for GameError {
    fn from(e: serde_json::Error) -> Self {
        GameError::Json(e)
    }
}

pub type Result<T> = std::result::Result<T, GameError>;

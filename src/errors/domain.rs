//! Domain-level error type used across the engine.
//!
//! Every rejected action surfaces as a `GameError`; the service layer
//! converts it into an `invalidAction` notification for the acting
//! player and leaves room state untouched. Nothing in here is fatal.

use thiserror::Error;

use crate::errors::error_code::ErrorCode;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Room not found: {code}")]
    RoomNotFound { code: String },
    #[error("Room {code} already has four players")]
    RoomFull { code: String },
    #[error("Player id already taken: {player_id}")]
    PlayerIdTaken { player_id: String },
    #[error("Player {player_id} is not in this room")]
    NotInRoom { player_id: String },
    #[error("Team {team} already has two players")]
    TeamFull { team: char },
    #[error("Room not ready to start: {detail}")]
    RoomNotReady { detail: String },
    #[error("Wrong phase: expected {expected}, room is in {found}")]
    WrongPhase {
        expected: &'static str,
        found: &'static str,
    },
    #[error("Not your turn: {detail}")]
    NotYourTurn { detail: String },
    #[error("Illegal card: {detail}")]
    IllegalCard { detail: String },
    #[error("Invalid trump suit: {detail}")]
    InvalidSuit { detail: String },
    #[error("Parse card: {detail}")]
    ParseCard { detail: String },
    #[error("Invariant violated: {detail}")]
    Invariant { detail: String },
}

impl GameError {
    /// The wire reason code carried by `invalidAction` for this error.
    pub const fn code(&self) -> ErrorCode {
        match self {
            GameError::RoomNotFound { .. } => ErrorCode::RoomNotFound,
            GameError::RoomFull { .. } => ErrorCode::RoomFull,
            GameError::PlayerIdTaken { .. } => ErrorCode::PlayerIdTaken,
            GameError::NotInRoom { .. } => ErrorCode::NotInRoom,
            GameError::TeamFull { .. } => ErrorCode::TeamFull,
            GameError::RoomNotReady { .. } => ErrorCode::RoomNotReady,
            GameError::WrongPhase { .. } => ErrorCode::WrongPhase,
            GameError::NotYourTurn { .. } => ErrorCode::NotYourTurn,
            GameError::IllegalCard { .. } => ErrorCode::IllegalCard,
            GameError::InvalidSuit { .. } => ErrorCode::InvalidSuit,
            GameError::ParseCard { .. } => ErrorCode::ParseCard,
            GameError::Invariant { .. } => ErrorCode::Internal,
        }
    }

    pub fn room_not_found(code: impl Into<String>) -> Self {
        Self::RoomNotFound { code: code.into() }
    }

    pub fn room_full(code: impl Into<String>) -> Self {
        Self::RoomFull { code: code.into() }
    }

    pub fn player_id_taken(player_id: impl Into<String>) -> Self {
        Self::PlayerIdTaken {
            player_id: player_id.into(),
        }
    }

    pub fn not_in_room(player_id: impl Into<String>) -> Self {
        Self::NotInRoom {
            player_id: player_id.into(),
        }
    }

    pub fn room_not_ready(detail: impl Into<String>) -> Self {
        Self::RoomNotReady {
            detail: detail.into(),
        }
    }

    pub fn not_your_turn(detail: impl Into<String>) -> Self {
        Self::NotYourTurn {
            detail: detail.into(),
        }
    }

    pub fn card_not_in_hand(token: impl Into<String>) -> Self {
        Self::IllegalCard {
            detail: format!("card {} is not in your hand", token.into()),
        }
    }

    pub fn must_follow_suit(detail: impl Into<String>) -> Self {
        Self::IllegalCard {
            detail: detail.into(),
        }
    }

    pub fn invalid_suit(detail: impl Into<String>) -> Self {
        Self::InvalidSuit {
            detail: detail.into(),
        }
    }

    pub fn parse_card(detail: impl Into<String>) -> Self {
        Self::ParseCard {
            detail: detail.into(),
        }
    }

    pub fn invariant(detail: impl Into<String>) -> Self {
        Self::Invariant {
            detail: detail.into(),
        }
    }
}

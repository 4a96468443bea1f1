//! Error codes reported to clients.
//!
//! This module defines all reason codes carried by `invalidAction`
//! notifications. Add new codes here; never pass ad-hoc strings as
//! error codes.
//!
//! All error codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings
//! that appear on the wire.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Centralized reason codes for rejected actions.
///
/// Each variant maps to a canonical SCREAMING_SNAKE_CASE string; the
/// serde representation and `as_str` agree by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Room membership
    /// Action references an unknown room code
    RoomNotFound,
    /// Join rejected: four players already present
    RoomFull,
    /// Join rejected: player id already in use in this room
    PlayerIdTaken,
    /// Actor is not a member of the addressed room
    NotInRoom,

    // Lobby
    /// Chosen team roster already has two players
    TeamFull,
    /// Start rejected: fewer than four players or an unfilled team
    RoomNotReady,

    // Play validation
    /// Action invalid for the room's current phase
    WrongPhase,
    /// Actor is not the expected actor for this action
    NotYourTurn,
    /// Card absent from hand or violates the follow-suit rule
    IllegalCard,
    /// Chosen trump suit not among the chooser's dealt cards
    InvalidSuit,

    // Payload validation
    /// Malformed card or suit token in a payload
    ParseCard,

    /// Engine invariant violated; the action was refused
    Internal,
}

impl ErrorCode {
    /// Returns the canonical SCREAMING_SNAKE_CASE string for this code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::RoomNotFound => "ROOM_NOT_FOUND",
            Self::RoomFull => "ROOM_FULL",
            Self::PlayerIdTaken => "PLAYER_ID_TAKEN",
            Self::NotInRoom => "NOT_IN_ROOM",
            Self::TeamFull => "TEAM_FULL",
            Self::RoomNotReady => "ROOM_NOT_READY",
            Self::WrongPhase => "WRONG_PHASE",
            Self::NotYourTurn => "NOT_YOUR_TURN",
            Self::IllegalCard => "ILLEGAL_CARD",
            Self::InvalidSuit => "INVALID_SUIT",
            Self::ParseCard => "PARSE_CARD",
            Self::Internal => "INTERNAL",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

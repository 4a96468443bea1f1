//! Wire protocol: the actions a transport feeds into the engine and the
//! events the engine answers with.
//!
//! Payload `player_id` fields are action parameters (an id being
//! registered, or a player being chosen); the ACTING player is
//! authenticated by the transport and passed to the engine alongside
//! the action, never trusted from the payload.

use serde::{Deserialize, Serialize};

use crate::domain::cards_types::{Card, Suit};
use crate::domain::snapshot::{PlayerPublic, RoomSnapshot, TeamRosters};
use crate::domain::state::{GameWinner, TeamId, TrickTally};
use crate::errors::error_code::ErrorCode;

/// Client-to-engine actions.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Action {
    #[serde(rename_all = "camelCase")]
    CreateRoom {
        display_name: String,
        player_id: String,
    },
    #[serde(rename_all = "camelCase")]
    JoinRoom {
        room_code: String,
        display_name: String,
        player_id: String,
    },
    #[serde(rename_all = "camelCase")]
    ChooseTeam { room_code: String, team: TeamId },
    #[serde(rename_all = "camelCase")]
    StartGame { room_code: String },
    /// `player_id` is the chosen dealer, a member of the dealer team.
    #[serde(rename_all = "camelCase")]
    ChooseDealerPlayer {
        room_code: String,
        player_id: String,
    },
    #[serde(rename_all = "camelCase")]
    ChooseTrump { room_code: String, suit: Suit },
    #[serde(rename_all = "camelCase")]
    PlayCard { room_code: String, card: Card },
    #[serde(rename_all = "camelCase")]
    GetGameState { room_code: String },
    Disconnect,
}

impl Action {
    /// Room code carried by the action, if it targets one.
    pub fn room_code(&self) -> Option<&str> {
        match self {
            Action::JoinRoom { room_code, .. }
            | Action::ChooseTeam { room_code, .. }
            | Action::StartGame { room_code }
            | Action::ChooseDealerPlayer { room_code, .. }
            | Action::ChooseTrump { room_code, .. }
            | Action::PlayCard { room_code, .. }
            | Action::GetGameState { room_code } => Some(room_code),
            Action::CreateRoom { .. } | Action::Disconnect => None,
        }
    }
}

/// Engine-to-client events.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Event {
    #[serde(rename_all = "camelCase")]
    RoomCreated { room_code: String },
    #[serde(rename_all = "camelCase")]
    Joined {
        room_code: String,
        players: Vec<PlayerPublic>,
    },
    #[serde(rename_all = "camelCase")]
    PlayerJoined {
        player_id: String,
        display_name: String,
    },
    TeamsUpdated { teams: TeamRosters },
    #[serde(rename_all = "camelCase")]
    PromptChooseDealer { dealer_team: TeamId },
    PromptChooseTrump,
    DealtFirstHalf { cards: Vec<Card> },
    DealtSecondHalf { cards: Vec<Card> },
    FullHand { cards: Vec<Card> },
    #[serde(rename_all = "camelCase")]
    CardPlayed {
        player_id: String,
        card: Card,
        next_turn: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    TrickResolved {
        winner: String,
        winning_team: TeamId,
        tricks_won: TrickTally,
    },
    #[serde(rename_all = "camelCase")]
    PlayerLeft {
        player_id: String,
        display_name: String,
    },
    GameState(RoomSnapshot),
    #[serde(rename_all = "camelCase")]
    GameOver {
        winner: GameWinner,
        tricks_won: TrickTally,
    },
    InvalidAction { code: ErrorCode, message: String },
}

impl Event {
    /// Wire tag of this event, for logging.
    pub const fn name(&self) -> &'static str {
        match self {
            Event::RoomCreated { .. } => "roomCreated",
            Event::Joined { .. } => "joined",
            Event::PlayerJoined { .. } => "playerJoined",
            Event::TeamsUpdated { .. } => "teamsUpdated",
            Event::PromptChooseDealer { .. } => "promptChooseDealer",
            Event::PromptChooseTrump => "promptChooseTrump",
            Event::DealtFirstHalf { .. } => "dealtFirstHalf",
            Event::DealtSecondHalf { .. } => "dealtSecondHalf",
            Event::FullHand { .. } => "fullHand",
            Event::CardPlayed { .. } => "cardPlayed",
            Event::TrickResolved { .. } => "trickResolved",
            Event::PlayerLeft { .. } => "playerLeft",
            Event::GameState(_) => "gameState",
            Event::GameOver { .. } => "gameOver",
            Event::InvalidAction { .. } => "invalidAction",
        }
    }
}

/// Delivery scope for one event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Target {
    /// One player, addressed by id.
    Player(String),
    /// Every player in the room.
    Room,
}

/// An event together with where it should go.
#[derive(Clone, Debug, PartialEq)]
pub struct Outbound {
    pub room: String,
    pub target: Target,
    pub event: Event,
}

impl Outbound {
    pub fn to_player(room: impl Into<String>, player_id: impl Into<String>, event: Event) -> Self {
        Self {
            room: room.into(),
            target: Target::Player(player_id.into()),
            event,
        }
    }

    pub fn to_room(room: impl Into<String>, event: Event) -> Self {
        Self {
            room: room.into(),
            target: Target::Room,
            event,
        }
    }
}

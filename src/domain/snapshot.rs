//! Public snapshot API for observing room state without exposing internals.
//!
//! Snapshots carry everything a client needs to render the room. Hands
//! other than the viewer's own are never included.

use serde::{Deserialize, Serialize};

use crate::domain::cards_types::{Card, Suit};
use crate::domain::state::{GameWinner, Phase, RoomState, Seat, TeamId, TrickTally};

/// Public info about one seated player.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerPublic {
    pub id: String,
    pub name: String,
    pub team: Option<TeamId>,
}

/// Team rosters by player id, in join order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TeamRosters {
    #[serde(rename = "A")]
    pub a: Vec<String>,
    #[serde(rename = "B")]
    pub b: Vec<String>,
}

/// One play inside a trick, in wire form.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrickPlay {
    pub player_id: String,
    pub card: Card,
}

/// Room-level header present in all snapshots.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomHeader {
    pub room_code: String,
    pub players: Vec<PlayerPublic>,
    pub teams: TeamRosters,
}

/// Top-level snapshot combining header, phase data, and the viewer's hand.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomSnapshot {
    pub room: RoomHeader,
    pub phase: PhaseSnapshot,
    /// The requesting player's own hand, sorted for display.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hand: Option<Vec<Card>>,
}

/// Adjacently tagged union of phase-specific views.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "phase", content = "data", rename_all = "camelCase")]
pub enum PhaseSnapshot {
    TeamSelection,
    ChoosingDealer(ChoosingDealerSnapshot),
    ChoosingTrump(ChoosingTrumpSnapshot),
    Playing(PlayingSnapshot),
    GameOver(GameOverSnapshot),
}

/// Waiting for the drawn dealer team to pick who deals.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChoosingDealerSnapshot {
    pub dealer_team: TeamId,
}

/// First half dealt; waiting on the trump call (and, once `trump` is
/// set, on the scheduled second-half deal).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChoosingTrumpSnapshot {
    pub dealer_team: TeamId,
    pub dealer: Option<String>,
    pub trump_chooser: Option<String>,
    pub trump: Option<Suit>,
}

/// Trick-playing phase view.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayingSnapshot {
    pub dealer_team: TeamId,
    pub dealer: Option<String>,
    pub trump: Option<Suit>,
    pub turn: Option<String>,
    pub trick_leader: Option<String>,
    /// Plays of the trick in progress, leader first.
    pub current_trick: Vec<TrickPlay>,
    /// Last completed trick (4 cards) for display purposes.
    pub last_trick: Option<Vec<TrickPlay>>,
    pub tricks_won: TrickTally,
    pub rounds_played: u8,
}

/// Terminal view.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameOverSnapshot {
    pub winner: GameWinner,
    pub tricks_won: TrickTally,
}

/// Entry point: produce the room view for one observer. `viewer` is the
/// requesting player's id; when seated, their own hand is attached.
/// Never panics; produces safe defaults for inconsistent states.
pub fn snapshot_for(state: &RoomState, viewer: Option<&str>) -> RoomSnapshot {
    let room = build_header(state);

    let phase = match state.phase {
        Phase::TeamSelection => PhaseSnapshot::TeamSelection,
        Phase::ChoosingDealer => snapshot_choosing_dealer(state),
        Phase::ChoosingTrump => snapshot_choosing_trump(state),
        Phase::Playing => snapshot_playing(state),
        Phase::GameOver { winner } => PhaseSnapshot::GameOver(GameOverSnapshot {
            winner,
            tricks_won: state.tricks_won,
        }),
    };

    let hand = viewer
        .and_then(|id| state.seat_of(id))
        .map(|seat| sorted_hand(state, seat));

    RoomSnapshot { room, phase, hand }
}

/// Public roster of a room, in join order.
pub fn players_public(state: &RoomState) -> Vec<PlayerPublic> {
    state
        .players
        .iter()
        .map(|p| PlayerPublic {
            id: p.id.clone(),
            name: p.display_name.clone(),
            team: p.team,
        })
        .collect()
}

/// Current team rosters by player id.
pub fn team_rosters(state: &RoomState) -> TeamRosters {
    let mut teams = TeamRosters::default();
    for p in &state.players {
        match p.team {
            Some(TeamId::A) => teams.a.push(p.id.clone()),
            Some(TeamId::B) => teams.b.push(p.id.clone()),
            None => {}
        }
    }
    teams
}

fn build_header(state: &RoomState) -> RoomHeader {
    RoomHeader {
        room_code: state.code.clone(),
        players: players_public(state),
        teams: team_rosters(state),
    }
}

fn snapshot_choosing_dealer(state: &RoomState) -> PhaseSnapshot {
    PhaseSnapshot::ChoosingDealer(ChoosingDealerSnapshot {
        dealer_team: state.dealer_team.unwrap_or(TeamId::A),
    })
}

fn snapshot_choosing_trump(state: &RoomState) -> PhaseSnapshot {
    PhaseSnapshot::ChoosingTrump(ChoosingTrumpSnapshot {
        dealer_team: state.dealer_team.unwrap_or(TeamId::A),
        dealer: id_at(state, state.dealer),
        trump_chooser: id_at(state, state.trump_chooser),
        trump: state.trump,
    })
}

fn snapshot_playing(state: &RoomState) -> PhaseSnapshot {
    PhaseSnapshot::Playing(PlayingSnapshot {
        dealer_team: state.dealer_team.unwrap_or(TeamId::A),
        dealer: id_at(state, state.dealer),
        trump: state.trump,
        turn: id_at(state, state.turn),
        trick_leader: id_at(state, state.trick_leader),
        current_trick: wire_trick(state, &state.trick_plays),
        last_trick: state.last_trick.as_ref().map(|t| wire_trick(state, t)),
        tricks_won: state.tricks_won,
        rounds_played: state.rounds_played,
    })
}

fn id_at(state: &RoomState, seat: Option<Seat>) -> Option<String> {
    seat.and_then(|s| state.players.get(s)).map(|p| p.id.clone())
}

fn wire_trick(state: &RoomState, plays: &[(Seat, Card)]) -> Vec<TrickPlay> {
    plays
        .iter()
        .map(|&(seat, card)| TrickPlay {
            player_id: state
                .players
                .get(seat)
                .map(|p| p.id.clone())
                .unwrap_or_default(),
            card,
        })
        .collect()
}

fn sorted_hand(state: &RoomState, seat: Seat) -> Vec<Card> {
    let mut hand = state.hands[seat].clone();
    hand.sort();
    hand
}

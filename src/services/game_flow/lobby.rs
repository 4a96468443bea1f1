use tracing::{debug, info};

use super::GameFlowService;
use crate::domain::rules::{PLAYERS, TEAM_SIZE};
use crate::domain::snapshot::{players_public, team_rosters, RoomSnapshot};
use crate::domain::snapshot_for;
use crate::domain::state::{Phase, Player, TeamId};
use crate::errors::domain::GameError;
use crate::protocol::Event;

impl GameFlowService {
    /// Open a room and seat `player_id` as its first player.
    pub fn create_room(&self, player_id: &str, display_name: &str) -> Result<String, GameError> {
        let room = {
            let mut rng = self.inner.rng.lock();
            self.inner.registry.create(&mut *rng)
        };

        let mut state = room.state.lock();
        state.players.push(Player {
            id: player_id.to_string(),
            display_name: display_name.to_string(),
            team: None,
        });
        state.touch();
        debug!(room = %state.code, player = %player_id, "Creator seated");

        self.send_to_player(
            &state,
            player_id,
            Event::RoomCreated {
                room_code: state.code.clone(),
            },
        );
        self.broadcast_state(&state);
        Ok(state.code.clone())
    }

    /// Seat `player_id` in an existing room.
    ///
    /// Rejections, in order: unknown code, room already full, id already
    /// seated. Joining is not phase-gated; a room below four players is
    /// never mid-hand.
    pub fn join_room(
        &self,
        player_id: &str,
        display_name: &str,
        room_code: &str,
    ) -> Result<(), GameError> {
        let room = self.inner.registry.get(room_code)?;
        let mut state = room.state.lock();

        if state.is_full() {
            return Err(GameError::room_full(&state.code));
        }
        if state.seat_of(player_id).is_some() {
            return Err(GameError::player_id_taken(player_id));
        }

        state.players.push(Player {
            id: player_id.to_string(),
            display_name: display_name.to_string(),
            team: None,
        });
        state.touch();
        info!(room = %state.code, player = %player_id, "Player joined");

        self.send_to_player(
            &state,
            player_id,
            Event::Joined {
                room_code: state.code.clone(),
                players: players_public(&state),
            },
        );
        self.send_to_room(
            &state,
            Event::PlayerJoined {
                player_id: player_id.to_string(),
                display_name: display_name.to_string(),
            },
        );
        self.broadcast_state(&state);
        Ok(())
    }

    /// Put the acting player on `team`, moving them off their current
    /// team if needed. Once four players sit in two full teams the room
    /// advances to dealer selection on its own.
    pub fn choose_team(
        &self,
        player_id: &str,
        room_code: &str,
        team: TeamId,
    ) -> Result<(), GameError> {
        let room = self.inner.registry.get(room_code)?;
        let mut state = room.state.lock();

        if !matches!(state.phase, Phase::TeamSelection) {
            return Err(GameError::WrongPhase {
                expected: "TeamSelection",
                found: state.phase.name(),
            });
        }
        let seat = state
            .seat_of(player_id)
            .ok_or_else(|| GameError::not_in_room(player_id))?;

        let seats_taken = state
            .roster(team)
            .iter()
            .filter(|p| p.id != player_id)
            .count();
        if seats_taken >= TEAM_SIZE {
            return Err(GameError::TeamFull {
                team: team.as_char(),
            });
        }

        state.players[seat].team = Some(team);
        state.touch();
        debug!(room = %state.code, player = %player_id, team = %team.as_char(), "Team chosen");

        self.send_to_room(
            &state,
            Event::TeamsUpdated {
                teams: team_rosters(&state),
            },
        );
        if state.ready_to_start() {
            info!(room = %state.code, "Teams complete, game starting");
            self.begin_choosing_dealer(&mut state);
        } else {
            self.broadcast_state(&state);
        }
        Ok(())
    }

    /// Explicit start for clients that want a button. The same advance
    /// runs automatically from `choose_team` when the teams fill up.
    pub fn start_game(&self, player_id: &str, room_code: &str) -> Result<(), GameError> {
        let room = self.inner.registry.get(room_code)?;
        let mut state = room.state.lock();

        if !matches!(state.phase, Phase::TeamSelection) {
            return Err(GameError::WrongPhase {
                expected: "TeamSelection",
                found: state.phase.name(),
            });
        }
        if state.seat_of(player_id).is_none() {
            return Err(GameError::not_in_room(player_id));
        }
        if !state.ready_to_start() {
            let detail = if state.players.len() < PLAYERS {
                "need four players"
            } else {
                "both teams must have two players"
            };
            return Err(GameError::room_not_ready(detail));
        }

        info!(room = %state.code, player = %player_id, "Game started");
        self.begin_choosing_dealer(&mut state);
        Ok(())
    }

    /// Current snapshot, redacted to the requesting viewer. Also pushes
    /// the same snapshot to them as a `gameState` event.
    pub fn get_game_state(
        &self,
        player_id: &str,
        room_code: &str,
    ) -> Result<RoomSnapshot, GameError> {
        let room = self.inner.registry.get(room_code)?;
        let state = room.state.lock();
        let snapshot = snapshot_for(&state, Some(player_id));
        self.send_to_player(&state, player_id, Event::GameState(snapshot.clone()));
        Ok(snapshot)
    }
}

//! Game flow orchestration service - bridges pure domain logic with live
//! rooms, scheduled continuations, and outbound notifications.
//!
//! This service provides one method per player action plus a uniform
//! `apply` dispatcher that converts rejections into `invalidAction`
//! events for the acting player.

mod lobby;
mod player_actions;
mod round_lifecycle;
mod timers;

use std::sync::Arc;

use parking_lot::Mutex;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::warn;

use crate::config::EngineConfig;
use crate::domain::state::RoomState;
use crate::domain::{snapshot_for, Seat};
use crate::errors::domain::GameError;
use crate::notify::Notifier;
use crate::protocol::{Action, Event, Outbound};
use crate::registry::RoomRegistry;
use crate::utils::room_code::normalize_room_code;

/// Engine facade. Cheap to clone; clones share rooms, notifier and RNG.
///
/// Methods are synchronous and take the room lock internally. Actions
/// that schedule a continuation (`choose_trump`, `play_card`) must run
/// inside a Tokio runtime so the delayed step can be spawned.
#[derive(Clone)]
pub struct GameFlowService {
    inner: Arc<Inner>,
}

struct Inner {
    registry: Arc<RoomRegistry>,
    notifier: Arc<dyn Notifier>,
    config: EngineConfig,
    rng: Mutex<ChaCha8Rng>,
}

impl GameFlowService {
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        Self::with_config(notifier, EngineConfig::from_env())
    }

    pub fn with_config(notifier: Arc<dyn Notifier>, config: EngineConfig) -> Self {
        Self::build(notifier, config, ChaCha8Rng::from_os_rng())
    }

    /// Deterministic draws and shuffles, for tests and replays.
    pub fn with_seeded_rng(notifier: Arc<dyn Notifier>, config: EngineConfig, seed: u64) -> Self {
        Self::build(notifier, config, ChaCha8Rng::seed_from_u64(seed))
    }

    fn build(notifier: Arc<dyn Notifier>, config: EngineConfig, rng: ChaCha8Rng) -> Self {
        Self {
            inner: Arc::new(Inner {
                registry: Arc::new(RoomRegistry::new()),
                notifier,
                config,
                rng: Mutex::new(rng),
            }),
        }
    }

    pub fn registry(&self) -> Arc<RoomRegistry> {
        self.inner.registry.clone()
    }

    /// Apply `action` on behalf of `actor`.
    ///
    /// On rejection the actor receives an `invalidAction` event carrying
    /// the reason code, and the error is also returned for embedders
    /// that want it. Room state is untouched by rejected actions.
    pub fn apply(&self, actor: &str, action: Action) -> Result<(), GameError> {
        let attempted_room = action
            .room_code()
            .map(normalize_room_code)
            .unwrap_or_default();

        let result = match action {
            Action::CreateRoom {
                display_name,
                player_id,
            } => self.create_room(&player_id, &display_name).map(|_| ()),
            Action::JoinRoom {
                room_code,
                display_name,
                player_id,
            } => self.join_room(&player_id, &display_name, &room_code),
            Action::ChooseTeam { room_code, team } => self.choose_team(actor, &room_code, team),
            Action::StartGame { room_code } => self.start_game(actor, &room_code),
            Action::ChooseDealerPlayer {
                room_code,
                player_id,
            } => self.choose_dealer_player(actor, &room_code, &player_id),
            Action::ChooseTrump { room_code, suit } => self.choose_trump(actor, &room_code, suit),
            Action::PlayCard { room_code, card } => self.play_card(actor, &room_code, card),
            Action::GetGameState { room_code } => {
                self.get_game_state(actor, &room_code).map(|_| ())
            }
            Action::Disconnect => {
                self.disconnect(actor);
                Ok(())
            }
        };

        if let Err(err) = &result {
            warn!(
                room = %attempted_room,
                player = %actor,
                code = ?err.code(),
                "Action rejected: {err}"
            );
            self.inner.notifier.deliver(Outbound::to_player(
                attempted_room,
                actor,
                Event::InvalidAction {
                    code: err.code(),
                    message: err.to_string(),
                },
            ));
        }
        result
    }

    fn deliver(&self, outbound: Outbound) {
        self.inner.notifier.deliver(outbound);
    }

    fn send_to_room(&self, state: &RoomState, event: Event) {
        self.deliver(Outbound::to_room(state.code.clone(), event));
    }

    fn send_to_player(&self, state: &RoomState, player_id: &str, event: Event) {
        self.deliver(Outbound::to_player(state.code.clone(), player_id, event));
    }

    fn send_to_seat(&self, state: &RoomState, seat: Seat, event: Event) {
        let player_id = state.player_id(seat).to_string();
        self.send_to_player(state, &player_id, event);
    }

    /// Redacted room snapshot to everyone; sent after each successful
    /// mutation so clients converge without tracking deltas.
    fn broadcast_state(&self, state: &RoomState) {
        self.send_to_room(state, Event::GameState(snapshot_for(state, None)));
    }
}

//! Room registry: the process-wide map from room code to live room.

use std::sync::Arc;
use std::time::Duration;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use parking_lot::Mutex;
use rand::Rng;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::domain::state::RoomState;
use crate::errors::domain::GameError;
use crate::utils::room_code::{generate_room_code, normalize_room_code};

/// A live room: its state behind the per-room lock, plus the token that
/// stops scheduled continuations when the room goes away.
#[derive(Debug)]
pub struct Room {
    pub code: String,
    pub state: Mutex<RoomState>,
    pub cancel: CancellationToken,
}

impl Room {
    fn new(code: String) -> Arc<Self> {
        Arc::new(Self {
            state: Mutex::new(RoomState::new(code.clone())),
            code,
            cancel: CancellationToken::new(),
        })
    }
}

/// Code-to-room map shared by every caller of the engine. Insertion
/// goes through `create` so code uniqueness holds under concurrent
/// creates.
#[derive(Default)]
pub struct RoomRegistry {
    rooms: DashMap<String, Arc<Room>>,
}

impl RoomRegistry {
    pub fn new() -> Self {
        Self {
            rooms: DashMap::new(),
        }
    }

    /// Create a room under a freshly drawn code, redrawing on the rare
    /// collision with an existing one.
    pub fn create<R: Rng + ?Sized>(&self, rng: &mut R) -> Arc<Room> {
        loop {
            let code = generate_room_code(rng);
            match self.rooms.entry(code.clone()) {
                Entry::Occupied(_) => continue,
                Entry::Vacant(vacant) => {
                    let room = Room::new(code);
                    vacant.insert(room.clone());
                    info!(room = %room.code, "Room created");
                    return room;
                }
            }
        }
    }

    /// Look up a room, accepting human-typed lowercase codes.
    pub fn get(&self, code: &str) -> Result<Arc<Room>, GameError> {
        let code = normalize_room_code(code);
        self.rooms
            .get(&code)
            .map(|entry| entry.value().clone())
            .ok_or(GameError::RoomNotFound { code })
    }

    /// Remove a room and cancel anything it had scheduled.
    pub fn remove(&self, code: &str) -> Option<Arc<Room>> {
        let code = normalize_room_code(code);
        let removed = self.rooms.remove(&code).map(|(_, room)| room);
        if let Some(room) = &removed {
            room.cancel.cancel();
            info!(room = %room.code, "Room removed");
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    /// Snapshot of every live room, in no particular order.
    pub fn all(&self) -> Vec<Arc<Room>> {
        self.rooms.iter().map(|entry| entry.value().clone()).collect()
    }

    /// Drop rooms with no action for at least `max_idle`; returns the
    /// removed codes. Embedders call this from a periodic task.
    pub fn sweep_idle(&self, max_idle: Duration) -> Vec<String> {
        let stale: Vec<String> = self
            .rooms
            .iter()
            .filter(|entry| entry.value().state.lock().last_action_at.elapsed() >= max_idle)
            .map(|entry| entry.key().clone())
            .collect();
        for code in &stale {
            self.remove(code);
        }
        stale
    }
}

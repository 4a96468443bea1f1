//! Scheduled continuations. Each captures the room epoch at schedule
//! time and re-checks it under the lock before touching anything, so a
//! pause that outlives its phase quietly does nothing.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error};

use super::GameFlowService;
use crate::domain::state::Phase;
use crate::registry::Room;

impl GameFlowService {
    /// Run the second-half deal after the reveal pause.
    pub(super) fn schedule_second_half(&self, room: &Arc<Room>, epoch: u64) {
        let service = self.clone();
        let room = room.clone();
        let delay = self.inner.config.deal_pause;
        tokio::spawn(async move {
            if !pause(&room, delay).await {
                return;
            }
            if let Err(err) = service.deal_second_half(&room, epoch) {
                error!(room = %room.code, error = %err, "Second-half deal failed");
            }
        });
    }

    /// Clear the just-finished trick from display after the pause.
    /// `trick_no` pins the continuation to one specific trick so a slow
    /// clear never wipes the next trick's display.
    pub(super) fn schedule_trick_clear(&self, room: &Arc<Room>, epoch: u64, trick_no: u8) {
        let service = self.clone();
        let room = room.clone();
        let delay = self.inner.config.trick_pause;
        tokio::spawn(async move {
            if !pause(&room, delay).await {
                return;
            }
            service.clear_shown_trick(&room, epoch, trick_no);
        });
    }

    fn clear_shown_trick(&self, room: &Room, scheduled_epoch: u64, trick_no: u8) {
        let mut state = room.state.lock();
        if state.epoch != scheduled_epoch
            || !matches!(state.phase, Phase::Playing)
            || state.rounds_played != trick_no
            || state.last_trick.is_none()
        {
            debug!(room = %state.code, "Stale trick-clear timer ignored");
            return;
        }
        state.last_trick = None;
        self.broadcast_state(&state);
    }
}

/// Sleep unless the room is torn down first. Returns false when the
/// room went away during the pause.
async fn pause(room: &Room, delay: Duration) -> bool {
    tokio::select! {
        _ = room.cancel.cancelled() => false,
        _ = tokio::time::sleep(delay) => true,
    }
}

//! Engine configuration read from environment variables.

use std::env;
use std::time::Duration;

/// Durations for the scheduled room-lifecycle pauses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Pause between the first and second half of the deal, giving the
    /// trump-chooser time to examine their four cards.
    pub deal_pause: Duration,
    /// Pause after trick resolution before the table is cleared.
    pub trick_pause: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            deal_pause: Duration::from_millis(1500),
            trick_pause: Duration::from_millis(2000),
        }
    }
}

impl EngineConfig {
    /// Build a config from the environment, falling back to defaults.
    ///
    /// Recognized variables (milliseconds):
    /// - `HUKUM_DEAL_PAUSE_MS`
    /// - `HUKUM_TRICK_PAUSE_MS`
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            deal_pause: duration_ms_var("HUKUM_DEAL_PAUSE_MS", defaults.deal_pause),
            trick_pause: duration_ms_var("HUKUM_TRICK_PAUSE_MS", defaults.trick_pause),
        }
    }
}

fn duration_ms_var(name: &str, default: Duration) -> Duration {
    env::var(name)
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .map(Duration::from_millis)
        .unwrap_or(default)
}

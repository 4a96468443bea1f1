#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod config;
pub mod domain;
pub mod errors;
pub mod notify;
pub mod protocol;
pub mod registry;
pub mod services;
pub mod telemetry;
pub mod utils;

#[cfg(test)]
pub mod test_bootstrap;

// Re-exports for public API
pub use config::EngineConfig;
pub use domain::{
    snapshot_for, Card, GameWinner, Phase, Rank, RoomSnapshot, Suit, TeamId, TrickTally,
};
pub use errors::{ErrorCode, GameError};
pub use notify::{ChannelNotifier, CollectingNotifier, Notifier};
pub use protocol::{Action, Event, Outbound, Target};
pub use registry::{Room, RoomRegistry};
pub use services::GameFlowService;
pub use telemetry::init_tracing;

// Prelude for embedder and test convenience
pub mod prelude {
    pub use super::config::*;
    pub use super::errors::domain::*;
    pub use super::errors::error_code::*;
    pub use super::notify::*;
    pub use super::protocol::*;
    pub use super::registry::*;
    pub use super::services::*;
}

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    test_bootstrap::logging::init();
}

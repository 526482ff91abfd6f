//! Outbound surfaces: state snapshots, the log feed and notifications.

use serde::{Deserialize, Serialize};

use super::state::{Awaiting, Session, SessionStatus};
use crate::core::{GameError, LogEntry, Notification, Player, PlayerId, Result};

/// Broadcast view of the session.
///
/// Plain data only, so it round-trips through `bincode` as well as JSON.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub status: SessionStatus,
    pub players: Vec<Player>,
    pub current_turn: Option<PlayerId>,
    pub turn_number: u32,
    pub awaiting: Option<Awaiting>,
}

impl SessionSnapshot {
    /// Encode with `bincode`.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        bincode::serialize(self).map_err(|e| GameError::Encode {
            what: "snapshot",
            message: e.to_string(),
        })
    }

    /// Decode from `bincode`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        bincode::deserialize(bytes).map_err(|e| GameError::parse("snapshot", e))
    }
}

impl Session {
    /// Current state for broadcast.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            status: self.status,
            players: self.players.iter().cloned().collect(),
            current_turn: self.current_turn,
            turn_number: self.turn_number,
            awaiting: self.scratch.pending.as_ref().map(|p| p.awaiting()),
        }
    }

    /// Log feed entries with id `>= since`.
    #[must_use]
    pub fn log_feed(&self, since: u64) -> Vec<LogEntry> {
        self.history.log_feed(since)
    }

    /// Take every notification raised since the last drain.
    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }
}

//! Append-only session history and outbound notifications.
//!
//! The history doubles as the audit trail and as the source of the log feed
//! shown to players. Entries are never mutated once appended.
//!
//! Stored in an `im::Vector` so snapshots handed to the transport are O(1)
//! clones that stay valid while the session keeps appending.

use chrono::{DateTime, Utc};
use im::Vector;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::player::{Player, PlayerId};
use crate::board::DreamId;

/// What a history entry records.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HistoryAction {
    PlayerJoined,
    PlayerLeft,
    HostChanged,
    DreamSelected,
    GameStarted,
    GameEnded,
    DiceRolled,
    Moved,
    ForkChosen,
    TurnSkipped,
    TurnStalemate,
    CardDrawn,
    CardResolved,
    EffectApplied,
    IncomeCollected,
    IncomeBlocked,
    DreamFulfilled,
    AssetPurchased,
    ItemSold,
    CharityDonated,
    CharityBonus,
    ChoiceMade,
    OfferDeclined,
}

/// One audit-log entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: u64,
    pub timestamp: DateTime<Utc>,
    pub actor_id: Option<PlayerId>,
    pub actor_name: String,
    pub action: HistoryAction,
    /// Free-form payload. Always carries a human-readable `message`.
    pub details: Value,
}

impl HistoryEntry {
    /// The human-readable message in `details`.
    #[must_use]
    pub fn message(&self) -> &str {
        self.details
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or_default()
    }
}

/// Log-feed line derived from a history entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: u64,
    pub timestamp: DateTime<Utc>,
    pub actor_name: String,
    pub action: HistoryAction,
    pub message: String,
}

/// Name used for entries not attributed to a player.
pub const SYSTEM_ACTOR: &str = "system";

/// Append-only history log.
#[derive(Clone, Debug, Default)]
pub struct History {
    entries: Vector<HistoryEntry>,
    next_id: u64,
}

impl History {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry. `extra` must be a JSON object (or null); its fields
    /// are stored next to `message`.
    pub fn record(
        &mut self,
        actor: Option<&Player>,
        action: HistoryAction,
        message: impl Into<String>,
        extra: Value,
    ) -> &HistoryEntry {
        let mut details = match extra {
            Value::Object(map) => map,
            Value::Null => Map::new(),
            other => {
                let mut map = Map::new();
                map.insert("data".to_string(), other);
                map
            }
        };
        details.insert("message".to_string(), Value::String(message.into()));

        let entry = HistoryEntry {
            id: self.next_id,
            timestamp: Utc::now(),
            actor_id: actor.map(|p| p.id),
            actor_name: actor.map_or_else(|| SYSTEM_ACTOR.to_string(), |p| p.name.clone()),
            action,
            details: Value::Object(details),
        };
        self.next_id += 1;
        self.entries.push_back(entry);
        &self.entries[self.entries.len() - 1]
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    #[must_use]
    pub fn last(&self) -> Option<&HistoryEntry> {
        self.entries.last()
    }

    /// Number of entries with the given action.
    #[must_use]
    pub fn count(&self, action: HistoryAction) -> usize {
        self.entries.iter().filter(|e| e.action == action).count()
    }

    /// Cheap shared snapshot of every entry.
    #[must_use]
    pub fn entries(&self) -> Vector<HistoryEntry> {
        self.entries.clone()
    }

    /// Log feed of entries with id `>= since`.
    #[must_use]
    pub fn log_feed(&self, since: u64) -> Vec<LogEntry> {
        self.entries
            .iter()
            .filter(|e| e.id >= since)
            .map(|e| LogEntry {
                id: e.id,
                timestamp: e.timestamp,
                actor_name: e.actor_name.clone(),
                action: e.action,
                message: e.message().to_string(),
            })
            .collect()
    }
}

/// Ad hoc event worth broadcasting to every client.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Notification {
    DreamFulfilled { player: PlayerId, name: String, dream: DreamId },
    AssetPurchased { player: PlayerId, name: String, asset: String, price: u64 },
    DreamAssetBought { player: PlayerId, name: String, dream: DreamId, price: u64 },
    DreamAssetDeclined { player: PlayerId, name: String, dream: DreamId },
    CharityBonusGranted { player: PlayerId, name: String, turns: u32 },
    TurnSkipped { player: PlayerId, name: String },
    Stalemate,
}

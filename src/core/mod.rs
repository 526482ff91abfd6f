//! Core engine types: players, errors, history, RNG, configuration.
//!
//! These are shared by every other module and carry no game rules of their
//! own.

pub mod config;
pub mod error;
pub mod history;
pub mod player;
pub mod rng;

pub use config::SessionConfig;
pub use error::{GameError, Result};
pub use history::{History, HistoryAction, HistoryEntry, LogEntry, Notification};
pub use player::{
    Assets, Business, CoinSide, DreamTarget, Item, Player, PlayerId, PlayerRoster, PlayerStatus,
    Position,
};
pub use rng::GameRng;

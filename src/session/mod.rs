//! The game session and its command surface.
//!
//! ## Key Types
//!
//! - `Session`: the single mutable state container
//! - `SessionBuilder`: validated construction from config, board, rules and cards
//! - `Command` / `CommandResult`: serde-tagged dispatch for transports
//! - `SharedSession`: mutex-guarded handle for multi-threaded hosts
//! - `SessionSnapshot`: broadcast view, encodable with `bincode`
//!
//! Commands are grouped by concern: `turn` (start, dice, advance, end),
//! `movement` (moves, forks, passed income), `landing` (cell outcomes),
//! `cards` (draws and decisions) and `players` (join, leave, dreams).

mod builder;
mod cards;
mod command;
mod landing;
mod movement;
mod players;
mod shared;
mod snapshot;
mod state;
mod turn;

pub use builder::SessionBuilder;
pub use cards::{AppliedEffect, Resolution};
pub use command::{Command, CommandResult};
pub use landing::{LandingAction, LandingOutcome};
pub use movement::MoveOutcome;
pub use players::Removal;
pub use shared::SharedSession;
pub use snapshot::SessionSnapshot;
pub use state::{Awaiting, Pending, Session, SessionStatus};
pub use turn::{DiceRoll, GameReport, TurnAdvance};

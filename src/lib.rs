//! # finboard
//!
//! Session engine for a turn-based, multiplayer financial-literacy board
//! game. One authoritative session resolves dice, board movement with
//! forks, card draws with declarative effects, and a four-envelope
//! personal-finance ledger per player.
//!
//! ## Design Principles
//!
//! 1. **Declarative Content**: Boards, cell rules and cards are data.
//!    Effects are a closed tagged enum applied by one resolver.
//!
//! 2. **Explicit Session**: No global state. Every game is a `Session`
//!    value; a `SharedSession` adds the single-writer lock threaded
//!    hosts need.
//!
//! 3. **Failures Are Data**: Invalid commands are rejected with a
//!    `GameError` and change nothing. Running short of money is a result
//!    branch (debt, failed purchase), never an error.
//!
//! ## Modules
//!
//! - `core`: Players, errors, history, RNG, configuration
//! - `finance`: Envelopes, income distribution, purpose-ordered spending
//! - `board`: Cell graph, movement, per-cell rules
//! - `cards`: Card definitions, library, decks, interpretation
//! - `effects`: Effect language and resolver
//! - `session`: Turn sequencing, landing, decisions, commands
//! - `content`: The built-in standard board and decks
//!
//! ## Example
//!
//! ```
//! use finboard::content::standard;
//!
//! let mut session = standard::builder().unwrap().seed(7).build().unwrap();
//! let ada = session.add_player("Ada").unwrap().id;
//! session.start_game().unwrap();
//!
//! let roll = session.roll_dice(ada).unwrap();
//! let moved = session.move_player(ada, roll.result).unwrap();
//! assert_eq!(moved.steps, roll.result);
//! ```

pub mod board;
pub mod cards;
pub mod content;
pub mod core;
pub mod effects;
pub mod finance;
pub mod session;

// Re-export commonly used types
pub use crate::core::{
    CoinSide, GameError, GameRng, History, HistoryAction, HistoryEntry, LogEntry, Notification,
    Player, PlayerId, PlayerRoster, Result, SessionConfig,
};

pub use crate::finance::{Debt, Envelope, IncomeOutcome, SpendPurpose, Wallets};

pub use crate::board::{BoardGraph, Cell, CellAction, CellId, CellKind, CellRules, DreamId, Walk};

pub use crate::cards::{CardCategory, CardDefinition, CardId, CardLibrary, ClientCard, DeckStore};

pub use crate::effects::{Effect, EffectResolver, Offer, OfferOutcome};

pub use crate::session::{
    Command, CommandResult, DiceRoll, GameReport, LandingAction, LandingOutcome, MoveOutcome,
    Resolution, Session, SessionBuilder, SessionSnapshot, SessionStatus, SharedSession,
    TurnAdvance,
};

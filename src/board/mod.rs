//! Board graph and movement.
//!
//! ## Key Types
//!
//! - `Cell`, `CellId`, `CellKind`: static board data
//! - `BoardGraph`: validated graph of cells plus the dream catalogue
//! - `walk`: pure N-step movement with fork and pass-through handling
//! - `CellRules`: declarative per-cell overrides keyed by id or kind

mod cell;
mod graph;
mod rules;
mod walk;

pub use cell::{Cell, CellId, CellKind, DreamDefinition, DreamId};
pub use graph::BoardGraph;
pub use rules::{CellAction, CellRule, CellRules, ChoiceOption};
pub use walk::{walk, Walk};

//! Board cells and dream definitions - static board data.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::CardCategory;

/// Unique identifier for a board cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CellId(pub u32);

impl CellId {
    /// Create a new cell ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CellId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Cell({})", self.0)
    }
}

/// Identifier of a dream in the board's dream catalogue.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DreamId(pub u32);

impl DreamId {
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for DreamId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Dream({})", self.0)
    }
}

/// Cell category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellKind {
    Start,
    Normal,
    Fork,
    Money,
    Charity,
    Dream,
    Chance,
    News,
    Expenses,
    Business,
}

impl CellKind {
    /// Cells that pay income when landed on or passed.
    #[must_use]
    pub const fn is_income(self) -> bool {
        matches!(self, CellKind::Start | CellKind::Money)
    }

    /// Deck drawn from when landing on this cell.
    #[must_use]
    pub const fn card_category(self) -> Option<CardCategory> {
        match self {
            CellKind::Chance => Some(CardCategory::Chance),
            CellKind::News => Some(CardCategory::News),
            CellKind::Expenses => Some(CardCategory::Expenses),
            CellKind::Business => Some(CardCategory::Business),
            _ => None,
        }
    }
}

/// A board cell.
///
/// Non-fork cells have exactly one outgoing edge; fork cells have two.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub id: CellId,
    pub kind: CellKind,
    pub edges: SmallVec<[CellId; 2]>,
    /// Dream sold on this cell. `None` on a dream cell is a wildcard that
    /// matches any player's dream.
    #[serde(default)]
    pub dream: Option<DreamId>,
    #[serde(default)]
    pub label: Option<String>,
}

impl Cell {
    /// Create a cell with a single outgoing edge.
    #[must_use]
    pub fn new(id: CellId, kind: CellKind, next: CellId) -> Self {
        Self {
            id,
            kind,
            edges: SmallVec::from_slice(&[next]),
            dream: None,
            label: None,
        }
    }

    /// Create a fork cell with two outgoing edges (heads, tails).
    #[must_use]
    pub fn fork(id: CellId, heads: CellId, tails: CellId) -> Self {
        Self {
            id,
            kind: CellKind::Fork,
            edges: SmallVec::from_slice(&[heads, tails]),
            dream: None,
            label: None,
        }
    }

    /// Attach a dream to this cell (builder pattern).
    #[must_use]
    pub fn with_dream(mut self, dream: DreamId) -> Self {
        self.dream = Some(dream);
        self
    }

    /// Attach a display label (builder pattern).
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// The default outgoing edge.
    #[must_use]
    pub fn next(&self) -> CellId {
        self.edges[0]
    }

    /// Outgoing edge by index.
    #[must_use]
    pub fn edge(&self, index: usize) -> Option<CellId> {
        self.edges.get(index).copied()
    }

    #[must_use]
    pub fn is_fork(&self) -> bool {
        self.kind == CellKind::Fork
    }
}

/// A purchasable dream.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DreamDefinition {
    pub id: DreamId,
    pub name: String,
    pub price: u64,
}

impl DreamDefinition {
    #[must_use]
    pub fn new(id: DreamId, name: impl Into<String>, price: u64) -> Self {
        Self {
            id,
            name: name.into(),
            price,
        }
    }
}

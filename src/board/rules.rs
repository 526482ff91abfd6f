//! Declarative per-cell behaviour.
//!
//! A side table of rules keyed by cell id (most specific) or by cell kind.
//! Cells without a rule fall back to the built-in behaviour of their kind.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::cell::{Cell, CellId, CellKind};
use super::graph::BoardGraph;
use crate::core::{GameError, Result};
use crate::effects::Effect;

/// One selectable option of a `choice` cell.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceOption {
    pub id: String,
    pub label: String,
    pub effect: Effect,
}

/// What happens when a player lands on a cell.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum CellAction {
    /// Collect business cashflow through income distribution.
    CollectIncome,
    /// Redeem a banked charity credit for double-dice turns.
    CharityBonus,
    /// Run the dream purchase flow.
    DreamCheck,
    /// Offer named options; the turn waits for the player's pick.
    Choice {
        prompt: String,
        options: Vec<ChoiceOption>,
    },
    /// Apply an effect (single or `multi_effect`).
    Effect { effect: Effect },
}

/// A cell rule with an optional landing message.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellRule {
    pub action: CellAction,
    #[serde(default)]
    pub message: Option<String>,
}

impl CellRule {
    #[must_use]
    pub fn new(action: CellAction) -> Self {
        Self { action, message: None }
    }

    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

#[derive(Deserialize)]
struct RuleEntry {
    #[serde(default)]
    cell: Option<CellId>,
    #[serde(default)]
    kind: Option<CellKind>,
    #[serde(default)]
    message: Option<String>,
    #[serde(flatten)]
    action: CellAction,
}

/// Rule table.
///
/// ```
/// use finboard::board::{CellAction, CellKind, CellRule, CellRules};
///
/// let rules = CellRules::new()
///     .for_kind(CellKind::Money, CellRule::new(CellAction::CollectIncome));
/// assert_eq!(rules.len(), 1);
/// ```
#[derive(Clone, Debug, Default)]
pub struct CellRules {
    by_cell: FxHashMap<CellId, CellRule>,
    by_kind: FxHashMap<CellKind, CellRule>,
}

impl CellRules {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Kind rules every board gets unless overridden: income on money and
    /// start cells, charity bonus on charity cells, dream flow on dream cells.
    #[must_use]
    pub fn with_default_kinds() -> Self {
        Self::new()
            .for_kind(CellKind::Start, CellRule::new(CellAction::CollectIncome))
            .for_kind(CellKind::Money, CellRule::new(CellAction::CollectIncome))
            .for_kind(CellKind::Charity, CellRule::new(CellAction::CharityBonus))
            .for_kind(CellKind::Dream, CellRule::new(CellAction::DreamCheck))
    }

    /// Add a rule for one cell (builder pattern).
    #[must_use]
    pub fn for_cell(mut self, cell: CellId, rule: CellRule) -> Self {
        self.by_cell.insert(cell, rule);
        self
    }

    /// Add a rule for every cell of a kind (builder pattern).
    #[must_use]
    pub fn for_kind(mut self, kind: CellKind, rule: CellRule) -> Self {
        self.by_kind.insert(kind, rule);
        self
    }

    /// Parse rules from a JSON list. Each entry names either a `cell` or a
    /// `kind`, plus an `action` and its fields:
    ///
    /// ```json
    /// [ { "kind": "money", "action": "collect_income" },
    ///   { "cell": 21, "action": "effect", "effect": { "type": "pay", "amount": 100 } } ]
    /// ```
    pub fn from_json_str(json: &str) -> Result<Self> {
        let entries: Vec<RuleEntry> =
            serde_json::from_str(json).map_err(|e| GameError::parse("cell rules", e))?;

        let mut rules = Self::new();
        for entry in entries {
            let rule = CellRule {
                action: entry.action,
                message: entry.message,
            };
            match (entry.cell, entry.kind) {
                (Some(cell), None) => rules.by_cell.insert(cell, rule),
                (None, Some(kind)) => rules.by_kind.insert(kind, rule),
                _ => {
                    return Err(GameError::InvalidConfig(
                        "a cell rule must name exactly one of `cell` or `kind`".into(),
                    ))
                }
            };
        }
        Ok(rules)
    }

    /// Rule for a cell: by id first, then by kind.
    #[must_use]
    pub fn lookup(&self, cell: &Cell) -> Option<&CellRule> {
        self.by_cell
            .get(&cell.id)
            .or_else(|| self.by_kind.get(&cell.kind))
    }

    /// Number of rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_cell.len() + self.by_kind.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Check that every id-keyed rule names a cell on the board.
    pub fn validate(&self, board: &BoardGraph) -> Result<()> {
        match self.by_cell.keys().find(|id| !board.contains(**id)) {
            Some(id) => Err(GameError::InvalidConfig(format!("rule for missing {id}"))),
            None => Ok(()),
        }
    }
}

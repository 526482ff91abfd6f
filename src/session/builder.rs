//! Session construction.

use super::state::Session;
use crate::board::{BoardGraph, CellRules};
use crate::cards::CardLibrary;
use crate::core::{GameError, Result, SessionConfig};

/// Builder for a [`Session`].
///
/// A board is required. Rules default to the standard kind rules (income
/// on money and start, charity bonus, dream check) and the card library
/// defaults to empty. Every card cell on the board needs at least one card
/// of its category in the library.
///
/// ## Example
///
/// ```
/// use finboard::board::{BoardGraph, Cell, CellId, CellKind};
/// use finboard::session::{SessionBuilder, SessionStatus};
///
/// let board = BoardGraph::new(
///     CellId::new(0),
///     vec![
///         Cell::new(CellId::new(0), CellKind::Start, CellId::new(1)),
///         Cell::new(CellId::new(1), CellKind::Normal, CellId::new(0)),
///     ],
///     vec![],
/// )
/// .unwrap();
///
/// let session = SessionBuilder::new().board(board).seed(1).build().unwrap();
/// assert_eq!(session.status(), SessionStatus::Waiting);
/// ```
#[derive(Clone, Debug, Default)]
pub struct SessionBuilder {
    config: SessionConfig,
    board: Option<BoardGraph>,
    rules: Option<CellRules>,
    library: CardLibrary,
}

impl SessionBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn config(mut self, config: SessionConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the RNG seed on the current config.
    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    #[must_use]
    pub fn board(mut self, board: BoardGraph) -> Self {
        self.board = Some(board);
        self
    }

    #[must_use]
    pub fn rules(mut self, rules: CellRules) -> Self {
        self.rules = Some(rules);
        self
    }

    #[must_use]
    pub fn library(mut self, library: CardLibrary) -> Self {
        self.library = library;
        self
    }

    /// Validate everything and build the session.
    pub fn build(self) -> Result<Session> {
        self.config.validate()?;
        let board = self
            .board
            .ok_or_else(|| GameError::InvalidConfig("a board is required".into()))?;
        let rules = self.rules.unwrap_or_else(CellRules::with_default_kinds);
        rules.validate(&board)?;
        for cell in board.cells() {
            if let Some(category) = cell.kind.card_category() {
                if self.library.master(category).is_empty() {
                    return Err(GameError::InvalidConfig(format!("no {category} cards for {}", cell.id)));
                }
            }
        }

        Ok(Session::new(self.config, board, rules, self.library))
    }
}

//! Movement resolution: walking the board graph for N steps.
//!
//! `walk` is pure. The session uses it both to commit a move and to
//! predict one, so the two can never disagree.

use serde::{Deserialize, Serialize};

use super::cell::{CellId, CellKind};
use super::graph::BoardGraph;
use crate::core::{GameError, Result};

/// Result of walking the board.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Walk {
    pub from: CellId,
    pub landing: CellId,
    pub landing_kind: CellKind,
    /// Every cell entered, in order. The last one is the landing cell.
    pub path: Vec<CellId>,
    /// Fork edge taken on the first step, if a pending fork direction applied.
    pub fork_edge: Option<usize>,
    /// Money and start cells entered and left again during the walk.
    pub passed_money_cells: Vec<CellId>,
}

/// Walk `steps` cells from `from`.
///
/// If `from` is a fork and `pending_fork` is set, the first step follows
/// that edge. Every other step follows the cell's default edge, including
/// steps out of forks reached mid-walk.
pub fn walk(
    board: &BoardGraph,
    from: CellId,
    pending_fork: Option<usize>,
    steps: u32,
) -> Result<Walk> {
    if steps == 0 {
        return Err(GameError::InvalidSteps);
    }

    let origin = board.cell(from)?;
    let mut path = Vec::with_capacity((steps as usize).min(board.len()));
    let mut current = from;
    let mut remaining = steps;
    let mut fork_edge = None;

    if let (true, Some(edge)) = (origin.is_fork(), pending_fork) {
        current = origin.edge(edge).ok_or_else(|| {
            GameError::InvalidBoard(format!("{from} has no edge {edge}"))
        })?;
        path.push(current);
        fork_edge = Some(edge);
        remaining -= 1;
    }

    for _ in 0..remaining {
        current = board.cell(current)?.next();
        path.push(current);
    }

    let landing_kind = board.cell(current)?.kind;
    let passed_money_cells = path[..path.len() - 1]
        .iter()
        .copied()
        .filter(|&id| board.cell(id).map_or(false, |c| c.kind.is_income()))
        .collect();

    Ok(Walk {
        from,
        landing: current,
        landing_kind,
        path,
        fork_edge,
        passed_money_cells,
    })
}

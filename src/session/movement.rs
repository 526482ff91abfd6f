//! Moving players: committed moves, predictions, forks and passed income.

use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

use super::landing::LandingOutcome;
use super::state::{PassedCells, Session};
use super::turn::TurnAdvance;
use crate::board::{walk, CellId, CellKind, Walk};
use crate::core::{CoinSide, GameError, HistoryAction, PlayerId, Position, Result};
use crate::finance::{self, IncomeOutcome};

/// Result of a committed move.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveOutcome {
    pub from: CellId,
    pub cell: CellId,
    pub kind: CellKind,
    pub steps: u32,
    pub path: Vec<CellId>,
    pub fork_edge: Option<usize>,
    /// Money and start cells passed (not landed on). Collect them with
    /// [`Session::collect_passed_income`].
    pub passed_money_cells: Vec<CellId>,
    pub landing: LandingOutcome,
    /// Set when the landing ended the turn.
    pub turn: Option<TurnAdvance>,
}

impl Session {
    /// Move the current player `steps` cells and resolve the landing.
    pub fn move_player(&mut self, id: PlayerId, steps: u32) -> Result<MoveOutcome> {
        self.require_settled_turn(id)?;

        let position = self.player(id)?.position.clone();
        let walk = walk(&self.board, position.cell, position.pending_fork, steps)?;

        let player = self.player_mut(id)?;
        player.position = Position {
            cell: walk.landing,
            kind: walk.landing_kind,
            pending_fork: None,
        };
        let name = player.name.clone();
        debug!(player = %id, from = %walk.from, to = %walk.landing, steps, "moved");

        self.record(
            Some(id),
            HistoryAction::Moved,
            format!("{name} moved {steps} steps to {}", walk.landing),
            json!({
                "from": walk.from,
                "to": walk.landing,
                "steps": steps,
                "path": walk.path,
                "fork_edge": walk.fork_edge,
            }),
        );
        self.passed.insert(
            id,
            PassedCells {
                cells: walk.passed_money_cells.clone(),
                collected: Vec::new(),
            },
        );

        let landing = self.land(id)?;
        let turn = landing.ends_turn.then(|| self.end_turn());

        Ok(MoveOutcome {
            from: walk.from,
            cell: walk.landing,
            kind: walk.landing_kind,
            steps,
            path: walk.path,
            fork_edge: walk.fork_edge,
            passed_money_cells: walk.passed_money_cells,
            landing,
            turn,
        })
    }

    /// Where a move of `steps` would land, without changing anything.
    pub fn predict_move(&self, id: PlayerId, steps: u32) -> Result<Walk> {
        let position = &self.player(id)?.position;
        walk(&self.board, position.cell, position.pending_fork, steps)
    }

    /// Choose the edge out of the fork the player stands on. The next move
    /// takes it.
    pub fn set_fork_direction(&mut self, id: PlayerId, side: CoinSide) -> Result<()> {
        self.check_on_fork(id)?;

        let player = self.player_mut(id)?;
        player.position.pending_fork = Some(side.edge_index());
        let path = match side {
            CoinSide::Heads => "heads",
            CoinSide::Tails => "tails",
        };
        let msg = format!("{} will take the {path} path", player.name);
        let cell = player.position.cell;
        self.record(Some(id), HistoryAction::ForkChosen, msg, json!({ "cell": cell, "side": side }));
        Ok(())
    }

    /// Flip a coin for the player's fork and apply the result.
    pub fn flip_fork_coin(&mut self, id: PlayerId) -> Result<CoinSide> {
        self.check_on_fork(id)?;
        let side = if self.coin.flip_coin() {
            CoinSide::Heads
        } else {
            CoinSide::Tails
        };
        self.set_fork_direction(id, side)?;
        Ok(side)
    }

    fn check_on_fork(&self, id: PlayerId) -> Result<()> {
        self.require_settled_turn(id)?;
        let cell = self.player(id)?.position.cell;
        if !self.board.cell(cell)?.is_fork() {
            return Err(GameError::NotAFork(cell));
        }
        Ok(())
    }

    /// Collect income for a money or start cell passed on the player's
    /// latest move. Each passed cell pays at most once.
    pub fn collect_passed_income(&mut self, id: PlayerId, cell: CellId) -> Result<IncomeOutcome> {
        self.require_in_progress()?;
        self.player(id)?;
        if !self.collectible_cells(id).contains(&cell) {
            return Err(GameError::NotCollectible(cell));
        }

        if let Some(passed) = self.passed.get_mut(&id) {
            passed.collected.push(cell);
        }
        Ok(self.collect_income(id, cell)?.0)
    }

    /// Route a player's income (business cashflow plus base income)
    /// through distribution. Returns the outcome and the amount.
    pub(crate) fn collect_income(&mut self, id: PlayerId, cell: CellId) -> Result<(IncomeOutcome, u64)> {
        let base = self.config.base_income;
        let player = self.player_mut(id)?;
        let amount = player.assets.business_cashflow() + base;
        let outcome = finance::distribute_income(player, amount);
        let name = player.name.clone();

        match outcome {
            IncomeOutcome::Blocked { remaining } => self.record(
                Some(id),
                HistoryAction::IncomeBlocked,
                format!("{name}'s income of {amount} was blocked"),
                json!({ "cell": cell, "amount": amount, "remaining": remaining }),
            ),
            IncomeOutcome::Distributed { split } => self.record(
                Some(id),
                HistoryAction::IncomeCollected,
                format!("{name} collected {amount} income"),
                json!({ "cell": cell, "amount": amount, "split": split }),
            ),
        }
        Ok((outcome, amount))
    }
}

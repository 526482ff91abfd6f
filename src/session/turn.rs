//! Turn sequencing: game start and end, dice, turn advance.

use chrono::{DateTime, Utc};
use im::Vector;
use serde::{Deserialize, Serialize};
use serde_json::json;
use smallvec::{smallvec, SmallVec};
use tracing::{debug, info, warn};

use super::state::{Session, SessionStatus, TurnScratch};
use crate::core::{GameError, HistoryAction, HistoryEntry, Notification, Player, PlayerId, Result};

/// Result of a roll command.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceRoll {
    /// The die value, or the sum once a double-dice roll completes.
    pub result: u32,
    /// Individual dice rolled so far this roll.
    pub dice: SmallVec<[u32; 2]>,
    /// First half of a double-dice roll. Roll again to finish it.
    pub is_partial: bool,
}

/// Result of passing the turn.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum TurnAdvance {
    /// The turn passed to `player`. `skipped` lists players passed over.
    Next { player: PlayerId, skipped: Vec<PlayerId> },
    /// No player was eligible within one round. The turn pointer stays put,
    /// unless its holder has left.
    Stalemate { skipped: Vec<PlayerId> },
}

impl TurnAdvance {
    /// The player now holding the turn, if it moved.
    #[must_use]
    pub fn next_player(&self) -> Option<PlayerId> {
        match self {
            TurnAdvance::Next { player, .. } => Some(*player),
            TurnAdvance::Stalemate { .. } => None,
        }
    }
}

/// End-of-game report.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameReport {
    pub duration_minutes: i64,
    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: DateTime<Utc>,
    pub players: Vec<Player>,
    pub history: Vector<HistoryEntry>,
    pub dice_rolls: usize,
    pub cards_drawn: usize,
}

impl Session {
    /// Start the game: build fresh decks and give the turn to the first
    /// player to join.
    pub fn start_game(&mut self) -> Result<PlayerId> {
        match self.status {
            SessionStatus::InProgress => return Err(GameError::AlreadyStarted),
            SessionStatus::Finished => return Err(GameError::GameFinished),
            SessionStatus::Waiting => {}
        }
        let first = self.players.first().map(|p| p.id).ok_or(GameError::NoPlayers)?;

        self.decks.build(&self.library);
        self.status = SessionStatus::InProgress;
        self.current_turn = Some(first);
        self.turn_number = 1;
        self.scratch = TurnScratch::default();
        self.started_at = Some(Utc::now());
        self.finished_at = None;

        let count = self.players.len();
        self.record(None, HistoryAction::GameStarted, format!("Game started with {count} players"), json!({ "players": count }));
        info!(players = count, first = %first, "game started");
        Ok(first)
    }

    /// Roll for the current player.
    ///
    /// With double-dice turns left, a roll takes two calls: the first
    /// returns a partial result and keeps the die, the second adds a
    /// second die and spends one double-dice turn. The player cannot move
    /// in between, and passing the turn drops the kept die.
    pub fn roll_dice(&mut self, id: PlayerId) -> Result<DiceRoll> {
        self.require_free_turn(id)?;

        let player = self.players.get_mut(id).ok_or(GameError::PlayerNotFound(id))?;
        let roll = if player.status.double_dice_turns > 0 {
            match player.status.pending_first_die.take() {
                None => {
                    let first = self.dice.roll_die();
                    player.status.pending_first_die = Some(first);
                    DiceRoll {
                        result: first,
                        dice: smallvec![first],
                        is_partial: true,
                    }
                }
                Some(first) => {
                    let second = self.dice.roll_die();
                    player.status.double_dice_turns -= 1;
                    DiceRoll {
                        result: first + second,
                        dice: smallvec![first, second],
                        is_partial: false,
                    }
                }
            }
        } else {
            let die = self.dice.roll_die();
            DiceRoll {
                result: die,
                dice: smallvec![die],
                is_partial: false,
            }
        };

        if !roll.is_partial {
            self.scratch.last_roll = Some(roll.result);
        }
        debug!(player = %id, result = roll.result, partial = roll.is_partial, "dice rolled");

        let name = self.player(id)?.name.clone();
        let message = if roll.is_partial {
            format!("{name} rolled {} (first of two dice)", roll.result)
        } else {
            format!("{name} rolled {}", roll.result)
        };
        self.record(
            Some(id),
            HistoryAction::DiceRolled,
            message,
            json!({ "result": roll.result, "dice": roll.dice.as_slice(), "is_partial": roll.is_partial }),
        );
        Ok(roll)
    }

    /// Pass the turn to the next eligible player in join order.
    pub fn advance_turn(&mut self) -> Result<TurnAdvance> {
        self.require_in_progress()?;
        Ok(self.end_turn())
    }

    /// Pass the turn on from the current player.
    pub(crate) fn end_turn(&mut self) -> TurnAdvance {
        let from = self
            .current_turn
            .and_then(|id| self.players.index_of(id))
            .unwrap_or(self.players.len().saturating_sub(1));
        self.advance_from(from)
    }

    /// Pass the turn to the first eligible player after index `from`.
    ///
    /// Sleeping players are passed over for free, and listed once. A player
    /// with skipped turns is passed over and spends one. At most
    /// `players + 1` candidates are considered (`players` when the outgoing
    /// player has left), so a table where everyone is asleep or skipping
    /// more than one round ends in a stalemate rather than a loop.
    ///
    /// The outgoing player loses any half-rolled double dice.
    pub(crate) fn advance_from(&mut self, from: usize) -> TurnAdvance {
        self.scratch = TurnScratch::default();
        if self.players.is_empty() {
            return TurnAdvance::Stalemate { skipped: Vec::new() };
        }

        let len = self.players.len();
        let candidates = match self.current_turn.and_then(|id| self.players.get_mut(id)) {
            Some(player) => {
                player.status.pending_first_die = None;
                len + 1
            }
            None => len,
        };

        let mut idx = from;
        let mut skipped = Vec::new();
        for _ in 0..candidates {
            idx = self.players.next_index(idx);
            let Some(player) = self.players.at_mut(idx) else {
                break;
            };

            if player.status.sleeping {
                if skipped.contains(&player.id) {
                    continue;
                }
                skipped.push(player.id);
                let msg = format!("{} is asleep and misses the turn", player.name);
                self.history.record(Some(&*player), HistoryAction::TurnSkipped, msg, json!({ "reason": "sleeping" }));
                continue;
            }

            if player.status.skipped_turns > 0 {
                player.status.skipped_turns -= 1;
                skipped.push(player.id);
                let msg = format!("{} skips a turn", player.name);
                let remaining = player.status.skipped_turns;
                self.history.record(
                    Some(&*player),
                    HistoryAction::TurnSkipped,
                    msg,
                    json!({ "reason": "skip", "remaining": remaining }),
                );
                self.notifications.push(Notification::TurnSkipped {
                    player: player.id,
                    name: player.name.clone(),
                });
                continue;
            }

            let next = player.id;
            self.current_turn = Some(next);
            self.turn_number += 1;
            debug!(player = %next, turn = self.turn_number, "turn advanced");
            return TurnAdvance::Next { player: next, skipped };
        }

        // A departed holder hands the pointer to the seat after theirs.
        if self.current_turn.and_then(|id| self.players.index_of(id)).is_none() {
            self.current_turn = self.players.at(self.players.next_index(from)).map(|p| p.id);
        }
        warn!(candidates = skipped.len(), "no eligible player, turn stalemate");
        self.record(
            None,
            HistoryAction::TurnStalemate,
            "No player can take the turn",
            json!({ "skipped": skipped }),
        );
        self.notifications.push(Notification::Stalemate);
        TurnAdvance::Stalemate { skipped }
    }

    /// Finish the game and report on it.
    pub fn end_game(&mut self) -> Result<GameReport> {
        self.require_in_progress()?;

        let finished_at = Utc::now();
        self.status = SessionStatus::Finished;
        self.finished_at = Some(finished_at);
        self.current_turn = None;
        self.scratch = TurnScratch::default();

        let duration_minutes = self
            .started_at
            .map_or(0, |start| (finished_at - start).num_minutes().max(0));
        self.record(
            None,
            HistoryAction::GameEnded,
            format!("Game ended after {duration_minutes} minutes"),
            json!({ "duration_minutes": duration_minutes }),
        );
        info!(duration_minutes, "game ended");

        Ok(GameReport {
            duration_minutes,
            started_at: self.started_at,
            finished_at,
            players: self.players.iter().cloned().collect(),
            history: self.history.entries(),
            dice_rolls: self.history.count(HistoryAction::DiceRolled),
            cards_drawn: self.history.count(HistoryAction::CardDrawn),
        })
    }
}

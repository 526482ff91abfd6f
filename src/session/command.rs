//! Transport-facing command dispatch.
//!
//! Commands and results are serde-tagged so a transport can decode a
//! command from JSON, run it, and encode the result without knowing the
//! individual session methods.

use serde::{Deserialize, Serialize};

use super::cards::Resolution;
use super::movement::MoveOutcome;
use super::players::Removal;
use super::state::Session;
use super::turn::{DiceRoll, GameReport, TurnAdvance};
use crate::board::{CellId, DreamId, Walk};
use crate::cards::{CardCategory, ClientCard};
use crate::core::{CoinSide, DreamTarget, Player, PlayerId, Result};
use crate::finance::IncomeOutcome;

/// A player or host command.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum Command {
    AddPlayer { name: String },
    RemovePlayer { player: PlayerId },
    SelectDream { player: PlayerId, dream: DreamId },
    SetSleeping { player: PlayerId, sleeping: bool },
    StartGame,
    EndGame,
    Reset,
    RollDice { player: PlayerId },
    MovePlayer { player: PlayerId, steps: u32 },
    PredictMove { player: PlayerId, steps: u32 },
    SetForkDirection { player: PlayerId, side: CoinSide },
    FlipForkCoin { player: PlayerId },
    CollectPassedIncome { player: PlayerId, cell: CellId },
    DrawCard { player: PlayerId, category: CardCategory },
    Acknowledge { player: PlayerId },
    ResolvePurchase { player: PlayerId, accept: bool },
    ResolveSale { player: PlayerId, accept: bool },
    ResolveCharity { player: PlayerId, accept: bool },
    ResolveDreamAsset { player: PlayerId, buy: bool },
    SubmitChoice { player: PlayerId, option: String },
    AdvanceTurn,
}

/// Result of a command.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum CommandResult {
    Joined { player: Player },
    Removed { removal: Removal },
    DreamSelected { dream: DreamTarget },
    Started { first: PlayerId },
    Ended { report: GameReport },
    Done,
    Rolled { roll: DiceRoll },
    Moved { outcome: MoveOutcome },
    Predicted { walk: Walk },
    Coin { side: CoinSide },
    Income { outcome: IncomeOutcome },
    Card { card: ClientCard },
    Resolved { resolution: Resolution },
    Turn { advance: TurnAdvance },
}

impl Session {
    /// Run one command.
    pub fn execute(&mut self, command: Command) -> Result<CommandResult> {
        let result = match command {
            Command::AddPlayer { name } => CommandResult::Joined {
                player: self.add_player(name)?,
            },
            Command::RemovePlayer { player } => CommandResult::Removed {
                removal: self.remove_player(player)?,
            },
            Command::SelectDream { player, dream } => CommandResult::DreamSelected {
                dream: self.select_dream(player, dream)?,
            },
            Command::SetSleeping { player, sleeping } => {
                self.set_sleeping(player, sleeping)?;
                CommandResult::Done
            }
            Command::StartGame => CommandResult::Started {
                first: self.start_game()?,
            },
            Command::EndGame => CommandResult::Ended {
                report: self.end_game()?,
            },
            Command::Reset => {
                self.reset();
                CommandResult::Done
            }
            Command::RollDice { player } => CommandResult::Rolled {
                roll: self.roll_dice(player)?,
            },
            Command::MovePlayer { player, steps } => CommandResult::Moved {
                outcome: self.move_player(player, steps)?,
            },
            Command::PredictMove { player, steps } => CommandResult::Predicted {
                walk: self.predict_move(player, steps)?,
            },
            Command::SetForkDirection { player, side } => {
                self.set_fork_direction(player, side)?;
                CommandResult::Coin { side }
            }
            Command::FlipForkCoin { player } => CommandResult::Coin {
                side: self.flip_fork_coin(player)?,
            },
            Command::CollectPassedIncome { player, cell } => CommandResult::Income {
                outcome: self.collect_passed_income(player, cell)?,
            },
            Command::DrawCard { player, category } => CommandResult::Card {
                card: self.draw_card(player, category)?,
            },
            Command::Acknowledge { player } => CommandResult::Resolved {
                resolution: self.acknowledge(player)?,
            },
            Command::ResolvePurchase { player, accept } => CommandResult::Resolved {
                resolution: self.resolve_purchase_choice(player, accept)?,
            },
            Command::ResolveSale { player, accept } => CommandResult::Resolved {
                resolution: self.resolve_sale_choice(player, accept)?,
            },
            Command::ResolveCharity { player, accept } => CommandResult::Resolved {
                resolution: self.resolve_charity_choice(player, accept)?,
            },
            Command::ResolveDreamAsset { player, buy } => CommandResult::Resolved {
                resolution: self.resolve_dream_asset_choice(player, buy)?,
            },
            Command::SubmitChoice { player, option } => CommandResult::Resolved {
                resolution: self.submit_choice(player, &option)?,
            },
            Command::AdvanceTurn => CommandResult::Turn {
                advance: self.advance_turn()?,
            },
        };
        Ok(result)
    }
}

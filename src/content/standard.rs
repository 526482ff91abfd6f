//! The built-in board, rules and card decks.
//!
//! A 22-cell loop. The fork on cell 6 splits into a business branch
//! (heads) and an expenses branch (tails) that rejoin on cell 12.

use crate::board::{BoardGraph, CellRules};
use crate::cards::CardLibrary;
use crate::core::{Result, SessionConfig};
use crate::finance::Wallets;
use crate::session::SessionBuilder;

pub const BOARD_JSON: &str = include_str!("standard/board.json");
pub const RULES_JSON: &str = include_str!("standard/rules.json");
pub const CARDS_JSON: &str = include_str!("standard/cards.json");

/// Monthly salary paid on start and money cells.
pub const SALARY: u64 = 1000;

pub fn board() -> Result<BoardGraph> {
    BoardGraph::from_json_str(BOARD_JSON)
}

pub fn rules() -> Result<CellRules> {
    CellRules::from_json_str(RULES_JSON)
}

pub fn library() -> Result<CardLibrary> {
    CardLibrary::from_json_str(CARDS_JSON)
}

/// Default configuration: a salary on income cells and a small starting
/// balance already split the usual way.
#[must_use]
pub fn config() -> SessionConfig {
    SessionConfig::default()
        .with_base_income(SALARY)
        .with_starting_wallets(Wallets::new(100, 200, 100, 600))
}

/// Builder preloaded with the standard content and config.
pub fn builder() -> Result<SessionBuilder> {
    Ok(SessionBuilder::new()
        .config(config())
        .board(board()?)
        .rules(rules()?)
        .library(library()?))
}

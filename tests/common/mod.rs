//! Shared fixtures for integration tests.
//!
//! A small board with fixed cells, so every test knows where a move lands:
//!
//! ```text
//! 0 start -> 1 chance -> 2 money -> 3 expenses -> 4 money -> 5 news -> 6 fork
//!   heads: 7 charity -> 8 dream(Bicycle) -> 9 normal -> 0
//!   tails: 10 business -> 11 dream(any) -> 12 dream(Piano) -> 0
//! ```

#![allow(dead_code)]

use finboard::board::{BoardGraph, Cell, CellId, CellKind, CellRules, DreamDefinition, DreamId};
use finboard::cards::{CardCategory, CardDefinition, CardId, CardLibrary};
use finboard::core::{PlayerId, SessionConfig};
use finboard::effects::Effect;
use finboard::finance::Wallets;
use finboard::session::{Session, SessionBuilder};

pub const START: CellId = CellId::new(0);
pub const CHANCE: CellId = CellId::new(1);
pub const MONEY_A: CellId = CellId::new(2);
pub const EXPENSES: CellId = CellId::new(3);
pub const MONEY_B: CellId = CellId::new(4);
pub const NEWS: CellId = CellId::new(5);
pub const FORK: CellId = CellId::new(6);
pub const CHARITY: CellId = CellId::new(7);
pub const BICYCLE_CELL: CellId = CellId::new(8);
pub const QUIET: CellId = CellId::new(9);
pub const BUSINESS: CellId = CellId::new(10);
pub const ANY_DREAM: CellId = CellId::new(11);
pub const PIANO_CELL: CellId = CellId::new(12);

pub const BICYCLE: DreamId = DreamId::new(1);
pub const PIANO: DreamId = DreamId::new(2);

/// Steps from start to the fork.
pub const TO_FORK: u32 = 6;

pub fn board() -> BoardGraph {
    let c = CellId::new;
    BoardGraph::new(
        START,
        vec![
            Cell::new(c(0), CellKind::Start, c(1)),
            Cell::new(c(1), CellKind::Chance, c(2)),
            Cell::new(c(2), CellKind::Money, c(3)),
            Cell::new(c(3), CellKind::Expenses, c(4)),
            Cell::new(c(4), CellKind::Money, c(5)),
            Cell::new(c(5), CellKind::News, c(6)),
            Cell::fork(c(6), c(7), c(10)),
            Cell::new(c(7), CellKind::Charity, c(8)),
            Cell::new(c(8), CellKind::Dream, c(9)).with_dream(BICYCLE),
            Cell::new(c(9), CellKind::Normal, c(0)).with_label("Quiet street"),
            Cell::new(c(10), CellKind::Business, c(11)),
            Cell::new(c(11), CellKind::Dream, c(12)),
            Cell::new(c(12), CellKind::Dream, c(0)).with_dream(PIANO),
        ],
        vec![
            DreamDefinition::new(BICYCLE, "Bicycle", 500),
            DreamDefinition::new(PIANO, "Piano", 2000),
        ],
    )
    .unwrap()
}

/// A card with the given effect, ids assigned by the library.
pub fn card(category: CardCategory, title: &str, effect: Effect) -> CardDefinition {
    CardDefinition::new(CardId::new(0), category, title).with_effect(effect)
}

pub fn library(cards: Vec<CardDefinition>) -> CardLibrary {
    let mut library = CardLibrary::new();
    for card in cards {
        library.register_auto(card);
    }
    library
}

/// The given cards plus a do-nothing card for every category they leave
/// empty, so each card cell on the board has a deck.
pub fn stocked(mut cards: Vec<CardDefinition>) -> CardLibrary {
    for category in CardCategory::ALL {
        if !cards.iter().any(|c| c.category == category) {
            cards.push(card(category, "Quiet day", Effect::Nothing));
        }
    }
    library(cards)
}

pub fn config(wallets: Wallets) -> SessionConfig {
    SessionConfig::default()
        .with_seed(42)
        .with_starting_wallets(wallets)
}

/// A waiting session with the given players joined.
pub fn waiting(names: &[&str], config: SessionConfig, cards: Vec<CardDefinition>) -> (Session, Vec<PlayerId>) {
    waiting_with_rules(names, config, cards, CellRules::with_default_kinds())
}

pub fn waiting_with_rules(
    names: &[&str],
    config: SessionConfig,
    cards: Vec<CardDefinition>,
    rules: CellRules,
) -> (Session, Vec<PlayerId>) {
    let mut session = SessionBuilder::new()
        .config(config)
        .board(board())
        .rules(rules)
        .library(stocked(cards))
        .build()
        .unwrap();
    let ids = names
        .iter()
        .map(|name| session.add_player(*name).unwrap().id)
        .collect();
    (session, ids)
}

/// A started session with the given players.
pub fn started(names: &[&str], config: SessionConfig, cards: Vec<CardDefinition>) -> (Session, Vec<PlayerId>) {
    let (mut session, ids) = waiting(names, config, cards);
    session.start_game().unwrap();
    (session, ids)
}

/// A started single-player session. The turn always comes back to them.
pub fn solo(wallets: Wallets, cards: Vec<CardDefinition>) -> (Session, PlayerId) {
    let (session, ids) = started(&["Ada"], config(wallets), cards);
    (session, ids[0])
}

pub fn wallets(session: &Session, id: PlayerId) -> Wallets {
    session.player(id).unwrap().wallets
}

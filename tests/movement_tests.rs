//! Movement integration tests: forks, passed income, predictions.

mod common;

use common::*;
use finboard::board::CellKind;
use finboard::cards::CardCategory;
use finboard::core::{CoinSide, GameError, HistoryAction};
use finboard::effects::Effect;
use finboard::finance::{IncomeOutcome, Wallets};
use finboard::session::{LandingAction, TurnAdvance};

// =============================================================================
// Forks
// =============================================================================

/// Landing on a fork ends the turn and lists both paths.
#[test]
fn test_reaching_fork_ends_turn() {
    let (mut session, ada) = solo(Wallets::default(), vec![]);

    let moved = session.move_player(ada, TO_FORK).unwrap();

    assert_eq!(moved.cell, FORK);
    assert_eq!(moved.kind, CellKind::Fork);
    assert_eq!(
        moved.landing.action,
        LandingAction::ChoosePath { edges: vec![CHARITY, BUSINESS] }
    );
    assert!(moved.landing.ends_turn);
    assert_eq!(moved.turn, Some(TurnAdvance::Next { player: ada, skipped: vec![] }));
}

/// Heads takes edge 0 for the first step, the rest follow default edges.
#[test]
fn test_fork_heads_then_three_steps() {
    let (mut session, ada) = solo(Wallets::default(), vec![]);
    session.move_player(ada, TO_FORK).unwrap();

    session.set_fork_direction(ada, CoinSide::Heads).unwrap();
    assert_eq!(session.player(ada).unwrap().position.pending_fork, Some(0));

    let moved = session.move_player(ada, 3).unwrap();

    assert_eq!(moved.from, FORK);
    assert_eq!(moved.fork_edge, Some(0));
    assert_eq!(moved.path, vec![CHARITY, BICYCLE_CELL, QUIET]);
    assert_eq!(moved.cell, QUIET);
    assert_eq!(moved.landing.action, LandingAction::Nothing);
    assert_eq!(session.player(ada).unwrap().position.pending_fork, None);
}

/// Tails takes the second edge.
#[test]
fn test_fork_tails() {
    let (mut session, ada) = solo(Wallets::default(), vec![]);
    session.move_player(ada, TO_FORK).unwrap();
    session.set_fork_direction(ada, CoinSide::Tails).unwrap();

    let moved = session.move_player(ada, 2).unwrap();

    assert_eq!(moved.fork_edge, Some(1));
    assert_eq!(moved.path, vec![BUSINESS, ANY_DREAM]);
    assert_eq!(moved.landing.action, LandingAction::DreamNotSelected);
}

/// A direction chosen on an earlier visit never leaks into a later one.
#[test]
fn test_stale_fork_direction_not_reapplied() {
    let (mut session, ada) = solo(Wallets::default(), vec![]);
    session.move_player(ada, TO_FORK).unwrap();
    session.set_fork_direction(ada, CoinSide::Tails).unwrap();
    session.move_player(ada, 3).unwrap();
    session.move_player(ada, 1).unwrap();
    assert_eq!(session.player(ada).unwrap().position.cell, START);

    // Back on the fork without choosing: default edge (heads).
    session.move_player(ada, TO_FORK).unwrap();
    let moved = session.move_player(ada, 1).unwrap();

    assert_eq!(moved.fork_edge, None);
    assert_eq!(moved.cell, CHARITY);
}

/// The coin result is applied as the fork direction.
#[test]
fn test_flip_coin_sets_direction() {
    let (mut session, ada) = solo(Wallets::default(), vec![]);
    session.move_player(ada, TO_FORK).unwrap();

    let side = session.flip_fork_coin(ada).unwrap();

    assert_eq!(session.player(ada).unwrap().position.pending_fork, Some(side.edge_index()));
    assert_eq!(session.history().last().unwrap().action, HistoryAction::ForkChosen);
}

/// Directions can only be set while standing on a fork.
#[test]
fn test_fork_direction_off_fork() {
    let (mut session, ada) = solo(Wallets::default(), vec![]);

    assert_eq!(session.set_fork_direction(ada, CoinSide::Heads), Err(GameError::NotAFork(START)));
    assert_eq!(session.flip_fork_coin(ada), Err(GameError::NotAFork(START)));
    assert_eq!(session.player(ada).unwrap().position.pending_fork, None);
}

// =============================================================================
// Passed income
// =============================================================================

/// A money cell passed mid-move is collectible; the landing cell is not.
#[test]
fn test_passed_money_cell_excludes_landing() {
    let (mut session, ids) = started(&["Ada"], config(Wallets::default()).with_base_income(1000), vec![]);
    let ada = ids[0];

    let moved = session.move_player(ada, 4).unwrap();

    assert_eq!(moved.path, vec![CHANCE, MONEY_A, EXPENSES, MONEY_B]);
    assert_eq!(moved.passed_money_cells, vec![MONEY_A]);
    assert_eq!(
        moved.landing.action,
        LandingAction::IncomeCollected {
            amount: 1000,
            split: Wallets::new(100, 200, 100, 600),
        }
    );
    assert_eq!(session.collectible_cells(ada), vec![MONEY_A]);

    let collected = session.collect_passed_income(ada, MONEY_A).unwrap();
    assert_eq!(
        collected,
        IncomeOutcome::Distributed { split: Wallets::new(100, 200, 100, 600) }
    );
    assert_eq!(wallets(&session, ada), Wallets::new(200, 400, 200, 1200));
}

/// Each passed cell pays once.
#[test]
fn test_passed_income_collected_once() {
    let (mut session, ids) = started(&["Ada"], config(Wallets::default()).with_base_income(1000), vec![]);
    let ada = ids[0];
    session.move_player(ada, 4).unwrap();

    session.collect_passed_income(ada, MONEY_A).unwrap();
    let before = wallets(&session, ada);

    assert_eq!(session.collect_passed_income(ada, MONEY_A), Err(GameError::NotCollectible(MONEY_A)));
    assert_eq!(session.collect_passed_income(ada, MONEY_B), Err(GameError::NotCollectible(MONEY_B)));
    assert_eq!(wallets(&session, ada), before);
    assert!(session.collectible_cells(ada).is_empty());
}

/// A new move replaces what the previous move passed.
#[test]
fn test_new_move_replaces_passed_cells() {
    let (mut session, ada) = solo(Wallets::default(), vec![]);
    session.move_player(ada, 4).unwrap();
    assert_eq!(session.collectible_cells(ada), vec![MONEY_A]);

    let moved = session.move_player(ada, 2).unwrap();

    assert!(moved.passed_money_cells.is_empty());
    assert_eq!(session.collect_passed_income(ada, MONEY_A), Err(GameError::NotCollectible(MONEY_A)));
}

/// Passing start counts, and collecting does not wait for the pending draw.
#[test]
fn test_passing_start_is_collectible() {
    let cards = vec![card(CardCategory::Chance, "Quiet day", Effect::Nothing)];
    let (mut session, ids) = started(&["Ada"], config(Wallets::default()).with_base_income(1000), cards);
    let ada = ids[0];
    session.move_player(ada, TO_FORK).unwrap();
    session.set_fork_direction(ada, CoinSide::Tails).unwrap();
    session.move_player(ada, 3).unwrap();

    let moved = session.move_player(ada, 2).unwrap();

    assert_eq!(moved.path, vec![START, CHANCE]);
    assert_eq!(moved.passed_money_cells, vec![START]);
    assert_eq!(moved.landing.action, LandingAction::DrawCard { category: CardCategory::Chance });

    let collected = session.collect_passed_income(ada, START).unwrap();
    assert!(matches!(collected, IncomeOutcome::Distributed { .. }));
}

// =============================================================================
// Prediction and validation
// =============================================================================

/// Predicting changes nothing and agrees with the committed move.
#[test]
fn test_predict_matches_move() {
    let (mut session, ada) = solo(Wallets::default(), vec![]);
    session.move_player(ada, TO_FORK).unwrap();
    session.set_fork_direction(ada, CoinSide::Tails).unwrap();
    let history_len = session.history().len();

    let predicted = session.predict_move(ada, 3).unwrap();

    assert_eq!(predicted.landing, PIANO_CELL);
    assert_eq!(predicted.fork_edge, Some(1));
    assert_eq!(session.history().len(), history_len);
    let position = &session.player(ada).unwrap().position;
    assert_eq!(position.cell, FORK);
    assert_eq!(position.pending_fork, Some(1));

    let moved = session.move_player(ada, 3).unwrap();
    assert_eq!(moved.cell, predicted.landing);
    assert_eq!(moved.path, predicted.path);
    assert_eq!(moved.passed_money_cells, predicted.passed_money_cells);
}

/// A zero-step move is rejected without side effects.
#[test]
fn test_zero_steps_rejected() {
    let (mut session, ada) = solo(Wallets::default(), vec![]);
    let history_len = session.history().len();

    assert_eq!(session.move_player(ada, 0), Err(GameError::InvalidSteps));
    assert_eq!(session.player(ada).unwrap().position.cell, START);
    assert_eq!(session.history().len(), history_len);
}

/// Only the current player may move.
#[test]
fn test_move_out_of_turn() {
    let (mut session, ids) = started(&["Ada", "Bo"], config(Wallets::default()), vec![]);

    let err = session.move_player(ids[1], 2).unwrap_err();

    assert_eq!(err, GameError::NotYourTurn { player: ids[1], current: Some(ids[0]) });
    assert_eq!(session.player(ids[1]).unwrap().position.cell, START);
}

/// Moves wait until the pending card draw is done.
#[test]
fn test_move_blocked_by_pending_draw() {
    let cards = vec![card(CardCategory::Chance, "Quiet day", Effect::Nothing)];
    let (mut session, ada) = solo(Wallets::default(), cards);
    session.move_player(ada, 1).unwrap();

    assert_eq!(session.move_player(ada, 1), Err(GameError::DecisionPending("card draw")));
    assert_eq!(session.roll_dice(ada), Err(GameError::DecisionPending("card draw")));
    assert_eq!(session.player(ada).unwrap().position.cell, CHANCE);
}

/// Nothing moves before the game starts.
#[test]
fn test_move_before_start() {
    let (mut session, ids) = waiting(&["Ada"], config(Wallets::default()), vec![]);

    assert_eq!(session.move_player(ids[0], 1), Err(GameError::NotInProgress));
}

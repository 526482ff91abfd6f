//! Session lifecycle integration tests, plus a full game on the standard board.

mod common;

use common::*;
use finboard::board::DreamId;
use finboard::cards::CardCategory;
use finboard::content::standard;
use finboard::core::{GameError, HistoryAction, PlayerId};
use finboard::effects::{Effect, Offer};
use finboard::finance::Wallets;
use finboard::session::{Awaiting, Command, CommandResult, Pending, Session, SessionSnapshot, SessionStatus};

// =============================================================================
// Lobby
// =============================================================================

/// Joiners get colours in join order; the first one hosts.
#[test]
fn test_join_order_and_host() {
    let (session, ids) = waiting(&["Ada", "Bo", "Cy"], config(Wallets::new(1, 2, 3, 4)), vec![]);

    let players: Vec<_> = ids.iter().map(|&id| session.player(id).unwrap()).collect();
    assert_eq!(players.iter().map(|p| p.color.as_str()).collect::<Vec<_>>(), vec!["red", "blue", "green"]);
    assert_eq!(players.iter().map(|p| p.join_order).collect::<Vec<_>>(), vec![0, 1, 2]);
    assert_eq!(players.iter().filter(|p| p.is_host).count(), 1);
    assert!(players[0].is_host);
    assert!(players.iter().all(|p| p.position.cell == START));
    assert!(players.iter().all(|p| p.wallets == Wallets::new(1, 2, 3, 4)));
    assert_eq!(session.status(), SessionStatus::Waiting);
}

/// The session refuses joiners past its capacity.
#[test]
fn test_session_full() {
    let (mut session, _) = waiting(&["Ada", "Bo"], config(Wallets::default()).with_max_players(2), vec![]);

    assert_eq!(session.add_player("Cy").unwrap_err(), GameError::SessionFull(2));
    assert_eq!(session.players().len(), 2);
}

/// Nobody joins a running game.
#[test]
fn test_join_after_start() {
    let (mut session, _) = started(&["Ada"], config(Wallets::default()), vec![]);

    assert_eq!(session.add_player("Bo").unwrap_err(), GameError::AlreadyStarted);
}

/// Starting needs players and only works once.
#[test]
fn test_start_rules() {
    let (mut session, _) = waiting(&[], config(Wallets::default()), vec![]);
    assert_eq!(session.start_game(), Err(GameError::NoPlayers));

    let ada = session.add_player("Ada").unwrap().id;
    assert_eq!(session.start_game(), Ok(ada));
    assert_eq!(session.turn_number(), 1);
    assert!(session.started_at().is_some());
    assert_eq!(session.start_game(), Err(GameError::AlreadyStarted));
}

/// A dream is picked once, from the catalogue.
#[test]
fn test_select_dream() {
    let (mut session, ids) = waiting(&["Ada"], config(Wallets::default()), vec![]);

    let target = session.select_dream(ids[0], BICYCLE).unwrap();
    assert_eq!(target.name, "Bicycle");
    assert_eq!(target.price, 500);
    assert!(!target.acquired);

    assert_eq!(session.select_dream(ids[0], PIANO).unwrap_err(), GameError::DreamAlreadySelected(ids[0]));

    let bo = session.add_player("Bo").unwrap().id;
    let unknown = DreamId::new(9);
    assert_eq!(session.select_dream(bo, unknown).unwrap_err(), GameError::UnknownDream(unknown));
}

// =============================================================================
// End and reset
// =============================================================================

/// Ending the game reports on it and freezes the session until reset.
#[test]
fn test_end_game_then_reset() {
    let (mut session, ada) = solo(Wallets::default(), vec![]);
    session.roll_dice(ada).unwrap();
    session.roll_dice(ada).unwrap();

    let report = session.end_game().unwrap();

    assert_eq!(report.dice_rolls, 2);
    assert_eq!(report.cards_drawn, 0);
    assert_eq!(report.players.len(), 1);
    assert!(report.duration_minutes >= 0);
    assert_eq!(report.history.last().map(|e| e.action), Some(HistoryAction::GameEnded));
    assert_eq!(session.status(), SessionStatus::Finished);
    assert_eq!(session.current_turn(), None);

    assert_eq!(session.roll_dice(ada), Err(GameError::GameFinished));
    assert_eq!(session.start_game(), Err(GameError::GameFinished));
    assert_eq!(session.add_player("Bo").unwrap_err(), GameError::GameFinished);
    assert_eq!(session.end_game().unwrap_err(), GameError::GameFinished);

    session.reset();

    assert_eq!(session.status(), SessionStatus::Waiting);
    assert!(session.players().is_empty());
    assert!(session.history().is_empty());
    let bo = session.add_player("Bo").unwrap();
    assert_eq!(bo.id, PlayerId::new(0));
    assert!(bo.is_host);
}

/// A reset session rolls on fresh dice rather than replaying the old game.
#[test]
fn test_reset_uses_fresh_dice() {
    let rolls = |session: &mut Session| {
        let ada = session.add_player("Ada").unwrap().id;
        session.start_game().unwrap();
        (0..12).map(|_| session.roll_dice(ada).unwrap().result).collect::<Vec<_>>()
    };
    let (mut session, _) = waiting(&[], config(Wallets::default()), vec![]);

    let first = rolls(&mut session);
    session.reset();
    let second = rolls(&mut session);

    assert_ne!(first, second);
}

// =============================================================================
// Transport surface
// =============================================================================

/// Commands decoded from JSON drive the session.
#[test]
fn test_json_command_script() {
    let mut session = standard::builder().unwrap().seed(4).build().unwrap();
    let script = [
        r#"{ "command": "add_player", "name": "Ada" }"#,
        r#"{ "command": "select_dream", "player": 0, "dream": 1 }"#,
        r#"{ "command": "start_game" }"#,
        r#"{ "command": "predict_move", "player": 0, "steps": 2 }"#,
    ];

    let results: Vec<CommandResult> = script
        .iter()
        .map(|json| session.execute(serde_json::from_str::<Command>(json).unwrap()).unwrap())
        .collect();

    assert!(matches!(results[0], CommandResult::Joined { .. }));
    assert!(matches!(results[1], CommandResult::DreamSelected { .. }));
    assert_eq!(results[2], CommandResult::Started { first: PlayerId::new(0) });
    let encoded = serde_json::to_value(&results[3]).unwrap();
    assert_eq!(encoded["result"], "predicted");
    assert_eq!(encoded["walk"]["path"].as_array().map(Vec::len), Some(2));
}

/// The snapshot reports what the turn waits on and survives bincode.
#[test]
fn test_snapshot_reports_awaiting() {
    let cards = vec![card(CardCategory::Chance, "Quiet day", Effect::Nothing)];
    let (mut session, ada) = solo(Wallets::default(), cards);
    assert_eq!(session.snapshot().awaiting, None);

    session.move_player(ada, 1).unwrap();
    assert_eq!(session.snapshot().awaiting, Some(Awaiting::Draw));
    session.draw_card(ada, CardCategory::Chance).unwrap();

    let snapshot = session.snapshot();
    assert_eq!(snapshot.awaiting, Some(Awaiting::Acknowledge));
    let decoded = SessionSnapshot::from_bytes(&snapshot.to_bytes().unwrap()).unwrap();
    assert_eq!(decoded, snapshot);
}

/// The log feed returns entries from a given id onwards.
#[test]
fn test_log_feed_since() {
    let (mut session, ada) = solo(Wallets::default(), vec![]);
    let mark = session.history().len() as u64;

    session.roll_dice(ada).unwrap();
    session.move_player(ada, 2).unwrap();

    let feed = session.log_feed(mark);
    assert!(feed.len() >= 2);
    assert_eq!(feed[0].id, mark);
    assert!(feed[0].message.starts_with("Ada rolled"));
}

// =============================================================================
// Full game
// =============================================================================

/// Answer whatever the turn waits on until it is free again.
fn settle(session: &mut Session, id: PlayerId) {
    while let Some(pending) = session.pending().cloned() {
        match pending {
            Pending::Draw { category } => {
                session.draw_card(id, category).unwrap();
            }
            Pending::Card { .. } | Pending::IncomeBlocked { .. } => {
                session.acknowledge(id).unwrap();
            }
            Pending::Offer { offer: Offer::Purchase { .. }, .. } => {
                session.resolve_purchase_choice(id, true).unwrap();
            }
            Pending::Offer { offer: Offer::Sale { .. }, .. } => {
                session.resolve_sale_choice(id, true).unwrap();
            }
            Pending::Offer { offer: Offer::Charity { .. }, .. } => {
                session.resolve_charity_choice(id, true).unwrap();
            }
            Pending::Offer { offer: Offer::DreamAsset { .. }, .. } => {
                panic!("dream assets are offered through their own pending state");
            }
            Pending::Choice { options, .. } => {
                session.submit_choice(id, &options[0].id).unwrap();
            }
            Pending::DreamAsset { .. } => {
                session.resolve_dream_asset_choice(id, true).unwrap();
            }
        }
    }
}

/// Two players on the standard board for many turns: every command
/// succeeds and the session stays consistent throughout.
#[test]
fn test_standard_game_runs() {
    let mut session = standard::builder().unwrap().seed(11).build().unwrap();
    let ada = session.add_player("Ada").unwrap().id;
    let bo = session.add_player("Bo").unwrap().id;
    session.select_dream(ada, DreamId::new(1)).unwrap();
    session.select_dream(bo, DreamId::new(2)).unwrap();
    session.start_game().unwrap();

    let mut history_len = session.history().len();
    for _ in 0..300 {
        let id = session.current_turn().unwrap();
        let cell = session.player(id).unwrap().position.cell;
        if session.board().cell(cell).unwrap().is_fork() {
            session.flip_fork_coin(id).unwrap();
        }

        let mut roll = session.roll_dice(id).unwrap();
        if roll.is_partial {
            roll = session.roll_dice(id).unwrap();
        }
        let moved = session.move_player(id, roll.result).unwrap();
        for passed in moved.passed_money_cells {
            session.collect_passed_income(id, passed).unwrap();
        }
        settle(&mut session, id);

        let current = session.current_turn().unwrap();
        assert!(session.player(current).is_ok());
        for player in session.players().iter() {
            if player.position.pending_fork.is_some() {
                assert!(session.board().cell(player.position.cell).unwrap().is_fork());
            }
        }
        for category in CardCategory::ALL {
            assert!(session.deck_remaining(category) <= session.library().master(category).len());
        }
        assert!(session.history().len() > history_len);
        history_len = session.history().len();
    }

    let report = session.end_game().unwrap();
    assert!(report.dice_rolls >= 300);
    assert!(report.cards_drawn > 0);
    assert_eq!(report.players.len(), 2);
}

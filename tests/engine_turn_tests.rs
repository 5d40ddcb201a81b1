//! Очередь хода и отказ в недопустимых действиях.
//!
//! Любая протокольная ошибка оставляет стол без изменений.

mod common;

use common::{awaited_connection, calling_services, human_table};
use poker_session::domain::Chips;
use poker_session::engine::{start_round, EngineError, SessionEvent, TableSnapshot};

fn started() -> poker_session::engine::SessionEngine {
    let mut t = human_table(&[100, 100, 100], 10, calling_services(11));
    start_round(&mut t).unwrap();
    t.events.drain();
    t
}

#[test]
fn only_current_actor_may_act() {
    let mut t = started();
    let before = t.session.clone();

    assert_eq!(t.submit_action("c1", "CALL"), Err(EngineError::NotYourTurn));
    assert_eq!(t.submit_action("c2", "FOLD"), Err(EngineError::NotYourTurn));
    assert_eq!(t.session, before);
    assert!(t.events.is_empty());
}

#[test]
fn malformed_token_is_rejected() {
    let mut t = started();
    let before = t.session.clone();

    for token in ["CHECK", "raise10", "RAISE", ""] {
        assert!(matches!(
            t.submit_action("c0", token),
            Err(EngineError::MalformedAction(_))
        ));
    }
    assert_eq!(t.session, before);
}

#[test]
fn raise_outside_legal_set_is_rejected() {
    let mut t = started();
    let before = t.session.clone();

    // не кратно бет-юниту
    assert_eq!(t.submit_action("c0", "RAISE15"), Err(EngineError::IllegalAction));
    // больше стека
    assert_eq!(t.submit_action("c0", "RAISE500"), Err(EngineError::IllegalAction));
    assert_eq!(t.session, before);

    assert_eq!(t.submit_action("c0", "RAISE30"), Ok(()));
    assert_eq!(t.session.highest_bid, Chips(40));
}

#[test]
fn unknown_connection_is_rejected() {
    let mut t = started();
    assert_eq!(t.submit_action("stranger", "CALL"), Err(EngineError::UnknownConnection));
}

#[test]
fn no_actions_between_rounds() {
    let mut t = started();
    t.submit_action("c0", "FOLD").unwrap();
    t.submit_action("c1", "FOLD").unwrap();

    assert_eq!(t.submit_action("c2", "CALL"), Err(EngineError::NoActiveRound));
    assert_eq!(t.next_round(), Ok(()));
    assert_eq!(t.next_round(), Err(EngineError::RoundInProgress));
}

#[test]
fn snapshot_is_idempotent() {
    let t = started();
    let a = TableSnapshot::capture(&t.session);
    let b = TableSnapshot::capture(&t.session);
    assert_eq!(a, b);
    assert_eq!(a.pot, Chips(15));
    assert_eq!(a.current_actor, Some(t.session.players[0].id));
    assert!(a.waiting_for_action);
}

#[test]
fn legal_actions_follow_stack() {
    let mut t = human_table(&[25, 100, 100], 10, calling_services(12));
    start_round(&mut t).unwrap();
    let legal: Vec<String> = t.legal_actions().iter().map(ToString::to_string).collect();
    // долг 10, рейз 10 влезает в 25, рейз 20 — нет
    assert_eq!(legal, ["FOLD", "CALL", "RAISE10"]);
}

#[test]
fn snapshots_never_name_a_folded_actor() {
    let mut t = started();
    // префлоп: c1 сбрасывает, BB чекает
    for (conn, token) in [("c0", "CALL"), ("c1", "FOLD"), ("c2", "CALL")] {
        assert_eq!(awaited_connection(&t).as_deref(), Some(conn));
        t.submit_action(conn, token).unwrap();
    }
    // флоп: после c0 внутренний индекс проходит через сброшенное место 1
    for (conn, token) in [("c2", "CALL"), ("c0", "CALL")] {
        assert_eq!(awaited_connection(&t).as_deref(), Some(conn));
        t.submit_action(conn, token).unwrap();
    }

    let folded = t.session.players[1].id;
    let snapshots: Vec<TableSnapshot> = t
        .events
        .drain()
        .into_iter()
        .filter_map(|e| match e {
            SessionEvent::StateChanged(s) | SessionEvent::RoundStarted(s) => Some(s),
            _ => None,
        })
        .collect();
    assert!(!snapshots.is_empty());
    for s in &snapshots {
        assert_ne!(s.current_actor, Some(folded));
        assert_eq!(s.current_actor.is_some(), s.waiting_for_action);
    }

    // тёрн: стол снова ждёт c2, и снимок называет именно его
    let now = TableSnapshot::capture(&t.session);
    assert_eq!(now.current_actor, Some(t.session.players[2].id));
    assert!(now.waiting_for_action);
}

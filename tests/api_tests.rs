//! Проводной формат: команды, события, скрытие чужих карт.

mod common;

use common::{calling_services, human_table};
use poker_session::api::{answer, ApiError, ClientCommand, Query, QueryResponse, ServerEvent, SessionSnapshot};
use poker_session::engine::{start_round, EngineError, SessionEvent, SessionRegistry, TableSnapshot};
use serde_json::json;

#[test]
fn viewer_sees_only_own_hole_cards() {
    let mut t = human_table(&[100, 100, 100], 10, calling_services(31));
    start_round(&mut t).unwrap();
    let snapshot = TableSnapshot::capture(&t.session);
    let me = t.session.players[1].id;

    let view = SessionSnapshot::for_viewer(&snapshot, Some(me));
    for p in &view.players {
        if p.id == me {
            assert!(p.is_you);
            assert_eq!(p.hole_cards.as_ref().map(Vec::len), Some(2));
        } else {
            assert!(!p.is_you);
            assert_eq!(p.hole_cards, None);
        }
    }

    let spectator = SessionSnapshot::for_viewer(&snapshot, None);
    assert!(spectator.players.iter().all(|p| p.hole_cards.is_none()));
}

#[test]
fn showdown_reveals_live_hands() {
    let mut t = human_table(&[100, 100, 100], 10, calling_services(32));
    start_round(&mut t).unwrap();
    t.submit_action("c0", "FOLD").unwrap();
    common::call_down(&mut t);

    let snapshot = t
        .events
        .drain()
        .into_iter()
        .find_map(|e| match e {
            SessionEvent::RoundEnded { snapshot, .. } => Some(snapshot),
            _ => None,
        })
        .unwrap();
    let view = SessionSnapshot::for_viewer(&snapshot, None);
    assert!(view.players[0].hole_cards.is_none());
    assert!(view.players[1].hole_cards.is_some());
    assert!(view.players[2].hole_cards.is_some());
}

#[test]
fn request_action_is_addressed() {
    let mut t = human_table(&[100, 100, 100], 10, calling_services(33));
    start_round(&mut t).unwrap();
    let first = t.session.players[0].id;
    let other = t.session.players[1].id;
    let requested = t
        .events
        .drain()
        .into_iter()
        .find(|e| matches!(e, SessionEvent::ActionRequested { .. }))
        .unwrap();

    let mine = ServerEvent::from_session_event(&requested, Some(first));
    let theirs = ServerEvent::from_session_event(&requested, Some(other));
    assert!(matches!(mine, ServerEvent::RequestAction { your_turn: true, .. }));
    assert!(matches!(theirs, ServerEvent::RequestAction { your_turn: false, .. }));

    let wire: serde_json::Value = serde_json::from_str(&mine.to_json().unwrap()).unwrap();
    assert_eq!(wire["type"], "request_action");
    assert_eq!(wire["legal_actions"], json!(["FOLD", "CALL", "RAISE10", "RAISE20", "RAISE30"]));
}

#[test]
fn server_event_tags() {
    let created = ServerEvent::GameCreated {
        game_id: "1a2b3c4d".into(),
        player_name: "Ann".into(),
    };
    assert_eq!(
        serde_json::to_value(&created).unwrap(),
        json!({"type": "game_created", "game_id": "1a2b3c4d", "player_name": "Ann"})
    );
    assert_eq!(
        serde_json::to_value(ServerEvent::NextRoundPrompt).unwrap(),
        json!({"type": "next_round_prompt"})
    );
    let err = ServerEvent::error(EngineError::NotYourTurn);
    assert_eq!(
        serde_json::to_value(err).unwrap(),
        json!({"type": "error", "message": "Сейчас не ваш ход"})
    );
}

#[test]
fn engine_errors_map_to_api_errors() {
    assert_eq!(
        ApiError::from(EngineError::TableNotFound("x".into())),
        ApiError::TableNotFound("x".into())
    );
    assert!(matches!(ApiError::from(EngineError::GameFull), ApiError::Rejected(_)));
    assert!(matches!(ApiError::from(EngineError::DeckExhausted), ApiError::Internal(_)));
    assert!(matches!(
        ClientCommand::from_json("not json"),
        Err(ApiError::BadRequest(_))
    ));
}

#[test]
fn queries_list_and_show_games() {
    let mut registry = SessionRegistry::new();
    registry
        .create("b".into(), common::config(3, 1, 100, 10), calling_services(1))
        .unwrap();
    registry
        .create("a".into(), common::config(3, 2, 100, 10), calling_services(2))
        .unwrap();
    registry.join("a", "c", "Ann").unwrap();

    let QueryResponse::Games { games } = answer(&registry, &Query::ListGames).unwrap() else {
        panic!("ожидали список игр");
    };
    assert_eq!(games.len(), 2);
    assert_eq!(games[0].game_id, "a");
    assert_eq!(games[0].humans_joined, 1);
    assert_eq!(games[0].humans_needed, 2);

    assert!(matches!(
        answer(&registry, &Query::GetGame { game_id: "zzz".into(), viewer: None }),
        Err(ApiError::TableNotFound(_))
    ));
}

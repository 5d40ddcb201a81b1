//! Реестр столов: вход, старт, закрытие столов.

mod common;

use common::{calling_services, config};
use poker_session::domain::SessionPhase;
use poker_session::engine::{EngineError, SessionEvent, SessionRegistry};
use poker_session::infra::DeterministicRng;

fn registry_with(id: &str, players: u8, humans: u8, chips: u64) -> SessionRegistry {
    let mut registry = SessionRegistry::new();
    registry
        .create(id.to_string(), config(players, humans, chips, 10), calling_services(21))
        .unwrap();
    registry
}

#[test]
fn create_rejects_bad_config_and_duplicates() {
    let mut registry = SessionRegistry::new();
    assert!(matches!(
        registry.create("x".into(), config(1, 1, 100, 10), calling_services(0)),
        Err(EngineError::InvalidConfig(_))
    ));
    registry
        .create("x".into(), config(3, 1, 100, 10), calling_services(0))
        .unwrap();
    assert!(matches!(
        registry.create("x".into(), config(3, 1, 100, 10), calling_services(0)),
        Err(EngineError::TableExists(_))
    ));
}

#[test]
fn join_reports_progress_and_rejects_when_full() {
    let mut registry = registry_with("g", 4, 2, 100);

    let events = registry.join("g", "a", "Ann").unwrap();
    assert_eq!(
        events,
        vec![SessionEvent::PlayerJoined {
            name: "Ann".into(),
            joined: 1,
            needed: 2
        }]
    );
    assert_eq!(registry.join("g", "a", "Ann"), Err(EngineError::AlreadySeated));
    registry.join("g", "b", "Bob").unwrap();
    assert_eq!(registry.join("g", "c", "Cid"), Err(EngineError::GameFull));
    assert_eq!(
        registry.join("nope", "c", "Cid"),
        Err(EngineError::TableNotFound("nope".into()))
    );
}

#[test]
fn start_waits_for_all_humans() {
    let mut registry = registry_with("g", 4, 2, 100);
    let mut rng = DeterministicRng::from_seed(5);
    registry.join("g", "a", "Ann").unwrap();

    assert_eq!(
        registry.start("g", &mut rng),
        Err(EngineError::WaitingForPlayers { missing: 1 })
    );

    registry.join("g", "b", "Bob").unwrap();
    let events = registry.start("g", &mut rng).unwrap();
    assert!(matches!(events.first(), Some(SessionEvent::RoundStarted(_))));

    let table = registry.get("g").unwrap();
    assert_eq!(table.session.players.len(), 4);
    assert_eq!(table.session.players.iter().filter(|p| p.is_human).count(), 2);
    // люди сидят первыми, в порядке входа
    assert_eq!(table.session.players[0].name, "Ann");
    assert_eq!(table.session.players[1].name, "Bob");
    assert!(table.session.players[2..]
        .iter()
        .all(|p| poker_session::domain::BOT_NAMES.contains(&p.name.as_str())));

    assert_eq!(registry.join("g", "c", "Cid"), Err(EngineError::GameAlreadyStarted));
    assert_eq!(registry.start("g", &mut rng), Err(EngineError::GameAlreadyStarted));
}

#[test]
fn game_over_removes_table() {
    // хедз-ап против коллера, стеки по одному BB: игра кончается за раунд
    let mut registry = registry_with("g", 2, 1, 10);
    let mut rng = DeterministicRng::from_seed(9);
    registry.join("g", "a", "Ann").unwrap();
    let mut events = registry.start("g", &mut rng).unwrap();

    if registry.has_table("g") {
        assert_eq!(
            registry.get("g").map(|t| t.session.phase),
            Some(SessionPhase::InRound)
        );
        events = registry.act("g", "a", "CALL").unwrap();
    }

    assert!(!registry.has_table("g"));
    assert!(matches!(events.last(), Some(SessionEvent::GameOver { winner: Some(_) })));
    assert_eq!(
        registry.act("g", "a", "CALL"),
        Err(EngineError::TableNotFound("g".into()))
    );
}

#[test]
fn last_human_leaving_removes_table() {
    let mut registry = registry_with("g", 4, 2, 100);
    registry.join("g", "a", "Ann").unwrap();
    registry.join("g", "b", "Bob").unwrap();

    let left = registry.disconnect("a");
    assert_eq!(left.len(), 1);
    assert_eq!(left[0].1, vec![SessionEvent::PlayerLeft { name: "Ann".into() }]);
    assert!(registry.has_table("g"));

    registry.disconnect("b");
    assert!(!registry.has_table("g"));
    assert!(registry.is_empty());
}

#[test]
fn protocol_errors_keep_the_table() {
    let mut registry = registry_with("g", 3, 1, 100);
    registry.join("g", "a", "Ann").unwrap();
    assert_eq!(registry.next_round("g"), Err(EngineError::NoActiveRound));
    assert_eq!(
        registry.act("g", "a", "FOLD"),
        Err(EngineError::UnknownConnection)
    );
    assert!(registry.has_table("g"));
}

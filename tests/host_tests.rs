//! Асинхронный хост: лобби, воркеры столов, таймаут хода.

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::calling_services;
use poker_session::api::{ApiError, ClientCommand, ServerEvent};
use poker_session::host::{init_test_tracing, HostConfig, Lobby, ServicesFactory};
use poker_session::time_ctrl::TimeRules;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::time::timeout;

fn lobby(timeout_secs: u64) -> Arc<Lobby> {
    init_test_tracing();
    let config = HostConfig {
        time_rules: TimeRules::new(timeout_secs),
        shuffle_passes: 1,
        rng_seed: Some(99),
    };
    let services: ServicesFactory = Arc::new(|seed| calling_services(seed.unwrap_or(0)));
    Arc::new(Lobby::with_services(config, services))
}

fn create(player_name: &str, players: u8, humans: u8) -> ClientCommand {
    ClientCommand::CreateGame {
        player_name: player_name.into(),
        config: common::config(players, humans, 100, 10),
    }
}

/// Ждать событие, подходящее под `pred`, пропуская остальные.
async fn wait_for<F>(rx: &mut UnboundedReceiver<ServerEvent>, pred: F) -> ServerEvent
where
    F: Fn(&ServerEvent) -> bool,
{
    timeout(Duration::from_secs(3600), async {
        loop {
            match rx.recv().await {
                Some(event) if pred(&event) => return event,
                Some(_) => continue,
                None => panic!("поток событий закрыт"),
            }
        }
    })
    .await
    .expect("событие не пришло")
}

async fn game_id(rx: &mut UnboundedReceiver<ServerEvent>) -> String {
    match wait_for(rx, |e| matches!(e, ServerEvent::GameCreated { .. })).await {
        ServerEvent::GameCreated { game_id, .. } => game_id,
        _ => unreachable!(),
    }
}

#[tokio::test(start_paused = true)]
async fn create_join_start_flow() {
    let lobby = lobby(60);
    let (ann, mut ann_rx) = lobby.connect().await;
    let (bob, mut bob_rx) = lobby.connect().await;

    lobby.dispatch(&ann, create("Ann", 3, 2)).await.unwrap();
    let id = game_id(&mut ann_rx).await;
    assert_eq!(id.len(), 8);

    assert!(matches!(
        lobby.dispatch(&ann, ClientCommand::StartGame { game_id: id.clone() }).await,
        Err(ApiError::Rejected(_))
    ));
    wait_for(&mut ann_rx, |e| matches!(e, ServerEvent::Error { .. })).await;

    lobby
        .dispatch(&bob, ClientCommand::JoinGame { game_id: id.clone(), player_name: "Bob".into() })
        .await
        .unwrap();
    let joined = wait_for(&mut ann_rx, |e| matches!(e, ServerEvent::JoinedGame { joined: 2, .. })).await;
    assert_eq!(
        joined,
        ServerEvent::JoinedGame { player_name: "Bob".into(), joined: 2, needed: 2 }
    );

    lobby.dispatch(&bob, ClientCommand::StartGame { game_id: id.clone() }).await.unwrap();
    for rx in [&mut ann_rx, &mut bob_rx] {
        match wait_for(rx, |e| matches!(e, ServerEvent::RoundStarted { .. })).await {
            ServerEvent::RoundStarted { state } => {
                let mine: Vec<_> = state.players.iter().filter(|p| p.hole_cards.is_some()).collect();
                assert_eq!(mine.len(), 1);
                assert!(mine[0].is_you);
            }
            _ => unreachable!(),
        }
    }

    let (carl, _carl_rx) = lobby.connect().await;
    assert!(lobby
        .dispatch(&carl, ClientCommand::JoinGame { game_id: id, player_name: "Carl".into() })
        .await
        .is_err());
}

#[tokio::test(start_paused = true)]
async fn idle_human_is_auto_acted_after_timeout() {
    let lobby = lobby(30);
    let (ann, mut rx) = lobby.connect().await;
    lobby.dispatch(&ann, create("Ann", 3, 1)).await.unwrap();
    let id = game_id(&mut rx).await;
    lobby.dispatch(&ann, ClientCommand::StartGame { game_id: id }).await.unwrap();

    wait_for(&mut rx, |e| matches!(e, ServerEvent::RequestAction { your_turn: true, .. })).await;
    let started = tokio::time::Instant::now();

    let taken = wait_for(&mut rx, |e| {
        matches!(e, ServerEvent::ActionTaken { automatic: true, player_name, .. } if player_name == "Ann")
    })
    .await;
    assert!(started.elapsed() >= Duration::from_secs(30));

    // Ann либо должна доплатить (fold), либо может чекнуть (call)
    match taken {
        ServerEvent::ActionTaken { action, .. } => assert!(action == "FOLD" || action == "CALL"),
        _ => unreachable!(),
    }
}

#[tokio::test(start_paused = true)]
async fn tables_progress_independently() {
    let lobby = lobby(60);
    let (ann, mut ann_rx) = lobby.connect().await;
    let (bob, mut bob_rx) = lobby.connect().await;

    lobby.dispatch(&ann, create("Ann", 3, 1)).await.unwrap();
    lobby.dispatch(&bob, create("Bob", 4, 1)).await.unwrap();
    let a = game_id(&mut ann_rx).await;
    let b = game_id(&mut bob_rx).await;
    assert_ne!(a, b);
    assert_eq!(lobby.table_count().await, 2);

    lobby.dispatch(&ann, ClientCommand::StartGame { game_id: a.clone() }).await.unwrap();
    wait_for(&mut ann_rx, |e| matches!(e, ServerEvent::RequestAction { your_turn: true, .. })).await;

    // стол Боба ещё не стартовал и ничего не получил
    assert!(matches!(bob_rx.try_recv(), Ok(ServerEvent::JoinedGame { .. })));
    assert!(bob_rx.try_recv().is_err());

    // Ann играет за своим столом, пока тот идёт; Боб стартует параллельно
    lobby.dispatch(&bob, ClientCommand::StartGame { game_id: b.clone() }).await.unwrap();
    lobby
        .dispatch(&ann, ClientCommand::PlayerAction { game_id: a.clone(), action: "CALL".into() })
        .await
        .unwrap();
    wait_for(&mut bob_rx, |e| matches!(e, ServerEvent::RequestAction { your_turn: true, .. })).await;

    // чужой стол не принимает действий Боба
    assert!(lobby
        .dispatch(&bob, ClientCommand::PlayerAction { game_id: a, action: "CALL".into() })
        .await
        .is_err());
    assert!(lobby.has_table(&b).await);
}

#[tokio::test(start_paused = true)]
async fn disconnect_of_last_human_closes_table() {
    let lobby = lobby(60);
    let (ann, mut rx) = lobby.connect().await;
    lobby.dispatch(&ann, create("Ann", 3, 1)).await.unwrap();
    let id = game_id(&mut rx).await;
    lobby.dispatch(&ann, ClientCommand::StartGame { game_id: id.clone() }).await.unwrap();

    lobby.disconnect(&ann).await;
    assert!(!lobby.has_table(&id).await);
    assert_eq!(lobby.table_count().await, 0);
}

#[tokio::test(start_paused = true)]
async fn bad_json_gets_error_event() {
    let lobby = lobby(60);
    let (ann, mut rx) = lobby.connect().await;
    assert!(matches!(
        lobby.dispatch_json(&ann, "{\"type\":\"join_game\"}").await,
        Err(ApiError::BadRequest(_))
    ));
    assert!(matches!(rx.recv().await, Some(ServerEvent::Error { .. })));

    assert!(matches!(
        lobby
            .dispatch(&ann, ClientCommand::StartGame { game_id: "deadbeef".into() })
            .await,
        Err(ApiError::TableNotFound(_))
    ));
}

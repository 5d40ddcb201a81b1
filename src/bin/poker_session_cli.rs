// src/bin/poker_session_cli.rs
//
// Прогон нескольких столов через лобби: за каждым столом один "человек"
// (этот CLI, всегда CALL) и боты. Игра идёт до победителя или лимита раундов.
//
// Использование: poker_session_cli [--tables N] [--seats N] [--round-limit N]

use std::sync::Arc;

use clap::Parser;
use poker_session::api::{ClientCommand, ServerEvent};
use poker_session::domain::{Chips, SessionConfig};
use poker_session::host::{init_tracing, HostConfig, Lobby};

#[derive(Parser, Debug)]
#[command(name = "poker_session_cli")]
#[command(about = "Прогон нескольких столов с ботами через лобби")]
struct Args {
    /// Сколько столов запустить
    #[arg(short, long, default_value_t = 3, value_parser = clap::value_parser!(u16).range(1..))]
    tables: u16,

    /// Мест за каждым столом (один человек, остальные боты)
    #[arg(short, long, default_value_t = 4, value_parser = clap::value_parser!(u8).range(2..=10))]
    seats: u8,

    /// После стольких раундов стол останавливается
    #[arg(short, long, default_value_t = 200)]
    round_limit: u32,
}

#[tokio::main]
async fn main() {
    let Args {
        tables,
        seats,
        round_limit,
    } = Args::parse();
    init_tracing();

    let host_config = match HostConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("poker_session_cli: {e}");
            std::process::exit(2);
        }
    };
    let lobby = Arc::new(Lobby::new(host_config));

    println!("poker_session_cli: {tables} стол(а), {seats} мест, лимит {round_limit} раундов");

    let mut tasks = Vec::new();
    for n in 0..usize::from(tables) {
        let lobby = lobby.clone();
        let config = SessionConfig {
            player_count: seats,
            human_count: 1,
            chips_per_player: Chips(100),
            bet_limit: Chips(10),
            full_deck: n % 2 == 0,
        };
        tasks.push(tokio::spawn(play_table(lobby, n + 1, config, round_limit)));
    }

    for task in tasks {
        match task.await {
            Ok(summary) => println!("{summary}"),
            Err(e) => eprintln!("poker_session_cli: таск стола упал: {e}"),
        }
    }
    println!("poker_session_cli: открытых столов осталось {}", lobby.table_count().await);
}

async fn play_table(lobby: Arc<Lobby>, n: usize, config: SessionConfig, round_limit: u32) -> String {
    let (conn, mut events) = lobby.connect().await;
    let name = format!("Player{n}");

    if let Err(e) = lobby
        .dispatch(&conn, ClientCommand::CreateGame { player_name: name.clone(), config })
        .await
    {
        return format!("[стол {n}] не создан: {e}");
    }

    let mut game_id = String::new();
    let mut rounds = 0u32;

    while let Some(event) = events.recv().await {
        match event {
            ServerEvent::GameCreated { game_id: id, .. } => {
                game_id = id;
                let _ = lobby
                    .dispatch(&conn, ClientCommand::StartGame { game_id: game_id.clone() })
                    .await;
            }
            ServerEvent::RequestAction { your_turn: true, legal_actions, .. } => {
                let action = if legal_actions.iter().any(|a| a == "CALL") {
                    "CALL".to_string()
                } else {
                    legal_actions.first().cloned().unwrap_or_else(|| "FOLD".to_string())
                };
                let _ = lobby
                    .dispatch(&conn, ClientCommand::PlayerAction { game_id: game_id.clone(), action })
                    .await;
            }
            ServerEvent::RoundEnded { winner, chips_won, .. } => {
                rounds += 1;
                println!("[стол {n} {game_id}] раунд {rounds}: {winner} забирает {chips_won}");
            }
            ServerEvent::NextRoundPrompt => {
                if rounds >= round_limit {
                    lobby.disconnect(&conn).await;
                    return format!("[стол {n}] остановлен после {rounds} раундов");
                }
                let _ = lobby
                    .dispatch(&conn, ClientCommand::NextRound { game_id: game_id.clone() })
                    .await;
            }
            ServerEvent::GameOver { winner } => {
                lobby.disconnect(&conn).await;
                return format!(
                    "[стол {n}] игра окончена за {rounds} раундов, победитель: {}",
                    winner.unwrap_or_else(|| "-".to_string())
                );
            }
            ServerEvent::Error { message } => {
                println!("[стол {n}] ошибка: {message}");
            }
            _ => {}
        }
    }

    format!("[стол {n}] поток событий закрыт после {rounds} раундов")
}

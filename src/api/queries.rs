use serde::{Deserialize, Serialize};

use crate::domain::{GameSession, PlayerId, SessionPhase, TableId};
use crate::engine::{SessionRegistry, TableSnapshot};

use super::dto::SessionSnapshot;
use super::errors::ApiError;

/// Запросы "только чтение".
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Query {
    GetGame {
        game_id: TableId,
        viewer: Option<PlayerId>,
    },
    ListGames,
}

/// Результат запроса "только чтение".
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum QueryResponse {
    Game { state: SessionSnapshot },
    Games { games: Vec<GameSummary> },
}

/// Строка лобби.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameSummary {
    pub game_id: TableId,
    pub phase: SessionPhase,
    pub humans_joined: usize,
    pub humans_needed: usize,
    pub players: usize,
    pub round: u32,
}

pub fn game_summary(session: &GameSession) -> GameSummary {
    GameSummary {
        game_id: session.id.clone(),
        phase: session.phase,
        humans_joined: session.humans.len(),
        humans_needed: session.config.human_count as usize,
        players: session.players.len(),
        round: session.round,
    }
}

/// Ответить на запрос по синхронному реестру.
pub fn answer(registry: &SessionRegistry, query: &Query) -> Result<QueryResponse, ApiError> {
    match query {
        Query::GetGame { game_id, viewer } => {
            let table = registry
                .get(game_id)
                .ok_or_else(|| ApiError::TableNotFound(game_id.clone()))?;
            let snapshot = TableSnapshot::capture(&table.session);
            Ok(QueryResponse::Game {
                state: SessionSnapshot::for_viewer(&snapshot, *viewer),
            })
        }
        Query::ListGames => {
            let mut games: Vec<GameSummary> = registry
                .tables()
                .map(|t| game_summary(&t.session))
                .collect();
            games.sort_by(|a, b| a.game_id.cmp(&b.game_id));
            Ok(QueryResponse::Games { games })
        }
    }
}

use serde::{Deserialize, Serialize};

use crate::api::errors::ApiError;
use crate::domain::{SessionConfig, TableId};

/// Команда клиента. На проводе — JSON с полем `type`.
///
/// ```json
/// {"type": "player_action", "game_id": "1a2b3c4d", "action": "RAISE10"}
/// ```
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientCommand {
    /// Создать игру и сразу сесть за неё.
    CreateGame {
        player_name: String,
        config: SessionConfig,
    },
    JoinGame {
        game_id: TableId,
        player_name: String,
    },
    StartGame {
        game_id: TableId,
    },
    /// `action` — токен `FOLD` / `CALL` / `RAISE<n>`.
    PlayerAction {
        game_id: TableId,
        action: String,
    },
    NextRound {
        game_id: TableId,
    },
}

impl ClientCommand {
    pub fn from_json(raw: &str) -> Result<Self, ApiError> {
        serde_json::from_str(raw).map_err(ApiError::from)
    }

    /// Игра, к которой относится команда (у `create_game` её ещё нет).
    pub fn game_id(&self) -> Option<&str> {
        match self {
            ClientCommand::CreateGame { .. } => None,
            ClientCommand::JoinGame { game_id, .. }
            | ClientCommand::StartGame { game_id }
            | ClientCommand::PlayerAction { game_id, .. }
            | ClientCommand::NextRound { game_id } => Some(game_id),
        }
    }
}

use serde::{Deserialize, Serialize};

use crate::api::errors::ApiError;
use crate::domain::{Card, Chips, PlayerId, Role, SessionPhase, Street, TableId};
use crate::engine::{PlayerSnapshot, SessionEvent, TableSnapshot};

/// Игрок глазами конкретного зрителя.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerView {
    pub id: PlayerId,
    pub name: String,
    pub is_human: bool,
    pub chips: Chips,
    pub contributed: Chips,
    pub folded: bool,
    pub role: Option<Role>,
    /// Свои карты (или все живые на вскрытии), иначе `None`.
    pub hole_cards: Option<Vec<Card>>,
    pub is_you: bool,
}

/// Состояние стола для одного зрителя.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub game_id: TableId,
    pub round: u32,
    pub phase: SessionPhase,
    pub street: Option<Street>,
    pub pot: Chips,
    pub highest_bid: Chips,
    pub board: Vec<Card>,
    pub dealer: Option<PlayerId>,
    pub players: Vec<PlayerView>,
    pub current_actor: Option<PlayerId>,
    pub waiting_for_action: bool,
}

impl SessionSnapshot {
    /// Чужие карманные карты скрыты. После шоудауна открыты карты
    /// всех, кто не сбросил.
    pub fn for_viewer(snapshot: &TableSnapshot, viewer: Option<PlayerId>) -> Self {
        let showdown = snapshot.lap >= Street::Showdown.lap();
        let players = snapshot
            .players
            .iter()
            .map(|p| player_view(p, viewer, showdown))
            .collect();

        Self {
            game_id: snapshot.table_id.clone(),
            round: snapshot.round,
            phase: snapshot.phase,
            street: Street::from_lap(snapshot.lap),
            pot: snapshot.pot,
            highest_bid: snapshot.highest_bid,
            board: snapshot.board.clone(),
            dealer: snapshot.dealer,
            players,
            current_actor: snapshot.current_actor,
            waiting_for_action: snapshot.waiting_for_action,
        }
    }
}

fn player_view(p: &PlayerSnapshot, viewer: Option<PlayerId>, showdown: bool) -> PlayerView {
    let is_you = viewer == Some(p.id);
    let visible = is_you || (showdown && !p.folded);
    PlayerView {
        id: p.id,
        name: p.name.clone(),
        is_human: p.is_human,
        chips: p.chips,
        contributed: p.contributed,
        folded: p.folded,
        role: p.role,
        hole_cards: visible.then(|| p.hole_cards.clone()),
        is_you,
    }
}

/// Событие сервера для конкретного подключения.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerEvent {
    GameCreated {
        game_id: TableId,
        player_name: String,
    },
    JoinedGame {
        player_name: String,
        joined: usize,
        needed: usize,
    },
    PlayerLeft {
        player_name: String,
    },
    RoundStarted {
        state: SessionSnapshot,
    },
    GameState {
        state: SessionSnapshot,
    },
    RequestAction {
        player_name: String,
        your_turn: bool,
        /// Токены допустимых действий.
        legal_actions: Vec<String>,
    },
    ActionTaken {
        player_name: String,
        action: String,
        chips: Chips,
        automatic: bool,
    },
    CardsDealt {
        street: Street,
        board: Vec<Card>,
    },
    RoundEnded {
        winner: String,
        chips_won: Chips,
        state: SessionSnapshot,
    },
    NextRoundPrompt,
    GameOver {
        winner: Option<String>,
    },
    Error {
        message: String,
    },
}

impl ServerEvent {
    /// Перевести событие стола в сообщение для зрителя `viewer`.
    pub fn from_session_event(event: &SessionEvent, viewer: Option<PlayerId>) -> Self {
        match event {
            SessionEvent::PlayerJoined { name, joined, needed } => ServerEvent::JoinedGame {
                player_name: name.clone(),
                joined: *joined,
                needed: *needed,
            },
            SessionEvent::PlayerLeft { name } => ServerEvent::PlayerLeft {
                player_name: name.clone(),
            },
            SessionEvent::RoundStarted(s) => ServerEvent::RoundStarted {
                state: SessionSnapshot::for_viewer(s, viewer),
            },
            SessionEvent::StateChanged(s) => ServerEvent::GameState {
                state: SessionSnapshot::for_viewer(s, viewer),
            },
            SessionEvent::ActionRequested { player, name, legal } => ServerEvent::RequestAction {
                player_name: name.clone(),
                your_turn: viewer == Some(*player),
                legal_actions: legal.iter().map(ToString::to_string).collect(),
            },
            SessionEvent::ActionTaken {
                name,
                action,
                chips,
                automatic,
                ..
            } => ServerEvent::ActionTaken {
                player_name: name.clone(),
                action: action.to_string(),
                chips: *chips,
                automatic: *automatic,
            },
            SessionEvent::CardsDealt { street, board } => ServerEvent::CardsDealt {
                street: *street,
                board: board.clone(),
            },
            SessionEvent::RoundEnded {
                winner_name,
                chips_won,
                snapshot,
                ..
            } => ServerEvent::RoundEnded {
                winner: winner_name.clone(),
                chips_won: *chips_won,
                state: SessionSnapshot::for_viewer(snapshot, viewer),
            },
            SessionEvent::NextRoundPrompt => ServerEvent::NextRoundPrompt,
            SessionEvent::GameOver { winner } => ServerEvent::GameOver {
                winner: winner.clone(),
            },
        }
    }

    pub fn error(err: impl Into<ApiError>) -> Self {
        ServerEvent::Error {
            message: err.into().message(),
        }
    }

    pub fn to_json(&self) -> Result<String, ApiError> {
        serde_json::to_string(self).map_err(|e| ApiError::Internal(e.to_string()))
    }
}

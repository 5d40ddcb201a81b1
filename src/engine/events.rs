use serde::{Deserialize, Serialize};

use crate::domain::{Card, Chips, GameSession, PlayerId, Role, SessionPhase, Street, TableId};
use crate::engine::actions::Action;

/// Публичные поля игрока на момент события. Карманные карты лежат здесь
/// целиком, скрывает их транспорт (`api::SessionSnapshot::for_viewer`).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerSnapshot {
    pub id: PlayerId,
    pub name: String,
    pub is_human: bool,
    pub chips: Chips,
    pub contributed: Chips,
    pub folded: bool,
    pub role: Option<Role>,
    pub hole_cards: Vec<Card>,
}

/// Неизменяемый снимок стола, собирается в момент эмиссии.
///
/// `current_actor` есть только пока стол ждёт решения: между ходами
/// внутренний индекс может стоять на сброшенном месте.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TableSnapshot {
    pub table_id: TableId,
    pub round: u32,
    pub phase: SessionPhase,
    pub lap: u8,
    pub pot: Chips,
    pub highest_bid: Chips,
    pub board: Vec<Card>,
    pub dealer: Option<PlayerId>,
    pub players: Vec<PlayerSnapshot>,
    pub current_actor: Option<PlayerId>,
    pub waiting_for_action: bool,
}

impl TableSnapshot {
    pub fn capture(session: &GameSession) -> Self {
        Self {
            table_id: session.id.clone(),
            round: session.round,
            phase: session.phase,
            lap: session.lap,
            pot: session.table_chips,
            highest_bid: session.highest_bid,
            board: session.board.clone(),
            dealer: session.dealer,
            players: session
                .players
                .iter()
                .map(|p| PlayerSnapshot {
                    id: p.id,
                    name: p.name.clone(),
                    is_human: p.is_human,
                    chips: p.chips,
                    contributed: p.contributed,
                    folded: p.folded,
                    role: p.role,
                    hole_cards: p.hole_cards.clone(),
                })
                .collect(),
            current_actor: session
                .current_actor()
                .filter(|p| session.waiting_for_action && !p.folded)
                .map(|p| p.id),
            waiting_for_action: session.waiting_for_action,
        }
    }
}

/// Событие стола. Все события адресованы всему столу.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum SessionEvent {
    PlayerJoined {
        name: String,
        joined: usize,
        needed: usize,
    },
    PlayerLeft {
        name: String,
    },
    RoundStarted(TableSnapshot),
    StateChanged(TableSnapshot),
    /// Ждём решения человека.
    ActionRequested {
        player: PlayerId,
        name: String,
        legal: Vec<Action>,
    },
    ActionTaken {
        player: PlayerId,
        name: String,
        action: Action,
        /// Сколько фишек ушло в банк этим действием.
        chips: Chips,
        /// Новая максимальная ставка (только для рейза).
        new_highest_bid: Option<Chips>,
        /// Действие применено по таймауту.
        automatic: bool,
    },
    CardsDealt {
        street: Street,
        board: Vec<Card>,
    },
    RoundEnded {
        winner: PlayerId,
        winner_name: String,
        chips_won: Chips,
        snapshot: TableSnapshot,
    },
    NextRoundPrompt,
    GameOver {
        winner: Option<String>,
    },
}

/// Очередь исходящих событий стола (вычитывается транспортом).
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct EventLog {
    pub events: Vec<SessionEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: SessionEvent) {
        self.events.push(event);
    }

    /// Забрать всё накопленное.
    pub fn drain(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

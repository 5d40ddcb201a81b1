use crate::domain::{ConfigError, TableId};

use thiserror::Error;

/// Ошибки движка.
///
/// Делятся на две группы:
/// - ошибки протокола (чужой ход, битый токен, полный стол) — отвечаем
///   участнику, состояние стола не меняется;
/// - нарушения предусловий (`is_fatal`) — стол больше нельзя вести, его сносят.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Игра {0} не найдена")]
    TableNotFound(TableId),

    #[error("Игра {0} уже существует")]
    TableExists(TableId),

    #[error("Игра уже началась")]
    GameAlreadyStarted,

    #[error("Игра заполнена")]
    GameFull,

    #[error("Подключение уже за столом")]
    AlreadySeated,

    #[error("Ждём ещё {missing} игроков")]
    WaitingForPlayers { missing: usize },

    #[error("Подключение не состоит в этой игре")]
    UnknownConnection,

    #[error("Сейчас не ваш ход")]
    NotYourTurn,

    #[error("Некорректное действие: {0:?}")]
    MalformedAction(String),

    #[error("Действие недопустимо в текущем состоянии")]
    IllegalAction,

    #[error("Недостаточно фишек для этой ставки")]
    NotEnoughChips,

    #[error("Раунд сейчас не идёт")]
    NoActiveRound,

    #[error("Раунд ещё не закончен")]
    RoundInProgress,

    #[error("Некорректный конфиг: {0}")]
    InvalidConfig(#[from] ConfigError),

    #[error("Недостаточно игроков для раунда")]
    NotEnoughPlayers,

    #[error("Список игроков пуст")]
    EmptyPlayerList,

    #[error("Все игроки сбросили карты")]
    AllPlayersFolded,

    #[error("Колода закончилась")]
    DeckExhausted,

    #[error("Не удалось определить победителя")]
    NoWinner,
}

impl EngineError {
    /// Нарушение предусловия: стол в неконсистентном состоянии, его надо закрыть.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            EngineError::NotEnoughPlayers
                | EngineError::EmptyPlayerList
                | EngineError::AllPlayersFolded
                | EngineError::DeckExhausted
                | EngineError::NoWinner
        )
    }
}

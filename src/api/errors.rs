use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::TableId;
use crate::engine::EngineError;

/// Ошибки внешнего API (то, что отдаём клиенту).
#[derive(Clone, Debug, Error, Serialize, Deserialize, PartialEq, Eq)]
pub enum ApiError {
    /// Битый JSON или неизвестная команда.
    #[error("Некорректный запрос: {0}")]
    BadRequest(String),

    #[error("Игра {0} не найдена")]
    TableNotFound(TableId),

    /// Команда отклонена движком, состояние стола не изменилось.
    #[error("{0}")]
    Rejected(String),

    /// Стол закрыт из-за внутренней ошибки.
    #[error("Внутренняя ошибка: {0}")]
    Internal(String),
}

impl ApiError {
    /// Текст для события `error`.
    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::TableNotFound(id) => ApiError::TableNotFound(id),
            e if e.is_fatal() => ApiError::Internal(e.to_string()),
            e => ApiError::Rejected(e.to_string()),
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

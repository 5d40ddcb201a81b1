// src/time_ctrl/time_rules.rs
//! Конфигурация тайминга хода.
//!
//! Только "правила", без состояния и без привязки к конкретному столу.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Сколько секунд у человека на ход по умолчанию.
pub const DEFAULT_ACTION_TIMEOUT_SECS: u64 = 60;

/// Правила тайминга для одного стола.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TimeRules {
    /// Сколько секунд даётся человеку на решение. Отсчёт заново при каждом запросе хода.
    pub action_timeout_secs: u64,
}

impl TimeRules {
    pub const fn new(action_timeout_secs: u64) -> Self {
        Self { action_timeout_secs }
    }

    /// 60 секунд на ход.
    pub const fn standard() -> Self {
        Self::new(DEFAULT_ACTION_TIMEOUT_SECS)
    }

    pub fn action_timeout(&self) -> Duration {
        Duration::from_secs(self.action_timeout_secs)
    }
}

impl Default for TimeRules {
    fn default() -> Self {
        Self::standard()
    }
}

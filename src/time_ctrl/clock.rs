// src/time_ctrl/clock.rs
//! Таймер хода (shot clock) для человека, которого ждёт стол.

use std::time::Duration;

use tokio::time::Instant;

use crate::domain::PlayerId;

use super::TimeRules;

/// Состояние таймера текущего хода.
#[derive(Clone, Debug, Default)]
pub struct TurnClock {
    /// Кого ждём (None, если сейчас никого).
    pub current_player: Option<PlayerId>,
    /// Момент, когда сработает авто-действие.
    pub deadline: Option<Instant>,
}

impl TurnClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Начать ход игрока. Каждый новый запрос хода запускает отсчёт заново.
    pub fn start_turn(&mut self, player_id: PlayerId, rules: &TimeRules, now: Instant) {
        self.current_player = Some(player_id);
        self.deadline = Some(now + rules.action_timeout());
    }

    pub fn clear(&mut self) {
        self.current_player = None;
        self.deadline = None;
    }

    /// Сколько осталось до дедлайна (`None` — таймер не запущен).
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.deadline.map(|d| d.saturating_duration_since(now))
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        self.deadline.is_some_and(|d| now >= d)
    }
}

// src/time_ctrl/mod.rs
//! Контроль времени хода человека.
//!
//! - правила (`TimeRules`);
//! - таймер хода (`TurnClock`);
//! - авто-действие по таймауту: check, если доплачивать нечего, иначе fold.

pub mod clock;
pub mod time_rules;

pub use clock::TurnClock;
pub use time_rules::{TimeRules, DEFAULT_ACTION_TIMEOUT_SECS};

use tracing::warn;

use crate::domain::Chips;
use crate::engine::{self, Action, EngineError, SessionEngine};

/// Авто-действие при истечении времени.
pub fn auto_action(owed: Chips) -> Action {
    if owed.is_zero() {
        Action::Call
    } else {
        Action::Fold
    }
}

impl SessionEngine {
    /// Человек, которого сейчас ждёт стол.
    pub fn awaited_player(&self) -> Option<crate::domain::PlayerId> {
        if !self.session.waiting_for_action {
            return None;
        }
        self.session
            .current_actor()
            .filter(|p| p.is_human)
            .map(|p| p.id)
    }

    /// Применить авто-действие за ждущего человека.
    ///
    /// `Ok(false)`, если никого не ждём (действие успело прийти раньше).
    pub fn apply_timeout(&mut self) -> Result<bool, EngineError> {
        let Some(player) = self.awaited_player() else {
            return Ok(false);
        };
        let action = auto_action(self.action_context().owed());
        warn!(table = %self.session.id, player, %action, "время хода истекло");
        engine::apply_action_with(self, action, true)?;
        Ok(true)
    }
}

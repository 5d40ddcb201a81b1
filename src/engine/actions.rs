use core::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::Chips;
use crate::engine::errors::EngineError;

/// Решение игрока. На проводе — токены `FOLD`, `CALL`, `RAISE<n>`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    Fold,
    /// Уравнять (при нулевом долге — check).
    Call,
    /// Поднять на `n` сверх долга.
    Raise(Chips),
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Fold => write!(f, "FOLD"),
            Action::Call => write!(f, "CALL"),
            Action::Raise(amount) => write!(f, "RAISE{}", amount.0),
        }
    }
}

impl FromStr for Action {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        match token {
            "FOLD" => Ok(Action::Fold),
            "CALL" => Ok(Action::Call),
            _ => token
                .strip_prefix("RAISE")
                .and_then(|n| n.parse::<u64>().ok())
                .map(|n| Action::Raise(Chips(n)))
                .ok_or_else(|| EngineError::MalformedAction(s.to_string())),
        }
    }
}

//! Модуль оценки силы покерных рук (Texas Hold'em).
//!
//! Основная функция:
//!   `evaluate_best_hand(cards) -> Option<HandRank>`

pub mod evaluator;
pub mod hand_rank;

pub use evaluator::{evaluate_best_hand, evaluate_five};
pub use hand_rank::{HandCategory, HandRank};

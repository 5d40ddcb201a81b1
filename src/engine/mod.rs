//! Движок стола: блайнды, очередь хода, круги ставок, банк, шоудаун, выбывание.
//!
//! Высокоуровневый объект: `SessionEngine`
//! Основные операции:
//!   - `start_round` – новый раунд (раздача, блайнды, первый ход)
//!   - `request_next_action` – довести стол до ближайшего решения человека
//!   - `apply_action` – применить действие текущего игрока
//!   - `advance_lap` – следующая улица / шоудаун
//!   - `settle_round` – выплата банка, выбывание, ротация дилера

pub mod actions;
pub mod betting;
pub mod collaborators;
pub mod errors;
pub mod events;
pub mod game_loop;
pub mod positions;
pub mod table_manager;
pub mod validation;

pub use actions::Action;
pub use collaborators::{
    ActionContext, ActionEnumerator, DecisionProvider, DeckSource, TableServices, WinnerResolver,
};
pub use errors::EngineError;
pub use events::{EventLog, PlayerSnapshot, SessionEvent, TableSnapshot};
pub use game_loop::{
    advance_lap, apply_action, apply_action_with, initialize_players, request_next_action,
    settle_round, start_round, SessionEngine,
};
pub use table_manager::SessionRegistry;

/// RNG интерфейс для движка и infra (рассадка ботов, дилер, колода).
pub trait RandomSource {
    fn shuffle<T>(&mut self, slice: &mut [T]);

    /// Случайный индекс в `0..len` (`len > 0`).
    fn pick_index(&mut self, len: usize) -> usize;
}

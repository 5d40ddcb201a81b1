//! Внешние участники движка: колода, список допустимых действий,
//! определение победителя и решения ботов.
//!
//! Движок знает только эти трейты. Реализации по умолчанию — в `infra`.

use crate::domain::{Card, Chips, Deck, Player, PlayerId};
use crate::engine::actions::Action;

/// Read-only вид состояния для ходящего игрока.
#[derive(Clone, Copy, Debug)]
pub struct ActionContext<'a> {
    pub players: &'a [Player],
    pub acting_seat: usize,
    pub board: &'a [Card],
    pub highest_bid: Chips,
    pub deck_remaining: usize,
    pub lap: u8,
    pub bet_unit: Chips,
}

impl<'a> ActionContext<'a> {
    pub fn actor(&self) -> Option<&'a Player> {
        self.players.get(self.acting_seat)
    }

    /// Сколько ходящему нужно доплатить до `highest_bid`.
    pub fn owed(&self) -> Chips {
        self.actor()
            .map(|p| p.owed(self.highest_bid))
            .unwrap_or(Chips::ZERO)
    }
}

/// Источник колоды.
pub trait DeckSource {
    fn create_deck(&mut self, full_deck: bool) -> Deck;
    fn shuffle(&mut self, deck: Deck, passes: u32) -> Deck;
}

/// Перечисление допустимых действий.
pub trait ActionEnumerator {
    /// Для не сфолдившего игрока список никогда не пуст.
    fn legal_actions(&self, ctx: &ActionContext<'_>) -> Vec<Action>;
}

/// Определение победителя на шоудауне.
pub trait WinnerResolver {
    fn determine_winner(&self, contenders: &[&Player], board: &[Card]) -> Option<PlayerId>;
}

/// Стратегия для мест без человека. Возвращает одно из `legal`.
pub trait DecisionProvider {
    fn decide(&mut self, ctx: &ActionContext<'_>, legal: &[Action]) -> Action;
}

/// Набор внешних участников одного стола.
pub struct TableServices {
    pub deck: Box<dyn DeckSource + Send>,
    pub actions: Box<dyn ActionEnumerator + Send>,
    pub winner: Box<dyn WinnerResolver + Send>,
    pub decisions: Box<dyn DecisionProvider + Send>,
    /// Сколько раз перемешивать колоду.
    pub shuffle_passes: u32,
}

impl std::fmt::Debug for TableServices {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TableServices")
            .field("shuffle_passes", &self.shuffle_passes)
            .finish_non_exhaustive()
    }
}

use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::PlayerId;

/// Роль игрока в текущем раунде (блайнды).
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Role {
    SmallBlind,
    BigBlind,
}

/// Игрок за столом. Принадлежит `GameSession`, наружу не отдаётся по ссылке —
/// для транспорта строится снапшот.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Player {
    /// Стабильный хэндл: не меняется при выбывании соседей.
    pub id: PlayerId,
    pub name: String,
    pub is_human: bool,
    /// Карманные карты.
    pub hole_cards: Vec<Card>,
    pub folded: bool,
    pub role: Option<Role>,
    /// Текущий стек.
    pub chips: Chips,
    /// Сколько игрок внёс в банк за текущий раунд (по всем кругам).
    pub contributed: Chips,
    /// Сделал ли игрок действие на текущем круге ставок.
    pub action_taken: bool,
}

impl Player {
    pub fn new(id: PlayerId, name: impl Into<String>, is_human: bool, chips: Chips) -> Self {
        Self {
            id,
            name: name.into(),
            is_human,
            hole_cards: Vec::new(),
            folded: false,
            role: None,
            chips,
            contributed: Chips::ZERO,
            action_taken: false,
        }
    }

    /// Сброс перед новым раундом (стек не трогаем).
    pub fn reset_for_round(&mut self) {
        self.hole_cards.clear();
        self.folded = false;
        self.role = None;
        self.contributed = Chips::ZERO;
        self.action_taken = false;
    }

    /// Олл-ин: в раунде, но фишек больше нет.
    pub fn is_all_in(&self) -> bool {
        !self.folded && self.chips.is_zero()
    }

    /// Сколько не хватает до `highest_bid`.
    pub fn owed(&self, highest_bid: Chips) -> Chips {
        highest_bid.saturating_sub(self.contributed)
    }

    /// Перенести из стека в вклад не более `amount`. Возвращает реально внесённое.
    pub fn commit(&mut self, amount: Chips) -> Chips {
        let paid = amount.min(self.chips);
        self.chips -= paid;
        self.contributed += paid;
        paid
    }
}

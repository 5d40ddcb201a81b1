use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::domain::PlayerId;

/// Улица (круг ставок). Числовое значение совпадает с `lap` сессии.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub enum Street {
    Preflop = 0,
    Flop = 1,
    Turn = 2,
    River = 3,
    Showdown = 4,
}

impl Street {
    pub fn from_lap(lap: u8) -> Option<Street> {
        match lap {
            0 => Some(Street::Preflop),
            1 => Some(Street::Flop),
            2 => Some(Street::Turn),
            3 => Some(Street::River),
            4 => Some(Street::Showdown),
            _ => None,
        }
    }

    pub const fn lap(self) -> u8 {
        self as u8
    }

    /// Сколько карт открывается на борд при переходе на эту улицу.
    pub const fn board_cards(self) -> usize {
        match self {
            Street::Flop => 3,
            Street::Turn | Street::River => 1,
            Street::Preflop | Street::Showdown => 0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Street::Preflop => "Preflop",
            Street::Flop => "Flop",
            Street::Turn => "Turn",
            Street::River => "River",
            Street::Showdown => "Showdown",
        }
    }
}

/// Итог одного раунда (для событий и истории).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoundOutcome {
    pub round: u32,
    pub winner: PlayerId,
    pub winner_name: String,
    pub chips_won: Chips,
    /// Дошло ли до шоудауна (иначе — все, кроме одного, сфолдили).
    pub showdown: bool,
}

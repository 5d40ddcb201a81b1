use core::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::card::Rank;

/// Категория покерной руки по силе.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HandCategory {
    HighCard = 0,
    OnePair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
}

impl HandCategory {
    const ALL: [HandCategory; 9] = [
        HandCategory::HighCard,
        HandCategory::OnePair,
        HandCategory::TwoPair,
        HandCategory::ThreeOfAKind,
        HandCategory::Straight,
        HandCategory::Flush,
        HandCategory::FullHouse,
        HandCategory::FourOfAKind,
        HandCategory::StraightFlush,
    ];

    pub fn label(self) -> &'static str {
        match self {
            HandCategory::HighCard => "High card",
            HandCategory::OnePair => "One pair",
            HandCategory::TwoPair => "Two pair",
            HandCategory::ThreeOfAKind => "Three of a kind",
            HandCategory::Straight => "Straight",
            HandCategory::Flush => "Flush",
            HandCategory::FullHouse => "Full house",
            HandCategory::FourOfAKind => "Four of a kind",
            HandCategory::StraightFlush => "Straight flush",
        }
    }
}

/// Сила руки, упакованная в u32: сравнение чисел = сравнение рук.
///
/// Схема: `[категория:4][k0:4][k1:4][k2:4][k3:4][k4:4]`, где k0..k4 —
/// кикеры по значимости (ранг 2..14 влезает в 4 бита).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct HandRank(pub u32);

impl HandRank {
    pub fn new(category: HandCategory, kickers: [Rank; 5]) -> Self {
        let value = kickers
            .iter()
            .fold(category as u32, |acc, r| (acc << 4) | r.value() as u32);
        HandRank(value)
    }

    pub fn category(&self) -> HandCategory {
        let id = ((self.0 >> 20) & 0x0F) as usize;
        HandCategory::ALL
            .get(id)
            .copied()
            .unwrap_or(HandCategory::HighCard)
    }
}

impl fmt::Display for HandRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.category().label())
    }
}

use serde::{Deserialize, Serialize};

use crate::domain::card::{Card, Rank, Suit};

/// Колода карт. В домене — просто упорядоченный стек карт,
/// верх колоды = конец вектора (`pop`).
/// Перемешивание делает `DeckSource` (infra), НЕ здесь.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Deck {
    pub cards: Vec<Card>,
}

/// Младший ранг короткой колоды (9..A, 24 карты).
pub const SHORT_DECK_LOWEST: Rank = Rank::Nine;

impl Deck {
    /// Стандартная 52-карточная колода:
    /// Clubs 2..A, Diamonds 2..A, Hearts 2..A, Spades 2..A.
    pub fn standard_52() -> Self {
        Self::with_ranks_from(Rank::Two)
    }

    /// Короткая колода 9..A по всем мастям.
    pub fn short_24() -> Self {
        Self::with_ranks_from(SHORT_DECK_LOWEST)
    }

    /// Колода под флаг `full_deck` из конфига сессии.
    pub fn for_flag(full_deck: bool) -> Self {
        if full_deck {
            Self::standard_52()
        } else {
            Self::short_24()
        }
    }

    /// Сколько карт будет в колоде под этот флаг (без построения).
    pub fn size_for_flag(full_deck: bool) -> usize {
        let ranks = Rank::ALL
            .iter()
            .filter(|r| full_deck || **r >= SHORT_DECK_LOWEST)
            .count();
        ranks * Suit::ALL.len()
    }

    fn with_ranks_from(lowest: Rank) -> Self {
        let cards = Suit::ALL
            .iter()
            .flat_map(|&suit| {
                Rank::ALL
                    .iter()
                    .filter(move |r| **r >= lowest)
                    .map(move |&rank| Card::new(rank, suit))
            })
            .collect();
        Deck { cards }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Взять одну карту сверху колоды.
    pub fn draw_one(&mut self) -> Option<Card> {
        self.cards.pop()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn deck_sizes_match_flag() {
        assert_eq!(Deck::standard_52().len(), 52);
        assert_eq!(Deck::short_24().len(), 24);
        assert_eq!(Deck::size_for_flag(true), 52);
        assert_eq!(Deck::size_for_flag(false), 24);
    }

    #[test]
    fn deck_has_no_duplicates() {
        let deck = Deck::standard_52();
        let unique: HashSet<_> = deck.cards.iter().collect();
        assert_eq!(unique.len(), 52);
    }

    #[test]
    fn draw_takes_from_the_end() {
        let mut deck = Deck::short_24();
        let last = *deck.cards.last().unwrap();
        assert_eq!(deck.draw_one(), Some(last));
        assert_eq!(deck.len(), 23);
    }
}

use crate::domain::Deck;
use crate::engine::{DeckSource, RandomSource};

/// Колода по флагу конфига, перемешанная `passes` раз.
#[derive(Clone, Debug)]
pub struct ShuffledDeckSource<R> {
    rng: R,
}

impl<R: RandomSource> ShuffledDeckSource<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: RandomSource> DeckSource for ShuffledDeckSource<R> {
    fn create_deck(&mut self, full_deck: bool) -> Deck {
        Deck::for_flag(full_deck)
    }

    fn shuffle(&mut self, mut deck: Deck, passes: u32) -> Deck {
        for _ in 0..passes.max(1) {
            self.rng.shuffle(&mut deck.cards);
        }
        deck
    }
}

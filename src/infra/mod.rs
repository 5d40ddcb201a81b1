//! Инфраструктурный слой вокруг покерного движка:
//! - генерация кодов столов и id подключений;
//! - RNG-реализации для движка;
//! - реализации внешних участников по умолчанию (колода, действия,
//!   шоудаун, боты).

pub mod bots;
pub mod deck_source;
pub mod ids;
pub mod legal_actions;
pub mod rng;
pub mod showdown;

pub use bots::*;
pub use deck_source::*;
pub use ids::*;
pub use legal_actions::*;
pub use rng::*;
pub use showdown::*;

use crate::engine::TableServices;

/// Сколько раз перемешивать колоду по умолчанию.
pub const DEFAULT_SHUFFLE_PASSES: u32 = 10;

impl TableServices {
    /// Стандартный набор: перемешанная колода, лимитные действия,
    /// шоудаун по лучшей руке, случайные боты.
    ///
    /// С `seed` колода и боты детерминированы (разные потоки от одного seed).
    pub fn standard(seed: Option<u64>, shuffle_passes: u32) -> Self {
        let (deck_rng, bot_rng) = match seed {
            Some(seed) => (TableRng::new(Some(seed)), TableRng::new(Some(seed.wrapping_add(1)))),
            None => (TableRng::new(None), TableRng::new(None)),
        };
        TableServices {
            deck: Box::new(ShuffledDeckSource::new(deck_rng)),
            actions: Box::new(LimitActionEnumerator),
            winner: Box::new(BestHandResolver),
            decisions: Box::new(RandomBot::new(bot_rng)),
            shuffle_passes,
        }
    }
}

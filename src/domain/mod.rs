//! Доменная модель: карты, фишки, колода, игроки, сессия стола.

pub mod card;
pub mod chips;
pub mod deck;
pub mod hand;
pub mod player;
pub mod session;

/// Стабильный id игрока внутри сессии.
pub type PlayerId = u64;
/// Код стола (короткая строка, которой игроки делятся друг с другом).
pub type TableId = String;
/// Идентификатор подключения транспорта.
pub type ConnectionId = String;

pub use card::*;
pub use chips::*;
pub use deck::*;
pub use hand::*;
pub use player::*;
pub use session::*;

//! Доменная модель heads-up покера: карты, колода, фишки, игроки, стол.

pub mod card;
pub mod chips;
pub mod deck;
pub mod hand;
pub mod player;
pub mod table;

/// Идентификатор игрока (приходит снаружи, обычно UUID).
pub type PlayerId = String;

/// Идентификатор игровой сессии (одного стола).
pub type SessionId = String;

/// Индекс места за столом (0 или 1 в heads-up).
pub type SeatIndex = usize;

pub use card::*;
pub use chips::*;
pub use deck::*;
pub use hand::*;
pub use player::*;
pub use table::*;

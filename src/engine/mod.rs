//! Движок heads-up раздачи: валидация и применение действий, переход улиц,
//! банки и шоудаун, жизненный цикл раздачи.
//!
//! Высокоуровневый объект: `TableManager` (сериализует мутации по сессиям).
//! Основные операции над состоянием:
//!   - `initialize_state` / `start_new_hand` – новая раздача
//!   - `apply_action` – применить действие игрока
//!   - `finish_round` – авто-переход улиц/докрутка/шоудаун

pub mod actions;
pub mod betting;
pub mod errors;
pub mod game_loop;
pub mod hand_history;
pub mod lifecycle;
pub mod positions;
pub mod showdown;
pub mod side_pots;
pub mod table_manager;
pub mod validation;

pub use actions::PlayerActionKind;
pub use errors::EngineError;
pub use game_loop::{apply_action, finish_round, HandStatus};
pub use hand_history::ActionRecord;
pub use lifecycle::{initialize_state, start_new_hand};
pub use side_pots::SidePot;
pub use table_manager::{ActionOutcome, TableManager};

use crate::domain::Card;

/// RNG интерфейс для engine.
/// Реализации – в infra (`SystemRng`, `DeterministicRng`).
pub trait RandomSource {
    /// Перемешать карты.
    fn shuffle(&mut self, cards: &mut [Card]);

    /// Случайный индекс в 0..len (len > 0).
    fn choose_index(&mut self, len: usize) -> usize;
}

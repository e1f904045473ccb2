//! Движок heads-up безлимитного холдема.
//!
//! Слои:
//! - `domain` – карты, фишки, игроки, снэпшот стола;
//! - `eval` – оценка рук (трейт + встроенная реализация);
//! - `engine` – ставки, улицы, банки, шоудаун, жизненный цикл раздачи, `TableManager`;
//! - `infra` – RNG, кэш снэпшотов, очередь мутаций по сессиям;
//! - `api` – команды/запросы/DTO для внешнего кода.
//!
//! Хранилище – забота вызывающего: после каждой успешной мутации
//! он сохраняет возвращённый `TableState`.

pub mod api;
pub mod domain;
pub mod engine;
pub mod eval;
pub mod infra;

pub use domain::{Chips, PlayerId, SessionId, TableConfig, TableState};
pub use engine::{ActionOutcome, EngineError, PlayerActionKind, TableManager};

//! Оценка покерных рук.
//!
//! Движок потребляет только трейт `HandEvaluator`; `StandardEvaluator` –
//! встроенная реализация (перебор всех 5-карточных комбинаций из 5–7 карт).

pub mod evaluator;
pub mod hand_rank;
pub mod lookup_tables;

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{Card, HandRank};

pub use evaluator::StandardEvaluator;
pub use hand_rank::{describe_hand, HandCategory};

/// Результат оценки руки.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct EvaluatedHand {
    pub name: String,
    pub rank: HandRank,
    pub best_five: Vec<Card>,
}

impl EvaluatedHand {
    /// Минимально возможная рука – подставляется, если оценка упала.
    pub fn fallback() -> Self {
        Self {
            name: "Unknown".to_string(),
            rank: HandRank(0),
            best_five: Vec::new(),
        }
    }
}

/// Ошибки оценщика.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum EvalError {
    #[error("Ожидалось 2 карманные карты, получено {0}")]
    BadHoleCards(usize),

    #[error("Ожидалось 3–5 карт борда, получено {0}")]
    BadBoard(usize),

    #[error("Карта {0} встречается дважды")]
    DuplicateCard(Card),
}

/// Интерфейс оценщика рук.
pub trait HandEvaluator: Send + Sync {
    /// Лучшая 5-карточная рука из 2 карманных + 3..=5 общих карт.
    fn evaluate(&self, hole: &[Card], board: &[Card]) -> Result<EvaluatedHand, EvalError>;

    /// Сравнение двух рук: Greater = `a` сильнее.
    fn compare(&self, a: &EvaluatedHand, b: &EvaluatedHand) -> Ordering {
        a.rank.cmp(&b.rank)
    }
}

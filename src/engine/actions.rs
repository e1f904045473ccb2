use core::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::Chips;
use crate::engine::errors::EngineError;

/// Тип действия игрока.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum PlayerActionKind {
    Fold,
    Check,
    Call,
    /// Bet на улице, где ещё нет ставки. Сумма = размер бета.
    Bet(Chips),
    /// Raise существующей ставки. Сумма = повышение СВЕРХ колла.
    Raise(Chips),
    /// All-in – поставить весь стек.
    AllIn,
}

impl PlayerActionKind {
    /// Разобрать внешнее имя действия (`fold`, `check`, `call`, `bet`, `raise`, `all-in`).
    /// Для `bet`/`raise` сумма обязательна.
    pub fn parse(action: &str, amount: Option<Chips>) -> Result<Self, EngineError> {
        match action.trim().to_ascii_lowercase().as_str() {
            "fold" => Ok(PlayerActionKind::Fold),
            "check" => Ok(PlayerActionKind::Check),
            "call" => Ok(PlayerActionKind::Call),
            "bet" => amount
                .map(PlayerActionKind::Bet)
                .ok_or(EngineError::MissingAmount("bet")),
            "raise" => amount
                .map(PlayerActionKind::Raise)
                .ok_or(EngineError::MissingAmount("raise")),
            "all-in" | "allin" | "all_in" => Ok(PlayerActionKind::AllIn),
            other => Err(EngineError::UnknownAction(other.to_string())),
        }
    }

    /// Внешнее имя действия.
    pub fn name(&self) -> &'static str {
        match self {
            PlayerActionKind::Fold => "fold",
            PlayerActionKind::Check => "check",
            PlayerActionKind::Call => "call",
            PlayerActionKind::Bet(_) => "bet",
            PlayerActionKind::Raise(_) => "raise",
            PlayerActionKind::AllIn => "all-in",
        }
    }

    pub fn amount(&self) -> Option<Chips> {
        match self {
            PlayerActionKind::Bet(a) | PlayerActionKind::Raise(a) => Some(*a),
            _ => None,
        }
    }
}

impl fmt::Display for PlayerActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.amount() {
            Some(a) => write!(f, "{} {}", self.name(), a),
            None => f.write_str(self.name()),
        }
    }
}

use thiserror::Error;

use crate::domain::{Chips, ConfigError, PlayerId, SessionId};

/// Ошибки движка. Ошибки валидации никогда не меняют состояние.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("Сессия {0} не найдена")]
    SessionNotFound(SessionId),

    #[error("Некорректный конфиг стола: {0}")]
    InvalidConfig(#[from] ConfigError),

    #[error("Нужно ровно 2 игрока, передано {0}")]
    InvalidPlayerCount(usize),

    #[error("Игрок {0} указан дважды")]
    DuplicatePlayer(PlayerId),

    #[error("Игрок {0} не найден за столом")]
    PlayerNotAtTable(PlayerId),

    #[error("Недостаточно игроков с фишками для новой раздачи")]
    NotEnoughPlayers,

    #[error("Раздача уже завершена")]
    HandAlreadyComplete,

    #[error("Раздача ещё идёт")]
    HandStillInProgress,

    #[error("Сейчас не ход игрока {0}")]
    NotPlayersTurn(PlayerId),

    #[error("Игрок {0} не может действовать в этой раздаче")]
    PlayerNotActive(PlayerId),

    #[error("Неизвестное действие: {0}")]
    UnknownAction(String),

    #[error("Для действия {0} нужно указать сумму")]
    MissingAmount(&'static str),

    #[error("Сумма должна быть больше нуля")]
    ZeroAmount,

    #[error("Невозможно выполнить check – нужно доставить {to_call}")]
    CannotCheck { to_call: Chips },

    #[error("Невозможно выполнить call – нет ставки для уравнивания")]
    CannotCall,

    #[error("Bet невозможен – уже есть ставка {to_call} для колла, используйте raise")]
    CannotBet { to_call: Chips },

    #[error("Raise невозможен – нет ставки, используйте bet")]
    CannotRaise,

    #[error("Bet {amount} меньше минимального {minimum}")]
    BetTooSmall { amount: Chips, minimum: Chips },

    #[error("Размер рейза {amount} меньше минимального {minimum}")]
    RaiseTooSmall { amount: Chips, minimum: Chips },

    #[error("Недостаточно фишек: нужно {needed}, в стеке {available}")]
    NotEnoughChips { needed: Chips, available: Chips },

    #[error("Нет фишек для all-in")]
    NoChips,

    #[error("Неполный all-in рейз не открывает повторный рейз – можно только call или fold")]
    RaisingClosed,

    #[error("Внутренняя ошибка: {0}")]
    Internal(&'static str),
}

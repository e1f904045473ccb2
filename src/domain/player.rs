use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::PlayerId;
use crate::engine::actions::PlayerActionKind;

/// Статус игрока в текущей раздаче.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum PlayerStatus {
    /// Игрок в раздаче и может действовать.
    Active,
    /// Игрок сфолдил и больше не претендует на банк.
    Folded,
    /// Игрок поставил весь стек – действовать больше не может, но претендует на банк.
    AllIn,
    /// У игрока нет фишек, в раздаче не участвует.
    Out,
}

/// Игрок за heads-up столом.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Player {
    pub id: PlayerId,
    /// Текущий стек (не включает то, что уже в банке).
    pub chips: Chips,
    /// Ставка на текущей улице.
    pub bet_this_round: Chips,
    /// Сколько всего внесено в банк за раздачу (блайнды + все улицы).
    pub total_bet_this_hand: Chips,
    pub status: PlayerStatus,
    /// Карманные карты: 0 или 2.
    pub hole_cards: Vec<Card>,
    pub is_dealer: bool,
    pub is_small_blind: bool,
    pub is_big_blind: bool,
    pub last_action: Option<PlayerActionKind>,
    /// Действовал ли игрок после последней полной агрессии на этой улице.
    /// Блайнды действием не считаются.
    pub acted_this_round: bool,
}

impl Player {
    pub fn new(id: impl Into<PlayerId>, chips: Chips) -> Self {
        Self {
            id: id.into(),
            chips,
            bet_this_round: Chips::ZERO,
            total_bet_this_hand: Chips::ZERO,
            status: if chips.is_zero() {
                PlayerStatus::Out
            } else {
                PlayerStatus::Active
            },
            hole_cards: Vec::new(),
            is_dealer: false,
            is_small_blind: false,
            is_big_blind: false,
            last_action: None,
            acted_this_round: false,
        }
    }

    /// Претендует ли игрок на банк (Active или AllIn).
    pub fn is_in_hand(&self) -> bool {
        matches!(self.status, PlayerStatus::Active | PlayerStatus::AllIn)
    }

    /// Может ли игрок ещё действовать.
    pub fn is_active(&self) -> bool {
        self.status == PlayerStatus::Active
    }

    /// Перенести фишки из стека в банк (не больше, чем есть в стеке).
    /// Возвращает реально внесённую сумму. Пустой стек → AllIn.
    pub fn commit(&mut self, amount: Chips) -> Chips {
        let real = amount.min(self.chips);
        self.chips -= real;
        self.bet_this_round += real;
        self.total_bet_this_hand += real;
        if self.chips.is_zero() && self.status == PlayerStatus::Active {
            self.status = PlayerStatus::AllIn;
        }
        real
    }

    /// Сброс всех полей, относящихся к раздаче (стек сохраняется).
    pub fn reset_for_new_hand(&mut self) {
        self.bet_this_round = Chips::ZERO;
        self.total_bet_this_hand = Chips::ZERO;
        self.hole_cards.clear();
        self.is_dealer = false;
        self.is_small_blind = false;
        self.is_big_blind = false;
        self.last_action = None;
        self.acted_this_round = false;
        self.status = if self.chips.is_zero() {
            PlayerStatus::Out
        } else {
            PlayerStatus::Active
        };
    }
}

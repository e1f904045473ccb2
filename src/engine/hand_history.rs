use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::domain::hand::Street;
use crate::domain::PlayerId;
use crate::engine::actions::PlayerActionKind;

/// Запись о действии игрока. Живёт до начала следующей раздачи.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ActionRecord {
    pub player_id: PlayerId,
    pub action: PlayerActionKind,
    /// Сколько фишек реально ушло в банк этим действием (None для fold/check).
    pub amount: Option<Chips>,
    pub round: Street,
    /// Unix-время в миллисекундах.
    pub timestamp: u64,
}

/// Действия конкретной улицы, в порядке поступления.
pub fn actions_in_round(history: &[ActionRecord], round: Street) -> impl Iterator<Item = &ActionRecord> {
    history.iter().filter(move |r| r.round == round)
}

/// Последнее действие игрока в раздаче.
pub fn last_action_of<'a>(history: &'a [ActionRecord], player_id: &str) -> Option<&'a ActionRecord> {
    history.iter().rev().find(|r| r.player_id == player_id)
}

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::PlayerId;

/// Улица раздачи. Порядок вариантов = порядок прохождения.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Street {
    Preflop,
    Flop,
    Turn,
    River,
    Showdown,
}

impl Street {
    /// Следующая улица (Showdown – терминальная).
    pub fn next(self) -> Street {
        match self {
            Street::Preflop => Street::Flop,
            Street::Flop => Street::Turn,
            Street::Turn => Street::River,
            Street::River | Street::Showdown => Street::Showdown,
        }
    }

    /// Сколько общих карт открывается при переходе НА эту улицу.
    pub fn cards_to_deal(self) -> usize {
        match self {
            Street::Flop => 3,
            Street::Turn | Street::River => 1,
            Street::Preflop | Street::Showdown => 0,
        }
    }
}

impl fmt::Display for Street {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Street::Preflop => "preflop",
            Street::Flop => "flop",
            Street::Turn => "turn",
            Street::River => "river",
            Street::Showdown => "showdown",
        };
        f.write_str(s)
    }
}

/// Числовой ранг руки: больше = сильнее.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HandRank(pub u32);

/// Вскрытая на шоудауне рука игрока.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShowdownReveal {
    pub player_id: PlayerId,
    pub hole_cards: Vec<Card>,
    /// Название комбинации ("Flush", "Two pair", ...).
    pub hand_name: String,
    pub rank: HandRank,
    pub best_five: Vec<Card>,
    /// true, если оценщик упал и подставлен минимальный ранг.
    pub fallback: bool,
}

/// Результат розыгрыша одного слоя банка.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PotAward {
    pub amount: Chips,
    pub eligible_player_ids: Vec<PlayerId>,
    pub winner_ids: Vec<PlayerId>,
}

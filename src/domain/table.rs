use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::deck::Deck;
use crate::domain::hand::{PotAward, ShowdownReveal, Street};
use crate::domain::player::Player;
use crate::domain::{PlayerId, SeatIndex, SessionId};
use crate::engine::hand_history::ActionRecord;
use crate::engine::side_pots::SidePot;

/// Ровно столько игроков за столом.
pub const HEADS_UP_PLAYERS: usize = 2;

/// Ошибки конфигурации стола.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Блайнды должны быть больше нуля")]
    ZeroBlind,

    #[error("Большой блайнд ({big}) меньше малого ({small})")]
    BigBlindBelowSmall { small: Chips, big: Chips },

    #[error("Стартовый стек должен быть больше нуля")]
    ZeroStartingStack,

    #[error("Не удалось разобрать конфиг: {0}")]
    Parse(String),
}

/// Конфиг стола: блайнды и стартовый стек.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TableConfig {
    pub small_blind: Chips,
    pub big_blind: Chips,
    /// Сколько фишек получает каждый игрок при создании сессии.
    pub starting_stack: Chips,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            small_blind: Chips(10),
            big_blind: Chips(20),
            starting_stack: Chips(1_000),
        }
    }
}

impl TableConfig {
    pub fn new(small_blind: Chips, big_blind: Chips, starting_stack: Chips) -> Self {
        Self {
            small_blind,
            big_blind,
            starting_stack,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.small_blind.is_zero() || self.big_blind.is_zero() {
            return Err(ConfigError::ZeroBlind);
        }
        if self.big_blind < self.small_blind {
            return Err(ConfigError::BigBlindBelowSmall {
                small: self.small_blind,
                big: self.big_blind,
            });
        }
        if self.starting_stack.is_zero() {
            return Err(ConfigError::ZeroStartingStack);
        }
        Ok(())
    }

    /// Загрузить конфиг из JSON. Отсутствующие поля берутся из `Default`.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: TableConfig =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}

/// Нарушение инварианта состояния стола.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum InvariantViolation {
    #[error("Фишки не сходятся: ожидалось {expected}, на столе {actual}")]
    ChipsNotConserved { expected: Chips, actual: Chips },

    #[error("Колода, борд и карманные карты не образуют 52 уникальные карты")]
    CardsNotConserved,

    #[error("current_player_index={0} указывает на игрока, который не может ходить")]
    InvalidCurrentPlayer(SeatIndex),

    #[error("Ставка игрока {0} на улице больше его вклада за раздачу")]
    BetExceedsCommitment(PlayerId),
}

/// Полное состояние heads-up стола: текущая раздача + стеки.
///
/// Это же и снэпшот: возвращается по значению после каждой успешной мутации,
/// вызывающий код его сохраняет и может по нему восстановить сессию.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TableState {
    pub session_id: SessionId,
    /// Ровно 2 игрока, индекс = место.
    pub players: Vec<Player>,
    pub community_cards: Vec<Card>,
    /// Оставшиеся (не розданные) карты.
    pub deck: Deck,
    pub betting_round: Street,
    pub pot: Chips,
    pub side_pots: Vec<SidePot>,
    pub current_player_index: SeatIndex,
    pub dealer_index: SeatIndex,
    pub small_blind: Chips,
    pub big_blind: Chips,
    pub minimum_bet: Chips,
    pub last_raise_amount: Chips,
    pub hand_number: u64,
    pub action_history: Vec<ActionRecord>,
    pub is_hand_complete: bool,
    pub winner_ids: Vec<PlayerId>,
    /// Выигрыш каждого игрока в последней завершённой раздаче.
    pub last_winnings: BTreeMap<PlayerId, Chips>,
    pub showdown: Vec<ShowdownReveal>,
    pub pot_results: Vec<PotAward>,
    /// Победитель всего матча (у соперника закончились фишки).
    pub match_winner: Option<PlayerId>,
    /// Сколько фишек в «экономике» стола. Не меняется никогда.
    pub total_chips: Chips,
}

impl TableState {
    /// Пустой стол без раздачи. Карты не розданы, колода полная.
    pub fn new(session_id: impl Into<SessionId>, players: Vec<Player>, config: &TableConfig) -> Self {
        let total_chips = players.iter().map(|p| p.chips).sum();
        Self {
            session_id: session_id.into(),
            players,
            community_cards: Vec::new(),
            deck: Deck::standard_52(),
            betting_round: Street::Preflop,
            pot: Chips::ZERO,
            side_pots: Vec::new(),
            current_player_index: 0,
            dealer_index: 0,
            small_blind: config.small_blind,
            big_blind: config.big_blind,
            minimum_bet: config.big_blind,
            last_raise_amount: config.big_blind,
            hand_number: 0,
            action_history: Vec::new(),
            is_hand_complete: false,
            winner_ids: Vec::new(),
            last_winnings: BTreeMap::new(),
            showdown: Vec::new(),
            pot_results: Vec::new(),
            match_winner: None,
            total_chips,
        }
    }

    pub fn player_index(&self, player_id: &str) -> Option<SeatIndex> {
        self.players.iter().position(|p| p.id == player_id)
    }

    pub fn player(&self, player_id: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.id == player_id)
    }

    pub fn current_player(&self) -> Option<&Player> {
        self.players.get(self.current_player_index)
    }

    /// maxBet = max(betThisRound).
    pub fn max_bet(&self) -> Chips {
        self.players
            .iter()
            .map(|p| p.bet_this_round)
            .max()
            .unwrap_or(Chips::ZERO)
    }

    /// toCall = maxBet - betThisRound.
    pub fn to_call(&self, idx: SeatIndex) -> Chips {
        self.players
            .get(idx)
            .map(|p| self.max_bet().saturating_sub(p.bet_this_round))
            .unwrap_or(Chips::ZERO)
    }

    /// Минимальный размер повышающей части рейза.
    pub fn min_raise(&self) -> Chips {
        self.last_raise_amount.max(self.big_blind)
    }

    /// Сколько игроков ещё может действовать.
    pub fn active_count(&self) -> usize {
        self.players.iter().filter(|p| p.is_active()).count()
    }

    /// Сколько игроков претендует на банк (Active ∪ AllIn).
    pub fn in_hand_count(&self) -> usize {
        self.players.iter().filter(|p| p.is_in_hand()).count()
    }

    /// Фишки на столе: стеки + банк + сайд-поты.
    pub fn chips_on_table(&self) -> Chips {
        let stacks: Chips = self.players.iter().map(|p| p.chips).sum();
        let side: Chips = self.side_pots.iter().map(|sp| sp.amount).sum();
        stacks + self.pot + side
    }

    /// Проверка инвариантов, которые должны держаться после каждой мутации.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        let actual = self.chips_on_table();
        if actual != self.total_chips {
            return Err(InvariantViolation::ChipsNotConserved {
                expected: self.total_chips,
                actual,
            });
        }

        let mut seen: HashSet<Card> = HashSet::with_capacity(52);
        let all_cards = self
            .deck
            .cards
            .iter()
            .chain(self.community_cards.iter())
            .chain(self.players.iter().flat_map(|p| p.hole_cards.iter()));
        for card in all_cards {
            if !seen.insert(*card) {
                return Err(InvariantViolation::CardsNotConserved);
            }
        }
        if seen.len() != 52 {
            return Err(InvariantViolation::CardsNotConserved);
        }

        if let Some(p) = self
            .players
            .iter()
            .find(|p| p.bet_this_round > p.total_bet_this_hand)
        {
            return Err(InvariantViolation::BetExceedsCommitment(p.id.clone()));
        }

        if !self.is_hand_complete && self.hand_number > 0 {
            let ok = self
                .players
                .get(self.current_player_index)
                .map(|p| p.is_active())
                .unwrap_or(false);
            if !ok {
                return Err(InvariantViolation::InvalidCurrentPlayer(
                    self.current_player_index,
                ));
            }
        }

        Ok(())
    }
}

use core::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Масть карты.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Suit {
    Clubs,    // ♣
    Diamonds, // ♦
    Hearts,   // ♥
    Spades,   // ♠
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades];

    /// Символ масти для логов и CLI.
    pub fn symbol(self) -> char {
        match self {
            Suit::Clubs => '♣',
            Suit::Diamonds => '♦',
            Suit::Hearts => '♥',
            Suit::Spades => '♠',
        }
    }
}

/// Ранг карты.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Ord, PartialOrd)]
pub enum Rank {
    Two = 2,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
}

impl Rank {
    pub const ALL: [Rank; 13] = [
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
    ];

    /// Числовое значение 2..=14.
    pub fn value(self) -> u8 {
        self as u8
    }

    /// Обратное преобразование из 2..=14.
    pub fn from_value(v: u8) -> Option<Rank> {
        Rank::ALL.iter().copied().find(|r| r.value() == v)
    }
}

/// Обычная покерная карта (52-карточная колода).
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }
}

/// Ошибка разбора строки карты.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum CardParseError {
    #[error("Строка карты должна состоять из 2 символов: {0:?}")]
    BadLength(String),

    #[error("Неизвестный ранг: {0}")]
    BadRank(char),

    #[error("Неизвестная масть: {0}")]
    BadSuit(char),
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ch = match self {
            Suit::Clubs => 'c',
            Suit::Diamonds => 'd',
            Suit::Hearts => 'h',
            Suit::Spades => 's',
        };
        write!(f, "{ch}")
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ch = match self {
            Rank::Two => '2',
            Rank::Three => '3',
            Rank::Four => '4',
            Rank::Five => '5',
            Rank::Six => '6',
            Rank::Seven => '7',
            Rank::Eight => '8',
            Rank::Nine => '9',
            Rank::Ten => 'T',
            Rank::Jack => 'J',
            Rank::Queen => 'Q',
            Rank::King => 'K',
            Rank::Ace => 'A',
        };
        write!(f, "{ch}")
    }
}

impl fmt::Display for Card {
    /// Формат вида `Ah`, `Td`, `7c`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}

/// Парсинг строки вида "Ah", "Td", "7c".
impl FromStr for Card {
    type Err = CardParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let chars: Vec<char> = s.chars().collect();
        let &[r_ch, s_ch] = chars.as_slice() else {
            return Err(CardParseError::BadLength(s.to_string()));
        };

        let rank = match r_ch {
            '2'..='9' => r_ch
                .to_digit(10)
                .and_then(|d| Rank::from_value(d as u8))
                .ok_or(CardParseError::BadRank(r_ch))?,
            'T' | 't' => Rank::Ten,
            'J' | 'j' => Rank::Jack,
            'Q' | 'q' => Rank::Queen,
            'K' | 'k' => Rank::King,
            'A' | 'a' => Rank::Ace,
            _ => return Err(CardParseError::BadRank(r_ch)),
        };

        let suit = match s_ch {
            'c' | 'C' | '♣' => Suit::Clubs,
            'd' | 'D' | '♦' => Suit::Diamonds,
            'h' | 'H' | '♥' => Suit::Hearts,
            's' | 'S' | '♠' => Suit::Spades,
            _ => return Err(CardParseError::BadSuit(s_ch)),
        };

        Ok(Card { rank, suit })
    }
}

/// Разобрать список карт через пробел: "Ah Kd 7c".
pub fn parse_cards(s: &str) -> Result<Vec<Card>, CardParseError> {
    s.split_whitespace().map(Card::from_str).collect()
}

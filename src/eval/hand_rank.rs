use crate::domain::card::Rank;
use crate::domain::hand::HandRank;

/// Категория покерной руки по силе.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum HandCategory {
    HighCard = 0,
    OnePair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
}

impl HandCategory {
    fn from_id(id: u8) -> HandCategory {
        match id {
            1 => HandCategory::OnePair,
            2 => HandCategory::TwoPair,
            3 => HandCategory::ThreeOfAKind,
            4 => HandCategory::Straight,
            5 => HandCategory::Flush,
            6 => HandCategory::FullHouse,
            7 => HandCategory::FourOfAKind,
            8 => HandCategory::StraightFlush,
            _ => HandCategory::HighCard,
        }
    }
}

impl HandRank {
    /// Собрать HandRank из категории и до 5 рангов (от старшего к младшему).
    ///
    /// Схема кодирования (u32):
    ///   [категория:4 бита][r0:4][r1:4][r2:4][r3:4][r4:4]
    /// Недостающие ранги = 0. Ноль целиком – «пустая» рука ниже любой реальной.
    pub fn from_category_and_ranks(category: HandCategory, ranks: &[Rank]) -> Self {
        let mut value = ((category as u32) & 0x0F) << 20;
        for (i, r) in ranks.iter().take(5).enumerate() {
            value |= (r.value() as u32) << (16 - 4 * i);
        }
        // +1, чтобы самая слабая реальная рука была строго больше HandRank(0).
        HandRank(value + 1)
    }

    /// Вытащить категорию из HandRank.
    pub fn category(&self) -> HandCategory {
        HandCategory::from_id((self.0.saturating_sub(1) >> 20) as u8 & 0x0F)
    }
}

/// Человеческое описание руки по категории.
pub fn describe_hand(rank: HandRank) -> String {
    if rank.0 == 0 {
        return "Unknown".to_string();
    }
    let name = match rank.category() {
        HandCategory::HighCard => "High card",
        HandCategory::OnePair => "One pair",
        HandCategory::TwoPair => "Two pair",
        HandCategory::ThreeOfAKind => "Three of a kind",
        HandCategory::Straight => "Straight",
        HandCategory::Flush => "Flush",
        HandCategory::FullHouse => "Full house",
        HandCategory::FourOfAKind => "Four of a kind",
        HandCategory::StraightFlush => "Straight flush",
    };
    name.to_string()
}

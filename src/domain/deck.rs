use serde::{Deserialize, Serialize};

use crate::domain::card::{Card, Rank, Suit};

/// Колода карт. В домене — просто упорядоченный список оставшихся карт.
/// Перемешивание делает engine (через `RandomSource`), НЕ здесь.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Deck {
    pub cards: Vec<Card>,
}

impl Deck {
    /// Стандартная 52-карточная колода в порядке:
    /// Clubs 2..A, Diamonds 2..A, Hearts 2..A, Spades 2..A.
    pub fn standard_52() -> Self {
        let mut cards = Vec::with_capacity(52);
        for suit in Suit::ALL {
            for rank in Rank::ALL {
                cards.push(Card::new(rank, suit));
            }
        }
        Deck { cards }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn contains(&self, card: &Card) -> bool {
        self.cards.contains(card)
    }

    /// Взять одну карту сверху колоды.
    pub fn draw_one(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    /// Взять до n карт сверху. Если карт не хватает – вернёт сколько есть.
    pub fn draw_n(&mut self, n: usize) -> Vec<Card> {
        let take = n.min(self.cards.len());
        let mut taken = Vec::with_capacity(take);
        for _ in 0..take {
            if let Some(card) = self.cards.pop() {
                taken.push(card);
            }
        }
        taken
    }

    /// Убрать из колоды уже использованные карты.
    pub fn remove_cards(&mut self, to_remove: &[Card]) {
        self.cards.retain(|c| !to_remove.contains(c));
    }
}

impl Default for Deck {
    fn default() -> Self {
        Deck::standard_52()
    }
}

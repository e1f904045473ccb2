use std::collections::HashSet;

use crate::domain::card::{Card, Rank};
use crate::domain::hand::HandRank;

use super::hand_rank::{describe_hand, HandCategory};
use super::lookup_tables::{detect_straight, rank_to_bit, RankMask};
use super::{EvalError, EvaluatedHand, HandEvaluator};

/// Встроенный оценщик: перебирает все C(n,5) комбинаций (n = 5..=7).
#[derive(Clone, Copy, Debug, Default)]
pub struct StandardEvaluator;

impl HandEvaluator for StandardEvaluator {
    fn evaluate(&self, hole: &[Card], board: &[Card]) -> Result<EvaluatedHand, EvalError> {
        if hole.len() != 2 {
            return Err(EvalError::BadHoleCards(hole.len()));
        }
        if !(3..=5).contains(&board.len()) {
            return Err(EvalError::BadBoard(board.len()));
        }

        let mut seen = HashSet::with_capacity(7);
        for card in hole.iter().chain(board.iter()) {
            if !seen.insert(*card) {
                return Err(EvalError::DuplicateCard(*card));
            }
        }

        let mut all_cards = Vec::with_capacity(hole.len() + board.len());
        all_cards.extend_from_slice(hole);
        all_cards.extend_from_slice(board);

        let (rank, best_five) = best_of_all_5card_combinations(&all_cards);
        Ok(EvaluatedHand {
            name: describe_hand(rank),
            rank,
            best_five: best_five.to_vec(),
        })
    }
}

/// Перебираем все комбинации 5 карт из N (N=5–7) и выбираем лучшую.
fn best_of_all_5card_combinations(cards: &[Card]) -> (HandRank, [Card; 5]) {
    let n = cards.len();
    let mut best: Option<(HandRank, [Card; 5])> = None;

    for a in 0..n {
        for b in (a + 1)..n {
            for c in (b + 1)..n {
                for d in (c + 1)..n {
                    for e in (d + 1)..n {
                        let five = [cards[a], cards[b], cards[c], cards[d], cards[e]];
                        let r = evaluate_5card_hand(&five);
                        if best.map_or(true, |(best_r, _)| r > best_r) {
                            best = Some((r, five));
                        }
                    }
                }
            }
        }
    }

    // n >= 5 проверено вызывающим кодом, так что хотя бы одна комбинация есть.
    best.unwrap_or((HandRank(0), [cards[0]; 5]))
}

/// Оценка строго 5-карточной комбинации.
fn evaluate_5card_hand(cards: &[Card; 5]) -> HandRank {
    let mut rank_counts = [0u8; 15]; // индексы 2..=14
    let mut rank_mask: RankMask = 0;

    for card in cards.iter() {
        rank_counts[card.rank.value() as usize] += 1;
        rank_mask |= rank_to_bit(card.rank);
    }

    let is_flush = cards.iter().all(|c| c.suit == cards[0].suit);
    let straight_high = detect_straight(rank_mask);

    // (rank, count), сортировка: сначала по количеству, затем по рангу (desc).
    let mut groups: Vec<(Rank, u8)> = Rank::ALL
        .iter()
        .rev()
        .filter_map(|&r| {
            let c = rank_counts[r.value() as usize];
            (c > 0).then_some((r, c))
        })
        .collect();
    groups.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| b.0.cmp(&a.0)));

    let pattern: Vec<u8> = groups.iter().map(|g| g.1).collect();
    let ordered: Vec<Rank> = groups.iter().map(|g| g.0).collect();

    let category = match (is_flush, straight_high, pattern.as_slice()) {
        (true, Some(_), _) => HandCategory::StraightFlush,
        (_, _, [4, 1]) => HandCategory::FourOfAKind,
        (_, _, [3, 2]) => HandCategory::FullHouse,
        (true, None, _) => HandCategory::Flush,
        (false, Some(_), _) => HandCategory::Straight,
        (_, _, [3, 1, 1]) => HandCategory::ThreeOfAKind,
        (_, _, [2, 2, 1]) => HandCategory::TwoPair,
        (_, _, [2, 1, 1, 1]) => HandCategory::OnePair,
        _ => HandCategory::HighCard,
    };

    match category {
        // Для стритов сравнивается только старшая карта (wheel → пятёрка).
        HandCategory::StraightFlush | HandCategory::Straight => {
            let high = straight_high.unwrap_or(Rank::Five);
            HandRank::from_category_and_ranks(category, &[high])
        }
        _ => HandRank::from_category_and_ranks(category, &ordered),
    }
}

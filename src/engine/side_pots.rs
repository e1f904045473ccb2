use serde::{Deserialize, Serialize};

use crate::domain::{Chips, Player, PlayerId, TableState};

/// Слой банка: часть фишек, на которую претендуют только некоторые игроки.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SidePot {
    pub amount: Chips,
    pub eligible_player_ids: Vec<PlayerId>,
}

/// Посчитать слои банка по `total_bet_this_hand` игроков.
///
/// Пороги – различные суммы вкладов all-in игроков (по возрастанию),
/// последний слой (основной банк) – до максимального вклада за столом.
/// Фишки сфолдивших попадают в слои, но права на них не дают.
/// Выход: слои "от младших" к "старшим".
pub fn compute_side_pots(players: &[Player]) -> Vec<SidePot> {
    let top = players
        .iter()
        .map(|p| p.total_bet_this_hand)
        .max()
        .unwrap_or(Chips::ZERO);
    if top.is_zero() {
        return Vec::new();
    }

    let mut levels: Vec<Chips> = players
        .iter()
        .filter(|p| p.status == crate::domain::PlayerStatus::AllIn)
        .map(|p| p.total_bet_this_hand)
        .filter(|c| !c.is_zero())
        .collect();
    levels.push(top);
    levels.sort();
    levels.dedup();

    let mut pots: Vec<SidePot> = Vec::new();
    let mut prev_level = Chips::ZERO;

    for level in levels {
        // Вклад каждого игрока в диапазон (prev_level, level].
        let amount: Chips = players
            .iter()
            .map(|p| p.total_bet_this_hand.min(level) - p.total_bet_this_hand.min(prev_level))
            .sum();

        let eligible: Vec<PlayerId> = players
            .iter()
            .filter(|p| p.is_in_hand() && p.total_bet_this_hand >= level)
            .map(|p| p.id.clone())
            .collect();

        prev_level = level;

        if amount.is_zero() {
            continue;
        }

        if eligible.is_empty() {
            // Верхушку внесли только сфолдившие – досыпаем в предыдущий слой.
            if let Some(last) = pots.last_mut() {
                last.amount += amount;
            }
            continue;
        }

        pots.push(SidePot {
            amount,
            eligible_player_ids: eligible,
        });
    }

    pots
}

/// Вернуть игроку часть ставки, которую никто не уравнял.
///
/// Возвращает (игрок, сумма), если возврат был.
pub fn refund_uncalled_bet(state: &mut TableState) -> Option<(PlayerId, Chips)> {
    let (top_idx, top) = state
        .players
        .iter()
        .enumerate()
        .max_by_key(|(_, p)| p.total_bet_this_hand)
        .map(|(i, p)| (i, p.total_bet_this_hand))?;

    let second = state
        .players
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != top_idx)
        .map(|(_, p)| p.total_bet_this_hand)
        .max()
        .unwrap_or(Chips::ZERO);

    if top <= second {
        return None;
    }

    let excess = (top - second).min(state.pot);
    if excess.is_zero() {
        return None;
    }

    let player = &mut state.players[top_idx];
    player.chips += excess;
    player.total_bet_this_hand -= excess;
    player.bet_this_round -= excess.min(player.bet_this_round);
    state.pot -= excess;

    Some((player.id.clone(), excess))
}

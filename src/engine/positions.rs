use crate::domain::{SeatIndex, TableState};

/// Следующий Active игрок по часовой стрелке после `from` (с заворотом).
/// Если Active только сам `from` – вернёт `from`. Если Active нет – None.
pub fn next_active_after(state: &TableState, from: SeatIndex) -> Option<SeatIndex> {
    let n = state.players.len();
    if n == 0 {
        return None;
    }
    (1..=n)
        .map(|step| (from + step) % n)
        .find(|&idx| state.players[idx].is_active())
}

/// Следующее место после `from`, у игрока которого есть фишки.
pub fn next_funded_after(state: &TableState, from: SeatIndex) -> Option<SeatIndex> {
    let n = state.players.len();
    if n == 0 {
        return None;
    }
    (1..=n)
        .map(|step| (from + step) % n)
        .find(|&idx| !state.players[idx].chips.is_zero())
}

/// Первый, кто ходит на постфлоп-улице: первый Active слева от дилера.
/// Если Active нет – первый AllIn (это сразу ведёт к докрутке борда).
pub fn first_to_act_postflop(state: &TableState) -> Option<SeatIndex> {
    let n = state.players.len();
    if n == 0 {
        return None;
    }
    next_active_after(state, state.dealer_index).or_else(|| {
        (1..=n)
            .map(|step| (state.dealer_index + step) % n)
            .find(|&idx| state.players[idx].is_in_hand())
    })
}

/// Места по часовой стрелке, начиная со следующего за дилером.
pub fn seats_from_dealer(state: &TableState) -> Vec<SeatIndex> {
    let n = state.players.len();
    (1..=n).map(|step| (state.dealer_index + step) % n).collect()
}

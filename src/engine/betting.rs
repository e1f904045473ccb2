use tracing::warn;

use crate::domain::{Chips, SeatIndex, Street, TableState};
use crate::engine::actions::PlayerActionKind;
use crate::engine::hand_history::ActionRecord;
use crate::engine::positions::{first_to_act_postflop, next_active_after};

/// Применить уже провалидированное действие игрока `idx`.
///
/// Обновляет стек, банк, ставки, min bet/raise и флаги "действовал".
pub fn execute_action(state: &mut TableState, idx: SeatIndex, action: PlayerActionKind, now_ms: u64) {
    let to_call = state.to_call(idx);
    let max_bet_before = state.max_bet();
    let min_raise = state.min_raise();
    let min_bet = state.minimum_bet;

    let committed = match action {
        PlayerActionKind::Fold => {
            state.players[idx].status = crate::domain::PlayerStatus::Folded;
            None
        }
        PlayerActionKind::Check => None,
        PlayerActionKind::Call => Some(commit(state, idx, to_call)),
        PlayerActionKind::Bet(amount) => {
            let paid = commit(state, idx, amount);
            on_aggression(state, idx, paid, paid >= min_bet, true);
            Some(paid)
        }
        PlayerActionKind::Raise(amount) => {
            let paid = commit(state, idx, to_call + amount);
            let raise_size = paid.saturating_sub(to_call);
            on_aggression(state, idx, raise_size, raise_size >= min_raise, false);
            Some(paid)
        }
        PlayerActionKind::AllIn => {
            let stack = state.players[idx].chips;
            let paid = commit(state, idx, stack);
            let new_bet = state.players[idx].bet_this_round;
            if new_bet > max_bet_before {
                let raise_size = new_bet - max_bet_before;
                if max_bet_before.is_zero() {
                    // All-in вместо бета: открывает торговлю.
                    on_aggression(state, idx, raise_size, raise_size >= min_bet, true);
                } else {
                    on_aggression(state, idx, raise_size, raise_size >= min_raise, false);
                }
            }
            Some(paid)
        }
    };

    let player = &mut state.players[idx];
    player.acted_this_round = true;
    player.last_action = Some(action);

    state.action_history.push(ActionRecord {
        player_id: player.id.clone(),
        action,
        amount: committed,
        round: state.betting_round,
        timestamp: now_ms,
    });
}

/// Перенести фишки игрока в банк.
fn commit(state: &mut TableState, idx: SeatIndex, amount: Chips) -> Chips {
    let paid = state.players[idx].commit(amount);
    state.pot += paid;
    paid
}

/// Обработка bet/raise/all-in сверх текущей ставки.
///
/// Полная агрессия обновляет min bet/raise и заново открывает действие всем остальным.
/// Неполный all-in рейз ничего не переоткрывает: уже действовавшие могут только
/// уравнять или сфолдить. Первый бет на улице открывает торговлю всегда.
fn on_aggression(state: &mut TableState, idx: SeatIndex, size: Chips, full: bool, opening: bool) {
    if full {
        state.minimum_bet = size;
        state.last_raise_amount = size;
    }
    if full || opening {
        for (i, p) in state.players.iter_mut().enumerate() {
            if i != idx {
                p.acted_this_round = false;
            }
        }
    }
}

/// Передать ход следующему Active игроку по часовой стрелке.
/// Если Active нет – индекс не меняется.
pub fn advance_turn(state: &mut TableState) {
    if let Some(next) = next_active_after(state, state.current_player_index) {
        state.current_player_index = next;
    }
}

/// Завершён ли раунд ставок на текущей улице.
pub fn is_round_complete(state: &TableState) -> bool {
    if state.in_hand_count() <= 1 {
        return true;
    }
    if state.active_count() == 0 {
        return true;
    }
    let max_bet = state.max_bet();
    // Флаг acted сбрасывается при каждой полной агрессии, а блайнды действием
    // не считаются – поэтому опция большого блайнда на префлопе учитывается сама.
    state
        .players
        .iter()
        .filter(|p| p.is_active())
        .all(|p| p.bet_this_round == max_bet && p.acted_this_round)
}

/// Переход на следующую улицу (не шоудаун): сброс ставок, открытие карт,
/// первый ход – первому Active слева от дилера.
///
/// Возвращает `false`, если колода не дала всех карт улицы.
pub fn advance_round(state: &mut TableState) -> bool {
    let next = state.betting_round.next();
    reset_round_bets(state);
    let wanted = next.cards_to_deal();
    let dealt = deal_community(state, wanted);
    state.betting_round = next;
    if let Some(first) = first_to_act_postflop(state) {
        state.current_player_index = first;
    }
    dealt == wanted
}

/// Сбросить ставки улицы и min bet/raise.
pub fn reset_round_bets(state: &mut TableState) {
    for p in state.players.iter_mut() {
        p.bet_this_round = Chips::ZERO;
        p.acted_this_round = false;
    }
    state.minimum_bet = state.big_blind;
    state.last_raise_amount = state.big_blind;
}

/// Открыть `n` общих карт. Если колода кончилась – открываем сколько есть и пишем в лог.
pub fn deal_community(state: &mut TableState, n: usize) -> usize {
    let cards = state.deck.draw_n(n);
    if cards.len() < n {
        warn!(
            session_id = %state.session_id,
            hand_number = state.hand_number,
            wanted = n,
            dealt = cards.len(),
            "в колоде не хватает карт для борда"
        );
    }
    let dealt = cards.len();
    state.community_cards.extend(cards);
    dealt
}

/// Докрутить борд до ривера без торговли (все, кто может ставить, уже в all-in).
pub fn run_out_board(state: &mut TableState) {
    while state.betting_round < Street::River {
        let next = state.betting_round.next();
        reset_round_bets(state);
        deal_community(state, next.cards_to_deal());
        state.betting_round = next;
    }
}

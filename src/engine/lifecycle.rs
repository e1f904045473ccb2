//! Жизненный цикл раздачи: создание сессии, блайнды, раздача карт,
//! ротация дилера и перезапуск состояния под следующую раздачу.

use tracing::{info, warn};

use crate::domain::{Chips, Deck, Player, PlayerId, SeatIndex, Street, TableConfig, TableState, HEADS_UP_PLAYERS};
use crate::engine::errors::EngineError;
use crate::engine::game_loop::finish_round;
use crate::engine::positions::next_funded_after;
use crate::engine::RandomSource;
use crate::eval::HandEvaluator;

/// Создать сессию на двоих и сразу раздать первую раздачу.
///
/// Дилер выбирается случайно, стеки = `config.starting_stack`.
pub fn initialize_state(
    session_id: &str,
    player_ids: &[PlayerId],
    config: &TableConfig,
    rng: &mut dyn RandomSource,
    evaluator: &dyn HandEvaluator,
) -> Result<TableState, EngineError> {
    config.validate()?;

    if player_ids.len() != HEADS_UP_PLAYERS {
        return Err(EngineError::InvalidPlayerCount(player_ids.len()));
    }
    if player_ids[0] == player_ids[1] {
        return Err(EngineError::DuplicatePlayer(player_ids[0].clone()));
    }

    let players = player_ids
        .iter()
        .map(|id| Player::new(id.clone(), config.starting_stack))
        .collect();

    let mut state = TableState::new(session_id, players, config);
    state.dealer_index = rng.choose_index(HEADS_UP_PLAYERS);
    state.hand_number = 1;

    deal_hand(&mut state, rng, evaluator)?;
    Ok(state)
}

/// Следующая раздача: ротация дилера, новые блайнды и карты.
///
/// Если фишки остались меньше чем у двух игроков – матч окончен,
/// единственный игрок с фишками объявляется победителем, карты не раздаются.
pub fn start_new_hand(
    state: &mut TableState,
    rng: &mut dyn RandomSource,
    evaluator: &dyn HandEvaluator,
) -> Result<(), EngineError> {
    if state.match_winner.is_some() {
        return Ok(());
    }
    // Снэпшот мог прийти снаружи (set_state, хранилище) – места не угадываем.
    if state.players.len() != HEADS_UP_PLAYERS {
        return Err(EngineError::InvalidPlayerCount(state.players.len()));
    }
    if !state.is_hand_complete && state.hand_number > 0 {
        return Err(EngineError::HandStillInProgress);
    }

    let funded: Vec<SeatIndex> = state
        .players
        .iter()
        .enumerate()
        .filter(|(_, p)| !p.chips.is_zero())
        .map(|(i, _)| i)
        .collect();

    if funded.len() < HEADS_UP_PLAYERS {
        declare_match_winner(state, funded.first().copied());
        return Ok(());
    }

    state.dealer_index =
        next_funded_after(state, state.dealer_index).ok_or(EngineError::NotEnoughPlayers)?;
    state.hand_number += 1;

    deal_hand(state, rng, evaluator)
}

/// Терминальное состояние матча: карт нет, колода целая.
fn declare_match_winner(state: &mut TableState, winner: Option<SeatIndex>) {
    for p in state.players.iter_mut() {
        p.reset_for_new_hand();
    }
    state.community_cards.clear();
    state.deck = Deck::standard_52();
    state.side_pots.clear();
    state.action_history.clear();
    state.showdown.clear();
    state.pot_results.clear();
    state.last_winnings.clear();
    state.is_hand_complete = true;

    let winner_id = winner.map(|idx| state.players[idx].id.clone());
    state.winner_ids = winner_id.iter().cloned().collect();
    state.match_winner = winner_id;

    info!(
        session_id = %state.session_id,
        winner = ?state.match_winner,
        "матч окончен"
    );
}

/// Сброс раздачи, перемешивание, карманные карты и блайнды.
fn deal_hand(
    state: &mut TableState,
    rng: &mut dyn RandomSource,
    evaluator: &dyn HandEvaluator,
) -> Result<(), EngineError> {
    for p in state.players.iter_mut() {
        p.reset_for_new_hand();
    }

    let mut deck = Deck::standard_52();
    rng.shuffle(&mut deck.cards);
    state.deck = deck;

    state.community_cards.clear();
    state.betting_round = Street::Preflop;
    state.pot = Chips::ZERO;
    state.side_pots.clear();
    state.action_history.clear();
    state.is_hand_complete = false;
    state.winner_ids.clear();
    state.last_winnings.clear();
    state.showdown.clear();
    state.pot_results.clear();
    state.minimum_bet = state.big_blind;
    state.last_raise_amount = state.big_blind;

    // В heads-up дилер = малый блайнд.
    let dealer = state.dealer_index;
    let big_blind_seat = (dealer + 1) % HEADS_UP_PLAYERS;
    state.players[dealer].is_dealer = true;
    state.players[dealer].is_small_blind = true;
    state.players[big_blind_seat].is_big_blind = true;

    deal_hole_cards(state, [big_blind_seat, dealer]);

    let sb_amount = state.small_blind;
    let bb_amount = state.big_blind;
    let sb_paid = state.players[dealer].commit(sb_amount);
    let bb_paid = state.players[big_blind_seat].commit(bb_amount);
    state.pot = sb_paid + bb_paid;

    // Префлоп первым ходит дилер, если он не ушёл в all-in блайндом.
    state.current_player_index = if state.players[dealer].is_active() {
        dealer
    } else {
        big_blind_seat
    };

    info!(
        session_id = %state.session_id,
        hand_number = state.hand_number,
        dealer = %state.players[dealer].id,
        small_blind = %sb_paid,
        big_blind = %bb_paid,
        "новая раздача"
    );

    if nobody_left_to_decide(state) {
        finish_round(state, evaluator)?;
    }

    Ok(())
}

/// Карманные карты – по одной за круг, начиная слева от дилера.
fn deal_hole_cards(state: &mut TableState, order: [SeatIndex; HEADS_UP_PLAYERS]) {
    for _round in 0..2 {
        for &seat in &order {
            match state.deck.draw_one() {
                Some(card) => state.players[seat].hole_cards.push(card),
                None => warn!(
                    session_id = %state.session_id,
                    seat,
                    "колода пуста при раздаче карманных карт"
                ),
            }
        }
    }
}

/// После блайндов торговаться некому: оба в all-in, либо единственный Active
/// уже покрывает все ставки.
fn nobody_left_to_decide(state: &TableState) -> bool {
    match state.active_count() {
        0 => true,
        1 => state
            .players
            .iter()
            .position(|p| p.is_active())
            .map_or(true, |idx| state.to_call(idx).is_zero()),
        _ => false,
    }
}

use std::cmp::Ordering;
use std::collections::BTreeMap;

use tracing::{debug, info, warn};

use crate::domain::{Chips, PlayerId, PotAward, SeatIndex, ShowdownReveal, Street, TableState};
use crate::engine::errors::EngineError;
use crate::engine::positions::seats_from_dealer;
use crate::engine::side_pots::{compute_side_pots, refund_uncalled_bet};
use crate::eval::{EvaluatedHand, HandEvaluator};

/// Все, кроме одного, сфолдили: оставшийся забирает весь банк без вскрытия.
pub fn settle_fold_out(state: &mut TableState) -> Result<Vec<PlayerId>, EngineError> {
    if state.is_hand_complete {
        return Err(EngineError::HandAlreadyComplete);
    }

    let winner_idx = state
        .players
        .iter()
        .position(|p| p.is_in_hand())
        .ok_or(EngineError::Internal("нет игрока, претендующего на банк"))?;

    let amount = state.pot + state.side_pots.iter().map(|sp| sp.amount).sum::<Chips>();
    let winner = &mut state.players[winner_idx];
    winner.chips += amount;
    let winner_id = winner.id.clone();

    state.pot = Chips::ZERO;
    state.side_pots.clear();
    state.pot_results = vec![PotAward {
        amount,
        eligible_player_ids: vec![winner_id.clone()],
        winner_ids: vec![winner_id.clone()],
    }];
    state.last_winnings = BTreeMap::from([(winner_id.clone(), amount)]);
    state.winner_ids = vec![winner_id.clone()];
    state.is_hand_complete = true;

    info!(
        session_id = %state.session_id,
        hand_number = state.hand_number,
        winner = %winner_id,
        %amount,
        "раздача завершена фолдом"
    );

    Ok(state.winner_ids.clone())
}

/// Шоудаун: возврат неуравненной ставки, слои банка, оценка рук, выплаты.
///
/// Ошибка оценки руки одного игрока не прерывает расчёт: ему подставляется
/// минимальный ранг.
pub fn settle_showdown(
    state: &mut TableState,
    evaluator: &dyn HandEvaluator,
) -> Result<Vec<PlayerId>, EngineError> {
    if state.is_hand_complete {
        return Err(EngineError::HandAlreadyComplete);
    }

    state.betting_round = Street::Showdown;

    if let Some((player_id, amount)) = refund_uncalled_bet(state) {
        debug!(
            session_id = %state.session_id,
            player = %player_id,
            %amount,
            "возврат неуравненной ставки"
        );
    }

    // Весь банк раскладываем по слоям.
    let layers = compute_side_pots(&state.players);
    let layered: Chips = layers.iter().map(|sp| sp.amount).sum();
    state.pot -= layered;
    state.side_pots = layers;
    if !state.pot.is_zero() {
        let rest = state.pot;
        state.pot = Chips::ZERO;
        match state.side_pots.last_mut() {
            Some(last) => last.amount += rest,
            None => return Err(EngineError::Internal("банк без слоёв")),
        }
    }

    // Оцениваем каждого претендента один раз, в порядке от дилера.
    let mut hands: Vec<(SeatIndex, EvaluatedHand)> = Vec::new();
    let mut reveals = Vec::new();
    for idx in seats_from_dealer(state) {
        let player = &state.players[idx];
        if !player.is_in_hand() {
            continue;
        }
        let (hand, fallback) = match evaluator.evaluate(&player.hole_cards, &state.community_cards) {
            Ok(hand) => (hand, false),
            Err(err) => {
                warn!(
                    session_id = %state.session_id,
                    player = %player.id,
                    error = %err,
                    "не удалось оценить руку, подставляем минимальный ранг"
                );
                (EvaluatedHand::fallback(), true)
            }
        };
        reveals.push(ShowdownReveal {
            player_id: player.id.clone(),
            hole_cards: player.hole_cards.clone(),
            hand_name: hand.name.clone(),
            rank: hand.rank,
            best_five: hand.best_five.clone(),
            fallback,
        });
        hands.push((idx, hand));
    }

    let mut winnings: BTreeMap<PlayerId, Chips> = BTreeMap::new();
    let mut awards = Vec::new();

    for pot in std::mem::take(&mut state.side_pots) {
        let mut contenders: Vec<&(SeatIndex, EvaluatedHand)> = hands
            .iter()
            .filter(|(idx, _)| pot.eligible_player_ids.contains(&state.players[*idx].id))
            .collect();

        // Стабильная сортировка: при равных руках сохраняется порядок от дилера.
        contenders.sort_by(|a, b| evaluator.compare(&b.1, &a.1));
        let Some(best) = contenders.first().map(|c| &c.1) else {
            return Err(EngineError::Internal("нет претендентов на банк"));
        };
        let winners: Vec<SeatIndex> = contenders
            .iter()
            .take_while(|c| evaluator.compare(&c.1, best) == Ordering::Equal)
            .map(|c| c.0)
            .collect();

        // Лишние фишки при делении – по одной, начиная с первого в порядке.
        let (share, remainder) = pot.amount.split(winners.len());
        let mut winner_ids = Vec::with_capacity(winners.len());
        for (i, &idx) in winners.iter().enumerate() {
            let prize = if (i as u64) < remainder { share + Chips(1) } else { share };
            let player = &mut state.players[idx];
            player.chips += prize;
            *winnings.entry(player.id.clone()).or_insert(Chips::ZERO) += prize;
            winner_ids.push(player.id.clone());
        }

        awards.push(PotAward {
            amount: pot.amount,
            eligible_player_ids: pot.eligible_player_ids,
            winner_ids,
        });
    }

    state.pot = Chips::ZERO;
    state.showdown = reveals;
    state.pot_results = awards;
    state.winner_ids = state
        .players
        .iter()
        .filter(|p| winnings.get(&p.id).map_or(false, |w| !w.is_zero()))
        .map(|p| p.id.clone())
        .collect();
    state.last_winnings = winnings;
    state.is_hand_complete = true;

    info!(
        session_id = %state.session_id,
        hand_number = state.hand_number,
        winners = ?state.winner_ids,
        "шоудаун завершён"
    );

    Ok(state.winner_ids.clone())
}

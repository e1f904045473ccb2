use tracing::debug;

use crate::domain::{PlayerId, Street, TableState};
use crate::engine::actions::PlayerActionKind;
use crate::engine::betting::{advance_round, advance_turn, execute_action, is_round_complete, run_out_board};
use crate::engine::errors::EngineError;
use crate::engine::showdown::{settle_fold_out, settle_showdown};
use crate::engine::validation::validate_action;
use crate::eval::HandEvaluator;

/// Статус раздачи для внешнего кода.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HandStatus {
    Ongoing,
    Finished { winner_ids: Vec<PlayerId> },
}

impl HandStatus {
    pub fn is_finished(&self) -> bool {
        matches!(self, HandStatus::Finished { .. })
    }
}

/// Применить действие игрока. Возвращает статус раздачи (идёт / закончилась).
///
/// Вся валидация выполняется до первой мутации: при ошибке состояние не меняется.
pub fn apply_action(
    state: &mut TableState,
    player_id: &str,
    action: PlayerActionKind,
    evaluator: &dyn HandEvaluator,
    now_ms: u64,
) -> Result<HandStatus, EngineError> {
    if state.is_hand_complete {
        return Err(EngineError::HandAlreadyComplete);
    }

    let idx = state
        .player_index(player_id)
        .ok_or_else(|| EngineError::PlayerNotAtTable(player_id.to_string()))?;

    if idx != state.current_player_index {
        return Err(EngineError::NotPlayersTurn(player_id.to_string()));
    }

    validate_action(state, idx, &action)?;

    execute_action(state, idx, action, now_ms);

    debug!(
        session_id = %state.session_id,
        player = player_id,
        %action,
        street = %state.betting_round,
        pot = %state.pot,
        "действие применено"
    );

    // Остался один претендент – он забирает банк, дальше не раздаём.
    if state.in_hand_count() == 1 {
        let winner_ids = settle_fold_out(state)?;
        return Ok(HandStatus::Finished { winner_ids });
    }

    advance_turn(state);

    if is_round_complete(state) {
        finish_round(state, evaluator)
    } else {
        Ok(HandStatus::Ongoing)
    }
}

/// Раунд ставок завершён: следующая улица, докрутка до шоудауна или шоудаун.
pub fn finish_round(
    state: &mut TableState,
    evaluator: &dyn HandEvaluator,
) -> Result<HandStatus, EngineError> {
    if state.in_hand_count() <= 1 {
        let winner_ids = settle_fold_out(state)?;
        return Ok(HandStatus::Finished { winner_ids });
    }

    // Торговаться больше не с кем – открываем оставшиеся карты без ставок.
    if state.active_count() < 2 {
        run_out_board(state);
        let winner_ids = settle_showdown(state, evaluator)?;
        return Ok(HandStatus::Finished { winner_ids });
    }

    if state.betting_round >= Street::River {
        let winner_ids = settle_showdown(state, evaluator)?;
        return Ok(HandStatus::Finished { winner_ids });
    }

    // Колода кончилась: на неполном борде не торгуемся, сразу к шоудауну.
    if !advance_round(state) {
        run_out_board(state);
        let winner_ids = settle_showdown(state, evaluator)?;
        return Ok(HandStatus::Finished { winner_ids });
    }
    Ok(HandStatus::Ongoing)
}

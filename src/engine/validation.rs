use crate::domain::{SeatIndex, TableState};
use crate::engine::actions::PlayerActionKind;
use crate::engine::errors::EngineError;

/// Может ли игрок `idx` выполнить это действие при текущем состоянии ставок.
///
/// Чистая функция: ничего не меняет. Очередность хода проверяется снаружи.
pub fn validate_action(
    state: &TableState,
    idx: SeatIndex,
    action: &PlayerActionKind,
) -> Result<(), EngineError> {
    if state.is_hand_complete {
        return Err(EngineError::HandAlreadyComplete);
    }

    let player = state
        .players
        .get(idx)
        .ok_or(EngineError::Internal("индекс игрока вне стола"))?;

    if !player.is_active() {
        return Err(EngineError::PlayerNotActive(player.id.clone()));
    }

    let chips = player.chips;
    let to_call = state.to_call(idx);
    // Игрок уже действовал после последней полной агрессии, но перед ним снова ставка –
    // значит, её поднял неполный all-in. Рейз для него закрыт.
    let raising_closed = player.acted_this_round && !to_call.is_zero();

    match *action {
        PlayerActionKind::Fold => Ok(()),

        PlayerActionKind::Check => {
            if to_call.is_zero() {
                Ok(())
            } else {
                Err(EngineError::CannotCheck { to_call })
            }
        }

        // Call при нехватке стека разрешён – превратится в all-in call.
        PlayerActionKind::Call => {
            if to_call.is_zero() {
                Err(EngineError::CannotCall)
            } else {
                Ok(())
            }
        }

        PlayerActionKind::Bet(amount) => {
            if !to_call.is_zero() {
                return Err(EngineError::CannotBet { to_call });
            }
            if amount.is_zero() {
                return Err(EngineError::ZeroAmount);
            }
            if amount > chips {
                return Err(EngineError::NotEnoughChips {
                    needed: amount,
                    available: chips,
                });
            }
            if amount < state.minimum_bet && amount != chips {
                return Err(EngineError::BetTooSmall {
                    amount,
                    minimum: state.minimum_bet,
                });
            }
            Ok(())
        }

        PlayerActionKind::Raise(amount) => {
            if to_call.is_zero() {
                return Err(EngineError::CannotRaise);
            }
            if amount.is_zero() {
                return Err(EngineError::ZeroAmount);
            }
            let needed = to_call + amount;
            if needed > chips {
                return Err(EngineError::NotEnoughChips {
                    needed,
                    available: chips,
                });
            }
            let minimum = state.min_raise();
            if amount < minimum && needed < chips {
                return Err(EngineError::RaiseTooSmall { amount, minimum });
            }
            if raising_closed {
                return Err(EngineError::RaisingClosed);
            }
            Ok(())
        }

        PlayerActionKind::AllIn => {
            if chips.is_zero() {
                return Err(EngineError::NoChips);
            }
            if raising_closed && chips > to_call {
                return Err(EngineError::RaisingClosed);
            }
            Ok(())
        }
    }
}

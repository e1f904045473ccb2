use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::{Chips, PlayerId, SessionId, TableState};
use crate::engine::{ActionOutcome, TableManager};

use super::errors::ApiError;

/// Команда верхнего уровня (всё, что меняет состояние сессии).
///
/// JSON: `{"type": "player_action", "session_id": "...", ...}`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Command {
    /// Создать сессию на двоих и раздать первую раздачу.
    InitializeState {
        session_id: SessionId,
        player_ids: Vec<PlayerId>,
    },

    /// Действие игрока в текущей раздаче.
    PlayerAction(ActionCommand),

    /// Следующая раздача (или объявление победителя матча).
    StartNewHand { session_id: SessionId },

    /// Убрать сессию из кэша.
    DeleteState { session_id: SessionId },
}

/// Действие игрока в "сыром" виде: строка + опциональная сумма.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ActionCommand {
    pub session_id: SessionId,
    pub player_id: PlayerId,
    /// `fold | check | call | bet | raise | all-in`.
    pub action: String,
    /// Обязательна для `bet` и `raise`. Для `raise` – прибавка сверх колла.
    #[serde(default)]
    pub amount: Option<u64>,
}

/// Ответ на команду.
#[derive(Clone, Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CommandResponse {
    State { state: TableState },
    Action { outcome: ActionOutcome },
    Deleted { session_id: SessionId, existed: bool },
}

impl Command {
    pub fn from_json(json: &str) -> Result<Self, ApiError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn session_id(&self) -> &str {
        match self {
            Command::InitializeState { session_id, .. }
            | Command::StartNewHand { session_id }
            | Command::DeleteState { session_id } => session_id,
            Command::PlayerAction(cmd) => &cmd.session_id,
        }
    }

    /// Выполнить команду через менеджер.
    ///
    /// Отклонённое действие игрока – не ошибка API: оно возвращается
    /// как `CommandResponse::Action` с `success = false`.
    pub async fn execute(self, manager: &TableManager) -> Result<CommandResponse, ApiError> {
        debug!(session_id = self.session_id(), command = ?self, "команда");

        match self {
            Command::InitializeState {
                session_id,
                player_ids,
            } => {
                let state = manager.initialize_state(&session_id, &player_ids).await?;
                Ok(CommandResponse::State { state })
            }
            Command::PlayerAction(cmd) => {
                let outcome = manager
                    .process_raw_action(
                        &cmd.session_id,
                        &cmd.player_id,
                        &cmd.action,
                        cmd.amount.map(Chips),
                    )
                    .await;
                Ok(CommandResponse::Action { outcome })
            }
            Command::StartNewHand { session_id } => match manager.start_new_hand(&session_id).await? {
                Some(state) => Ok(CommandResponse::State { state }),
                None => Err(ApiError::SessionNotFound(session_id)),
            },
            Command::DeleteState { session_id } => {
                let existed = manager.delete_state(&session_id).is_some();
                Ok(CommandResponse::Deleted {
                    session_id,
                    existed,
                })
            }
        }
    }
}

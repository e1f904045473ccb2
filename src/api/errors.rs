use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::SessionId;
use crate::engine::EngineError;

/// Ошибки внешнего API (то, что отдаём клиенту).
#[derive(Clone, Debug, Error, Serialize, Deserialize, PartialEq, Eq)]
pub enum ApiError {
    /// Неправильные входные данные (например, битый JSON).
    #[error("Некорректный запрос: {0}")]
    BadRequest(String),

    #[error("Сессия {0} не найдена")]
    SessionNotFound(SessionId),

    /// Команда не может быть выполнена в текущем состоянии.
    #[error("Команда отклонена: {0}")]
    Rejected(String),
}

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::SessionNotFound(id) => ApiError::SessionNotFound(id),
            other => ApiError::Rejected(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

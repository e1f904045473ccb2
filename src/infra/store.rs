use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use crate::domain::{SessionId, TableState};

/// Кэш снэпшотов: session id → состояние стола.
///
/// Никакой логики, только хранение. Запись никогда не теряется молча.
#[derive(Debug, Default)]
pub struct StateStore {
    sessions: RwLock<HashMap<SessionId, TableState>>,
}

impl StateStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, session_id: &str) -> Option<TableState> {
        self.sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(session_id)
            .cloned()
    }

    pub fn set(&self, session_id: &str, state: TableState) {
        self.sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(session_id.to_string(), state);
    }

    /// Удалить сессию; вернёт удалённое состояние, если оно было.
    pub fn delete(&self, session_id: &str) -> Option<TableState> {
        self.sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(session_id)
    }

    pub fn contains(&self, session_id: &str) -> bool {
        self.sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(session_id)
    }

    pub fn len(&self) -> usize {
        self.sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

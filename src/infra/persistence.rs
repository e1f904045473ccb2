use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use crate::domain::{SessionId, TableState};

/// Внешнее хранилище снэпшотов (реализует вызывающий код).
///
/// Движок только читает отсюда при промахе кэша; сохранять возвращённые
/// снэпшоты – забота вызывающего.
pub trait SnapshotSource: Send + Sync {
    fn load_snapshot(&self, session_id: &str) -> Option<TableState>;
}

/// Хранилища нет – промах кэша означает «сессия не найдена».
#[derive(Clone, Copy, Debug, Default)]
pub struct NoPersistence;

impl SnapshotSource for NoPersistence {
    fn load_snapshot(&self, _session_id: &str) -> Option<TableState> {
        None
    }
}

/// Простая in-memory реализация для тестов и локального запуска.
#[derive(Debug, Default)]
pub struct InMemorySnapshots {
    snapshots: RwLock<HashMap<SessionId, TableState>>,
}

impl InMemorySnapshots {
    pub fn new() -> Self {
        Self::default()
    }

    /// Сохранить снэпшот (так делает вызывающий после каждой мутации).
    pub fn save_snapshot(&self, state: &TableState) {
        self.snapshots
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(state.session_id.clone(), state.clone());
    }

    pub fn remove_snapshot(&self, session_id: &str) {
        self.snapshots
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(session_id);
    }
}

impl SnapshotSource for InMemorySnapshots {
    fn load_snapshot(&self, session_id: &str) -> Option<TableState> {
        self.snapshots
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(session_id)
            .cloned()
    }
}

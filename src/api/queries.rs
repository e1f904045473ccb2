use serde::{Deserialize, Serialize};

use crate::domain::{PlayerId, SessionId, TableState};
use crate::engine::TableManager;

use super::dto::{build_table_view, TableView};

/// Запросы "только чтение".
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Query {
    /// Полный снэпшот (с колодой и всеми картами) – для хранилища и отладки.
    GetState { session_id: SessionId },

    /// Стол глазами игрока (`viewer = None` – наблюдатель).
    GetView {
        session_id: SessionId,
        #[serde(default)]
        viewer: Option<PlayerId>,
    },
}

/// Результат запроса. `None` – сессии нет в кэше.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum QueryResponse {
    State(Option<TableState>),
    View(Option<TableView>),
}

pub fn run_query(manager: &TableManager, query: &Query) -> QueryResponse {
    match query {
        Query::GetState { session_id } => QueryResponse::State(manager.get_state(session_id)),
        Query::GetView { session_id, viewer } => QueryResponse::View(
            manager
                .get_state(session_id)
                .map(|state| build_table_view(&state, viewer.as_deref())),
        ),
    }
}

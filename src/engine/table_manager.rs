use std::sync::{Arc, Mutex, PoisonError};

use serde::Serialize;
use tracing::{debug, info};

use crate::domain::{Chips, ConfigError, PlayerId, TableConfig, TableState};
use crate::engine::actions::PlayerActionKind;
use crate::engine::errors::EngineError;
use crate::engine::game_loop::{apply_action, HandStatus};
use crate::engine::lifecycle;
use crate::engine::RandomSource;
use crate::eval::{HandEvaluator, StandardEvaluator};
use crate::infra::{now_millis, NoPersistence, SessionLocks, SnapshotSource, StateStore, SystemRng};

/// Результат `process_action` для внешнего кода.
///
/// При отказе `state` – неизменённый снэпшот (если сессия существует).
#[derive(Clone, Debug, Serialize)]
pub struct ActionOutcome {
    pub success: bool,
    pub state: Option<TableState>,
    pub error: Option<String>,
    /// Типизированная причина отказа (в JSON не уходит, там есть `error`).
    #[serde(skip)]
    pub rejection: Option<EngineError>,
    pub hand_complete: bool,
    pub winners: Vec<PlayerId>,
}

impl ActionOutcome {
    fn accepted(state: TableState, status: HandStatus) -> Self {
        let (hand_complete, winners) = match status {
            HandStatus::Ongoing => (false, Vec::new()),
            HandStatus::Finished { winner_ids } => (true, winner_ids),
        };
        Self {
            success: true,
            state: Some(state),
            error: None,
            rejection: None,
            hand_complete,
            winners,
        }
    }

    fn rejected(state: Option<TableState>, err: EngineError) -> Self {
        Self {
            success: false,
            state,
            error: Some(err.to_string()),
            rejection: Some(err),
            hand_complete: false,
            winners: Vec::new(),
        }
    }
}

/// Фасад движка над множеством сессий.
///
/// - все мутации одной сессии идут строго по очереди через `SessionLocks`;
/// - действие применяется к копии снэпшота, в кэш попадает только успешный результат;
/// - при промахе кэша сессия поднимается из `SnapshotSource`.
///
/// Вызывающий сохраняет возвращённые снэпшоты сам.
pub struct TableManager {
    config: TableConfig,
    store: StateStore,
    locks: SessionLocks,
    persistence: Arc<dyn SnapshotSource>,
    evaluator: Arc<dyn HandEvaluator>,
    rng: Mutex<Box<dyn RandomSource + Send>>,
}

impl TableManager {
    pub fn new(config: TableConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            store: StateStore::new(),
            locks: SessionLocks::new(),
            persistence: Arc::new(NoPersistence),
            evaluator: Arc::new(StandardEvaluator),
            rng: Mutex::new(Box::new(SystemRng)),
        })
    }

    pub fn with_persistence(mut self, persistence: Arc<dyn SnapshotSource>) -> Self {
        self.persistence = persistence;
        self
    }

    pub fn with_evaluator(mut self, evaluator: Arc<dyn HandEvaluator>) -> Self {
        self.evaluator = evaluator;
        self
    }

    pub fn with_rng(mut self, rng: impl RandomSource + Send + 'static) -> Self {
        self.rng = Mutex::new(Box::new(rng));
        self
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    /// Создать (или пересоздать) сессию и раздать первую раздачу.
    pub async fn initialize_state(
        &self,
        session_id: &str,
        player_ids: &[PlayerId],
    ) -> Result<TableState, EngineError> {
        self.locks
            .with_lock(session_id, || async move { self.initialize_locked(session_id, player_ids) })
            .await
    }

    /// Применить действие игрока.
    pub async fn process_action(
        &self,
        session_id: &str,
        player_id: &str,
        action: PlayerActionKind,
    ) -> ActionOutcome {
        self.locks
            .with_lock(session_id, || async move {
                self.process_locked(session_id, player_id, Ok(action))
            })
            .await
    }

    /// То же, но действие приходит строкой (`fold`, `check`, `call`, `bet`, `raise`, `all-in`).
    /// Неизвестное действие отклоняется так же, как невалидное.
    pub async fn process_raw_action(
        &self,
        session_id: &str,
        player_id: &str,
        action: &str,
        amount: Option<Chips>,
    ) -> ActionOutcome {
        let parsed = PlayerActionKind::parse(action, amount);
        self.locks
            .with_lock(session_id, || async move {
                self.process_locked(session_id, player_id, parsed)
            })
            .await
    }

    /// Следующая раздача. `Ok(None)` – сессия неизвестна.
    pub async fn start_new_hand(&self, session_id: &str) -> Result<Option<TableState>, EngineError> {
        self.locks
            .with_lock(session_id, || async move { self.start_new_hand_locked(session_id) })
            .await
    }

    /// Снэпшот из кэша (без обращения к хранилищу).
    pub fn get_state(&self, session_id: &str) -> Option<TableState> {
        self.store.get(session_id)
    }

    pub fn set_state(&self, session_id: &str, state: TableState) {
        self.store.set(session_id, state);
    }

    pub fn delete_state(&self, session_id: &str) -> Option<TableState> {
        self.store.delete(session_id)
    }

    pub fn session_count(&self) -> usize {
        self.store.len()
    }

    // ---------- под замком сессии (синхронно) ----------

    fn initialize_locked(
        &self,
        session_id: &str,
        player_ids: &[PlayerId],
    ) -> Result<TableState, EngineError> {
        let state = {
            let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
            lifecycle::initialize_state(
                session_id,
                player_ids,
                &self.config,
                &mut **rng,
                self.evaluator.as_ref(),
            )?
        };

        info!(
            session_id,
            players = ?player_ids,
            dealer = %state.players[state.dealer_index].id,
            "сессия создана"
        );

        self.store.set(session_id, state.clone());
        Ok(state)
    }

    fn process_locked(
        &self,
        session_id: &str,
        player_id: &str,
        action: Result<PlayerActionKind, EngineError>,
    ) -> ActionOutcome {
        let Some(current) = self.load(session_id) else {
            return ActionOutcome::rejected(None, EngineError::SessionNotFound(session_id.to_string()));
        };

        let action = match action {
            Ok(action) => action,
            Err(err) => return self.reject(current, player_id, err),
        };

        let mut next = current.clone();
        match apply_action(&mut next, player_id, action, self.evaluator.as_ref(), now_millis()) {
            Ok(status) => {
                if status.is_finished() {
                    info!(
                        session_id,
                        hand_number = next.hand_number,
                        winners = ?next.winner_ids,
                        "раздача завершена"
                    );
                }
                self.store.set(session_id, next.clone());
                ActionOutcome::accepted(next, status)
            }
            Err(err) => self.reject(current, player_id, err),
        }
    }

    fn reject(&self, current: TableState, player_id: &str, err: EngineError) -> ActionOutcome {
        debug!(
            session_id = %current.session_id,
            player_id,
            error = %err,
            "действие отклонено"
        );
        ActionOutcome::rejected(Some(current), err)
    }

    fn start_new_hand_locked(&self, session_id: &str) -> Result<Option<TableState>, EngineError> {
        let Some(mut state) = self.load(session_id) else {
            return Ok(None);
        };

        {
            let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
            lifecycle::start_new_hand(&mut state, &mut **rng, self.evaluator.as_ref())?;
        }

        self.store.set(session_id, state.clone());
        Ok(Some(state))
    }

    /// Кэш → хранилище. Поднятый из хранилища снэпшот кладётся в кэш.
    fn load(&self, session_id: &str) -> Option<TableState> {
        if let Some(state) = self.store.get(session_id) {
            return Some(state);
        }

        let state = self.persistence.load_snapshot(session_id)?;
        debug!(session_id, hand_number = state.hand_number, "сессия поднята из хранилища");
        self.store.set(session_id, state.clone());
        Some(state)
    }
}

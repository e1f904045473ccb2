use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};

use crate::domain::SessionId;

type SessionLock = Arc<tokio::sync::Mutex<()>>;

/// Очередь мутаций по сессиям.
///
/// `with_lock` гарантирует, что для одной сессии одновременно выполняется
/// не больше одной функции. Ожидающие встают в FIFO-очередь `tokio::sync::Mutex`.
/// Разные сессии друг друга не блокируют. Замок и запись в таблице освобождаются
/// при любом исходе: ошибка, паника или отмена future.
#[derive(Debug, Default)]
pub struct SessionLocks {
    locks: Mutex<HashMap<SessionId, SessionLock>>,
}

impl SessionLocks {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn with_lock<F, Fut, T>(&self, session_id: &str, f: F) -> T
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = T>,
    {
        // guard объявлен после lease, поэтому отпускается раньше неё.
        let lease = LockLease {
            owner: self,
            session_id,
            lock: self.lock_for(session_id),
        };
        let _guard = lease.lock.lock().await;
        f().await
    }

    /// Сколько сессий сейчас держат или ждут замок.
    pub fn active_sessions(&self) -> usize {
        self.locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    fn lock_for(&self, session_id: &str) -> SessionLock {
        self.locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(session_id.to_string())
            .or_default()
            .clone()
    }

    /// Убрать замок из таблицы, если кроме таблицы и уходящего вызова
    /// на него никто не ссылается.
    fn release(&self, session_id: &str, held: &SessionLock) {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        if locks
            .get(session_id)
            .map_or(false, |l| Arc::ptr_eq(l, held) && Arc::strong_count(l) <= 2)
        {
            locks.remove(session_id);
        }
    }
}

/// Ссылка одного вызова `with_lock` на замок сессии. При дропе чистит таблицу.
struct LockLease<'a> {
    owner: &'a SessionLocks,
    session_id: &'a str,
    lock: SessionLock,
}

impl Drop for LockLease<'_> {
    fn drop(&mut self) {
        self.owner.release(self.session_id, &self.lock);
    }
}

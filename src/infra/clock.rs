use std::time::{SystemTime, UNIX_EPOCH};

/// Unix-время в миллисекундах. Часы до эпохи → 0.
pub fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

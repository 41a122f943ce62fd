use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::{
    Mutex as AsyncMutex, OwnedMutexGuard, RwLock, RwLockReadGuard, RwLockWriteGuard,
};

/// Idle locks are dropped once the table grows past this
const PRUNE_THRESHOLD: usize = 256;

/// One async mutex per logical store key.
///
/// Holding the guard for a key means no other read-modify-write on that key
/// is in flight. Callers that need several keys take them in a fixed order.
/// Key guards are taken while holding [`KeyLocks::shared`]; operations that
/// touch every key take [`KeyLocks::exclusive`] instead.
#[derive(Default)]
pub struct KeyLocks {
    gate: RwLock<()>,
    table: Mutex<HashMap<String, Arc<AsyncMutex<()>>>>,
}

impl KeyLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Held around any per-key read-modify-write
    pub async fn shared(&self) -> RwLockReadGuard<'_, ()> {
        self.gate.read().await
    }

    /// Waits out every in-flight per-key update and holds off new ones
    pub async fn exclusive(&self) -> RwLockWriteGuard<'_, ()> {
        self.gate.write().await
    }

    pub async fn lock(&self, key: &str) -> OwnedMutexGuard<()> {
        let mutex = {
            let mut table = self.table.lock().unwrap_or_else(PoisonError::into_inner);

            if table.len() > PRUNE_THRESHOLD {
                // Only the table holds these, so nobody is waiting on them
                table.retain(|_, m| Arc::strong_count(m) > 1);
            }

            table
                .entry(key.to_string())
                .or_insert_with(|| Arc::new(AsyncMutex::new(())))
                .clone()
        };

        mutex.lock_owned().await
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.table.lock().unwrap_or_else(PoisonError::into_inner).len()
    }
}

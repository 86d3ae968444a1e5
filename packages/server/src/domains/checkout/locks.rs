use std::collections::HashMap;
use std::sync::{Arc, Mutex, Weak};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

/// One async lock per customer email.
///
/// Entries are weak so a lock disappears once its last holder is done; dead
/// entries are swept whenever a new one is inserted.
#[derive(Default)]
pub struct CustomerLocks {
    locks: Mutex<HashMap<String, Weak<AsyncMutex<()>>>>,
}

impl CustomerLocks {
    pub async fn lock(&self, email: &str) -> OwnedMutexGuard<()> {
        let key = email.trim().to_lowercase();
        let lock = {
            let mut locks = self.locks.lock().unwrap_or_else(|e| e.into_inner());
            match locks.get(&key).and_then(Weak::upgrade) {
                Some(lock) => lock,
                None => {
                    locks.retain(|_, weak| weak.strong_count() > 0);
                    let lock = Arc::new(AsyncMutex::new(()));
                    locks.insert(key, Arc::downgrade(&lock));
                    lock
                }
            }
        };
        lock.lock_owned().await
    }

    /// Emails with a live lock
    pub fn len(&self) -> usize {
        self.locks
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .values()
            .filter(|weak| weak.strong_count() > 0)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

//! Per-owner serialization of check-then-commit.
//!
//! Each owner gets its own async mutex, so submissions for one user are
//! linearized while different users proceed in parallel. Entries are
//! held weakly and pruned once no guard or waiter references them.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError, Weak};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

use crate::domain::foundation::UserId;

/// Registry of per-owner locks.
#[derive(Debug, Default)]
pub struct OwnerLocks {
    locks: Mutex<HashMap<UserId, Weak<AsyncMutex<()>>>>,
}

/// Held while an owner's sessions are being validated and written.
#[derive(Debug)]
pub struct OwnerGuard {
    owner: UserId,
    _guard: OwnedMutexGuard<()>,
}

impl OwnerGuard {
    pub fn owner(&self) -> &UserId {
        &self.owner
    }
}

impl OwnerLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits until no other task holds `owner`'s lock, then takes it.
    pub async fn acquire(&self, owner: &UserId) -> OwnerGuard {
        let lock = self.lock_for(owner);
        OwnerGuard {
            owner: owner.clone(),
            _guard: lock.lock_owned().await,
        }
    }

    /// Number of owners with a live lock.
    #[cfg(test)]
    fn tracked_owners(&self) -> usize {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        locks.retain(|_, lock| lock.strong_count() > 0);
        locks.len()
    }

    fn lock_for(&self, owner: &UserId) -> Arc<AsyncMutex<()>> {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(existing) = locks.get(owner).and_then(Weak::upgrade) {
            return existing;
        }

        locks.retain(|_, lock| lock.strong_count() > 0);
        let lock = Arc::new(AsyncMutex::new(()));
        locks.insert(owner.clone(), Arc::downgrade(&lock));
        lock
    }
}

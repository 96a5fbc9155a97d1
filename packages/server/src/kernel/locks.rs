//! Per-match serialization.
//!
//! Every mutating code path (join, explicit transition, strategy
//! reconfiguration, scheduler sweeps) takes the match's lock around its
//! load-validate-mutate-save-notify sequence. Two concurrent callers can
//! therefore never both observe the same pre-state and double-apply a
//! transition. Matches are independent units of work - there is no
//! cross-match locking.

use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::common::MatchId;

#[derive(Clone, Default)]
pub struct MatchLocks {
    locks: Arc<DashMap<MatchId, Arc<Mutex<()>>>>,
}

impl MatchLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire the lock for one match, creating it on first use.
    pub async fn lock(&self, match_id: MatchId) -> OwnedMutexGuard<()> {
        let lock = self
            .locks
            .entry(match_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        lock.lock_owned().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn same_match_is_mutually_exclusive() {
        let locks = MatchLocks::new();
        let id = MatchId::new();

        let guard = locks.lock(id).await;
        assert!(locks.locks.get(&id).unwrap().try_lock().is_err());
        drop(guard);
        assert!(locks.locks.get(&id).unwrap().try_lock().is_ok());
    }

    #[tokio::test]
    async fn different_matches_do_not_contend() {
        let locks = MatchLocks::new();
        let _a = locks.lock(MatchId::new()).await;
        let _b = locks.lock(MatchId::new()).await;
    }
}

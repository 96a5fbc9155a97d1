//! Per-match observer registry.
//!
//! Observer registration is transient process state - it is never persisted
//! with the match record. The registry therefore supports rehydration: the
//! match data layer re-registers the standard observer set on every load, so
//! no call site can forget to reconnect observers before notifying.

use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;

use crate::common::MatchId;
use crate::domains::matches::events::MatchEvent;
use crate::domains::matches::models::Match;

/// Receives lifecycle events for matches it is registered on.
#[async_trait]
pub trait MatchObserver: Send + Sync {
    async fn update(&self, m: &Match, event: &MatchEvent);
}

pub struct ObserverRegistry {
    /// The set re-attached on every rehydration.
    standard: Vec<Arc<dyn MatchObserver>>,
    registered: DashMap<MatchId, Vec<Arc<dyn MatchObserver>>>,
}

impl ObserverRegistry {
    pub fn new(standard: Vec<Arc<dyn MatchObserver>>) -> Self {
        Self {
            standard,
            registered: DashMap::new(),
        }
    }

    /// Replace whatever is registered for the match with the standard set.
    pub fn rehydrate(&self, match_id: MatchId) {
        self.registered.insert(match_id, self.standard.clone());
    }

    /// Attach an extra observer on top of the registered set.
    pub fn register(&self, match_id: MatchId, observer: Arc<dyn MatchObserver>) {
        self.registered.entry(match_id).or_default().push(observer);
    }

    pub fn registered_count(&self, match_id: MatchId) -> usize {
        self.registered
            .get(&match_id)
            .map(|observers| observers.len())
            .unwrap_or(0)
    }

    /// Fan an event out to every observer registered for the match.
    pub async fn notify(&self, m: &Match, event: &MatchEvent) {
        // Clone out of the shard before awaiting so the map is never held
        // across suspension points.
        let observers: Vec<Arc<dyn MatchObserver>> = self
            .registered
            .get(&m.id)
            .map(|entry| entry.value().clone())
            .unwrap_or_default();

        if observers.is_empty() {
            tracing::warn!(match_id = %m.id, event = %event.kind(), "no observers registered for match event");
        }

        for observer in observers {
            observer.update(m, event).await;
        }
    }
}

//! Match data access.
//!
//! `MatchRepo` wraps the injected store so that observer rehydration is part
//! of the load operation itself: any code path that loads a match and later
//! notifies has, by construction, already re-registered the standard observer
//! set. Registration is process state and is never persisted, so this is the
//! only place it can be rebuilt reliably.

use anyhow::Result;
use std::sync::Arc;

use crate::common::MatchId;
use crate::domains::matches::models::Match;
use crate::domains::notifications::ObserverRegistry;
use crate::kernel::{BaseMatchStore, MatchQuery};

#[derive(Clone)]
pub struct MatchRepo {
    store: Arc<dyn BaseMatchStore>,
    observers: Arc<ObserverRegistry>,
}

impl MatchRepo {
    pub fn new(store: Arc<dyn BaseMatchStore>, observers: Arc<ObserverRegistry>) -> Self {
        Self { store, observers }
    }

    /// Load a match and rehydrate its observers.
    pub async fn load(&self, id: MatchId) -> Result<Option<Match>> {
        let loaded = self.store.load_match(id).await?;
        if let Some(m) = &loaded {
            self.observers.rehydrate(m.id);
        }
        Ok(loaded)
    }

    pub async fn save(&self, m: &Match) -> Result<()> {
        self.store.save_match(m).await
    }

    /// Query without rehydration. Sweeps re-load each candidate under its
    /// lock before mutating, which rehydrates at that point.
    pub async fn query(&self, query: MatchQuery) -> Result<Vec<Match>> {
        self.store.query_matches(query).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::{PlayerId, SportId};
    use crate::domains::matches::events::MatchEvent;
    use crate::domains::matches::models::{Location, MatchState, SportRef};
    use crate::domains::matchmaking::StrategyConfig;
    use crate::domains::notifications::MatchObserver;
    use crate::kernel::InMemoryMatchStore;
    use async_trait::async_trait;
    use chrono::Utc;

    struct NullObserver;

    #[async_trait]
    impl MatchObserver for NullObserver {
        async fn update(&self, _m: &Match, _event: &MatchEvent) {}
    }

    #[tokio::test]
    async fn loading_a_match_rehydrates_its_observers() {
        let store = Arc::new(InMemoryMatchStore::new());
        let observers = Arc::new(ObserverRegistry::new(vec![Arc::new(NullObserver)]));
        let repo = MatchRepo::new(store, observers.clone());

        let m = Match {
            id: MatchId::new(),
            sport: SportRef {
                id: SportId::new(),
                name: "Tennis".to_string(),
            },
            required_players: 2,
            duration_minutes: 60,
            location: Location {
                address: "Court 1".to_string(),
                zone: None,
                latitude: None,
                longitude: None,
            },
            starts_at: Utc::now(),
            organizer: PlayerId::new(),
            participants: Vec::new(),
            state: MatchState::NeedsPlayers,
            strategy: StrategyConfig::default(),
            created_at: Utc::now(),
        };
        repo.save(&m).await.unwrap();

        // Saving alone registers nothing; loading attaches the standard set.
        assert_eq!(observers.registered_count(m.id), 0);
        let loaded = repo.load(m.id).await.unwrap();
        assert!(loaded.is_some());
        assert_eq!(observers.registered_count(m.id), 1);

        // A missing id loads as None without registering anything.
        let missing = MatchId::new();
        assert!(repo.load(missing).await.unwrap().is_none());
        assert_eq!(observers.registered_count(missing), 0);
    }
}

//! Dependency container for activities and the scheduler (traits for
//! testability)
//!
//! All external services hide behind the `Base*` trait abstractions so the
//! whole core can run against the in-memory implementations in tests, and
//! against Twilio/Expo in production.

use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use twilio::TwilioService;

use crate::common::utils::expo::ExpoClient;
use crate::domains::matches::data::MatchRepo;
use crate::domains::notifications::{DedupCache, Notifier, NotifierObserver, ObserverRegistry};

use super::locks::MatchLocks;
use super::traits::{
    BaseMatchStore, BaseMessageService, BaseProfileService, BasePushNotificationService,
};

// =============================================================================
// TwilioService Adapter (implements BaseMessageService trait)
// =============================================================================

/// Wrapper around TwilioService that implements the BaseMessageService trait
pub struct TwilioMessenger(pub Arc<TwilioService>);

impl TwilioMessenger {
    pub fn new(service: Arc<TwilioService>) -> Self {
        Self(service)
    }
}

#[async_trait]
impl BaseMessageService for TwilioMessenger {
    async fn send_message(&self, address: &str, text: &str) -> Result<()> {
        self.0
            .send_message(address, text)
            .await
            .map(|_| ())
            .map_err(|e| anyhow::anyhow!("{}", e))
    }
}

// =============================================================================
// ExpoClient Adapter (implements BasePushNotificationService trait)
// =============================================================================

pub struct ExpoPushService(pub Arc<ExpoClient>);

impl ExpoPushService {
    pub fn new(client: Arc<ExpoClient>) -> Self {
        Self(client)
    }
}

#[async_trait]
impl BasePushNotificationService for ExpoPushService {
    async fn send_push(
        &self,
        push_token: &str,
        title: &str,
        body: &str,
        data: serde_json::Value,
    ) -> Result<()> {
        self.0.send_notification(push_token, title, body, data).await
    }
}

// =============================================================================
// Deps
// =============================================================================

/// Dependencies handed to every activity and sweep.
#[derive(Clone)]
pub struct Deps {
    /// Match data access; its loader rehydrates observers.
    pub matches: MatchRepo,
    pub profiles: Arc<dyn BaseProfileService>,
    pub notifier: Arc<Notifier>,
    pub observers: Arc<ObserverRegistry>,
    /// Per-match serialization boundary.
    pub locks: MatchLocks,
}

impl Deps {
    /// Wire the core together: notifier worker, standard observer set, and
    /// the observing match repository.
    pub fn new(
        store: Arc<dyn BaseMatchStore>,
        profiles: Arc<dyn BaseProfileService>,
        messenger: Arc<dyn BaseMessageService>,
        push: Arc<dyn BasePushNotificationService>,
    ) -> Self {
        Self::with_dedup(store, profiles, messenger, push, DedupCache::new())
    }

    /// Same wiring with an explicit dedup cache (tests shrink its windows).
    pub fn with_dedup(
        store: Arc<dyn BaseMatchStore>,
        profiles: Arc<dyn BaseProfileService>,
        messenger: Arc<dyn BaseMessageService>,
        push: Arc<dyn BasePushNotificationService>,
        dedup: DedupCache,
    ) -> Self {
        let notifier = Arc::new(Notifier::with_dedup(
            profiles.clone(),
            messenger,
            push,
            dedup,
        ));
        let standard: Vec<Arc<dyn crate::domains::notifications::MatchObserver>> =
            vec![Arc::new(NotifierObserver::new(notifier.clone()))];
        let observers = Arc::new(ObserverRegistry::new(standard));
        let matches = MatchRepo::new(store, observers.clone());

        Self {
            matches,
            profiles,
            notifier,
            observers,
            locks: MatchLocks::new(),
        }
    }
}

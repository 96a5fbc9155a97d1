//! Event notification fan-out.
//!
//! `notify` is the synchronous head: it runs the dedup gate and hands the
//! event to a background dispatch worker, so the transition that triggered it
//! never waits on recipient resolution or delivery. The worker is a single
//! consumer, which preserves per-match commit order.
//!
//! Delivery failures are logged and isolated per recipient and per channel;
//! lifecycle correctness never depends on a notification landing.

use std::collections::HashSet;
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, error, info, instrument, warn};

use crate::domains::matches::events::{MatchEvent, MatchEventKind};
use crate::domains::matches::models::Match;
use crate::domains::players::models::Player;
use crate::kernel::{BaseMessageService, BaseProfileService, BasePushNotificationService};

use super::dedup::DedupCache;
use super::messages;
use super::observers::MatchObserver;

enum WorkItem {
    Dispatch { m: Match, event: MatchEvent },
    Flush(oneshot::Sender<()>),
}

pub struct Notifier {
    dedup: DedupCache,
    queue: mpsc::UnboundedSender<WorkItem>,
}

impl Notifier {
    pub fn new(
        profiles: Arc<dyn BaseProfileService>,
        messenger: Arc<dyn BaseMessageService>,
        push: Arc<dyn BasePushNotificationService>,
    ) -> Self {
        Self::with_dedup(profiles, messenger, push, DedupCache::new())
    }

    /// Custom dedup cache, mainly for tests that shrink the windows.
    pub fn with_dedup(
        profiles: Arc<dyn BaseProfileService>,
        messenger: Arc<dyn BaseMessageService>,
        push: Arc<dyn BasePushNotificationService>,
        dedup: DedupCache,
    ) -> Self {
        let (queue, rx) = mpsc::unbounded_channel();
        let worker = DispatchWorker {
            profiles,
            messenger,
            push,
        };
        tokio::spawn(worker.run(rx));
        Self { dedup, queue }
    }

    /// Deduplicate and enqueue one event for dispatch.
    ///
    /// Returns immediately; the caller holds the match lock, so enqueue order
    /// is commit order. Suppressed duplicates are logged and dropped.
    pub fn notify(&self, m: &Match, event: &MatchEvent) {
        let key = (m.id, event.kind());
        if !self.dedup.check_and_record(key) {
            info!(
                match_id = %m.id,
                event = %event.kind(),
                "duplicate notification suppressed inside dedup window"
            );
            return;
        }

        let item = WorkItem::Dispatch {
            m: m.clone(),
            event: event.clone(),
        };
        if self.queue.send(item).is_err() {
            error!(match_id = %m.id, "notification worker is gone; dropping dispatch");
        }
    }

    /// Wait until every previously enqueued dispatch has been processed.
    /// Used by tests and graceful shutdown.
    pub async fn flush(&self) {
        let (ack, done) = oneshot::channel();
        if self.queue.send(WorkItem::Flush(ack)).is_ok() {
            let _ = done.await;
        }
    }
}

struct DispatchWorker {
    profiles: Arc<dyn BaseProfileService>,
    messenger: Arc<dyn BaseMessageService>,
    push: Arc<dyn BasePushNotificationService>,
}

impl DispatchWorker {
    async fn run(self, mut rx: mpsc::UnboundedReceiver<WorkItem>) {
        while let Some(item) = rx.recv().await {
            match item {
                WorkItem::Dispatch { m, event } => self.dispatch(&m, &event).await,
                WorkItem::Flush(ack) => {
                    let _ = ack.send(());
                }
            }
        }
    }

    #[instrument(skip(self, m, event), fields(match_id = %m.id, event = %event.kind()))]
    async fn dispatch(&self, m: &Match, event: &MatchEvent) {
        let recipients = match self.recipients_for(m, event.kind()).await {
            Ok(recipients) => recipients,
            Err(e) => {
                error!(error = %e, "failed to resolve notification recipients");
                return;
            }
        };

        if recipients.is_empty() {
            debug!("no recipients for event");
            return;
        }

        let title = messages::push_title(event.kind());
        let body = messages::render(m, event.kind());
        let data = serde_json::json!({
            "match_id": m.id.to_string(),
            "event": event.kind().to_string(),
        });

        for recipient in &recipients {
            self.deliver(recipient, title, &body, &data).await;
        }

        info!(recipients = recipients.len(), "notification batch dispatched");
    }

    /// Recipient set by event kind: creation fans out to everyone whose
    /// favorite sport matches; every other event goes to the roster plus the
    /// organizer. Admins are excluded everywhere, and identities are
    /// de-duplicated (the organizer may also be a participant).
    async fn recipients_for(&self, m: &Match, kind: MatchEventKind) -> Result<Vec<Player>> {
        if kind == MatchEventKind::Created {
            let fans = self
                .profiles
                .find_players_by_favorite_sport(m.sport.id)
                .await?;
            return Ok(fans
                .into_iter()
                .filter(|p| p.active && p.id != m.organizer && !p.is_admin())
                .collect());
        }

        let mut seen = HashSet::new();
        let mut recipients = Vec::new();
        for player_id in m.participants.iter().chain(std::iter::once(&m.organizer)) {
            if !seen.insert(*player_id) {
                continue;
            }
            match self.profiles.load_player(*player_id).await {
                Ok(Some(player)) if !player.is_admin() => recipients.push(player),
                Ok(_) => {}
                Err(e) => {
                    warn!(player_id = %player_id, error = %e, "failed to load recipient profile");
                }
            }
        }
        Ok(recipients)
    }

    /// Deliver to one recipient over both channels. The channels run
    /// independently; a failure on either is logged and swallowed.
    async fn deliver(
        &self,
        recipient: &Player,
        title: &str,
        body: &str,
        data: &serde_json::Value,
    ) {
        let message_channel = async {
            if let Err(e) = self.messenger.send_message(&recipient.email, body).await {
                warn!(player_id = %recipient.id, error = %e, "message delivery failed");
            }
        };

        let push_channel = async {
            match self.profiles.push_tokens(recipient.id).await {
                Ok(tokens) => {
                    for token in tokens {
                        if let Err(e) = self.push.send_push(&token, title, body, data.clone()).await
                        {
                            warn!(player_id = %recipient.id, error = %e, "push delivery failed");
                        }
                    }
                }
                Err(e) => {
                    warn!(player_id = %recipient.id, error = %e, "failed to load push tokens");
                }
            }
        };

        futures::join!(message_channel, push_channel);
    }
}

/// The standard observer: forwards every lifecycle event into the notifier.
pub struct NotifierObserver {
    notifier: Arc<Notifier>,
}

impl NotifierObserver {
    pub fn new(notifier: Arc<Notifier>) -> Self {
        Self { notifier }
    }
}

#[async_trait]
impl MatchObserver for NotifierObserver {
    async fn update(&self, m: &Match, event: &MatchEvent) {
        self.notifier.notify(m, event);
    }
}

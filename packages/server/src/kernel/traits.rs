// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic. The lifecycle,
// strategy, and notification rules live in the domains and call through
// these seams.
//
// Naming convention: Base* for trait names (e.g., BaseMatchStore)

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::common::{MatchId, PlayerId, SportId};
use crate::domains::matches::models::{Match, MatchState};
use crate::domains::players::models::Player;

// =============================================================================
// Match Store Trait (Infrastructure - opaque record store)
// =============================================================================

/// Query over the match store, used by sweeps, search, and history.
///
/// All fields are conjunctive; `None` means "no constraint".
#[derive(Debug, Clone, Default)]
pub struct MatchQuery {
    pub states: Option<Vec<MatchState>>,
    pub starts_after: Option<DateTime<Utc>>,
    pub starts_before: Option<DateTime<Utc>>,
    pub sport_id: Option<SportId>,
    pub zone: Option<String>,
    /// Matches the player organized or participated in.
    pub involving: Option<PlayerId>,
}

impl MatchQuery {
    pub fn in_state(mut self, state: MatchState) -> Self {
        self.states.get_or_insert_with(Vec::new).push(state);
        self
    }

    pub fn starting_after(mut self, t: DateTime<Utc>) -> Self {
        self.starts_after = Some(t);
        self
    }

    pub fn starting_before(mut self, t: DateTime<Utc>) -> Self {
        self.starts_before = Some(t);
        self
    }

    pub fn involving(mut self, player_id: PlayerId) -> Self {
        self.involving = Some(player_id);
        self
    }

    /// Does a match satisfy every constraint of this query?
    pub fn matches(&self, m: &Match) -> bool {
        if let Some(states) = &self.states {
            if !states.contains(&m.state) {
                return false;
            }
        }
        if let Some(after) = self.starts_after {
            if m.starts_at <= after {
                return false;
            }
        }
        if let Some(before) = self.starts_before {
            if m.starts_at > before {
                return false;
            }
        }
        if let Some(sport_id) = self.sport_id {
            if m.sport.id != sport_id {
                return false;
            }
        }
        if let Some(zone) = &self.zone {
            match &m.location.zone {
                Some(match_zone) if match_zone.eq_ignore_ascii_case(zone) => {}
                _ => return false,
            }
        }
        if let Some(player_id) = self.involving {
            if m.organizer != player_id && !m.has_participant(player_id) {
                return false;
            }
        }
        true
    }
}

/// Opaque key-indexed match storage. The core treats this as a collaborator;
/// it never dictates the engine behind it.
#[async_trait]
pub trait BaseMatchStore: Send + Sync {
    async fn load_match(&self, id: MatchId) -> Result<Option<Match>>;

    async fn save_match(&self, m: &Match) -> Result<()>;

    async fn query_matches(&self, query: MatchQuery) -> Result<Vec<Match>>;
}

// =============================================================================
// Profile Service Trait (Infrastructure - external player storage)
// =============================================================================

#[async_trait]
pub trait BaseProfileService: Send + Sync {
    async fn load_player(&self, id: PlayerId) -> Result<Option<Player>>;

    /// Active players whose favorite sport matches, for creation fan-out.
    async fn find_players_by_favorite_sport(&self, sport_id: SportId) -> Result<Vec<Player>>;

    /// Registered push device tokens for a player. Empty when none.
    async fn push_tokens(&self, player_id: PlayerId) -> Result<Vec<String>>;
}

// =============================================================================
// Delivery Channel Traits (Infrastructure - fire-and-report)
// =============================================================================

#[async_trait]
pub trait BaseMessageService: Send + Sync {
    /// Send a text message to an address (phone number or email).
    async fn send_message(&self, address: &str, text: &str) -> Result<()>;
}

#[async_trait]
pub trait BasePushNotificationService: Send + Sync {
    /// Send a push notification to a device token.
    async fn send_push(
        &self,
        push_token: &str,
        title: &str,
        body: &str,
        data: serde_json::Value,
    ) -> Result<()>;
}

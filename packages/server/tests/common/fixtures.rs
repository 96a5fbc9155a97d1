//! Shared test harness: the full core wired against in-memory collaborators
//! and recording delivery channels.

#![allow(dead_code)]

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use server_core::common::{MatchId, PlayerId, SportId};
use server_core::domains::matches::activities::CreateMatchRequest;
use server_core::domains::matches::models::{Location, Match, MatchState, SportRef};
use server_core::domains::matchmaking::StrategyConfig;
use server_core::domains::players::models::{Player, Role, SkillLevel};
use server_core::kernel::test_dependencies::{RecordingMessenger, RecordingPushService};
use server_core::kernel::{Deps, InMemoryMatchStore, InMemoryProfileService};

pub struct TestHarness {
    pub deps: Deps,
    pub store: Arc<InMemoryMatchStore>,
    pub profiles: Arc<InMemoryProfileService>,
    pub messenger: Arc<RecordingMessenger>,
    pub push: Arc<RecordingPushService>,
}

impl TestHarness {
    pub fn new() -> Self {
        let store = Arc::new(InMemoryMatchStore::new());
        let profiles = Arc::new(InMemoryProfileService::new());
        let messenger = Arc::new(RecordingMessenger::new());
        let push = Arc::new(RecordingPushService::new());

        let deps = Deps::new(
            store.clone(),
            profiles.clone(),
            messenger.clone(),
            push.clone(),
        );

        Self {
            deps,
            store,
            profiles,
            messenger,
            push,
        }
    }

    /// Register a player with the profile service and return it.
    pub fn add_player(&self, name: &str, skill: SkillLevel) -> Player {
        let player = Player {
            id: PlayerId::new(),
            name: name.to_string(),
            email: format!("{name}@example.com"),
            skill,
            favorite_sport: None,
            location: None,
            role: Role::Player,
            active: true,
            created_at: Utc::now(),
        };
        self.profiles.upsert_player(player.clone());
        player
    }

    pub fn add_admin(&self, name: &str) -> Player {
        let mut admin = self.add_player(name, SkillLevel::Intermediate);
        admin.role = Role::Admin;
        self.profiles.upsert_player(admin.clone());
        admin
    }

    /// Insert a match record directly, bypassing the creation activity.
    /// Used to stage sweep scenarios in arbitrary states.
    pub async fn seed_match(&self, m: &Match) {
        use server_core::kernel::BaseMatchStore;
        self.store.save_match(m).await.expect("seed match");
    }

    /// Count delivered messages whose body contains a fragment.
    pub fn messages_containing(&self, fragment: &str) -> usize {
        self.messenger
            .sent()
            .iter()
            .filter(|m| m.body.contains(fragment))
            .count()
    }

    /// Wait until every enqueued notification dispatch has been processed.
    pub async fn settle(&self) {
        self.deps.notifier.flush().await;
    }
}

pub fn football() -> SportRef {
    SportRef {
        id: SportId::new(),
        name: "Football".to_string(),
    }
}

pub fn palermo_pitch() -> Location {
    Location {
        address: "Av. Libertador 4000".to_string(),
        zone: Some("palermo".to_string()),
        latitude: None,
        longitude: None,
    }
}

pub fn create_request(sport: SportRef, required: u32, starts_at: DateTime<Utc>) -> CreateMatchRequest {
    CreateMatchRequest::builder()
        .sport(sport)
        .required_players(required)
        .duration_minutes(90)
        .location(palermo_pitch())
        .starts_at(starts_at)
        .build()
}

/// A match record in an arbitrary lifecycle state, for seeding.
pub fn match_in_state(
    organizer: &Player,
    participants: &[&Player],
    state: MatchState,
    starts_at: DateTime<Utc>,
) -> Match {
    Match {
        id: MatchId::new(),
        sport: football(),
        required_players: participants.len().max(2) as u32,
        duration_minutes: 90,
        location: palermo_pitch(),
        starts_at,
        organizer: organizer.id,
        participants: participants.iter().map(|p| p.id).collect(),
        state,
        strategy: StrategyConfig::default(),
        created_at: starts_at - Duration::hours(1),
    }
}

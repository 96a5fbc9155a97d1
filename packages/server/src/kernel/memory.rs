//! In-memory collaborator implementations.
//!
//! The binary ships with these as its default storage and profile backends;
//! the integration tests drive the whole core through them. Swapping in a
//! database-backed implementation means implementing the same two traits.

use anyhow::Result;
use async_trait::async_trait;
use dashmap::DashMap;

use crate::common::{MatchId, PlayerId, SportId};
use crate::domains::matches::models::Match;
use crate::domains::players::models::Player;

use super::traits::{BaseMatchStore, BaseProfileService, MatchQuery};

#[derive(Default)]
pub struct InMemoryMatchStore {
    matches: DashMap<MatchId, Match>,
}

impl InMemoryMatchStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
}

#[async_trait]
impl BaseMatchStore for InMemoryMatchStore {
    async fn load_match(&self, id: MatchId) -> Result<Option<Match>> {
        Ok(self.matches.get(&id).map(|entry| entry.value().clone()))
    }

    async fn save_match(&self, m: &Match) -> Result<()> {
        self.matches.insert(m.id, m.clone());
        Ok(())
    }

    async fn query_matches(&self, query: MatchQuery) -> Result<Vec<Match>> {
        Ok(self
            .matches
            .iter()
            .filter(|entry| query.matches(entry.value()))
            .map(|entry| entry.value().clone())
            .collect())
    }
}

#[derive(Default)]
pub struct InMemoryProfileService {
    players: DashMap<PlayerId, Player>,
    tokens: DashMap<PlayerId, Vec<String>>,
}

impl InMemoryProfileService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn upsert_player(&self, player: Player) {
        self.players.insert(player.id, player);
    }

    pub fn set_push_tokens(&self, player_id: PlayerId, tokens: Vec<String>) {
        self.tokens.insert(player_id, tokens);
    }
}

#[async_trait]
impl BaseProfileService for InMemoryProfileService {
    async fn load_player(&self, id: PlayerId) -> Result<Option<Player>> {
        Ok(self.players.get(&id).map(|entry| entry.value().clone()))
    }

    async fn find_players_by_favorite_sport(&self, sport_id: SportId) -> Result<Vec<Player>> {
        Ok(self
            .players
            .iter()
            .filter(|entry| {
                let player = entry.value();
                player.active && player.favorite_sport == Some(sport_id)
            })
            .map(|entry| entry.value().clone())
            .collect())
    }

    async fn push_tokens(&self, player_id: PlayerId) -> Result<Vec<String>> {
        Ok(self
            .tokens
            .get(&player_id)
            .map(|entry| entry.value().clone())
            .unwrap_or_default())
    }
}

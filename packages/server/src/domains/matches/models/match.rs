use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::common::{MatchId, PlayerId, SportId};
use crate::domains::matchmaking::StrategyConfig;

/// Lifecycle states of a match.
///
/// Progression is strictly linear: NeedsPlayers → Armed → Confirmed →
/// Playing → Finished. Cancelled is reachable from any non-terminal state.
/// Finished and Cancelled are terminal; their only successor is themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchState {
    NeedsPlayers,
    Armed,
    Confirmed,
    Playing,
    Finished,
    Cancelled,
}

impl MatchState {
    pub fn is_terminal(self) -> bool {
        matches!(self, MatchState::Finished | MatchState::Cancelled)
    }

    /// Wire/storage tag for this state.
    pub fn as_str(self) -> &'static str {
        match self {
            MatchState::NeedsPlayers => "NEEDS_PLAYERS",
            MatchState::Armed => "ARMED",
            MatchState::Confirmed => "CONFIRMED",
            MatchState::Playing => "PLAYING",
            MatchState::Finished => "FINISHED",
            MatchState::Cancelled => "CANCELLED",
        }
    }
}

impl fmt::Display for MatchState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MatchState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "NEEDS_PLAYERS" => Ok(MatchState::NeedsPlayers),
            "ARMED" => Ok(MatchState::Armed),
            "CONFIRMED" => Ok(MatchState::Confirmed),
            "PLAYING" => Ok(MatchState::Playing),
            "FINISHED" => Ok(MatchState::Finished),
            "CANCELLED" => Ok(MatchState::Cancelled),
            other => Err(format!("unknown match state: {other}")),
        }
    }
}

/// Denormalized sport reference carried on the match record.
///
/// The name is kept alongside the id so notification templates and history
/// ranking never need a catalog round-trip.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SportRef {
    pub id: SportId,
    pub name: String,
}

/// Where a match is played, or where a player lives.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Location {
    pub address: String,
    pub zone: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl Location {
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => Some((lat, lon)),
            _ => None,
        }
    }
}

/// A scheduled sporting session.
///
/// Mutated only by the lifecycle machine through the activities layer;
/// everything else reads. Observer registration is deliberately not part of
/// this record - it is rebuilt whenever the match is loaded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Match {
    pub id: MatchId,
    pub sport: SportRef,
    pub required_players: u32,
    pub duration_minutes: i64,
    pub location: Location,
    pub starts_at: DateTime<Utc>,
    pub organizer: PlayerId,
    /// Unique by player identity; order is irrelevant.
    pub participants: Vec<PlayerId>,
    pub state: MatchState,
    pub strategy: StrategyConfig,
    pub created_at: DateTime<Utc>,
}

impl Match {
    pub fn is_full(&self) -> bool {
        self.participants.len() as u32 >= self.required_players
    }

    pub fn has_participant(&self, player_id: PlayerId) -> bool {
        self.participants.contains(&player_id)
    }

    /// Scheduled end of play.
    pub fn ends_at(&self) -> DateTime<Utc> {
        self.starts_at + Duration::minutes(self.duration_minutes)
    }
}

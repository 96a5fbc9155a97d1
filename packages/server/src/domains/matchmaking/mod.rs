//! Compatibility strategy engine.
//!
//! Strategies are pure scorers: given a candidate, a match, and a scoring
//! context (organizer and participant profiles plus the candidate's play
//! history, all loaded by the caller), they decide eligibility and produce a
//! compatibility score in `[0.0, 1.0]`. A score of exactly `0.0` is returned
//! whenever the candidate is ineligible - score and eligibility never
//! disagree.

pub mod by_history;
pub mod by_level;
pub mod by_proximity;
pub mod zones;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::common::SportId;
use crate::domains::matches::models::Match;
use crate::domains::players::models::{Player, SkillLevel};

pub use by_history::ByHistory;
pub use by_level::ByLevel;
pub use by_proximity::ByProximity;

/// Which strategy a match uses to gate and rank joins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum StrategyKind {
    #[default]
    ByLevel,
    ByProximity,
    ByHistory,
}

impl StrategyKind {
    pub fn as_str(self) -> &'static str {
        match self {
            StrategyKind::ByLevel => "BY_LEVEL",
            StrategyKind::ByProximity => "BY_PROXIMITY",
            StrategyKind::ByHistory => "BY_HISTORY",
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StrategyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "BY_LEVEL" => Ok(StrategyKind::ByLevel),
            "BY_PROXIMITY" => Ok(StrategyKind::ByProximity),
            "BY_HISTORY" => Ok(StrategyKind::ByHistory),
            other => Err(format!("unknown strategy: {other}")),
        }
    }
}

/// Tunable strategy parameters, set by the organizer/admin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct StrategyParams {
    /// Lowest admitted skill tier (by-level). Defaults to Beginner.
    pub level_min: Option<SkillLevel>,
    /// Highest admitted skill tier (by-level). Defaults to Advanced.
    pub level_max: Option<SkillLevel>,
    /// Distance beyond which the proximity score drops to its floor
    /// (by-proximity). Defaults to 25 km.
    pub radius_km: Option<f64>,
}

/// The strategy selection stored on each match record.
///
/// Treated as an immutable value: reconfiguration replaces the whole config
/// under the match's serialization boundary, never mutates it in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct StrategyConfig {
    pub kind: StrategyKind,
    pub params: StrategyParams,
}

/// Aggregated play counts per sport for one candidate.
#[derive(Debug, Clone, Default)]
pub struct PlayerHistory {
    plays_by_sport: HashMap<SportId, u32>,
}

impl PlayerHistory {
    pub fn record(&mut self, sport_id: SportId) {
        *self.plays_by_sport.entry(sport_id).or_insert(0) += 1;
    }

    pub fn play_count(&self, sport_id: SportId) -> u32 {
        self.plays_by_sport.get(&sport_id).copied().unwrap_or(0)
    }

    /// Zero-based rank of a sport among the sports the candidate has played,
    /// by descending play count (sport id breaks ties deterministically).
    /// `None` when the sport was never played.
    pub fn rank_of(&self, sport_id: SportId) -> Option<usize> {
        if self.play_count(sport_id) == 0 {
            return None;
        }
        let mut ranking: Vec<(SportId, u32)> = self
            .plays_by_sport
            .iter()
            .filter(|(_, count)| **count > 0)
            .map(|(id, count)| (*id, *count))
            .collect();
        ranking.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ranking.iter().position(|(id, _)| *id == sport_id)
    }
}

/// Context the caller assembles before scoring: the profiles behind the
/// match's roster and the candidate's history. Strategies read, never load.
pub struct ScoringContext<'a> {
    pub organizer: &'a Player,
    pub participants: &'a [Player],
    pub history: &'a PlayerHistory,
}

/// A pluggable join-eligibility and compatibility policy.
pub trait MatchmakingStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    /// May the candidate join at all?
    fn is_eligible(&self, player: &Player, m: &Match, ctx: &ScoringContext<'_>) -> bool;

    /// Compatibility in `[0.0, 1.0]`; exactly `0.0` when ineligible.
    fn score(&self, player: &Player, m: &Match, ctx: &ScoringContext<'_>) -> f64;
}

/// Pre-checks shared by every strategy: the match must have room and the
/// candidate must not already be on the roster.
pub(crate) fn passes_basic_checks(player: &Player, m: &Match) -> bool {
    !m.is_full() && !m.has_participant(player.id)
}

/// Build the scorer for a match's configured strategy.
pub fn build_strategy(config: &StrategyConfig) -> Box<dyn MatchmakingStrategy> {
    match config.kind {
        StrategyKind::ByLevel => Box::new(ByLevel::new(&config.params)),
        StrategyKind::ByProximity => Box::new(ByProximity::new(&config.params)),
        StrategyKind::ByHistory => Box::new(ByHistory::new()),
    }
}

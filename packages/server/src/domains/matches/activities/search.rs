//! Compatibility scoring and ranked candidate search.

use chrono::{DateTime, Datelike, Timelike, Utc};
use tracing::instrument;

use crate::common::{MatchId, PlayerId, SportId};
use crate::domains::matches::errors::CompatibilityError;
use crate::domains::matches::models::{Match, MatchState};
use crate::domains::matchmaking::{
    build_strategy, PlayerHistory, ScoringContext, StrategyConfig, StrategyKind,
};
use crate::domains::players::models::Player;
use crate::kernel::{Deps, MatchQuery};

use super::scoring::{load_history, load_roster};

/// Ranking bonus when the match is the player's favorite sport.
const FAVORITE_SPORT_BONUS: f64 = 0.1;

/// Ranking bonus for matches at socially convenient hours.
const CONVENIENT_HOUR_BONUS: f64 = 0.05;

/// Compatibility between a player and a match in `[0.0, 1.0]`.
///
/// Scores under the match's configured strategy, or under an explicit
/// override with default parameters.
#[instrument(skip(deps), fields(player = %player_id, match_id = %match_id))]
pub async fn compute_compatibility(
    player_id: PlayerId,
    match_id: MatchId,
    strategy_override: Option<StrategyKind>,
    deps: &Deps,
) -> Result<f64, CompatibilityError> {
    let player = deps
        .profiles
        .load_player(player_id)
        .await?
        .ok_or(CompatibilityError::PlayerNotFound(player_id))?;

    let m = deps
        .matches
        .load(match_id)
        .await?
        .ok_or(CompatibilityError::MatchNotFound(match_id))?;

    let history = load_history(deps, player_id).await?;
    score_match(deps, &player, &m, strategy_override, &history).await
}

#[derive(Debug, Clone, Default)]
pub struct SearchFilters {
    pub sport_id: Option<SportId>,
    pub zone: Option<String>,
    /// Include matches the player cannot join (full, already in, past the
    /// gathering state).
    pub include_all: bool,
}

#[derive(Debug, Clone)]
pub struct RankedCandidate {
    pub candidate: Match,
    pub compatibility: f64,
}

/// Future matches ranked by compatibility, best first.
///
/// The strategy score is augmented with a favorite-sport bonus and a
/// convenient-hour bonus, then clamped back to `[0.0, 1.0]`.
#[instrument(skip(filters, deps), fields(player = %player_id))]
pub async fn list_candidate_matches(
    player_id: PlayerId,
    filters: SearchFilters,
    deps: &Deps,
) -> Result<Vec<RankedCandidate>, CompatibilityError> {
    let player = deps
        .profiles
        .load_player(player_id)
        .await?
        .ok_or(CompatibilityError::PlayerNotFound(player_id))?;

    let now = Utc::now();
    let mut query = MatchQuery::default().starting_after(now);
    query.sport_id = filters.sport_id;
    query.zone = filters.zone.clone();

    let mut candidates = deps.matches.query(query).await?;
    if !filters.include_all {
        candidates.retain(|m| {
            m.state == MatchState::NeedsPlayers && !m.is_full() && !m.has_participant(player_id)
        });
    }

    // One history per player; rosters differ per match.
    let history = load_history(deps, player_id).await?;

    let mut ranked = Vec::with_capacity(candidates.len());
    for m in candidates {
        let base = score_match(deps, &player, &m, None, &history).await?;
        let mut score = base;
        if player.favorite_sport == Some(m.sport.id) {
            score += FAVORITE_SPORT_BONUS;
        }
        if is_convenient_hour(m.starts_at) {
            score += CONVENIENT_HOUR_BONUS;
        }
        ranked.push(RankedCandidate {
            candidate: m,
            compatibility: score.clamp(0.0, 1.0),
        });
    }

    ranked.sort_by(|a, b| b.compatibility.total_cmp(&a.compatibility));
    Ok(ranked)
}

async fn score_match(
    deps: &Deps,
    player: &Player,
    m: &Match,
    strategy_override: Option<StrategyKind>,
    history: &PlayerHistory,
) -> Result<f64, CompatibilityError> {
    let config = match strategy_override {
        Some(kind) => StrategyConfig {
            kind,
            params: Default::default(),
        },
        None => m.strategy.clone(),
    };

    let roster = load_roster(deps, m).await?;
    let ctx = ScoringContext {
        organizer: &roster.organizer,
        participants: &roster.participants,
        history,
    };
    Ok(build_strategy(&config).score(player, m, &ctx))
}

/// After-work slots on weekdays, most of the day on weekends.
fn is_convenient_hour(starts_at: DateTime<Utc>) -> bool {
    let hour = starts_at.hour();
    if starts_at.weekday().number_from_monday() <= 5 {
        (17..=21).contains(&hour)
    } else {
        (10..=22).contains(&hour)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn weekday_evenings_are_convenient() {
        // 2026-08-05 is a Wednesday.
        let evening = Utc.with_ymd_and_hms(2026, 8, 5, 18, 0, 0).unwrap();
        let morning = Utc.with_ymd_and_hms(2026, 8, 5, 9, 0, 0).unwrap();
        assert!(is_convenient_hour(evening));
        assert!(!is_convenient_hour(morning));
    }

    #[test]
    fn weekend_days_are_convenient() {
        // 2026-08-08 is a Saturday.
        let midday = Utc.with_ymd_and_hms(2026, 8, 8, 12, 0, 0).unwrap();
        let dawn = Utc.with_ymd_and_hms(2026, 8, 8, 6, 0, 0).unwrap();
        assert!(is_convenient_hour(midday));
        assert!(!is_convenient_hour(dawn));
    }
}

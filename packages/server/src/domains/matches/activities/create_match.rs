//! Match creation.

use chrono::{DateTime, Utc};
use tracing::{info, instrument};
use typed_builder::TypedBuilder;

use crate::common::{MatchId, PlayerId};
use crate::domains::matches::errors::CreateMatchError;
use crate::domains::matches::events::MatchEvent;
use crate::domains::matches::models::{Location, Match, MatchState, SportRef};
use crate::domains::matchmaking::StrategyConfig;
use crate::kernel::Deps;

#[derive(Debug, Clone, TypedBuilder)]
pub struct CreateMatchRequest {
    pub sport: SportRef,
    pub required_players: u32,
    pub duration_minutes: i64,
    pub location: Location,
    pub starts_at: DateTime<Utc>,
    #[builder(default)]
    pub strategy: StrategyConfig,
}

/// Create a match in `NeedsPlayers` and fan the creation out to players who
/// favor its sport.
#[instrument(skip(request, deps), fields(organizer = %organizer_id, sport = %request.sport.name))]
pub async fn create_match(
    organizer_id: PlayerId,
    request: CreateMatchRequest,
    deps: &Deps,
) -> Result<Match, CreateMatchError> {
    validate(&request)?;

    let organizer = deps
        .profiles
        .load_player(organizer_id)
        .await?
        .ok_or(CreateMatchError::OrganizerNotFound(organizer_id))?;

    let m = Match {
        id: MatchId::new(),
        sport: request.sport,
        required_players: request.required_players,
        duration_minutes: request.duration_minutes,
        location: request.location,
        starts_at: request.starts_at,
        organizer: organizer.id,
        participants: Vec::new(),
        state: MatchState::NeedsPlayers,
        strategy: request.strategy,
        created_at: Utc::now(),
    };

    deps.matches.save(&m).await?;
    info!(match_id = %m.id, "match created");

    // A freshly created match has never been loaded, so attach its observers
    // here before the first notification.
    deps.observers.rehydrate(m.id);
    let event = MatchEvent::Created {
        match_id: m.id,
        from: MatchState::NeedsPlayers,
    };
    deps.observers.notify(&m, &event).await;

    Ok(m)
}

/// All rejections happen before any write.
fn validate(request: &CreateMatchRequest) -> Result<(), CreateMatchError> {
    if request.sport.name.trim().is_empty() {
        return Err(CreateMatchError::Validation(
            "sport name is required".to_string(),
        ));
    }
    if request.required_players < 2 {
        return Err(CreateMatchError::Validation(
            "a match needs at least 2 players".to_string(),
        ));
    }
    if request.duration_minutes <= 0 {
        return Err(CreateMatchError::Validation(
            "duration must be positive".to_string(),
        ));
    }
    if request.location.address.trim().is_empty() {
        return Err(CreateMatchError::Validation(
            "location address is required".to_string(),
        ));
    }
    if request.starts_at < Utc::now() {
        return Err(CreateMatchError::Validation(
            "start time must not be in the past".to_string(),
        ));
    }
    Ok(())
}

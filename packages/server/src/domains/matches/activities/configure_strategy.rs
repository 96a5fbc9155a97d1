//! Strategy reconfiguration, allowed until the roster locks in.

use tracing::{info, instrument};

use crate::common::{MatchId, PlayerId};
use crate::domains::matches::errors::ConfigureStrategyError;
use crate::domains::matches::models::MatchState;
use crate::domains::matchmaking::{StrategyConfig, StrategyKind, StrategyParams};
use crate::kernel::Deps;

/// Replace a match's strategy configuration as a whole value.
///
/// Only the organizer or an admin may reconfigure, and only while the match
/// is still gathering players - once armed, the roster was admitted under
/// the old policy and the configuration is locked in.
#[instrument(skip(params, deps), fields(requester = %requester_id, match_id = %match_id, strategy = %kind))]
pub async fn configure_strategy(
    requester_id: PlayerId,
    match_id: MatchId,
    kind: StrategyKind,
    params: StrategyParams,
    deps: &Deps,
) -> Result<(), ConfigureStrategyError> {
    validate(&params)?;

    let requester = deps
        .profiles
        .load_player(requester_id)
        .await?
        .ok_or(ConfigureStrategyError::RequesterNotFound(requester_id))?;

    let _guard = deps.locks.lock(match_id).await;

    let mut m = deps
        .matches
        .load(match_id)
        .await?
        .ok_or(ConfigureStrategyError::MatchNotFound(match_id))?;

    if m.organizer != requester_id && !requester.is_admin() {
        return Err(ConfigureStrategyError::Unauthorized);
    }
    if m.state != MatchState::NeedsPlayers {
        return Err(ConfigureStrategyError::LockedIn(m.state));
    }

    // Whole-value swap under the match lock; never mutated in place.
    m.strategy = StrategyConfig { kind, params };
    deps.matches.save(&m).await?;

    info!("strategy configured");
    Ok(())
}

fn validate(params: &StrategyParams) -> Result<(), ConfigureStrategyError> {
    if let (Some(min), Some(max)) = (params.level_min, params.level_max) {
        if min > max {
            return Err(ConfigureStrategyError::Validation(
                "level_min must not exceed level_max".to_string(),
            ));
        }
    }
    if let Some(radius) = params.radius_km {
        if !radius.is_finite() || radius <= 0.0 {
            return Err(ConfigureStrategyError::Validation(
                "radius_km must be a positive number".to_string(),
            ));
        }
    }
    Ok(())
}

//! Join requests: the gate between a candidate and a roster seat.

use tracing::{info, instrument};

use crate::common::{MatchId, PlayerId};
use crate::domains::matches::errors::JoinError;
use crate::domains::matches::machines;
use crate::domains::matches::models::MatchState;
use crate::domains::matchmaking::{build_strategy, ScoringContext};
use crate::kernel::Deps;

use super::scoring::{load_history, load_roster};

#[derive(Debug, Clone)]
pub struct JoinAck {
    pub match_id: MatchId,
    pub player_id: PlayerId,
    /// State after the join; `Armed` when this join completed the roster.
    pub state: MatchState,
}

/// Validate, admit, and notify. The whole sequence runs under the match's
/// lock so concurrent joins serialize and the arming transition fires once.
#[instrument(skip(deps), fields(player = %player_id, match_id = %match_id))]
pub async fn request_join(
    player_id: PlayerId,
    match_id: MatchId,
    deps: &Deps,
) -> Result<JoinAck, JoinError> {
    let player = deps
        .profiles
        .load_player(player_id)
        .await?
        .ok_or(JoinError::PlayerNotFound(player_id))?;

    let _guard = deps.locks.lock(match_id).await;

    let mut m = deps
        .matches
        .load(match_id)
        .await?
        .ok_or(JoinError::MatchNotFound(match_id))?;

    // Structural gates, fully checked before any mutation.
    if m.state != MatchState::NeedsPlayers {
        return Err(JoinError::InvalidState(m.state));
    }
    if m.is_full() {
        return Err(JoinError::MatchFull);
    }
    if m.has_participant(player_id) {
        return Err(JoinError::AlreadyJoined);
    }

    // Strategy gate.
    let roster = load_roster(deps, &m).await?;
    let history = load_history(deps, player_id).await?;
    let ctx = ScoringContext {
        organizer: &roster.organizer,
        participants: &roster.participants,
        history: &history,
    };
    let strategy = build_strategy(&m.strategy);
    if !strategy.is_eligible(&player, &m, &ctx) {
        return Err(JoinError::NotEligible);
    }

    let events = machines::apply_join(&mut m, player_id)?;
    deps.matches.save(&m).await?;

    info!(state = %m.state, "player joined match");
    for event in &events {
        deps.observers.notify(&m, event).await;
    }

    Ok(JoinAck {
        match_id,
        player_id,
        state: m.state,
    })
}

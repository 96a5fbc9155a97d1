//! Explicit state changes requested by the organizer or an admin.

use tracing::{info, instrument};

use crate::common::{MatchId, PlayerId};
use crate::domains::matches::errors::TransitionError;
use crate::domains::matches::machines::{self, TransitionOutcome};
use crate::domains::matches::models::MatchState;
use crate::kernel::Deps;

#[derive(Debug, Clone)]
pub struct TransitionAck {
    pub match_id: MatchId,
    /// State after the request.
    pub state: MatchState,
    /// False when the match was already terminal and the request no-opped.
    pub changed: bool,
}

/// Apply an explicit transition under the match's lock, notifying exactly
/// once on success. Requests against terminal matches succeed without
/// mutating or emitting anything.
#[instrument(skip(deps), fields(requester = %requester_id, match_id = %match_id, target = %target))]
pub async fn request_transition(
    requester_id: PlayerId,
    match_id: MatchId,
    target: MatchState,
    deps: &Deps,
) -> Result<TransitionAck, TransitionError> {
    let requester = deps
        .profiles
        .load_player(requester_id)
        .await?
        .ok_or(TransitionError::RequesterNotFound(requester_id))?;

    let _guard = deps.locks.lock(match_id).await;

    let mut m = deps
        .matches
        .load(match_id)
        .await?
        .ok_or(TransitionError::MatchNotFound(match_id))?;

    if m.organizer != requester_id && !requester.is_admin() {
        return Err(TransitionError::Unauthorized);
    }

    match machines::apply_transition(&mut m, target)? {
        TransitionOutcome::Applied(event) => {
            deps.matches.save(&m).await?;
            info!(from = %event.from_state(), state = %m.state, "match state changed");
            deps.observers.notify(&m, &event).await;
            Ok(TransitionAck {
                match_id,
                state: m.state,
                changed: true,
            })
        }
        TransitionOutcome::TerminalNoOp => Ok(TransitionAck {
            match_id,
            state: m.state,
            changed: false,
        }),
    }
}

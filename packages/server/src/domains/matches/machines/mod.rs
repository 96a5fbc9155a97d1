//! Match lifecycle rules.
//!
//! Pure decision logic - no IO, no clock reads. Callers pass `now` in and
//! apply persistence and notification around the outcome.

use chrono::{DateTime, Utc};

use crate::common::PlayerId;
use crate::domains::matches::errors::{JoinError, TransitionError};
use crate::domains::matches::events::MatchEvent;
use crate::domains::matches::models::{Match, MatchState};

/// The single legal successor in the linear progression, if any.
///
/// Terminal states loop on themselves; cancellation is handled separately
/// because it pre-empts the linear order.
pub fn successor(state: MatchState) -> Option<MatchState> {
    match state {
        MatchState::NeedsPlayers => Some(MatchState::Armed),
        MatchState::Armed => Some(MatchState::Confirmed),
        MatchState::Confirmed => Some(MatchState::Playing),
        MatchState::Playing => Some(MatchState::Finished),
        MatchState::Finished | MatchState::Cancelled => None,
    }
}

/// Result of a transition request against a single match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionOutcome {
    /// State changed; the event must be dispatched exactly once.
    Applied(MatchEvent),
    /// The match was already terminal. Nothing changed, nothing to emit.
    TerminalNoOp,
}

/// Apply an explicit transition request.
///
/// Rules, checked fully before any mutation:
/// - terminal states swallow every request as a silent no-op;
/// - `Cancelled` is accepted from any non-terminal state, `Playing` included;
/// - otherwise the target must be the single legal successor, and manual
///   requests never move a `Playing` match (its exit is time-driven).
pub fn apply_transition(
    m: &mut Match,
    target: MatchState,
) -> Result<TransitionOutcome, TransitionError> {
    let from = m.state;

    if from.is_terminal() {
        return Ok(TransitionOutcome::TerminalNoOp);
    }

    if target == MatchState::Cancelled {
        m.state = MatchState::Cancelled;
        return Ok(TransitionOutcome::Applied(MatchEvent::Cancelled {
            match_id: m.id,
            from,
        }));
    }

    if from == MatchState::Playing {
        return Err(TransitionError::IllegalTransition { from, to: target });
    }

    match successor(from) {
        Some(next) if next == target => {
            m.state = target;
            Ok(TransitionOutcome::Applied(event_for_entering(m, target, from)))
        }
        _ => Err(TransitionError::IllegalTransition { from, to: target }),
    }
}

/// Add a player to a match that is still gathering its roster.
///
/// Eligibility under the active strategy is the caller's responsibility
/// (it needs participant profiles and history the machine cannot see); the
/// structural gates live here. Returns the events to dispatch in order:
/// `PlayerJoined`, then `Armed` when the join completes the roster.
pub fn apply_join(m: &mut Match, player_id: PlayerId) -> Result<Vec<MatchEvent>, JoinError> {
    if m.state != MatchState::NeedsPlayers {
        return Err(JoinError::InvalidState(m.state));
    }
    if m.is_full() {
        return Err(JoinError::MatchFull);
    }
    if m.has_participant(player_id) {
        return Err(JoinError::AlreadyJoined);
    }

    m.participants.push(player_id);

    let mut events = vec![MatchEvent::PlayerJoined {
        match_id: m.id,
        from: MatchState::NeedsPlayers,
        player_id,
    }];

    if m.is_full() {
        m.state = MatchState::Armed;
        events.push(MatchEvent::Armed {
            match_id: m.id,
            from: MatchState::NeedsPlayers,
        });
    }

    Ok(events)
}

/// Time-driven advancement, invoked by the scheduler sweeps.
///
/// `Confirmed` starts once the scheduled time passes; `Playing` finishes once
/// the duration elapses. `Armed` never auto-advances - confirmation is an
/// explicit organizer action.
pub fn auto_advance(m: &mut Match, now: DateTime<Utc>) -> Option<MatchEvent> {
    match m.state {
        MatchState::Confirmed if now > m.starts_at => {
            m.state = MatchState::Playing;
            Some(MatchEvent::Started {
                match_id: m.id,
                from: MatchState::Confirmed,
            })
        }
        MatchState::Playing if now > m.ends_at() => {
            m.state = MatchState::Finished;
            Some(MatchEvent::Finished {
                match_id: m.id,
                from: MatchState::Playing,
            })
        }
        _ => None,
    }
}

fn event_for_entering(m: &Match, entered: MatchState, from: MatchState) -> MatchEvent {
    let match_id = m.id;
    match entered {
        MatchState::Armed => MatchEvent::Armed { match_id, from },
        MatchState::Confirmed => MatchEvent::Confirmed { match_id, from },
        MatchState::Playing => MatchEvent::Started { match_id, from },
        MatchState::Finished => MatchEvent::Finished { match_id, from },
        MatchState::Cancelled => MatchEvent::Cancelled { match_id, from },
        // No transition enters NeedsPlayers; matches are born there.
        MatchState::NeedsPlayers => unreachable!("no transition enters NeedsPlayers"),
    }
}

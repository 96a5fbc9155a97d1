use thiserror::Error;

use crate::common::{MatchId, PlayerId};
use crate::domains::matches::models::MatchState;

/// Rejections for match creation. Validation happens before any mutation.
#[derive(Error, Debug)]
pub enum CreateMatchError {
    #[error("invalid request: {0}")]
    Validation(String),

    #[error("organizer not found: {0}")]
    OrganizerNotFound(PlayerId),

    #[error("storage error: {0}")]
    Storage(#[from] anyhow::Error),
}

/// Business-rule rejections for join requests. None of these are system
/// faults; callers surface them to the requesting player.
#[derive(Error, Debug)]
pub enum JoinError {
    #[error("match not found: {0}")]
    MatchNotFound(MatchId),

    #[error("player not found: {0}")]
    PlayerNotFound(PlayerId),

    #[error("match is not accepting players while {0}")]
    InvalidState(MatchState),

    #[error("match already has its required players")]
    MatchFull,

    #[error("player is already a participant")]
    AlreadyJoined,

    #[error("player is not eligible under the match's strategy")]
    NotEligible,

    #[error("storage error: {0}")]
    Storage(#[from] anyhow::Error),
}

/// Rejections for explicit state-change requests.
#[derive(Error, Debug)]
pub enum TransitionError {
    #[error("match not found: {0}")]
    MatchNotFound(MatchId),

    #[error("requester not found: {0}")]
    RequesterNotFound(PlayerId),

    #[error("only the organizer or an admin may change the match state")]
    Unauthorized,

    #[error("illegal transition {from} -> {to}")]
    IllegalTransition { from: MatchState, to: MatchState },

    #[error("storage error: {0}")]
    Storage(#[from] anyhow::Error),
}

/// Rejections for strategy reconfiguration.
#[derive(Error, Debug)]
pub enum ConfigureStrategyError {
    #[error("match not found: {0}")]
    MatchNotFound(MatchId),

    #[error("requester not found: {0}")]
    RequesterNotFound(PlayerId),

    #[error("only the organizer or an admin may configure the strategy")]
    Unauthorized,

    #[error("strategy is locked in once the match is {0}")]
    LockedIn(MatchState),

    #[error("invalid strategy configuration: {0}")]
    Validation(String),

    #[error("storage error: {0}")]
    Storage(#[from] anyhow::Error),
}

/// Failures for compatibility scoring and candidate search.
#[derive(Error, Debug)]
pub enum CompatibilityError {
    #[error("match not found: {0}")]
    MatchNotFound(MatchId),

    #[error("player not found: {0}")]
    PlayerNotFound(PlayerId),

    #[error("storage error: {0}")]
    Storage(#[from] anyhow::Error),
}

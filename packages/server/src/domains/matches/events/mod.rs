use std::fmt;

use crate::common::{MatchId, PlayerId};
use crate::domains::matches::models::MatchState;

/// Discrete, notification-worthy facts derived from committed transitions.
///
/// Every variant carries the match identity and the state the event was
/// derived from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchEvent {
    Created {
        match_id: MatchId,
        from: MatchState,
    },
    PlayerJoined {
        match_id: MatchId,
        from: MatchState,
        player_id: PlayerId,
    },
    Armed {
        match_id: MatchId,
        from: MatchState,
    },
    Confirmed {
        match_id: MatchId,
        from: MatchState,
    },
    Started {
        match_id: MatchId,
        from: MatchState,
    },
    Finished {
        match_id: MatchId,
        from: MatchState,
    },
    Cancelled {
        match_id: MatchId,
        from: MatchState,
    },
}

/// The tag of a [`MatchEvent`], used as half of the dedup key and to select
/// a message template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchEventKind {
    Created,
    PlayerJoined,
    Armed,
    Confirmed,
    Started,
    Finished,
    Cancelled,
}

impl fmt::Display for MatchEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            MatchEventKind::Created => "MATCH_CREATED",
            MatchEventKind::PlayerJoined => "PLAYER_JOINED",
            MatchEventKind::Armed => "MATCH_ARMED",
            MatchEventKind::Confirmed => "MATCH_CONFIRMED",
            MatchEventKind::Started => "MATCH_STARTED",
            MatchEventKind::Finished => "MATCH_FINISHED",
            MatchEventKind::Cancelled => "MATCH_CANCELLED",
        };
        f.write_str(tag)
    }
}

impl MatchEvent {
    pub fn match_id(&self) -> MatchId {
        match self {
            MatchEvent::Created { match_id, .. }
            | MatchEvent::PlayerJoined { match_id, .. }
            | MatchEvent::Armed { match_id, .. }
            | MatchEvent::Confirmed { match_id, .. }
            | MatchEvent::Started { match_id, .. }
            | MatchEvent::Finished { match_id, .. }
            | MatchEvent::Cancelled { match_id, .. } => *match_id,
        }
    }

    /// The state this event was derived from.
    pub fn from_state(&self) -> MatchState {
        match self {
            MatchEvent::Created { from, .. }
            | MatchEvent::PlayerJoined { from, .. }
            | MatchEvent::Armed { from, .. }
            | MatchEvent::Confirmed { from, .. }
            | MatchEvent::Started { from, .. }
            | MatchEvent::Finished { from, .. }
            | MatchEvent::Cancelled { from, .. } => *from,
        }
    }

    pub fn kind(&self) -> MatchEventKind {
        match self {
            MatchEvent::Created { .. } => MatchEventKind::Created,
            MatchEvent::PlayerJoined { .. } => MatchEventKind::PlayerJoined,
            MatchEvent::Armed { .. } => MatchEventKind::Armed,
            MatchEvent::Confirmed { .. } => MatchEventKind::Confirmed,
            MatchEvent::Started { .. } => MatchEventKind::Started,
            MatchEvent::Finished { .. } => MatchEventKind::Finished,
            MatchEvent::Cancelled { .. } => MatchEventKind::Cancelled,
        }
    }
}

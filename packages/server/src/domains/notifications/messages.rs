//! Human-readable notification text, one template per event kind.

use crate::domains::matches::events::MatchEventKind;
use crate::domains::matches::models::Match;

/// Short push-notification title for an event kind.
pub fn push_title(kind: MatchEventKind) -> &'static str {
    match kind {
        MatchEventKind::Created => "New match",
        MatchEventKind::PlayerJoined => "Player joined",
        MatchEventKind::Armed => "Match full",
        MatchEventKind::Confirmed => "Match confirmed",
        MatchEventKind::Started => "Match started",
        MatchEventKind::Finished => "Match finished",
        MatchEventKind::Cancelled => "Match cancelled",
    }
}

/// Message body for an event, composed from the match's sport, location,
/// time, and headcount.
pub fn render(m: &Match, kind: MatchEventKind) -> String {
    let sport = &m.sport.name;
    let address = &m.location.address;
    match kind {
        MatchEventKind::Created => {
            format!("A new {sport} match was created at {address}.")
        }
        MatchEventKind::PlayerJoined => format!(
            "A new player joined the {sport} match at {address} ({}/{} players).",
            m.participants.len(),
            m.required_players
        ),
        MatchEventKind::Armed => {
            format!("The {sport} match is full! Waiting for the organizer to confirm.")
        }
        MatchEventKind::Confirmed => format!(
            "The {sport} match is confirmed for {} at {address}.",
            m.starts_at.format("%Y-%m-%d %H:%M UTC")
        ),
        MatchEventKind::Started => format!("The {sport} match has started!"),
        MatchEventKind::Finished => {
            format!("The {sport} match has finished. Thanks for playing!")
        }
        MatchEventKind::Cancelled => {
            format!("The {sport} match at {address} was cancelled.")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::{MatchId, PlayerId, SportId};
    use crate::domains::matches::models::{Location, MatchState, SportRef};
    use crate::domains::matchmaking::StrategyConfig;
    use chrono::Utc;

    #[test]
    fn join_message_carries_the_headcount() {
        let m = Match {
            id: MatchId::new(),
            sport: SportRef {
                id: SportId::new(),
                name: "Football".to_string(),
            },
            required_players: 10,
            duration_minutes: 90,
            location: Location {
                address: "Av. Libertador 4000".to_string(),
                zone: None,
                latitude: None,
                longitude: None,
            },
            starts_at: Utc::now(),
            organizer: PlayerId::new(),
            participants: vec![PlayerId::new(), PlayerId::new(), PlayerId::new()],
            state: MatchState::NeedsPlayers,
            strategy: StrategyConfig::default(),
            created_at: Utc::now(),
        };

        let body = render(&m, MatchEventKind::PlayerJoined);
        assert!(body.contains("Football"));
        assert!(body.contains("Av. Libertador 4000"));
        assert!(body.contains("3/10"));
    }
}

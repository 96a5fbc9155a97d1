//! Shared scoring support: assembling the context a strategy needs.
//!
//! Strategies are pure, so everything they read - the roster's profiles and
//! the candidate's play history - is loaded here and handed over as values.

use anyhow::{Context, Result};

use crate::common::PlayerId;
use crate::domains::matches::models::Match;
use crate::domains::matchmaking::PlayerHistory;
use crate::domains::players::models::Player;
use crate::kernel::{Deps, MatchQuery};

/// The loaded profiles behind a match's roster.
pub struct Roster {
    pub organizer: Player,
    pub participants: Vec<Player>,
}

/// Load the organizer and participant profiles for a match.
///
/// A missing organizer profile is a data inconsistency, not a business
/// rejection; it surfaces as a storage-level error.
pub async fn load_roster(deps: &Deps, m: &Match) -> Result<Roster> {
    let organizer = deps
        .profiles
        .load_player(m.organizer)
        .await?
        .with_context(|| format!("organizer profile missing for match {}", m.id))?;

    let mut participants = Vec::with_capacity(m.participants.len());
    for player_id in &m.participants {
        let player = deps
            .profiles
            .load_player(*player_id)
            .await?
            .with_context(|| format!("participant profile missing: {player_id}"))?;
        participants.push(player);
    }

    Ok(Roster {
        organizer,
        participants,
    })
}

/// Aggregate a player's play counts per sport across every match they
/// organized or participated in.
pub async fn load_history(deps: &Deps, player_id: PlayerId) -> Result<PlayerHistory> {
    let involving = deps
        .matches
        .query(MatchQuery::default().involving(player_id))
        .await?;

    let mut history = PlayerHistory::default();
    for m in involving {
        history.record(m.sport.id);
    }
    Ok(history)
}

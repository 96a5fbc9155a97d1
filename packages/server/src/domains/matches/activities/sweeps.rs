//! Time-driven sweep bodies.
//!
//! The cron layer (`kernel::scheduled_tasks`) only schedules these; the
//! logic lives here so every sweep can be driven directly in tests with an
//! explicit `now`. Each sweep is idempotent and failure-isolated: one
//! match's error is logged and the rest of the batch continues. A match that
//! another path already moved is skipped through normal transition
//! rejection.

use anyhow::Result;
use chrono::{DateTime, Duration, Utc};
use tracing::{error, info};

use crate::common::MatchId;
use crate::domains::matches::events::{MatchEvent, MatchEventKind};
use crate::domains::matches::machines::{self, TransitionOutcome};
use crate::domains::matches::models::MatchState;
use crate::kernel::{Deps, MatchQuery};

/// How far back the start-sweep looks for overdue `Confirmed` matches.
/// Older strays are left alone rather than reprocessed.
const START_WINDOW_MINUTES: i64 = 30;

/// Abandoned matches are cancelled once their start is at least this stale...
const ABANDON_MIN_STALENESS_MINUTES: i64 = 30;

/// ...and no older than this, bounding the cleanup window.
const ABANDON_MAX_STALENESS_HOURS: i64 = 2;

/// Reminder lookahead: `Confirmed` matches starting 45-60 minutes from now.
const REMINDER_NEAR_MINUTES: i64 = 45;
const REMINDER_FAR_MINUTES: i64 = 60;

/// Start-sweep: drive overdue `Confirmed` matches into `Playing`.
pub async fn start_due_matches(now: DateTime<Utc>, deps: &Deps) -> Result<usize> {
    let due = deps
        .matches
        .query(
            MatchQuery::default()
                .in_state(MatchState::Confirmed)
                .starting_after(now - Duration::minutes(START_WINDOW_MINUTES))
                .starting_before(now),
        )
        .await?;

    let mut started = 0;
    for candidate in due {
        match advance_match(candidate.id, now, deps).await {
            Ok(Some(MatchEventKind::Started)) => started += 1,
            Ok(_) => {}
            Err(e) => error!(match_id = %candidate.id, error = %e, "failed to start match"),
        }
    }

    if started > 0 {
        info!(started, "start-sweep advanced matches into play");
    }
    Ok(started)
}

/// Finish-sweep: close out `Playing` matches whose duration has elapsed.
pub async fn finish_elapsed_matches(now: DateTime<Utc>, deps: &Deps) -> Result<usize> {
    let playing = deps
        .matches
        .query(MatchQuery::default().in_state(MatchState::Playing))
        .await?;

    let mut finished = 0;
    for candidate in playing {
        match advance_match(candidate.id, now, deps).await {
            Ok(Some(MatchEventKind::Finished)) => finished += 1,
            Ok(_) => {}
            Err(e) => error!(match_id = %candidate.id, error = %e, "failed to finish match"),
        }
    }

    if finished > 0 {
        info!(finished, "finish-sweep closed out matches");
    }
    Ok(finished)
}

/// Abandonment-sweep: cancel matches that never gathered their roster.
pub async fn cancel_abandoned_matches(now: DateTime<Utc>, deps: &Deps) -> Result<usize> {
    let abandoned = deps
        .matches
        .query(
            MatchQuery::default()
                .in_state(MatchState::NeedsPlayers)
                .starting_after(now - Duration::hours(ABANDON_MAX_STALENESS_HOURS))
                .starting_before(now - Duration::minutes(ABANDON_MIN_STALENESS_MINUTES)),
        )
        .await?;

    let mut cancelled = 0;
    for candidate in abandoned {
        match cancel_match(candidate.id, deps).await {
            Ok(true) => cancelled += 1,
            Ok(false) => {}
            Err(e) => {
                error!(match_id = %candidate.id, error = %e, "failed to cancel abandoned match")
            }
        }
    }

    if cancelled > 0 {
        info!(cancelled, "abandonment-sweep cancelled stale matches");
    }
    Ok(cancelled)
}

/// Reminder-sweep: re-notify `Confirmed` matches that start soon. No state
/// change; the dedup cache absorbs any overlap with the original
/// confirmation notice.
pub async fn send_upcoming_reminders(now: DateTime<Utc>, deps: &Deps) -> Result<usize> {
    let upcoming = deps
        .matches
        .query(
            MatchQuery::default()
                .in_state(MatchState::Confirmed)
                .starting_after(now + Duration::minutes(REMINDER_NEAR_MINUTES))
                .starting_before(now + Duration::minutes(REMINDER_FAR_MINUTES)),
        )
        .await?;

    let mut reminded = 0;
    for candidate in upcoming {
        // Reload through the repo so observers are rehydrated.
        let Some(m) = deps.matches.load(candidate.id).await? else {
            continue;
        };
        if m.state != MatchState::Confirmed {
            continue;
        }
        let event = MatchEvent::Confirmed {
            match_id: m.id,
            from: MatchState::Confirmed,
        };
        deps.observers.notify(&m, &event).await;
        reminded += 1;
    }

    if reminded > 0 {
        info!(reminded, "reminder-sweep re-notified upcoming matches");
    }
    Ok(reminded)
}

/// Counts logged by the hourly status report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusReport {
    pub open: usize,
    pub in_play: usize,
    pub finished_today: usize,
}

/// Hourly report: a log line with the shape of the live match population.
pub async fn report_match_status(now: DateTime<Utc>, deps: &Deps) -> Result<StatusReport> {
    let open = deps
        .matches
        .query(MatchQuery {
            states: Some(vec![
                MatchState::NeedsPlayers,
                MatchState::Armed,
                MatchState::Confirmed,
            ]),
            ..Default::default()
        })
        .await?
        .len();

    let in_play = deps
        .matches
        .query(MatchQuery::default().in_state(MatchState::Playing))
        .await?
        .len();

    let midnight = now
        .date_naive()
        .and_hms_opt(0, 0, 0)
        .expect("midnight is a valid time")
        .and_utc();
    let finished_today = deps
        .matches
        .query(
            MatchQuery::default()
                .in_state(MatchState::Finished)
                .starting_after(midnight)
                .starting_before(now),
        )
        .await?
        .len();

    let report = StatusReport {
        open,
        in_play,
        finished_today,
    };
    info!(
        open = report.open,
        in_play = report.in_play,
        finished_today = report.finished_today,
        "match status report"
    );
    Ok(report)
}

/// Re-load one match under its lock and apply time-driven advancement.
/// Returns the emitted event kind, or `None` when the match was already
/// moved by another path.
async fn advance_match(
    match_id: MatchId,
    now: DateTime<Utc>,
    deps: &Deps,
) -> Result<Option<MatchEventKind>> {
    let _guard = deps.locks.lock(match_id).await;

    let Some(mut m) = deps.matches.load(match_id).await? else {
        return Ok(None);
    };
    let Some(event) = machines::auto_advance(&mut m, now) else {
        return Ok(None);
    };

    deps.matches.save(&m).await?;
    deps.observers.notify(&m, &event).await;
    Ok(Some(event.kind()))
}

async fn cancel_match(match_id: MatchId, deps: &Deps) -> Result<bool> {
    let _guard = deps.locks.lock(match_id).await;

    let Some(mut m) = deps.matches.load(match_id).await? else {
        return Ok(false);
    };
    if m.state != MatchState::NeedsPlayers {
        // Someone armed or cancelled it since the query; leave it be.
        return Ok(false);
    }

    match machines::apply_transition(&mut m, MatchState::Cancelled) {
        Ok(TransitionOutcome::Applied(event)) => {
            deps.matches.save(&m).await?;
            deps.observers.notify(&m, &event).await;
            Ok(true)
        }
        Ok(TransitionOutcome::TerminalNoOp) => Ok(false),
        Err(e) => Err(e.into()),
    }
}

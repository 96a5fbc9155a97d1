//! Scheduled background tasks using tokio-cron-scheduler.
//!
//! This module provides the periodic lifecycle sweeps:
//! - Start-sweep: overdue Confirmed matches begin playing
//! - Finish-sweep: elapsed Playing matches finish
//! - Abandonment-sweep: stale NeedsPlayers matches are cancelled
//! - Reminder-sweep: players are reminded of imminent matches
//! - Status report: hourly population snapshot in the logs
//!
//! # Architecture
//!
//! The scheduler only triggers; every sweep body lives in
//! `domains::matches::activities::sweeps` and is failure-isolated per match.
//! Sweeps run concurrently with request-triggered transitions - the per-match
//! lock serializes both paths, and the notifier's dedup cache absorbs any
//! double-trigger.
//!
//! ```text
//! Scheduler (every minute)
//!     │
//!     └─► start_due_matches()
//!             └─► For each due match → lock → auto-advance → save → notify
//! ```

use anyhow::Result;
use chrono::Utc;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::domains::matches::activities::sweeps;
use crate::kernel::Deps;

/// Start all scheduled tasks
pub async fn start_scheduler(deps: Deps) -> Result<JobScheduler> {
    let scheduler = JobScheduler::new().await?;

    // Start-sweep - runs every minute
    let start_deps = deps.clone();
    let start_job = Job::new_async("0 * * * * *", move |_uuid, _lock| {
        let deps = start_deps.clone();
        Box::pin(async move {
            if let Err(e) = sweeps::start_due_matches(Utc::now(), &deps).await {
                tracing::error!("Start-sweep failed: {}", e);
            }
        })
    })?;
    scheduler.add(start_job).await?;

    // Finish-sweep - runs every 5 minutes
    let finish_deps = deps.clone();
    let finish_job = Job::new_async("0 */5 * * * *", move |_uuid, _lock| {
        let deps = finish_deps.clone();
        Box::pin(async move {
            if let Err(e) = sweeps::finish_elapsed_matches(Utc::now(), &deps).await {
                tracing::error!("Finish-sweep failed: {}", e);
            }
        })
    })?;
    scheduler.add(finish_job).await?;

    // Abandonment-sweep - runs every 30 minutes
    let abandon_deps = deps.clone();
    let abandon_job = Job::new_async("0 */30 * * * *", move |_uuid, _lock| {
        let deps = abandon_deps.clone();
        Box::pin(async move {
            if let Err(e) = sweeps::cancel_abandoned_matches(Utc::now(), &deps).await {
                tracing::error!("Abandonment-sweep failed: {}", e);
            }
        })
    })?;
    scheduler.add(abandon_job).await?;

    // Reminder-sweep - runs every 15 minutes
    let reminder_deps = deps.clone();
    let reminder_job = Job::new_async("0 */15 * * * *", move |_uuid, _lock| {
        let deps = reminder_deps.clone();
        Box::pin(async move {
            if let Err(e) = sweeps::send_upcoming_reminders(Utc::now(), &deps).await {
                tracing::error!("Reminder-sweep failed: {}", e);
            }
        })
    })?;
    scheduler.add(reminder_job).await?;

    // Status report - runs every hour
    let report_deps = deps.clone();
    let report_job = Job::new_async("0 0 * * * *", move |_uuid, _lock| {
        let deps = report_deps.clone();
        Box::pin(async move {
            if let Err(e) = sweeps::report_match_status(Utc::now(), &deps).await {
                tracing::error!("Status report failed: {}", e);
            }
        })
    })?;
    scheduler.add(report_job).await?;

    scheduler.start().await?;

    tracing::info!(
        "Scheduled tasks started (start-sweep every minute, finish-sweep every 5, reminders every 15, abandonment every 30, report hourly)"
    );
    Ok(scheduler)
}

//! Sweep tests: each scheduler duty driven directly with an explicit `now`
//! against seeded match populations.

mod common;

use chrono::{Duration, Utc};
use common::fixtures::{match_in_state, TestHarness};
use server_core::domains::matches::activities::sweeps;
use server_core::domains::matches::models::MatchState;
use server_core::domains::players::models::SkillLevel;
use server_core::kernel::BaseMatchStore;

#[tokio::test]
async fn start_sweep_moves_an_overdue_confirmed_match_into_play() {
    let ctx = TestHarness::new();
    let organizer = ctx.add_player("diego", SkillLevel::Intermediate);
    let ana = ctx.add_player("ana", SkillLevel::Intermediate);

    let now = Utc::now();
    let m = match_in_state(
        &organizer,
        &[&ana],
        MatchState::Confirmed,
        now - Duration::minutes(10),
    );
    ctx.seed_match(&m).await;

    let started = sweeps::start_due_matches(now, &ctx.deps).await.unwrap();
    assert_eq!(started, 1);

    let stored = ctx.store.load_match(m.id).await.unwrap().unwrap();
    assert_eq!(stored.state, MatchState::Playing);

    ctx.settle().await;
    // Exactly one Started dispatch: ana + organizer.
    assert_eq!(ctx.messages_containing("has started"), 2);
}

#[tokio::test]
async fn start_sweep_is_idempotent_across_runs() {
    let ctx = TestHarness::new();
    let organizer = ctx.add_player("diego", SkillLevel::Intermediate);

    let now = Utc::now();
    let m = match_in_state(
        &organizer,
        &[],
        MatchState::Confirmed,
        now - Duration::minutes(10),
    );
    ctx.seed_match(&m).await;

    assert_eq!(sweeps::start_due_matches(now, &ctx.deps).await.unwrap(), 1);
    assert_eq!(sweeps::start_due_matches(now, &ctx.deps).await.unwrap(), 0);

    ctx.settle().await;
    assert_eq!(ctx.messages_containing("has started"), 1);
}

#[tokio::test]
async fn start_sweep_ignores_matches_outside_its_window() {
    let ctx = TestHarness::new();
    let organizer = ctx.add_player("diego", SkillLevel::Intermediate);

    let now = Utc::now();
    let future = match_in_state(
        &organizer,
        &[],
        MatchState::Confirmed,
        now + Duration::minutes(10),
    );
    let stray = match_in_state(
        &organizer,
        &[],
        MatchState::Confirmed,
        now - Duration::hours(2),
    );
    ctx.seed_match(&future).await;
    ctx.seed_match(&stray).await;

    assert_eq!(sweeps::start_due_matches(now, &ctx.deps).await.unwrap(), 0);

    let untouched = ctx.store.load_match(future.id).await.unwrap().unwrap();
    assert_eq!(untouched.state, MatchState::Confirmed);
    let old = ctx.store.load_match(stray.id).await.unwrap().unwrap();
    assert_eq!(old.state, MatchState::Confirmed);
}

#[tokio::test]
async fn finish_sweep_closes_out_elapsed_matches() {
    let ctx = TestHarness::new();
    let organizer = ctx.add_player("diego", SkillLevel::Intermediate);

    let now = Utc::now();
    // 90-minute match that started two hours ago.
    let elapsed = match_in_state(
        &organizer,
        &[],
        MatchState::Playing,
        now - Duration::hours(2),
    );
    // Still in its playing window.
    let in_progress = match_in_state(
        &organizer,
        &[],
        MatchState::Playing,
        now - Duration::minutes(30),
    );
    ctx.seed_match(&elapsed).await;
    ctx.seed_match(&in_progress).await;

    let finished = sweeps::finish_elapsed_matches(now, &ctx.deps).await.unwrap();
    assert_eq!(finished, 1);

    let done = ctx.store.load_match(elapsed.id).await.unwrap().unwrap();
    assert_eq!(done.state, MatchState::Finished);
    let still_playing = ctx.store.load_match(in_progress.id).await.unwrap().unwrap();
    assert_eq!(still_playing.state, MatchState::Playing);

    ctx.settle().await;
    assert_eq!(ctx.messages_containing("has finished"), 1);
}

#[tokio::test]
async fn abandonment_sweep_cancels_stale_gathering_matches() {
    let ctx = TestHarness::new();
    let organizer = ctx.add_player("diego", SkillLevel::Intermediate);

    let now = Utc::now();
    let abandoned = match_in_state(
        &organizer,
        &[],
        MatchState::NeedsPlayers,
        now - Duration::hours(1),
    );
    // Recently missed its start; still inside the grace period.
    let fresh = match_in_state(
        &organizer,
        &[],
        MatchState::NeedsPlayers,
        now - Duration::minutes(10),
    );
    // Too old for the bounded window; left alone.
    let ancient = match_in_state(
        &organizer,
        &[],
        MatchState::NeedsPlayers,
        now - Duration::hours(5),
    );
    ctx.seed_match(&abandoned).await;
    ctx.seed_match(&fresh).await;
    ctx.seed_match(&ancient).await;

    let cancelled = sweeps::cancel_abandoned_matches(now, &ctx.deps)
        .await
        .unwrap();
    assert_eq!(cancelled, 1);

    let gone = ctx.store.load_match(abandoned.id).await.unwrap().unwrap();
    assert_eq!(gone.state, MatchState::Cancelled);
    let kept = ctx.store.load_match(fresh.id).await.unwrap().unwrap();
    assert_eq!(kept.state, MatchState::NeedsPlayers);
    let ignored = ctx.store.load_match(ancient.id).await.unwrap().unwrap();
    assert_eq!(ignored.state, MatchState::NeedsPlayers);

    ctx.settle().await;
    assert_eq!(ctx.messages_containing("was cancelled"), 1);
}

#[tokio::test]
async fn reminder_sweep_notifies_without_touching_state() {
    let ctx = TestHarness::new();
    let organizer = ctx.add_player("diego", SkillLevel::Intermediate);
    let ana = ctx.add_player("ana", SkillLevel::Intermediate);

    let now = Utc::now();
    let imminent = match_in_state(
        &organizer,
        &[&ana],
        MatchState::Confirmed,
        now + Duration::minutes(50),
    );
    let distant = match_in_state(
        &organizer,
        &[&ana],
        MatchState::Confirmed,
        now + Duration::hours(3),
    );
    ctx.seed_match(&imminent).await;
    ctx.seed_match(&distant).await;

    let reminded = sweeps::send_upcoming_reminders(now, &ctx.deps).await.unwrap();
    assert_eq!(reminded, 1);

    let unchanged = ctx.store.load_match(imminent.id).await.unwrap().unwrap();
    assert_eq!(unchanged.state, MatchState::Confirmed);

    ctx.settle().await;
    // One Confirmed-template dispatch to ana + organizer.
    assert_eq!(ctx.messages_containing("confirmed for"), 2);
}

#[tokio::test]
async fn status_report_counts_the_population() {
    let ctx = TestHarness::new();
    let organizer = ctx.add_player("diego", SkillLevel::Intermediate);

    let now = Utc::now();
    ctx.seed_match(&match_in_state(
        &organizer,
        &[],
        MatchState::NeedsPlayers,
        now + Duration::hours(1),
    ))
    .await;
    ctx.seed_match(&match_in_state(
        &organizer,
        &[],
        MatchState::Confirmed,
        now + Duration::hours(2),
    ))
    .await;
    ctx.seed_match(&match_in_state(
        &organizer,
        &[],
        MatchState::Playing,
        now - Duration::minutes(30),
    ))
    .await;

    let report = sweeps::report_match_status(now, &ctx.deps).await.unwrap();
    assert_eq!(report.open, 2);
    assert_eq!(report.in_play, 1);
}

//! Integration tests for the full pipeline with in-memory fakes.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use chrono::{TimeZone, Utc};

use helmsman_ci::fakes::{RecordingSourceControl, StubTarget};
use helmsman_ci::triggers::{ScheduleTrigger, Trigger};
use helmsman_ci::{
    IntegrationRunner, IntegrationTarget, ProjectResultManager, QuietPeriodDetector,
};
use helmsman_core::fakes::ManualClock;
use helmsman_core::{
    BuildCondition, Clock, IntegrationRequest, IntegrationStatus, Modification, ProjectActivity,
};

fn noon() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
}

fn runner(target: Arc<StubTarget>, clock: Arc<ManualClock>, root: &Path) -> IntegrationRunner {
    IntegrationRunner::new(
        Box::new(ProjectResultManager::new(
            "widget",
            root.join("work"),
            root.join("artifacts"),
        )),
        target as Arc<dyn IntegrationTarget>,
        Box::new(QuietPeriodDetector::new(
            Arc::clone(&clock) as Arc<dyn Clock>,
            Duration::ZERO,
            Duration::ZERO,
        )),
        clock as Arc<dyn Clock>,
    )
}

/// Test: a modification-triggered integration runs the whole pipeline -
/// directories, build hooks, labeling, publishing and finalization.
#[tokio::test]
async fn test_successful_integration_end_to_end() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let clock = Arc::new(ManualClock::new(noon()));
    let source_control = RecordingSourceControl::new();
    source_control.push_batch(vec![
        Modification::new("src/lib.rs", "alice", noon() - chrono::Duration::hours(1))
            .with_comment("tighten validation"),
    ]);
    let target = Arc::new(StubTarget::new(source_control));
    let mut runner = runner(Arc::clone(&target), Arc::clone(&clock), tmp.path());

    let result = runner
        .integrate(IntegrationRequest::new(
            BuildCondition::IfModificationExists,
            "nightly schedule",
        ))
        .await
        .expect("integrate failed");

    assert_eq!(result.status, IntegrationStatus::Success);
    assert_eq!(result.modifications.len(), 1);
    assert_eq!(result.start_time, Some(noon()));
    assert_eq!(result.end_time, Some(noon()));
    assert!(result.exception.is_none());

    // Both directories exist on disk.
    assert!(tmp.path().join("work").is_dir());
    assert!(tmp.path().join("artifacts").is_dir());

    // Build hooks ran once each, then labeling and publishing.
    assert_eq!(target.prebuild_calls(), 1);
    assert_eq!(target.source_control_fake().get_source_calls(), 1);
    assert_eq!(target.build_calls(), 1);
    assert_eq!(target.source_control_fake().label_calls(), 1);
    assert_eq!(target.publish_calls(), 1);

    // The pipeline walked its stages and went back to sleep.
    assert_eq!(
        target.activity_trace(),
        vec![
            ProjectActivity::CheckingModifications,
            ProjectActivity::Building,
            ProjectActivity::Sleeping,
        ]
    );

    // Finalized: the committed result is the new delta baseline.
    let last = runner.last_integration_result();
    assert_eq!(last.id, result.id);
}

/// Test: a forced build runs even with an empty modification set.
#[tokio::test]
async fn test_force_build_runs_without_modifications() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let clock = Arc::new(ManualClock::new(noon()));
    let target = Arc::new(StubTarget::new(RecordingSourceControl::new()));
    let mut runner = runner(Arc::clone(&target), clock, tmp.path());

    let result = runner
        .integrate(IntegrationRequest::new(BuildCondition::ForceBuild, "operator"))
        .await
        .expect("integrate failed");

    assert_eq!(result.status, IntegrationStatus::Success);
    assert!(result.modifications.is_empty());
    assert_eq!(target.build_calls(), 1);
    assert_eq!(target.publish_calls(), 1);
}

/// Test: a build-step failure is contained as Exception; the scheduler
/// sees a completed result, not a crash.
#[tokio::test]
async fn test_build_failure_is_contained_as_exception() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let clock = Arc::new(ManualClock::new(noon()));
    let target = Arc::new(
        StubTarget::new(RecordingSourceControl::new()).with_build_error("compiler ICE"),
    );
    let mut runner = runner(Arc::clone(&target), clock, tmp.path());

    let result = runner
        .integrate(IntegrationRequest::new(BuildCondition::ForceBuild, "forced"))
        .await
        .expect("integrate must not crash");

    assert_eq!(result.status, IntegrationStatus::Exception);
    assert!(result
        .exception
        .as_deref()
        .expect("exception stored")
        .contains("compiler ICE"));
    assert_eq!(result.end_time, Some(noon()));
    // Default gate: exceptions are not published or finalized.
    assert_eq!(target.publish_calls(), 0);
    assert!(runner.last_integration_result().request.is_none());
    assert_eq!(target.activity(), ProjectActivity::Sleeping);
}

/// Test: a Failure status from the build target is a normal, publishable
/// outcome - only Unknown is gated.
#[tokio::test]
async fn test_failed_build_status_still_publishes() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let clock = Arc::new(ManualClock::new(noon()));
    let target = Arc::new(
        StubTarget::new(RecordingSourceControl::new())
            .with_build_status(IntegrationStatus::Failure),
    );
    let mut runner = runner(Arc::clone(&target), clock, tmp.path());

    let result = runner
        .integrate(IntegrationRequest::new(BuildCondition::ForceBuild, "forced"))
        .await
        .expect("integrate failed");

    assert_eq!(result.status, IntegrationStatus::Failure);
    assert_eq!(target.publish_calls(), 1);
    assert_eq!(runner.last_integration_result().id, result.id);
}

/// Test: the second integration's modification window opens at the first
/// finalized result's start time.
#[tokio::test]
async fn test_next_integration_window_opens_at_previous_start() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let clock = Arc::new(ManualClock::new(noon()));
    let target = Arc::new(StubTarget::new(RecordingSourceControl::new()));
    let mut runner = runner(Arc::clone(&target), Arc::clone(&clock), tmp.path());

    let first = runner
        .integrate(IntegrationRequest::new(BuildCondition::ForceBuild, "forced"))
        .await
        .expect("integrate failed");

    clock.advance(chrono::Duration::hours(1));
    runner
        .integrate(IntegrationRequest::new(BuildCondition::ForceBuild, "forced"))
        .await
        .expect("integrate failed");

    let polls = target.source_control_fake().polls();
    assert_eq!(polls.len(), 2);
    assert_eq!(polls[1].0, first.start_time.expect("first start time"));
    assert_eq!(polls[1].1, noon() + chrono::Duration::hours(1));
}

/// Test: a schedule trigger drives the runner end to end - fire, build,
/// complete, then stay quiet until the next day.
#[tokio::test]
async fn test_schedule_trigger_drives_one_integration_per_day() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let clock = Arc::new(ManualClock::new(
        Utc.with_ymd_and_hms(2024, 3, 1, 14, 25, 0).unwrap(),
    ));
    let time = chrono::NaiveTime::parse_from_str("14:30", "%H:%M").expect("time");
    let mut trigger = ScheduleTrigger::new(Arc::clone(&clock) as Arc<dyn Clock>, time)
        .with_build_condition(BuildCondition::ForceBuild);

    let target = Arc::new(StubTarget::new(RecordingSourceControl::new()));
    let mut runner = runner(Arc::clone(&target), Arc::clone(&clock), tmp.path());

    assert_eq!(trigger.should_run_integration(), BuildCondition::NoBuild);

    clock.advance(chrono::Duration::minutes(10));
    let condition = trigger.should_run_integration();
    assert_eq!(condition, BuildCondition::ForceBuild);

    let result = runner
        .integrate(IntegrationRequest::new(condition, "schedule"))
        .await
        .expect("integrate failed");
    assert_eq!(result.status, IntegrationStatus::Success);
    trigger.integration_completed();

    // Quiet for the rest of the day, due again at 14:30 tomorrow.
    clock.set(Utc.with_ymd_and_hms(2024, 3, 1, 23, 59, 0).unwrap());
    assert_eq!(trigger.should_run_integration(), BuildCondition::NoBuild);
    clock.set(Utc.with_ymd_and_hms(2024, 3, 2, 14, 30, 0).unwrap());
    assert_eq!(trigger.should_run_integration(), BuildCondition::ForceBuild);
}

/// Test: a prebuild hook failure is caught by the same guard as the rest
/// of the build stages.
#[tokio::test]
async fn test_prebuild_failure_is_guarded() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let clock = Arc::new(ManualClock::new(noon()));
    let target = Arc::new(
        StubTarget::new(RecordingSourceControl::new()).with_prebuild_error("hook script missing"),
    );
    let mut runner = runner(Arc::clone(&target), clock, tmp.path());

    let result = runner
        .integrate(IntegrationRequest::new(BuildCondition::ForceBuild, "forced"))
        .await
        .expect("integrate must not crash");

    assert_eq!(result.status, IntegrationStatus::Exception);
    assert_eq!(target.prebuild_calls(), 1);
    // The guard stopped the stage walk before source retrieval.
    assert_eq!(target.source_control_fake().get_source_calls(), 0);
    assert_eq!(target.build_calls(), 0);
}

//! Integration results: the mutable record of one integration attempt.

use crate::condition::BuildCondition;
use crate::modification::Modification;
use crate::request::IntegrationRequest;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use uuid::Uuid;

/// Outcome of an integration attempt.
///
/// The runner itself only distinguishes `Exception` from everything else;
/// `Success`, `Failure` and `Cancelled` are set by the build target.
/// A result whose status is still `Unknown` is never published.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IntegrationStatus {
    Unknown,
    Success,
    Failure,
    Exception,
    Cancelled,
}

/// Record of one integration attempt.
///
/// Owned exclusively by the runner for the duration of one `integrate`
/// call; obtained from the result manager at start and handed back at
/// finish.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntegrationResult {
    /// Unique id for this attempt.
    pub id: Uuid,

    /// Project this result belongs to.
    pub project_name: String,

    /// Checkout / build directory. Created on demand by the runner.
    pub working_directory: PathBuf,

    /// Directory for build artifacts. Created on demand by the runner.
    pub artifact_directory: PathBuf,

    /// Request that started this attempt. `None` only on the initial
    /// sentinel returned before any integration has been finalized.
    pub request: Option<IntegrationRequest>,

    /// When the pipeline entered the attempt.
    pub start_time: Option<DateTime<Utc>>,

    /// When the pipeline left the attempt.
    pub end_time: Option<DateTime<Utc>>,

    /// Modifications detected for this attempt, in provider order.
    pub modifications: Vec<Modification>,

    /// Outcome so far.
    pub status: IntegrationStatus,

    /// Rendered error chain, when the guarded region captured a failure.
    pub exception: Option<String>,
}

impl IntegrationResult {
    /// Fresh record for a new attempt.
    pub fn new(
        project_name: impl Into<String>,
        working_directory: PathBuf,
        artifact_directory: PathBuf,
        request: IntegrationRequest,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            project_name: project_name.into(),
            working_directory,
            artifact_directory,
            request: Some(request),
            start_time: None,
            end_time: None,
            modifications: Vec::new(),
            status: IntegrationStatus::Unknown,
            exception: None,
        }
    }

    /// Sentinel "no previous integration" record, used as the delta
    /// baseline until a first integration has been finalized.
    pub fn initial(
        project_name: impl Into<String>,
        working_directory: PathBuf,
        artifact_directory: PathBuf,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            project_name: project_name.into(),
            working_directory,
            artifact_directory,
            request: None,
            start_time: None,
            end_time: None,
            modifications: Vec::new(),
            status: IntegrationStatus::Unknown,
            exception: None,
        }
    }

    /// Condition requested for this attempt (`NoBuild` on the sentinel).
    pub fn build_condition(&self) -> BuildCondition {
        self.request
            .as_ref()
            .map(|r| r.build_condition)
            .unwrap_or(BuildCondition::NoBuild)
    }

    /// The execution-time build decision.
    ///
    /// This, not the trigger's original answer, is authoritative once the
    /// pipeline runs: modifications may have changed between trigger
    /// evaluation and execution. `ForceBuild` always runs,
    /// `IfModificationExists` runs only on a non-empty modification set,
    /// `NoBuild` never runs.
    pub fn should_run_build(&self) -> bool {
        match self.build_condition() {
            BuildCondition::ForceBuild => true,
            BuildCondition::IfModificationExists => self.has_modifications(),
            BuildCondition::NoBuild => false,
        }
    }

    pub fn has_modifications(&self) -> bool {
        !self.modifications.is_empty()
    }

    /// Timestamp of the newest detected modification.
    pub fn last_modification_time(&self) -> Option<DateTime<Utc>> {
        self.modifications.iter().map(|m| m.modified_at).max()
    }

    pub fn mark_start_time(&mut self, now: DateTime<Utc>) {
        self.start_time = Some(now);
    }

    pub fn mark_end_time(&mut self, now: DateTime<Utc>) {
        self.end_time = Some(now);
    }

    /// Record a failure captured by the pipeline's guarded region: status
    /// becomes `Exception` and the full error chain is kept for reporting.
    pub fn mark_exception(&mut self, error: &anyhow::Error) {
        self.status = IntegrationStatus::Exception;
        self.exception = Some(format!("{:#}", error));
    }
}

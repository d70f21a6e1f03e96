//! In-memory fakes for pipeline collaborators (testing only)
//!
//! Provides `RecordingSourceControl` and `StubTarget` that satisfy the
//! `SourceControl` and `IntegrationTarget` contracts without touching any
//! real provider or build system. Both record their calls and support
//! failure injection.

use std::collections::VecDeque;
use std::sync::Mutex;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

use helmsman_core::{
    ActivityCell, IntegrationResult, IntegrationStatus, Modification, ProjectActivity,
};

use crate::source_control::SourceControl;
use crate::target::IntegrationTarget;

// ---------------------------------------------------------------------------
// RecordingSourceControl
// ---------------------------------------------------------------------------

/// Scripted source-control provider.
///
/// Each `modifications` poll consumes the next scripted batch; the final
/// batch repeats once the script runs out (no batches means an empty
/// history). Errors can be injected per operation.
#[derive(Default)]
pub struct RecordingSourceControl {
    batches: Mutex<VecDeque<Vec<Modification>>>,
    modifications_error: Option<String>,
    get_source_error: Option<String>,
    label_error: Option<String>,
    polls: Mutex<Vec<(DateTime<Utc>, DateTime<Utc>)>>,
    get_source_calls: Mutex<usize>,
    label_calls: Mutex<usize>,
}

impl RecordingSourceControl {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the next batch of modifications to report.
    pub fn push_batch(&self, batch: Vec<Modification>) {
        self.batches.lock().unwrap().push_back(batch);
    }

    /// Fail every `modifications` poll with the given message.
    pub fn with_modifications_error(mut self, message: impl Into<String>) -> Self {
        self.modifications_error = Some(message.into());
        self
    }

    /// Fail every `get_source` call with the given message.
    pub fn with_get_source_error(mut self, message: impl Into<String>) -> Self {
        self.get_source_error = Some(message.into());
        self
    }

    /// Fail every `label` call with the given message.
    pub fn with_label_error(mut self, message: impl Into<String>) -> Self {
        self.label_error = Some(message.into());
        self
    }

    /// Time windows observed across `modifications` polls.
    pub fn polls(&self) -> Vec<(DateTime<Utc>, DateTime<Utc>)> {
        self.polls.lock().unwrap().clone()
    }

    pub fn get_source_calls(&self) -> usize {
        *self.get_source_calls.lock().unwrap()
    }

    pub fn label_calls(&self) -> usize {
        *self.label_calls.lock().unwrap()
    }
}

#[async_trait]
impl SourceControl for RecordingSourceControl {
    async fn modifications(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<Modification>> {
        self.polls.lock().unwrap().push((from, to));
        if let Some(message) = &self.modifications_error {
            return Err(anyhow!(message.clone()));
        }
        let mut batches = self.batches.lock().unwrap();
        if batches.len() > 1 {
            Ok(batches.pop_front().unwrap_or_default())
        } else {
            Ok(batches.front().cloned().unwrap_or_default())
        }
    }

    async fn get_source(&self, _result: &IntegrationResult) -> Result<()> {
        *self.get_source_calls.lock().unwrap() += 1;
        match &self.get_source_error {
            Some(message) => Err(anyhow!(message.clone())),
            None => Ok(()),
        }
    }

    async fn label(&self, _result: &IntegrationResult) -> Result<()> {
        *self.label_calls.lock().unwrap() += 1;
        match &self.label_error {
            Some(message) => Err(anyhow!(message.clone())),
            None => Ok(()),
        }
    }
}

// ---------------------------------------------------------------------------
// StubTarget
// ---------------------------------------------------------------------------

/// Scripted integration target over a `RecordingSourceControl`.
///
/// `run_build` stamps a configurable status (default `Success`) on the
/// result; each hook can be made to fail. Activity transitions are traced
/// so tests can assert the pipeline's stage walk.
pub struct StubTarget {
    activity: ActivityCell,
    activity_trace: Mutex<Vec<ProjectActivity>>,
    source_control: RecordingSourceControl,
    publish_exceptions: bool,
    build_status: IntegrationStatus,
    prebuild_error: Option<String>,
    build_error: Option<String>,
    publish_error: Option<String>,
    prebuild_calls: Mutex<usize>,
    build_calls: Mutex<usize>,
    publish_calls: Mutex<usize>,
}

impl StubTarget {
    pub fn new(source_control: RecordingSourceControl) -> Self {
        Self {
            activity: ActivityCell::default(),
            activity_trace: Mutex::new(Vec::new()),
            source_control,
            publish_exceptions: false,
            build_status: IntegrationStatus::Success,
            prebuild_error: None,
            build_error: None,
            publish_error: None,
            prebuild_calls: Mutex::new(0),
            build_calls: Mutex::new(0),
            publish_calls: Mutex::new(0),
        }
    }

    /// Opt in to publishing `Exception` results.
    pub fn with_publish_exceptions(mut self, publish: bool) -> Self {
        self.publish_exceptions = publish;
        self
    }

    /// Status that `run_build` stamps on the result.
    pub fn with_build_status(mut self, status: IntegrationStatus) -> Self {
        self.build_status = status;
        self
    }

    pub fn with_prebuild_error(mut self, message: impl Into<String>) -> Self {
        self.prebuild_error = Some(message.into());
        self
    }

    pub fn with_build_error(mut self, message: impl Into<String>) -> Self {
        self.build_error = Some(message.into());
        self
    }

    pub fn with_publish_error(mut self, message: impl Into<String>) -> Self {
        self.publish_error = Some(message.into());
        self
    }

    /// The scripted provider behind `source_control()`.
    pub fn source_control_fake(&self) -> &RecordingSourceControl {
        &self.source_control
    }

    /// Every activity transition observed, in order.
    pub fn activity_trace(&self) -> Vec<ProjectActivity> {
        self.activity_trace.lock().unwrap().clone()
    }

    pub fn prebuild_calls(&self) -> usize {
        *self.prebuild_calls.lock().unwrap()
    }

    pub fn build_calls(&self) -> usize {
        *self.build_calls.lock().unwrap()
    }

    pub fn publish_calls(&self) -> usize {
        *self.publish_calls.lock().unwrap()
    }
}

#[async_trait]
impl IntegrationTarget for StubTarget {
    fn activity(&self) -> ProjectActivity {
        self.activity.load()
    }

    fn set_activity(&self, activity: ProjectActivity) {
        self.activity.store(activity);
        self.activity_trace.lock().unwrap().push(activity);
    }

    fn source_control(&self) -> &dyn SourceControl {
        &self.source_control
    }

    fn publish_exceptions(&self) -> bool {
        self.publish_exceptions
    }

    async fn prebuild(&self, _result: &mut IntegrationResult) -> Result<()> {
        *self.prebuild_calls.lock().unwrap() += 1;
        match &self.prebuild_error {
            Some(message) => Err(anyhow!(message.clone())),
            None => Ok(()),
        }
    }

    async fn run_build(&self, result: &mut IntegrationResult) -> Result<()> {
        *self.build_calls.lock().unwrap() += 1;
        match &self.build_error {
            Some(message) => Err(anyhow!(message.clone())),
            None => {
                result.status = self.build_status;
                Ok(())
            }
        }
    }

    async fn publish_results(&self, _result: &IntegrationResult) -> Result<()> {
        *self.publish_calls.lock().unwrap() += 1;
        match &self.publish_error {
            Some(message) => Err(anyhow!(message.clone())),
            None => Ok(()),
        }
    }
}

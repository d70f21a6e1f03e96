//! Project activity: coarse liveness state of a pipeline.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU8, Ordering};

/// What a project's pipeline is currently doing.
///
/// Exactly one value is active at a time. Transitions are a side effect of
/// pipeline stage entry, not a validated state machine; any component may
/// read the value to report liveness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectActivity {
    /// Waiting for the next trigger.
    Sleeping,

    /// Polling source control for modifications.
    CheckingModifications,

    /// Running a build.
    Building,
}

impl ProjectActivity {
    fn as_u8(self) -> u8 {
        match self {
            ProjectActivity::Sleeping => 0,
            ProjectActivity::CheckingModifications => 1,
            ProjectActivity::Building => 2,
        }
    }

    fn from_u8(value: u8) -> Self {
        match value {
            1 => ProjectActivity::CheckingModifications,
            2 => ProjectActivity::Building,
            _ => ProjectActivity::Sleeping,
        }
    }
}

/// Atomically-updated activity cell.
///
/// External monitors read the activity while a pipeline is mid-flight, so
/// every update is a single atomic store, never an incremental mutation.
#[derive(Debug)]
pub struct ActivityCell(AtomicU8);

impl ActivityCell {
    pub fn new(activity: ProjectActivity) -> Self {
        Self(AtomicU8::new(activity.as_u8()))
    }

    /// Current activity.
    pub fn load(&self) -> ProjectActivity {
        ProjectActivity::from_u8(self.0.load(Ordering::SeqCst))
    }

    /// Replace the activity in one atomic assignment.
    pub fn store(&self, activity: ProjectActivity) {
        self.0.store(activity.as_u8(), Ordering::SeqCst);
    }
}

impl Default for ActivityCell {
    fn default() -> Self {
        Self::new(ProjectActivity::Sleeping)
    }
}

//! Integration result lifecycle management.

use std::path::PathBuf;

use uuid::Uuid;

use helmsman_core::{CiError, IntegrationRequest, IntegrationResult};

/// Owns the current and most recent integration result records for one
/// managed project.
///
/// Exactly one result is in progress at a time: starting a new integration
/// replaces any stale in-progress registration, and only
/// `finish_integration` commits a result as the new "last".
pub trait IntegrationResultManager: Send {
    /// Create and register a fresh in-progress result for the request.
    fn start_new_integration(
        &mut self,
        request: &IntegrationRequest,
    ) -> Result<IntegrationResult, CiError>;

    /// Most recently finalized result, or the initial sentinel when no
    /// integration has ever been committed.
    fn last_integration_result(&self) -> IntegrationResult;

    /// Commit a completed result as the new "last" result.
    fn finish_integration(&mut self, result: IntegrationResult);
}

/// In-memory manager for a single project.
pub struct ProjectResultManager {
    project_name: String,
    working_directory: PathBuf,
    artifact_directory: PathBuf,
    in_progress: Option<Uuid>,
    last: Option<IntegrationResult>,
}

impl ProjectResultManager {
    pub fn new(
        project_name: impl Into<String>,
        working_directory: PathBuf,
        artifact_directory: PathBuf,
    ) -> Self {
        Self {
            project_name: project_name.into(),
            working_directory,
            artifact_directory,
            in_progress: None,
            last: None,
        }
    }

    /// Id of the registered in-progress result, if any.
    pub fn in_progress(&self) -> Option<Uuid> {
        self.in_progress
    }
}

impl IntegrationResultManager for ProjectResultManager {
    fn start_new_integration(
        &mut self,
        request: &IntegrationRequest,
    ) -> Result<IntegrationResult, CiError> {
        let result = IntegrationResult::new(
            self.project_name.clone(),
            self.working_directory.clone(),
            self.artifact_directory.clone(),
            request.clone(),
        );
        self.in_progress = Some(result.id);
        Ok(result)
    }

    fn last_integration_result(&self) -> IntegrationResult {
        self.last.clone().unwrap_or_else(|| {
            IntegrationResult::initial(
                self.project_name.clone(),
                self.working_directory.clone(),
                self.artifact_directory.clone(),
            )
        })
    }

    fn finish_integration(&mut self, result: IntegrationResult) {
        self.in_progress = None;
        self.last = Some(result);
    }
}

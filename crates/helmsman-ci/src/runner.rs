//! The integration pipeline orchestrator.

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use tracing::{error, info, warn};

use helmsman_core::{
    CiError, Clock, IntegrationRequest, IntegrationResult, IntegrationStatus, ProjectActivity,
};

use crate::quiet_period::QuietPeriod;
use crate::result_manager::IntegrationResultManager;
use crate::target::IntegrationTarget;

/// Drives one full integration attempt per `integrate` call: quiet-period
/// modification detection, conditional build execution, then labeling,
/// publishing and finalization gated on the result's status.
///
/// One runner per project; calls are sequential (`&mut self`). The target
/// is shared so external monitors can read its activity while a pipeline
/// is mid-flight.
pub struct IntegrationRunner {
    result_manager: Box<dyn IntegrationResultManager>,
    target: Arc<dyn IntegrationTarget>,
    quiet_period: Box<dyn QuietPeriod>,
    clock: Arc<dyn Clock>,
}

impl IntegrationRunner {
    pub fn new(
        result_manager: Box<dyn IntegrationResultManager>,
        target: Arc<dyn IntegrationTarget>,
        quiet_period: Box<dyn QuietPeriod>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            result_manager,
            target,
            quiet_period,
            clock,
        }
    }

    /// Most recently finalized result for this runner's project.
    pub fn last_integration_result(&self) -> IntegrationResult {
        self.result_manager.last_integration_result()
    }

    /// Run one integration attempt.
    ///
    /// Only the result-manager handshake can fail this call. Every failure
    /// past it is captured on the returned result as `Exception` status and
    /// never rethrown: a failed build is a completed run, not a crash.
    pub async fn integrate(
        &mut self,
        request: IntegrationRequest,
    ) -> Result<IntegrationResult, CiError> {
        let mut result = self.result_manager.start_new_integration(&request)?;
        let last_result = self.result_manager.last_integration_result();

        result.mark_start_time(self.clock.now());

        if let Err(err) = self.run_guarded(&request, &last_result, &mut result).await {
            error!(
                project = %result.project_name,
                "integration raised an exception: {:#}", err
            );
            result.mark_exception(&err);
        }

        result.mark_end_time(self.clock.now());
        self.post_build(&mut result).await;

        Ok(result)
    }

    /// Guarded region: any error here degrades to `Exception` status on the
    /// result instead of unwinding past the orchestrator. Directory
    /// creation sits inside the guard so transient filesystem errors are
    /// contained the same way source-control and build failures are.
    async fn run_guarded(
        &self,
        request: &IntegrationRequest,
        last_result: &IntegrationResult,
        result: &mut IntegrationResult,
    ) -> anyhow::Result<()> {
        create_directory_if_missing(&result.working_directory).await?;
        create_directory_if_missing(&result.artifact_directory).await?;

        self.target
            .set_activity(ProjectActivity::CheckingModifications);
        result.modifications = self
            .quiet_period
            .modifications(self.target.source_control(), last_result, result)
            .await?;

        if result.should_run_build() {
            info!(project = %result.project_name, "Building: {}", request);
            self.target.set_activity(ProjectActivity::Building);
            self.target.prebuild(result).await?;
            self.target.source_control().get_source(result).await?;
            self.target.run_build(result).await?;
            info!(
                project = %result.project_name,
                status = ?result.status,
                "Build complete"
            );
        }
        Ok(())
    }

    async fn post_build(&mut self, result: &mut IntegrationResult) {
        if self.should_publish_result(result) {
            self.label_source_control(result).await;
            if let Err(err) = self.target.publish_results(result).await {
                error!(
                    project = %result.project_name,
                    "publishing results failed: {:#}", err
                );
            }
            self.result_manager.finish_integration(result.clone());
        }
        info!(
            project = %result.project_name,
            end_time = ?result.end_time,
            "Integration complete"
        );
        self.target.set_activity(ProjectActivity::Sleeping);
    }

    /// Labeling failures are logged and discarded; they must never fail or
    /// mask the underlying build result.
    async fn label_source_control(&self, result: &IntegrationResult) {
        if let Err(err) = self.target.source_control().label(result).await {
            warn!(
                project = %result.project_name,
                "labelling source control failed: {:#}", err
            );
        }
    }

    /// Publish gate, evaluated once per `integrate` call: `Exception`
    /// results publish only when the target opts in; anything else
    /// publishes unless the status is still `Unknown`.
    fn should_publish_result(&self, result: &IntegrationResult) -> bool {
        if result.status == IntegrationStatus::Exception {
            self.target.publish_exceptions()
        } else {
            result.status != IntegrationStatus::Unknown
        }
    }
}

/// Idempotent directory creation for the working and artifact trees.
async fn create_directory_if_missing(path: &Path) -> anyhow::Result<()> {
    tokio::fs::create_dir_all(path)
        .await
        .with_context(|| format!("creating directory {}", path.display()))
}

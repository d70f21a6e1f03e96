//! Integration target boundary: the project being built.

use anyhow::Result;
use async_trait::async_trait;

use helmsman_core::{IntegrationResult, ProjectActivity};

use crate::source_control::SourceControl;

/// The project a runner drives: build hooks, publishers and liveness
/// state, behind one method-call boundary.
///
/// Activity reads and writes must be safe under concurrency: external
/// monitors poll `activity` while a pipeline is mid-flight, so
/// implementations should back it with an atomically-updated cell (see
/// `helmsman_core::ActivityCell`).
#[async_trait]
pub trait IntegrationTarget: Send + Sync {
    /// Current liveness state.
    fn activity(&self) -> ProjectActivity;

    /// Atomically replace the liveness state.
    fn set_activity(&self, activity: ProjectActivity);

    /// Source-control provider for this project.
    fn source_control(&self) -> &dyn SourceControl;

    /// Whether results with `Exception` status should still be published.
    fn publish_exceptions(&self) -> bool;

    /// Hook invoked after modification detection, before source retrieval,
    /// once a build is due.
    async fn prebuild(&self, result: &mut IntegrationResult) -> Result<()>;

    /// Execute the build, setting `Success` or `Failure` on the result.
    async fn run_build(&self, result: &mut IntegrationResult) -> Result<()>;

    /// Hand the finished result to the configured publishers.
    async fn publish_results(&self, result: &IntegrationResult) -> Result<()>;
}

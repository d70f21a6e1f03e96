//! Source-control provider boundary.

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

use helmsman_core::{IntegrationResult, Modification};

/// Method-call boundary to a source-control provider.
///
/// Provider implementations live outside this crate; the pipeline needs
/// only these three operations. All of them may block on network or
/// process I/O, so they are async.
#[async_trait]
pub trait SourceControl: Send + Sync {
    /// Changes recorded between `from` and `to`, in provider order.
    async fn modifications(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<Modification>>;

    /// Populate the attempt's working directory with sources.
    async fn get_source(&self, result: &IntegrationResult) -> Result<()>;

    /// Tag the repository with the attempt's identity.
    async fn label(&self, result: &IntegrationResult) -> Result<()>;
}

//! Quiet-period modification detection.
//!
//! Lets burst checkin activity settle before computing a definitive change
//! set: while the newest observed modification is younger than the quiet
//! duration, the detector sleeps out the remainder and re-polls. The total
//! wait is bounded; on reaching the bound the detector returns whatever it
//! has observed rather than failing.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use tracing::{debug, warn};

use helmsman_core::{Clock, IntegrationResult, Modification};

use crate::source_control::SourceControl;

/// Modification-detection contract consumed by the runner.
#[async_trait]
pub trait QuietPeriod: Send + Sync {
    /// Modification set between the previous and current attempts, once
    /// activity has settled. This is the primary suspension point in the
    /// pipeline; implementations must bound their wait.
    async fn modifications(
        &self,
        source_control: &dyn SourceControl,
        from: &IntegrationResult,
        to: &IntegrationResult,
    ) -> Result<Vec<Modification>>;
}

/// Polling detector with a bounded settle wait.
pub struct QuietPeriodDetector {
    clock: Arc<dyn Clock>,
    quiet_duration: Duration,
    max_wait: Duration,
}

impl QuietPeriodDetector {
    pub fn new(clock: Arc<dyn Clock>, quiet_duration: Duration, max_wait: Duration) -> Self {
        Self {
            clock,
            quiet_duration,
            max_wait,
        }
    }

    /// Detector that never waits: every poll is final.
    pub fn immediate(clock: Arc<dyn Clock>) -> Self {
        Self::new(clock, Duration::ZERO, Duration::ZERO)
    }
}

#[async_trait]
impl QuietPeriod for QuietPeriodDetector {
    async fn modifications(
        &self,
        source_control: &dyn SourceControl,
        from: &IntegrationResult,
        to: &IntegrationResult,
    ) -> Result<Vec<Modification>> {
        // The window opens at the previous attempt's start; the initial
        // sentinel has no timestamps, in which case all history qualifies.
        let window_start = from
            .start_time
            .or(from.end_time)
            .unwrap_or(chrono::DateTime::<chrono::Utc>::MIN_UTC);
        let deadline = tokio::time::Instant::now() + self.max_wait;

        loop {
            let now = self.clock.now();
            let modifications = source_control.modifications(window_start, now).await?;

            let Some(newest) = modifications.iter().map(|m| m.modified_at).max() else {
                return Ok(modifications);
            };
            let age = now
                .signed_duration_since(newest)
                .to_std()
                .unwrap_or(Duration::ZERO);
            let Some(remaining) = self.quiet_duration.checked_sub(age) else {
                return Ok(modifications);
            };
            if remaining.is_zero() {
                return Ok(modifications);
            }

            if tokio::time::Instant::now() + remaining > deadline {
                // Timeout is not an error; report what was observed.
                warn!(
                    project = %to.project_name,
                    observed = modifications.len(),
                    "quiet period exceeded maximum wait, proceeding with observed modifications"
                );
                return Ok(modifications);
            }

            debug!(
                project = %to.project_name,
                wait_ms = remaining.as_millis() as u64,
                "modification activity still settling"
            );
            tokio::time::sleep(remaining).await;
        }
    }
}

//! Fixed-interval trigger.

use std::sync::Arc;
use std::time::Duration as StdDuration;

use chrono::Duration;

use helmsman_core::{BuildCondition, Clock};

use super::Trigger;

/// Fires whenever at least `interval` has elapsed since the last completed
/// integration. With no prior integration the first evaluation fires
/// immediately.
pub struct IntervalTrigger {
    clock: Arc<dyn Clock>,
    interval: Duration,
    build_condition: BuildCondition,
    last_completed: Option<chrono::DateTime<chrono::Utc>>,
}

impl IntervalTrigger {
    pub fn new(clock: Arc<dyn Clock>, interval: StdDuration) -> Self {
        Self {
            clock,
            interval: Duration::from_std(interval).unwrap_or(Duration::MAX),
            build_condition: BuildCondition::IfModificationExists,
            last_completed: None,
        }
    }

    pub fn with_build_condition(mut self, condition: BuildCondition) -> Self {
        self.build_condition = condition;
        self
    }

    pub fn build_condition(&self) -> BuildCondition {
        self.build_condition
    }
}

impl Trigger for IntervalTrigger {
    fn should_run_integration(&mut self) -> BuildCondition {
        match self.last_completed {
            None => self.build_condition,
            Some(last) => {
                let elapsed = self.clock.now().signed_duration_since(last);
                if elapsed >= self.interval {
                    self.build_condition
                } else {
                    BuildCondition::NoBuild
                }
            }
        }
    }

    fn integration_completed(&mut self) {
        self.last_completed = Some(self.clock.now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use helmsman_core::fakes::ManualClock;

    #[test]
    fn test_first_evaluation_fires_immediately() {
        let clock = Arc::new(ManualClock::new(
            Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
        ));
        let mut trigger =
            IntervalTrigger::new(Arc::clone(&clock) as Arc<dyn Clock>, StdDuration::from_secs(60));
        assert_eq!(
            trigger.build_condition(),
            BuildCondition::IfModificationExists
        );
        assert_eq!(
            trigger.should_run_integration(),
            BuildCondition::IfModificationExists
        );
    }

    #[test]
    fn test_waits_out_the_interval_after_completion() {
        let clock = Arc::new(ManualClock::new(
            Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
        ));
        let mut trigger =
            IntervalTrigger::new(Arc::clone(&clock) as Arc<dyn Clock>, StdDuration::from_secs(60))
                .with_build_condition(BuildCondition::ForceBuild);

        trigger.integration_completed();
        assert_eq!(trigger.should_run_integration(), BuildCondition::NoBuild);

        clock.advance(Duration::seconds(59));
        assert_eq!(trigger.should_run_integration(), BuildCondition::NoBuild);

        clock.advance(Duration::seconds(1));
        assert_eq!(trigger.should_run_integration(), BuildCondition::ForceBuild);
    }

    #[test]
    fn test_completion_restarts_the_interval_from_now() {
        let clock = Arc::new(ManualClock::new(
            Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
        ));
        let mut trigger =
            IntervalTrigger::new(Arc::clone(&clock) as Arc<dyn Clock>, StdDuration::from_secs(30));

        clock.advance(Duration::minutes(5));
        trigger.integration_completed();

        clock.advance(Duration::seconds(10));
        assert_eq!(trigger.should_run_integration(), BuildCondition::NoBuild);
        clock.advance(Duration::seconds(20));
        assert_eq!(
            trigger.should_run_integration(),
            BuildCondition::IfModificationExists
        );
    }
}

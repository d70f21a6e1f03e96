//! Time-of-day schedule trigger.

use std::sync::Arc;

use chrono::{DateTime, Datelike, Duration, NaiveTime, Utc, Weekday};

use helmsman_core::{BuildCondition, Clock};

use super::Trigger;

/// Every week-day, in calendar order. The default day filter.
pub(crate) const ALL_WEEK_DAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Fires once per day at a configured time-of-day, on allowed week-days.
///
/// The "next integration due" timestamp is anchored lazily on first
/// evaluation to today (per the injected clock) at the configured time. It
/// does not move when the trigger fires; only `integration_completed`
/// advances it, by exactly one day from the previous due timestamp. A
/// trigger first evaluated long after today's deadline therefore fires
/// immediately and self-corrects through the completion hook.
pub struct ScheduleTrigger {
    clock: Arc<dyn Clock>,
    time: NaiveTime,
    build_condition: BuildCondition,
    week_days: Vec<Weekday>,
    next_due: Option<DateTime<Utc>>,
}

impl ScheduleTrigger {
    pub fn new(clock: Arc<dyn Clock>, time: NaiveTime) -> Self {
        Self {
            clock,
            time,
            build_condition: BuildCondition::IfModificationExists,
            week_days: ALL_WEEK_DAYS.to_vec(),
            next_due: None,
        }
    }

    /// Condition to answer with when the trigger fires.
    pub fn with_build_condition(mut self, condition: BuildCondition) -> Self {
        self.build_condition = condition;
        self
    }

    /// Restrict firing to the given week-days.
    pub fn with_week_days(mut self, days: Vec<Weekday>) -> Self {
        self.week_days = days;
        self
    }

    pub fn time(&self) -> NaiveTime {
        self.time
    }

    pub fn build_condition(&self) -> BuildCondition {
        self.build_condition
    }

    pub fn week_days(&self) -> &[Weekday] {
        &self.week_days
    }

    fn due_time(&mut self, now: DateTime<Utc>) -> DateTime<Utc> {
        let time = self.time;
        *self
            .next_due
            .get_or_insert_with(|| now.date_naive().and_time(time).and_utc())
    }
}

impl Trigger for ScheduleTrigger {
    fn should_run_integration(&mut self) -> BuildCondition {
        let now = self.clock.now();
        let due = self.due_time(now);
        if now < due {
            return BuildCondition::NoBuild;
        }
        // Day filtering applies independently of the due check: a
        // disallowed day always answers NoBuild, however late it is.
        if !self.week_days.contains(&now.weekday()) {
            return BuildCondition::NoBuild;
        }
        self.build_condition
    }

    fn integration_completed(&mut self) {
        let now = self.clock.now();
        let due = self.due_time(now);
        // Next occurrence of the configured time-of-day strictly after the
        // previous due timestamp, regardless of how late completion came:
        // due 14:30 completed at 15:00 still rolls to 14:30 tomorrow.
        self.next_due = Some(due + Duration::days(1));
    }
}

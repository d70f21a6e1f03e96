//! Declarative trigger configuration.
//!
//! An explicit serde schema (field name, parser, default) validated
//! eagerly at load time: malformed time strings and week-day names fail
//! when the trigger is built, never at evaluation time. JSON is the
//! reference encoding.

use std::sync::Arc;
use std::time::Duration;

use chrono::{NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

use helmsman_core::{BuildCondition, Clock, ConfigError};

use super::{IntervalTrigger, MultipleTrigger, ScheduleTrigger, Trigger, TriggerOperator};

fn default_build_condition() -> BuildCondition {
    BuildCondition::IfModificationExists
}

/// Configuration for a [`ScheduleTrigger`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ScheduleTriggerConfig {
    /// Time of day to trigger, `HH:mm` or `HH:mm:ss`.
    pub time: String,

    /// Condition answered when the trigger fires.
    #[serde(default = "default_build_condition")]
    pub build_condition: BuildCondition,

    /// Allowed week-day names. Unset means all seven days; an explicit
    /// empty list means never.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub week_days: Option<Vec<String>>,
}

impl ScheduleTriggerConfig {
    /// Validate and build the trigger.
    pub fn into_trigger(self, clock: Arc<dyn Clock>) -> Result<ScheduleTrigger, ConfigError> {
        let time = parse_time_of_day(&self.time)?;
        let mut trigger =
            ScheduleTrigger::new(clock, time).with_build_condition(self.build_condition);
        if let Some(names) = self.week_days {
            let days = names
                .iter()
                .map(|name| parse_week_day(name))
                .collect::<Result<Vec<_>, _>>()?;
            trigger = trigger.with_week_days(days);
        }
        Ok(trigger)
    }
}

/// Configuration for an [`IntervalTrigger`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct IntervalTriggerConfig {
    /// Seconds between integrations.
    pub seconds: u64,

    /// Condition answered when the trigger fires.
    #[serde(default = "default_build_condition")]
    pub build_condition: BuildCondition,
}

impl IntervalTriggerConfig {
    pub fn into_trigger(self, clock: Arc<dyn Clock>) -> IntervalTrigger {
        IntervalTrigger::new(clock, Duration::from_secs(self.seconds))
            .with_build_condition(self.build_condition)
    }
}

/// Configuration for a [`MultipleTrigger`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct MultipleTriggerConfig {
    #[serde(default)]
    pub operator: TriggerOperator,

    /// Child trigger configurations. Must be non-empty.
    pub triggers: Vec<TriggerConfig>,
}

impl MultipleTriggerConfig {
    pub fn into_trigger(self, clock: Arc<dyn Clock>) -> Result<MultipleTrigger, ConfigError> {
        if self.triggers.is_empty() {
            return Err(ConfigError::EmptyTriggerSet);
        }
        let children = self
            .triggers
            .into_iter()
            .map(|config| config.into_trigger(Arc::clone(&clock)))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(MultipleTrigger::new(self.operator, children))
    }
}

/// Any trigger variant, tagged by `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum TriggerConfig {
    Schedule(ScheduleTriggerConfig),
    Interval(IntervalTriggerConfig),
    Multiple(MultipleTriggerConfig),
}

impl TriggerConfig {
    /// Parse a trigger configuration from its JSON encoding.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Validate and build the configured trigger.
    pub fn into_trigger(self, clock: Arc<dyn Clock>) -> Result<Box<dyn Trigger>, ConfigError> {
        Ok(match self {
            TriggerConfig::Schedule(config) => Box::new(config.into_trigger(clock)?),
            TriggerConfig::Interval(config) => Box::new(config.into_trigger(clock)),
            TriggerConfig::Multiple(config) => Box::new(config.into_trigger(clock)?),
        })
    }
}

/// Parse `HH:mm` or `HH:mm:ss`.
fn parse_time_of_day(value: &str) -> Result<NaiveTime, ConfigError> {
    NaiveTime::parse_from_str(value, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M"))
        .map_err(|_| ConfigError::InvalidTimeFormat {
            value: value.to_string(),
        })
}

/// Parse a week-day name ("Monday", "mon", case-insensitive).
fn parse_week_day(value: &str) -> Result<Weekday, ConfigError> {
    value
        .parse::<Weekday>()
        .map_err(|_| ConfigError::InvalidWeekDay {
            value: value.to_string(),
        })
}

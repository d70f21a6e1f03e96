//! Helmsman CI - trigger evaluation and the integration pipeline
//!
//! Two tightly coupled subsystems:
//! - Triggers: polymorphic policies that, given the current time and prior
//!   build history, decide whether a pending integration should occur and
//!   under what build condition.
//! - The integration runner: once triggered, sequences quiet-period
//!   modification detection, source retrieval, build execution, labeling
//!   and conditional publishing for one attempt, containing failures at
//!   each stage.
//!
//! Source-control providers, build-step internals and result publishers
//! are external collaborators reached through the `SourceControl` and
//! `IntegrationTarget` traits. In-memory fakes for both are provided via
//! the `fakes` module.

pub mod fakes;
pub mod quiet_period;
pub mod result_manager;
pub mod runner;
pub mod source_control;
pub mod target;
pub mod triggers;

// Re-export key types
pub use quiet_period::{QuietPeriod, QuietPeriodDetector};
pub use result_manager::{IntegrationResultManager, ProjectResultManager};
pub use runner::IntegrationRunner;
pub use source_control::SourceControl;
pub use target::IntegrationTarget;
pub use triggers::{
    IntervalTrigger, MultipleTrigger, ScheduleTrigger, Trigger, TriggerConfig, TriggerOperator,
};

//! Trigger policies: decide if, when and why an integration should run.
//!
//! Every variant implements the same narrow contract, so a scheduler can
//! hold heterogeneous trigger sets behind `Box<dyn Trigger>`. Combinators
//! wrap child triggers behind the same interface.

mod config;
mod interval;
mod multiple;
mod schedule;

pub use config::{
    IntervalTriggerConfig, MultipleTriggerConfig, ScheduleTriggerConfig, TriggerConfig,
};
pub use interval::IntervalTrigger;
pub use multiple::{MultipleTrigger, TriggerOperator};
pub use schedule::ScheduleTrigger;

use helmsman_core::BuildCondition;

/// Policy object deciding whether a pending integration should occur.
///
/// A trigger never discloses its internal fired state; callers observe it
/// only through the condition returned by each evaluation, and must call
/// `integration_completed` once a triggered integration finishes so the
/// trigger can advance its state.
pub trait Trigger: Send {
    /// Should an integration run right now, and under what condition?
    fn should_run_integration(&mut self) -> BuildCondition;

    /// Completion hook, called once per completed integration.
    fn integration_completed(&mut self);
}

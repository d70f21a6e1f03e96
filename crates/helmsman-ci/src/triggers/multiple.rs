//! Combinator trigger: AND / OR over child triggers.

use serde::{Deserialize, Serialize};

use helmsman_core::BuildCondition;

use super::Trigger;

/// How a `MultipleTrigger` combines its children's answers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TriggerOperator {
    /// Fire when any child fires; answer with the strongest condition.
    #[default]
    Or,

    /// Fire only when every child fires; answer with the strongest
    /// condition among them.
    And,
}

/// Wraps child triggers behind the single `Trigger` interface.
///
/// Conflicting answers resolve through `BuildCondition` ordering, so a
/// forced build from one child wins over a modification-dependent answer
/// from another.
pub struct MultipleTrigger {
    operator: TriggerOperator,
    triggers: Vec<Box<dyn Trigger>>,
}

impl MultipleTrigger {
    pub fn new(operator: TriggerOperator, triggers: Vec<Box<dyn Trigger>>) -> Self {
        Self { operator, triggers }
    }

    pub fn operator(&self) -> TriggerOperator {
        self.operator
    }
}

impl Trigger for MultipleTrigger {
    fn should_run_integration(&mut self) -> BuildCondition {
        let mut strongest = BuildCondition::NoBuild;
        let mut all_fired = !self.triggers.is_empty();

        // Every child is evaluated each round; short-circuiting would let
        // unevaluated children drift out of step with the clock.
        for trigger in &mut self.triggers {
            let condition = trigger.should_run_integration();
            if condition == BuildCondition::NoBuild {
                all_fired = false;
            }
            strongest = strongest.max(condition);
        }

        match self.operator {
            TriggerOperator::Or => strongest,
            TriggerOperator::And => {
                if all_fired {
                    strongest
                } else {
                    BuildCondition::NoBuild
                }
            }
        }
    }

    fn integration_completed(&mut self) {
        for trigger in &mut self.triggers {
            trigger.integration_completed();
        }
    }
}

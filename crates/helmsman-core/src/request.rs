//! Integration requests: the immutable input to one pipeline run.

use crate::condition::BuildCondition;
use serde::{Deserialize, Serialize};

/// A request to run one integration.
///
/// Carries the condition the trigger answered with and a human-readable
/// description of where the request came from (trigger name, user, API).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegrationRequest {
    /// Condition requested at trigger-evaluation time.
    pub build_condition: BuildCondition,

    /// Human-readable source of the request.
    pub source: String,
}

impl IntegrationRequest {
    pub fn new(build_condition: BuildCondition, source: impl Into<String>) -> Self {
        Self {
            build_condition,
            source: source.into(),
        }
    }
}

impl std::fmt::Display for IntegrationRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} triggered a build ({})", self.source, self.build_condition)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_display() {
        let request = IntegrationRequest::new(BuildCondition::ForceBuild, "nightly schedule");
        assert_eq!(
            request.to_string(),
            "nightly schedule triggered a build (ForceBuild)"
        );
    }

    #[test]
    fn test_request_serde_roundtrip() {
        let request = IntegrationRequest::new(BuildCondition::IfModificationExists, "interval");
        let json = serde_json::to_string(&request).expect("serialize");
        let parsed: IntegrationRequest = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(request, parsed);
    }
}

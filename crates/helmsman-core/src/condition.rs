//! Build conditions: the reason class for running an integration.

use serde::{Deserialize, Serialize};

/// Why an integration should (or should not) run.
///
/// The derived ordering is the tie-break rule for combinator triggers:
/// `NoBuild < IfModificationExists < ForceBuild`, so a forced build
/// overrides modification-dependent logic downstream.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum BuildCondition {
    /// Do not build.
    NoBuild,

    /// Build only if the modification set is non-empty.
    IfModificationExists,

    /// Build unconditionally.
    ForceBuild,
}

impl std::fmt::Display for BuildCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            BuildCondition::NoBuild => "NoBuild",
            BuildCondition::IfModificationExists => "IfModificationExists",
            BuildCondition::ForceBuild => "ForceBuild",
        };
        write!(f, "{}", name)
    }
}

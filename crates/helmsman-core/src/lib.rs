//! Helmsman Core - domain model for the CI trigger and pipeline engine
//!
//! Provides the value types shared by the trigger subsystem and the
//! integration runner:
//! - `BuildCondition`: why an integration should (or should not) run
//! - `IntegrationResult`: the mutable record of one integration attempt
//! - `ProjectActivity` / `ActivityCell`: liveness state readable by monitors
//! - `Clock`: injected time source so evaluation is deterministic under test
//!
//! In-memory fakes for testing are provided via the `fakes` module.

pub mod activity;
pub mod clock;
pub mod condition;
pub mod error;
pub mod fakes;
pub mod modification;
pub mod request;
pub mod result;

pub use activity::{ActivityCell, ProjectActivity};
pub use clock::{Clock, SystemClock};
pub use condition::BuildCondition;
pub use error::{CiError, ConfigError};
pub use modification::Modification;
pub use request::IntegrationRequest;
pub use result::{IntegrationResult, IntegrationStatus};

/// Result type for Helmsman core operations.
pub type Result<T> = std::result::Result<T, CiError>;

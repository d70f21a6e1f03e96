//! Injected time source.

use chrono::{DateTime, Utc};

/// Supplies the current time.
///
/// Passed explicitly into trigger construction and the runner, never read
/// from an ambient process-wide clock, so trigger evaluation is purely a
/// function of the injected time plus internal state. The clock defines the
/// project's wall-clock timeline; a schedule trigger's configured
/// time-of-day is interpreted on it.
pub trait Clock: Send + Sync {
    /// Current time on the project's timeline.
    fn now(&self) -> DateTime<Utc>;
}

/// Production clock backed by `Utc::now()`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

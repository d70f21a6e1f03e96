//! Error taxonomy for the Helmsman CI core.
//!
//! Two classes only:
//! - `ConfigError`: raised at trigger construction / configuration load
//!   time, fatal to that trigger's setup, never silently defaulted.
//! - `CiError`: pipeline-level failures that may surface from `integrate`
//!   before the guarded region begins. Everything inside the guarded
//!   region is captured on the result instead.

/// Errors raised while loading trigger configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid time-of-day '{value}': expected HH:mm or HH:mm:ss")]
    InvalidTimeFormat { value: String },

    #[error("invalid week-day name: {value}")]
    InvalidWeekDay { value: String },

    #[error("combinator trigger requires at least one child trigger")]
    EmptyTriggerSet,

    #[error("configuration parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Pipeline and result-manager errors.
#[derive(Debug, thiserror::Error)]
pub enum CiError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("result manager error: {0}")]
    ResultManager(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

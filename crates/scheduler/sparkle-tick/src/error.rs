//! Error types for the tick scheduler.

/// Errors raised while configuring drivers and tasks.
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum TickError {
    /// A configuration value is out of its accepted range.
    #[error("Invalid config: {field}: {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    /// A configuration document failed to parse.
    #[error("Config parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

impl TickError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field,
            reason: reason.into(),
        }
    }
}

/// Result alias for scheduler operations
pub type Result<T> = core::result::Result<T, TickError>;

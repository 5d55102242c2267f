//! Error types for frame generation and animation builders.

/// Errors raised while building frames or animations.
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum FxError {
    /// Input that would produce no frames or divide by zero.
    #[error("Degenerate input: {reason}")]
    DegenerateInput { reason: String },

    /// A builder or config value outside its accepted range.
    #[error("Invalid configuration: {field}: {reason}")]
    Configuration { field: &'static str, reason: String },

    /// A configuration document failed to parse.
    #[error("Config parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    Tick(#[from] sparkle_tick::TickError),
}

impl FxError {
    pub fn degenerate(reason: impl Into<String>) -> Self {
        Self::DegenerateInput {
            reason: reason.into(),
        }
    }

    pub fn config(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Configuration {
            field,
            reason: reason.into(),
        }
    }
}

/// Result alias for particle operations
pub type Result<T> = core::result::Result<T, FxError>;

use thiserror::Error;

/// Errors raised by the core value types.
#[derive(Debug, Error)]
pub enum SimError {
    /// A constructor was given an incomplete or contradictory set of arguments.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl SimError {
    pub fn invalid_argument(reason: impl Into<String>) -> Self {
        Self::InvalidArgument(reason.into())
    }
}

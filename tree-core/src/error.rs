//! Error types for skeleton generation.

use thiserror::Error;

/// Result type alias for generation operations.
pub type GrowthResult<T> = Result<T, GrowthError>;

/// Errors that can occur while generating a tree skeleton.
#[derive(Debug, Error)]
pub enum GrowthError {
    /// The configuration failed validation; nothing was generated.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A transform was popped without a matching push. This indicates
    /// a bug in the evaluator, not a recoverable user condition.
    #[error("transform chain popped below its identity base")]
    UnbalancedChain,
}

impl GrowthError {
    pub fn invalid_config(details: impl Into<String>) -> Self {
        Self::InvalidConfig(details.into())
    }
}

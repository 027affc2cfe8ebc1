use thiserror::Error;

/// Result type used by every splitting and recovery operation.
pub type Result<T> = std::result::Result<T, SssError>;

/// These are errors that can occur during secret sharing operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SssError {
    /// A parameter failed one of the precondition checks
    #[error("invalid parameter '{param}': {reason}")]
    InvalidArgument {
        /// Name of the offending parameter
        param: &'static str,
        /// Condition that was violated
        reason: &'static str,
    },

    #[error("not enough shares to reconstruct secret (need {threshold}, got {share_count})")]
    NotEnoughShares {
        /// Required number of shares (k)
        threshold: usize,
        /// Actual number of shares provided
        share_count: usize,
    },

    /// A share token (or recovered text) could not be parsed
    #[error("error parsing share: {0}")]
    Decode(String),

    /// The interpolation divider for a share has no inverse modulo the field prime
    #[error("divider for share {index} is not invertible modulo the field prime")]
    NonInvertibleDivisor {
        /// Index of the share whose Lagrange weight could not be computed
        index: u32,
    },
}

impl SssError {
    pub(crate) fn invalid(param: &'static str, reason: &'static str) -> Self {
        SssError::InvalidArgument { param, reason }
    }
}

use thiserror::Error;

/// Error type for JWT operations.
///
/// Verification failures stay distinguishable here for logging and tests;
/// the HTTP boundary collapses them into one outcome.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum JwtError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token signature is invalid")]
    InvalidSignature,

    #[error("Token is expired")]
    Expired,

    #[error("Token is malformed: {0}")]
    Malformed(String),
}

use thiserror::Error;

use crate::user::errors::UserError;

/// Errors raised while turning credentials or tokens into a user.
///
/// `InvalidCredentials` covers both unknown employee numbers and wrong
/// passwords; `InvalidToken` covers every token verification failure.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    #[error("Incorrect employee number or password")]
    InvalidCredentials,

    #[error("Could not validate credentials")]
    InvalidToken,

    #[error("Inactive user")]
    InactiveUser,

    #[error("Token issuance failed: {0}")]
    TokenIssuance(String),

    #[error(transparent)]
    User(#[from] UserError),
}

use chrono::Duration;

use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Authentication coordinator combining password verification and token
/// issuance under one configured token lifetime.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    jwt_handler: JwtHandler,
    token_ttl: Duration,
}

/// Result of successful authentication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessToken {
    /// Signed bearer token
    pub access_token: String,

    /// Lifetime of the token in seconds
    pub expires_in: i64,
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for token signing
    /// * `token_ttl` - Lifetime of issued tokens
    pub fn new(jwt_secret: &[u8], token_ttl: Duration) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            jwt_handler: JwtHandler::new(jwt_secret),
            token_ttl,
        }
    }

    /// Lifetime of tokens issued by [`Authenticator::issue_token`].
    pub fn token_ttl(&self) -> Duration {
        self.token_ttl
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Password is empty or hashing failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Check a plaintext password against a stored hash.
    pub fn verify_password(&self, password: &str, stored_hash: &str) -> bool {
        self.password_hasher.verify(password, stored_hash)
    }

    /// Burn the cost of one verification when no stored hash exists.
    pub fn verify_placeholder(&self, password: &str) {
        self.password_hasher.verify_placeholder(password)
    }

    /// Issue a token for `subject` with the configured lifetime.
    ///
    /// # Errors
    /// * `JwtError` - Token generation failed
    pub fn issue_token(&self, subject: &str) -> Result<AccessToken, JwtError> {
        let access_token = self.jwt_handler.issue(subject, self.token_ttl)?;

        Ok(AccessToken {
            access_token,
            expires_in: self.token_ttl.num_seconds(),
        })
    }

    /// Verify a token and return its subject.
    ///
    /// # Errors
    /// * `JwtError` - Signature invalid, token expired or malformed
    pub fn validate_token(&self, token: &str) -> Result<String, JwtError> {
        self.jwt_handler.verify(token)
    }
}

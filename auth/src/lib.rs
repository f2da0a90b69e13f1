//! Credential primitives for the work service.
//!
//! Passwords are stored as Argon2id PHC strings and sessions are carried by
//! short-lived HS256 bearer tokens whose subject is the employee number.
//! [`Authenticator`] binds both to one secret and one token lifetime.
//!
//! # Examples
//!
//! ## Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash));
//! assert!(!hasher.verify("other_password", &hash));
//! ```
//!
//! ## Access Tokens
//! ```
//! use auth::JwtHandler;
//! use chrono::Duration;
//!
//! let handler = JwtHandler::new(b"secret_key_at_least_32_bytes_long!");
//! let token = handler.issue("E1", Duration::minutes(30)).unwrap();
//! assert_eq!(handler.verify(&token).unwrap(), "E1");
//! ```
//!
//! ## Login
//! ```
//! use auth::Authenticator;
//! use chrono::Duration;
//!
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!", Duration::minutes(30));
//!
//! let hash = auth.hash_password("password123").unwrap();
//! assert!(auth.verify_password("password123", &hash));
//!
//! let issued = auth.issue_token("E1").unwrap();
//! assert_eq!(issued.expires_in, 1800);
//! assert_eq!(auth.validate_token(&issued.access_token).unwrap(), "E1");
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

pub use authenticator::AccessToken;
pub use authenticator::Authenticator;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use password::PasswordError;
pub use password::PasswordHasher;

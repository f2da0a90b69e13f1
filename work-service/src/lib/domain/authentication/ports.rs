use async_trait::async_trait;
use auth::AccessToken;

use crate::domain::authentication::errors::AuthError;
use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::User;
use crate::user::errors::UserError;

/// Port for authentication operations.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Exchange an employee number and password for an access token.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown employee number or wrong password
    /// * `InactiveUser` - Credentials are correct but the account is disabled
    /// * `TokenIssuance` - Token could not be signed
    async fn login(&self, employee_number: &str, password: &str)
        -> Result<AccessToken, AuthError>;

    /// Resolve a bearer token into the active user it was issued for.
    ///
    /// # Errors
    /// * `InvalidToken` - Bad signature, expired, malformed, or unknown subject
    /// * `InactiveUser` - Subject exists but is disabled
    async fn authenticate(&self, token: &str) -> Result<User, AuthError>;

    /// Self-register a regular, active user.
    ///
    /// # Errors
    /// * `EmployeeNumberAlreadyExists` - Employee number is already taken
    /// * `Password` - Password is empty or could not be hashed
    /// * `DatabaseError` - Database operation failed
    async fn register(&self, command: CreateUserCommand) -> Result<User, UserError>;
}

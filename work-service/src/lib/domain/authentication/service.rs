use std::sync::Arc;

use async_trait::async_trait;
use auth::AccessToken;
use auth::Authenticator;
use chrono::Utc;

use crate::domain::authentication::errors::AuthError;
use crate::domain::authentication::ports::AuthServicePort;
use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::EmployeeNumber;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;

/// Authentication service: login, bearer resolution and self-registration.
pub struct AuthService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
}

impl<UR> AuthService<UR>
where
    UR: UserRepository,
{
    pub fn new(repository: Arc<UR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }
}

#[async_trait]
impl<UR> AuthServicePort for AuthService<UR>
where
    UR: UserRepository,
{
    async fn login(
        &self,
        employee_number: &str,
        password: &str,
    ) -> Result<AccessToken, AuthError> {
        let employee_number = match EmployeeNumber::new(employee_number.to_string()) {
            Ok(employee_number) => employee_number,
            Err(_) => {
                self.authenticator.verify_placeholder(password);
                return Err(AuthError::InvalidCredentials);
            }
        };

        // Misses cost one verification, the same as a wrong password.
        let user = match self
            .repository
            .find_by_employee_number(&employee_number)
            .await?
        {
            Some(user) => user,
            None => {
                tracing::warn!(%employee_number, "Login attempt for unknown employee number");
                self.authenticator.verify_placeholder(password);
                return Err(AuthError::InvalidCredentials);
            }
        };

        if !self
            .authenticator
            .verify_password(password, &user.password_hash)
        {
            tracing::warn!(%employee_number, "Login attempt with wrong password");
            return Err(AuthError::InvalidCredentials);
        }

        if !user.is_active {
            tracing::warn!(%employee_number, "Login attempt for inactive user");
            return Err(AuthError::InactiveUser);
        }

        let token = self
            .authenticator
            .issue_token(user.employee_number.as_str())
            .map_err(|e| AuthError::TokenIssuance(e.to_string()))?;

        tracing::info!(user_id = %user.id, "Access token issued");

        Ok(token)
    }

    async fn authenticate(&self, token: &str) -> Result<User, AuthError> {
        let subject = self.authenticator.validate_token(token).map_err(|e| {
            tracing::warn!(error = %e, "Token verification failed");
            AuthError::InvalidToken
        })?;

        let employee_number =
            EmployeeNumber::new(subject).map_err(|_| AuthError::InvalidToken)?;

        let user = self
            .repository
            .find_by_employee_number(&employee_number)
            .await?
            .ok_or_else(|| {
                tracing::warn!(%employee_number, "Token subject no longer exists");
                AuthError::InvalidToken
            })?;

        if !user.is_active {
            return Err(AuthError::InactiveUser);
        }

        Ok(user)
    }

    async fn register(&self, command: CreateUserCommand) -> Result<User, UserError> {
        if self
            .repository
            .find_by_employee_number(&command.employee_number)
            .await?
            .is_some()
        {
            return Err(UserError::EmployeeNumberAlreadyExists(
                command.employee_number.to_string(),
            ));
        }

        let password_hash = self.authenticator.hash_password(&command.password)?;

        let user = User {
            id: UserId::new(),
            employee_number: command.employee_number,
            first_name: command.first_name,
            last_name: command.last_name,
            contact: command.contact,
            password_hash,
            is_admin: false,
            is_active: true,
            image_url: command.image_url,
            created_at: Utc::now(),
        };

        let created = self.repository.create(user).await?;
        tracing::info!(
            user_id = %created.id,
            employee_number = %created.employee_number,
            "User registered"
        );

        Ok(created)
    }
}

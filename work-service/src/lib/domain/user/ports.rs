use async_trait::async_trait;

use crate::domain::access::policy::Principal;
use crate::domain::pagination::Pagination;
use crate::domain::user::models::BootstrapAdmin;
use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::EmployeeNumber;
use crate::domain::user::models::UpdateProfileCommand;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;

/// Port for user domain service operations.
///
/// Every operation receives the acting principal and is gated by the
/// access policy before touching storage.
#[async_trait]
pub trait UserServicePort: Send + Sync + 'static {
    /// Retrieve a user the principal may read (itself, or anyone for admins).
    ///
    /// # Errors
    /// * `Forbidden` - Principal may not read this user
    /// * `NotFound` - User does not exist
    /// * `DatabaseError` - Database operation failed
    async fn get_user(&self, principal: &Principal, id: &UserId) -> Result<User, UserError>;

    /// Apply a self-service patch to the principal's own profile.
    ///
    /// # Errors
    /// * `NotFound` - Principal's account no longer exists
    /// * `DatabaseError` - Database operation failed
    async fn update_profile(
        &self,
        principal: &Principal,
        command: UpdateProfileCommand,
    ) -> Result<User, UserError>;

    /// List users (admin only).
    ///
    /// # Errors
    /// * `Forbidden` - Principal is not an admin
    /// * `DatabaseError` - Database operation failed
    async fn list_users(
        &self,
        principal: &Principal,
        pagination: Pagination,
    ) -> Result<Vec<User>, UserError>;

    /// Create a user with a hashed password (admin only).
    ///
    /// # Errors
    /// * `Forbidden` - Principal is not an admin
    /// * `EmployeeNumberAlreadyExists` - Employee number is already taken
    /// * `Password` - Password is empty or could not be hashed
    /// * `DatabaseError` - Database operation failed
    async fn create_user(
        &self,
        principal: &Principal,
        command: CreateUserCommand,
    ) -> Result<User, UserError>;

    /// Apply an admin patch to any user.
    ///
    /// # Errors
    /// * `Forbidden` - Principal is not an admin
    /// * `NotFound` - User does not exist
    /// * `DatabaseError` - Database operation failed
    async fn update_user(
        &self,
        principal: &Principal,
        id: &UserId,
        command: UpdateUserCommand,
    ) -> Result<User, UserError>;

    /// Delete a user and, through the store, all of its works.
    ///
    /// # Errors
    /// * `CannotDeleteSelf` - Admin targeted its own account
    /// * `Forbidden` - Principal is not an admin
    /// * `NotFound` - User does not exist
    /// * `DatabaseError` - Database operation failed
    async fn delete_user(&self, principal: &Principal, id: &UserId) -> Result<(), UserError>;

    /// Create the configured administrator unless an admin already exists.
    ///
    /// # Returns
    /// The created admin, or `None` when one was already present
    ///
    /// # Errors
    /// * `EmployeeNumberAlreadyExists` - A non-admin already holds the number
    /// * `DatabaseError` - Database operation failed
    async fn ensure_admin(&self, admin: BootstrapAdmin) -> Result<Option<User>, UserError>;
}

/// Persistence operations for the user aggregate.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist a new user.
    ///
    /// Uniqueness of the employee number is enforced here atomically.
    ///
    /// # Errors
    /// * `EmployeeNumberAlreadyExists` - Employee number is already taken
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, user: User) -> Result<User, UserError>;

    /// Retrieve user by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;

    /// Retrieve user by employee number.
    async fn find_by_employee_number(
        &self,
        employee_number: &EmployeeNumber,
    ) -> Result<Option<User>, UserError>;

    /// Retrieve a page of users ordered by creation time.
    async fn list(&self, pagination: Pagination) -> Result<Vec<User>, UserError>;

    /// Whether at least one admin account exists.
    async fn admin_exists(&self) -> Result<bool, UserError>;

    /// Replace a stored user.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `DatabaseError` - Database operation failed
    async fn update(&self, user: User) -> Result<User, UserError>;

    /// Remove a user together with every work it owns.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `DatabaseError` - Database operation failed
    async fn delete(&self, id: &UserId) -> Result<(), UserError>;
}

use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use chrono::Utc;

use crate::domain::access::policy::authorize;
use crate::domain::access::policy::can;
use crate::domain::access::policy::Action;
use crate::domain::access::policy::Principal;
use crate::domain::access::policy::Resource;
use crate::domain::pagination::Pagination;
use crate::domain::user::models::BootstrapAdmin;
use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::UpdateProfileCommand;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service implementation for user operations.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    pub fn new(repository: Arc<UR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }

    async fn find_existing(&self, id: &UserId) -> Result<User, UserError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))
    }

    fn check_access(
        principal: &Principal,
        action: Action,
        resource: Resource,
        target: impl ToString,
    ) -> Result<(), UserError> {
        authorize(principal, action, resource).map_err(|denied| {
            tracing::warn!(principal = %principal.id, ?denied, "User operation denied");
            UserError::Forbidden(target.to_string())
        })
    }
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn get_user(&self, principal: &Principal, id: &UserId) -> Result<User, UserError> {
        Self::check_access(principal, Action::Read, Resource::User(*id), id)?;
        self.find_existing(id).await
    }

    async fn update_profile(
        &self,
        principal: &Principal,
        command: UpdateProfileCommand,
    ) -> Result<User, UserError> {
        Self::check_access(
            principal,
            Action::Update,
            Resource::User(principal.id),
            principal.id,
        )?;

        let mut user = self.find_existing(&principal.id).await?;
        command.apply_to(&mut user);

        let updated = self.repository.update(user).await?;
        tracing::info!(user_id = %updated.id, "Profile updated");

        Ok(updated)
    }

    async fn list_users(
        &self,
        principal: &Principal,
        pagination: Pagination,
    ) -> Result<Vec<User>, UserError> {
        Self::check_access(principal, Action::List, Resource::Users, "*")?;
        self.repository.list(pagination).await
    }

    async fn create_user(
        &self,
        principal: &Principal,
        command: CreateUserCommand,
    ) -> Result<User, UserError> {
        Self::check_access(
            principal,
            Action::Create,
            Resource::Users,
            command.employee_number.as_str(),
        )?;

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
            is_admin: command.is_admin,
            is_active: true,
            image_url: command.image_url,
            created_at: Utc::now(),
        };

        let created = self.repository.create(user).await?;
        tracing::info!(
            user_id = %created.id,
            employee_number = %created.employee_number,
            is_admin = created.is_admin,
            created_by = %principal.id,
            "User created by admin"
        );

        Ok(created)
    }

    async fn update_user(
        &self,
        principal: &Principal,
        id: &UserId,
        command: UpdateUserCommand,
    ) -> Result<User, UserError> {
        Self::check_access(principal, Action::Update, Resource::User(*id), id)?;

        if principal.id == *id && command.demotes() {
            tracing::warn!(principal = %principal.id, "Admin attempted to demote own account");
            return Err(UserError::CannotDemoteSelf);
        }

        let mut user = self.find_existing(id).await?;
        command.apply_to(&mut user);

        let updated = self.repository.update(user).await?;
        tracing::info!(user_id = %updated.id, updated_by = %principal.id, "User updated");

        Ok(updated)
    }

    async fn delete_user(&self, principal: &Principal, id: &UserId) -> Result<(), UserError> {
        if !can(principal, Action::Delete, Resource::User(*id)) {
            if principal.is_admin && principal.id == *id {
                return Err(UserError::CannotDeleteSelf);
            }
            return Err(UserError::Forbidden(id.to_string()));
        }

        self.repository.delete(id).await?;
        tracing::info!(user_id = %id, deleted_by = %principal.id, "User deleted");

        Ok(())
    }

    async fn ensure_admin(&self, admin: BootstrapAdmin) -> Result<Option<User>, UserError> {
        if self.repository.admin_exists().await? {
            return Ok(None);
        }

        let password_hash = self.authenticator.hash_password(&admin.password)?;

        let user = User {
            id: UserId::new(),
            employee_number: admin.employee_number,
            first_name: admin.first_name,
            last_name: admin.last_name,
            contact: admin.contact,
            password_hash,
            is_admin: true,
            is_active: true,
            image_url: None,
            created_at: Utc::now(),
        };

        let created = self.repository.create(user).await?;
        tracing::info!(
            user_id = %created.id,
            employee_number = %created.employee_number,
            "Default administrator created"
        );

        Ok(Some(created))
    }
}

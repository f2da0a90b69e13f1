use async_trait::async_trait;

use crate::domain::access::policy::Principal;
use crate::domain::pagination::Pagination;
use crate::domain::user::models::UserId;
use crate::domain::work::models::CreateWorkCommand;
use crate::domain::work::models::UpdateWorkCommand;
use crate::domain::work::models::Work;
use crate::domain::work::models::WorkId;
use crate::domain::work::models::WorkNumber;
use crate::domain::work::models::WorkScope;
use crate::work::errors::WorkError;

/// Port for work domain service operations.
///
/// Single-work operations look the work up first and only then check
/// ownership, so a missing work is `NotFound` and a foreign one `Forbidden`.
#[async_trait]
pub trait WorkServicePort: Send + Sync + 'static {
    /// Create a work owned by the principal, or by `command.owner` for admins.
    ///
    /// # Errors
    /// * `Forbidden` - Non-admin tried to create a work for someone else
    /// * `WorkNumberAlreadyExists` - Work number is already taken
    /// * `OwnerNotFound` - Requested owner does not exist
    /// * `DatabaseError` - Database operation failed
    async fn create_work(
        &self,
        principal: &Principal,
        command: CreateWorkCommand,
    ) -> Result<Work, WorkError>;

    /// List the principal's works, or every work with `WorkScope::All`.
    ///
    /// # Errors
    /// * `Forbidden` - Non-admin requested `WorkScope::All`
    /// * `DatabaseError` - Database operation failed
    async fn list_works(
        &self,
        principal: &Principal,
        scope: WorkScope,
        pagination: Pagination,
    ) -> Result<Vec<Work>, WorkError>;

    /// # Errors
    /// * `NotFound` - Work does not exist
    /// * `Forbidden` - Work exists but belongs to someone else
    async fn get_work(&self, principal: &Principal, id: &WorkId) -> Result<Work, WorkError>;

    /// Merge the present fields of `command` and refresh `updated_at`.
    ///
    /// # Errors
    /// * `NotFound` - Work does not exist
    /// * `Forbidden` - Work exists but belongs to someone else
    /// * `DatabaseError` - Database operation failed
    async fn update_work(
        &self,
        principal: &Principal,
        id: &WorkId,
        command: UpdateWorkCommand,
    ) -> Result<Work, WorkError>;

    /// # Errors
    /// * `NotFound` - Work does not exist
    /// * `Forbidden` - Work exists but belongs to someone else
    /// * `DatabaseError` - Database operation failed
    async fn delete_work(&self, principal: &Principal, id: &WorkId) -> Result<(), WorkError>;
}

/// Persistence operations for the work aggregate.
#[async_trait]
pub trait WorkRepository: Send + Sync + 'static {
    /// Persist a new work.
    ///
    /// # Errors
    /// * `WorkNumberAlreadyExists` - Work number is already taken
    /// * `OwnerNotFound` - `user_id` references no user
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, work: Work) -> Result<Work, WorkError>;

    async fn find_by_id(&self, id: &WorkId) -> Result<Option<Work>, WorkError>;

    async fn find_by_work_number(&self, work_number: &WorkNumber)
        -> Result<Option<Work>, WorkError>;

    /// Retrieve a page of works ordered by creation time, optionally
    /// restricted to one owner.
    async fn list(
        &self,
        owner: Option<UserId>,
        pagination: Pagination,
    ) -> Result<Vec<Work>, WorkError>;

    /// Replace a stored work.
    ///
    /// # Errors
    /// * `NotFound` - Work does not exist
    async fn update(&self, work: Work) -> Result<Work, WorkError>;

    /// # Errors
    /// * `NotFound` - Work does not exist
    async fn delete(&self, id: &WorkId) -> Result<(), WorkError>;
}

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::access::policy::authorize;
use crate::domain::access::policy::Action;
use crate::domain::access::policy::Principal;
use crate::domain::access::policy::Resource;
use crate::domain::pagination::Pagination;
use crate::domain::work::models::CreateWorkCommand;
use crate::domain::work::models::UpdateWorkCommand;
use crate::domain::work::models::Work;
use crate::domain::work::models::WorkId;
use crate::domain::work::models::WorkScope;
use crate::work::errors::WorkError;
use crate::work::ports::WorkRepository;
use crate::work::ports::WorkServicePort;

/// Domain service implementation for work operations.
pub struct WorkService<WR>
where
    WR: WorkRepository,
{
    repository: Arc<WR>,
}

impl<WR> WorkService<WR>
where
    WR: WorkRepository,
{
    pub fn new(repository: Arc<WR>) -> Self {
        Self { repository }
    }

    fn check_access(
        principal: &Principal,
        action: Action,
        resource: Resource,
        target: impl ToString,
    ) -> Result<(), WorkError> {
        authorize(principal, action, resource).map_err(|denied| {
            tracing::warn!(principal = %principal.id, ?denied, "Work operation denied");
            WorkError::Forbidden(target.to_string())
        })
    }

    /// Existence first, ownership second.
    async fn find_accessible(
        &self,
        principal: &Principal,
        action: Action,
        id: &WorkId,
    ) -> Result<Work, WorkError> {
        let work = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(WorkError::NotFound(id.to_string()))?;

        Self::check_access(principal, action, Resource::Work { owner: work.user_id }, id)?;

        Ok(work)
    }
}

#[async_trait]
impl<WR> WorkServicePort for WorkService<WR>
where
    WR: WorkRepository,
{
    async fn create_work(
        &self,
        principal: &Principal,
        command: CreateWorkCommand,
    ) -> Result<Work, WorkError> {
        let owner = command.owner.unwrap_or(principal.id);
        Self::check_access(
            principal,
            Action::Create,
            Resource::Work { owner },
            &command.work_number,
        )?;

        if self
            .repository
            .find_by_work_number(&command.work_number)
            .await?
            .is_some()
        {
            return Err(WorkError::WorkNumberAlreadyExists(
                command.work_number.to_string(),
            ));
        }

        let now = Utc::now();
        let work = Work {
            id: WorkId::new(),
            work_number: command.work_number,
            title: command.title,
            description: command.description,
            status: command.status.unwrap_or_default(),
            user_id: owner,
            created_at: now,
            updated_at: now,
        };

        let created = self.repository.create(work).await?;
        tracing::info!(
            work_id = %created.id,
            work_number = %created.work_number,
            owner = %created.user_id,
            "Work created"
        );

        Ok(created)
    }

    async fn list_works(
        &self,
        principal: &Principal,
        scope: WorkScope,
        pagination: Pagination,
    ) -> Result<Vec<Work>, WorkError> {
        match scope {
            WorkScope::Owned => self.repository.list(Some(principal.id), pagination).await,
            WorkScope::All => {
                Self::check_access(principal, Action::List, Resource::Works, "*")?;
                self.repository.list(None, pagination).await
            }
        }
    }

    async fn get_work(&self, principal: &Principal, id: &WorkId) -> Result<Work, WorkError> {
        self.find_accessible(principal, Action::Read, id).await
    }

    async fn update_work(
        &self,
        principal: &Principal,
        id: &WorkId,
        command: UpdateWorkCommand,
    ) -> Result<Work, WorkError> {
        let mut work = self.find_accessible(principal, Action::Update, id).await?;
        command.apply_to(&mut work, Utc::now());

        let updated = self.repository.update(work).await?;
        tracing::info!(work_id = %updated.id, "Work updated");

        Ok(updated)
    }

    async fn delete_work(&self, principal: &Principal, id: &WorkId) -> Result<(), WorkError> {
        self.find_accessible(principal, Action::Delete, id).await?;
        self.repository.delete(id).await?;
        tracing::info!(work_id = %id, "Work deleted");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use mockall::mock;
    use mockall::predicate::eq;

    use super::*;
    use crate::domain::user::models::UserId;
    use crate::domain::work::models::WorkNumber;
    use crate::domain::work::models::WorkStatus;
    use crate::domain::work::models::WorkTitle;

    mock! {
        pub TestWorkRepository {}

        #[async_trait]
        impl WorkRepository for TestWorkRepository {
            async fn create(&self, work: Work) -> Result<Work, WorkError>;
            async fn find_by_id(&self, id: &WorkId) -> Result<Option<Work>, WorkError>;
            async fn find_by_work_number(&self, work_number: &WorkNumber) -> Result<Option<Work>, WorkError>;
            async fn list(&self, owner: Option<UserId>, pagination: Pagination) -> Result<Vec<Work>, WorkError>;
            async fn update(&self, work: Work) -> Result<Work, WorkError>;
            async fn delete(&self, id: &WorkId) -> Result<(), WorkError>;
        }
    }

    fn principal(is_admin: bool) -> Principal {
        Principal {
            id: UserId::new(),
            is_admin,
        }
    }

    fn work_owned_by(owner: UserId) -> Work {
        let created = Utc::now() - chrono::Duration::hours(1);
        Work {
            id: WorkId::new(),
            work_number: WorkNumber::new("W1".to_string()).unwrap(),
            title: WorkTitle::new("Survey".to_string()).unwrap(),
            description: None,
            status: WorkStatus::default(),
            user_id: owner,
            created_at: created,
            updated_at: created,
        }
    }

    fn create_command(owner: Option<UserId>) -> CreateWorkCommand {
        CreateWorkCommand {
            work_number: WorkNumber::new("W1".to_string()).unwrap(),
            title: WorkTitle::new("Survey".to_string()).unwrap(),
            description: Some("North wing".to_string()),
            status: None,
            owner,
        }
    }

    #[tokio::test]
    async fn test_create_work_owned_by_principal() {
        let user = principal(false);
        let mut repository = MockTestWorkRepository::new();
        repository
            .expect_find_by_work_number()
            .times(1)
            .returning(|_| Ok(None));
        repository
            .expect_create()
            .withf(move |work| {
                work.user_id == user.id
                    && work.status.as_str() == "active"
                    && work.created_at == work.updated_at
            })
            .times(1)
            .returning(|work| Ok(work));

        let service = WorkService::new(Arc::new(repository));
        let work = service.create_work(&user, create_command(None)).await.unwrap();

        assert_eq!(work.user_id, user.id);
        assert_eq!(work.description.as_deref(), Some("North wing"));
    }

    #[tokio::test]
    async fn test_create_work_duplicate_number() {
        let user = principal(false);
        let other = UserId::new();
        let mut repository = MockTestWorkRepository::new();
        repository
            .expect_find_by_work_number()
            .returning(move |_| Ok(Some(work_owned_by(other))));
        repository.expect_create().times(0);

        let service = WorkService::new(Arc::new(repository));
        let result = service.create_work(&user, create_command(None)).await;

        assert!(matches!(result, Err(WorkError::WorkNumberAlreadyExists(_))));
    }

    #[tokio::test]
    async fn test_regular_user_cannot_create_for_someone_else() {
        let user = principal(false);
        let mut repository = MockTestWorkRepository::new();
        repository.expect_find_by_work_number().times(0);
        repository.expect_create().times(0);

        let service = WorkService::new(Arc::new(repository));
        let result = service
            .create_work(&user, create_command(Some(UserId::new())))
            .await;

        assert!(matches!(result, Err(WorkError::Forbidden(_))));
    }

    #[tokio::test]
    async fn test_admin_creates_work_for_another_owner() {
        let admin = principal(true);
        let owner = UserId::new();
        let mut repository = MockTestWorkRepository::new();
        repository
            .expect_find_by_work_number()
            .returning(|_| Ok(None));
        repository
            .expect_create()
            .withf(move |work| work.user_id == owner)
            .returning(|work| Ok(work));

        let service = WorkService::new(Arc::new(repository));
        let work = service
            .create_work(&admin, create_command(Some(owner)))
            .await
            .unwrap();

        assert_eq!(work.user_id, owner);
    }

    #[tokio::test]
    async fn test_get_work_distinguishes_missing_from_foreign() {
        let user = principal(false);
        let foreign = work_owned_by(UserId::new());
        let foreign_id = foreign.id;

        let mut repository = MockTestWorkRepository::new();
        repository
            .expect_find_by_id()
            .returning(move |id| Ok((*id == foreign_id).then(|| foreign.clone())));

        let service = WorkService::new(Arc::new(repository));

        assert!(matches!(
            service.get_work(&user, &foreign_id).await,
            Err(WorkError::Forbidden(_))
        ));
        assert!(matches!(
            service.get_work(&user, &WorkId::new()).await,
            Err(WorkError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_admin_reads_any_work() {
        let admin = principal(true);
        let work = work_owned_by(UserId::new());
        let id = work.id;

        let mut repository = MockTestWorkRepository::new();
        repository
            .expect_find_by_id()
            .returning(move |_| Ok(Some(work.clone())));

        let service = WorkService::new(Arc::new(repository));
        assert_eq!(service.get_work(&admin, &id).await.unwrap().id, id);
    }

    #[tokio::test]
    async fn test_update_work_refreshes_updated_at() {
        let user = principal(false);
        let work = work_owned_by(user.id);
        let id = work.id;
        let created_at = work.created_at;

        let mut repository = MockTestWorkRepository::new();
        repository
            .expect_find_by_id()
            .returning(move |_| Ok(Some(work.clone())));
        repository
            .expect_update()
            .withf(move |work| {
                work.title.as_str() == "Renamed"
                    && work.created_at == created_at
                    && work.updated_at > created_at
            })
            .times(1)
            .returning(|work| Ok(work));

        let service = WorkService::new(Arc::new(repository));
        let command = UpdateWorkCommand {
            title: Some(WorkTitle::new("Renamed".to_string()).unwrap()),
            ..Default::default()
        };

        let updated = service.update_work(&user, &id, command).await.unwrap();
        assert_eq!(updated.work_number.as_str(), "W1");
    }

    #[tokio::test]
    async fn test_update_foreign_work_is_forbidden() {
        let user = principal(false);
        let work = work_owned_by(UserId::new());
        let id = work.id;

        let mut repository = MockTestWorkRepository::new();
        repository
            .expect_find_by_id()
            .returning(move |_| Ok(Some(work.clone())));
        repository.expect_update().times(0);

        let service = WorkService::new(Arc::new(repository));
        let result = service
            .update_work(&user, &id, UpdateWorkCommand::default())
            .await;

        assert!(matches!(result, Err(WorkError::Forbidden(_))));
    }

    #[tokio::test]
    async fn test_delete_own_work() {
        let user = principal(false);
        let work = work_owned_by(user.id);
        let id = work.id;

        let mut repository = MockTestWorkRepository::new();
        repository
            .expect_find_by_id()
            .returning(move |_| Ok(Some(work.clone())));
        repository
            .expect_delete()
            .with(eq(id))
            .times(1)
            .returning(|_| Ok(()));

        let service = WorkService::new(Arc::new(repository));
        assert!(service.delete_work(&user, &id).await.is_ok());
    }

    #[tokio::test]
    async fn test_delete_missing_work() {
        let admin = principal(true);
        let mut repository = MockTestWorkRepository::new();
        repository.expect_find_by_id().returning(|_| Ok(None));
        repository.expect_delete().times(0);

        let service = WorkService::new(Arc::new(repository));
        let result = service.delete_work(&admin, &WorkId::new()).await;

        assert!(matches!(result, Err(WorkError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_list_scopes() {
        let user = principal(false);
        let admin = principal(true);
        let user_id = user.id;

        let mut repository = MockTestWorkRepository::new();
        repository
            .expect_list()
            .withf(move |owner, _| *owner == Some(user_id))
            .times(1)
            .returning(|_, _| Ok(vec![]));
        repository
            .expect_list()
            .withf(|owner, _| owner.is_none())
            .times(1)
            .returning(|_, _| Ok(vec![]));

        let service = WorkService::new(Arc::new(repository));

        assert!(service
            .list_works(&user, WorkScope::Owned, Pagination::default())
            .await
            .is_ok());
        assert!(matches!(
            service
                .list_works(&user, WorkScope::All, Pagination::default())
                .await,
            Err(WorkError::Forbidden(_))
        ));
        assert!(service
            .list_works(&admin, WorkScope::All, Pagination::default())
            .await
            .is_ok());
    }
}

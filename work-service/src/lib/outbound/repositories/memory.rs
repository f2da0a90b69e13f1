//! Process-local store used when no database is configured, and by the
//! integration tests.
//!
//! Users and works sit behind a single lock so uniqueness checks, inserts and
//! cascading deletes are atomic with respect to each other.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::pagination::Pagination;
use crate::domain::user::models::EmployeeNumber;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;
use crate::domain::work::models::Work;
use crate::domain::work::models::WorkId;
use crate::domain::work::models::WorkNumber;
use crate::domain::work::ports::WorkRepository;
use crate::user::errors::UserError;
use crate::work::errors::WorkError;

#[derive(Default)]
struct Tables {
    users: HashMap<UserId, User>,
    works: HashMap<WorkId, Work>,
}

/// In-memory implementation of both repositories. Cloning shares the data.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn page<T, K>(mut items: Vec<T>, key: impl Fn(&T) -> K, pagination: Pagination) -> Vec<T>
where
    K: Ord,
{
    items.sort_by_key(key);
    items
        .into_iter()
        .skip(pagination.skip as usize)
        .take(pagination.limit as usize)
        .collect()
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn create(&self, user: User) -> Result<User, UserError> {
        let mut tables = self.tables.write().await;

        if tables
            .users
            .values()
            .any(|u| u.employee_number == user.employee_number)
        {
            return Err(UserError::EmployeeNumberAlreadyExists(
                user.employee_number.to_string(),
            ));
        }

        tables.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        Ok(self.tables.read().await.users.get(id).cloned())
    }

    async fn find_by_employee_number(
        &self,
        employee_number: &EmployeeNumber,
    ) -> Result<Option<User>, UserError> {
        Ok(self
            .tables
            .read()
            .await
            .users
            .values()
            .find(|u| &u.employee_number == employee_number)
            .cloned())
    }

    async fn list(&self, pagination: Pagination) -> Result<Vec<User>, UserError> {
        let users = self.tables.read().await.users.values().cloned().collect();
        Ok(page(users, |u| (u.created_at, u.id.0), pagination))
    }

    async fn admin_exists(&self) -> Result<bool, UserError> {
        Ok(self.tables.read().await.users.values().any(|u| u.is_admin))
    }

    async fn update(&self, user: User) -> Result<User, UserError> {
        let mut tables = self.tables.write().await;

        match tables.users.get_mut(&user.id) {
            Some(stored) => {
                *stored = user.clone();
                Ok(user)
            }
            None => Err(UserError::NotFound(user.id.to_string())),
        }
    }

    async fn delete(&self, id: &UserId) -> Result<(), UserError> {
        let mut tables = self.tables.write().await;

        if tables.users.remove(id).is_none() {
            return Err(UserError::NotFound(id.to_string()));
        }
        tables.works.retain(|_, work| work.user_id != *id);

        Ok(())
    }
}

#[async_trait]
impl WorkRepository for InMemoryStore {
    async fn create(&self, work: Work) -> Result<Work, WorkError> {
        let mut tables = self.tables.write().await;

        if !tables.users.contains_key(&work.user_id) {
            return Err(WorkError::OwnerNotFound(work.user_id.to_string()));
        }
        if tables
            .works
            .values()
            .any(|w| w.work_number == work.work_number)
        {
            return Err(WorkError::WorkNumberAlreadyExists(
                work.work_number.to_string(),
            ));
        }

        tables.works.insert(work.id, work.clone());
        Ok(work)
    }

    async fn find_by_id(&self, id: &WorkId) -> Result<Option<Work>, WorkError> {
        Ok(self.tables.read().await.works.get(id).cloned())
    }

    async fn find_by_work_number(
        &self,
        work_number: &WorkNumber,
    ) -> Result<Option<Work>, WorkError> {
        Ok(self
            .tables
            .read()
            .await
            .works
            .values()
            .find(|w| &w.work_number == work_number)
            .cloned())
    }

    async fn list(
        &self,
        owner: Option<UserId>,
        pagination: Pagination,
    ) -> Result<Vec<Work>, WorkError> {
        let works = self
            .tables
            .read()
            .await
            .works
            .values()
            .filter(|w| owner.map_or(true, |owner| w.user_id == owner))
            .cloned()
            .collect();

        Ok(page(works, |w| (w.created_at, w.id.0), pagination))
    }

    async fn update(&self, work: Work) -> Result<Work, WorkError> {
        let mut tables = self.tables.write().await;

        match tables.works.get_mut(&work.id) {
            Some(stored) => {
                *stored = work.clone();
                Ok(work)
            }
            None => Err(WorkError::NotFound(work.id.to_string())),
        }
    }

    async fn delete(&self, id: &WorkId) -> Result<(), WorkError> {
        match self.tables.write().await.works.remove(id) {
            Some(_) => Ok(()),
            None => Err(WorkError::NotFound(id.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use chrono::Utc;

    use super::*;
    use crate::domain::user::models::Contact;
    use crate::domain::user::models::PersonName;
    use crate::domain::work::models::WorkStatus;
    use crate::domain::work::models::WorkTitle;

    fn user(employee_number: &str) -> User {
        User {
            id: UserId::new(),
            employee_number: EmployeeNumber::new(employee_number.to_string()).unwrap(),
            first_name: PersonName::new("Ada".to_string()).unwrap(),
            last_name: PersonName::new("Lovelace".to_string()).unwrap(),
            contact: Contact::new("+15551234567".to_string()).unwrap(),
            password_hash: "hash".to_string(),
            is_admin: false,
            is_active: true,
            image_url: None,
            created_at: Utc::now(),
        }
    }

    fn work(work_number: &str, owner: UserId) -> Work {
        let now = Utc::now();
        Work {
            id: WorkId::new(),
            work_number: WorkNumber::new(work_number.to_string()).unwrap(),
            title: WorkTitle::new("Survey".to_string()).unwrap(),
            description: None,
            status: WorkStatus::default(),
            user_id: owner,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_concurrent_user_creates_yield_one_winner() {
        let store = InMemoryStore::new();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = store.clone();
                tokio::spawn(async move { UserRepository::create(&store, user("E1")).await })
            })
            .collect();

        let mut successes = 0;
        let mut conflicts = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => successes += 1,
                Err(UserError::EmployeeNumberAlreadyExists(_)) => conflicts += 1,
                Err(e) => panic!("unexpected error: {e}"),
            }
        }

        assert_eq!(successes, 1);
        assert_eq!(conflicts, 7);
    }

    #[tokio::test]
    async fn test_concurrent_work_creates_yield_one_winner() {
        let store = InMemoryStore::new();
        let a = UserRepository::create(&store, user("A")).await.unwrap();
        let b = UserRepository::create(&store, user("B")).await.unwrap();

        let first = WorkRepository::create(&store, work("W1", a.id));
        let second = WorkRepository::create(&store, work("W1", b.id));
        let (first, second) = tokio::join!(first, second);

        assert!(first.is_ok() ^ second.is_ok());
        assert!(matches!(
            first.err().or(second.err()),
            Some(WorkError::WorkNumberAlreadyExists(_))
        ));
    }

    #[tokio::test]
    async fn test_work_requires_existing_owner() {
        let store = InMemoryStore::new();

        let result = WorkRepository::create(&store, work("W1", UserId::new())).await;
        assert!(matches!(result, Err(WorkError::OwnerNotFound(_))));
    }

    #[tokio::test]
    async fn test_deleting_user_cascades_to_works() {
        let store = InMemoryStore::new();
        let a = UserRepository::create(&store, user("A")).await.unwrap();
        let b = UserRepository::create(&store, user("B")).await.unwrap();

        let a_work = WorkRepository::create(&store, work("W1", a.id)).await.unwrap();
        WorkRepository::create(&store, work("W2", a.id)).await.unwrap();
        let b_work = WorkRepository::create(&store, work("W3", b.id)).await.unwrap();

        UserRepository::delete(&store, &a.id).await.unwrap();

        assert!(WorkRepository::find_by_id(&store, &a_work.id)
            .await
            .unwrap()
            .is_none());
        assert!(WorkRepository::find_by_id(&store, &b_work.id)
            .await
            .unwrap()
            .is_some());
        assert_eq!(
            WorkRepository::list(&store, None, Pagination::default())
                .await
                .unwrap()
                .len(),
            1
        );
    }

    #[tokio::test]
    async fn test_list_filters_by_owner_and_paginates() {
        let store = InMemoryStore::new();
        let a = UserRepository::create(&store, user("A")).await.unwrap();
        let b = UserRepository::create(&store, user("B")).await.unwrap();

        let base = Utc::now();
        for i in 0..5 {
            let mut w = work(&format!("A{i}"), a.id);
            w.created_at = base + Duration::seconds(i);
            WorkRepository::create(&store, w).await.unwrap();
        }
        WorkRepository::create(&store, work("B0", b.id)).await.unwrap();

        let owned = WorkRepository::list(&store, Some(a.id), Pagination::new(Some(1), Some(2)))
            .await
            .unwrap();
        let numbers: Vec<_> = owned.iter().map(|w| w.work_number.as_str()).collect();
        assert_eq!(numbers, vec!["A1", "A2"]);

        let all = WorkRepository::list(&store, None, Pagination::default())
            .await
            .unwrap();
        assert_eq!(all.len(), 6);
    }

    #[tokio::test]
    async fn test_admin_exists() {
        let store = InMemoryStore::new();
        assert!(!store.admin_exists().await.unwrap());

        let mut admin = user("00admin");
        admin.is_admin = true;
        UserRepository::create(&store, admin).await.unwrap();

        assert!(store.admin_exists().await.unwrap());
    }

    #[tokio::test]
    async fn test_update_and_delete_missing_records() {
        let store = InMemoryStore::new();

        assert!(matches!(
            UserRepository::update(&store, user("ghost")).await,
            Err(UserError::NotFound(_))
        ));
        assert!(matches!(
            WorkRepository::delete(&store, &WorkId::new()).await,
            Err(WorkError::NotFound(_))
        ));
    }
}

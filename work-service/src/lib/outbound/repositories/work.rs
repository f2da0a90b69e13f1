use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::pagination::Pagination;
use crate::domain::user::models::UserId;
use crate::domain::work::models::Work;
use crate::domain::work::models::WorkId;
use crate::domain::work::models::WorkNumber;
use crate::domain::work::models::WorkStatus;
use crate::domain::work::models::WorkTitle;
use crate::domain::work::ports::WorkRepository;
use crate::work::errors::WorkError;

const SELECT_WORK: &str = r#"
    SELECT id, work_number, title, description, status, user_id, created_at, updated_at
    FROM works
"#;

#[derive(sqlx::FromRow)]
struct WorkRow {
    id: Uuid,
    work_number: String,
    title: String,
    description: Option<String>,
    status: String,
    user_id: Uuid,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<WorkRow> for Work {
    type Error = WorkError;

    fn try_from(r: WorkRow) -> Result<Self, Self::Error> {
        Ok(Work {
            id: WorkId(r.id),
            work_number: WorkNumber::new(r.work_number)?,
            title: WorkTitle::new(r.title)?,
            description: r.description,
            status: WorkStatus::new(r.status)?,
            user_id: UserId(r.user_id),
            created_at: r.created_at,
            updated_at: r.updated_at,
        })
    }
}

pub struct PostgresWorkRepository {
    pool: PgPool,
}

impl PostgresWorkRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl WorkRepository for PostgresWorkRepository {
    async fn create(&self, work: Work) -> Result<Work, WorkError> {
        sqlx::query(
            r#"
            INSERT INTO works (id, work_number, title, description, status, user_id,
                               created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(work.id.0)
        .bind(work.work_number.as_str())
        .bind(work.title.as_str())
        .bind(&work.description)
        .bind(work.status.as_str())
        .bind(work.user_id.0)
        .bind(work.created_at)
        .bind(work.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation()
                    && db_err.constraint() == Some("works_work_number_key")
                {
                    return WorkError::WorkNumberAlreadyExists(work.work_number.to_string());
                }
                if db_err.is_foreign_key_violation() {
                    return WorkError::OwnerNotFound(work.user_id.to_string());
                }
            }
            tracing::error!(error = %e, "Failed to insert work");
            WorkError::DatabaseError(e.to_string())
        })?;

        Ok(work)
    }

    async fn find_by_id(&self, id: &WorkId) -> Result<Option<Work>, WorkError> {
        let row: Option<WorkRow> = sqlx::query_as(&format!("{SELECT_WORK} WHERE id = $1"))
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| WorkError::DatabaseError(e.to_string()))?;

        row.map(Work::try_from).transpose()
    }

    async fn find_by_work_number(
        &self,
        work_number: &WorkNumber,
    ) -> Result<Option<Work>, WorkError> {
        let row: Option<WorkRow> =
            sqlx::query_as(&format!("{SELECT_WORK} WHERE work_number = $1"))
                .bind(work_number.as_str())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| WorkError::DatabaseError(e.to_string()))?;

        row.map(Work::try_from).transpose()
    }

    async fn list(
        &self,
        owner: Option<UserId>,
        pagination: Pagination,
    ) -> Result<Vec<Work>, WorkError> {
        let rows: Vec<WorkRow> = sqlx::query_as(&format!(
            "{SELECT_WORK} WHERE ($1::uuid IS NULL OR user_id = $1) \
             ORDER BY created_at, id OFFSET $2 LIMIT $3"
        ))
        .bind(owner.map(|id| id.0))
        .bind(i64::from(pagination.skip))
        .bind(i64::from(pagination.limit))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| WorkError::DatabaseError(e.to_string()))?;

        rows.into_iter().map(Work::try_from).collect()
    }

    async fn update(&self, work: Work) -> Result<Work, WorkError> {
        let result = sqlx::query(
            r#"
            UPDATE works
            SET title = $2, description = $3, status = $4, updated_at = $5
            WHERE id = $1
            "#,
        )
        .bind(work.id.0)
        .bind(work.title.as_str())
        .bind(&work.description)
        .bind(work.status.as_str())
        .bind(work.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| WorkError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(WorkError::NotFound(work.id.to_string()));
        }

        Ok(work)
    }

    async fn delete(&self, id: &WorkId) -> Result<(), WorkError> {
        let result = sqlx::query("DELETE FROM works WHERE id = $1")
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(|e| WorkError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(WorkError::NotFound(id.to_string()));
        }

        Ok(())
    }
}

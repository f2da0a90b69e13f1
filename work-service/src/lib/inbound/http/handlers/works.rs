use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use crate::domain::user::models::UserId;
use crate::domain::work::models::CreateWorkCommand;
use crate::domain::work::models::UpdateWorkCommand;
use crate::domain::work::models::Work;
use crate::domain::work::models::WorkId;
use crate::domain::work::models::WorkNumber;
use crate::domain::work::models::WorkStatus;
use crate::domain::work::models::WorkTitle;
use crate::work::errors::WorkError;

pub mod create_work;
pub mod delete_work;
pub mod get_work;
pub mod list_works;
pub mod update_work;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkResponse {
    pub id: String,
    pub work_number: String,
    pub title: String,
    pub description: Option<String>,
    pub status: String,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Work> for WorkResponse {
    fn from(work: &Work) -> Self {
        Self {
            id: work.id.to_string(),
            work_number: work.work_number.as_str().to_string(),
            title: work.title.as_str().to_string(),
            description: work.description.clone(),
            status: work.status.as_str().to_string(),
            user_id: work.user_id.to_string(),
            created_at: work.created_at,
            updated_at: work.updated_at,
        }
    }
}

/// HTTP request body for creating a work (raw JSON)
///
/// `user_id` is only read on the admin surface.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateWorkRequest {
    work_number: String,
    title: String,
    description: Option<String>,
    status: Option<String>,
    user_id: Option<String>,
}

impl CreateWorkRequest {
    fn try_into_command(self, accept_owner: bool) -> Result<CreateWorkCommand, WorkError> {
        let owner = match self.user_id.filter(|_| accept_owner) {
            Some(id) => Some(parse_owner(&id)?),
            None => None,
        };

        Ok(CreateWorkCommand {
            work_number: WorkNumber::new(self.work_number)?,
            title: WorkTitle::new(self.title)?,
            description: self.description,
            status: self.status.map(WorkStatus::new).transpose()?,
            owner,
        })
    }
}

/// Partial update. `work_number` and `user_id` are ignored if sent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateWorkRequest {
    title: Option<String>,
    description: Option<String>,
    status: Option<String>,
}

impl UpdateWorkRequest {
    fn try_into_command(self) -> Result<UpdateWorkCommand, WorkError> {
        Ok(UpdateWorkCommand {
            title: self.title.map(WorkTitle::new).transpose()?,
            description: self.description,
            status: self.status.map(WorkStatus::new).transpose()?,
        })
    }
}

fn parse_work_id(id: &str) -> Result<WorkId, WorkError> {
    WorkId::from_string(id).map_err(WorkError::from)
}

fn parse_owner(id: &str) -> Result<UserId, WorkError> {
    UserId::from_string(id).map_err(|_| WorkError::OwnerNotFound(id.to_string()))
}

use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::user::models::UserId;
use crate::work::errors::WorkIdError;
use crate::work::errors::WorkNumberError;
use crate::work::errors::WorkStatusError;
use crate::work::errors::WorkTitleError;

/// Work record aggregate.
///
/// `work_number` and `user_id` are fixed at creation; `updated_at` moves on
/// every successful mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Work {
    pub id: WorkId,
    pub work_number: WorkNumber,
    pub title: WorkTitle,
    pub description: Option<String>,
    pub status: WorkStatus,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Work unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WorkId(pub Uuid);

impl WorkId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a work ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, WorkIdError> {
        Uuid::parse_str(s)
            .map(WorkId)
            .map_err(|e| WorkIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for WorkId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for WorkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Business key of a work, unique across the whole store.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WorkNumber(String);

impl WorkNumber {
    const MAX_LENGTH: usize = 50;

    /// # Errors
    /// * `Empty` - Blank input
    /// * `TooLong` - Longer than 50 characters
    pub fn new(work_number: String) -> Result<Self, WorkNumberError> {
        let trimmed = work_number.trim();

        if trimmed.is_empty() {
            return Err(WorkNumberError::Empty);
        }

        let length = trimmed.chars().count();
        if length > Self::MAX_LENGTH {
            return Err(WorkNumberError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            });
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WorkNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkTitle(String);

impl WorkTitle {
    const MAX_LENGTH: usize = 200;

    pub fn new(title: String) -> Result<Self, WorkTitleError> {
        let trimmed = title.trim();

        if trimmed.is_empty() {
            return Err(WorkTitleError::Empty);
        }

        let length = trimmed.chars().count();
        if length > Self::MAX_LENGTH {
            return Err(WorkTitleError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            });
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Free-form lifecycle label of a work. New works start as `"active"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkStatus(String);

impl WorkStatus {
    const MAX_LENGTH: usize = 50;
    pub const ACTIVE: &'static str = "active";

    pub fn new(status: String) -> Result<Self, WorkStatusError> {
        let trimmed = status.trim();

        if trimmed.is_empty() {
            return Err(WorkStatusError::Empty);
        }

        let length = trimmed.chars().count();
        if length > Self::MAX_LENGTH {
            return Err(WorkStatusError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            });
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for WorkStatus {
    fn default() -> Self {
        Self(Self::ACTIVE.to_string())
    }
}

/// Command to create a work.
///
/// `owner` is only honoured for admins; regular principals always own what
/// they create.
#[derive(Debug, Clone)]
pub struct CreateWorkCommand {
    pub work_number: WorkNumber,
    pub title: WorkTitle,
    pub description: Option<String>,
    pub status: Option<WorkStatus>,
    pub owner: Option<UserId>,
}

/// Partial update of a work. Number and owner are not patchable.
#[derive(Debug, Clone, Default)]
pub struct UpdateWorkCommand {
    pub title: Option<WorkTitle>,
    pub description: Option<String>,
    pub status: Option<WorkStatus>,
}

impl UpdateWorkCommand {
    /// Merge present fields into `work` and stamp `updated_at`.
    pub fn apply_to(self, work: &mut Work, now: DateTime<Utc>) {
        if let Some(title) = self.title {
            work.title = title;
        }
        if let Some(description) = self.description {
            work.description = Some(description);
        }
        if let Some(status) = self.status {
            work.status = status;
        }
        work.updated_at = now;
    }
}

/// Which works a listing covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkScope {
    /// Works owned by the principal.
    Owned,
    /// Every work in the store (admin only).
    All,
}

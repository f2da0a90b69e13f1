use thiserror::Error;

/// Error for WorkId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WorkIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error for WorkNumber validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WorkNumberError {
    #[error("Work number is empty")]
    Empty,

    #[error("Work number too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Error for WorkTitle validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WorkTitleError {
    #[error("Title is empty")]
    Empty,

    #[error("Title too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Error for WorkStatus validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WorkStatusError {
    #[error("Status is empty")]
    Empty,

    #[error("Status too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Top-level error for all work-related operations
#[derive(Debug, Clone, Error)]
pub enum WorkError {
    #[error("Invalid work ID: {0}")]
    InvalidWorkId(#[from] WorkIdError),

    #[error("Invalid work number: {0}")]
    InvalidWorkNumber(#[from] WorkNumberError),

    #[error("Invalid title: {0}")]
    InvalidTitle(#[from] WorkTitleError),

    #[error("Invalid status: {0}")]
    InvalidStatus(#[from] WorkStatusError),

    #[error("Work not found: {0}")]
    NotFound(String),

    #[error("Not authorized to access work {0}")]
    Forbidden(String),

    #[error("Work number already registered: {0}")]
    WorkNumberAlreadyExists(String),

    #[error("Owner does not exist: {0}")]
    OwnerNotFound(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl WorkError {
    /// Request field a validation error refers to, if any.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            WorkError::InvalidWorkId(_) => Some("id"),
            WorkError::InvalidWorkNumber(_) => Some("work_number"),
            WorkError::InvalidTitle(_) => Some("title"),
            WorkError::InvalidStatus(_) => Some("status"),
            WorkError::OwnerNotFound(_) => Some("user_id"),
            _ => None,
        }
    }
}

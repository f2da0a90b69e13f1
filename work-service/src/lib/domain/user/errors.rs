use auth::PasswordError;
use thiserror::Error;

/// Error for UserId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error for EmployeeNumber validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmployeeNumberError {
    #[error("Employee number is empty")]
    Empty,

    #[error("Employee number too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },

    #[error("Employee number must not contain whitespace")]
    ContainsWhitespace,
}

/// Error for first/last name validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NameError {
    #[error("Name is empty")]
    Empty,

    #[error("Name too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Error for Contact validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ContactError {
    #[error("Contact must be a valid email address or phone number, got '{0}'")]
    InvalidFormat(String),
}

/// Top-level error for all user-related operations
#[derive(Debug, Clone, Error)]
pub enum UserError {
    // Value object validation errors (automatically converted via #[from])
    #[error("Invalid user ID: {0}")]
    InvalidUserId(#[from] UserIdError),

    #[error("Invalid employee number: {0}")]
    InvalidEmployeeNumber(#[from] EmployeeNumberError),

    #[error("Invalid first name: {0}")]
    InvalidFirstName(NameError),

    #[error("Invalid last name: {0}")]
    InvalidLastName(NameError),

    #[error("Invalid contact: {0}")]
    InvalidContact(#[from] ContactError),

    #[error("Invalid password: {0}")]
    Password(#[from] PasswordError),

    // Domain-level errors
    #[error("User not found: {0}")]
    NotFound(String),

    #[error("Employee number already registered: {0}")]
    EmployeeNumberAlreadyExists(String),

    #[error("Not authorized to perform this operation on user {0}")]
    Forbidden(String),

    #[error("Administrators cannot delete their own account")]
    CannotDeleteSelf,

    #[error("Administrators cannot revoke their own admin rights or deactivate themselves")]
    CannotDemoteSelf,

    // Infrastructure errors
    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl UserError {
    /// Request field a validation error refers to, if any.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            UserError::InvalidUserId(_) => Some("id"),
            UserError::InvalidEmployeeNumber(_) => Some("employee_number"),
            UserError::InvalidFirstName(_) => Some("first_name"),
            UserError::InvalidLastName(_) => Some("last_name"),
            UserError::InvalidContact(_) => Some("contact"),
            UserError::Password(_) => Some("password"),
            _ => None,
        }
    }
}

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use crate::domain::user::models::Contact;
use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::EmployeeNumber;
use crate::domain::user::models::PersonName;
use crate::domain::user::models::UpdateProfileCommand;
use crate::domain::user::models::User;
use crate::user::errors::UserError;

pub mod create_user;
pub mod delete_user;
pub mod get_me;
pub mod get_user;
pub mod list_users;
pub mod update_me;
pub mod update_user;

/// Public view of a user. Never carries the password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub employee_number: String,
    pub first_name: String,
    pub last_name: String,
    pub contact: String,
    pub image_url: Option<String>,
    pub is_admin: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            employee_number: user.employee_number.as_str().to_string(),
            first_name: user.first_name.as_str().to_string(),
            last_name: user.last_name.as_str().to_string(),
            contact: user.contact.as_str().to_string(),
            image_url: user.image_url.clone(),
            is_admin: user.is_admin,
            is_active: user.is_active,
            created_at: user.created_at,
        }
    }
}

/// HTTP request body for registration and admin user creation (raw JSON)
#[derive(Debug, Clone, Deserialize)]
pub struct NewUserRequest {
    employee_number: String,
    first_name: String,
    last_name: String,
    contact: String,
    password: String,
    image_url: Option<String>,
    #[serde(default)]
    is_admin: bool,
}

impl NewUserRequest {
    pub(crate) fn try_into_command(self) -> Result<CreateUserCommand, UserError> {
        Ok(CreateUserCommand {
            employee_number: EmployeeNumber::new(self.employee_number)?,
            first_name: PersonName::new(self.first_name).map_err(UserError::InvalidFirstName)?,
            last_name: PersonName::new(self.last_name).map_err(UserError::InvalidLastName)?,
            contact: Contact::new(self.contact)?,
            image_url: self.image_url,
            password: self.password,
            is_admin: self.is_admin,
        })
    }
}

/// Profile fields any user may change on itself. Unknown fields, such as
/// `password` or `is_admin`, are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProfileRequest {
    first_name: Option<String>,
    last_name: Option<String>,
    contact: Option<String>,
    image_url: Option<String>,
}

impl UpdateProfileRequest {
    fn try_into_command(self) -> Result<UpdateProfileCommand, UserError> {
        Ok(UpdateProfileCommand {
            first_name: self
                .first_name
                .map(PersonName::new)
                .transpose()
                .map_err(UserError::InvalidFirstName)?,
            last_name: self
                .last_name
                .map(PersonName::new)
                .transpose()
                .map_err(UserError::InvalidLastName)?,
            contact: self.contact.map(Contact::new).transpose()?,
            image_url: self.image_url,
        })
    }
}

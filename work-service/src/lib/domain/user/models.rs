use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::user::errors::ContactError;
use crate::user::errors::EmployeeNumberError;
use crate::user::errors::NameError;
use crate::user::errors::UserIdError;

/// User aggregate entity.
///
/// `password_hash` never leaves the service; inbound adapters map users to
/// public views without it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub employee_number: EmployeeNumber,
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub contact: Contact,
    pub password_hash: String,
    pub is_admin: bool,
    pub is_active: bool,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// User unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub Uuid);

impl UserId {
    /// Generate a new random user ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a user ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, UserIdError> {
        Uuid::parse_str(s)
            .map(UserId)
            .map_err(|e| UserIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Employee number value type, the identity key of a user.
///
/// 1-32 characters, no whitespace. Immutable once the user exists.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmployeeNumber(String);

impl EmployeeNumber {
    const MAX_LENGTH: usize = 32;

    /// Create a validated employee number.
    ///
    /// # Errors
    /// * `Empty` - Blank input
    /// * `TooLong` - Longer than 32 characters
    /// * `ContainsWhitespace` - Contains whitespace characters
    pub fn new(employee_number: String) -> Result<Self, EmployeeNumberError> {
        if employee_number.is_empty() {
            return Err(EmployeeNumberError::Empty);
        }

        let length = employee_number.chars().count();
        if length > Self::MAX_LENGTH {
            return Err(EmployeeNumberError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            });
        }

        if employee_number.chars().any(char::is_whitespace) {
            return Err(EmployeeNumberError::ContainsWhitespace);
        }

        Ok(Self(employee_number))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmployeeNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// First or last name of a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonName(String);

impl PersonName {
    const MAX_LENGTH: usize = 100;

    /// Create a validated name. Surrounding whitespace is trimmed.
    ///
    /// # Errors
    /// * `Empty` - Blank input
    /// * `TooLong` - Longer than 100 characters
    pub fn new(name: String) -> Result<Self, NameError> {
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(NameError::Empty);
        }

        let length = name.chars().count();
        if length > Self::MAX_LENGTH {
            return Err(NameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            });
        }

        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Contact channel of a user: an email address or an E.164-like phone number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact(String);

impl Contact {
    /// Create a validated contact.
    ///
    /// Phone numbers follow the simplified E.164 shape: optional `+`, a
    /// non-zero leading digit, 2 to 15 digits in total.
    ///
    /// # Errors
    /// * `InvalidFormat` - Neither a valid email address nor a phone number
    pub fn new(contact: String) -> Result<Self, ContactError> {
        let contact = contact.trim().to_string();

        if Self::is_phone_number(&contact) || Self::is_email(&contact) {
            Ok(Self(contact))
        } else {
            Err(ContactError::InvalidFormat(contact))
        }
    }

    fn is_email(value: &str) -> bool {
        // email_address accepts dotless domains like "user@localhost"
        email_address::EmailAddress::from_str(value)
            .map(|email| email.domain().contains('.'))
            .unwrap_or(false)
    }

    fn is_phone_number(value: &str) -> bool {
        let digits = value.strip_prefix('+').unwrap_or(value);

        digits.len() >= 2
            && digits.len() <= 15
            && digits.chars().all(|c| c.is_ascii_digit())
            && !digits.starts_with('0')
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Command to create a new user with domain types.
///
/// Used by self-registration (where `is_admin` is always forced off) and by
/// admin user creation.
#[derive(Debug, Clone)]
pub struct CreateUserCommand {
    pub employee_number: EmployeeNumber,
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub contact: Contact,
    pub image_url: Option<String>,
    pub password: String,
    pub is_admin: bool,
}

/// Self-service profile patch.
///
/// Carries only name, contact and image. Password, admin flag, activity flag
/// and employee number cannot be expressed here.
#[derive(Debug, Clone, Default)]
pub struct UpdateProfileCommand {
    pub first_name: Option<PersonName>,
    pub last_name: Option<PersonName>,
    pub contact: Option<Contact>,
    pub image_url: Option<String>,
}

impl UpdateProfileCommand {
    /// Merge present fields into `user`.
    pub fn apply_to(self, user: &mut User) {
        if let Some(first_name) = self.first_name {
            user.first_name = first_name;
        }
        if let Some(last_name) = self.last_name {
            user.last_name = last_name;
        }
        if let Some(contact) = self.contact {
            user.contact = contact;
        }
        if let Some(image_url) = self.image_url {
            user.image_url = Some(image_url);
        }
    }
}

/// Admin patch over any user field except password and employee number.
#[derive(Debug, Clone, Default)]
pub struct UpdateUserCommand {
    pub profile: UpdateProfileCommand,
    pub is_admin: Option<bool>,
    pub is_active: Option<bool>,
}

impl UpdateUserCommand {
    /// Whether the patch revokes admin rights or deactivates the account.
    pub fn demotes(&self) -> bool {
        self.is_admin == Some(false) || self.is_active == Some(false)
    }

    /// Merge present fields into `user`.
    pub fn apply_to(self, user: &mut User) {
        self.profile.apply_to(user);

        if let Some(is_admin) = self.is_admin {
            user.is_admin = is_admin;
        }
        if let Some(is_active) = self.is_active {
            user.is_active = is_active;
        }
    }
}

/// Default administrator created at startup when no admin account exists.
#[derive(Debug, Clone)]
pub struct BootstrapAdmin {
    pub employee_number: EmployeeNumber,
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub contact: Contact,
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_employee_number_validation() {
        assert!(EmployeeNumber::new("E1".to_string()).is_ok());
        assert!(EmployeeNumber::new("00admin".to_string()).is_ok());
        assert_eq!(
            EmployeeNumber::new(String::new()),
            Err(EmployeeNumberError::Empty)
        );
        assert_eq!(
            EmployeeNumber::new("E 1".to_string()),
            Err(EmployeeNumberError::ContainsWhitespace)
        );
        assert!(matches!(
            EmployeeNumber::new("E".repeat(33)),
            Err(EmployeeNumberError::TooLong { max: 32, actual: 33 })
        ));
    }

    #[test]
    fn test_person_name_is_trimmed() {
        let name = PersonName::new("  Ada ".to_string()).unwrap();
        assert_eq!(name.as_str(), "Ada");
        assert_eq!(PersonName::new("   ".to_string()), Err(NameError::Empty));
    }

    #[test]
    fn test_contact_accepts_email() {
        assert!(Contact::new("gestor@sistema.com".to_string()).is_ok());
        assert!(Contact::new("first.last+tag@example.co.uk".to_string()).is_ok());
    }

    #[test]
    fn test_contact_accepts_phone_number() {
        assert!(Contact::new("+34600111222".to_string()).is_ok());
        assert!(Contact::new("600111222".to_string()).is_ok());
        assert!(Contact::new("+12".to_string()).is_ok());
    }

    #[test]
    fn test_contact_rejects_garbage() {
        for value in [
            "not-a-contact",
            "user@localhost",
            "+0600111222",
            "+1",
            "+1234567890123456",
            "600 111 222",
            "",
        ] {
            assert!(
                Contact::new(value.to_string()).is_err(),
                "{value} should be rejected"
            );
        }
    }

    #[test]
    fn test_profile_patch_only_touches_present_fields() {
        let mut user = User {
            id: UserId::new(),
            employee_number: EmployeeNumber::new("E1".to_string()).unwrap(),
            first_name: PersonName::new("Ada".to_string()).unwrap(),
            last_name: PersonName::new("Lovelace".to_string()).unwrap(),
            contact: Contact::new("ada@example.com".to_string()).unwrap(),
            password_hash: "$argon2id$hash".to_string(),
            is_admin: false,
            is_active: true,
            image_url: None,
            created_at: Utc::now(),
        };
        let before = user.clone();

        UpdateProfileCommand {
            last_name: Some(PersonName::new("Byron".to_string()).unwrap()),
            ..Default::default()
        }
        .apply_to(&mut user);

        assert_eq!(user.last_name.as_str(), "Byron");
        assert_eq!(user.first_name, before.first_name);
        assert_eq!(user.contact, before.contact);
        assert_eq!(user.password_hash, before.password_hash);
        assert!(!user.is_admin);
    }
}

//! Authorization policy shared by every resource operation.
//!
//! Services resolve the target resource first (so a missing object yields
//! "not found"), then ask [`can`] whether the principal may act on it.

use thiserror::Error;

use crate::domain::user::models::User;
use crate::domain::user::models::UserId;

/// Authenticated identity attached to a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Principal {
    pub id: UserId,
    pub is_admin: bool,
}

impl From<&User> for Principal {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            is_admin: user.is_admin,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Create,
    Read,
    List,
    Update,
    Delete,
}

/// Target of an operation, carrying the ownership facts the policy needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    /// The administration surface as a whole.
    AdminConsole,
    /// The set of all user accounts.
    Users,
    /// A single user account.
    User(UserId),
    /// The set of all works, regardless of owner.
    Works,
    /// A single work (or a work about to be created) owned by `owner`.
    Work { owner: UserId },
}

/// Returned by [`authorize`] when [`can`] denies an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{action:?} on {resource:?} denied")]
pub struct AccessDenied {
    pub action: Action,
    pub resource: Resource,
}

/// Decide whether `principal` may perform `action` on `resource`.
pub fn can(principal: &Principal, action: Action, resource: Resource) -> bool {
    match resource {
        Resource::AdminConsole | Resource::Users | Resource::Works => principal.is_admin,
        Resource::User(target) => match action {
            Action::Read | Action::Update => principal.is_admin || principal.id == target,
            // Nobody deletes their own account, admins included.
            Action::Delete => principal.is_admin && principal.id != target,
            Action::Create | Action::List => principal.is_admin,
        },
        Resource::Work { owner } => principal.is_admin || principal.id == owner,
    }
}

/// [`can`] as a `Result`, for use with `?`.
pub fn authorize(
    principal: &Principal,
    action: Action,
    resource: Resource,
) -> Result<(), AccessDenied> {
    if can(principal, action, resource) {
        Ok(())
    } else {
        Err(AccessDenied { action, resource })
    }
}

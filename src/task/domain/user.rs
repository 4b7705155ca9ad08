//! Application users referenced by tasks and activity entries.

use super::{ParseUserRoleError, TaskDomainError, UserId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Role of a user within the organisation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// Can manage tasks for the whole team.
    Manager,
    /// Regular team member.
    #[default]
    Member,
}

impl UserRole {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Manager => "manager",
            Self::Member => "member",
        }
    }
}

impl TryFrom<&str> for UserRole {
    type Error = ParseUserRoleError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "manager" => Ok(Self::Manager),
            "member" => Ok(Self::Member),
            _ => Err(ParseUserRoleError(value.to_owned())),
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Display data resolved for a task assignee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Display name.
    pub name: String,
    /// Contact email.
    pub email: String,
}

/// Application user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    name: String,
    email: String,
    role: UserRole,
}

impl User {
    /// Creates a user with a fresh identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyUserName`] when the name is blank.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        role: UserRole,
    ) -> Result<Self, TaskDomainError> {
        Self::with_id(UserId::new(), name, email, role)
    }

    /// Creates a user with a known identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyUserName`] when the name is blank.
    pub fn with_id(
        id: UserId,
        name: impl Into<String>,
        email: impl Into<String>,
        role: UserRole,
    ) -> Result<Self, TaskDomainError> {
        let raw_name = name.into();
        let trimmed = raw_name.trim();
        if trimmed.is_empty() {
            return Err(TaskDomainError::EmptyUserName);
        }
        Ok(Self {
            id,
            name: trimmed.to_owned(),
            email: email.into(),
            role,
        })
    }

    /// Returns the user identifier.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the email address.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Returns the organisation role.
    #[must_use]
    pub const fn role(&self) -> UserRole {
        self.role
    }

    /// Returns the display profile attached to assigned tasks.
    #[must_use]
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            name: self.name.clone(),
            email: self.email.clone(),
        }
    }
}

//! Task assignee value object.

use super::TaskDomainError;
use crate::kernel::domain::ValueObject;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Person responsible for a task, or nobody.
///
/// # Examples
///
/// ```
/// use taskwright::task::domain::Assignee;
///
/// let assignee = Assignee::assigned("u1", "John", "JOHN@X.COM").expect("valid assignee");
/// assert_eq!(assignee.email(), Some("john@x.com"));
/// assert!(Assignee::assigned("u1", "John", "not-an-email").is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Assignee {
    /// Nobody is assigned.
    #[default]
    Unassigned,
    /// A user is assigned.
    Assigned {
        /// External user identifier.
        user_id: String,
        /// Display name.
        name: String,
        /// Lower-cased contact email.
        email: String,
    },
}

impl Assignee {
    /// Creates a validated assignee.
    ///
    /// All three values are trimmed and the email is lower-cased.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidAssignee`] when the user id or name
    /// is empty, or the email does not look like `local@domain.tld`.
    pub fn assigned(
        user_id: impl AsRef<str>,
        name: impl AsRef<str>,
        email: impl AsRef<str>,
    ) -> Result<Self, TaskDomainError> {
        let user_id_value = user_id.as_ref().trim();
        if user_id_value.is_empty() {
            return Err(TaskDomainError::InvalidAssignee(
                "user id must not be empty".to_owned(),
            ));
        }
        let name_value = name.as_ref().trim();
        if name_value.is_empty() {
            return Err(TaskDomainError::InvalidAssignee(
                "name must not be empty".to_owned(),
            ));
        }
        let email_value = email.as_ref().trim();
        if !is_valid_email(email_value) {
            return Err(TaskDomainError::InvalidAssignee(format!(
                "malformed email '{email_value}'"
            )));
        }
        Ok(Self::Assigned {
            user_id: user_id_value.to_owned(),
            name: name_value.to_owned(),
            email: email_value.to_lowercase(),
        })
    }

    /// Returns the unassigned state.
    #[must_use]
    pub const fn unassigned() -> Self {
        Self::Unassigned
    }

    /// Returns `true` when a user is assigned.
    #[must_use]
    pub const fn is_assigned(&self) -> bool {
        matches!(self, Self::Assigned { .. })
    }

    /// Returns the assigned user identifier.
    #[must_use]
    pub fn user_id(&self) -> Option<&str> {
        match self {
            Self::Assigned { user_id, .. } => Some(user_id),
            Self::Unassigned => None,
        }
    }

    /// Returns the assigned user's display name.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Assigned { name, .. } => Some(name),
            Self::Unassigned => None,
        }
    }

    /// Returns the assigned user's email.
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        match self {
            Self::Assigned { email, .. } => Some(email),
            Self::Unassigned => None,
        }
    }
}

impl ValueObject for Assignee {}

impl fmt::Display for Assignee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name().unwrap_or("Unassigned"))
    }
}

/// Accepts `local@domain.tld`: no whitespace, a single `@`, and a dot inside
/// the domain with at least one character on each side.
fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain
        .char_indices()
        .any(|(index, ch)| ch == '.' && index > 0 && index + 1 < domain.len())
}

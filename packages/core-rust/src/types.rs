use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Role carried by a resolved identity.
///
/// Modeled but not enforced: any resolved identity counts as authenticated
/// regardless of its role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Regular account.
    User,
    /// Administrative account.
    Admin,
}

impl Role {
    /// Lowercase wire name of the role.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string does not name a known [`Role`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Self::User),
            "admin" => Ok(Self::Admin),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

/// Caller identity resolved from a bearer token.
///
/// Lives only for the duration of one request and is never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Identifier of the authenticated account.
    pub id: String,
    /// Contact email of the authenticated account.
    pub email: String,
    /// Role assigned to the account.
    pub role: Role,
}

impl Identity {
    /// Builds an identity for an already verified account.
    #[must_use]
    pub fn new(id: impl Into<String>, email: impl Into<String>, role: Role) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
            role,
        }
    }
}

/// A stored user record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Store-assigned identifier (decimal string).
    pub id: String,
    /// Display name.
    pub name: String,
    /// Contact email.
    pub email: String,
}

/// Input for creating a user. No uniqueness is enforced on either field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
}

impl NewUser {
    /// Input with the given name and email, taken as-is.
    #[must_use]
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}

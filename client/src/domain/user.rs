//! User identity as reported by the remote API.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation errors raised when parsing user-facing identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserValidationError {
    /// The identifier was not a positive integer.
    #[error("user id must be a positive integer, got `{raw}`")]
    InvalidId {
        /// Rejected input.
        raw: String,
    },
    /// The role was not one of the known roles.
    #[error("unknown role `{raw}`; expected `consumer` or `creator`")]
    UnknownRole {
        /// Rejected input.
        raw: String,
    },
}

/// Server-assigned numeric user identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    /// Wrap a raw identifier.
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Raw numeric value.
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for UserId {
    type Err = UserValidationError;

    /// Parse a route parameter such as the `42` in `/profile/42`.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().parse::<i64>() {
            Ok(id) if id > 0 => Ok(Self(id)),
            _ => Err(UserValidationError::InvalidId {
                raw: raw.to_owned(),
            }),
        }
    }
}

/// Account role deciding which actions a user may take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Browses, searches, comments and rates.
    #[default]
    Consumer,
    /// Everything a consumer can do, plus uploading media.
    Creator,
}

impl Role {
    /// Wire representation.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Consumer => "consumer",
            Self::Creator => "creator",
        }
    }

    /// Account badge shown next to the user's name.
    pub const fn account_label(self) -> &'static str {
        match self {
            Self::Consumer => "Consumer Account",
            Self::Creator => "Creator Account",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = UserValidationError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim() {
            "consumer" => Ok(Self::Consumer),
            "creator" => Ok(Self::Creator),
            _ => Err(UserValidationError::UnknownRole {
                raw: raw.to_owned(),
            }),
        }
    }
}

/// Authenticated identity record.
///
/// Owned by the session store and replaced wholesale; views only read it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    name: String,
    role: Role,
}

impl User {
    /// Build a user record.
    pub fn new(id: UserId, name: impl Into<String>, role: Role) -> Self {
        Self {
            id,
            name: name.into(),
            role,
        }
    }

    /// Server-assigned identifier.
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Display name.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Account role.
    pub const fn role(&self) -> Role {
        self.role
    }

    /// Whether the user may upload media.
    pub const fn is_creator(&self) -> bool {
        matches!(self.role, Role::Creator)
    }

    /// Upper-cased first letter of the name, used for avatar placeholders.
    pub fn initial(&self) -> Option<char> {
        self.name.chars().next().map(|c| c.to_ascii_uppercase())
    }
}

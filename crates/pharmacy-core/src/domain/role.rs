use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Permission level of an admin-area identity.
///
/// Stored as a lowercase string in the `profiles.role` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Editor,
    Author,
    Viewer,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::Admin, Role::Editor, Role::Author, Role::Viewer];

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Editor => "editor",
            Role::Author => "author",
            Role::Viewer => "viewer",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Editor => "Editor",
            Role::Author => "Author",
            Role::Viewer => "Viewer",
        }
    }

    /// Parse a stored role value. Unknown values yield `None`.
    pub fn parse(value: &str) -> Option<Self> {
        value.parse().ok()
    }

    pub fn can_manage_users(self) -> bool {
        matches!(self, Role::Admin)
    }

    pub fn can_manage_categories(self) -> bool {
        matches!(self, Role::Admin | Role::Editor)
    }

    pub fn can_author_posts(self) -> bool {
        match self {
            Role::Admin | Role::Editor | Role::Author => true,
            Role::Viewer => false,
        }
    }

    /// Whether posts written by someone else may be edited.
    pub fn can_edit_any_post(self) -> bool {
        matches!(self, Role::Admin | Role::Editor)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not one of the known roles.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "editor" => Ok(Role::Editor),
            "author" => Ok(Role::Author),
            "viewer" => Ok(Role::Viewer),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

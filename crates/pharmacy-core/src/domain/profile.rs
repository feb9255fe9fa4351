use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Role;

/// Profile entity - the admin-area record attached to an authenticated identity.
///
/// `role` is optional because a stored value outside the known set is kept
/// as "no role" rather than rejected at load time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: Uuid,
    pub email: String,
    pub full_name: Option<String>,
    pub avatar_url: Option<String>,
    pub role: Option<Role>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    /// Create the profile for a first sign-in. New identities start as viewers.
    pub fn new(id: Uuid, email: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            email,
            full_name: None,
            avatar_url: None,
            role: Some(Role::Viewer),
            created_at: now,
            updated_at: now,
        }
    }

    /// Name shown as the author of new posts.
    pub fn display_name(&self) -> &str {
        match self.full_name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => &self.email,
        }
    }

    /// Avatar fallback text, e.g. "JD" for "Jane Doe".
    pub fn initials(&self) -> String {
        match self.full_name.as_deref() {
            Some(name) if !name.trim().is_empty() => name
                .split_whitespace()
                .filter_map(|part| part.chars().next())
                .flat_map(char::to_uppercase)
                .collect(),
            _ => self
                .email
                .chars()
                .next()
                .map(|c| c.to_uppercase().collect())
                .unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_profile_is_viewer() {
        let profile = Profile::new(Uuid::new_v4(), "pat@example.com".to_string());
        assert_eq!(profile.role, Some(Role::Viewer));
        assert_eq!(profile.display_name(), "pat@example.com");
    }

    #[test]
    fn test_initials() {
        let mut profile = Profile::new(Uuid::new_v4(), "jane@example.com".to_string());
        assert_eq!(profile.initials(), "J");

        profile.full_name = Some("jane van doe".to_string());
        assert_eq!(profile.initials(), "JVD");
        assert_eq!(profile.display_name(), "jane van doe");
    }
}

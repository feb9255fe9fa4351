use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Category entity - posts reference categories by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Categories every installation starts with, as `(name, slug)`.
pub const DEFAULT_CATEGORIES: [(&str, &str); 3] = [
    ("Health Tips", "health-tips"),
    ("Pharmacy Services", "pharmacy-services"),
    ("Immunizations", "immunizations"),
];

impl Category {
    pub fn new(name: &str, slug: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            slug: slug.to_string(),
            description: None,
            created_at: Utc::now(),
        }
    }
}

//! Data Transfer Objects - request/response types for the API.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request to sign in to the admin area.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// The signed-in session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    pub user_id: Uuid,
    pub email: String,
    pub role: Option<String>,
    pub expires_in: i64,
    pub redirect_to: String,
}

/// Which save button submitted the editor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmitAction {
    #[default]
    Draft,
    Publish,
}

/// Post editor submission. Missing fields are empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PostFormRequest {
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub content: String,
    pub category: String,
    pub featured_image: String,
    pub seo_title: String,
    pub seo_description: String,
    pub seo_canonical: String,
    pub og_image: String,
    pub no_index: bool,
    pub action: SubmitAction,
}

/// Full post as stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: Uuid,
    pub slug: String,
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub status: String,
    pub published_at: Option<DateTime<Utc>>,
    pub author_id: Option<Uuid>,
    pub author_name: String,
    pub category: String,
    pub featured_image: Option<String>,
    pub read_time: Option<String>,
    pub seo_title: Option<String>,
    pub seo_description: Option<String>,
    pub seo_canonical: Option<String>,
    pub og_image: Option<String>,
    pub no_index: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One row of the admin post list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostSummary {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub status: String,
    pub category: String,
    pub author_name: String,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// A successful save.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveResponse {
    pub message: String,
    pub redirect_to: String,
    pub post: PostResponse,
}

/// Save rejected by validation: per-field messages plus the submitted values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationErrorBody {
    pub message: String,
    pub fields: BTreeMap<String, String>,
    pub focus: Option<String>,
    pub form: PostFormRequest,
}

/// Save failed in the store. The submitted values come back untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveFailedBody {
    pub message: String,
    /// Correlates the failure with server logs.
    pub request_id: String,
    pub form: PostFormRequest,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryResponse {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
}

/// Everything the editor page needs to render.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditorResponse {
    pub post_id: Option<Uuid>,
    pub status: String,
    pub slug_linked: bool,
    pub form: PostFormRequest,
    pub categories: Vec<CategoryResponse>,
    pub author_name: String,
    pub excerpt_length: usize,
    pub excerpt_recommended: usize,
    pub featured_image_preview: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavItemResponse {
    pub name: String,
    pub href: String,
    pub active: bool,
}

/// Profile as listed on the users page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub id: Uuid,
    pub email: String,
    pub full_name: Option<String>,
    pub avatar_url: Option<String>,
    pub initials: String,
    pub role: Option<String>,
    pub role_label: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Admin dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardResponse {
    pub profile: ProfileResponse,
    pub navigation: Vec<NavItemResponse>,
    pub total_posts: u64,
    pub published_posts: u64,
    pub draft_posts: u64,
    pub recent_posts: Vec<PostSummary>,
}

/// Users page: all profiles plus the roles an admin can assign.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsersResponse {
    pub users: Vec<ProfileResponse>,
    pub roles: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleUpdateRequest {
    pub role: String,
}

/// Query of a raw-body image upload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageUploadParams {
    pub folder: String,
    pub filename: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageUrlRequest {
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageRemoveRequest {
    pub url: String,
}

/// Resolved value of an image field. `url` is empty once cleared.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageResponse {
    pub url: String,
    pub preview: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_form_defaults_missing_fields() {
        let form: PostFormRequest =
            serde_json::from_str(r#"{"title":"Flu","action":"publish"}"#).unwrap();

        assert_eq!(form.title, "Flu");
        assert_eq!(form.slug, "");
        assert!(!form.no_index);
        assert_eq!(form.action, SubmitAction::Publish);
    }

    #[test]
    fn test_action_defaults_to_draft() {
        let form: PostFormRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(form.action, SubmitAction::Draft);
    }
}

//! Committing the editor to the post store.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::access::POSTS_PATH;
use crate::domain::{Post, PostStatus};
use crate::error::RepoError;
use crate::ports::PostRepository;

use super::read_time::estimate_read_time;
use super::{EditorField, FieldErrors, PostEditor};

const SLUG_TAKEN: &str = "Slug is already in use";

/// Which save button was pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveAction {
    Draft,
    Publish,
}

impl SaveAction {
    pub fn status(self) -> PostStatus {
        match self {
            SaveAction::Draft => PostStatus::Draft,
            SaveAction::Publish => PostStatus::Published,
        }
    }
}

/// Author stamped on the saved record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostAuthor {
    pub id: Option<Uuid>,
    pub name: String,
}

/// A committed save.
#[derive(Debug, Clone)]
pub struct SaveOutcome {
    pub post: Post,
    pub created: bool,
}

impl SaveOutcome {
    pub fn message(&self) -> &'static str {
        if self.created {
            "Post created successfully"
        } else {
            "Post updated successfully"
        }
    }

    /// Where the admin UI goes after saving.
    pub fn redirect_to(&self) -> &'static str {
        POSTS_PATH
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SaveError {
    #[error("{}", .0.summary().unwrap_or_default())]
    Invalid(FieldErrors),

    #[error("Failed to save post. Please try again.")]
    Persistence(#[source] RepoError),
}

impl PostEditor {
    /// Build the record a save would write, or the validation errors blocking it.
    pub fn prepare(
        &mut self,
        action: SaveAction,
        author: &PostAuthor,
        now: DateTime<Utc>,
    ) -> Result<Post, FieldErrors> {
        self.validate()?;

        let form = self.form();
        let status = action.status();
        let (id, created_at) = match self.origin() {
            Some(origin) => (origin.id, origin.created_at),
            None => (Uuid::new_v4(), now),
        };

        Ok(Post {
            id,
            slug: form.slug.clone(),
            title: form.title.clone(),
            excerpt: form.excerpt.clone(),
            content: form.content.clone(),
            published_at: (status == PostStatus::Published).then_some(now),
            author_id: author.id,
            author_name: author.name.clone(),
            category: form.category.clone(),
            featured_image: Some(form.featured_image.clone()).filter(|url| !url.is_empty()),
            read_time: Some(estimate_read_time(&form.content)),
            status,
            seo: form.seo.to_overrides(),
            created_at,
            updated_at: now,
        })
    }
}

/// Validate the editor and insert or update its post.
///
/// On any error the editor keeps every field value so the user can retry.
pub async fn save_post(
    repo: &dyn PostRepository,
    editor: &mut PostEditor,
    action: SaveAction,
    author: &PostAuthor,
    now: DateTime<Utc>,
) -> Result<SaveOutcome, SaveError> {
    let post = editor
        .prepare(action, author, now)
        .map_err(SaveError::Invalid)?;
    let created = !editor.is_editing();

    let result = if created {
        repo.insert(post).await
    } else {
        repo.update(post).await
    };

    match result {
        Ok(post) => {
            editor.set_status(post.status);
            tracing::info!(post_id = %post.id, slug = %post.slug, status = %post.status, created, "Post saved");
            Ok(SaveOutcome { post, created })
        }
        Err(RepoError::Constraint(detail)) => {
            tracing::warn!(slug = %editor.form().slug, detail = %detail, "Post slug already taken");
            Err(SaveError::Invalid(
                editor.reject_field(EditorField::Slug, SLUG_TAKEN),
            ))
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to save post");
            Err(SaveError::Persistence(e))
        }
    }
}

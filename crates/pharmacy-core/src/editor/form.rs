//! In-memory model of the post editor.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{Post, PostStatus, SeoOverrides};

use super::slug::slugify;
use super::validation::{EditorField, FieldErrors, validate};

/// Excerpt length shown as a guideline under the excerpt field.
pub const EXCERPT_RECOMMENDED_CHARS: usize = 160;

/// SEO fields as typed into the editor. Empty strings mean "not set".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeoForm {
    pub title: String,
    pub description: String,
    pub canonical: String,
    pub og_image: String,
    pub no_index: bool,
}

impl SeoForm {
    fn from_overrides(seo: &SeoOverrides) -> Self {
        Self {
            title: seo.title.clone().unwrap_or_default(),
            description: seo.description.clone().unwrap_or_default(),
            canonical: seo.canonical.clone().unwrap_or_default(),
            og_image: seo.og_image.clone().unwrap_or_default(),
            no_index: seo.no_index,
        }
    }

    pub(crate) fn to_overrides(&self) -> SeoOverrides {
        SeoOverrides {
            title: non_empty(&self.title),
            description: non_empty(&self.description),
            canonical: non_empty(&self.canonical),
            og_image: non_empty(&self.og_image),
            no_index: self.no_index,
        }
    }
}

/// Raw editor field values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostForm {
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub content: String,
    pub category: String,
    pub featured_image: String,
    pub seo: SeoForm,
}

/// The record being edited, when editing rather than creating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PostOrigin {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Editor state for a single post.
///
/// The slug follows the title while it is linked, i.e. while the user has not
/// typed a slug of their own.
#[derive(Debug, Clone, Default)]
pub struct PostEditor {
    form: PostForm,
    status: Option<PostStatus>,
    origin: Option<PostOrigin>,
    slug_linked: bool,
    errors: FieldErrors,
}

impl PostEditor {
    /// An empty editor for a new post.
    pub fn new() -> Self {
        Self {
            slug_linked: true,
            ..Self::default()
        }
    }

    /// An editor populated from an existing post. Archived posts load as drafts.
    pub fn load(post: &Post) -> Self {
        let status = match post.status {
            PostStatus::Published => PostStatus::Published,
            PostStatus::Draft | PostStatus::Archived => PostStatus::Draft,
        };

        Self {
            slug_linked: post.slug == slugify(&post.title),
            form: PostForm {
                title: post.title.clone(),
                slug: post.slug.clone(),
                excerpt: post.excerpt.clone(),
                content: post.content.clone(),
                category: post.category.clone(),
                featured_image: post.featured_image.clone().unwrap_or_default(),
                seo: SeoForm::from_overrides(&post.seo),
            },
            status: Some(status),
            origin: Some(PostOrigin {
                id: post.id,
                created_at: post.created_at,
            }),
            errors: FieldErrors::new(),
        }
    }

    pub fn form(&self) -> &PostForm {
        &self.form
    }

    pub fn into_form(self) -> PostForm {
        self.form
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn is_editing(&self) -> bool {
        self.origin.is_some()
    }

    pub fn post_id(&self) -> Option<Uuid> {
        self.origin.map(|o| o.id)
    }

    pub(crate) fn origin(&self) -> Option<PostOrigin> {
        self.origin
    }

    /// Status shown in the status selector.
    pub fn status(&self) -> PostStatus {
        self.status.unwrap_or(PostStatus::Draft)
    }

    pub fn slug_is_linked(&self) -> bool {
        self.slug_linked
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.form.title = title.into();
        self.errors.clear(EditorField::Title);

        if self.slug_linked {
            self.form.slug = slugify(&self.form.title);
            self.errors.clear(EditorField::Slug);
        }
    }

    /// Set the slug by hand. Typing exactly the derived slug re-links it to the title.
    pub fn set_slug(&mut self, slug: impl Into<String>) {
        self.form.slug = slug.into();
        self.slug_linked = self.form.slug == slugify(&self.form.title);
        self.errors.clear(EditorField::Slug);
    }

    pub fn set_excerpt(&mut self, excerpt: impl Into<String>) {
        self.form.excerpt = excerpt.into();
        self.errors.clear(EditorField::Excerpt);
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        self.form.content = content.into();
        self.errors.clear(EditorField::Content);
    }

    pub fn set_category(&mut self, category: impl Into<String>) {
        self.form.category = category.into();
        self.errors.clear(EditorField::Category);
    }

    pub fn set_featured_image(&mut self, url: impl Into<String>) {
        self.form.featured_image = url.into();
    }

    pub fn set_status(&mut self, status: PostStatus) {
        self.status = Some(status);
    }

    pub fn set_seo(&mut self, seo: SeoForm) {
        self.form.seo = seo;
    }

    /// Apply a full submission, field by field, as if typed in order.
    pub fn apply(&mut self, form: PostForm) {
        self.set_title(form.title);
        if form.slug != self.form.slug {
            self.set_slug(form.slug);
        }
        self.set_excerpt(form.excerpt);
        self.set_content(form.content);
        self.set_category(form.category);
        self.set_featured_image(form.featured_image);
        self.set_seo(form.seo);
    }

    /// Characters typed into the excerpt so far.
    pub fn excerpt_length(&self) -> usize {
        self.form.excerpt.chars().count()
    }

    /// Run validation, remembering the result for field-level display.
    pub fn validate(&mut self) -> Result<(), FieldErrors> {
        self.errors = validate(&self.form);
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self.errors.clone())
        }
    }

    pub(crate) fn reject_field(&mut self, field: EditorField, message: &str) -> FieldErrors {
        self.errors.insert(field, message);
        self.errors.clone()
    }
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn existing_post(title: &str, slug: &str) -> Post {
        let now = Utc::now();
        Post {
            id: Uuid::new_v4(),
            slug: slug.to_string(),
            title: title.to_string(),
            excerpt: "Excerpt".to_string(),
            content: "<p>Body</p>".to_string(),
            published_at: None,
            author_id: None,
            author_name: "Team".to_string(),
            category: "Health Tips".to_string(),
            featured_image: None,
            read_time: None,
            status: PostStatus::Archived,
            seo: SeoOverrides {
                title: Some("SEO".to_string()),
                ..SeoOverrides::default()
            },
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_new_post_slug_follows_title() {
        let mut editor = PostEditor::new();
        editor.set_title("5 Tips! For You");
        assert_eq!(editor.form().slug, "5-tips-for-you");

        editor.set_title("5 Tips! For Everyone");
        assert_eq!(editor.form().slug, "5-tips-for-everyone");
    }

    #[test]
    fn test_manual_slug_survives_title_change() {
        let mut editor = PostEditor::new();
        editor.set_title("Original");
        editor.set_slug("custom-slug");
        editor.set_title("A Completely New Title");

        assert_eq!(editor.form().slug, "custom-slug");
        assert!(!editor.slug_is_linked());
    }

    #[test]
    fn test_typing_the_derived_slug_relinks() {
        let mut editor = PostEditor::new();
        editor.set_title("Med Sync");
        editor.set_slug("other");
        editor.set_slug("med-sync");
        editor.set_title("Med Sync Explained");

        assert_eq!(editor.form().slug, "med-sync-explained");
    }

    #[test]
    fn test_loaded_post_with_derived_slug_stays_linked() {
        let post = existing_post("Pill Packaging", "pill-packaging");
        let mut editor = PostEditor::load(&post);
        editor.set_title("Monthly Pill Packaging");

        assert_eq!(editor.form().slug, "monthly-pill-packaging");
    }

    #[test]
    fn test_loaded_post_with_custom_slug_is_kept() {
        let post = existing_post("Pill Packaging", "packaging-2024");
        let mut editor = PostEditor::load(&post);
        editor.set_title("Monthly Pill Packaging");

        assert_eq!(editor.form().slug, "packaging-2024");
    }

    #[test]
    fn test_load_maps_archived_to_draft_and_seo() {
        let post = existing_post("Pill Packaging", "pill-packaging");
        let editor = PostEditor::load(&post);

        assert!(editor.is_editing());
        assert_eq!(editor.post_id(), Some(post.id));
        assert_eq!(editor.status(), PostStatus::Draft);
        assert_eq!(editor.form().seo.title, "SEO");
        assert_eq!(editor.form().seo.description, "");
        assert_eq!(editor.form().featured_image, "");
    }

    #[test]
    fn test_editing_a_field_clears_its_error() {
        let mut editor = PostEditor::new();
        let errors = editor.validate().unwrap_err();
        assert_eq!(errors.len(), 5);

        editor.set_title("Now Titled");
        assert!(!editor.errors().contains(EditorField::Title));
        assert!(!editor.errors().contains(EditorField::Slug));
        assert!(editor.errors().contains(EditorField::Excerpt));

        editor.set_category("Health Tips");
        assert!(!editor.errors().contains(EditorField::Category));
    }

    #[test]
    fn test_apply_keeps_submitted_slug() {
        let mut editor = PostEditor::new();
        editor.apply(PostForm {
            title: "Transfer Prescriptions".to_string(),
            slug: "transfer".to_string(),
            ..PostForm::default()
        });

        assert_eq!(editor.form().slug, "transfer");
        assert!(!editor.slug_is_linked());
    }

    #[test]
    fn test_seo_empty_strings_normalize_to_none() {
        let seo = SeoForm {
            title: "Custom".to_string(),
            no_index: true,
            ..SeoForm::default()
        };
        let overrides = seo.to_overrides();

        assert_eq!(overrides.title.as_deref(), Some("Custom"));
        assert_eq!(overrides.description, None);
        assert_eq!(overrides.canonical, None);
        assert_eq!(overrides.og_image, None);
        assert!(overrides.no_index);
    }

    #[test]
    fn test_excerpt_length_counts_chars() {
        let mut editor = PostEditor::new();
        editor.set_excerpt("Café");
        assert_eq!(editor.excerpt_length(), 4);
        assert!(editor.excerpt_length() <= EXCERPT_RECOMMENDED_CHARS);
    }
}

//! Save-time validation of the post form.

use std::collections::BTreeMap;

use serde::Serialize;

use super::PostForm;

/// What an untouched rich-text editor holds.
pub const EMPTY_CONTENT: &str = "<p></p>";

/// Validated editor fields, declared in focus priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EditorField {
    Title,
    Slug,
    Excerpt,
    Content,
    Category,
}

impl EditorField {
    pub fn as_str(self) -> &'static str {
        match self {
            EditorField::Title => "title",
            EditorField::Slug => "slug",
            EditorField::Excerpt => "excerpt",
            EditorField::Content => "content",
            EditorField::Category => "category",
        }
    }
}

/// Field-level error messages. Empty means valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<EditorField, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn insert(&mut self, field: EditorField, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub fn clear(&mut self, field: EditorField) {
        self.0.remove(&field);
    }

    pub fn get(&self, field: EditorField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: EditorField) -> bool {
        self.0.contains_key(&field)
    }

    /// Field that should receive focus: the first invalid one.
    pub fn focus(&self) -> Option<EditorField> {
        self.0.keys().next().copied()
    }

    /// Aggregate notice, e.g. "Please fix 2 errors before saving".
    pub fn summary(&self) -> Option<String> {
        match self.0.len() {
            0 => None,
            1 => Some("Please fix 1 error before saving".to_string()),
            n => Some(format!("Please fix {n} errors before saving")),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (EditorField, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }
}

/// Collect every required-field violation of `form`.
pub fn validate(form: &PostForm) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if form.title.trim().is_empty() {
        errors.insert(EditorField::Title, "Title is required");
    }
    if form.slug.trim().is_empty() {
        errors.insert(EditorField::Slug, "Slug is required");
    }
    if form.excerpt.trim().is_empty() {
        errors.insert(EditorField::Excerpt, "Excerpt is required");
    }
    if form.content.trim().is_empty() || form.content == EMPTY_CONTENT {
        errors.insert(EditorField::Content, "Content is required");
    }
    if form.category.is_empty() {
        errors.insert(EditorField::Category, "Category is required");
    }

    errors
}

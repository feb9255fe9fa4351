//! Post editor - form state, derived fields, validation and save.

mod form;
mod read_time;
mod save;
mod slug;
mod validation;

pub use form::{EXCERPT_RECOMMENDED_CHARS, PostEditor, PostForm, SeoForm};
pub use read_time::{WORDS_PER_MINUTE, estimate_read_time, word_count};
pub use save::{PostAuthor, SaveAction, SaveError, SaveOutcome, save_post};
pub use slug::slugify;
pub use validation::{EMPTY_CONTENT, EditorField, FieldErrors, validate};

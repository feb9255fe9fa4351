//! Domain entities - the core business objects.

mod category;
mod credential;
mod post;
mod profile;
mod role;

pub use category::{Category, DEFAULT_CATEGORIES};
pub use credential::Credential;
pub use post::{BlogPost, DEFAULT_READ_TIME, PLACEHOLDER_IMAGE, Post, PostStatus, SeoOverrides};
pub use profile::Profile;
pub use role::{Role, UnknownRole};

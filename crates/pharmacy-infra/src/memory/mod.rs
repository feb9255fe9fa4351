//! In-memory repositories - used when no database is configured, and in tests.
//!
//! Data is lost on process restart.

mod categories;
mod identities;
mod posts;

pub use categories::InMemoryCategoryRepository;
pub use identities::{InMemoryCredentialRepository, InMemoryProfileRepository};
pub use posts::InMemoryPostRepository;

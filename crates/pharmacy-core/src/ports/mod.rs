//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod auth;
mod repository;
mod storage;

pub use auth::{AuthError, PasswordService, SessionClaims, TokenService};
pub use repository::{
    BaseRepository, CategoryRepository, CredentialRepository, PostRepository, ProfileRepository,
};
pub use storage::{ObjectStorage, StorageError};

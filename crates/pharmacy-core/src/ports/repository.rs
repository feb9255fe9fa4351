use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{Category, Credential, Post, PostStatus, Profile, Role};
use crate::error::RepoError;

/// Generic repository trait for entities that are created and updated but never deleted.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Insert a new entity.
    async fn insert(&self, entity: T) -> Result<T, RepoError>;

    /// Overwrite an existing entity, matched by ID.
    async fn update(&self, entity: T) -> Result<T, RepoError>;
}

/// Sign-in credentials.
#[async_trait]
pub trait CredentialRepository: BaseRepository<Credential, Uuid> {
    async fn find_by_email(&self, email: &str) -> Result<Option<Credential>, RepoError>;
}

/// Profiles attached to authenticated identities.
#[async_trait]
pub trait ProfileRepository: BaseRepository<Profile, Uuid> {
    /// All profiles, newest first.
    async fn list(&self) -> Result<Vec<Profile>, RepoError>;

    async fn update_role(&self, id: Uuid, role: Role) -> Result<Profile, RepoError>;
}

/// Blog posts.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, Uuid> {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError>;

    /// All posts regardless of status, newest first.
    async fn list_all(&self) -> Result<Vec<Post>, RepoError>;

    /// Published posts with `published_at <= now`, most recently published first.
    async fn list_published(&self, now: DateTime<Utc>) -> Result<Vec<Post>, RepoError>;

    /// Slugs of the posts `list_published` would return.
    async fn published_slugs(&self, now: DateTime<Utc>) -> Result<Vec<String>, RepoError>;

    /// Number of posts, optionally restricted to a status.
    async fn count(&self, status: Option<PostStatus>) -> Result<u64, RepoError>;

    /// Most recently created posts.
    async fn recent(&self, limit: u64) -> Result<Vec<Post>, RepoError>;
}

/// Post categories (read-only here).
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// All categories ordered by name.
    async fn list(&self) -> Result<Vec<Category>, RepoError>;
}

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use pharmacy_core::domain::{Post, PostStatus};
use pharmacy_core::error::RepoError;
use pharmacy_core::ports::{BaseRepository, PostRepository};

/// Posts keyed by id, with the same unique-slug rule as the `posts` table.
#[derive(Default)]
pub struct InMemoryPostRepository {
    store: RwLock<HashMap<Uuid, Post>>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn slug_taken(store: &HashMap<Uuid, Post>, post: &Post) -> bool {
    store
        .values()
        .any(|other| other.id != post.id && other.slug == post.slug)
}

fn newest_first(mut posts: Vec<Post>) -> Vec<Post> {
    posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    posts
}

#[async_trait]
impl BaseRepository<Post, Uuid> for InMemoryPostRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        Ok(self.store.read().await.get(&id).cloned())
    }

    async fn insert(&self, post: Post) -> Result<Post, RepoError> {
        let mut store = self.store.write().await;
        if store.contains_key(&post.id) {
            return Err(RepoError::Constraint("posts_pkey".to_string()));
        }
        if slug_taken(&store, &post) {
            return Err(RepoError::Constraint("posts_slug_key".to_string()));
        }
        store.insert(post.id, post.clone());
        Ok(post)
    }

    async fn update(&self, post: Post) -> Result<Post, RepoError> {
        let mut store = self.store.write().await;
        if !store.contains_key(&post.id) {
            return Err(RepoError::NotFound);
        }
        if slug_taken(&store, &post) {
            return Err(RepoError::Constraint("posts_slug_key".to_string()));
        }
        store.insert(post.id, post.clone());
        Ok(post)
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError> {
        Ok(self
            .store
            .read()
            .await
            .values()
            .find(|p| p.slug == slug)
            .cloned())
    }

    async fn list_all(&self) -> Result<Vec<Post>, RepoError> {
        Ok(newest_first(self.store.read().await.values().cloned().collect()))
    }

    async fn list_published(&self, now: DateTime<Utc>) -> Result<Vec<Post>, RepoError> {
        let mut posts: Vec<_> = self
            .store
            .read()
            .await
            .values()
            .filter(|p| p.is_live(now))
            .cloned()
            .collect();
        posts.sort_by(|a, b| b.published_at.cmp(&a.published_at));
        Ok(posts)
    }

    async fn published_slugs(&self, now: DateTime<Utc>) -> Result<Vec<String>, RepoError> {
        Ok(self
            .store
            .read()
            .await
            .values()
            .filter(|p| p.is_live(now))
            .map(|p| p.slug.clone())
            .collect())
    }

    async fn count(&self, status: Option<PostStatus>) -> Result<u64, RepoError> {
        let store = self.store.read().await;
        let n = store
            .values()
            .filter(|p| status.is_none_or(|s| p.status == s))
            .count();
        Ok(n as u64)
    }

    async fn recent(&self, limit: u64) -> Result<Vec<Post>, RepoError> {
        let mut posts = newest_first(self.store.read().await.values().cloned().collect());
        posts.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
        Ok(posts)
    }
}

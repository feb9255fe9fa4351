//! PostgreSQL repository implementations.

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use uuid::Uuid;

use pharmacy_core::domain::{Category, Credential, Post, PostStatus, Profile, Role};
use pharmacy_core::error::RepoError;
use pharmacy_core::ports::{
    CategoryRepository, CredentialRepository, PostRepository, ProfileRepository,
};

use super::entity::category::{self, Entity as CategoryEntity};
use super::entity::credential::{self, Entity as CredentialEntity};
use super::entity::post::{self, Entity as PostEntity};
use super::entity::profile::{self, Entity as ProfileEntity};
use super::postgres_base::{PostgresBaseRepository, repo_err};

/// PostgreSQL credential repository.
pub type PostgresCredentialRepository = PostgresBaseRepository<CredentialEntity>;

/// PostgreSQL profile repository.
pub type PostgresProfileRepository = PostgresBaseRepository<ProfileEntity>;

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

/// PostgreSQL category repository.
pub type PostgresCategoryRepository = PostgresBaseRepository<CategoryEntity>;

/// Mask an email for logging, e.g. `j***@example.com`.
fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) => match local.chars().next() {
            Some(first) if local.chars().count() > 1 => format!("{first}***@{domain}"),
            _ => format!("***@{domain}"),
        },
        None => "***".to_string(),
    }
}

#[async_trait]
impl CredentialRepository for PostgresCredentialRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<Credential>, RepoError> {
        tracing::debug!(user_email = %mask_email(email), "Finding credential by email");

        let result = CredentialEntity::find()
            .filter(credential::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(repo_err)?;

        Ok(result.map(Into::into))
    }
}

#[async_trait]
impl ProfileRepository for PostgresProfileRepository {
    async fn list(&self) -> Result<Vec<Profile>, RepoError> {
        let result = ProfileEntity::find()
            .order_by_desc(profile::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(repo_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn update_role(&self, id: Uuid, role: Role) -> Result<Profile, RepoError> {
        let now: DateTime<FixedOffset> = Utc::now().into();
        let model = profile::ActiveModel {
            id: Set(id),
            role: Set(Some(role.as_str().to_string())),
            updated_at: Set(now),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .map_err(repo_err)?;

        tracing::info!(profile_id = %id, role = %role, "Profile role updated");
        Ok(model.into())
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError> {
        let result = PostEntity::find()
            .filter(post::Column::Slug.eq(slug))
            .one(&self.db)
            .await
            .map_err(repo_err)?;

        Ok(result.map(Into::into))
    }

    async fn list_all(&self) -> Result<Vec<Post>, RepoError> {
        let result = PostEntity::find()
            .order_by_desc(post::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(repo_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn list_published(&self, now: DateTime<Utc>) -> Result<Vec<Post>, RepoError> {
        let now: DateTime<FixedOffset> = now.into();
        let result = PostEntity::find()
            .filter(post::Column::Status.eq(PostStatus::Published.as_str()))
            .filter(post::Column::PublishedAt.lte(now))
            .order_by_desc(post::Column::PublishedAt)
            .all(&self.db)
            .await
            .map_err(repo_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn published_slugs(&self, now: DateTime<Utc>) -> Result<Vec<String>, RepoError> {
        let now: DateTime<FixedOffset> = now.into();
        PostEntity::find()
            .select_only()
            .column(post::Column::Slug)
            .filter(post::Column::Status.eq(PostStatus::Published.as_str()))
            .filter(post::Column::PublishedAt.lte(now))
            .into_tuple::<String>()
            .all(&self.db)
            .await
            .map_err(repo_err)
    }

    async fn count(&self, status: Option<PostStatus>) -> Result<u64, RepoError> {
        let mut query = PostEntity::find();
        if let Some(status) = status {
            query = query.filter(post::Column::Status.eq(status.as_str()));
        }

        query.count(&self.db).await.map_err(repo_err)
    }

    async fn recent(&self, limit: u64) -> Result<Vec<Post>, RepoError> {
        let result = PostEntity::find()
            .order_by_desc(post::Column::CreatedAt)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(repo_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl CategoryRepository for PostgresCategoryRepository {
    async fn list(&self) -> Result<Vec<Category>, RepoError> {
        let result = CategoryEntity::find()
            .order_by_asc(category::Column::Name)
            .all(&self.db)
            .await
            .map_err(repo_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}

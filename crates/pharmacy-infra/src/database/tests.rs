#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use chrono::{TimeDelta, Utc};
    use sea_orm::{DatabaseBackend, DbErr, MockDatabase, Value};
    use uuid::Uuid;

    use crate::database::entity::{category, credential, post, profile};
    use crate::database::postgres_repo::{
        PostgresCategoryRepository, PostgresCredentialRepository, PostgresPostRepository,
        PostgresProfileRepository,
    };
    use pharmacy_core::domain::{Post, PostStatus, Role};
    use pharmacy_core::error::RepoError;
    use pharmacy_core::ports::{
        BaseRepository, CategoryRepository, CredentialRepository, PostRepository,
        ProfileRepository,
    };

    fn post_model(slug: &str, status: &str) -> post::Model {
        let now = Utc::now();
        post::Model {
            id: Uuid::new_v4(),
            slug: slug.to_owned(),
            title: "Allergy Season".to_owned(),
            excerpt: "Pollen is back".to_owned(),
            content: "<p>Antihistamines are behind the counter.</p>".to_owned(),
            published_at: Some((now - TimeDelta::hours(1)).into()),
            author_id: None,
            author_name: "Pharmacy Team".to_owned(),
            category: "Health Tips".to_owned(),
            featured_image: None,
            read_time: Some("1 min read".to_owned()),
            status: status.to_owned(),
            seo_title: Some("Allergy relief".to_owned()),
            seo_description: None,
            seo_canonical: None,
            og_image: None,
            no_index: false,
            created_at: now.into(),
            updated_at: now.into(),
        }
    }

    fn profile_model(role: Option<&str>) -> profile::Model {
        let now = Utc::now();
        profile::Model {
            id: Uuid::new_v4(),
            email: "tech@example.com".to_owned(),
            full_name: Some("Pat Tech".to_owned()),
            avatar_url: None,
            role: role.map(str::to_owned),
            created_at: now.into(),
            updated_at: now.into(),
        }
    }

    #[tokio::test]
    async fn test_find_post_by_id() {
        let model = post_model("allergy-season", "published");
        let post_id = model.id;

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![model]])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        let post: Post = repo.find_by_id(post_id).await.unwrap().unwrap();

        assert_eq!(post.id, post_id);
        assert_eq!(post.status, PostStatus::Published);
        assert_eq!(post.seo.title.as_deref(), Some("Allergy relief"));
    }

    #[tokio::test]
    async fn test_unknown_status_reads_as_draft() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![post_model("legacy", "pending-review")]])
            .into_connection();

        let repo = PostgresPostRepository::new(db);
        let post = repo.find_by_slug("legacy").await.unwrap().unwrap();

        assert_eq!(post.status, PostStatus::Draft);
    }

    #[tokio::test]
    async fn test_insert_post_returns_stored_row() {
        let model = post_model("allergy-season", "draft");
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![model.clone()]])
            .into_connection();

        let repo = PostgresPostRepository::new(db);
        let stored = repo.insert(Post::from(model.clone())).await.unwrap();

        assert_eq!(stored.id, model.id);
        assert_eq!(stored.slug, "allergy-season");
    }

    #[tokio::test]
    async fn test_published_slugs_and_count() {
        let slug_row = |slug: &str| BTreeMap::from([("slug", Value::from(slug.to_owned()))]);
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![slug_row("a"), slug_row("b")]])
            .append_query_results([vec![BTreeMap::from([("num_items", Value::from(7i64))])]])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        assert_eq!(repo.published_slugs(Utc::now()).await.unwrap(), vec!["a", "b"]);
        assert_eq!(repo.count(Some(PostStatus::Published)).await.unwrap(), 7);
    }

    #[tokio::test]
    async fn test_query_failure_maps_to_repo_error() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([DbErr::Custom("boom".to_owned())])
            .into_connection();

        let repo = PostgresPostRepository::new(db);
        let err = repo.list_all().await.unwrap_err();

        assert!(matches!(err, RepoError::Query(_)));
    }

    #[tokio::test]
    async fn test_profile_unknown_role_is_none() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![profile_model(Some("superuser")), profile_model(None)]])
            .into_connection();

        let repo = PostgresProfileRepository::new(db);
        let profiles = repo.list().await.unwrap();

        assert_eq!(profiles.len(), 2);
        assert!(profiles.iter().all(|p| p.role.is_none()));
    }

    #[tokio::test]
    async fn test_update_role_returns_updated_profile() {
        let model = profile_model(Some("editor"));
        let id = model.id;
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![model]])
            .into_connection();

        let repo = PostgresProfileRepository::new(db);
        let profile = repo.update_role(id, Role::Editor).await.unwrap();

        assert_eq!(profile.id, id);
        assert_eq!(profile.role, Some(Role::Editor));
    }

    #[tokio::test]
    async fn test_update_role_missing_profile_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<profile::Model>::new()])
            .into_connection();

        let repo = PostgresProfileRepository::new(db);
        let err = repo.update_role(Uuid::new_v4(), Role::Author).await.unwrap_err();

        assert!(matches!(err, RepoError::NotFound));
    }

    #[tokio::test]
    async fn test_find_credential_by_email() {
        let now = Utc::now();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![credential::Model {
                id: Uuid::new_v4(),
                email: "owner@example.com".to_owned(),
                password_hash: "$argon2id$v=19$...".to_owned(),
                created_at: now.into(),
                updated_at: now.into(),
            }]])
            .into_connection();

        let repo = PostgresCredentialRepository::new(db);
        let found = repo.find_by_email("owner@example.com").await.unwrap();

        assert_eq!(found.map(|c| c.email).as_deref(), Some("owner@example.com"));
    }

    #[tokio::test]
    async fn test_list_categories() {
        let now = Utc::now();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![category::Model {
                id: Uuid::new_v4(),
                name: "Immunizations".to_owned(),
                slug: "immunizations".to_owned(),
                description: None,
                created_at: now.into(),
            }]])
            .into_connection();

        let repo = PostgresCategoryRepository::new(db);
        let categories = repo.list().await.unwrap();

        assert_eq!(categories[0].slug, "immunizations");
    }
}

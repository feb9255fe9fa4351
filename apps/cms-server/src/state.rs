//! Application state - shared across all handlers.

use std::sync::Arc;

use pharmacy_core::domain::{Credential, Profile, Role};
use pharmacy_core::images::ImageAssetManager;
use pharmacy_core::ports::{
    CategoryRepository, CredentialRepository, ObjectStorage, PasswordService, PostRepository,
    ProfileRepository, TokenService,
};
use pharmacy_infra::database::{
    DatabaseConnections, PostgresCategoryRepository, PostgresCredentialRepository,
    PostgresPostRepository, PostgresProfileRepository,
};
use pharmacy_infra::{
    Argon2PasswordService, HttpObjectStorage, InMemoryCategoryRepository,
    InMemoryCredentialRepository, InMemoryObjectStorage, InMemoryPostRepository,
    InMemoryProfileRepository, JwtTokenService,
};

use crate::config::{AppConfig, BootstrapAdmin};

/// Repositories backing the admin area.
#[derive(Clone)]
pub struct Repositories {
    pub credentials: Arc<dyn CredentialRepository>,
    pub profiles: Arc<dyn ProfileRepository>,
    pub posts: Arc<dyn PostRepository>,
    pub categories: Arc<dyn CategoryRepository>,
}

impl Repositories {
    pub fn in_memory() -> Self {
        Self {
            credentials: Arc::new(InMemoryCredentialRepository::new()),
            profiles: Arc::new(InMemoryProfileRepository::new()),
            posts: Arc::new(InMemoryPostRepository::new()),
            categories: Arc::new(InMemoryCategoryRepository::seeded()),
        }
    }

    fn postgres(conn: &DatabaseConnections) -> Self {
        Self {
            credentials: Arc::new(PostgresCredentialRepository::new(conn.main.clone())),
            profiles: Arc::new(PostgresProfileRepository::new(conn.main.clone())),
            posts: Arc::new(PostgresPostRepository::new(conn.main.clone())),
            categories: Arc::new(PostgresCategoryRepository::new(conn.main.clone())),
        }
    }
}

/// Session cookie settings.
#[derive(Debug, Clone, Copy)]
pub struct SessionSettings {
    pub cookie_secure: bool,
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub repos: Repositories,
    pub images: ImageAssetManager,
    /// Set when images are kept in memory, so the server can serve them itself.
    pub local_storage: Option<Arc<InMemoryObjectStorage>>,
    pub tokens: Arc<dyn TokenService>,
    pub passwords: Arc<dyn PasswordService>,
    pub session: SessionSettings,
    pub db: Option<Arc<DatabaseConnections>>,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> Self {
        let (db, repos) = match &config.database {
            Some(db_config) => match DatabaseConnections::init(db_config).await {
                Ok(connections) => {
                    let conn = Arc::new(connections);
                    let repos = Repositories::postgres(&conn);
                    (Some(conn), repos)
                }
                Err(e) => {
                    tracing::error!(
                        "Failed to connect to database: {}. Using in-memory fallback.",
                        e
                    );
                    (None, Repositories::in_memory())
                }
            },
            None => {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
                (None, Repositories::in_memory())
            }
        };

        let (storage, local_storage) = Self::storage(config);

        let state = Self {
            repos,
            images: ImageAssetManager::new(storage),
            local_storage,
            tokens: Arc::new(JwtTokenService::new(config.jwt.clone())),
            passwords: Arc::new(Argon2PasswordService::new()),
            session: SessionSettings {
                cookie_secure: config.session_cookie_secure,
            },
            db,
        };

        if let Some(admin) = &config.bootstrap_admin {
            if let Err(e) = state.ensure_admin(admin).await {
                tracing::error!(error = %e, "Failed to provision bootstrap admin");
            }
        }

        tracing::info!("Application state initialized");
        state
    }

    fn storage(
        config: &AppConfig,
    ) -> (Arc<dyn ObjectStorage>, Option<Arc<InMemoryObjectStorage>>) {
        if let Some(remote) = &config.storage.remote {
            match HttpObjectStorage::new(remote.clone()) {
                Ok(storage) => return (Arc::new(storage), None),
                Err(e) => tracing::error!(
                    "Failed to build storage client: {}. Using in-memory storage.",
                    e
                ),
            }
        } else {
            tracing::warn!("STORAGE_URL not set. Uploaded images are kept in memory.");
        }

        let local = Arc::new(InMemoryObjectStorage::new(
            config.public_base_url(),
            config.storage.bucket.clone(),
        ));
        (local.clone(), Some(local))
    }

    /// Ensure an admin credential and profile exist for `admin`.
    async fn ensure_admin(&self, admin: &BootstrapAdmin) -> anyhow::Result<()> {
        let credential = match self
            .repos
            .credentials
            .find_by_email(&admin.email)
            .await?
        {
            Some(existing) => existing,
            None => {
                let hash = self.passwords.hash(&admin.password)?;
                self.repos
                    .credentials
                    .insert(Credential::new(admin.email.clone(), hash))
                    .await?
            }
        };

        match self
            .repos
            .profiles
            .find_by_id(credential.id)
            .await?
        {
            Some(profile) if profile.role == Some(Role::Admin) => {}
            Some(_) => {
                self.repos
                    .profiles
                    .update_role(credential.id, Role::Admin)
                    .await?;
            }
            None => {
                let mut profile = Profile::new(credential.id, credential.email.clone());
                profile.role = Some(Role::Admin);
                self.repos.profiles.insert(profile).await?;
            }
        }

        tracing::info!("Bootstrap admin ready");
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use pharmacy_infra::{JwtConfig, JwtTokenService};
    use uuid::Uuid;

    use super::*;

    pub const TEST_BASE_URL: &str = "http://cms.test";
    pub const TEST_PASSWORD: &str = "correct horse battery";

    /// State over in-memory adapters with a fixed signing key.
    pub fn in_memory_state() -> AppState {
        let local = Arc::new(InMemoryObjectStorage::new(TEST_BASE_URL, "blog-images"));
        AppState {
            repos: Repositories::in_memory(),
            images: ImageAssetManager::new(local.clone()),
            local_storage: Some(local),
            tokens: Arc::new(JwtTokenService::new(JwtConfig {
                secret: "test-secret".to_string(),
                expiration_hours: 1,
                issuer: "cms-test".to_string(),
            })),
            passwords: Arc::new(Argon2PasswordService::new()),
            session: SessionSettings {
                cookie_secure: false,
            },
            db: None,
        }
    }

    /// Store a user with `role` (or no profile at all) and return its id and token.
    pub async fn sign_up(state: &AppState, email: &str, role: Option<Role>) -> (Uuid, String) {
        let hash = state.passwords.hash(TEST_PASSWORD).unwrap();
        let credential = state
            .repos
            .credentials
            .insert(Credential::new(email.to_string(), hash))
            .await
            .unwrap();

        if let Some(role) = role {
            let mut profile = Profile::new(credential.id, credential.email.clone());
            profile.full_name = Some(format!("{} Staff", role.label()));
            profile.role = Some(role);
            state.repos.profiles.insert(profile).await.unwrap();
        }

        let token = state
            .tokens
            .generate_token(credential.id, &credential.email)
            .unwrap();
        (credential.id, token)
    }
}

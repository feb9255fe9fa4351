use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use pharmacy_core::domain::{Credential, Profile, Role};
use pharmacy_core::error::RepoError;
use pharmacy_core::ports::{BaseRepository, CredentialRepository, ProfileRepository};

/// Credentials keyed by id. Emails are unique, compared case-insensitively.
#[derive(Default)]
pub struct InMemoryCredentialRepository {
    store: RwLock<HashMap<Uuid, Credential>>,
}

impl InMemoryCredentialRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BaseRepository<Credential, Uuid> for InMemoryCredentialRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Credential>, RepoError> {
        Ok(self.store.read().await.get(&id).cloned())
    }

    async fn insert(&self, credential: Credential) -> Result<Credential, RepoError> {
        let mut store = self.store.write().await;
        if store.contains_key(&credential.id)
            || store
                .values()
                .any(|c| c.email.eq_ignore_ascii_case(&credential.email))
        {
            return Err(RepoError::Constraint("users_email_key".to_string()));
        }
        store.insert(credential.id, credential.clone());
        Ok(credential)
    }

    async fn update(&self, credential: Credential) -> Result<Credential, RepoError> {
        let mut store = self.store.write().await;
        let slot = store.get_mut(&credential.id).ok_or(RepoError::NotFound)?;
        *slot = credential.clone();
        Ok(credential)
    }
}

#[async_trait]
impl CredentialRepository for InMemoryCredentialRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<Credential>, RepoError> {
        Ok(self
            .store
            .read()
            .await
            .values()
            .find(|c| c.email.eq_ignore_ascii_case(email))
            .cloned())
    }
}

#[derive(Default)]
pub struct InMemoryProfileRepository {
    store: RwLock<HashMap<Uuid, Profile>>,
}

impl InMemoryProfileRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BaseRepository<Profile, Uuid> for InMemoryProfileRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Profile>, RepoError> {
        Ok(self.store.read().await.get(&id).cloned())
    }

    async fn insert(&self, profile: Profile) -> Result<Profile, RepoError> {
        let mut store = self.store.write().await;
        if store.contains_key(&profile.id) {
            return Err(RepoError::Constraint("profiles_pkey".to_string()));
        }
        store.insert(profile.id, profile.clone());
        Ok(profile)
    }

    async fn update(&self, profile: Profile) -> Result<Profile, RepoError> {
        let mut store = self.store.write().await;
        let slot = store.get_mut(&profile.id).ok_or(RepoError::NotFound)?;
        *slot = profile.clone();
        Ok(profile)
    }
}

#[async_trait]
impl ProfileRepository for InMemoryProfileRepository {
    async fn list(&self) -> Result<Vec<Profile>, RepoError> {
        let mut profiles: Vec<_> = self.store.read().await.values().cloned().collect();
        profiles.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(profiles)
    }

    async fn update_role(&self, id: Uuid, role: Role) -> Result<Profile, RepoError> {
        let mut store = self.store.write().await;
        let profile = store.get_mut(&id).ok_or(RepoError::NotFound)?;
        profile.role = Some(role);
        profile.updated_at = Utc::now();
        Ok(profile.clone())
    }
}

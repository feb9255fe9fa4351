//! # Pharmacy Infrastructure
//!
//! Concrete implementations of the ports defined in `pharmacy-core`.
//! This crate contains the database, session and object storage integrations.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external services, in-memory only
//! - `postgres` - PostgreSQL database support via SeaORM
//! - `auth` - JWT sessions + Argon2 password hashing
//! - `storage` - HTTP object storage via reqwest

pub mod database;
pub mod memory;
pub mod storage;

#[cfg(feature = "auth")]
pub mod auth;

// Re-exports - In-Memory
pub use memory::{
    InMemoryCategoryRepository, InMemoryCredentialRepository, InMemoryPostRepository,
    InMemoryProfileRepository,
};
pub use storage::InMemoryObjectStorage;

#[cfg(feature = "postgres")]
pub use database::{DatabaseConfig, DatabaseConnections};

#[cfg(feature = "auth")]
pub use auth::{Argon2PasswordService, JwtConfig, JwtTokenService};

#[cfg(feature = "storage")]
pub use storage::{HttpObjectStorage, StorageConfig};

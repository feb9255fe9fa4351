//! PostgreSQL persistence via SeaORM.

#[cfg(feature = "postgres")]
mod connections;
#[cfg(feature = "postgres")]
mod postgres_base;
#[cfg(feature = "postgres")]
pub mod postgres_repo;

#[cfg(feature = "postgres")]
pub mod entity;

#[cfg(feature = "postgres")]
pub use connections::{DatabaseConfig, DatabaseConnections};

#[cfg(feature = "postgres")]
pub use postgres_repo::{
    PostgresCategoryRepository, PostgresCredentialRepository, PostgresPostRepository,
    PostgresProfileRepository,
};

#[cfg(feature = "postgres")]
#[cfg(test)]
mod tests;

//! Application configuration loaded from environment variables.

use std::env;

use pharmacy_infra::database::DatabaseConfig;
use pharmacy_infra::{JwtConfig, StorageConfig};

pub const DEFAULT_BUCKET: &str = "blog-images";

/// Where uploaded images go.
#[derive(Debug, Clone)]
pub struct StorageSettings {
    pub bucket: String,
    /// Remote storage API; `None` keeps objects in memory.
    pub remote: Option<StorageConfig>,
}

/// Credentials provisioned as an admin at startup, if missing.
#[derive(Debug, Clone)]
pub struct BootstrapAdmin {
    pub email: String,
    pub password: String,
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: Option<DatabaseConfig>,
    pub jwt: JwtConfig,
    pub session_cookie_secure: bool,
    pub storage: StorageSettings,
    pub bootstrap_admin: Option<BootstrapAdmin>,
}

fn parsed<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

fn flag(key: &str, default: bool) -> bool {
    env::var(key)
        .map(|v| !matches!(v.to_lowercase().as_str(), "false" | "0" | "no"))
        .unwrap_or(default)
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let database = env::var("DATABASE_URL").ok().map(|url| DatabaseConfig {
            url,
            max_connections: parsed("DB_MAX_CONNECTIONS", 20),
            min_connections: parsed("DB_MIN_CONNECTIONS", 2),
        });

        let defaults = JwtConfig::default();
        let jwt = JwtConfig {
            secret: env::var("JWT_SECRET").unwrap_or(defaults.secret),
            expiration_hours: parsed("JWT_EXPIRATION_HOURS", defaults.expiration_hours),
            issuer: env::var("JWT_ISSUER").unwrap_or(defaults.issuer),
        };

        let bucket = env::var("STORAGE_BUCKET").unwrap_or_else(|_| DEFAULT_BUCKET.to_string());
        let remote = env::var("STORAGE_URL").ok().map(|url| StorageConfig {
            url,
            bucket: bucket.clone(),
            service_key: env::var("STORAGE_SERVICE_KEY").unwrap_or_default(),
        });

        let bootstrap_admin = match (env::var("ADMIN_EMAIL"), env::var("ADMIN_PASSWORD")) {
            (Ok(email), Ok(password)) if !email.is_empty() && !password.is_empty() => {
                Some(BootstrapAdmin { email, password })
            }
            _ => None,
        };

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: parsed("PORT", 8080),
            database,
            jwt,
            session_cookie_secure: flag("SESSION_COOKIE_SECURE", false),
            storage: StorageSettings { bucket, remote },
            bootstrap_admin,
        }
    }

    /// Base URL this server is reachable at, used for in-memory image URLs.
    pub fn public_base_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

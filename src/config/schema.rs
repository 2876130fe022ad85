//! Configuration schema definitions

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub auth: AuthConfig,

    #[serde(default)]
    pub storage: StorageConfig,
}

impl Config {
    /// Check the settings that have no safe default.
    ///
    /// Called before the server binds and before migrations run; any error
    /// here aborts startup.
    pub fn validate(&self) -> Result<()> {
        if self.auth.jwt_secret.trim().is_empty() {
            return Err(Error::Config(
                "auth.jwt_secret must be set (e.g. jwt_secret = \"${JWT_SECRET}\")".to_string(),
            ));
        }

        if self.auth.superadmin.password.is_empty() {
            return Err(Error::Config(
                "auth.superadmin.password must be set".to_string(),
            ));
        }

        if !(4..=31).contains(&self.auth.bcrypt_cost) {
            return Err(Error::Config(format!(
                "auth.bcrypt_cost must be between 4 and 31, got {}",
                self.auth.bcrypt_cost
            )));
        }

        if self.auth.token_ttl_secs <= 0 {
            return Err(Error::Config(
                "auth.token_ttl_secs must be positive".to_string(),
            ));
        }

        if self.storage.backend == StorageBackend::Postgres && self.storage.postgres.is_none() {
            return Err(Error::Config(
                "storage.backend is \"postgres\" but [storage.postgres] is missing".to_string(),
            ));
        }

        Ok(())
    }
}

/// Server configuration for the HTTP API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Allowed CORS origins; empty means any origin
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
        }
    }
}

/// Token signing and password hashing settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// HMAC secret for signing tokens. No default.
    #[serde(default)]
    pub jwt_secret: String,

    #[serde(default = "default_token_ttl_secs")]
    pub token_ttl_secs: i64,

    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,

    /// Put the admin and user routes behind the role gate
    #[serde(default)]
    pub protect_tracking_routes: bool,

    #[serde(default)]
    pub superadmin: SuperadminConfig,
}

fn default_token_ttl_secs() -> i64 {
    3600
}

fn default_bcrypt_cost() -> u32 {
    10
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            token_ttl_secs: default_token_ttl_secs(),
            bcrypt_cost: default_bcrypt_cost(),
            protect_tracking_routes: false,
            superadmin: SuperadminConfig::default(),
        }
    }
}

/// Identity of the superadmin created on first start
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuperadminConfig {
    #[serde(default = "default_superadmin_username")]
    pub username: String,

    #[serde(default = "default_superadmin_email")]
    pub email: String,

    #[serde(default)]
    pub password: String,
}

fn default_superadmin_username() -> String {
    "superadmin".to_string()
}

fn default_superadmin_email() -> String {
    "superadmin@example.com".to_string()
}

impl Default for SuperadminConfig {
    fn default() -> Self {
        Self {
            username: default_superadmin_username(),
            email: default_superadmin_email(),
            password: String::new(),
        }
    }
}

/// Where records are persisted
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,

    #[serde(default)]
    pub postgres: Option<PostgresConfig>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Records live in process memory and are lost on restart
    #[default]
    Memory,
    Postgres,
}

/// PostgreSQL connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostgresConfig {
    #[serde(default = "default_pg_host")]
    pub host: String,

    #[serde(default = "default_pg_port")]
    pub port: u16,

    #[serde(default = "default_pg_user")]
    pub user: String,

    #[serde(default)]
    pub password: String,

    #[serde(default = "default_pg_dbname")]
    pub dbname: String,
}

fn default_pg_host() -> String {
    "localhost".to_string()
}

fn default_pg_port() -> u16 {
    5432
}

fn default_pg_user() -> String {
    "postgres".to_string()
}

fn default_pg_dbname() -> String {
    "commtrack".to_string()
}

impl PostgresConfig {
    /// libpq-style connection string
    pub fn connection_string(&self) -> String {
        format!(
            "host={} port={} user={} password={} dbname={}",
            self.host, self.port, self.user, self.password, self.dbname
        )
    }
}

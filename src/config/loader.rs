//! Configuration loading and environment variable interpolation

use crate::error::{Error, Result};
use regex::Regex;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use super::Config;

pub const CONFIG_FILENAME: &str = "commtrack.toml";

/// Load configuration from commtrack.toml, or from `path` when given
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => load_config_from_path(path),
        None => load_config_from_path(&find_config_file()?),
    }
}

/// Load configuration from a specific path
pub fn load_config_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path).map_err(|_| Error::ConfigNotFound)?;
    let content = interpolate_env_vars(&content);
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

/// Find the configuration file, searching upward from current directory
fn find_config_file() -> Result<PathBuf> {
    let mut current = env::current_dir().map_err(|e| Error::Config(e.to_string()))?;

    loop {
        let config_path = current.join(CONFIG_FILENAME);
        if config_path.exists() {
            return Ok(config_path);
        }

        if !current.pop() {
            return Err(Error::ConfigNotFound);
        }
    }
}

/// Interpolate environment variables in the format ${VAR_NAME} or ${VAR_NAME:-default}
fn interpolate_env_vars(content: &str) -> String {
    // Compile-time constant pattern; a failure here is a bug, not bad input
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)(?::-([^}]*))?\}")
        .expect("Invalid regex pattern - this is a bug in the codebase");

    re.replace_all(content, |caps: &regex::Captures| {
        let var_name = &caps[1];
        let default = caps.get(2).map(|m| m.as_str()).unwrap_or("");

        env::var(var_name).unwrap_or_else(|_| default.to_string())
    })
    .to_string()
}

/// Generate a default configuration file content
pub fn default_config_content() -> &'static str {
    r#"# commtrack configuration

[server]
host = "0.0.0.0"
port = 5000
# cors_origins = ["https://tracker.example.com"]

[auth]
# Required. Startup fails when this resolves to an empty string.
jwt_secret = "${JWT_SECRET}"
token_ttl_secs = 3600
bcrypt_cost = 10
# Require tokens on /api/admin/* and /api/user/* as well
protect_tracking_routes = false

[auth.superadmin]
username = "superadmin"
email = "superadmin@example.com"
password = "${SUPERADMIN_PASSWORD}"

[storage]
backend = "memory"  # or "postgres"

# [storage.postgres]
# host = "localhost"
# port = 5432
# user = "postgres"
# password = "${POSTGRES_PASSWORD:-postgres}"
# dbname = "commtrack"
"#
}

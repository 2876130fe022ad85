//! Configuration loading tests

use commtrack::config::{load_config, loader, StorageBackend};
use commtrack::error::Error;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_load_config_from_explicit_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("commtrack.toml");
    fs::write(
        &path,
        r#"
[server]
port = 8080

[auth]
jwt_secret = "file-secret"
token_ttl_secs = 600

[auth.superadmin]
email = "root@tracker.test"
password = "root"

[storage]
backend = "postgres"

[storage.postgres]
host = "db"
password = "${COMMTRACK_TEST_PG_PASSWORD:-fallback}"
"#,
    )
    .unwrap();

    let config = load_config(Some(&path)).unwrap();
    assert_eq!(config.server.port, 8080);
    assert_eq!(config.server.host, "0.0.0.0");
    assert_eq!(config.auth.token_ttl_secs, 600);
    assert_eq!(config.auth.superadmin.email, "root@tracker.test");
    assert_eq!(config.auth.superadmin.username, "superadmin");
    assert_eq!(config.storage.backend, StorageBackend::Postgres);

    let pg = config.storage.postgres.as_ref().unwrap();
    assert_eq!(pg.host, "db");
    assert_eq!(pg.password, "fallback");
    assert!(config.validate().is_ok());
}

#[test]
fn test_unset_secret_fails_validation() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("commtrack.toml");
    fs::write(
        &path,
        "[auth]\njwt_secret = \"${COMMTRACK_TEST_UNSET_SECRET}\"\n\n[auth.superadmin]\npassword = \"root\"\n",
    )
    .unwrap();

    let config = load_config(Some(&path)).unwrap();
    assert!(config.auth.jwt_secret.is_empty());
    assert!(matches!(config.validate(), Err(Error::Config(_))));
}

#[test]
fn test_default_template_loads() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("commtrack.toml");
    fs::write(&path, loader::default_config_content()).unwrap();

    let config = load_config(Some(&path)).unwrap();
    assert_eq!(config.storage.backend, StorageBackend::Memory);
    assert!(!config.auth.protect_tracking_routes);
}

#[test]
fn test_missing_file() {
    let dir = TempDir::new().unwrap();
    let err = load_config(Some(&dir.path().join("absent.toml"))).unwrap_err();
    assert!(matches!(err, Error::ConfigNotFound));
}

#[test]
fn test_invalid_toml() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("commtrack.toml");
    fs::write(&path, "this is [ not valid toml").unwrap();

    let err = load_config(Some(&path)).unwrap_err();
    assert!(matches!(err, Error::TomlParse(_)));
}

#[test]
fn test_unknown_storage_backend_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("commtrack.toml");
    fs::write(&path, "[storage]\nbackend = \"mongo\"\n").unwrap();

    assert!(load_config(Some(&path)).is_err());
}

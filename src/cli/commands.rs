//! CLI command implementations

use anyhow::Result;
use chrono::Utc;
use serde::Serialize;
use std::fs;
use std::path::Path;

use crate::cli::{
    info, print_dashboard_table, print_notifications_table, success, warn, OutputFormat,
};
use crate::config::{self, loader::CONFIG_FILENAME, Config, StorageBackend};
use crate::tracking;

/// Initialize a new commtrack.toml configuration file
pub async fn init() -> Result<()> {
    let config_path = Path::new(CONFIG_FILENAME);

    if config_path.exists() {
        warn(&format!("{} already exists", CONFIG_FILENAME));
        return Ok(());
    }

    fs::write(config_path, config::loader::default_config_content())?;

    success(&format!("Created {}", CONFIG_FILENAME));
    info("Set JWT_SECRET and SUPERADMIN_PASSWORD, then run 'commtrack serve'");

    Ok(())
}

/// Start the HTTP API server
pub async fn serve(config_path: Option<&Path>, host: Option<String>, port: Option<u16>) -> Result<()> {
    let config = load_config(config_path)?;
    let host = host.unwrap_or_else(|| config.server.host.clone());
    let port = port.unwrap_or(config.server.port);

    info(&format!("Starting server at http://{}:{}", host, port));

    crate::api::run_server(config, &host, port).await?;
    Ok(())
}

/// Run the startup migration on its own
pub async fn migrate(config_path: Option<&Path>) -> Result<()> {
    let config = load_config(config_path)?;
    let in_memory = config.storage.backend == StorageBackend::Memory;

    crate::api::prepare_state(config).await?;

    if in_memory {
        warn("Storage backend is 'memory'; nothing was persisted");
    } else {
        success("Migration complete");
    }
    Ok(())
}

/// Show overdue and due-today communications
pub async fn notifications(config_path: Option<&Path>, format: OutputFormat) -> Result<()> {
    let state = crate::api::prepare_state(load_config(config_path)?).await?;
    let notifications = tracking::compute_notifications(state.store.as_ref(), Utc::now()).await?;

    match format {
        OutputFormat::Table => print_notifications_table(&notifications),
        _ => print_structured(&notifications, format)?,
    }
    Ok(())
}

/// Show the per-company dashboard
pub async fn dashboard(config_path: Option<&Path>, format: OutputFormat) -> Result<()> {
    let state = crate::api::prepare_state(load_config(config_path)?).await?;
    let dashboard = tracking::compute_dashboard(state.store.as_ref(), Utc::now()).await?;

    match format {
        OutputFormat::Table => print_dashboard_table(&dashboard),
        _ => print_structured(&dashboard, format)?,
    }
    Ok(())
}

fn print_structured<T: Serialize>(value: &T, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(value)?),
        OutputFormat::Yaml => println!("{}", serde_yaml::to_string(value)?),
        OutputFormat::Table => {}
    }
    Ok(())
}

// Helper functions

fn load_config(path: Option<&Path>) -> Result<Config> {
    Ok(config::load_config(path)?)
}

//! One-time startup migration
//!
//! Runs before the server accepts traffic (or on its own via
//! `commtrack migrate`). Every step checks before it writes, so running it
//! again is a no-op.

use crate::auth::Authenticator;
use crate::config::Config;
use crate::error::Result;
use crate::store::Store;
use crate::tracking::methods::default_methods;

/// What a migration run changed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MigrationReport {
    pub superadmin_created: bool,
    pub methods_seeded: usize,
}

/// Insert the default communication methods if the collection is empty
pub async fn seed_default_methods(store: &dyn Store) -> Result<usize> {
    if !store.list_methods().await?.is_empty() {
        tracing::info!("Default communication methods already exist.");
        return Ok(0);
    }

    let methods = default_methods();
    store.insert_methods(&methods).await?;
    tracing::info!("Default communication methods initialized.");
    Ok(methods.len())
}

/// Prepare storage, ensure the superadmin exists and seed default methods
pub async fn migrate(
    store: &dyn Store,
    auth: &Authenticator,
    config: &Config,
) -> Result<MigrationReport> {
    store.prepare().await?;

    let superadmin_created = auth.ensure_superadmin(&config.auth.superadmin).await?;
    let methods_seeded = seed_default_methods(store).await?;

    Ok(MigrationReport {
        superadmin_created,
        methods_seeded,
    })
}

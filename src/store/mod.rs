//! Persistence for users, companies, methods and communication logs
//!
//! Handlers and services talk to a [`Store`] trait object. Each call is a
//! single find/insert/update/delete against one collection; nothing here
//! spans documents or holds a transaction open.

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::PostgresStore;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::auth::{Role, User};
use crate::config::{StorageBackend, StorageConfig};
use crate::error::{Error, Result};
use crate::tracking::{Company, CommunicationLog, CommunicationMethod};

pub type SharedStore = Arc<dyn Store>;

#[async_trait]
pub trait Store: Send + Sync {
    /// Create tables or indexes the backend needs. Idempotent.
    async fn prepare(&self) -> Result<()> {
        Ok(())
    }

    // Users

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>>;
    async fn find_user_by_role(&self, role: Role) -> Result<Option<User>>;
    async fn insert_user(&self, user: &User) -> Result<()>;

    // Companies

    async fn list_companies(&self) -> Result<Vec<Company>>;
    async fn get_company(&self, id: &str) -> Result<Option<Company>>;
    async fn insert_company(&self, company: &Company) -> Result<()>;
    /// Replace a stored company. Returns false when the id is unknown.
    async fn update_company(&self, company: &Company) -> Result<bool>;
    /// Returns false when the id is unknown. Logs are left in place.
    async fn delete_company(&self, id: &str) -> Result<bool>;

    // Communication methods

    /// All methods ordered by sequence
    async fn list_methods(&self) -> Result<Vec<CommunicationMethod>>;
    async fn insert_methods(&self, methods: &[CommunicationMethod]) -> Result<()>;
    async fn update_method(&self, method: &CommunicationMethod) -> Result<bool>;
    async fn delete_method(&self, id: &str) -> Result<bool>;

    // Communication logs

    async fn insert_log(&self, log: &CommunicationLog) -> Result<()>;
    /// Every log, ascending by date
    async fn list_logs(&self) -> Result<Vec<CommunicationLog>>;
    /// Logs dated at or before `until`
    async fn logs_until(&self, until: DateTime<Utc>) -> Result<Vec<CommunicationLog>>;
    /// A company's logs dated strictly before `before`, newest first
    async fn recent_logs(
        &self,
        company_id: &str,
        before: DateTime<Utc>,
        limit: usize,
    ) -> Result<Vec<CommunicationLog>>;
    /// The earliest log for a company dated at or after `from`
    async fn next_log(
        &self,
        company_id: &str,
        from: DateTime<Utc>,
    ) -> Result<Option<CommunicationLog>>;
}

/// Open the configured backend. Connection failures are returned so the
/// caller can abort startup.
pub async fn open(config: &StorageConfig) -> Result<SharedStore> {
    match config.backend {
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage; records are lost on restart");
            Ok(Arc::new(MemoryStore::new()))
        }
        StorageBackend::Postgres => {
            let pg = config.postgres.as_ref().ok_or_else(|| {
                Error::Config("storage.postgres section is required".to_string())
            })?;
            Ok(Arc::new(PostgresStore::connect(pg).await?))
        }
    }
}

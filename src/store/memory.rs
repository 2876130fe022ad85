//! In-process store backed by hash maps

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::Store;
use crate::auth::{Role, User};
use crate::error::Result;
use crate::tracking::{Company, CommunicationLog, CommunicationMethod};

#[derive(Default)]
struct Collections {
    users: HashMap<String, User>,
    companies: HashMap<String, Company>,
    methods: HashMap<String, CommunicationMethod>,
    logs: HashMap<String, CommunicationLog>,
}

/// Store that keeps every collection in memory. Cloning shares the data.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<Collections>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn sorted_by_date(mut logs: Vec<CommunicationLog>) -> Vec<CommunicationLog> {
    logs.sort_by(|a, b| a.communication_date.cmp(&b.communication_date));
    logs
}

#[async_trait]
impl Store for MemoryStore {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let data = self.inner.read().await;
        Ok(data.users.values().find(|u| u.email == email).cloned())
    }

    async fn find_user_by_role(&self, role: Role) -> Result<Option<User>> {
        let data = self.inner.read().await;
        Ok(data.users.values().find(|u| u.role == role).cloned())
    }

    async fn insert_user(&self, user: &User) -> Result<()> {
        self.inner
            .write()
            .await
            .users
            .insert(user.id.clone(), user.clone());
        Ok(())
    }

    async fn list_companies(&self) -> Result<Vec<Company>> {
        let data = self.inner.read().await;
        let mut companies: Vec<Company> = data.companies.values().cloned().collect();
        companies.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(companies)
    }

    async fn get_company(&self, id: &str) -> Result<Option<Company>> {
        Ok(self.inner.read().await.companies.get(id).cloned())
    }

    async fn insert_company(&self, company: &Company) -> Result<()> {
        self.inner
            .write()
            .await
            .companies
            .insert(company.id.clone(), company.clone());
        Ok(())
    }

    async fn update_company(&self, company: &Company) -> Result<bool> {
        let mut data = self.inner.write().await;
        match data.companies.get_mut(&company.id) {
            Some(stored) => {
                *stored = company.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_company(&self, id: &str) -> Result<bool> {
        Ok(self.inner.write().await.companies.remove(id).is_some())
    }

    async fn list_methods(&self) -> Result<Vec<CommunicationMethod>> {
        let data = self.inner.read().await;
        let mut methods: Vec<CommunicationMethod> = data.methods.values().cloned().collect();
        methods.sort_by_key(|m| m.sequence);
        Ok(methods)
    }

    async fn insert_methods(&self, methods: &[CommunicationMethod]) -> Result<()> {
        let mut data = self.inner.write().await;
        for method in methods {
            data.methods.insert(method.id.clone(), method.clone());
        }
        Ok(())
    }

    async fn update_method(&self, method: &CommunicationMethod) -> Result<bool> {
        let mut data = self.inner.write().await;
        match data.methods.get_mut(&method.id) {
            Some(stored) => {
                *stored = method.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_method(&self, id: &str) -> Result<bool> {
        Ok(self.inner.write().await.methods.remove(id).is_some())
    }

    async fn insert_log(&self, log: &CommunicationLog) -> Result<()> {
        self.inner
            .write()
            .await
            .logs
            .insert(log.id.clone(), log.clone());
        Ok(())
    }

    async fn list_logs(&self) -> Result<Vec<CommunicationLog>> {
        let data = self.inner.read().await;
        Ok(sorted_by_date(data.logs.values().cloned().collect()))
    }

    async fn logs_until(&self, until: DateTime<Utc>) -> Result<Vec<CommunicationLog>> {
        let data = self.inner.read().await;
        Ok(sorted_by_date(
            data.logs
                .values()
                .filter(|log| log.communication_date <= until)
                .cloned()
                .collect(),
        ))
    }

    async fn recent_logs(
        &self,
        company_id: &str,
        before: DateTime<Utc>,
        limit: usize,
    ) -> Result<Vec<CommunicationLog>> {
        let data = self.inner.read().await;
        let mut logs = sorted_by_date(
            data.logs
                .values()
                .filter(|log| log.company_id == company_id && log.communication_date < before)
                .cloned()
                .collect(),
        );
        logs.reverse();
        logs.truncate(limit);
        Ok(logs)
    }

    async fn next_log(
        &self,
        company_id: &str,
        from: DateTime<Utc>,
    ) -> Result<Option<CommunicationLog>> {
        let data = self.inner.read().await;
        Ok(data
            .logs
            .values()
            .filter(|log| log.company_id == company_id && log.communication_date >= from)
            .min_by_key(|log| log.communication_date)
            .cloned())
    }
}

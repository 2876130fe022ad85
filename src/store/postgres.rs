//! PostgreSQL-backed store

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio_postgres::{Client, NoTls, Row};

use super::Store;
use crate::auth::{Role, User};
use crate::config::PostgresConfig;
use crate::error::{Error, Result};
use crate::tracking::{Company, CommunicationLog, CommunicationMethod};

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id TEXT PRIMARY KEY,
    username TEXT NOT NULL,
    email TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL,
    role TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS companies (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    location TEXT,
    linkedin TEXT,
    emails TEXT[] NOT NULL DEFAULT '{}',
    phones TEXT[] NOT NULL DEFAULT '{}',
    comments TEXT,
    communication_periodicity TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS communication_methods (
    id TEXT PRIMARY KEY,
    method_type TEXT NOT NULL,
    description TEXT NOT NULL,
    sequence INTEGER NOT NULL,
    mandatory BOOLEAN NOT NULL
);

-- no foreign key: deleting a company keeps its logs
CREATE TABLE IF NOT EXISTS communication_logs (
    id TEXT PRIMARY KEY,
    company_id TEXT NOT NULL,
    communication_type TEXT NOT NULL,
    communication_date TIMESTAMPTZ NOT NULL,
    notes TEXT
);

CREATE INDEX IF NOT EXISTS communication_logs_company_date
    ON communication_logs (company_id, communication_date);
"#;

const LOG_COLUMNS: &str = "id, company_id, communication_type, communication_date, notes";
const COMPANY_COLUMNS: &str =
    "id, name, location, linkedin, emails, phones, comments, communication_periodicity";

/// Store backed by a single PostgreSQL connection
pub struct PostgresStore {
    client: Client,
}

impl PostgresStore {
    /// Connect and spawn the connection driver
    pub async fn connect(config: &PostgresConfig) -> Result<Self> {
        let (client, connection) =
            tokio_postgres::connect(&config.connection_string(), NoTls).await?;

        tokio::spawn(async move {
            if let Err(e) = connection.await {
                tracing::error!("PostgreSQL connection error: {}", e);
            }
        });

        tracing::info!(
            "Connected to PostgreSQL at {}:{}/{}",
            config.host,
            config.port,
            config.dbname
        );

        Ok(Self { client })
    }
}

fn user_from_row(row: &Row) -> Result<User> {
    let role: String = row.get("role");
    Ok(User {
        id: row.get("id"),
        username: row.get("username"),
        email: row.get("email"),
        password_hash: row.get("password_hash"),
        role: role.parse().map_err(Error::Internal)?,
    })
}

fn company_from_row(row: &Row) -> Company {
    Company {
        id: row.get("id"),
        name: row.get("name"),
        location: row.get("location"),
        linkedin: row.get("linkedin"),
        emails: row.get("emails"),
        phones: row.get("phones"),
        comments: row.get("comments"),
        communication_periodicity: row.get("communication_periodicity"),
    }
}

fn method_from_row(row: &Row) -> CommunicationMethod {
    CommunicationMethod {
        id: row.get("id"),
        method_type: row.get("method_type"),
        description: row.get("description"),
        sequence: row.get("sequence"),
        mandatory: row.get("mandatory"),
    }
}

fn log_from_row(row: &Row) -> CommunicationLog {
    CommunicationLog {
        id: row.get("id"),
        company_id: row.get("company_id"),
        communication_type: row.get("communication_type"),
        communication_date: row.get("communication_date"),
        notes: row.get("notes"),
    }
}

#[async_trait]
impl Store for PostgresStore {
    async fn prepare(&self) -> Result<()> {
        self.client.batch_execute(SCHEMA).await?;
        tracing::debug!("Database schema is up to date");
        Ok(())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let row = self
            .client
            .query_opt(
                "SELECT id, username, email, password_hash, role FROM users WHERE email = $1",
                &[&email],
            )
            .await?;
        row.as_ref().map(user_from_row).transpose()
    }

    async fn find_user_by_role(&self, role: Role) -> Result<Option<User>> {
        let role = role.to_string();
        let row = self
            .client
            .query_opt(
                "SELECT id, username, email, password_hash, role FROM users WHERE role = $1 LIMIT 1",
                &[&role],
            )
            .await?;
        row.as_ref().map(user_from_row).transpose()
    }

    async fn insert_user(&self, user: &User) -> Result<()> {
        let role = user.role.to_string();
        self.client
            .execute(
                "INSERT INTO users (id, username, email, password_hash, role) VALUES ($1, $2, $3, $4, $5)",
                &[&user.id, &user.username, &user.email, &user.password_hash, &role],
            )
            .await?;
        Ok(())
    }

    async fn list_companies(&self) -> Result<Vec<Company>> {
        let rows = self
            .client
            .query(
                &format!("SELECT {} FROM companies ORDER BY name", COMPANY_COLUMNS),
                &[],
            )
            .await?;
        Ok(rows.iter().map(company_from_row).collect())
    }

    async fn get_company(&self, id: &str) -> Result<Option<Company>> {
        let row = self
            .client
            .query_opt(
                &format!("SELECT {} FROM companies WHERE id = $1", COMPANY_COLUMNS),
                &[&id],
            )
            .await?;
        Ok(row.as_ref().map(company_from_row))
    }

    async fn insert_company(&self, company: &Company) -> Result<()> {
        self.client
            .execute(
                "INSERT INTO companies (id, name, location, linkedin, emails, phones, comments, communication_periodicity) \
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
                &[
                    &company.id,
                    &company.name,
                    &company.location,
                    &company.linkedin,
                    &company.emails,
                    &company.phones,
                    &company.comments,
                    &company.communication_periodicity,
                ],
            )
            .await?;
        Ok(())
    }

    async fn update_company(&self, company: &Company) -> Result<bool> {
        let updated = self
            .client
            .execute(
                "UPDATE companies SET name = $2, location = $3, linkedin = $4, emails = $5, \
                 phones = $6, comments = $7, communication_periodicity = $8 WHERE id = $1",
                &[
                    &company.id,
                    &company.name,
                    &company.location,
                    &company.linkedin,
                    &company.emails,
                    &company.phones,
                    &company.comments,
                    &company.communication_periodicity,
                ],
            )
            .await?;
        Ok(updated > 0)
    }

    async fn delete_company(&self, id: &str) -> Result<bool> {
        let deleted = self
            .client
            .execute("DELETE FROM companies WHERE id = $1", &[&id])
            .await?;
        Ok(deleted > 0)
    }

    async fn list_methods(&self) -> Result<Vec<CommunicationMethod>> {
        let rows = self
            .client
            .query(
                "SELECT id, method_type, description, sequence, mandatory \
                 FROM communication_methods ORDER BY sequence",
                &[],
            )
            .await?;
        Ok(rows.iter().map(method_from_row).collect())
    }

    async fn insert_methods(&self, methods: &[CommunicationMethod]) -> Result<()> {
        for method in methods {
            self.client
                .execute(
                    "INSERT INTO communication_methods (id, method_type, description, sequence, mandatory) \
                     VALUES ($1, $2, $3, $4, $5)",
                    &[
                        &method.id,
                        &method.method_type,
                        &method.description,
                        &method.sequence,
                        &method.mandatory,
                    ],
                )
                .await?;
        }
        Ok(())
    }

    async fn update_method(&self, method: &CommunicationMethod) -> Result<bool> {
        let updated = self
            .client
            .execute(
                "UPDATE communication_methods SET method_type = $2, description = $3, \
                 sequence = $4, mandatory = $5 WHERE id = $1",
                &[
                    &method.id,
                    &method.method_type,
                    &method.description,
                    &method.sequence,
                    &method.mandatory,
                ],
            )
            .await?;
        Ok(updated > 0)
    }

    async fn delete_method(&self, id: &str) -> Result<bool> {
        let deleted = self
            .client
            .execute("DELETE FROM communication_methods WHERE id = $1", &[&id])
            .await?;
        Ok(deleted > 0)
    }

    async fn insert_log(&self, log: &CommunicationLog) -> Result<()> {
        self.client
            .execute(
                "INSERT INTO communication_logs (id, company_id, communication_type, communication_date, notes) \
                 VALUES ($1, $2, $3, $4, $5)",
                &[
                    &log.id,
                    &log.company_id,
                    &log.communication_type,
                    &log.communication_date,
                    &log.notes,
                ],
            )
            .await?;
        Ok(())
    }

    async fn list_logs(&self) -> Result<Vec<CommunicationLog>> {
        let rows = self
            .client
            .query(
                &format!(
                    "SELECT {} FROM communication_logs ORDER BY communication_date",
                    LOG_COLUMNS
                ),
                &[],
            )
            .await?;
        Ok(rows.iter().map(log_from_row).collect())
    }

    async fn logs_until(&self, until: DateTime<Utc>) -> Result<Vec<CommunicationLog>> {
        let rows = self
            .client
            .query(
                &format!(
                    "SELECT {} FROM communication_logs WHERE communication_date <= $1 \
                     ORDER BY communication_date",
                    LOG_COLUMNS
                ),
                &[&until],
            )
            .await?;
        Ok(rows.iter().map(log_from_row).collect())
    }

    async fn recent_logs(
        &self,
        company_id: &str,
        before: DateTime<Utc>,
        limit: usize,
    ) -> Result<Vec<CommunicationLog>> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let rows = self
            .client
            .query(
                &format!(
                    "SELECT {} FROM communication_logs \
                     WHERE company_id = $1 AND communication_date < $2 \
                     ORDER BY communication_date DESC LIMIT $3",
                    LOG_COLUMNS
                ),
                &[&company_id, &before, &limit],
            )
            .await?;
        Ok(rows.iter().map(log_from_row).collect())
    }

    async fn next_log(
        &self,
        company_id: &str,
        from: DateTime<Utc>,
    ) -> Result<Option<CommunicationLog>> {
        let row = self
            .client
            .query_opt(
                &format!(
                    "SELECT {} FROM communication_logs \
                     WHERE company_id = $1 AND communication_date >= $2 \
                     ORDER BY communication_date ASC LIMIT 1",
                    LOG_COLUMNS
                ),
                &[&company_id, &from],
            )
            .await?;
        Ok(row.as_ref().map(log_from_row))
    }
}

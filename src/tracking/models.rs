//! Company, method and log records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const DEFAULT_PERIODICITY: &str = "2 weeks";

/// A company whose communications are tracked
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub id: String,
    pub name: String,
    pub location: Option<String>,
    pub linkedin: Option<String>,
    #[serde(default)]
    pub emails: Vec<String>,
    #[serde(default)]
    pub phones: Vec<String>,
    pub comments: Option<String>,
    pub communication_periodicity: String,
}

impl Company {
    /// Create a company with only a name set
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            location: None,
            linkedin: None,
            emails: Vec::new(),
            phones: Vec::new(),
            comments: None,
            communication_periodicity: DEFAULT_PERIODICITY.to_string(),
        }
    }
}

/// A channel used to reach a company (email, call, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommunicationMethod {
    pub id: String,
    #[serde(rename = "type")]
    pub method_type: String,
    pub description: String,
    /// Ordering key
    pub sequence: i32,
    pub mandatory: bool,
}

impl CommunicationMethod {
    pub fn new(method_type: &str, description: &str, sequence: i32, mandatory: bool) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            method_type: method_type.to_string(),
            description: description.to_string(),
            sequence,
            mandatory,
        }
    }
}

/// A recorded or scheduled communication with a company. Never modified
/// after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommunicationLog {
    pub id: String,
    pub company_id: String,
    pub communication_type: String,
    pub communication_date: DateTime<Utc>,
    pub notes: Option<String>,
}

impl CommunicationLog {
    pub fn new(
        company_id: impl Into<String>,
        communication_type: impl Into<String>,
        communication_date: DateTime<Utc>,
        notes: Option<String>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            company_id: company_id.into(),
            communication_type: communication_type.into(),
            communication_date,
            notes,
        }
    }
}

/// Body of company create/update requests
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyInput {
    pub name: Option<String>,
    pub location: Option<String>,
    pub linkedin: Option<String>,
    pub emails: Option<Vec<String>>,
    pub phones: Option<Vec<String>>,
    pub comments: Option<String>,
    pub communication_periodicity: Option<String>,
}

/// Body of method create/update requests
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MethodInput {
    #[serde(rename = "type")]
    pub method_type: Option<String>,
    pub description: Option<String>,
    pub sequence: Option<i32>,
    pub mandatory: Option<bool>,
}

/// Body of a communication log request. The date stays a string until
/// validation so parse failures can be reported separately from absence.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommunicationInput {
    pub company_id: Option<String>,
    pub communication_type: Option<String>,
    pub communication_date: Option<String>,
    pub notes: Option<String>,
}

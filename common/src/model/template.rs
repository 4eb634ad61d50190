use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Metadata of a stored report template.
///
/// The definition payload itself never leaves the backend; clients only see
/// the checksum of what was uploaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportTemplate {
    pub id: Uuid,
    /// Unique lookup key.
    pub name: String,
    pub description: Option<String>,
    /// MD5 hex digest of the uploaded definition.
    pub checksum: String,
    pub created_by: Option<Uuid>,
    pub created_date: DateTime<Utc>,
}

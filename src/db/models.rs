//! Database models for stored reports

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use sqlx::FromRow;

use super::DbError;

/// One stored report of any kind. The report body is the serialized domain
/// type; the surrounding columns exist for lookup and ordering only.
#[derive(Debug, Clone, FromRow)]
pub struct ReportRow {
    pub id: String,
    pub url: String,
    pub report: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

impl ReportRow {
    /// Deserialize the stored body back into its domain type
    pub fn into_domain<T: DeserializeOwned>(self) -> Result<T, DbError> {
        serde_json::from_value(self.report)
            .map_err(|e| DbError::Serialization(format!("stored report {}: {}", self.id, e)))
    }
}

//! Repository for report persistence

use serde::Serialize;
use sqlx::PgPool;

use super::models::ReportRow;
use super::DbError;
use crate::model::{AuditReport, CompetitiveReport, ContentTemplateReport};

const RECENT_ANALYSES_LIMIT: i64 = 50;

/// Repository over the three report tables
#[derive(Clone)]
pub struct ReportRepository {
    pool: PgPool,
}

impl ReportRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Store a completed audit report
    pub async fn insert_analysis(&self, report: &AuditReport) -> Result<(), DbError> {
        self.insert("audit_reports", &report.id, &report.url, report)
            .await
    }

    /// Fetch one audit report by ID
    pub async fn get_analysis(&self, id: &str) -> Result<AuditReport, DbError> {
        let row: ReportRow = sqlx::query_as("SELECT * FROM audit_reports WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DbError::NotFound(id.to_string()))?;

        row.into_domain()
    }

    /// Most recent audit reports, newest first
    pub async fn list_recent_analyses(&self) -> Result<Vec<AuditReport>, DbError> {
        let rows: Vec<ReportRow> =
            sqlx::query_as("SELECT * FROM audit_reports ORDER BY created_at DESC LIMIT $1")
                .bind(RECENT_ANALYSES_LIMIT)
                .fetch_all(&self.pool)
                .await?;

        rows.into_iter().map(ReportRow::into_domain).collect()
    }

    /// Store a completed competitive comparison
    pub async fn insert_competitor(&self, report: &CompetitiveReport) -> Result<(), DbError> {
        self.insert(
            "competitor_reports",
            &report.id,
            &report.primary_url,
            report,
        )
        .await
    }

    /// Store a generated content template package
    pub async fn insert_template(&self, report: &ContentTemplateReport) -> Result<(), DbError> {
        self.insert("content_templates", &report.id, &report.url, report)
            .await
    }

    async fn insert<T: Serialize>(
        &self,
        table: &str,
        id: &str,
        url: &str,
        report: &T,
    ) -> Result<(), DbError> {
        let body = serde_json::to_value(report)
            .map_err(|e| DbError::Serialization(format!("report {}: {}", id, e)))?;

        sqlx::query(&format!(
            "INSERT INTO {table} (id, url, report) VALUES ($1, $2, $3)",
        ))
        .bind(id)
        .bind(url)
        .bind(&body)
        .execute(&self.pool)
        .await?;

        tracing::debug!(id = %id, table = table, "Stored report");
        Ok(())
    }
}

//! Audit orchestrator
//!
//! Fans out the tiered audit probe, responsive screenshot capture, and content
//! scan concurrently, then assembles the full report. The probe, screenshots,
//! and scan each degrade internally; only persistence can fail the request.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::db::{DbError, ReportRepository};
use crate::model::AuditReport;
use crate::probe::TieredAuditRunner;
use crate::service::content::ContentScanner;
use crate::service::issues::extract_issues;
use crate::service::scoring::aggregate;
use crate::service::screenshot::ScreenshotCapturer;
use crate::service::suggestion::{self, SuggestionService};

#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("failed to store audit report: {0}")]
    Storage(#[from] DbError),
}

#[derive(Clone)]
pub struct AnalysisService {
    runner: Arc<TieredAuditRunner>,
    capturer: Arc<ScreenshotCapturer>,
    scanner: ContentScanner,
    suggestions: Option<SuggestionService>,
    repository: ReportRepository,
}

impl AnalysisService {
    pub fn new(
        runner: TieredAuditRunner,
        capturer: ScreenshotCapturer,
        scanner: ContentScanner,
        suggestions: Option<SuggestionService>,
        repository: ReportRepository,
    ) -> Self {
        Self {
            runner: Arc::new(runner),
            capturer: Arc::new(capturer),
            scanner,
            suggestions,
            repository,
        }
    }

    /// Run the full audit for one URL and persist the report
    pub async fn analyze(&self, url: &str) -> Result<AuditReport, AnalysisError> {
        tracing::info!(url = %url, "Starting audit");

        let (probe, screenshots, content) = tokio::join!(
            self.runner.run(url),
            self.capturer.capture(url),
            self.scanner.scan(url),
        );

        let issues = extract_issues(&probe);
        let summary = aggregate(&probe, content.keywords.len(), content.backlinks.len());

        let suggestions = match &self.suggestions {
            Some(service) => {
                service
                    .generate(
                        url,
                        &probe,
                        &content.keywords,
                        content.backlinks.len(),
                        &issues,
                    )
                    .await
            }
            None => suggestion::placeholder_suggestions(
                &probe,
                &issues,
                suggestion::UNCONFIGURED_REASON,
            ),
        };

        let report = AuditReport {
            id: Uuid::new_v4().to_string(),
            url: url.to_string(),
            probe,
            screenshots,
            keywords: content.keywords,
            backlinks: content.backlinks,
            issues,
            suggestions,
            summary,
            created_at: Utc::now(),
        };

        self.repository.insert_analysis(&report).await?;

        tracing::info!(
            url = %url,
            id = %report.id,
            tier = ?report.probe.tier,
            score = report.summary.overall_score,
            "Audit completed"
        );

        Ok(report)
    }

    /// Fetch one stored report by ID
    pub async fn get(&self, id: &str) -> Result<AuditReport, AnalysisError> {
        Ok(self.repository.get_analysis(id).await?)
    }

    /// Most recent stored reports, newest first
    pub async fn list_recent(&self) -> Result<Vec<AuditReport>, AnalysisError> {
        Ok(self.repository.list_recent_analyses().await?)
    }
}

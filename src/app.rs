//! Application state and service initialization
//!
//! This module centralizes all service initialization and dependency injection,
//! making it easier to manage the application lifecycle and test services.

use std::sync::Arc;

use sqlx::PgPool;

use crate::db::ReportRepository;
use crate::model::Config;
use crate::probe::TieredAuditRunner;
use crate::service::{
    AnalysisService, CompetitorService, ContentScanner, LlmClient, ScreenshotCapturer,
    SuggestionService, TemplateService,
};

/// Application state containing all services and shared resources
///
/// This struct centralizes service initialization and makes it easy to inject
/// dependencies into Actix-web handlers.
pub struct AppState {
    /// Database connection pool
    pub db_pool: Arc<PgPool>,
    /// Full site audit service
    pub analysis: AnalysisService,
    /// Competitive comparison service
    pub competitors: CompetitorService,
    /// Content template generation service
    pub templates: TemplateService,
}

impl AppState {
    /// Initialize all services and build application state
    ///
    /// This performs:
    /// 1. Database connection and schema initialization
    /// 2. LLM client initialization (optional, requires OPENAI_API_KEY)
    /// 3. Service dependency graph construction
    pub async fn new(config: &Config) -> Result<Self, AppError> {
        // Initialize PostgreSQL database
        let db_pool = crate::db::create_pool()
            .await
            .map_err(|e| AppError::DatabaseInit(e.to_string()))?;

        // Initialize database schema
        crate::db::init_schema(&db_pool)
            .await
            .map_err(|e| AppError::DatabaseInit(e.to_string()))?;

        // LLM client is optional; every consumer degrades to placeholder text
        let llm = match std::env::var("OPENAI_API_KEY") {
            Ok(api_key) => match LlmClient::new(&api_key) {
                Ok(client) => Some(client),
                Err(e) => {
                    tracing::warn!(error = %e, "LLM client init failed, suggestions disabled");
                    None
                }
            },
            Err(_) => {
                tracing::warn!("OPENAI_API_KEY not set, suggestions disabled");
                None
            }
        };

        let repository = ReportRepository::new(db_pool.clone());
        let scanner = ContentScanner::new().map_err(|e| AppError::HttpClientInit(e.to_string()))?;
        let suggestions = llm.clone().map(SuggestionService::new);

        let analysis = AnalysisService::new(
            TieredAuditRunner::new(&config.probe),
            ScreenshotCapturer::new(config.probe.navigation_timeout()),
            scanner.clone(),
            suggestions.clone(),
            repository.clone(),
        );

        let competitors =
            CompetitorService::new(scanner.clone(), suggestions, repository.clone());

        let templates = TemplateService::new(scanner, llm, repository);

        Ok(Self {
            db_pool: Arc::new(db_pool),
            analysis,
            competitors,
            templates,
        })
    }
}

/// Application-level errors
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum AppError {
    /// Database initialization failed
    #[error("Database initialization failed: {0}")]
    DatabaseInit(String),

    /// HTTP client initialization failed
    #[error("HTTP client initialization failed: {0}")]
    HttpClientInit(String),
}

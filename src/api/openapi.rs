//! OpenAPI specification endpoints

use actix_web::{get, HttpResponse, Responder};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "SEO Audit Agent API",
        description = "Site auditing, competitive comparison, and content template generation"
    ),
    paths(
        crate::api::analysis::analyze,
        crate::api::analysis::get_analysis,
        crate::api::analysis::list_analyses,
        crate::api::competitor::competitor_analysis,
        crate::api::template::seo_content_template,
        crate::api::health::liveness,
        crate::api::health::readiness,
    ),
    components(schemas(
        crate::api::analysis::AnalyzeRequest,
        crate::api::competitor::CompetitorAnalysisRequest,
        crate::api::template::SeoContentTemplateRequest,
        crate::api::error::ErrorResponse,
        crate::api::health::HealthStatus,
        crate::api::health::ReadinessStatus,
        crate::api::health::DependencyHealth,
        crate::model::AuditReport,
        crate::model::ProbeResult,
        crate::model::AuditMetric,
        crate::model::CategoryScores,
        crate::model::Category,
        crate::model::Tier,
        crate::model::Issue,
        crate::model::Severity,
        crate::model::Screenshot,
        crate::model::CategorySuggestions,
        crate::model::Priority,
        crate::model::Grade,
        crate::model::PerformanceSummary,
        crate::model::CompetitiveReport,
        crate::model::CompetitiveInsights,
        crate::model::SiteScan,
        crate::model::ContentTemplateReport,
        crate::model::ContentTemplate,
        crate::model::KeywordStrategy,
        crate::model::ContentOutline,
    )),
    tags(
        (name = "analysis", description = "Site audit endpoints"),
        (name = "competitors", description = "Competitive comparison endpoints"),
        (name = "templates", description = "Content template endpoints"),
        (name = "health", description = "Health probe endpoints")
    )
)]
pub struct ApiDoc;

/// Serve OpenAPI JSON specification
#[get("/openapi.json")]
pub async fn openapi_json() -> impl Responder {
    HttpResponse::Ok().json(ApiDoc::openapi())
}

/// Serve OpenAPI YAML specification
#[get("/openapi.yaml")]
pub async fn openapi_yaml() -> impl Responder {
    HttpResponse::Ok()
        .content_type("text/yaml")
        .body(ApiDoc::openapi().to_yaml().unwrap_or_default())
}

/// Configure OpenAPI routes
pub fn configure(cfg: &mut actix_web::web::ServiceConfig) {
    cfg.service(openapi_json).service(openapi_yaml);
}

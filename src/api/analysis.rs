//! REST API endpoints for site audits

use actix_web::{get, post, web, HttpResponse};
use serde::Deserialize;
use url::Url;
use utoipa::ToSchema;

use crate::api::error::ApiError;
use crate::model::AuditReport;
use crate::service::AnalysisService;

/// Request body for starting a site audit
#[derive(Debug, Deserialize, ToSchema)]
pub struct AnalyzeRequest {
    /// Absolute http(s) URL of the page to audit
    pub url: String,
}

/// Reject anything that is not an absolute http(s) URL
pub fn validate_url(raw: &str) -> Result<(), ApiError> {
    let parsed =
        Url::parse(raw).map_err(|e| ApiError::BadRequest(format!("invalid url: {}", e)))?;

    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(ApiError::BadRequest(format!(
            "unsupported url scheme: {}",
            other
        ))),
    }
}

/// Run a full audit of one page
#[utoipa::path(
    post,
    path = "/api/analyze",
    request_body = AnalyzeRequest,
    responses(
        (status = 200, description = "Audit completed", body = AuditReport),
        (status = 400, description = "Invalid URL", body = crate::api::error::ErrorResponse),
        (status = 500, description = "Audit could not be stored", body = crate::api::error::ErrorResponse)
    ),
    tag = "analysis"
)]
#[post("/api/analyze")]
pub async fn analyze(
    service: web::Data<AnalysisService>,
    request: web::Json<AnalyzeRequest>,
) -> Result<HttpResponse, ApiError> {
    validate_url(&request.url)?;

    let report = service.analyze(&request.url).await?;
    Ok(HttpResponse::Ok().json(report))
}

/// Fetch a stored audit report by ID
#[utoipa::path(
    get,
    path = "/api/analysis/{id}",
    params(
        ("id" = String, Path, description = "Audit report ID")
    ),
    responses(
        (status = 200, description = "Report found", body = AuditReport),
        (status = 404, description = "Report not found", body = crate::api::error::ErrorResponse)
    ),
    tag = "analysis"
)]
#[get("/api/analysis/{id}")]
pub async fn get_analysis(
    service: web::Data<AnalysisService>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let report = service.get(&id).await?;
    Ok(HttpResponse::Ok().json(report))
}

/// List the most recent audit reports
#[utoipa::path(
    get,
    path = "/api/analyses",
    responses(
        (status = 200, description = "Recent reports, newest first", body = [AuditReport])
    ),
    tag = "analysis"
)]
#[get("/api/analyses")]
pub async fn list_analyses(
    service: web::Data<AnalysisService>,
) -> Result<HttpResponse, ApiError> {
    let reports = service.list_recent().await?;
    Ok(HttpResponse::Ok().json(reports))
}

/// Configure analysis routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(analyze).service(get_analysis).service(list_analyses);
}

//! REST API endpoint for competitive comparison

use actix_web::{post, web, HttpResponse};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::api::analysis::validate_url;
use crate::api::error::ApiError;
use crate::model::CompetitiveReport;
use crate::service::CompetitorService;

/// Request body for comparing a site against competitors
#[derive(Debug, Deserialize, ToSchema)]
pub struct CompetitorAnalysisRequest {
    /// Absolute http(s) URL of the site being optimized
    pub primary_url: String,
    /// Competitor page URLs, scanned in the order given
    pub competitor_urls: Vec<String>,
}

/// Compare a primary site against its competitors
#[utoipa::path(
    post,
    path = "/api/competitor-analysis",
    request_body = CompetitorAnalysisRequest,
    responses(
        (status = 200, description = "Comparison completed", body = CompetitiveReport),
        (status = 400, description = "Invalid URL", body = crate::api::error::ErrorResponse),
        (status = 500, description = "Comparison could not be stored", body = crate::api::error::ErrorResponse)
    ),
    tag = "competitors"
)]
#[post("/api/competitor-analysis")]
pub async fn competitor_analysis(
    service: web::Data<CompetitorService>,
    request: web::Json<CompetitorAnalysisRequest>,
) -> Result<HttpResponse, ApiError> {
    validate_url(&request.primary_url)?;
    for url in &request.competitor_urls {
        validate_url(url)?;
    }

    let report = service
        .compare(&request.primary_url, &request.competitor_urls)
        .await?;
    Ok(HttpResponse::Ok().json(report))
}

/// Configure competitor routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(competitor_analysis);
}

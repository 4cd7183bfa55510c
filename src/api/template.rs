//! REST API endpoint for SEO content template generation

use actix_web::{post, web, HttpResponse};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::api::analysis::validate_url;
use crate::api::error::ApiError;
use crate::model::ContentTemplateReport;
use crate::service::TemplateService;

fn default_content_type() -> String {
    "article".to_string()
}

/// Request body for generating a content strategy package
#[derive(Debug, Deserialize, ToSchema)]
pub struct SeoContentTemplateRequest {
    /// Absolute http(s) URL of the page to build the template for
    pub url: String,
    /// Keywords the content should target, most important first
    pub target_keywords: Vec<String>,
    /// Kind of content to produce (default "article")
    #[serde(default = "default_content_type")]
    pub content_type: String,
}

/// Generate a content template, keyword strategy, and outline for a page
#[utoipa::path(
    post,
    path = "/api/seo-content-template",
    request_body = SeoContentTemplateRequest,
    responses(
        (status = 200, description = "Template generated", body = ContentTemplateReport),
        (status = 400, description = "Invalid URL", body = crate::api::error::ErrorResponse),
        (status = 500, description = "Template could not be stored", body = crate::api::error::ErrorResponse)
    ),
    tag = "templates"
)]
#[post("/api/seo-content-template")]
pub async fn seo_content_template(
    service: web::Data<TemplateService>,
    request: web::Json<SeoContentTemplateRequest>,
) -> Result<HttpResponse, ApiError> {
    validate_url(&request.url)?;

    let report = service
        .generate(&request.url, &request.target_keywords, &request.content_type)
        .await?;
    Ok(HttpResponse::Ok().json(report))
}

/// Configure content template routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(seo_content_template);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_type_defaults_to_article() {
        let request: SeoContentTemplateRequest = serde_json::from_str(
            r#"{"url": "https://example.com", "target_keywords": ["coffee"]}"#,
        )
        .unwrap();
        assert_eq!(request.content_type, "article");
    }

    #[test]
    fn explicit_content_type_is_kept() {
        let request: SeoContentTemplateRequest = serde_json::from_str(
            r#"{"url": "https://example.com", "target_keywords": [], "content_type": "blog"}"#,
        )
        .unwrap();
        assert_eq!(request.content_type, "blog");
    }
}

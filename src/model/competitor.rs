//! Domain model for competitive comparison and content templates

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Lightweight structural scan of one site, independent of the audit probe
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct SiteScan {
    pub url: String,
    pub title: String,
    pub meta_description: String,
    pub keywords: Vec<String>,
    pub backlinks: Vec<String>,
    pub h1_count: usize,
    pub h2_count: usize,
    pub h3_count: usize,
    pub word_count: usize,
    pub internal_links: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SiteScan {
    /// Empty scan representing a site that could not be fetched or parsed
    pub fn failed(url: &str, reason: String) -> Self {
        Self {
            url: url.to_string(),
            error: Some(reason),
            ..Self::default()
        }
    }
}

/// Narrative insights generated from the comparison, best-effort
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CompetitiveInsights {
    pub insights: Vec<String>,
    pub competitor_count: usize,
    pub analysis_date: DateTime<Utc>,
}

impl CompetitiveInsights {
    pub fn unavailable(competitor_count: usize, reason: &str) -> Self {
        Self {
            insights: vec![format!("AI insights unavailable: {}", reason)],
            competitor_count,
            analysis_date: Utc::now(),
        }
    }
}

/// Result of comparing a primary site against its competitors
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CompetitiveReport {
    pub id: String,
    pub primary_url: String,
    pub primary: SiteScan,
    pub competitors: Vec<SiteScan>,
    pub competitive_keywords: Vec<String>,
    pub content_gaps: Vec<String>,
    pub insights: CompetitiveInsights,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ContentTemplate {
    pub template: String,
    pub target_keywords: Vec<String>,
    pub content_type: String,
    pub recommended_length: String,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct KeywordStrategy {
    pub strategy: String,
    pub primary_keywords: Vec<String>,
    pub secondary_keywords: Vec<String>,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ContentOutline {
    pub outline: String,
    pub target_keywords: Vec<String>,
    pub content_type: String,
    pub estimated_sections: usize,
    pub generated_at: DateTime<Utc>,
}

/// Generated content-strategy package for a target page
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ContentTemplateReport {
    pub id: String,
    pub url: String,
    pub content_template: ContentTemplate,
    pub keyword_strategy: KeywordStrategy,
    pub content_outline: ContentOutline,
    pub created_at: DateTime<Utc>,
}

//! Domain model for single-site audit reports

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// The four audit categories every probe must score
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Performance,
    Accessibility,
    BestPractices,
    Seo,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Performance,
        Category::Accessibility,
        Category::BestPractices,
        Category::Seo,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Performance => "performance",
            Category::Accessibility => "accessibility",
            Category::BestPractices => "best_practices",
            Category::Seo => "seo",
        }
    }

    /// Human-readable label used in prompts
    pub fn label(&self) -> &'static str {
        match self {
            Category::Performance => "Performance",
            Category::Accessibility => "Accessibility",
            Category::BestPractices => "Best Practices",
            Category::Seo => "SEO",
        }
    }
}

/// Which fallback tier produced a probe result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Full,
    Reduced,
    Heuristic,
    Static,
}

/// Category scores in [0,1]. Missing categories default to 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CategoryScores {
    pub performance: f64,
    pub accessibility: f64,
    pub best_practices: f64,
    pub seo: f64,
}

impl CategoryScores {
    pub fn get(&self, category: Category) -> f64 {
        match category {
            Category::Performance => self.performance,
            Category::Accessibility => self.accessibility,
            Category::BestPractices => self.best_practices,
            Category::Seo => self.seo,
        }
    }

    pub fn mean(&self) -> f64 {
        (self.performance + self.accessibility + self.best_practices + self.seo) / 4.0
    }
}

/// One entry of the `audits` metric map, shaped like a lighthouse audit
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuditMetric {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub numeric_value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Object)]
    pub details: Option<serde_json::Value>,
}

impl AuditMetric {
    pub fn numeric(value: f64) -> Self {
        Self {
            numeric_value: Some(value),
            ..Self::default()
        }
    }
}

/// Normalized output of one audit probe, whichever tier produced it
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProbeResult {
    pub scores: CategoryScores,
    pub audits: BTreeMap<String, AuditMetric>,
    pub tier: Tier,
    pub degraded: bool,
}

/// Rule-derived deficiency statement for one category
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Issue {
    pub category: Category,
    pub message: String,
    pub severity: Severity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    High,
    Medium,
    Low,
}

/// One responsive screenshot. Image data is a PNG data URL, empty on failure.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Screenshot {
    pub device: String,
    pub width: u32,
    pub height: u32,
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

/// Narrative remediation advice for one category
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategorySuggestions {
    pub suggestions: Vec<String>,
    pub priority: Priority,
    pub current_score: f64,
    pub issues: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum Grade {
    A,
    B,
    C,
    D,
    F,
}

/// Aggregated scoring summary for a report
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PerformanceSummary {
    pub overall_score: f64,
    pub grade: Grade,
    pub keywords_found: usize,
    pub backlinks_found: usize,
    pub performance_score: f64,
    pub accessibility_score: f64,
    pub best_practices_score: f64,
    pub seo_score: f64,
}

/// The externally visible unit of work. Immutable once assembled.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuditReport {
    pub id: String,
    pub url: String,
    pub probe: ProbeResult,
    pub screenshots: Vec<Screenshot>,
    pub keywords: Vec<String>,
    pub backlinks: Vec<String>,
    pub issues: BTreeMap<Category, Vec<Issue>>,
    pub suggestions: BTreeMap<Category, CategorySuggestions>,
    pub summary: PerformanceSummary,
    pub created_at: DateTime<Utc>,
}

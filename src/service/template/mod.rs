//! SEO content template generation
//!
//! Produces a three-part content strategy package for a target page: a
//! writing template, a keyword strategy, and a structured outline. All three
//! are best-effort; only persistence can fail the request.

pub mod prompts;

use chrono::Utc;
use uuid::Uuid;

use crate::db::{DbError, ReportRepository};
use crate::model::{
    ContentOutline, ContentTemplate, ContentTemplateReport, KeywordStrategy, SiteScan,
};
use crate::service::content::ContentScanner;
use crate::service::llm::LlmClient;

const UNCONFIGURED_REASON: &str = "language model not configured";

const ARTICLE_LENGTH: &str = "1500-2500 words";
const PAGE_LENGTH: &str = "800-1200 words";
const OUTLINE_SECTIONS: usize = 7;

#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    #[error("failed to store content template: {0}")]
    Storage(#[from] DbError),
}

#[derive(Clone)]
pub struct TemplateService {
    scanner: ContentScanner,
    llm: Option<LlmClient>,
    repository: ReportRepository,
}

impl TemplateService {
    pub fn new(
        scanner: ContentScanner,
        llm: Option<LlmClient>,
        repository: ReportRepository,
    ) -> Self {
        Self {
            scanner,
            llm,
            repository,
        }
    }

    /// Generate and persist the full content strategy package
    pub async fn generate(
        &self,
        url: &str,
        target_keywords: &[String],
        content_type: &str,
    ) -> Result<ContentTemplateReport, TemplateError> {
        let scan = self.scanner.site_scan(url).await;

        let (template, strategy, outline) = tokio::join!(
            self.content_template(url, target_keywords, content_type, &scan),
            self.keyword_strategy(target_keywords, &scan),
            self.content_outline(url, target_keywords, content_type),
        );

        let report = ContentTemplateReport {
            id: Uuid::new_v4().to_string(),
            url: url.to_string(),
            content_template: template,
            keyword_strategy: strategy,
            content_outline: outline,
            created_at: Utc::now(),
        };

        self.repository.insert_template(&report).await?;
        tracing::info!(url = %url, id = %report.id, "Content template generated");

        Ok(report)
    }

    async fn content_template(
        &self,
        url: &str,
        target_keywords: &[String],
        content_type: &str,
        scan: &SiteScan,
    ) -> ContentTemplate {
        let text = self
            .complete(
                prompts::TEMPLATE_SYSTEM_PROMPT,
                &prompts::build_template_prompt(url, target_keywords, content_type, scan),
                "AI template unavailable",
                "Template generation failed",
            )
            .await;

        ContentTemplate {
            template: text,
            target_keywords: target_keywords.to_vec(),
            content_type: content_type.to_string(),
            recommended_length: recommended_length(content_type).to_string(),
            generated_at: Utc::now(),
        }
    }

    async fn keyword_strategy(
        &self,
        target_keywords: &[String],
        scan: &SiteScan,
    ) -> KeywordStrategy {
        let text = self
            .complete(
                prompts::STRATEGY_SYSTEM_PROMPT,
                &prompts::build_strategy_prompt(target_keywords, scan),
                "AI strategy unavailable",
                "Strategy generation failed",
            )
            .await;

        let (primary, secondary) = split_keywords(target_keywords);
        KeywordStrategy {
            strategy: text,
            primary_keywords: primary,
            secondary_keywords: secondary,
            generated_at: Utc::now(),
        }
    }

    async fn content_outline(
        &self,
        url: &str,
        target_keywords: &[String],
        content_type: &str,
    ) -> ContentOutline {
        let text = self
            .complete(
                prompts::OUTLINE_SYSTEM_PROMPT,
                &prompts::build_outline_prompt(url, target_keywords, content_type),
                "AI outline unavailable",
                "Outline generation failed",
            )
            .await;

        ContentOutline {
            outline: text,
            target_keywords: target_keywords.to_vec(),
            content_type: content_type.to_string(),
            estimated_sections: OUTLINE_SECTIONS,
            generated_at: Utc::now(),
        }
    }

    async fn complete(
        &self,
        system: &str,
        prompt: &str,
        unavailable_label: &str,
        failure_label: &str,
    ) -> String {
        let Some(llm) = &self.llm else {
            return format!("{}: {}", unavailable_label, UNCONFIGURED_REASON);
        };

        match llm.complete(system, prompt).await {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(error = %e, "Content generation call failed");
                format!("{}: {}", failure_label, e)
            }
        }
    }
}

/// First three targets are primary, the rest secondary
fn split_keywords(target_keywords: &[String]) -> (Vec<String>, Vec<String>) {
    let primary = target_keywords.iter().take(3).cloned().collect();
    let secondary = target_keywords.iter().skip(3).cloned().collect();
    (primary, secondary)
}

/// Articles get the long-form recommendation, everything else short-form
fn recommended_length(content_type: &str) -> &'static str {
    if content_type == "article" {
        ARTICLE_LENGTH
    } else {
        PAGE_LENGTH
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recommended_length_depends_on_content_type() {
        assert_eq!(recommended_length("article"), "1500-2500 words");
        assert_eq!(recommended_length("landing-page"), "800-1200 words");
        assert_eq!(recommended_length("blog"), "800-1200 words");
    }

    #[test]
    fn keywords_split_at_three() {
        let keywords: Vec<String> = ["a", "b", "c", "d", "e"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let (primary, secondary) = split_keywords(&keywords);
        assert_eq!(primary, vec!["a", "b", "c"]);
        assert_eq!(secondary, vec!["d", "e"]);
    }

    #[test]
    fn short_keyword_list_has_no_secondary() {
        let keywords: Vec<String> = ["a", "b"].iter().map(|s| s.to_string()).collect();
        let (primary, secondary) = split_keywords(&keywords);
        assert_eq!(primary.len(), 2);
        assert!(secondary.is_empty());
    }
}

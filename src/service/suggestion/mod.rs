//! Narrative suggestion service
//!
//! Best-effort collaborator: generates per-category remediation advice and
//! competitive insights from an external text-completion model. Every failure
//! path substitutes placeholder text; nothing here ever fails a request.

pub mod prompts;

use std::collections::BTreeMap;

use crate::model::{
    Category, CategorySuggestions, CompetitiveInsights, Issue, Priority, ProbeResult, SiteScan,
};
use crate::service::llm::LlmClient;

/// Placeholder reason used when no LLM client is configured
pub const UNCONFIGURED_REASON: &str = "suggestion service not configured";

#[derive(Clone)]
pub struct SuggestionService {
    llm: LlmClient,
}

impl SuggestionService {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }

    /// One suggestion block per category. LLM failure for a category yields
    /// that category's placeholder, not an error.
    pub async fn generate(
        &self,
        url: &str,
        probe: &ProbeResult,
        keywords: &[String],
        backlink_count: usize,
        issues: &BTreeMap<Category, Vec<Issue>>,
    ) -> BTreeMap<Category, CategorySuggestions> {
        let mut suggestions = BTreeMap::new();

        for category in Category::ALL {
            let messages = issue_messages(issues, category);
            let prompt = prompts::build_category_prompt(
                category,
                url,
                probe,
                keywords,
                backlink_count,
                &messages,
            );

            let lines = match self
                .llm
                .complete(prompts::SUGGESTION_SYSTEM_PROMPT, &prompt)
                .await
            {
                Ok(text) => split_suggestion_lines(&text),
                Err(e) => {
                    tracing::warn!(url = %url, category = category.as_str(), error = %e, "Suggestion generation failed");
                    vec![format!("AI suggestions unavailable: {}", e)]
                }
            };

            suggestions.insert(
                category,
                CategorySuggestions {
                    suggestions: lines,
                    priority: priority_for(category, probe.scores.get(category)),
                    current_score: probe.scores.get(category),
                    issues: messages,
                },
            );
        }

        suggestions
    }

    /// Narrative comparison insights, best-effort
    pub async fn competitive_insights(
        &self,
        primary: &SiteScan,
        competitors: &[SiteScan],
    ) -> CompetitiveInsights {
        let prompt = prompts::build_insights_prompt(primary, competitors);

        match self
            .llm
            .complete(prompts::INSIGHTS_SYSTEM_PROMPT, &prompt)
            .await
        {
            Ok(text) => CompetitiveInsights {
                insights: split_suggestion_lines(&text),
                competitor_count: competitors.len(),
                analysis_date: chrono::Utc::now(),
            },
            Err(e) => {
                tracing::warn!(url = %primary.url, error = %e, "Competitive insights generation failed");
                CompetitiveInsights::unavailable(competitors.len(), &e)
            }
        }
    }
}

/// Fixed placeholder blocks used when the suggestion collaborator is absent
/// or failed before any call could be made.
pub fn placeholder_suggestions(
    probe: &ProbeResult,
    issues: &BTreeMap<Category, Vec<Issue>>,
    reason: &str,
) -> BTreeMap<Category, CategorySuggestions> {
    Category::ALL
        .into_iter()
        .map(|category| {
            let score = probe.scores.get(category);
            (
                category,
                CategorySuggestions {
                    suggestions: vec![format!("AI suggestions unavailable: {}", reason)],
                    priority: priority_for(category, score),
                    current_score: score,
                    issues: issue_messages(issues, category),
                },
            )
        })
        .collect()
}

fn issue_messages(issues: &BTreeMap<Category, Vec<Issue>>, category: Category) -> Vec<String> {
    issues
        .get(&category)
        .map(|list| list.iter().map(|i| i.message.clone()).collect())
        .unwrap_or_default()
}

/// Priority is derived purely from the category's current score
pub fn priority_for(category: Category, score: f64) -> Priority {
    match category {
        Category::Performance => {
            if score < 0.7 {
                Priority::High
            } else {
                Priority::Medium
            }
        }
        Category::Seo => {
            if score < 0.8 {
                Priority::High
            } else {
                Priority::Medium
            }
        }
        Category::Accessibility | Category::BestPractices => {
            if score < 0.8 {
                Priority::Medium
            } else {
                Priority::Low
            }
        }
    }
}

/// Split free-form model output into non-empty, non-heading lines
pub fn split_suggestion_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::StaticFallbackProbe;

    #[test]
    fn split_drops_blank_lines_and_headings() {
        let text = "# Recommendations\n\n1. Compress images\n\n## Details\n2. Enable caching\n   ";
        assert_eq!(
            split_suggestion_lines(text),
            vec!["1. Compress images", "2. Enable caching"]
        );
    }

    #[test]
    fn priority_thresholds() {
        assert_eq!(priority_for(Category::Performance, 0.69), Priority::High);
        assert_eq!(priority_for(Category::Performance, 0.7), Priority::Medium);
        assert_eq!(priority_for(Category::Seo, 0.79), Priority::High);
        assert_eq!(priority_for(Category::Seo, 0.8), Priority::Medium);
        assert_eq!(priority_for(Category::Accessibility, 0.79), Priority::Medium);
        assert_eq!(priority_for(Category::Accessibility, 0.8), Priority::Low);
        assert_eq!(priority_for(Category::BestPractices, 0.5), Priority::Medium);
        assert_eq!(priority_for(Category::BestPractices, 0.95), Priority::Low);
    }

    #[test]
    fn placeholder_covers_all_categories() {
        let probe = StaticFallbackProbe.result();
        let issues = crate::service::issues::extract_issues(&probe);
        let suggestions = placeholder_suggestions(&probe, &issues, UNCONFIGURED_REASON);

        assert_eq!(suggestions.len(), 4);
        let performance = &suggestions[&Category::Performance];
        assert_eq!(performance.current_score, 0.5);
        assert_eq!(performance.priority, Priority::High);
        assert!(performance.suggestions[0].contains(UNCONFIGURED_REASON));
        // Static fallback audits still produce issue context
        assert!(!performance.issues.is_empty());
    }
}

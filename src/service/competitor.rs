//! Competitive comparison service
//!
//! Scans the primary site and every competitor concurrently, derives the
//! keyword gap and structural content gaps, and attaches best-effort
//! narrative insights. Only persistence can fail the request.

use chrono::Utc;
use futures::future::join_all;
use uuid::Uuid;

use crate::db::{DbError, ReportRepository};
use crate::model::{CompetitiveInsights, CompetitiveReport, SiteScan};
use crate::service::content::ContentScanner;
use crate::service::suggestion::SuggestionService;

const MAX_COMPETITIVE_KEYWORDS: usize = 20;
const MIN_H2_COUNT: usize = 3;

#[derive(Debug, thiserror::Error)]
pub enum ComparisonError {
    #[error("failed to store competitor report: {0}")]
    Storage(#[from] DbError),
}

#[derive(Clone)]
pub struct CompetitorService {
    scanner: ContentScanner,
    suggestions: Option<SuggestionService>,
    repository: ReportRepository,
}

impl CompetitorService {
    pub fn new(
        scanner: ContentScanner,
        suggestions: Option<SuggestionService>,
        repository: ReportRepository,
    ) -> Self {
        Self {
            scanner,
            suggestions,
            repository,
        }
    }

    /// Compare the primary site against its competitors and persist the report
    pub async fn compare(
        &self,
        primary_url: &str,
        competitor_urls: &[String],
    ) -> Result<CompetitiveReport, ComparisonError> {
        let (primary, competitors) = tokio::join!(
            self.scanner.site_scan(primary_url),
            join_all(competitor_urls.iter().map(|url| self.scanner.site_scan(url))),
        );

        let competitive_keywords = competitive_keywords(&primary, &competitors);
        let content_gaps = content_gaps(&primary, &competitors);

        let insights = match &self.suggestions {
            Some(service) => service.competitive_insights(&primary, &competitors).await,
            None => {
                CompetitiveInsights::unavailable(competitors.len(), "insight service not configured")
            }
        };

        let report = CompetitiveReport {
            id: Uuid::new_v4().to_string(),
            primary_url: primary_url.to_string(),
            primary,
            competitors,
            competitive_keywords,
            content_gaps,
            insights,
            created_at: Utc::now(),
        };

        self.repository.insert_competitor(&report).await?;
        tracing::info!(
            url = %primary_url,
            id = %report.id,
            competitors = competitor_urls.len(),
            "Competitive comparison completed"
        );

        Ok(report)
    }
}

/// Keywords competitors rank for that the primary site does not. Ordered by
/// first discovery across the competitor list, capped at 20.
pub fn competitive_keywords(primary: &SiteScan, competitors: &[SiteScan]) -> Vec<String> {
    let primary_set: std::collections::HashSet<&str> =
        primary.keywords.iter().map(String::as_str).collect();

    let mut seen = std::collections::HashSet::new();
    let mut gap = Vec::new();

    'outer: for competitor in competitors {
        for keyword in &competitor.keywords {
            if primary_set.contains(keyword.as_str()) || !seen.insert(keyword.clone()) {
                continue;
            }
            gap.push(keyword.clone());
            if gap.len() == MAX_COMPETITIVE_KEYWORDS {
                break 'outer;
            }
        }
    }

    gap
}

/// Structural content gaps derived from the scans, rule order fixed
pub fn content_gaps(primary: &SiteScan, competitors: &[SiteScan]) -> Vec<String> {
    let mut gaps = Vec::new();

    if !competitors.is_empty() {
        let average = competitors.iter().map(|c| c.word_count).sum::<usize>() as f64
            / competitors.len() as f64;
        if (primary.word_count as f64) < average {
            gaps.push(format!(
                "Content length gap: Your page has {} words vs competitor average of {:.0} words",
                primary.word_count, average
            ));
        }
    }

    if primary.h1_count == 0 {
        gaps.push("Missing H1 tag - critical for SEO".to_string());
    }
    if primary.h2_count < MIN_H2_COUNT {
        gaps.push("Few H2 tags - consider adding more section headings".to_string());
    }
    if primary.meta_description.is_empty() {
        gaps.push("Missing meta description".to_string());
    }

    gaps
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan_with_keywords(keywords: &[&str]) -> SiteScan {
        SiteScan {
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            ..SiteScan::default()
        }
    }

    #[test]
    fn keyword_gap_is_set_difference_in_discovery_order() {
        let primary = scan_with_keywords(&["a", "b"]);
        let competitors = vec![
            scan_with_keywords(&["b", "c"]),
            scan_with_keywords(&["c", "d"]),
        ];
        assert_eq!(competitive_keywords(&primary, &competitors), vec!["c", "d"]);
    }

    #[test]
    fn keyword_gap_respects_competitor_order() {
        let primary = scan_with_keywords(&[]);
        let competitors = vec![
            scan_with_keywords(&["x", "y"]),
            scan_with_keywords(&["z", "x"]),
        ];
        assert_eq!(
            competitive_keywords(&primary, &competitors),
            vec!["x", "y", "z"]
        );
    }

    #[test]
    fn keyword_gap_caps_at_twenty() {
        let primary = scan_with_keywords(&[]);
        let many: Vec<String> = (0..30).map(|i| format!("kw{:02}", i)).collect();
        let competitors = vec![SiteScan {
            keywords: many,
            ..SiteScan::default()
        }];
        assert_eq!(competitive_keywords(&primary, &competitors).len(), 20);
    }

    #[test]
    fn word_count_gap_uses_competitor_average() {
        let primary = SiteScan {
            word_count: 300,
            h1_count: 1,
            h2_count: 4,
            meta_description: "present".into(),
            ..SiteScan::default()
        };
        let competitors = vec![
            SiteScan { word_count: 800, ..SiteScan::default() },
            SiteScan { word_count: 1000, ..SiteScan::default() },
        ];
        let gaps = content_gaps(&primary, &competitors);
        assert_eq!(
            gaps,
            vec!["Content length gap: Your page has 300 words vs competitor average of 900 words"]
        );
    }

    #[test]
    fn no_word_count_gap_without_competitors() {
        let primary = SiteScan {
            word_count: 10,
            h1_count: 1,
            h2_count: 4,
            meta_description: "present".into(),
            ..SiteScan::default()
        };
        assert!(content_gaps(&primary, &[]).is_empty());
    }

    #[test]
    fn structural_gaps_fire_independently() {
        let primary = SiteScan {
            word_count: 5000,
            h1_count: 0,
            h2_count: 2,
            meta_description: String::new(),
            ..SiteScan::default()
        };
        let gaps = content_gaps(&primary, &[]);
        assert_eq!(
            gaps,
            vec![
                "Missing H1 tag - critical for SEO",
                "Few H2 tags - consider adding more section headings",
                "Missing meta description",
            ]
        );
    }

    #[test]
    fn three_h2_tags_is_enough() {
        let primary = SiteScan {
            h1_count: 1,
            h2_count: 3,
            meta_description: "present".into(),
            ..SiteScan::default()
        };
        assert!(content_gaps(&primary, &[]).is_empty());
    }
}

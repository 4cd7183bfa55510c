//! Prompts for per-category remediation suggestions and competitive insights

use crate::model::{Category, ProbeResult, SiteScan};

/// System prompt for per-category remediation suggestions
pub const SUGGESTION_SYSTEM_PROMPT: &str = "You are an expert SEO consultant and web performance \
specialist. Provide specific, actionable recommendations for each metric category.";

/// System prompt for competitive comparison insights
pub const INSIGHTS_SYSTEM_PROMPT: &str = "You are a competitive analysis expert. Provide \
actionable insights based on comparative data.";

fn audit_numeric(probe: &ProbeResult, metric: &str) -> f64 {
    probe
        .audits
        .get(metric)
        .and_then(|m| m.numeric_value)
        .unwrap_or(0.0)
}

fn issues_block(issues: &[String]) -> String {
    if issues.is_empty() {
        "No specific issues identified".to_string()
    } else {
        issues.join("\n")
    }
}

/// Build the prompt for one category
pub fn build_category_prompt(
    category: Category,
    url: &str,
    probe: &ProbeResult,
    keywords: &[String],
    backlink_count: usize,
    issues: &[String],
) -> String {
    let score = probe.scores.get(category);

    let context = match category {
        Category::Performance => format!(
            "Performance Metrics:\n\
             - First Contentful Paint: {}ms\n\
             - Speed Index: {}ms\n\
             - Largest Contentful Paint: {}ms\n\n\
             Provide 3-5 specific, actionable recommendations to improve performance. \
             Focus on technical solutions.",
            audit_numeric(probe, "first-contentful-paint"),
            audit_numeric(probe, "speed-index"),
            audit_numeric(probe, "largest-contentful-paint"),
        ),
        Category::Seo => format!(
            "Top Keywords Found: {}\n\
             External Links: {} found\n\n\
             Provide 3-5 specific, actionable SEO recommendations. \
             Include keyword optimization strategies.",
            keywords
                .iter()
                .take(10)
                .cloned()
                .collect::<Vec<_>>()
                .join(", "),
            backlink_count,
        ),
        Category::Accessibility => "Provide 3-5 specific, actionable accessibility \
             recommendations to improve user experience for all users."
            .to_string(),
        Category::BestPractices => "Provide 3-5 specific, actionable recommendations to \
             improve web development best practices."
            .to_string(),
    };

    format!(
        "Analyze the {} issues for {} and provide specific actionable recommendations:\n\n\
         Current {} Score: {:.2}\n\n\
         Identified Issues:\n{}\n\n\
         {}",
        category.label().to_lowercase(),
        url,
        category.label(),
        score,
        issues_block(issues),
        context,
    )
}

fn site_summary(label: &str, scan: &SiteScan) -> String {
    format!(
        "{}: {}\n\
         - Title: {}\n\
         - Meta Description: {}\n\
         - Keywords: {} found\n\
         - Backlinks: {} found\n\
         - Word Count: {}\n\
         - H1 tags: {}\n",
        label,
        scan.url,
        scan.title,
        scan.meta_description,
        scan.keywords.len(),
        scan.backlinks.len(),
        scan.word_count,
        scan.h1_count,
    )
}

/// Build the competitive-insights prompt from the structural scans
pub fn build_insights_prompt(primary: &SiteScan, competitors: &[SiteScan]) -> String {
    let mut comparison = site_summary("Primary Site", primary);
    comparison.push_str("\nCompetitors:\n");
    for (i, competitor) in competitors.iter().enumerate() {
        comparison.push_str(&site_summary(&format!("Competitor {}", i + 1), competitor));
    }

    format!(
        "Analyze the following competitive data and provide actionable insights:\n\n\
         {}\n\
         Provide specific recommendations for:\n\
         1. Content gaps and opportunities\n\
         2. Keyword strategy improvements\n\
         3. Technical SEO advantages competitors have\n\
         4. Content length and structure recommendations\n\
         5. Link building opportunities\n\n\
         Focus on actionable insights that can be implemented immediately.",
        comparison,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::StaticFallbackProbe;

    #[test]
    fn category_prompt_includes_score_and_issues() {
        let probe = StaticFallbackProbe.result();
        let prompt = build_category_prompt(
            Category::Performance,
            "https://example.com",
            &probe,
            &[],
            0,
            &["First Contentful Paint is slow (3000ms)".to_string()],
        );
        assert!(prompt.contains("https://example.com"));
        assert!(prompt.contains("0.50"));
        assert!(prompt.contains("First Contentful Paint is slow (3000ms)"));
    }

    #[test]
    fn empty_issue_list_is_stated_explicitly() {
        let probe = StaticFallbackProbe.result();
        let prompt = build_category_prompt(
            Category::Accessibility,
            "https://example.com",
            &probe,
            &[],
            0,
            &[],
        );
        assert!(prompt.contains("No specific issues identified"));
    }
}

//! Prompts for content template, keyword strategy, and outline generation

use crate::model::SiteScan;

pub const TEMPLATE_SYSTEM_PROMPT: &str = "You are an expert content strategist. Create detailed \
content templates for SEO optimization.";

pub const STRATEGY_SYSTEM_PROMPT: &str = "You are an SEO keyword strategy expert. Provide \
detailed keyword optimization strategies.";

pub const OUTLINE_SYSTEM_PROMPT: &str = "You are a content strategist specialized in creating \
SEO-optimized content outlines.";

/// Prompt for the full content template
pub fn build_template_prompt(
    url: &str,
    target_keywords: &[String],
    content_type: &str,
    scan: &SiteScan,
) -> String {
    format!(
        "Create a comprehensive content template for {} optimization:\n\n\
         Target URL: {}\n\
         Target Keywords: {}\n\
         Content Type: {}\n\n\
         Current Analysis:\n\
         - Title: {}\n\
         - Meta Description: {}\n\
         - Current Word Count: {}\n\n\
         Provide a detailed template including:\n\
         1. Recommended title structure with target keywords\n\
         2. Meta description template\n\
         3. Content structure with H1, H2, H3 recommendations\n\
         4. Keyword density and placement guidelines\n\
         5. Content length recommendations\n\
         6. Internal linking strategy\n\
         7. Call-to-action placement\n\
         8. Technical SEO elements to include\n\n\
         Format as a detailed guide that can be followed step by step.",
        content_type,
        url,
        target_keywords.join(", "),
        content_type,
        scan.title,
        scan.meta_description,
        scan.word_count,
    )
}

/// Prompt for the keyword strategy recommendations
pub fn build_strategy_prompt(target_keywords: &[String], scan: &SiteScan) -> String {
    format!(
        "Create a comprehensive keyword strategy:\n\n\
         Target Keywords: {}\n\
         Current Page Keywords: {}\n\n\
         Provide:\n\
         1. Primary keyword selection and placement\n\
         2. Secondary keyword opportunities\n\
         3. Long-tail keyword suggestions\n\
         4. Keyword density recommendations\n\
         5. LSI (Latent Semantic Indexing) keywords\n\
         6. Keyword mapping for different content sections\n\
         7. Seasonal keyword opportunities\n\
         8. Local SEO keywords (if applicable)\n\n\
         Focus on actionable, specific recommendations.",
        target_keywords.join(", "),
        scan.keywords
            .iter()
            .take(10)
            .cloned()
            .collect::<Vec<_>>()
            .join(", "),
    )
}

/// Prompt for the structured content outline
pub fn build_outline_prompt(url: &str, target_keywords: &[String], content_type: &str) -> String {
    format!(
        "Create a detailed content outline for {}:\n\n\
         Target URL: {}\n\
         Target Keywords: {}\n\
         Content Type: {}\n\n\
         Create a comprehensive outline with:\n\
         1. Introduction section (with primary keyword)\n\
         2. Main content sections (5-7 sections)\n\
         3. Subheadings for each section\n\
         4. Key points to cover in each section\n\
         5. Keyword placement recommendations\n\
         6. Internal linking opportunities\n\
         7. Conclusion section\n\
         8. Call-to-action recommendations\n\n\
         Format as a structured outline that can be followed by content writers.",
        content_type,
        url,
        target_keywords.join(", "),
        content_type,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_prompt_carries_scan_context() {
        let scan = SiteScan {
            url: "https://example.com".into(),
            title: "Coffee Guide".into(),
            meta_description: "All about coffee".into(),
            word_count: 420,
            ..SiteScan::default()
        };
        let prompt = build_template_prompt(
            "https://example.com",
            &["coffee".to_string(), "roasting".to_string()],
            "article",
            &scan,
        );
        assert!(prompt.contains("coffee, roasting"));
        assert!(prompt.contains("Coffee Guide"));
        assert!(prompt.contains("420"));
    }

    #[test]
    fn strategy_prompt_limits_page_keywords_to_ten() {
        let scan = SiteScan {
            keywords: (0..15).map(|i| format!("kw{}", i)).collect(),
            ..SiteScan::default()
        };
        let prompt = build_strategy_prompt(&["target".to_string()], &scan);
        assert!(prompt.contains("kw9"));
        assert!(!prompt.contains("kw10"));
    }
}

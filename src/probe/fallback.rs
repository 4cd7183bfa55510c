//! Static fallback tier: fixed, clearly degraded defaults
//!
//! Used only when every live tier failed. The values below are the one
//! canonical set; nothing else in the codebase carries default-score literals.

use std::collections::BTreeMap;

use crate::model::{AuditMetric, CategoryScores, ProbeResult, Tier};

const FALLBACK_PERFORMANCE: f64 = 0.5;
const FALLBACK_ACCESSIBILITY: f64 = 0.7;
const FALLBACK_BEST_PRACTICES: f64 = 0.6;
const FALLBACK_SEO: f64 = 0.5;

const FALLBACK_FCP_MS: f64 = 3000.0;
const FALLBACK_SPEED_INDEX_MS: f64 = 4000.0;
const FALLBACK_LCP_MS: f64 = 5000.0;

/// The terminal strategy of the fallback chain. Never fails.
pub struct StaticFallbackProbe;

impl StaticFallbackProbe {
    pub fn result(&self) -> ProbeResult {
        let mut audits = BTreeMap::new();
        audits.insert(
            "first-contentful-paint".to_string(),
            AuditMetric::numeric(FALLBACK_FCP_MS),
        );
        audits.insert(
            "speed-index".to_string(),
            AuditMetric::numeric(FALLBACK_SPEED_INDEX_MS),
        );
        audits.insert(
            "largest-contentful-paint".to_string(),
            AuditMetric::numeric(FALLBACK_LCP_MS),
        );

        ProbeResult {
            scores: CategoryScores {
                performance: FALLBACK_PERFORMANCE,
                accessibility: FALLBACK_ACCESSIBILITY,
                best_practices: FALLBACK_BEST_PRACTICES,
                seo: FALLBACK_SEO,
            },
            audits,
            tier: Tier::Static,
            degraded: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_is_labeled_static_and_degraded() {
        let result = StaticFallbackProbe.result();
        assert_eq!(result.tier, Tier::Static);
        assert!(result.degraded);
    }

    #[test]
    fn fallback_scores_are_canonical() {
        let result = StaticFallbackProbe.result();
        assert_eq!(result.scores.performance, 0.5);
        assert_eq!(result.scores.accessibility, 0.7);
        assert_eq!(result.scores.best_practices, 0.6);
        assert_eq!(result.scores.seo, 0.5);
    }

    #[test]
    fn fallback_carries_estimated_audits() {
        let result = StaticFallbackProbe.result();
        assert_eq!(
            result.audits["first-contentful-paint"].numeric_value,
            Some(3000.0)
        );
        assert_eq!(result.audits["speed-index"].numeric_value, Some(4000.0));
        assert_eq!(
            result.audits["largest-contentful-paint"].numeric_value,
            Some(5000.0)
        );
    }
}

//! Issue extraction engine
//!
//! A declarative rule table per category: each rule reads one metric from the
//! probe's audits map and emits an issue when its threshold is crossed. Rules
//! are independent and output preserves declaration order. A missing metric
//! means the rule does not fire. Pure: no I/O, deterministic given input.

use std::collections::BTreeMap;

use crate::model::{AuditMetric, Category, Issue, ProbeResult, Severity};

enum Check {
    /// Fires when `numericValue` exceeds the limit; value is appended to the
    /// message with the given unit suffix.
    NumericOver { limit: f64, unit: &'static str },
    /// Fires when `score` is below the limit.
    ScoreUnder(f64),
    /// Fires when `details.overallSavingsBytes` exceeds the limit.
    SavingsOver(f64),
}

struct IssueRule {
    metric: &'static str,
    check: Check,
    message: &'static str,
    severity: Severity,
}

const PERFORMANCE_RULES: &[IssueRule] = &[
    IssueRule {
        metric: "first-contentful-paint",
        check: Check::NumericOver { limit: 2000.0, unit: "ms" },
        message: "First Contentful Paint is slow",
        severity: Severity::High,
    },
    IssueRule {
        metric: "largest-contentful-paint",
        check: Check::NumericOver { limit: 2500.0, unit: "ms" },
        message: "Largest Contentful Paint is slow",
        severity: Severity::High,
    },
    IssueRule {
        metric: "speed-index",
        check: Check::NumericOver { limit: 3000.0, unit: "ms" },
        message: "Speed Index is slow",
        severity: Severity::Medium,
    },
    IssueRule {
        metric: "cumulative-layout-shift",
        check: Check::NumericOver { limit: 0.1, unit: "" },
        message: "Cumulative Layout Shift is high",
        severity: Severity::High,
    },
    IssueRule {
        metric: "unused-css-rules",
        check: Check::SavingsOver(10000.0),
        message: "Unused CSS detected - remove unused styles",
        severity: Severity::Low,
    },
    IssueRule {
        metric: "uses-optimized-images",
        check: Check::ScoreUnder(0.8),
        message: "Images are not optimized - compress and serve in modern formats",
        severity: Severity::Medium,
    },
];

const SEO_RULES: &[IssueRule] = &[
    IssueRule {
        metric: "meta-description",
        check: Check::ScoreUnder(1.0),
        message: "Missing or poor meta description",
        severity: Severity::Medium,
    },
    IssueRule {
        metric: "document-title",
        check: Check::ScoreUnder(1.0),
        message: "Missing or poor title tag",
        severity: Severity::High,
    },
    IssueRule {
        metric: "heading-order",
        check: Check::ScoreUnder(1.0),
        message: "Heading elements are not in sequentially-descending order",
        severity: Severity::Low,
    },
    IssueRule {
        metric: "image-alt",
        check: Check::ScoreUnder(1.0),
        message: "Images missing alt text",
        severity: Severity::Medium,
    },
    IssueRule {
        metric: "robots-txt",
        check: Check::ScoreUnder(1.0),
        message: "robots.txt issues detected",
        severity: Severity::Low,
    },
    IssueRule {
        metric: "hreflang",
        check: Check::ScoreUnder(1.0),
        message: "hreflang links are not valid",
        severity: Severity::Low,
    },
];

const ACCESSIBILITY_RULES: &[IssueRule] = &[
    IssueRule {
        metric: "color-contrast",
        check: Check::ScoreUnder(1.0),
        message: "Background and foreground colors do not have sufficient contrast ratio",
        severity: Severity::High,
    },
    IssueRule {
        metric: "aria-required-attr",
        check: Check::ScoreUnder(1.0),
        message: "ARIA attributes are missing or invalid",
        severity: Severity::Medium,
    },
    IssueRule {
        metric: "label",
        check: Check::ScoreUnder(1.0),
        message: "Form elements do not have associated labels",
        severity: Severity::High,
    },
    IssueRule {
        metric: "keyboard-traps",
        check: Check::ScoreUnder(1.0),
        message: "Keyboard navigation issues detected",
        severity: Severity::High,
    },
    IssueRule {
        metric: "focus-traps",
        check: Check::ScoreUnder(1.0),
        message: "Focus is not trapped within modal dialogs",
        severity: Severity::Medium,
    },
];

const BEST_PRACTICES_RULES: &[IssueRule] = &[
    IssueRule {
        metric: "is-on-https",
        check: Check::ScoreUnder(1.0),
        message: "Page is not served over HTTPS",
        severity: Severity::High,
    },
    IssueRule {
        metric: "errors-in-console",
        check: Check::ScoreUnder(1.0),
        message: "JavaScript errors detected in console",
        severity: Severity::Medium,
    },
    IssueRule {
        metric: "deprecations",
        check: Check::ScoreUnder(1.0),
        message: "Uses deprecated APIs",
        severity: Severity::Medium,
    },
    IssueRule {
        metric: "csp-xss",
        check: Check::ScoreUnder(1.0),
        message: "Content Security Policy missing or ineffective",
        severity: Severity::Medium,
    },
];

fn rules_for(category: Category) -> &'static [IssueRule] {
    match category {
        Category::Performance => PERFORMANCE_RULES,
        Category::Seo => SEO_RULES,
        Category::Accessibility => ACCESSIBILITY_RULES,
        Category::BestPractices => BEST_PRACTICES_RULES,
    }
}

/// Apply every rule table to the probe result. The returned map always holds
/// all four category keys, with possibly empty issue lists.
pub fn extract_issues(probe: &ProbeResult) -> BTreeMap<Category, Vec<Issue>> {
    let mut issues = BTreeMap::new();

    for category in Category::ALL {
        let list = rules_for(category)
            .iter()
            .filter_map(|rule| apply_rule(category, rule, probe.audits.get(rule.metric)))
            .collect();
        issues.insert(category, list);
    }

    issues
}

fn apply_rule(
    category: Category,
    rule: &IssueRule,
    metric: Option<&AuditMetric>,
) -> Option<Issue> {
    // Absent metric is treated as passing
    let metric = metric?;

    let message = match rule.check {
        Check::NumericOver { limit, unit } => {
            let value = metric.numeric_value?;
            if value > limit {
                Some(format!("{} ({}{})", rule.message, format_value(value), unit))
            } else {
                None
            }
        }
        Check::ScoreUnder(limit) => {
            let score = metric.score?;
            if score < limit {
                Some(rule.message.to_string())
            } else {
                None
            }
        }
        Check::SavingsOver(limit) => {
            let savings = metric
                .details
                .as_ref()
                .and_then(|d| d.get("overallSavingsBytes"))
                .and_then(|v| v.as_f64())?;
            if savings > limit {
                Some(rule.message.to_string())
            } else {
                None
            }
        }
    }?;

    Some(Issue {
        category,
        message,
        severity: rule.severity,
    })
}

/// Render a metric value without a spurious trailing `.0` for whole numbers
fn format_value(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CategoryScores, ProbeResult, Tier};
    use serde_json::json;

    fn probe_with(audits: &[(&str, AuditMetric)]) -> ProbeResult {
        ProbeResult {
            scores: CategoryScores::default(),
            audits: audits
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
            tier: Tier::Full,
            degraded: false,
        }
    }

    #[test]
    fn slow_fcp_fires_with_value_in_message() {
        let probe = probe_with(&[("first-contentful-paint", AuditMetric::numeric(2500.0))]);
        let issues = extract_issues(&probe);
        let perf = &issues[&Category::Performance];
        assert_eq!(perf.len(), 1);
        assert!(perf[0].message.contains("2500"));
        assert!(perf[0].message.contains("First Contentful Paint"));
    }

    #[test]
    fn fcp_at_threshold_does_not_fire() {
        let probe = probe_with(&[("first-contentful-paint", AuditMetric::numeric(2000.0))]);
        let issues = extract_issues(&probe);
        assert!(issues[&Category::Performance].is_empty());
    }

    #[test]
    fn missing_metric_is_treated_as_passing() {
        let probe = probe_with(&[]);
        let issues = extract_issues(&probe);
        for category in Category::ALL {
            assert!(issues[&category].is_empty());
        }
    }

    #[test]
    fn all_four_categories_always_present() {
        let probe = probe_with(&[]);
        let issues = extract_issues(&probe);
        assert_eq!(issues.len(), 4);
        for category in Category::ALL {
            assert!(issues.contains_key(&category));
        }
    }

    #[test]
    fn fractional_cls_keeps_decimal_in_message() {
        let probe = probe_with(&[("cumulative-layout-shift", AuditMetric::numeric(0.25))]);
        let issues = extract_issues(&probe);
        let perf = &issues[&Category::Performance];
        assert_eq!(perf.len(), 1);
        assert!(perf[0].message.contains("(0.25)"));
    }

    #[test]
    fn score_under_rules_fire_only_below_threshold() {
        let failing = AuditMetric {
            score: Some(0.0),
            ..AuditMetric::default()
        };
        let passing = AuditMetric {
            score: Some(1.0),
            ..AuditMetric::default()
        };

        let probe = probe_with(&[("is-on-https", failing), ("errors-in-console", passing)]);
        let issues = extract_issues(&probe);
        let bp = &issues[&Category::BestPractices];
        assert_eq!(bp.len(), 1);
        assert_eq!(bp[0].message, "Page is not served over HTTPS");
        assert_eq!(bp[0].severity, Severity::High);
    }

    #[test]
    fn unused_css_savings_threshold() {
        let big = AuditMetric {
            details: Some(json!({"overallSavingsBytes": 20000})),
            ..AuditMetric::default()
        };
        let probe = probe_with(&[("unused-css-rules", big)]);
        let issues = extract_issues(&probe);
        assert_eq!(issues[&Category::Performance].len(), 1);

        let small = AuditMetric {
            details: Some(json!({"overallSavingsBytes": 5000})),
            ..AuditMetric::default()
        };
        let probe = probe_with(&[("unused-css-rules", small)]);
        let issues = extract_issues(&probe);
        assert!(issues[&Category::Performance].is_empty());
    }

    #[test]
    fn issue_order_follows_rule_declaration_order() {
        let probe = probe_with(&[
            ("speed-index", AuditMetric::numeric(9000.0)),
            ("first-contentful-paint", AuditMetric::numeric(9000.0)),
            ("largest-contentful-paint", AuditMetric::numeric(9000.0)),
        ]);
        let issues = extract_issues(&probe);
        let perf = &issues[&Category::Performance];
        assert_eq!(perf.len(), 3);
        assert!(perf[0].message.starts_with("First Contentful Paint"));
        assert!(perf[1].message.starts_with("Largest Contentful Paint"));
        assert!(perf[2].message.starts_with("Speed Index"));
    }

    #[test]
    fn static_fallback_audits_produce_issues_uniformly() {
        // The issue engine must not care which tier produced the metrics
        let probe = crate::probe::StaticFallbackProbe.result();
        let issues = extract_issues(&probe);
        let perf = &issues[&Category::Performance];
        assert_eq!(perf.len(), 3);
        assert!(perf[0].message.contains("3000"));
    }
}

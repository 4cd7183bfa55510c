//! Lighthouse subprocess probes (full and reduced tiers)

use std::collections::BTreeMap;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tokio::process::Command;

use super::{AuditProbe, ProbeError};
use crate::model::{AuditMetric, CategoryScores, ProbeConfig, ProbeResult, Tier};

const CHROME_FLAGS: &str =
    "--chrome-flags=--headless --no-sandbox --disable-dev-shm-usage --disable-gpu";

/// Invokes the lighthouse CLI and parses its JSON scorecard
pub struct LighthouseProbe {
    bin: String,
    tier: Tier,
    timeout: Duration,
    flags: Vec<String>,
}

impl LighthouseProbe {
    /// Full configuration: all categories, standard simulated throttling
    pub fn full(config: &ProbeConfig) -> Self {
        Self {
            bin: config.lighthouse_bin.clone(),
            tier: Tier::Full,
            timeout: config.full_timeout(),
            flags: vec![
                CHROME_FLAGS.to_string(),
                "--preset=perf".to_string(),
                "--max-wait-for-fcp=15000".to_string(),
                "--max-wait-for-load=35000".to_string(),
                "--throttling-method=simulate".to_string(),
                "--disable-storage-reset".to_string(),
                "--quiet".to_string(),
            ],
        }
    }

    /// Narrower category set with expensive sub-audits skipped and shorter
    /// wait budgets. Tried only after the full tier failed.
    pub fn reduced(config: &ProbeConfig) -> Self {
        Self {
            bin: config.lighthouse_bin.clone(),
            tier: Tier::Reduced,
            timeout: config.reduced_timeout(),
            flags: vec![
                CHROME_FLAGS.to_string(),
                "--only-categories=performance,seo,accessibility,best-practices".to_string(),
                "--skip-audits=screenshot-thumbnails,final-screenshot,uses-http2,uses-long-cache-ttl,uses-optimized-images"
                    .to_string(),
                "--preset=perf".to_string(),
                "--throttling-method=simulate".to_string(),
                "--max-wait-for-fcp=10000".to_string(),
                "--max-wait-for-load=25000".to_string(),
                "--quiet".to_string(),
            ],
        }
    }
}

#[async_trait]
impl AuditProbe for LighthouseProbe {
    fn tier(&self) -> Tier {
        self.tier
    }

    async fn attempt(&self, url: &str) -> Result<ProbeResult, ProbeError> {
        let out_file = tempfile::Builder::new()
            .prefix("lighthouse-")
            .suffix(".json")
            .tempfile()?;
        let out_path = out_file.path().to_string_lossy().into_owned();

        let mut child = Command::new(&self.bin)
            .arg(url)
            .arg("--output=json")
            .arg(format!("--output-path={}", out_path))
            .args(&self.flags)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()?;

        let status = match tokio::time::timeout(self.timeout, child.wait()).await {
            Ok(status) => status?,
            Err(_) => {
                // Forcibly terminate the subprocess so a stalled run cannot
                // outlive its tier budget.
                let _ = child.start_kill();
                return Err(ProbeError::Timeout(self.timeout));
            }
        };

        if !status.success() {
            return Err(ProbeError::ToolFailed(status));
        }

        let raw = tokio::fs::read_to_string(out_file.path()).await?;
        parse_scorecard(&raw, self.tier)
    }
}

#[derive(Debug, Default, Deserialize)]
struct Scorecard {
    #[serde(default)]
    categories: ScorecardCategories,
    #[serde(default)]
    audits: BTreeMap<String, AuditMetric>,
}

#[derive(Debug, Default, Deserialize)]
struct ScorecardCategories {
    #[serde(default)]
    performance: ScorecardCategory,
    #[serde(default)]
    accessibility: ScorecardCategory,
    #[serde(default, rename = "best-practices")]
    best_practices: ScorecardCategory,
    #[serde(default)]
    seo: ScorecardCategory,
}

#[derive(Debug, Default, Deserialize)]
struct ScorecardCategory {
    // Lighthouse reports null for categories it could not score
    #[serde(default)]
    score: Option<f64>,
}

/// Normalize a raw lighthouse JSON document into a `ProbeResult`.
/// Any subset of the expected keys may be absent; missing scores default to 0.
pub(crate) fn parse_scorecard(raw: &str, tier: Tier) -> Result<ProbeResult, ProbeError> {
    let scorecard: Scorecard =
        serde_json::from_str(raw).map_err(|e| ProbeError::Parse(e.to_string()))?;

    let categories = scorecard.categories;
    let scores = CategoryScores {
        performance: categories.performance.score.unwrap_or(0.0),
        accessibility: categories.accessibility.score.unwrap_or(0.0),
        best_practices: categories.best_practices.score.unwrap_or(0.0),
        seo: categories.seo.score.unwrap_or(0.0),
    };

    Ok(ProbeResult {
        scores,
        audits: scorecard.audits,
        tier,
        degraded: tier != Tier::Full,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_complete_scorecard() {
        let raw = r#"{
            "categories": {
                "performance": {"score": 0.92},
                "accessibility": {"score": 0.88},
                "best-practices": {"score": 0.75},
                "seo": {"score": 1.0}
            },
            "audits": {
                "first-contentful-paint": {"numericValue": 1800.5, "score": 0.9},
                "is-on-https": {"score": 1}
            }
        }"#;

        let result = parse_scorecard(raw, Tier::Full).unwrap();
        assert_eq!(result.scores.performance, 0.92);
        assert_eq!(result.scores.best_practices, 0.75);
        assert_eq!(result.tier, Tier::Full);
        assert!(!result.degraded);
        assert_eq!(
            result.audits["first-contentful-paint"].numeric_value,
            Some(1800.5)
        );
    }

    #[test]
    fn missing_keys_default_to_zero() {
        let result = parse_scorecard(r#"{"categories": {"seo": {"score": 0.5}}}"#, Tier::Reduced)
            .unwrap();
        assert_eq!(result.scores.performance, 0.0);
        assert_eq!(result.scores.seo, 0.5);
        assert!(result.audits.is_empty());
        assert!(result.degraded);
    }

    #[test]
    fn null_category_score_defaults_to_zero() {
        let result = parse_scorecard(
            r#"{"categories": {"performance": {"score": null}}, "audits": {}}"#,
            Tier::Full,
        )
        .unwrap();
        assert_eq!(result.scores.performance, 0.0);
    }

    #[test]
    fn rejects_non_json_output() {
        assert!(parse_scorecard("not json", Tier::Full).is_err());
    }
}

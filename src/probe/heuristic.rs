//! Browser-derived heuristic probe (third tier)
//!
//! When both lighthouse tiers fail, approximate scores from a direct page load:
//! load timing plus a handful of structural checks measured over CDP.

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use chromiumoxide::browser::Browser;

use super::{AuditProbe, ProbeError};
use crate::browser::BrowserSession;
use crate::model::{AuditMetric, CategoryScores, ProbeResult, Tier};

/// Structural observations collected from a single page load
#[derive(Debug, Clone, Default)]
pub struct PageObservation {
    pub load_time_ms: f64,
    pub title: Option<String>,
    pub meta_description: Option<String>,
    pub h1_count: u32,
    pub images_missing_alt: u32,
    pub https: bool,
}

pub struct HeuristicProbe {
    timeout: Duration,
}

impl HeuristicProbe {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    async fn observe(&self, url: &str) -> Result<PageObservation, ProbeError> {
        let session = BrowserSession::launch()
            .await
            .map_err(|e| ProbeError::Browser(e.to_string()))?;

        let result = Self::measure(&session.browser, url).await;
        session.shutdown().await;

        let mut observation = result?;
        observation.https = url.starts_with("https://");
        Ok(observation)
    }

    async fn measure(browser: &Browser, url: &str) -> Result<PageObservation, ProbeError> {
        let started = Instant::now();

        let page = browser
            .new_page(url)
            .await
            .map_err(|e| ProbeError::Browser(e.to_string()))?;
        page.wait_for_navigation()
            .await
            .map_err(|e| ProbeError::Browser(e.to_string()))?;

        let load_time_ms = started.elapsed().as_millis() as f64;

        let title = page
            .get_title()
            .await
            .map_err(|e| ProbeError::Browser(e.to_string()))?
            .filter(|t| !t.trim().is_empty());

        let meta_description =
            eval_string(&page, r#"document.querySelector('meta[name="description"]')?.content || """#)
                .await?
                .filter(|d| !d.trim().is_empty());

        let h1_count = eval_count(&page, "document.querySelectorAll('h1').length").await?;
        let images_missing_alt =
            eval_count(&page, "document.querySelectorAll('img:not([alt])').length").await?;

        Ok(PageObservation {
            load_time_ms,
            title,
            meta_description,
            h1_count,
            images_missing_alt,
            https: false,
        })
    }
}

async fn eval_string(
    page: &chromiumoxide::Page,
    expression: &str,
) -> Result<Option<String>, ProbeError> {
    let value: String = page
        .evaluate(expression)
        .await
        .map_err(|e| ProbeError::Browser(e.to_string()))?
        .into_value()
        .map_err(|e| ProbeError::Browser(e.to_string()))?;
    Ok(Some(value))
}

async fn eval_count(page: &chromiumoxide::Page, expression: &str) -> Result<u32, ProbeError> {
    page.evaluate(expression)
        .await
        .map_err(|e| ProbeError::Browser(e.to_string()))?
        .into_value()
        .map_err(|e| ProbeError::Browser(e.to_string()))
}

#[async_trait]
impl AuditProbe for HeuristicProbe {
    fn tier(&self) -> Tier {
        Tier::Heuristic
    }

    async fn attempt(&self, url: &str) -> Result<ProbeResult, ProbeError> {
        let observation = tokio::time::timeout(self.timeout, self.observe(url))
            .await
            .map_err(|_| ProbeError::Timeout(self.timeout))??;

        tracing::debug!(
            url = %url,
            load_time_ms = observation.load_time_ms,
            h1_count = observation.h1_count,
            images_missing_alt = observation.images_missing_alt,
            "Heuristic page observation collected"
        );

        Ok(score_observation(&observation))
    }
}

fn clamp01(value: f64) -> f64 {
    value.clamp(0.0, 1.0)
}

/// Convert raw page observations into the normalized probe schema.
/// Synthesizes an audits map from the load time so the issue extraction
/// engine needs no tier-specific logic.
pub fn score_observation(observation: &PageObservation) -> ProbeResult {
    let load = observation.load_time_ms;

    let performance = clamp01((5000.0 - load) / 5000.0);

    let mut seo = 1.0;
    if observation.title.is_none() {
        seo -= 0.3;
    }
    if observation.meta_description.is_none() {
        seo -= 0.2;
    }
    if observation.h1_count == 0 {
        seo -= 0.2;
    }
    if observation.h1_count > 1 {
        seo -= 0.1;
    }

    let accessibility = clamp01(1.0 - 0.1 * f64::from(observation.images_missing_alt));
    let best_practices = if observation.https { 0.9 } else { 0.5 };

    let mut audits = BTreeMap::new();
    audits.insert(
        "first-contentful-paint".to_string(),
        AuditMetric::numeric(load * 0.6),
    );
    audits.insert("speed-index".to_string(), AuditMetric::numeric(load * 0.8));
    audits.insert(
        "largest-contentful-paint".to_string(),
        AuditMetric::numeric(load * 0.9),
    );

    ProbeResult {
        scores: CategoryScores {
            performance,
            accessibility,
            best_practices,
            seo,
        },
        audits,
        tier: Tier::Heuristic,
        degraded: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn healthy_page() -> PageObservation {
        PageObservation {
            load_time_ms: 1000.0,
            title: Some("Example".to_string()),
            meta_description: Some("An example page".to_string()),
            h1_count: 1,
            images_missing_alt: 0,
            https: true,
        }
    }

    #[test]
    fn fast_https_page_scores_well() {
        let result = score_observation(&healthy_page());
        assert_eq!(result.scores.performance, 0.8);
        assert_eq!(result.scores.seo, 1.0);
        assert_eq!(result.scores.accessibility, 1.0);
        assert_eq!(result.scores.best_practices, 0.9);
        assert_eq!(result.tier, Tier::Heuristic);
        assert!(result.degraded);
    }

    #[test]
    fn slow_load_clamps_performance_to_zero() {
        let mut page = healthy_page();
        page.load_time_ms = 9000.0;
        assert_eq!(score_observation(&page).scores.performance, 0.0);
    }

    #[test]
    fn seo_penalties_accumulate() {
        let mut page = healthy_page();
        page.title = None;
        page.meta_description = None;
        page.h1_count = 0;
        let seo = score_observation(&page).scores.seo;
        assert!((seo - 0.3).abs() < 1e-9);
    }

    #[test]
    fn multiple_h1_penalty() {
        let mut page = healthy_page();
        page.h1_count = 3;
        let seo = score_observation(&page).scores.seo;
        assert!((seo - 0.9).abs() < 1e-9);
    }

    #[test]
    fn missing_alt_text_degrades_accessibility() {
        let mut page = healthy_page();
        page.images_missing_alt = 4;
        let a11y = score_observation(&page).scores.accessibility;
        assert!((a11y - 0.6).abs() < 1e-9);

        page.images_missing_alt = 25;
        assert_eq!(score_observation(&page).scores.accessibility, 0.0);
    }

    #[test]
    fn http_page_loses_best_practices() {
        let mut page = healthy_page();
        page.https = false;
        assert_eq!(score_observation(&page).scores.best_practices, 0.5);
    }

    #[test]
    fn audits_synthesized_from_load_time() {
        let result = score_observation(&healthy_page());
        assert_eq!(
            result.audits["first-contentful-paint"].numeric_value,
            Some(600.0)
        );
        assert_eq!(result.audits["speed-index"].numeric_value, Some(800.0));
        assert_eq!(
            result.audits["largest-contentful-paint"].numeric_value,
            Some(900.0)
        );
    }
}

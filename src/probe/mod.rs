//! Tiered audit runner: a ranked chain of probe strategies
//!
//! Each tier owns its own timeout and is tried only after every tier above it
//! failed. The runner never surfaces an error; exhausting the chain yields the
//! static fallback scorecard with `tier = "static"`.

mod fallback;
mod heuristic;
mod lighthouse;

use std::time::Duration;

use async_trait::async_trait;

use crate::model::{ProbeConfig, ProbeResult, Tier};

pub use fallback::StaticFallbackProbe;
pub use heuristic::{score_observation, HeuristicProbe, PageObservation};
pub use lighthouse::LighthouseProbe;

#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    #[error("Probe timed out after {0:?}")]
    Timeout(Duration),

    #[error("Audit tool exited with {0}")]
    ToolFailed(std::process::ExitStatus),

    #[error("Unparseable scorecard: {0}")]
    Parse(String),

    #[error("Browser error: {0}")]
    Browser(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// One ranked strategy within the fallback chain
#[async_trait]
pub trait AuditProbe: Send + Sync {
    fn tier(&self) -> Tier;

    /// Attempt the probe within this tier's own budget. An error here means
    /// "tier failed, advance to next", never a caller-visible failure.
    async fn attempt(&self, url: &str) -> Result<ProbeResult, ProbeError>;
}

/// Runs the probe chain in rank order until one tier succeeds
pub struct TieredAuditRunner {
    chain: Vec<Box<dyn AuditProbe>>,
    fallback: StaticFallbackProbe,
}

impl TieredAuditRunner {
    pub fn new(config: &ProbeConfig) -> Self {
        Self::with_chain(vec![
            Box::new(LighthouseProbe::full(config)),
            Box::new(LighthouseProbe::reduced(config)),
            Box::new(HeuristicProbe::new(config.heuristic_timeout())),
        ])
    }

    /// Build a runner over an explicit chain. The static fallback is always
    /// appended implicitly.
    pub fn with_chain(chain: Vec<Box<dyn AuditProbe>>) -> Self {
        Self {
            chain,
            fallback: StaticFallbackProbe,
        }
    }

    /// Never fails: degrades through the chain and bottoms out on the static
    /// fallback scorecard.
    pub async fn run(&self, url: &str) -> ProbeResult {
        for probe in &self.chain {
            let tier = probe.tier();
            tracing::debug!(url = %url, tier = ?tier, "Attempting audit probe");

            match probe.attempt(url).await {
                Ok(result) => {
                    tracing::info!(
                        url = %url,
                        tier = ?tier,
                        degraded = result.degraded,
                        performance = result.scores.performance,
                        seo = result.scores.seo,
                        "Audit probe succeeded"
                    );
                    return result;
                }
                Err(e) => {
                    tracing::warn!(url = %url, tier = ?tier, error = %e, "Audit probe failed, advancing to next tier");
                }
            }
        }

        tracing::warn!(url = %url, "All audit tiers failed, using static fallback scores");
        self.fallback.result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CategoryScores;
    use std::collections::BTreeMap;

    struct FailingProbe(Tier);

    #[async_trait]
    impl AuditProbe for FailingProbe {
        fn tier(&self) -> Tier {
            self.0
        }

        async fn attempt(&self, _url: &str) -> Result<ProbeResult, ProbeError> {
            Err(ProbeError::Parse("simulated failure".into()))
        }
    }

    struct FixedProbe(Tier, f64);

    #[async_trait]
    impl AuditProbe for FixedProbe {
        fn tier(&self) -> Tier {
            self.0
        }

        async fn attempt(&self, _url: &str) -> Result<ProbeResult, ProbeError> {
            Ok(ProbeResult {
                scores: CategoryScores {
                    performance: self.1,
                    accessibility: self.1,
                    best_practices: self.1,
                    seo: self.1,
                },
                audits: BTreeMap::new(),
                tier: self.0,
                degraded: self.0 != Tier::Full,
            })
        }
    }

    #[tokio::test]
    async fn first_successful_tier_wins() {
        let runner = TieredAuditRunner::with_chain(vec![
            Box::new(FixedProbe(Tier::Full, 0.9)),
            Box::new(FixedProbe(Tier::Reduced, 0.1)),
        ]);
        let result = runner.run("https://example.com").await;
        assert_eq!(result.tier, Tier::Full);
        assert!(!result.degraded);
        assert_eq!(result.scores.performance, 0.9);
    }

    #[tokio::test]
    async fn failed_tier_falls_through_and_marks_degraded() {
        let runner = TieredAuditRunner::with_chain(vec![
            Box::new(FailingProbe(Tier::Full)),
            Box::new(FixedProbe(Tier::Reduced, 0.8)),
        ]);
        let result = runner.run("https://example.com").await;
        assert_eq!(result.tier, Tier::Reduced);
        assert!(result.degraded);
    }

    #[tokio::test]
    async fn exhausted_chain_returns_static_defaults_verbatim() {
        let runner = TieredAuditRunner::with_chain(vec![
            Box::new(FailingProbe(Tier::Full)),
            Box::new(FailingProbe(Tier::Reduced)),
            Box::new(FailingProbe(Tier::Heuristic)),
        ]);
        let result = runner.run("https://example.com").await;
        assert_eq!(result.tier, Tier::Static);
        assert!(result.degraded);
        assert_eq!(result.scores.performance, 0.5);
        assert_eq!(result.scores.accessibility, 0.7);
        assert_eq!(result.scores.best_practices, 0.6);
        assert_eq!(result.scores.seo, 0.5);
    }

    #[tokio::test]
    async fn empty_chain_bottoms_out_on_fallback() {
        let runner = TieredAuditRunner::with_chain(vec![]);
        let result = runner.run("https://example.com").await;
        assert_eq!(result.tier, Tier::Static);
    }
}

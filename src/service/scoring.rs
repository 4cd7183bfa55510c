//! Score aggregation: overall score and letter grade
//!
//! Pure and deterministic. The overall score is the mean of the four category
//! scores rounded to two decimals; the grade is a step function of it.

use crate::model::{Grade, PerformanceSummary, ProbeResult};

/// Combine category scores with the content-scan counts into the report summary
pub fn aggregate(
    probe: &ProbeResult,
    keywords_found: usize,
    backlinks_found: usize,
) -> PerformanceSummary {
    let overall_score = round2(probe.scores.mean());

    PerformanceSummary {
        overall_score,
        grade: grade_for(overall_score),
        keywords_found,
        backlinks_found,
        performance_score: probe.scores.performance,
        accessibility_score: probe.scores.accessibility,
        best_practices_score: probe.scores.best_practices,
        seo_score: probe.scores.seo,
    }
}

/// Grade thresholds, inclusive lower bounds
pub fn grade_for(score: f64) -> Grade {
    if score >= 0.90 {
        Grade::A
    } else if score >= 0.75 {
        Grade::B
    } else if score >= 0.60 {
        Grade::C
    } else if score >= 0.40 {
        Grade::D
    } else {
        Grade::F
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CategoryScores, Tier};
    use std::collections::BTreeMap;

    fn probe(performance: f64, accessibility: f64, best_practices: f64, seo: f64) -> ProbeResult {
        ProbeResult {
            scores: CategoryScores {
                performance,
                accessibility,
                best_practices,
                seo,
            },
            audits: BTreeMap::new(),
            tier: Tier::Full,
            degraded: false,
        }
    }

    #[test]
    fn overall_is_rounded_mean() {
        let summary = aggregate(&probe(0.91, 0.82, 0.73, 0.64), 12, 3);
        // mean = 0.775
        assert_eq!(summary.overall_score, 0.78);
        assert_eq!(summary.keywords_found, 12);
        assert_eq!(summary.backlinks_found, 3);
        assert_eq!(summary.performance_score, 0.91);
    }

    #[test]
    fn grade_boundaries() {
        assert_eq!(grade_for(0.90), Grade::A);
        assert_eq!(grade_for(0.89), Grade::B);
        assert_eq!(grade_for(0.75), Grade::B);
        assert_eq!(grade_for(0.74), Grade::C);
        assert_eq!(grade_for(0.60), Grade::C);
        assert_eq!(grade_for(0.59), Grade::D);
        assert_eq!(grade_for(0.40), Grade::D);
        assert_eq!(grade_for(0.39), Grade::F);
    }

    #[test]
    fn perfect_and_zero_scores() {
        assert_eq!(aggregate(&probe(1.0, 1.0, 1.0, 1.0), 0, 0).grade, Grade::A);
        let summary = aggregate(&probe(0.0, 0.0, 0.0, 0.0), 0, 0);
        assert_eq!(summary.overall_score, 0.0);
        assert_eq!(summary.grade, Grade::F);
    }
}

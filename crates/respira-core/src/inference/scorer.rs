//! Per-disease evidence accumulation.
//!
//! For each rule of a disease:
//! - symptom present: `raw += cf`
//! - symptom absent: `raw -= cf * ABSENCE_PENALTY_FRACTION`
//!
//! The percentage is `clamp(raw / max, 0, 1) * 100`, rounded to one decimal,
//! where `max` is the sum of the disease's positive CFs.

use crate::knowledge::Disease;
use crate::models::{ExplainedDiagnosis, Explanation, MatchedRule, PenalizedRule, PresentSet};

/// Fraction of an absent rule's CF subtracted from the raw score.
///
/// Applied uniformly to every absent rule regardless of its weight.
pub const ABSENCE_PENALTY_FRACTION: f64 = 0.5;

/// Score one disease against a present set.
///
/// A disease whose maximum positive score is not above zero scores 0.0 with
/// an empty breakdown.
pub fn score_disease(disease: &Disease, present: &PresentSet) -> ExplainedDiagnosis {
    let max_score = disease.max_positive_score();

    if max_score <= 0.0 {
        return ExplainedDiagnosis {
            disease: disease.name.clone(),
            percent: 0.0,
            explanation: Explanation {
                raw_score: 0.0,
                max_score,
                percent: 0.0,
                matched: Vec::new(),
                penalized: Vec::new(),
            },
        };
    }

    let mut raw_score = 0.0;
    let mut matched = Vec::new();
    let mut penalized = Vec::new();

    for rule in &disease.rules {
        if present.contains(&rule.symptom) {
            raw_score += rule.cf;
            matched.push(MatchedRule {
                symptom: rule.symptom.clone(),
                cf: rule.cf,
                explain: rule.explain.clone(),
            });
        } else {
            let penalty = rule.cf * ABSENCE_PENALTY_FRACTION;
            raw_score -= penalty;
            penalized.push(PenalizedRule {
                symptom: rule.symptom.clone(),
                penalty,
                cf: rule.cf,
                explain: rule.explain.clone(),
            });
        }
    }

    let percent = round_to_tenth((raw_score / max_score).clamp(0.0, 1.0) * 100.0);

    ExplainedDiagnosis {
        disease: disease.name.clone(),
        percent,
        explanation: Explanation {
            raw_score,
            max_score,
            percent,
            matched,
            penalized,
        },
    }
}

/// Round to one decimal place, ties to even.
fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round_ties_even() / 10.0
}

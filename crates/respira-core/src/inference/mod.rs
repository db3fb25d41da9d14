//! Forward-chaining inference over a certainty-factor knowledge base.
//!
//! Pipeline: Patient Profile → Normalization (present set) → Per-disease Scoring → Ranking

mod normalizer;
mod scorer;

pub use normalizer::*;
pub use scorer::*;

use std::cmp::Ordering;

use tracing::debug;

use crate::knowledge::KnowledgeBase;
use crate::models::{DiseaseScore, ExplainedDiagnosis, PatientProfile, PresentSet};

/// Inference engine bound to a read-only knowledge base.
///
/// Holds no mutable state; one engine can serve any number of requests, and
/// several engines may share the same knowledge base.
#[derive(Debug, Clone, Copy)]
pub struct InferenceEngine<'a> {
    kb: &'a KnowledgeBase,
    normalizer: SymptomNormalizer,
}

impl<'a> InferenceEngine<'a> {
    /// Create an engine over the given knowledge base.
    pub fn new(kb: &'a KnowledgeBase) -> Self {
        Self {
            kb,
            normalizer: SymptomNormalizer::new(),
        }
    }

    /// Rank every disease, returning only names and percentages.
    pub fn diagnose(&self, profile: &PatientProfile) -> Vec<DiseaseScore> {
        self.diagnose_with_explanation(profile)
            .iter()
            .map(ExplainedDiagnosis::to_score)
            .collect()
    }

    /// Rank every disease with a breakdown of matched and penalized rules.
    ///
    /// Sorted by percentage descending; ties keep knowledge base order.
    pub fn diagnose_with_explanation(&self, profile: &PatientProfile) -> Vec<ExplainedDiagnosis> {
        let present = self.normalizer.present_set(profile);

        let mut results: Vec<ExplainedDiagnosis> = self
            .kb
            .diseases()
            .iter()
            .map(|disease| {
                let result = score_disease(disease, &present);
                debug!(
                    disease = %result.disease,
                    raw = result.explanation.raw_score,
                    max = result.explanation.max_score,
                    percent = result.percent,
                    "Scored disease"
                );
                result
            })
            .collect();

        // Vec::sort_by is stable
        results.sort_by(|a, b| b.percent.partial_cmp(&a.percent).unwrap_or(Ordering::Equal));

        results
    }

    /// The present set this engine would derive for a profile.
    pub fn present_set(&self, profile: &PatientProfile) -> PresentSet {
        self.normalizer.present_set(profile)
    }

    /// Get the knowledge base for direct access.
    pub fn knowledge_base(&self) -> &'a KnowledgeBase {
        self.kb
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::knowledge::{Disease, Rule};
    use crate::models::BinarySymptom;

    fn verification_profile() -> PatientProfile {
        PatientProfile::new()
            .with_fever("high")
            .with_cough("dry")
            .with_symptom(BinarySymptom::ShortnessOfBreath)
            .with_symptom(BinarySymptom::Fatigue)
            .with_symptom(BinarySymptom::LossTasteSmell)
    }

    #[test]
    fn test_verification_case_ranks_covid_first() {
        let kb = KnowledgeBase::reference();
        let engine = InferenceEngine::new(&kb);

        let results = engine.diagnose(&verification_profile());

        assert_eq!(results.len(), kb.len());
        assert_eq!(results[0].disease, "COVID-19");
        assert!(results[0].percent >= 70.0);
    }

    #[test]
    fn test_diagnose_is_projection_of_explained() {
        let kb = KnowledgeBase::reference();
        let engine = InferenceEngine::new(&kb);
        let profile = verification_profile();

        let plain = engine.diagnose(&profile);
        let explained = engine.diagnose_with_explanation(&profile);

        let projected: Vec<DiseaseScore> = explained.iter().map(|e| e.to_score()).collect();
        assert_eq!(plain, projected);
    }

    #[test]
    fn test_ties_keep_knowledge_base_order() {
        let kb = KnowledgeBase::new(vec![
            Disease::new("Second", vec![Rule::new("wheezing", 0.5)]),
            Disease::new("First", vec![Rule::new("fatigue", 0.9)]),
            Disease::new("Third", vec![Rule::new("chest_pain", 0.7)]),
        ])
        .unwrap();
        let engine = InferenceEngine::new(&kb);

        // Nothing reported: all three clamp to 0.0
        let names: Vec<String> = engine
            .diagnose(&PatientProfile::new())
            .into_iter()
            .map(|s| s.disease)
            .collect();
        assert_eq!(names, vec!["Second", "First", "Third"]);
    }

    #[test]
    fn test_empty_knowledge_base() {
        let kb = KnowledgeBase::new(vec![]).unwrap();
        let engine = InferenceEngine::new(&kb);

        assert!(engine.diagnose(&verification_profile()).is_empty());
    }

    #[test]
    fn test_present_set_exposed() {
        let kb = KnowledgeBase::reference();
        let engine = InferenceEngine::new(&kb);

        let present = engine.present_set(&verification_profile());
        assert_eq!(present.len(), 5);
        assert!(present.contains("fever_high"));
        assert!(!present.contains("smoking_history"));
    }
}

//! Certainty-factor knowledge base.
//!
//! A knowledge base is an ordered table of diseases, each with an ordered set of
//! rules `IF symptom THEN disease (CF)`. The table is validated once when it is
//! built and is read-only afterwards; inference borrows it.

mod reference;

use std::collections::{BTreeSet, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;
use tracing::debug;

/// Knowledge base errors.
#[derive(Error, Debug)]
pub enum KnowledgeError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Certainty factor {cf} for {disease}/{symptom} is outside [0, 1]")]
    CertaintyOutOfRange {
        disease: String,
        symptom: String,
        cf: f64,
    },

    #[error("Disease name must not be empty")]
    EmptyDiseaseName,

    #[error("Duplicate disease: {0}")]
    DuplicateDisease(String),

    #[error("Empty symptom key in rules for: {0}")]
    EmptySymptomKey(String),

    #[error("Duplicate rule {symptom} for: {disease}")]
    DuplicateRule { disease: String, symptom: String },
}

pub type KnowledgeResult<T> = Result<T, KnowledgeError>;

/// A single weighted rule linking a symptom key to a disease.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Rule {
    /// Symptom key (e.g., "fever_high", "wheezing")
    pub symptom: String,
    /// Certainty factor (0.0 - 1.0)
    pub cf: f64,
    /// Why the symptom supports the disease
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explain: Option<String>,
}

impl Rule {
    pub fn new(symptom: impl Into<String>, cf: f64) -> Self {
        Self {
            symptom: symptom.into(),
            cf,
            explain: None,
        }
    }

    pub fn with_explain(mut self, explain: impl Into<String>) -> Self {
        self.explain = Some(explain.into());
        self
    }
}

/// A disease and the rules that support it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Disease {
    pub name: String,
    #[serde(default)]
    pub rules: Vec<Rule>,
}

impl Disease {
    pub fn new(name: impl Into<String>, rules: Vec<Rule>) -> Self {
        Self {
            name: name.into(),
            rules,
        }
    }

    /// Sum of positive CFs, the normalization denominator for this disease.
    pub fn max_positive_score(&self) -> f64 {
        self.rules.iter().map(|r| r.cf.max(0.0)).sum()
    }

    fn validate(&self) -> KnowledgeResult<()> {
        if self.name.trim().is_empty() {
            return Err(KnowledgeError::EmptyDiseaseName);
        }

        let mut seen = HashSet::new();
        for rule in &self.rules {
            if rule.symptom.trim().is_empty() {
                return Err(KnowledgeError::EmptySymptomKey(self.name.clone()));
            }
            // NaN fails the range check too
            if !(0.0..=1.0).contains(&rule.cf) {
                return Err(KnowledgeError::CertaintyOutOfRange {
                    disease: self.name.clone(),
                    symptom: rule.symptom.clone(),
                    cf: rule.cf,
                });
            }
            if !seen.insert(rule.symptom.as_str()) {
                return Err(KnowledgeError::DuplicateRule {
                    disease: self.name.clone(),
                    symptom: rule.symptom.clone(),
                });
            }
        }

        Ok(())
    }
}

/// Validated, read-only disease table.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(transparent)]
pub struct KnowledgeBase {
    diseases: Vec<Disease>,
}

impl KnowledgeBase {
    /// Build a knowledge base, validating every disease and rule.
    pub fn new(diseases: Vec<Disease>) -> KnowledgeResult<Self> {
        let mut names = HashSet::new();
        for disease in &diseases {
            disease.validate()?;
            if !names.insert(disease.name.as_str()) {
                return Err(KnowledgeError::DuplicateDisease(disease.name.clone()));
            }
        }

        Ok(Self { diseases })
    }

    /// The built-in respiratory disease table.
    pub fn reference() -> Self {
        Self {
            diseases: reference::diseases(),
        }
    }

    /// Parse a knowledge base from a JSON array of diseases.
    pub fn from_json(json: &str) -> KnowledgeResult<Self> {
        let diseases: Vec<Disease> = serde_json::from_str(json)?;
        let kb = Self::new(diseases)?;
        debug!(diseases = kb.len(), "Parsed knowledge base");
        Ok(kb)
    }

    /// Load a knowledge base from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> KnowledgeResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let kb = Self::from_json(&json)?;
        debug!(path = %path.display(), diseases = kb.len(), "Loaded knowledge base");
        Ok(kb)
    }

    pub fn diseases(&self) -> &[Disease] {
        &self.diseases
    }

    pub fn disease(&self, name: &str) -> Option<&Disease> {
        self.diseases.iter().find(|d| d.name == name)
    }

    pub fn len(&self) -> usize {
        self.diseases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diseases.is_empty()
    }

    /// Sum of positive CFs for a disease; 0.0 if the disease is unknown.
    pub fn max_positive_score(&self, disease: &str) -> f64 {
        self.disease(disease)
            .map(Disease::max_positive_score)
            .unwrap_or(0.0)
    }

    /// All symptom keys referenced by any rule, sorted.
    pub fn symptom_keys(&self) -> Vec<String> {
        let keys: BTreeSet<&str> = self
            .diseases
            .iter()
            .flat_map(|d| d.rules.iter().map(|r| r.symptom.as_str()))
            .collect();
        keys.into_iter().map(String::from).collect()
    }

    /// Hex SHA-256 over the table contents, in order.
    ///
    /// Identifies which table produced a report.
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        for disease in &self.diseases {
            hash_field(&mut hasher, disease.name.as_bytes());
            hasher.update((disease.rules.len() as u64).to_le_bytes());
            for rule in &disease.rules {
                hash_field(&mut hasher, rule.symptom.as_bytes());
                hasher.update(rule.cf.to_bits().to_le_bytes());
                match &rule.explain {
                    Some(text) => {
                        hasher.update([1u8]);
                        hash_field(&mut hasher, text.as_bytes());
                    }
                    None => hasher.update([0u8]),
                }
            }
        }
        hex::encode(hasher.finalize())
    }
}

/// Length-prefixed so adjacent fields cannot run together.
fn hash_field(hasher: &mut Sha256, bytes: &[u8]) {
    hasher.update((bytes.len() as u64).to_le_bytes());
    hasher.update(bytes);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_table_is_valid() {
        let kb = KnowledgeBase::reference();
        let rebuilt = KnowledgeBase::new(kb.diseases().to_vec()).unwrap();

        assert_eq!(rebuilt, kb);
        assert_eq!(kb.len(), 6);
        assert!(kb.diseases().iter().all(|d| !d.rules.is_empty()));
    }

    #[test]
    fn test_max_positive_score() {
        let kb = KnowledgeBase::reference();

        assert!((kb.max_positive_score("COVID-19") - 4.35).abs() < 1e-9);
        assert!((kb.max_positive_score("Asthma") - 3.3).abs() < 1e-9);
        assert_eq!(kb.max_positive_score("Influenza"), 0.0);
    }

    #[test]
    fn test_empty_disease_max_is_zero() {
        let kb = KnowledgeBase::new(vec![Disease::new("Placeholder", vec![])]).unwrap();
        assert_eq!(kb.max_positive_score("Placeholder"), 0.0);
    }

    #[test]
    fn test_symptom_keys_sorted_and_unique() {
        let keys = KnowledgeBase::reference().symptom_keys();

        assert_eq!(
            keys,
            vec![
                "chest_pain",
                "cough_blood",
                "cough_dry",
                "cough_wet",
                "fatigue",
                "fever_high",
                "fever_low",
                "fever_none",
                "loss_taste_smell",
                "shortness_of_breath",
                "smoking_history",
                "wheezing",
            ]
        );
    }

    #[test]
    fn test_rejects_out_of_range_cf() {
        let result = KnowledgeBase::new(vec![Disease::new(
            "Flu",
            vec![Rule::new("fever_high", 1.2)],
        )]);
        assert!(matches!(
            result,
            Err(KnowledgeError::CertaintyOutOfRange { .. })
        ));

        let result = KnowledgeBase::new(vec![Disease::new(
            "Flu",
            vec![Rule::new("fever_high", f64::NAN)],
        )]);
        assert!(matches!(
            result,
            Err(KnowledgeError::CertaintyOutOfRange { .. })
        ));
    }

    #[test]
    fn test_rejects_duplicates() {
        let result = KnowledgeBase::new(vec![
            Disease::new("Flu", vec![Rule::new("fatigue", 0.5)]),
            Disease::new("Flu", vec![Rule::new("fatigue", 0.4)]),
        ]);
        assert!(matches!(result, Err(KnowledgeError::DuplicateDisease(name)) if name == "Flu"));

        let result = KnowledgeBase::new(vec![Disease::new(
            "Flu",
            vec![Rule::new("fatigue", 0.5), Rule::new("fatigue", 0.3)],
        )]);
        assert!(matches!(result, Err(KnowledgeError::DuplicateRule { .. })));
    }

    #[test]
    fn test_rejects_empty_names() {
        let result = KnowledgeBase::new(vec![Disease::new("  ", vec![])]);
        assert!(matches!(result, Err(KnowledgeError::EmptyDiseaseName)));

        let result = KnowledgeBase::new(vec![Disease::new("Flu", vec![Rule::new("", 0.5)])]);
        assert!(matches!(result, Err(KnowledgeError::EmptySymptomKey(_))));
    }

    #[test]
    fn test_from_json_preserves_order() {
        let json = r#"[
            {"name": "Zeta", "rules": [{"symptom": "wheezing", "cf": 0.9, "explain": "tight airways"}]},
            {"name": "Alpha", "rules": [{"symptom": "fatigue", "cf": 0.4}]},
            {"name": "Empty"}
        ]"#;
        let kb = KnowledgeBase::from_json(json).unwrap();

        let names: Vec<&str> = kb.diseases().iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["Zeta", "Alpha", "Empty"]);
        assert_eq!(kb.diseases()[0].rules[0].explain.as_deref(), Some("tight airways"));
        assert_eq!(kb.diseases()[1].rules[0].explain, None);
        assert!(kb.diseases()[2].rules.is_empty());
    }

    #[test]
    fn test_from_json_malformed() {
        assert!(matches!(
            KnowledgeBase::from_json("{not json"),
            Err(KnowledgeError::Json(_))
        ));
    }

    #[test]
    fn test_fingerprint_tracks_content() {
        let kb = KnowledgeBase::reference();
        let fp = kb.fingerprint();

        assert_eq!(fp.len(), 64);
        assert_eq!(fp, KnowledgeBase::reference().fingerprint());

        let mut diseases = kb.diseases().to_vec();
        diseases[0].rules[0].cf = 0.85;
        let tweaked = KnowledgeBase::new(diseases).unwrap();
        assert_ne!(tweaked.fingerprint(), fp);
    }
}

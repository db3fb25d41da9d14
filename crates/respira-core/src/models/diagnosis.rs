//! Diagnosis result models.

use serde::{Deserialize, Serialize};

/// One ranked entry of a diagnosis.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DiseaseScore {
    /// Disease name as listed in the knowledge base
    pub disease: String,
    /// Match percentage (0.0 - 100.0), one decimal place
    pub percent: f64,
}

/// A ranked entry together with the evidence that produced it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExplainedDiagnosis {
    pub disease: String,
    pub percent: f64,
    pub explanation: Explanation,
}

impl ExplainedDiagnosis {
    /// Drop the explanation payload.
    pub fn to_score(&self) -> DiseaseScore {
        DiseaseScore {
            disease: self.disease.clone(),
            percent: self.percent,
        }
    }
}

/// Breakdown of how a disease score was computed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Explanation {
    /// Signed sum of matched CFs minus absence penalties
    pub raw_score: f64,
    /// Sum of the disease's positive CFs (normalization denominator)
    pub max_score: f64,
    /// Final percentage, identical to the ranked entry's
    pub percent: f64,
    /// Rules whose symptom was present, in knowledge base order
    pub matched: Vec<MatchedRule>,
    /// Rules whose symptom was absent, in knowledge base order
    pub penalized: Vec<PenalizedRule>,
}

/// A rule that contributed positive evidence.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchedRule {
    pub symptom: String,
    pub cf: f64,
    pub explain: Option<String>,
}

/// A rule whose expected symptom was absent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PenalizedRule {
    pub symptom: String,
    /// Amount subtracted from the raw score
    pub penalty: f64,
    pub cf: f64,
    pub explain: Option<String>,
}

/// Confidence band of the best-ranked disease.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfidenceTier {
    High,
    Moderate,
    Low,
}

impl ConfidenceTier {
    /// Lower bound (inclusive) of the High tier.
    pub const HIGH_THRESHOLD: f64 = 75.0;
    /// Lower bound (inclusive) of the Moderate tier.
    pub const MODERATE_THRESHOLD: f64 = 40.0;

    pub fn from_percent(percent: f64) -> Self {
        if percent >= Self::HIGH_THRESHOLD {
            Self::High
        } else if percent >= Self::MODERATE_THRESHOLD {
            Self::Moderate
        } else {
            Self::Low
        }
    }

    pub fn headline(&self) -> &'static str {
        match self {
            Self::High => "High Confidence Match",
            Self::Moderate => "Moderate Confidence Match",
            Self::Low => "Low Confidence Match",
        }
    }

    pub fn advice(&self) -> &'static str {
        match self {
            Self::High => {
                "Schedule consultation with pulmonologist for confirmation and treatment plan."
            }
            Self::Moderate => {
                "Consult primary care physician for further evaluation and testing."
            }
            Self::Low => {
                "Continue symptom monitoring. Seek medical care if symptoms persist or worsen."
            }
        }
    }
}

impl std::fmt::Display for ConfidenceTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::High => write!(f, "HIGH"),
            Self::Moderate => write!(f, "MODERATE"),
            Self::Low => write!(f, "LOW"),
        }
    }
}

/// Advice derived from the top-ranked disease.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recommendation {
    pub disease: String,
    pub percent: f64,
    pub tier: ConfidenceTier,
    pub advice: String,
}

impl Recommendation {
    /// Build a recommendation from a ranked diagnosis. `None` when it is empty.
    pub fn for_diagnosis(ranked: &[DiseaseScore]) -> Option<Self> {
        let best = ranked.first()?;
        let tier = ConfidenceTier::from_percent(best.percent);
        Some(Self {
            disease: best.disease.clone(),
            percent: best.percent,
            tier,
            advice: tier.advice().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(disease: &str, percent: f64) -> DiseaseScore {
        DiseaseScore {
            disease: disease.into(),
            percent,
        }
    }

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(ConfidenceTier::from_percent(100.0), ConfidenceTier::High);
        assert_eq!(ConfidenceTier::from_percent(75.0), ConfidenceTier::High);
        assert_eq!(ConfidenceTier::from_percent(74.9), ConfidenceTier::Moderate);
        assert_eq!(ConfidenceTier::from_percent(40.0), ConfidenceTier::Moderate);
        assert_eq!(ConfidenceTier::from_percent(39.9), ConfidenceTier::Low);
        assert_eq!(ConfidenceTier::from_percent(0.0), ConfidenceTier::Low);
    }

    #[test]
    fn test_recommendation_uses_first_entry() {
        let ranked = vec![score("COVID-19", 75.9), score("Pneumonia", 36.8)];
        let rec = Recommendation::for_diagnosis(&ranked).unwrap();

        assert_eq!(rec.disease, "COVID-19");
        assert_eq!(rec.tier, ConfidenceTier::High);
        assert!(rec.advice.contains("pulmonologist"));
    }

    #[test]
    fn test_recommendation_empty() {
        assert!(Recommendation::for_diagnosis(&[]).is_none());
    }

    #[test]
    fn test_to_score_drops_explanation() {
        let explained = ExplainedDiagnosis {
            disease: "Asthma".into(),
            percent: 27.3,
            explanation: Explanation {
                raw_score: 0.9,
                max_score: 3.3,
                percent: 27.3,
                matched: vec![],
                penalized: vec![],
            },
        };
        assert_eq!(explained.to_score(), score("Asthma", 27.3));
    }
}

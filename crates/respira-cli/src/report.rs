//! Diagnosis report rendering.

use std::fmt::Write;

use respira_core::{DiseaseScore, ExplainedDiagnosis, KnowledgeBase, Recommendation};
use serde::Serialize;

/// Report format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ReportFormat {
    Text,
    Json,
}

/// Everything produced for one diagnostic request.
#[derive(Debug, Serialize)]
pub struct DiagnosisReport {
    /// Fingerprint of the knowledge base that produced the scores
    pub knowledge_base: String,
    /// Number of diseases ranked before any truncation
    pub ranked: usize,
    pub present: Vec<String>,
    pub results: Vec<ExplainedDiagnosis>,
    pub recommendation: Option<Recommendation>,
    #[serde(skip)]
    pub explain: bool,
}

impl DiagnosisReport {
    pub fn new(
        kb: &KnowledgeBase,
        present: Vec<String>,
        results: Vec<ExplainedDiagnosis>,
        top: Option<usize>,
        explain: bool,
    ) -> Self {
        let scores: Vec<DiseaseScore> = results.iter().map(ExplainedDiagnosis::to_score).collect();
        let recommendation = Recommendation::for_diagnosis(&scores);
        let ranked = results.len();
        let results = match top {
            Some(n) => results.into_iter().take(n).collect(),
            None => results,
        };

        Self {
            knowledge_base: kb.fingerprint(),
            ranked,
            present,
            results,
            recommendation,
            explain,
        }
    }

    pub fn render(&self, format: ReportFormat) -> anyhow::Result<String> {
        match format {
            ReportFormat::Json => self.render_json(),
            ReportFormat::Text => Ok(self.render_text()),
        }
    }

    fn render_json(&self) -> anyhow::Result<String> {
        if self.explain {
            return Ok(serde_json::to_string_pretty(self)?);
        }

        // Without --explain the breakdown is left out
        let scores: Vec<DiseaseScore> = self.results.iter().map(ExplainedDiagnosis::to_score).collect();
        let value = serde_json::json!({
            "knowledge_base": self.knowledge_base,
            "ranked": self.ranked,
            "present": self.present,
            "results": scores,
            "recommendation": self.recommendation,
        });
        Ok(serde_json::to_string_pretty(&value)?)
    }

    fn render_text(&self) -> String {
        let mut out = String::new();

        let present = if self.present.is_empty() {
            "(none)".to_string()
        } else {
            self.present.join(", ")
        };
        let _ = writeln!(out, "Reported symptoms: {}", present);
        let _ = writeln!(out, "\nDiagnosis Results\n{}", "=".repeat(50));

        for (idx, result) in self.results.iter().enumerate() {
            let _ = writeln!(
                out,
                "#{} of {}  {:<20} {:>5.1}%",
                idx + 1,
                self.ranked,
                result.disease,
                result.percent
            );

            if self.explain {
                let e = &result.explanation;
                let _ = writeln!(out, "    raw {:.3} / max {:.3}", e.raw_score, e.max_score);
                for m in &e.matched {
                    let _ = writeln!(
                        out,
                        "    + {:<20} cf {:.2}  {}",
                        m.symptom,
                        m.cf,
                        m.explain.as_deref().unwrap_or("")
                    );
                }
                for p in &e.penalized {
                    let _ = writeln!(
                        out,
                        "    - {:<20} -{:.3} (cf {:.2})  {}",
                        p.symptom,
                        p.penalty,
                        p.cf,
                        p.explain.as_deref().unwrap_or("")
                    );
                }
            }
        }

        if let Some(rec) = &self.recommendation {
            let _ = writeln!(out, "\nClinical Recommendation\n{}", "=".repeat(50));
            let _ = writeln!(out, "{} [{}]", rec.tier.headline(), rec.tier);
            let _ = writeln!(out, "Diagnosis: {} ({:.1}%)", rec.disease, rec.percent);
            let _ = writeln!(out, "Recommendation: {}", rec.advice);
        }

        out
    }
}

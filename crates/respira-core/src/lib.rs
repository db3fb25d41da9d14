//! Respira Core Library
//!
//! Rule-based respiratory disease ranking using expert certainty factors.
//!
//! # Architecture
//!
//! ```text
//! Patient Profile ──► Symptom Normalizer ──► Present Set
//!                                               │
//!                         Knowledge Base ───────┤
//!                     (disease → rules + CF)    │
//!                                               ▼
//!                                  ┌──────────────────────────┐
//!                                  │   Per-disease scoring    │
//!                                  │  present: raw += cf      │
//!                                  │  absent:  raw -= cf / 2  │
//!                                  │  clamp(raw / max) × 100  │
//!                                  └────────────┬─────────────┘
//!                                               ▼
//!                              Ranked (disease, percent) + explanations
//! ```
//!
//! # Core Principle
//!
//! **Scores are advisory.** Malformed or partial input degrades to
//! "symptom not reported" rather than failing.
//!
//! # Modules
//!
//! - [`models`]: Domain types (PatientProfile, PresentSet, DiseaseScore, Explanation, etc.)
//! - [`knowledge`]: Validated disease/rule table and the built-in reference table
//! - [`inference`]: Normalizer, per-disease scorer and the ranking engine

pub mod inference;
pub mod knowledge;
pub mod models;

// Re-export commonly used types
pub use inference::{InferenceEngine, SymptomNormalizer, ABSENCE_PENALTY_FRACTION};
pub use knowledge::{Disease, KnowledgeBase, KnowledgeError, KnowledgeResult, Rule};
pub use models::{
    BinarySymptom, ConfidenceTier, CoughKind, DiseaseScore, ExplainedDiagnosis, Explanation,
    FeverLevel, MatchedRule, PatientProfile, PenalizedRule, PresentSet, Recommendation,
};

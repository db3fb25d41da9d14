//! Patient profile normalization.
//!
//! Flattens a profile into the set of symptom keys that are present:
//! - Fever level → `fever_none` / `fever_low` / `fever_high`
//! - Cough type → `cough_dry` / `cough_wet` / `cough_blood` ("none" adds nothing)
//! - Yes/no symptoms → their attribute name when reported

use tracing::{debug, trace};

use crate::models::{BinarySymptom, CoughKind, FeverLevel, PatientProfile, PresentSet};

/// Normalizer for patient profiles.
#[derive(Debug, Clone, Copy, Default)]
pub struct SymptomNormalizer;

impl SymptomNormalizer {
    pub fn new() -> Self {
        Self
    }

    /// Derive the present set for a profile. Unrecognized values add no key.
    pub fn present_set(&self, profile: &PatientProfile) -> PresentSet {
        let mut present = PresentSet::new();

        if let Some(value) = profile.fever.as_deref() {
            match FeverLevel::parse(value) {
                Some(level) => {
                    present.insert(level.symptom_key());
                }
                None => debug!(value, "Ignoring unrecognized fever value"),
            }
        }

        if let Some(value) = profile.cough.as_deref() {
            match CoughKind::parse(value) {
                Some(kind) => {
                    present.insert(kind.symptom_key());
                }
                None if value == "none" => {}
                None => debug!(value, "Ignoring unrecognized cough value"),
            }
        }

        for symptom in BinarySymptom::ALL {
            if profile.reports(symptom) {
                present.insert(symptom.symptom_key());
            }
        }

        trace!(keys = ?present.iter().collect::<Vec<_>>(), "Derived present set");
        present
    }
}

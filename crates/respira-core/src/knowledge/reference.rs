//! Built-in respiratory disease table.
//!
//! Values are illustrative expert weights, not clinical guidance.

use super::{Disease, Rule};

fn rule(symptom: &str, cf: f64, explain: &str) -> Rule {
    Rule::new(symptom, cf).with_explain(explain)
}

pub(super) fn diseases() -> Vec<Disease> {
    vec![
        Disease::new(
            "Asthma",
            vec![
                rule("wheezing", 0.9, "Wheezing is a hallmark of airway constriction in asthma."),
                rule("shortness_of_breath", 0.8, "Airflow limitation causes breathlessness."),
                rule("cough_dry", 0.6, "Dry cough can occur with bronchospasm in asthma."),
                rule("fever_none", 0.2, "Absence of fever slightly supports non-infectious causes like asthma."),
                rule("chest_pain", 0.3, "Chest tightness or pain may accompany severe asthma."),
                rule("fatigue", 0.3, "Reduced activity tolerance can follow persistent breathlessness."),
                rule("smoking_history", 0.2, "Smoking can worsen airway hyperreactivity."),
            ],
        ),
        Disease::new(
            "COPD",
            vec![
                rule("smoking_history", 0.9, "Chronic smoking is the primary risk factor for COPD."),
                rule("cough_wet", 0.7, "Productive cough is common in chronic bronchitis (COPD)."),
                rule("shortness_of_breath", 0.8, "Progressive dyspnea is a core COPD feature."),
                rule("wheezing", 0.5, "Wheezing can be present in COPD due to airflow obstruction."),
                rule("fatigue", 0.5, "Reduced exercise tolerance is common in COPD."),
                rule("fever_none", 0.1, "Fever is less typical for chronic non-infectious COPD baseline."),
            ],
        ),
        Disease::new(
            "Pneumonia",
            vec![
                rule("fever_high", 0.9, "High fever often accompanies infectious pneumonia."),
                rule("cough_wet", 0.8, "Productive cough with purulent sputum suggests pulmonary infection."),
                rule("chest_pain", 0.6, "Pleuritic chest pain can occur with lung consolidation."),
                rule("shortness_of_breath", 0.7, "Infection and consolidation impair gas exchange."),
                rule("fatigue", 0.6, "Systemic illness commonly causes fatigue."),
                rule("smoking_history", 0.2, "Smoking is a minor risk factor for some pneumonias."),
            ],
        ),
        Disease::new(
            "COVID-19",
            vec![
                rule("fever_high", 0.8, "Fever is a common sign of viral infection including COVID-19."),
                rule("fever_low", 0.4, "Low-grade fever can be seen in viral illness."),
                rule("cough_dry", 0.7, "Dry cough is frequently reported in COVID-19."),
                rule("shortness_of_breath", 0.6, "Lower respiratory involvement can cause dyspnea."),
                rule("fatigue", 0.6, "Fatigue is a typical systemic symptom of COVID-19."),
                rule("loss_taste_smell", 0.95, "Anosmia/ageusia is a strong, relatively specific feature of COVID-19."),
                rule("chest_pain", 0.3, "Chest discomfort may occur in some cases."),
            ],
        ),
        Disease::new(
            "Tuberculosis",
            vec![
                rule("fever_low", 0.6, "Low-grade fever is often seen in TB."),
                rule("cough_blood", 0.8, "Hemoptysis can be a feature of lung TB."),
                rule("cough_wet", 0.5, "Chronic productive cough may indicate TB or chronic infections."),
                rule("fatigue", 0.7, "Systemic symptoms such as fatigue are common in TB."),
                rule("shortness_of_breath", 0.5, "Advanced pulmonary TB can cause dyspnea."),
                rule("smoking_history", 0.3, "Smoking is a moderate risk factor for some TB outcomes."),
            ],
        ),
        Disease::new(
            "Acute Bronchitis",
            vec![
                rule("cough_dry", 0.5, "Acute bronchitis may start with a dry cough."),
                rule("cough_wet", 0.6, "Productive cough often develops in bronchitis."),
                rule("fever_low", 0.4, "Mild fever can accompany bronchitis."),
                rule("fatigue", 0.4, "Fatigue may follow acute respiratory infection."),
                rule("shortness_of_breath", 0.3, "Mild dyspnea can happen with bronchitis."),
            ],
        ),
    ]
}

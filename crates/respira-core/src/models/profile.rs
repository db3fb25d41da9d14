//! Patient profile models and symptom vocabulary.

use std::collections::BTreeSet;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Reported fever level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeverLevel {
    None,
    Low,
    High,
}

impl FeverLevel {
    /// Parse a reported fever value. Only the exact lowercase forms are recognized.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "none" => Some(Self::None),
            "low" => Some(Self::Low),
            "high" => Some(Self::High),
            _ => None,
        }
    }

    /// Symptom key used by knowledge base rules.
    pub fn symptom_key(&self) -> &'static str {
        match self {
            Self::None => "fever_none",
            Self::Low => "fever_low",
            Self::High => "fever_high",
        }
    }
}

/// Reported cough type. "none" is not a cough kind and yields no key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoughKind {
    Dry,
    Wet,
    Blood,
}

impl CoughKind {
    /// Parse a reported cough value.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "dry" => Some(Self::Dry),
            "wet" => Some(Self::Wet),
            "blood" => Some(Self::Blood),
            _ => None,
        }
    }

    /// Symptom key used by knowledge base rules.
    pub fn symptom_key(&self) -> &'static str {
        match self {
            Self::Dry => "cough_dry",
            Self::Wet => "cough_wet",
            Self::Blood => "cough_blood",
        }
    }
}

/// Yes/no symptoms. The symptom key is the attribute name itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BinarySymptom {
    ShortnessOfBreath,
    Wheezing,
    ChestPain,
    Fatigue,
    LossTasteSmell,
    SmokingHistory,
}

impl BinarySymptom {
    pub const ALL: [BinarySymptom; 6] = [
        Self::ShortnessOfBreath,
        Self::Wheezing,
        Self::ChestPain,
        Self::Fatigue,
        Self::LossTasteSmell,
        Self::SmokingHistory,
    ];

    pub fn symptom_key(&self) -> &'static str {
        match self {
            Self::ShortnessOfBreath => "shortness_of_breath",
            Self::Wheezing => "wheezing",
            Self::ChestPain => "chest_pain",
            Self::Fatigue => "fatigue",
            Self::LossTasteSmell => "loss_taste_smell",
            Self::SmokingHistory => "smoking_history",
        }
    }
}

/// A single diagnostic request's input.
///
/// Deserialization is lenient: missing attributes mean "not reported", unknown
/// attributes are ignored, and a value of the wrong shape degrades to
/// "not reported" instead of failing. `age` and `gender` are carried for
/// display and never affect scoring.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatientProfile {
    /// Age in years
    #[serde(deserialize_with = "lenient_age")]
    pub age: Option<u32>,
    #[serde(deserialize_with = "lenient_string")]
    pub gender: Option<String>,
    /// "none" | "low" | "high"
    #[serde(deserialize_with = "lenient_string")]
    pub fever: Option<String>,
    /// "dry" | "wet" | "blood"
    #[serde(deserialize_with = "lenient_string")]
    pub cough: Option<String>,
    #[serde(deserialize_with = "truthy")]
    pub shortness_of_breath: bool,
    #[serde(deserialize_with = "truthy")]
    pub wheezing: bool,
    #[serde(deserialize_with = "truthy")]
    pub chest_pain: bool,
    #[serde(deserialize_with = "truthy")]
    pub fatigue: bool,
    #[serde(deserialize_with = "truthy")]
    pub loss_taste_smell: bool,
    #[serde(deserialize_with = "truthy")]
    pub smoking_history: bool,
}

impl PatientProfile {
    /// Create an empty profile (nothing reported).
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fever(mut self, fever: impl Into<String>) -> Self {
        self.fever = Some(fever.into());
        self
    }

    pub fn with_cough(mut self, cough: impl Into<String>) -> Self {
        self.cough = Some(cough.into());
        self
    }

    pub fn with_symptom(mut self, symptom: BinarySymptom) -> Self {
        *self.flag_mut(symptom) = true;
        self
    }

    pub fn with_age(mut self, age: u32) -> Self {
        self.age = Some(age);
        self
    }

    pub fn with_gender(mut self, gender: impl Into<String>) -> Self {
        self.gender = Some(gender.into());
        self
    }

    /// Whether the patient reports the given yes/no symptom.
    pub fn reports(&self, symptom: BinarySymptom) -> bool {
        match symptom {
            BinarySymptom::ShortnessOfBreath => self.shortness_of_breath,
            BinarySymptom::Wheezing => self.wheezing,
            BinarySymptom::ChestPain => self.chest_pain,
            BinarySymptom::Fatigue => self.fatigue,
            BinarySymptom::LossTasteSmell => self.loss_taste_smell,
            BinarySymptom::SmokingHistory => self.smoking_history,
        }
    }

    fn flag_mut(&mut self, symptom: BinarySymptom) -> &mut bool {
        match symptom {
            BinarySymptom::ShortnessOfBreath => &mut self.shortness_of_breath,
            BinarySymptom::Wheezing => &mut self.wheezing,
            BinarySymptom::ChestPain => &mut self.chest_pain,
            BinarySymptom::Fatigue => &mut self.fatigue,
            BinarySymptom::LossTasteSmell => &mut self.loss_taste_smell,
            BinarySymptom::SmokingHistory => &mut self.smoking_history,
        }
    }
}

/// Symptom keys considered true for one patient. Built fresh per request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PresentSet {
    keys: BTreeSet<String>,
}

impl PresentSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>) -> bool {
        self.keys.insert(key.into())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for PresentSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            keys: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Python-style truthiness for flag values.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(false, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

fn truthy<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(is_truthy(&value))
}

fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(Some(s)),
        _ => Ok(None),
    }
}

fn lenient_age<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u32>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_u64().and_then(|n| u32::try_from(n).ok()))
}

//! Static registry of the eight health measurements collected by the form.
//!
//! The registry is the single source of truth for field identity, bounds and
//! validation messages. Order matters only for presentation.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Closed set of measurement identifiers.
///
/// Serialized with the exact keys the prediction service expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FieldId {
    Pregnancies,
    Glucose,
    BloodPressure,
    SkinThickness,
    Insulin,
    #[serde(rename = "BMI")]
    Bmi,
    DiabetesPedigreeFunction,
    Age,
}

impl FieldId {
    pub const ALL: [FieldId; 8] = [
        FieldId::Pregnancies,
        FieldId::Glucose,
        FieldId::BloodPressure,
        FieldId::SkinThickness,
        FieldId::Insulin,
        FieldId::Bmi,
        FieldId::DiabetesPedigreeFunction,
        FieldId::Age,
    ];

    /// Wire key used in the prediction payload
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldId::Pregnancies => "Pregnancies",
            FieldId::Glucose => "Glucose",
            FieldId::BloodPressure => "BloodPressure",
            FieldId::SkinThickness => "SkinThickness",
            FieldId::Insulin => "Insulin",
            FieldId::Bmi => "BMI",
            FieldId::DiabetesPedigreeFunction => "DiabetesPedigreeFunction",
            FieldId::Age => "Age",
        }
    }

    /// Registry entry for this field
    pub fn spec(&self) -> &'static FieldSpec {
        // FIELDS is declared in FieldId::ALL order
        &FIELDS[*self as usize]
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown field: {0}")]
pub struct UnknownField(pub String);

impl FromStr for FieldId {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldId::ALL
            .iter()
            .copied()
            .find(|id| id.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownField(s.to_string()))
    }
}

/// Static description of one measurement
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldSpec {
    pub id: FieldId,
    pub label: &'static str,
    /// Inclusive lower bound
    pub minimum: f64,
    /// Inclusive upper bound
    pub maximum: f64,
    /// Input granularity, `None` means 1
    pub step: Option<f64>,
    /// Message shown whenever the value is missing or out of bounds
    pub error_message: &'static str,
}

impl FieldSpec {
    pub fn step(&self) -> f64 {
        self.step.unwrap_or(1.0)
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.minimum && value <= self.maximum
    }

    pub fn placeholder(&self) -> String {
        format!("Enter {}", self.label.to_lowercase())
    }
}

pub static FIELDS: [FieldSpec; 8] = [
    FieldSpec {
        id: FieldId::Pregnancies,
        label: "Pregnancies",
        minimum: 0.0,
        maximum: 20.0,
        step: None,
        error_message: "Must be between 0 and 20",
    },
    FieldSpec {
        id: FieldId::Glucose,
        label: "Glucose (mg/dL)",
        minimum: 0.0,
        maximum: 300.0,
        step: None,
        error_message: "Must be between 0 and 300",
    },
    FieldSpec {
        id: FieldId::BloodPressure,
        label: "Blood Pressure (mmHg)",
        minimum: 0.0,
        maximum: 200.0,
        step: None,
        error_message: "Must be between 0 and 200",
    },
    FieldSpec {
        id: FieldId::SkinThickness,
        label: "Skin Thickness (mm)",
        minimum: 0.0,
        maximum: 100.0,
        step: None,
        error_message: "Must be between 0 and 100",
    },
    FieldSpec {
        id: FieldId::Insulin,
        label: "Insulin (μU/mL)",
        minimum: 0.0,
        maximum: 900.0,
        step: None,
        error_message: "Must be between 0 and 900",
    },
    FieldSpec {
        id: FieldId::Bmi,
        label: "BMI",
        minimum: 0.0,
        maximum: 70.0,
        step: Some(0.1),
        error_message: "Must be between 0 and 70",
    },
    FieldSpec {
        id: FieldId::DiabetesPedigreeFunction,
        label: "Diabetes Pedigree Function",
        minimum: 0.0,
        maximum: 2.5,
        step: Some(0.001),
        error_message: "Must be between 0 and 2.5",
    },
    FieldSpec {
        id: FieldId::Age,
        label: "Age (years)",
        minimum: 0.0,
        maximum: 120.0,
        step: None,
        error_message: "Must be between 0 and 120",
    },
];

/// Ordered registry, as rendered
pub fn fields() -> &'static [FieldSpec] {
    &FIELDS
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_registry_matches_field_order() {
        for (idx, id) in FieldId::ALL.iter().enumerate() {
            assert_eq!(FIELDS[idx].id, *id);
            assert_eq!(id.spec().id, *id);
        }
    }

    #[test]
    fn test_registry_invariants() {
        let mut seen = HashSet::new();
        for spec in fields() {
            assert!(spec.minimum <= spec.maximum, "{} has inverted bounds", spec.id);
            assert!(seen.insert(spec.id.as_str()), "duplicate id {}", spec.id);
            assert!(spec.step() > 0.0);
            assert!(!spec.error_message.is_empty());
        }
        assert_eq!(seen.len(), 8);
    }

    #[test]
    fn test_field_id_parsing() {
        assert_eq!("BMI".parse::<FieldId>().unwrap(), FieldId::Bmi);
        assert_eq!("glucose".parse::<FieldId>().unwrap(), FieldId::Glucose);
        assert!("Cholesterol".parse::<FieldId>().is_err());
    }

    #[test]
    fn test_wire_keys() {
        assert_eq!(serde_json::to_string(&FieldId::Bmi).unwrap(), "\"BMI\"");
        assert_eq!(
            serde_json::to_string(&FieldId::DiabetesPedigreeFunction).unwrap(),
            "\"DiabetesPedigreeFunction\""
        );
    }

    #[test]
    fn test_step_and_placeholder() {
        assert_eq!(FieldId::Age.spec().step(), 1.0);
        assert_eq!(FieldId::Bmi.spec().step(), 0.1);
        assert_eq!(FieldId::Glucose.spec().placeholder(), "Enter glucose (mg/dl)");
    }
}

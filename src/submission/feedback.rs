//! Mapping from the service's label to the advice shown to the user.

use serde::Serialize;
use std::fmt;

pub const HIGH_RISK_FEEDBACK: &str = "High risk detected. Please consult your doctor immediately.";
pub const LOW_RISK_FEEDBACK: &str = "Low risk. Continue your healthy lifestyle.";

/// Label returned by the prediction service
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "String")]
pub enum PredictionLabel {
    Diabetic,
    NonDiabetic,
    /// Any label the form does not know. Kept verbatim.
    Unrecognized(String),
}

impl PredictionLabel {
    pub fn parse(label: &str) -> Self {
        match label {
            "Diabetic" => PredictionLabel::Diabetic,
            "Non-Diabetic" => PredictionLabel::NonDiabetic,
            other => PredictionLabel::Unrecognized(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            PredictionLabel::Diabetic => "Diabetic",
            PredictionLabel::NonDiabetic => "Non-Diabetic",
            PredictionLabel::Unrecognized(label) => label,
        }
    }

    /// Only `Diabetic` is high risk. Unrecognized labels fall into the low
    /// risk category but stay distinguishable through [`is_recognized`].
    ///
    /// [`is_recognized`]: PredictionLabel::is_recognized
    pub fn risk(&self) -> RiskLevel {
        match self {
            PredictionLabel::Diabetic => RiskLevel::High,
            PredictionLabel::NonDiabetic | PredictionLabel::Unrecognized(_) => RiskLevel::Low,
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, PredictionLabel::Unrecognized(_))
    }
}

impl fmt::Display for PredictionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<PredictionLabel> for String {
    fn from(label: PredictionLabel) -> Self {
        label.as_str().to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    High,
    Low,
}

impl RiskLevel {
    pub fn feedback(&self) -> &'static str {
        match self {
            RiskLevel::High => HIGH_RISK_FEEDBACK,
            RiskLevel::Low => LOW_RISK_FEEDBACK,
        }
    }
}

/// Feedback text for a label. Exactly two variants exist.
pub fn feedback_for(label: &PredictionLabel) -> &'static str {
    label.risk().feedback()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diabetic_is_urgent() {
        let label = PredictionLabel::parse("Diabetic");
        assert_eq!(label, PredictionLabel::Diabetic);
        assert_eq!(feedback_for(&label), HIGH_RISK_FEEDBACK);
    }

    #[test]
    fn test_other_labels_are_reassuring() {
        for raw in ["Non-Diabetic", "diabetic", "", "Pre-Diabetic"] {
            let label = PredictionLabel::parse(raw);
            assert_eq!(feedback_for(&label), LOW_RISK_FEEDBACK, "{:?}", raw);
        }
    }

    #[test]
    fn test_unrecognized_label_is_kept() {
        let label = PredictionLabel::parse("Pre-Diabetic");
        assert!(!label.is_recognized());
        assert_eq!(label.to_string(), "Pre-Diabetic");
        assert_eq!(serde_json::to_string(&label).unwrap(), "\"Pre-Diabetic\"");
        assert!(PredictionLabel::parse("Non-Diabetic").is_recognized());
    }
}

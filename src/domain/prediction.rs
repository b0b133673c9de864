use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::form::{FieldId, FormState};
use crate::submission::error::PredictionResult;

/// Request body for the prediction service. Keys are exactly the registry ids.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionPayload {
    #[serde(rename = "Pregnancies")]
    pub pregnancies: f64,
    #[serde(rename = "Glucose")]
    pub glucose: f64,
    #[serde(rename = "BloodPressure")]
    pub blood_pressure: f64,
    #[serde(rename = "SkinThickness")]
    pub skin_thickness: f64,
    #[serde(rename = "Insulin")]
    pub insulin: f64,
    #[serde(rename = "BMI")]
    pub bmi: f64,
    #[serde(rename = "DiabetesPedigreeFunction")]
    pub diabetes_pedigree_function: f64,
    #[serde(rename = "Age")]
    pub age: f64,
}

impl PredictionPayload {
    /// Builds the payload from the numbers currently in the form.
    /// Returns `None` if any field does not hold a number.
    pub fn from_form(form: &FormState) -> Option<Self> {
        Some(Self {
            pregnancies: form.number(FieldId::Pregnancies)?,
            glucose: form.number(FieldId::Glucose)?,
            blood_pressure: form.number(FieldId::BloodPressure)?,
            skin_thickness: form.number(FieldId::SkinThickness)?,
            insulin: form.number(FieldId::Insulin)?,
            bmi: form.number(FieldId::Bmi)?,
            diabetes_pedigree_function: form.number(FieldId::DiabetesPedigreeFunction)?,
            age: form.number(FieldId::Age)?,
        })
    }

    pub fn get(&self, id: FieldId) -> f64 {
        match id {
            FieldId::Pregnancies => self.pregnancies,
            FieldId::Glucose => self.glucose,
            FieldId::BloodPressure => self.blood_pressure,
            FieldId::SkinThickness => self.skin_thickness,
            FieldId::Insulin => self.insulin,
            FieldId::Bmi => self.bmi,
            FieldId::DiabetesPedigreeFunction => self.diabetes_pedigree_function,
            FieldId::Age => self.age,
        }
    }
}

/// Successful response body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionResponse {
    pub prediction: String,
}

/// Failure response body. The form reads `message`; the reference backend
/// reports `error`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ErrorBody {
    pub fn into_message(self) -> Option<String> {
        self.message
            .or(self.error)
            .filter(|m| !m.trim().is_empty())
    }
}

/// Port to the external risk-prediction service
#[async_trait]
pub trait PredictionPort: Send + Sync {
    /// Issue one "create prediction" exchange
    async fn predict(&self, payload: &PredictionPayload) -> PredictionResult<PredictionResponse>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::{reduce, FieldValue, FormAction};
    use serde_json::json;

    #[test]
    fn test_payload_serializes_registry_keys() {
        let payload = PredictionPayload {
            pregnancies: 2.0,
            glucose: 120.0,
            blood_pressure: 70.0,
            skin_thickness: 20.0,
            insulin: 80.0,
            bmi: 24.5,
            diabetes_pedigree_function: 0.5,
            age: 33.0,
        };
        let value = serde_json::to_value(payload).unwrap();
        let keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
        let mut expected: Vec<&str> = FieldId::ALL.iter().map(|id| id.as_str()).collect();
        expected.sort();
        let mut keys = keys;
        keys.sort();
        assert_eq!(keys, expected);
        assert_eq!(value["BMI"], json!(24.5));
        for id in FieldId::ALL {
            assert_eq!(value[id.as_str()].as_f64(), Some(payload.get(id)));
        }
    }

    #[test]
    fn test_payload_requires_every_number() {
        let mut form = FormState::new();
        for id in FieldId::ALL {
            assert!(PredictionPayload::from_form(&form).is_none());
            form = reduce(&form, FormAction::SetField(id, FieldValue::Number(1.0)));
        }
        assert!(PredictionPayload::from_form(&form).is_some());

        let form = reduce(&form, FormAction::SetField(FieldId::Age, FieldValue::Malformed("x".into())));
        assert!(PredictionPayload::from_form(&form).is_none());
    }

    #[test]
    fn test_error_body_message_precedence() {
        let body: ErrorBody = serde_json::from_value(json!({"message": "service unavailable"})).unwrap();
        assert_eq!(body.into_message().as_deref(), Some("service unavailable"));

        let body: ErrorBody = serde_json::from_value(json!({"error": "Missing feature: 'Age'"})).unwrap();
        assert_eq!(body.into_message().as_deref(), Some("Missing feature: 'Age'"));

        let body: ErrorBody = serde_json::from_value(json!({"message": " "})).unwrap();
        assert!(body.into_message().is_none());
    }
}

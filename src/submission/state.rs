use serde::Serialize;

use super::feedback::{feedback_for, PredictionLabel};

/// Lifecycle of the prediction request. Exactly one variant is current.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SubmissionState {
    #[default]
    Idle,
    Submitting,
    Succeeded {
        prediction: PredictionLabel,
        feedback: String,
    },
    Failed {
        message: String,
    },
}

impl SubmissionState {
    pub fn succeeded(prediction: PredictionLabel) -> Self {
        let feedback = feedback_for(&prediction).to_string();
        SubmissionState::Succeeded {
            prediction,
            feedback,
        }
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self, SubmissionState::Submitting)
    }

    pub fn name(&self) -> &'static str {
        match self {
            SubmissionState::Idle => "idle",
            SubmissionState::Submitting => "submitting",
            SubmissionState::Succeeded { .. } => "succeeded",
            SubmissionState::Failed { .. } => "failed",
        }
    }
}

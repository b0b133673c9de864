//! Submission lifecycle: state, feedback mapping, transport errors and the
//! controller that ties them to the form.

pub mod controller;
pub mod error;
pub mod feedback;
pub mod state;

pub use controller::{
    run_request, DispatchOutcome, FieldView, FormEvent, FormSnapshot, PredictionRequest, RequestToken,
    SubmissionController,
};
pub use error::{PredictionError, PredictionResult, GENERIC_FAILURE_MESSAGE};
pub use feedback::{feedback_for, PredictionLabel, RiskLevel, HIGH_RISK_FEEDBACK, LOW_RISK_FEEDBACK};
pub use state::SubmissionState;

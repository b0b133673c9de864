//! Submission controller: the single dispatch entry point for the form.
//!
//! All state lives in one [`FormSnapshot`] (form values, per-field errors and
//! the submission lifecycle). Every transition goes through
//! [`SubmissionController::dispatch`], which never performs I/O. When a
//! transition needs the prediction service it hands back a
//! [`PredictionRequest`]; the caller runs it (see [`run_request`]) and feeds
//! the result back as [`FormEvent::PredictionResolved`].
//!
//! Each request carries a [`RequestToken`]. Only the response whose token
//! matches the request currently in flight is applied, so a response that
//! arrives after a reset and a newer submission is discarded.

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::domain::prediction::{PredictionPayload, PredictionPort, PredictionResponse};
use crate::form::{reduce, ErrorState, ErrorTracker, FieldId, FieldSpec, FieldValue, FormAction, FormState, FIELDS};

use super::error::PredictionResult;
use super::feedback::PredictionLabel;
use super::state::SubmissionState;

/// Monotonically increasing id of an issued request
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct RequestToken(u64);

impl RequestToken {
    pub fn value(&self) -> u64 {
        self.0
    }
}

/// Everything the presentation layer needs to render the form
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormSnapshot {
    form: FormState,
    errors: ErrorTracker,
    submission: SubmissionState,
}

impl FormSnapshot {
    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn errors(&self) -> &ErrorState {
        self.errors.state()
    }

    pub fn submission(&self) -> &SubmissionState {
        &self.submission
    }
}

/// One input as handed to the renderer
#[derive(Debug, Clone, PartialEq)]
pub struct FieldView<'a> {
    pub spec: &'static FieldSpec,
    pub value: &'a FieldValue,
    pub error: Option<&'a str>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FormEvent {
    FieldChanged { field: FieldId, raw: String },
    Submit,
    Retry,
    Reset,
    PredictionResolved {
        token: RequestToken,
        outcome: PredictionResult<PredictionResponse>,
    },
}

impl FormEvent {
    pub fn field_changed(field: FieldId, raw: impl Into<String>) -> Self {
        FormEvent::FieldChanged {
            field,
            raw: raw.into(),
        }
    }
}

/// Work the caller must perform: one call to the prediction service
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionRequest {
    pub token: RequestToken,
    pub payload: PredictionPayload,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DispatchOutcome {
    /// State changed; nothing else to do
    Updated,
    /// State moved to `Submitting`; run the request
    Request(PredictionRequest),
    /// Validation errors prevent submission
    Blocked,
    /// Event had no effect (re-entrant submit, retry outside `Failed`, stale response)
    Ignored,
}

#[derive(Debug, Default)]
pub struct SubmissionController {
    snapshot: FormSnapshot,
    last_token: u64,
    in_flight: Option<RequestToken>,
}

impl SubmissionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> &FormSnapshot {
        &self.snapshot
    }

    pub fn in_flight(&self) -> Option<RequestToken> {
        self.in_flight
    }

    /// Mirrors the enabled state of the submit control
    pub fn can_submit(&self) -> bool {
        self.in_flight.is_none() && self.snapshot.errors().is_empty()
    }

    pub fn field_views(&self) -> Vec<FieldView<'_>> {
        FIELDS
            .iter()
            .map(|spec| FieldView {
                spec,
                value: self.snapshot.form.get(spec.id),
                error: self.snapshot.errors().get(spec.id),
            })
            .collect()
    }

    pub fn dispatch(&mut self, event: FormEvent) -> DispatchOutcome {
        match event {
            FormEvent::FieldChanged { field, raw } => self.change_field(field, &raw),
            FormEvent::Submit => self.submit(),
            FormEvent::Retry => self.retry(),
            FormEvent::Reset => self.reset(),
            FormEvent::PredictionResolved { token, outcome } => self.resolve(token, outcome),
        }
    }

    /// Dispatches `Submit` and, if a request is issued, awaits it on `port`.
    pub async fn submit_with<P>(&mut self, port: &P) -> DispatchOutcome
    where
        P: PredictionPort + ?Sized,
    {
        let outcome = self.dispatch(FormEvent::Submit);
        self.drive(port, outcome).await
    }

    /// Dispatches `Retry` and, if a request is issued, awaits it on `port`.
    pub async fn retry_with<P>(&mut self, port: &P) -> DispatchOutcome
    where
        P: PredictionPort + ?Sized,
    {
        let outcome = self.dispatch(FormEvent::Retry);
        self.drive(port, outcome).await
    }

    async fn drive<P>(&mut self, port: &P, outcome: DispatchOutcome) -> DispatchOutcome
    where
        P: PredictionPort + ?Sized,
    {
        match outcome {
            DispatchOutcome::Request(request) => {
                let event = run_request(port, request).await;
                self.dispatch(event)
            }
            other => other,
        }
    }

    fn change_field(&mut self, field: FieldId, raw: &str) -> DispatchOutcome {
        let change = self.snapshot.errors.field_changed(field.spec(), raw);
        debug!(field = %field, valid = change.error.is_none(), "Field changed");
        self.snapshot.form = reduce(&self.snapshot.form, FormAction::SetField(field, change.value));
        DispatchOutcome::Updated
    }

    fn submit(&mut self) -> DispatchOutcome {
        if let Some(token) = self.in_flight {
            warn!(token = token.value(), "Submit ignored, request already in flight");
            return DispatchOutcome::Ignored;
        }

        if !self.snapshot.errors.submit_attempted(&FIELDS, &self.snapshot.form) {
            debug!(errors = self.snapshot.errors().len(), "Submit blocked by validation");
            return DispatchOutcome::Blocked;
        }

        match PredictionPayload::from_form(&self.snapshot.form) {
            Some(payload) => self.begin(payload),
            None => DispatchOutcome::Blocked,
        }
    }

    fn retry(&mut self) -> DispatchOutcome {
        if self.in_flight.is_some() || !matches!(self.snapshot.submission, SubmissionState::Failed { .. }) {
            warn!(state = self.snapshot.submission.name(), "Retry ignored");
            return DispatchOutcome::Ignored;
        }

        // edits made after the failure are re-checked like a fresh submit
        if !self.snapshot.errors.submit_attempted(&FIELDS, &self.snapshot.form) {
            debug!(errors = self.snapshot.errors().len(), "Retry blocked by validation");
            return DispatchOutcome::Blocked;
        }

        match PredictionPayload::from_form(&self.snapshot.form) {
            Some(payload) => self.begin(payload),
            None => DispatchOutcome::Blocked,
        }
    }

    fn begin(&mut self, payload: PredictionPayload) -> DispatchOutcome {
        self.last_token += 1;
        let token = RequestToken(self.last_token);
        self.in_flight = Some(token);
        self.snapshot.submission = SubmissionState::Submitting;
        info!(token = token.value(), "Requesting prediction");
        DispatchOutcome::Request(PredictionRequest { token, payload })
    }

    fn reset(&mut self) -> DispatchOutcome {
        self.snapshot.form = reduce(&self.snapshot.form, FormAction::Reset);
        self.snapshot.errors.clear();
        self.snapshot.submission = SubmissionState::Idle;
        self.in_flight = None;
        DispatchOutcome::Updated
    }

    fn resolve(
        &mut self,
        token: RequestToken,
        outcome: PredictionResult<PredictionResponse>,
    ) -> DispatchOutcome {
        if self.in_flight != Some(token) {
            warn!(token = token.value(), "Discarding stale prediction response");
            return DispatchOutcome::Ignored;
        }
        self.in_flight = None;

        self.snapshot.submission = match outcome {
            Ok(response) => {
                let label = PredictionLabel::parse(&response.prediction);
                if !label.is_recognized() {
                    warn!(label = %label, "Unrecognized prediction label, reporting as low risk");
                }
                info!(token = token.value(), prediction = %label, "Prediction received");
                SubmissionState::succeeded(label)
            }
            Err(err) => {
                info!(token = token.value(), error = %err, "Prediction failed");
                SubmissionState::Failed {
                    message: err.user_message(),
                }
            }
        };
        DispatchOutcome::Updated
    }
}

/// Runs a request against the service and wraps the result as the event to
/// dispatch next.
pub async fn run_request<P>(port: &P, request: PredictionRequest) -> FormEvent
where
    P: PredictionPort + ?Sized,
{
    let outcome = port.predict(&request.payload).await;
    FormEvent::PredictionResolved {
        token: request.token,
        outcome,
    }
}

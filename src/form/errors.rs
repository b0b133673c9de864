//! Per-field validation messages and the tracker that keeps them current.

use serde::Serialize;
use std::collections::BTreeMap;

use super::registry::{FieldId, FieldSpec};
use super::state::{FieldValue, FormState};
use super::validator::{parse_number, validate_field, validate_form};

/// Field id to message. A missing key means the field is currently valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ErrorState {
    errors: BTreeMap<FieldId, String>,
}

impl ErrorState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: FieldId) -> Option<&str> {
        self.errors.get(&id).map(String::as_str)
    }

    pub fn contains(&self, id: FieldId) -> bool {
        self.errors.contains_key(&id)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn fields(&self) -> impl Iterator<Item = FieldId> + '_ {
        self.errors.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FieldId, &str)> {
        self.errors.iter().map(|(id, msg)| (*id, msg.as_str()))
    }
}

impl FromIterator<(FieldId, String)> for ErrorState {
    fn from_iter<I: IntoIterator<Item = (FieldId, String)>>(iter: I) -> Self {
        Self {
            errors: iter.into_iter().collect(),
        }
    }
}

/// Outcome of a single field change
#[derive(Debug, Clone, PartialEq)]
pub struct FieldChange {
    /// Value to store in the form
    pub value: FieldValue,
    pub error: Option<String>,
}

/// Keeps [`ErrorState`] in step with user edits and submit attempts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ErrorTracker {
    state: ErrorState,
}

impl ErrorTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ErrorState {
        &self.state
    }

    /// Re-validates only `spec`'s field and merges the result. Other entries
    /// are left as they were.
    pub fn field_changed(&mut self, spec: &FieldSpec, raw: &str) -> FieldChange {
        let value = if raw.trim().is_empty() {
            FieldValue::Empty
        } else {
            match parse_number(raw) {
                Some(n) => FieldValue::Number(n),
                None => FieldValue::Malformed(raw.to_string()),
            }
        };

        let error = match validate_field(spec, raw) {
            Ok(_) => {
                self.state.errors.remove(&spec.id);
                None
            }
            Err(err) => {
                let message = err.to_string();
                self.state.errors.insert(spec.id, message.clone());
                Some(message)
            }
        };

        FieldChange { value, error }
    }

    /// Replaces the whole error state with a full validation pass.
    /// Returns `true` when submission may proceed.
    pub fn submit_attempted(&mut self, specs: &[FieldSpec], form: &FormState) -> bool {
        self.state = validate_form(specs, form);
        self.state.is_empty()
    }

    pub fn clear(&mut self) {
        self.state = ErrorState::new();
    }
}

use thiserror::Error;

use super::errors::ErrorState;
use super::registry::{FieldId, FieldSpec};
use super::state::{FieldValue, FormState};

/// Why a field value was rejected. Displays as the field's configured message.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{message}")]
    Empty { field: FieldId, message: &'static str },

    #[error("{message}")]
    NotANumber { field: FieldId, message: &'static str },

    #[error("{message}")]
    OutOfRange {
        field: FieldId,
        value: f64,
        message: &'static str,
    },
}

impl ValidationError {
    pub fn field(&self) -> FieldId {
        match self {
            Self::Empty { field, .. }
            | Self::NotANumber { field, .. }
            | Self::OutOfRange { field, .. } => *field,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::Empty { message, .. }
            | Self::NotANumber { message, .. }
            | Self::OutOfRange { message, .. } => message,
        }
    }
}

/// Parses decimal input. Surrounding whitespace is ignored; `None` for empty,
/// malformed or non-finite text.
pub fn parse_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Validates raw user input for one field, returning the parsed number.
pub fn validate_field(spec: &FieldSpec, raw: &str) -> Result<f64, ValidationError> {
    if raw.trim().is_empty() {
        return Err(ValidationError::Empty {
            field: spec.id,
            message: spec.error_message,
        });
    }

    let value = parse_number(raw).ok_or(ValidationError::NotANumber {
        field: spec.id,
        message: spec.error_message,
    })?;

    check_bounds(spec, value)
}

/// Validates a value already held in the form store.
pub fn validate_value(spec: &FieldSpec, value: &FieldValue) -> Result<f64, ValidationError> {
    match value {
        FieldValue::Empty => Err(ValidationError::Empty {
            field: spec.id,
            message: spec.error_message,
        }),
        FieldValue::Malformed(_) => Err(ValidationError::NotANumber {
            field: spec.id,
            message: spec.error_message,
        }),
        FieldValue::Number(n) if !n.is_finite() => Err(ValidationError::NotANumber {
            field: spec.id,
            message: spec.error_message,
        }),
        FieldValue::Number(n) => check_bounds(spec, *n),
    }
}

/// Full pass over every spec. An empty result means the form may be submitted.
pub fn validate_form(specs: &[FieldSpec], form: &FormState) -> ErrorState {
    specs
        .iter()
        .filter_map(|spec| validate_value(spec, form.get(spec.id)).err())
        .map(|err| (err.field(), err.message().to_string()))
        .collect()
}

fn check_bounds(spec: &FieldSpec, value: f64) -> Result<f64, ValidationError> {
    if spec.contains(value) {
        Ok(value)
    } else {
        Err(ValidationError::OutOfRange {
            field: spec.id,
            value,
            message: spec.error_message,
        })
    }
}

//! Field registry, validation, the form value store and error tracking.

pub mod errors;
pub mod registry;
pub mod state;
pub mod validator;

pub use errors::{ErrorState, ErrorTracker, FieldChange};
pub use registry::{fields, FieldId, FieldSpec, FIELDS};
pub use state::{reduce, FieldValue, FormAction, FormState};
pub use validator::{parse_number, validate_field, validate_form, validate_value, ValidationError};

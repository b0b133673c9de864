//! Form value store driven by a pure reducer.

use serde::Serialize;
use std::collections::BTreeMap;

use super::registry::FieldId;

/// Value held for one field
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Not yet entered, or cleared by the user
    Empty,
    Number(f64),
    /// Text that did not parse as a finite number, kept so it can be re-rendered
    Malformed(String),
}

impl FieldValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, FieldValue::Empty)
    }

    /// Text to show in an input control
    pub fn display(&self) -> String {
        match self {
            FieldValue::Empty => String::new(),
            FieldValue::Number(n) => n.to_string(),
            FieldValue::Malformed(raw) => raw.clone(),
        }
    }
}

/// Current user-entered values. Missing keys mean "not yet entered".
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FormState {
    values: BTreeMap<FieldId, FieldValue>,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: FieldId) -> &FieldValue {
        self.values.get(&id).unwrap_or(&FieldValue::Empty)
    }

    pub fn number(&self, id: FieldId) -> Option<f64> {
        self.get(id).as_number()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FieldId, &FieldValue)> {
        self.values.iter().map(|(id, value)| (*id, value))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FormAction {
    SetField(FieldId, FieldValue),
    Reset,
}

/// Returns the next form state. The input state is never modified.
pub fn reduce(state: &FormState, action: FormAction) -> FormState {
    match action {
        FormAction::SetField(id, value) => {
            let mut values = state.values.clone();
            values.insert(id, value);
            FormState { values }
        }
        FormAction::Reset => FormState::new(),
    }
}

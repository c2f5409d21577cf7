//! Session Protocol
//!
//! One JSON object per line in each direction.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::form::{FieldName, FieldStatus, FormState};
use crate::validation::{SubmissionOutcome, ValidationResult};

/// An interaction reported by the presentation layer
///
/// Field names stay as text here so that an unknown name surfaces as a
/// contract violation rather than a generic parse failure.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "event", rename_all = "lowercase")]
pub enum Request {
    Edit { field: String, value: String },
    Blur { field: String },
    Submit,
    Reset,
    /// Stateless check of one field against the current values
    Validate { field: String },
}

// Typed values are passwords as often as not; keep them out of logs
impl fmt::Debug for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Request::Edit { field, value } => f
                .debug_struct("Edit")
                .field("field", field)
                .field("len", &value.chars().count())
                .finish_non_exhaustive(),
            Request::Blur { field } => f.debug_struct("Blur").field("field", field).finish(),
            Request::Submit => f.write_str("Submit"),
            Request::Reset => f.write_str("Reset"),
            Request::Validate { field } => {
                f.debug_struct("Validate").field("field", field).finish()
            }
        }
    }
}

/// How one field should currently be rendered
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldView {
    pub field: FieldName,
    pub status: FieldStatus,
    /// Visible messages only; empty while the field is untouched
    pub errors: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Response {
    Snapshot {
        fields: Vec<FieldView>,
        #[serde(skip_serializing_if = "Option::is_none")]
        outcome: Option<SubmissionOutcome>,
        success: bool,
    },
    Validation {
        field: FieldName,
        #[serde(flatten)]
        result: ValidationResult,
    },
    Error {
        message: String,
    },
}

impl Response {
    /// Render the whole form as the presentation layer would show it
    pub fn snapshot(form: &FormState) -> Self {
        let fields = FieldName::ALL
            .into_iter()
            .map(|field| FieldView {
                field,
                status: form.status(field),
                errors: form.visible_errors(field).to_vec(),
            })
            .collect();

        Response::Snapshot {
            fields,
            outcome: form.outcome().cloned(),
            success: form.show_success(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Response::Error {
            message: message.into(),
        }
    }
}

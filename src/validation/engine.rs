//! Validation Engine
//!
//! Pure computation of field validity and submission outcomes. The engine
//! holds no form state: callers pass the current values on every call and
//! get a complete answer back.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::conflict::{AlwaysTaken, ConflictCheck};
use crate::error::FormError;
use crate::form::{FieldName, FormValues};
use crate::validation::rules::RuleSet;

pub const EMAIL_ALREADY_REGISTERED: &str =
    "This email is already registered. Try signing in instead.";

/// Result of validating a single field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<String>,
}

impl ValidationResult {
    pub fn from_errors(errors: Vec<String>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }
}

/// Error messages per field, in rule order
///
/// Fields without errors have no entry; `get` returns an empty slice for them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<FieldName, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the messages for `field`; an empty list clears the entry
    pub fn set(&mut self, field: FieldName, errors: Vec<String>) {
        if errors.is_empty() {
            self.0.remove(&field);
        } else {
            self.0.insert(field, errors);
        }
    }

    pub fn get(&self, field: FieldName) -> &[String] {
        self.0.get(&field).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn has_errors(&self, field: FieldName) -> bool {
        !self.get(field).is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Fields with at least one message, in declaration order
    pub fn fields(&self) -> impl Iterator<Item = FieldName> + '_ {
        self.0.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FieldName, &[String])> + '_ {
        self.0.iter().map(|(field, errors)| (*field, errors.as_slice()))
    }
}

/// What happened when the form was submitted
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "errors", rename_all = "camelCase")]
pub enum SubmissionOutcome {
    /// Every rule and the conflict check passed
    Success,
    /// At least one field failed a syntactic or cross-field rule
    ValidationFailed(FieldErrors),
    /// All rules passed but the email is already registered
    Conflict(FieldErrors),
}

impl SubmissionOutcome {
    /// Errors carried by the outcome; `None` on success
    pub fn errors(&self) -> Option<&FieldErrors> {
        match self {
            SubmissionOutcome::Success => None,
            SubmissionOutcome::ValidationFailed(errors) | SubmissionOutcome::Conflict(errors) => {
                Some(errors)
            }
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, SubmissionOutcome::Success)
    }
}

/// Validation engine with a pluggable conflict check
///
/// The default check reports every address as already registered, which
/// makes `Conflict` the only outcome for a syntactically valid form.
#[derive(Debug, Clone, Default)]
pub struct ValidationEngine<C = AlwaysTaken> {
    conflict_check: C,
}

impl ValidationEngine<AlwaysTaken> {
    pub fn new() -> Self {
        Self {
            conflict_check: AlwaysTaken,
        }
    }
}

impl<C: ConflictCheck> ValidationEngine<C> {
    pub fn with_conflict_check(conflict_check: C) -> Self {
        Self { conflict_check }
    }

    pub fn conflict_check(&self) -> &C {
        &self.conflict_check
    }

    pub fn validate_field(&self, field: FieldName, values: &FormValues) -> ValidationResult {
        validate_field(field, values)
    }

    /// Validate a field addressed by its wire name
    pub fn validate_field_named(
        &self,
        name: &str,
        values: &FormValues,
    ) -> Result<ValidationResult, FormError> {
        Ok(validate_field(name.parse::<FieldName>()?, values))
    }

    pub fn validate_all(&self, values: &FormValues) -> FieldErrors {
        validate_all(values)
    }

    /// Validate everything, then consult the conflict check
    pub fn submit(&self, values: &FormValues) -> SubmissionOutcome {
        let errors = validate_all(values);
        if !errors.is_empty() {
            log::debug!(
                "submission rejected: {} field(s) invalid",
                errors.fields().count()
            );
            return SubmissionOutcome::ValidationFailed(errors);
        }

        if self.conflict_check.check_email_taken(&values.email) {
            log::debug!("submission rejected: email already registered");
            let mut conflict = FieldErrors::new();
            conflict.set(
                FieldName::Email,
                vec![EMAIL_ALREADY_REGISTERED.to_string()],
            );
            return SubmissionOutcome::Conflict(conflict);
        }

        log::debug!("submission accepted");
        SubmissionOutcome::Success
    }
}

/// Validate one field against the full set of values
///
/// `confirmPassword` reads `password`, so the whole form is always required.
pub fn validate_field(field: FieldName, values: &FormValues) -> ValidationResult {
    ValidationResult::from_errors(RuleSet::for_field(field).apply(values))
}

/// Validate all fields in declaration order, keeping only fields with errors
pub fn validate_all(values: &FormValues) -> FieldErrors {
    let mut errors = FieldErrors::new();
    for field in FieldName::ALL {
        errors.set(field, validate_field(field, values).errors);
    }
    errors
}

/// Submit with the default always-registered conflict check
pub fn submit(values: &FormValues) -> SubmissionOutcome {
    ValidationEngine::new().submit(values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conflict::NeverTaken;
    use crate::validation::rules::{INVALID_EMAIL, PASSWORDS_DONT_MATCH};

    #[test]
    fn test_validation_result() {
        let result = ValidationResult::from_errors(Vec::new());
        assert!(result.is_valid());

        let result = ValidationResult::from_errors(vec!["Test error".to_string()]);
        assert!(!result.is_valid());
    }

    #[test]
    fn test_field_errors_drop_empty_entries() {
        let mut errors = FieldErrors::new();
        errors.set(FieldName::Password, vec!["x".to_string()]);
        assert!(errors.has_errors(FieldName::Password));

        errors.set(FieldName::Password, Vec::new());
        assert!(errors.is_empty());
        assert!(errors.get(FieldName::Password).is_empty());
    }

    #[test]
    fn test_validate_all_orders_fields() {
        let values = FormValues::new("nope", "Password1", "Password2");
        let errors = validate_all(&values);

        let fields: Vec<_> = errors.fields().collect();
        assert_eq!(fields, vec![FieldName::Email, FieldName::ConfirmPassword]);
        assert_eq!(errors.get(FieldName::Email), [INVALID_EMAIL]);
        assert_eq!(errors.get(FieldName::ConfirmPassword), [PASSWORDS_DONT_MATCH]);
    }

    #[test]
    fn test_validate_field_named_rejects_unknown_names() {
        let engine = ValidationEngine::new();
        let values = FormValues::default();

        assert!(engine.validate_field_named("email", &values).is_ok());
        assert_eq!(
            engine.validate_field_named("username", &values),
            Err(FormError::InvalidFieldKind("username".to_string()))
        );
    }

    #[test]
    fn test_success_is_reachable_with_permissive_check() {
        let engine = ValidationEngine::with_conflict_check(NeverTaken);
        let values = FormValues::new("user@example.com", "Password1", "Password1");
        assert_eq!(engine.submit(&values), SubmissionOutcome::Success);
        assert!(engine.submit(&values).errors().is_none());
    }

    #[test]
    fn test_outcome_serialization() {
        let json = serde_json::to_value(SubmissionOutcome::Success).unwrap();
        assert_eq!(json, serde_json::json!({ "kind": "success" }));

        let outcome = submit(&FormValues::new("user@example.com", "Password1", "Password1"));
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "kind": "conflict",
                "errors": { "email": [EMAIL_ALREADY_REGISTERED] }
            })
        );
    }
}

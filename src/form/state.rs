//! Caller-held Form State
//!
//! The engine is stateless; this is the state a presentation layer keeps
//! between interactions and the rules for when errors become visible.

use serde::Serialize;
use std::collections::BTreeSet;

use crate::conflict::ConflictCheck;
use crate::form::{FieldName, FormValues};
use crate::validation::{validate_field, FieldErrors, SubmissionOutcome, ValidationEngine};

/// Fields the user has left at least once, or that a submission force-marked
///
/// Only grows until the form is reset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TouchedSet(BTreeSet<FieldName>);

impl TouchedSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn touch(&mut self, field: FieldName) {
        self.0.insert(field);
    }

    pub fn touch_all(&mut self) {
        self.0.extend(FieldName::ALL);
    }

    pub fn contains(&self, field: FieldName) -> bool {
        self.0.contains(&field)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Display status of one field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldStatus {
    /// Never blurred and not force-marked
    Untouched,
    /// Touched with at least one error
    Invalid,
    /// Touched, no errors, empty value
    Empty,
    /// Touched, no errors, non-empty value
    Valid,
}

impl FieldStatus {
    pub fn derive(touched: bool, errors: &[String], value: &str) -> Self {
        if !touched {
            FieldStatus::Untouched
        } else if !errors.is_empty() {
            FieldStatus::Invalid
        } else if value.is_empty() {
            FieldStatus::Empty
        } else {
            FieldStatus::Valid
        }
    }
}

/// Everything a sign-up form needs to remember between interactions
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    values: FormValues,
    touched: TouchedSet,
    errors: FieldErrors,
    outcome: Option<SubmissionOutcome>,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    pub fn touched(&self) -> &TouchedSet {
        &self.touched
    }

    /// Errors as last computed, including those of untouched fields
    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Outcome of the most recent submission, if any
    pub fn outcome(&self) -> Option<&SubmissionOutcome> {
        self.outcome.as_ref()
    }

    /// User typed into `field`
    ///
    /// Errors are only recomputed once the field has been touched, so typing
    /// into a fresh field never shows a message.
    ///
    /// A touched confirmation is re-checked whenever the password changes,
    /// whether or not the password itself has been touched.
    pub fn edit(&mut self, field: FieldName, value: impl Into<String>) {
        self.values.set(field, value);
        if self.touched.contains(field) {
            self.refresh(field);
        }
        self.refresh_dependents(field);
    }

    /// User left `field`
    pub fn blur(&mut self, field: FieldName) {
        self.touched.touch(field);
        self.refresh(field);
        self.refresh_dependents(field);
    }

    /// User pressed submit: every field becomes touched and all errors are replaced
    pub fn submit<C: ConflictCheck>(
        &mut self,
        engine: &ValidationEngine<C>,
    ) -> SubmissionOutcome {
        self.touched.touch_all();

        let outcome = engine.submit(&self.values);
        self.errors = outcome.errors().cloned().unwrap_or_default();
        self.outcome = Some(outcome.clone());
        outcome
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn status(&self, field: FieldName) -> FieldStatus {
        FieldStatus::derive(
            self.touched.contains(field),
            self.errors.get(field),
            self.values.get(field),
        )
    }

    /// Errors to display for `field`; always empty while it is untouched
    pub fn visible_errors(&self, field: FieldName) -> &[String] {
        if self.touched.contains(field) {
            self.errors.get(field)
        } else {
            &[]
        }
    }

    /// The single message shown under a field
    ///
    /// The password field renders its whole list instead.
    pub fn headline_error(&self, field: FieldName) -> Option<&str> {
        self.visible_errors(field).first().map(String::as_str)
    }

    /// A submission happened and nothing is wrong
    pub fn show_success(&self) -> bool {
        self.outcome.is_some() && self.errors.is_empty()
    }

    fn refresh(&mut self, field: FieldName) {
        self.errors.set(field, validate_field(field, &self.values).errors);
    }

    /// The confirmation compares against the password, so keep it current
    fn refresh_dependents(&mut self, changed: FieldName) {
        if changed == FieldName::Password && self.touched.contains(FieldName::ConfirmPassword) {
            self.refresh(FieldName::ConfirmPassword);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::rules::{INVALID_EMAIL, PASSWORDS_DONT_MATCH};

    #[test]
    fn test_status_derivation() {
        let errors = vec!["bad".to_string()];
        assert_eq!(FieldStatus::derive(false, &errors, "x"), FieldStatus::Untouched);
        assert_eq!(FieldStatus::derive(true, &errors, "x"), FieldStatus::Invalid);
        assert_eq!(FieldStatus::derive(true, &[], ""), FieldStatus::Empty);
        assert_eq!(FieldStatus::derive(true, &[], "x"), FieldStatus::Valid);
    }

    #[test]
    fn test_edit_before_blur_stays_quiet() {
        let mut form = FormState::new();
        form.edit(FieldName::Email, "not-an-email");

        assert_eq!(form.status(FieldName::Email), FieldStatus::Untouched);
        assert!(form.errors().is_empty());
    }

    #[test]
    fn test_blur_then_edit_revalidates() {
        let mut form = FormState::new();
        form.edit(FieldName::Email, "not-an-email");
        form.blur(FieldName::Email);
        assert_eq!(form.headline_error(FieldName::Email), Some(INVALID_EMAIL));

        form.edit(FieldName::Email, "user@example.com");
        assert_eq!(form.status(FieldName::Email), FieldStatus::Valid);
        assert!(form.visible_errors(FieldName::Email).is_empty());
    }

    #[test]
    fn test_password_edit_refreshes_touched_confirmation() {
        let mut form = FormState::new();
        form.edit(FieldName::Password, "Password1");
        form.edit(FieldName::ConfirmPassword, "Password1");
        form.blur(FieldName::ConfirmPassword);
        assert_eq!(form.status(FieldName::ConfirmPassword), FieldStatus::Valid);

        form.edit(FieldName::Password, "Password2");
        assert_eq!(
            form.visible_errors(FieldName::ConfirmPassword),
            [PASSWORDS_DONT_MATCH]
        );
        assert_eq!(form.status(FieldName::Password), FieldStatus::Untouched);

        form.edit(FieldName::Password, "Password1");
        assert_eq!(form.status(FieldName::ConfirmPassword), FieldStatus::Valid);
    }

    #[test]
    fn test_untouched_confirmation_ignores_password_edits() {
        let mut form = FormState::new();
        form.edit(FieldName::ConfirmPassword, "Password1");
        form.edit(FieldName::Password, "Password2");

        assert!(form.errors().is_empty());
        assert_eq!(form.status(FieldName::ConfirmPassword), FieldStatus::Untouched);
    }

    #[test]
    fn test_touched_set_only_grows() {
        let mut touched = TouchedSet::new();
        touched.touch(FieldName::Password);
        touched.touch(FieldName::Password);
        assert_eq!(touched.len(), 1);

        touched.touch_all();
        assert_eq!(touched.len(), 3);
        assert!(FieldName::ALL.iter().all(|f| touched.contains(*f)));
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut form = FormState::new();
        form.edit(FieldName::Email, "x");
        form.submit(&ValidationEngine::new());
        assert!(!form.touched().is_empty());

        form.reset();
        assert_eq!(form, FormState::new());
    }
}

//! Sign-up Form Validator
//!
//! An incremental validation engine for a three-field sign-up form.
//!
//! This library provides:
//! - Ordered, composable field rules (including a cross-field rule)
//! - A stateless engine for field, form and submission validation
//! - A pluggable "already registered" conflict check
//! - Caller-held form state that decides when errors become visible
//! - A line-delimited JSON session for driving the form from outside

pub mod cli;
pub mod config;
pub mod conflict;
pub mod error;
pub mod form;
pub mod session;
pub mod validation;

// Re-exports for clean public API
pub use config::Config;
pub use conflict::{AlwaysTaken, ConflictCheck, NeverTaken, RegisteredEmails};
pub use error::FormError;
pub use form::{FieldName, FieldStatus, FormState, FormValues, TouchedSet};
pub use validation::{
    submit, validate_all, validate_field, FieldErrors, SubmissionOutcome, ValidationEngine,
    ValidationResult,
};

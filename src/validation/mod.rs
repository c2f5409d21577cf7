//! Validation Engine
//!
//! Rule definitions and the stateless engine that applies them.

pub mod engine;
pub mod rules;

pub use engine::{
    submit, validate_all, validate_field, FieldErrors, SubmissionOutcome, ValidationEngine,
    ValidationResult, EMAIL_ALREADY_REGISTERED,
};
pub use rules::{Rule, RuleMode, RuleSet};

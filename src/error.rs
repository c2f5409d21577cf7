//! Error Types
//!
//! Contract violations only. Anything a user can fix by editing the form is
//! reported as data by the validation engine, never through these types.

use thiserror::Error;

/// Errors raised when a caller breaks the engine's contract
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    /// A field name outside the closed set `email`, `password`, `confirmPassword`
    #[error("unknown form field '{0}' (expected email, password or confirmPassword)")]
    InvalidFieldKind(String),

    /// A conflict policy name that does not map to a known capability
    #[error("unknown conflict policy '{0}' (expected always, never or registry)")]
    UnknownPolicy(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_the_input() {
        let err = FormError::InvalidFieldKind("username".to_string());
        assert!(err.to_string().contains("'username'"));

        let err = FormError::UnknownPolicy("sometimes".to_string());
        assert!(err.to_string().contains("'sometimes'"));
    }
}

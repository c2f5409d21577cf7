//! Validation Rules
//!
//! Each field owns an ordered list of predicate-plus-message rules. A rule
//! never inspects anything but the form values it is handed.

use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

use crate::form::{FieldName, FormValues};

pub const INVALID_EMAIL: &str = "Please enter a valid email address.";
pub const PASSWORD_TOO_SHORT: &str = "Be at least 8 characters long";
pub const PASSWORD_NEEDS_UPPERCASE: &str = "Contain at least one uppercase letter";
pub const PASSWORD_NEEDS_NUMBER: &str = "Contain at least one number";
pub const PASSWORDS_DONT_MATCH: &str = "Passwords don't match";

/// Minimum password length, counted in Unicode scalar values
///
/// Characters outside the Basic Multilingual Plane count once here, where a
/// UTF-16 length (as browsers report it) would count them twice.
pub const MIN_PASSWORD_LEN: usize = 8;

/// Local part, "@", then one or more dot-terminated labels and a TLD of two or more letters
const EMAIL_PATTERN: &str = r"(?i)^[A-Z0-9_'+\-.]*[A-Z0-9_+\-]@([A-Z0-9][A-Z0-9\-]*\.)+[A-Z]{2,}$";

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(EMAIL_PATTERN).expect("valid regex"));

/// Signature shared by all rule predicates: the field's own value plus the whole form
pub type Predicate = fn(&str, &FormValues) -> bool;

/// A single predicate and the message reported when it fails
#[derive(Clone, Copy)]
pub struct Rule {
    pub message: &'static str,
    check: Predicate,
}

impl Rule {
    pub const fn new(message: &'static str, check: Predicate) -> Self {
        Self { message, check }
    }

    /// Returns true when `value` satisfies the rule
    pub fn passes(&self, value: &str, values: &FormValues) -> bool {
        (self.check)(value, values)
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule").field("message", &self.message).finish()
    }
}

/// How a rule set reacts to a failing rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleMode {
    /// Evaluate every rule and report every failure
    Accumulate,
    /// Stop at the first failing rule
    FirstFailure,
}

/// The ordered rules for one field
#[derive(Debug)]
pub struct RuleSet {
    pub field: FieldName,
    pub mode: RuleMode,
    pub rules: &'static [Rule],
}

static EMAIL_RULES: RuleSet = RuleSet {
    field: FieldName::Email,
    mode: RuleMode::FirstFailure,
    rules: &[Rule::new(INVALID_EMAIL, is_email)],
};

static PASSWORD_RULES: RuleSet = RuleSet {
    field: FieldName::Password,
    mode: RuleMode::Accumulate,
    rules: &[
        Rule::new(PASSWORD_TOO_SHORT, |value, _| {
            value.chars().count() >= MIN_PASSWORD_LEN
        }),
        Rule::new(PASSWORD_NEEDS_UPPERCASE, |value, _| {
            value.chars().any(|c| c.is_ascii_uppercase())
        }),
        Rule::new(PASSWORD_NEEDS_NUMBER, |value, _| {
            value.chars().any(|c| c.is_ascii_digit())
        }),
    ],
};

static CONFIRM_PASSWORD_RULES: RuleSet = RuleSet {
    field: FieldName::ConfirmPassword,
    mode: RuleMode::FirstFailure,
    rules: &[Rule::new(PASSWORDS_DONT_MATCH, |value, values| {
        value == values.password
    })],
};

impl RuleSet {
    /// Rule set for a field
    pub fn for_field(field: FieldName) -> &'static RuleSet {
        match field {
            FieldName::Email => &EMAIL_RULES,
            FieldName::Password => &PASSWORD_RULES,
            FieldName::ConfirmPassword => &CONFIRM_PASSWORD_RULES,
        }
    }

    /// Run the rules against the field's current value and collect failure messages
    pub fn apply(&self, values: &FormValues) -> Vec<String> {
        let value = values.get(self.field);
        let mut errors = Vec::new();

        for rule in self.rules {
            if rule.passes(value, values) {
                continue;
            }

            log::trace!("{}: rule failed: {}", self.field, rule.message);
            errors.push(rule.message.to_string());

            if self.mode == RuleMode::FirstFailure {
                break;
            }
        }

        errors
    }
}

/// Email syntax check: `local@label.tld`, no leading dot and no consecutive dots
pub fn is_email(value: &str, _values: &FormValues) -> bool {
    !value.starts_with('.') && !value.contains("..") && EMAIL_RE.is_match(value)
}

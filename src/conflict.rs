//! Conflict Checks
//!
//! The business check that runs after every syntactic rule has passed. The
//! sign-up demo rejects every address; the other capabilities exist so a
//! caller can exercise the rest of the outcome space.

use serde::Deserialize;
use std::collections::HashSet;
use std::str::FromStr;

use crate::error::FormError;

/// Answers whether an email address already belongs to an account
pub trait ConflictCheck {
    fn check_email_taken(&self, email: &str) -> bool;
}

/// Reports every address as registered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AlwaysTaken;

impl ConflictCheck for AlwaysTaken {
    fn check_email_taken(&self, _email: &str) -> bool {
        true
    }
}

/// Reports no address as registered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NeverTaken;

impl ConflictCheck for NeverTaken {
    fn check_email_taken(&self, _email: &str) -> bool {
        false
    }
}

/// A fixed set of known addresses
///
/// Addresses are compared after trimming and ASCII lowercasing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisteredEmails {
    emails: HashSet<String>,
}

impl RegisteredEmails {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, email: &str) {
        self.emails.insert(normalize(email));
    }

    pub fn len(&self) -> usize {
        self.emails.len()
    }

    pub fn is_empty(&self) -> bool {
        self.emails.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for RegisteredEmails {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            emails: iter.into_iter().map(|e| normalize(e.as_ref())).collect(),
        }
    }
}

impl ConflictCheck for RegisteredEmails {
    fn check_email_taken(&self, email: &str) -> bool {
        self.emails.contains(&normalize(email))
    }
}

fn normalize(email: &str) -> String {
    email.trim().to_ascii_lowercase()
}

/// Named policy, as selected on the command line or in the config file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConflictPolicy {
    #[default]
    Always,
    Never,
    Registry,
}

impl FromStr for ConflictPolicy {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "always" => Ok(ConflictPolicy::Always),
            "never" => Ok(ConflictPolicy::Never),
            "registry" => Ok(ConflictPolicy::Registry),
            other => Err(FormError::UnknownPolicy(other.to_string())),
        }
    }
}

/// Runtime choice between the built-in capabilities
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PolicyCheck {
    Always(AlwaysTaken),
    Never(NeverTaken),
    Registry(RegisteredEmails),
}

impl PolicyCheck {
    /// Build the capability for `policy`; `registered` is only used by the registry policy
    pub fn from_policy(policy: ConflictPolicy, registered: &[String]) -> Self {
        match policy {
            ConflictPolicy::Always => PolicyCheck::Always(AlwaysTaken),
            ConflictPolicy::Never => PolicyCheck::Never(NeverTaken),
            ConflictPolicy::Registry => PolicyCheck::Registry(registered.iter().collect()),
        }
    }
}

impl Default for PolicyCheck {
    fn default() -> Self {
        PolicyCheck::Always(AlwaysTaken)
    }
}

impl ConflictCheck for PolicyCheck {
    fn check_email_taken(&self, email: &str) -> bool {
        match self {
            PolicyCheck::Always(check) => check.check_email_taken(email),
            PolicyCheck::Never(check) => check.check_email_taken(email),
            PolicyCheck::Registry(check) => check.check_email_taken(email),
        }
    }
}

impl<C: ConflictCheck + ?Sized> ConflictCheck for &C {
    fn check_email_taken(&self, email: &str) -> bool {
        (**self).check_email_taken(email)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_policies() {
        assert!(AlwaysTaken.check_email_taken("anyone@example.com"));
        assert!(!NeverTaken.check_email_taken("anyone@example.com"));
    }

    #[test]
    fn test_registry_normalizes_addresses() {
        let registry: RegisteredEmails = ["Taken@Example.com"].into_iter().collect();
        assert_eq!(registry.len(), 1);

        assert!(registry.check_email_taken("taken@example.com"));
        assert!(registry.check_email_taken("  TAKEN@example.COM "));
        assert!(!registry.check_email_taken("free@example.com"));
    }

    #[test]
    fn test_registry_insert() {
        let mut registry = RegisteredEmails::new();
        assert!(registry.is_empty());

        registry.insert(" New@Example.com");
        assert!(registry.check_email_taken("new@example.com"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_policy_parsing() {
        assert_eq!("always".parse::<ConflictPolicy>(), Ok(ConflictPolicy::Always));
        assert_eq!("never".parse::<ConflictPolicy>(), Ok(ConflictPolicy::Never));
        assert_eq!("registry".parse::<ConflictPolicy>(), Ok(ConflictPolicy::Registry));
        assert_eq!(
            "Always".parse::<ConflictPolicy>(),
            Err(FormError::UnknownPolicy("Always".to_string()))
        );
    }

    #[test]
    fn test_policy_check_dispatch() {
        let registered = vec!["taken@example.com".to_string()];

        let check = PolicyCheck::from_policy(ConflictPolicy::Registry, &registered);
        assert!(check.check_email_taken("taken@example.com"));
        assert!(!check.check_email_taken("free@example.com"));

        let check = PolicyCheck::from_policy(ConflictPolicy::Never, &registered);
        assert!(!check.check_email_taken("taken@example.com"));

        assert!(PolicyCheck::default().check_email_taken("free@example.com"));
    }
}

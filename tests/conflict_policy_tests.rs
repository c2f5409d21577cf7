use signup_form_validator::conflict::{ConflictPolicy, PolicyCheck};
use signup_form_validator::validation::EMAIL_ALREADY_REGISTERED;
use signup_form_validator::{
    AlwaysTaken, ConflictCheck, FieldName, FormValues, NeverTaken, RegisteredEmails,
    SubmissionOutcome, ValidationEngine,
};

fn valid_values(email: &str) -> FormValues {
    FormValues::new(email, "Password1", "Password1")
}

/// Test double that records how often it was consulted
struct CountingCheck {
    calls: std::cell::Cell<usize>,
}

impl ConflictCheck for CountingCheck {
    fn check_email_taken(&self, _email: &str) -> bool {
        self.calls.set(self.calls.get() + 1);
        false
    }
}

#[test]
fn test_default_engine_rejects_every_valid_email() {
    let engine = ValidationEngine::new();
    for email in ["a@b.co", "new.user@example.com", "someone@else.org"] {
        assert!(matches!(
            engine.submit(&valid_values(email)),
            SubmissionOutcome::Conflict(_)
        ));
    }
    assert_eq!(engine.conflict_check(), &AlwaysTaken);
}

#[test]
fn test_registry_only_rejects_known_addresses() {
    let registry: RegisteredEmails = ["taken@example.com"].into_iter().collect();
    let engine = ValidationEngine::with_conflict_check(registry);

    match engine.submit(&valid_values("Taken@Example.com")) {
        SubmissionOutcome::Conflict(errors) => {
            assert_eq!(errors.get(FieldName::Email), [EMAIL_ALREADY_REGISTERED]);
        }
        other => panic!("Expected conflict, got {:?}", other),
    }

    assert_eq!(
        engine.submit(&valid_values("free@example.com")),
        SubmissionOutcome::Success
    );
}

#[test]
fn test_conflict_check_runs_only_after_rules_pass() {
    let check = CountingCheck {
        calls: std::cell::Cell::new(0),
    };
    let engine = ValidationEngine::with_conflict_check(&check);

    let invalid = FormValues::new("user@example.com", "short", "short");
    assert!(matches!(
        engine.submit(&invalid),
        SubmissionOutcome::ValidationFailed(_)
    ));
    assert_eq!(check.calls.get(), 0);

    assert!(engine.submit(&valid_values("user@example.com")).is_success());
    assert_eq!(check.calls.get(), 1);
}

#[test]
fn test_policy_check_matches_named_policies() {
    let registered = vec!["taken@example.com".to_string()];
    let values = valid_values("free@example.com");

    let outcomes: Vec<_> = [
        ConflictPolicy::Always,
        ConflictPolicy::Never,
        ConflictPolicy::Registry,
    ]
    .into_iter()
    .map(|policy| {
        ValidationEngine::with_conflict_check(PolicyCheck::from_policy(policy, &registered))
            .submit(&values)
    })
    .collect();

    assert!(matches!(outcomes[0], SubmissionOutcome::Conflict(_)));
    assert!(outcomes[1].is_success());
    assert!(outcomes[2].is_success());

    assert!(ValidationEngine::with_conflict_check(NeverTaken)
        .submit(&values)
        .errors()
        .is_none());
}

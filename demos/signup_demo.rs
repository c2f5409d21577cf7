use signup_form_validator::{FieldName, FormState, NeverTaken, ValidationEngine};

fn show(form: &FormState, label: &str) {
    println!("\n{}", label);
    for field in FieldName::ALL {
        println!(
            "  {:<16} {:?} {:?}",
            field.as_str(),
            form.status(field),
            form.visible_errors(field)
        );
    }
    if let Some(outcome) = form.outcome() {
        println!("  outcome: {:?}", outcome);
    }
}

fn main() {
    println!("=== Sign-up Form Demo ===");

    let engine = ValidationEngine::new();
    let mut form = FormState::new();

    form.edit(FieldName::Email, "jane");
    show(&form, "Typing an email (not yet blurred):");

    form.blur(FieldName::Email);
    show(&form, "After leaving the email field:");

    form.edit(FieldName::Email, "jane@example.com");
    form.edit(FieldName::Password, "secret");
    form.blur(FieldName::Password);
    show(&form, "Weak password:");

    form.edit(FieldName::Password, "Secret123");
    form.edit(FieldName::ConfirmPassword, "Secret12");
    form.blur(FieldName::ConfirmPassword);
    show(&form, "Mismatched confirmation:");

    form.edit(FieldName::ConfirmPassword, "Secret123");
    form.submit(&engine);
    show(&form, "Submitted (every address counts as registered):");

    form.submit(&ValidationEngine::with_conflict_check(NeverTaken));
    show(&form, "Submitted against an empty user base:");
    println!("  success panel: {}", form.show_success());
}

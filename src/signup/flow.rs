//! The five-step registration wizard.

use std::sync::Arc;

use crate::auth::VerificationService;
use crate::storage::TokenStore;
use crate::wizard::{
    AnswerSet, BlockedError, EffectError, FieldSpec, InputKind, SideEffect, StepDefinition,
    StepTable, ValidationOutcome, WizardController,
};

use super::effects::SignupEffects;
use super::rules::{self, CodeShape};
use super::{keys, Role};

// Opaque icon hints; the UI maps them to artwork.
const ICON_CHOICE: u8 = 1;
const ICON_FIELD: u8 = 2;
const ICON_MISMATCH: u8 = 3;
const ICON_FORMAT: u8 = 4;
const ICON_NETWORK: u8 = 5;

/// Builds the registration step table: role, names, email, code, password.
pub fn signup_table() -> StepTable {
    StepTable::new(vec![
        StepDefinition {
            index: 0,
            title: "Create your account",
            subtitle: "Are you booking musicians, or performing?",
            fields: &[FieldSpec {
                key: keys::ROLE,
                label: "Role",
            }],
            kind: InputKind::Choice,
            validator: validate_role,
        },
        StepDefinition {
            index: 1,
            title: "Tell us about you",
            subtitle: "Setting up your {role} account",
            fields: &[
                FieldSpec {
                    key: keys::FIRST_NAME,
                    label: "First name",
                },
                FieldSpec {
                    key: keys::LAST_NAME,
                    label: "Last name",
                },
            ],
            kind: InputKind::Text,
            validator: validate_names,
        },
        StepDefinition {
            index: 2,
            title: "Nice to meet you, {firstName}!",
            subtitle: "Where can we reach you?",
            fields: &[
                FieldSpec {
                    key: keys::EMAIL,
                    label: "Email",
                },
                FieldSpec {
                    key: keys::CONFIRM_EMAIL,
                    label: "Confirm email",
                },
            ],
            kind: InputKind::Text,
            validator: validate_email,
        },
        StepDefinition {
            index: 3,
            title: "Check your inbox",
            subtitle: "Enter the six-digit code we sent to {email}",
            fields: &[
                FieldSpec {
                    key: keys::VALID_CODE,
                    label: "Verification code",
                },
                FieldSpec {
                    key: keys::CONFIRM_CODE,
                    label: "Confirm code",
                },
            ],
            kind: InputKind::Numeric,
            validator: validate_code,
        },
        StepDefinition {
            index: 4,
            title: "Secure your account",
            subtitle: "Pick a password you haven't used elsewhere",
            fields: &[
                FieldSpec {
                    key: keys::PASSWORD,
                    label: "Password",
                },
                FieldSpec {
                    key: keys::CONFIRM_PASSWORD,
                    label: "Confirm password",
                },
            ],
            kind: InputKind::Secret,
            validator: validate_password,
        },
    ])
}

/// Wires the full registration wizard: step table, side effects, and
/// failure presentation.
pub fn signup_wizard(
    service: Arc<dyn VerificationService>,
    tokens: Arc<dyn TokenStore>,
) -> WizardController<SignupEffects> {
    WizardController::new(
        signup_table(),
        SignupEffects::new(service, tokens),
        signup_failure_notice,
    )
}

/// Shapes side-effect failures for display: server reasons verbatim, a
/// role-aware generic notice when the service never answered.
pub fn signup_failure_notice(answers: &AnswerSet, failure: &EffectError) -> BlockedError {
    match failure {
        EffectError::Rejected { message } => {
            BlockedError::new("Registration problem", message.clone(), ICON_NETWORK)
        }
        _ => {
            let audience = match answers
                .choice(keys::ROLE)
                .and_then(|(_, id)| Role::from_id(id))
            {
                Some(Role::Organizer) => "organizer support",
                Some(Role::Musician) => "musician support",
                None => "support",
            };
            BlockedError::new(
                "Service unavailable",
                format!(
                    "The service is temporarily unavailable. Try again later or contact {audience}."
                ),
                ICON_NETWORK,
            )
        }
    }
}

fn blocked(title: &str, message: &str, icon: u8) -> ValidationOutcome {
    ValidationOutcome::Blocked(BlockedError::new(title, message, icon))
}

fn validate_role(answers: &AnswerSet) -> ValidationOutcome {
    if answers.choice(keys::ROLE).is_none() {
        return blocked(
            "Select a role",
            "Choose whether you are an organizer or a musician to continue.",
            ICON_CHOICE,
        );
    }
    ValidationOutcome::Advance
}

fn validate_names(answers: &AnswerSet) -> ValidationOutcome {
    if answers.text(keys::FIRST_NAME).trim().is_empty() {
        return blocked(
            "Missing first name",
            "Enter your first name to continue.",
            ICON_FIELD,
        );
    }
    if answers.text(keys::LAST_NAME).trim().is_empty() {
        return blocked(
            "Missing last name",
            "Enter your last name to continue.",
            ICON_FIELD,
        );
    }
    ValidationOutcome::Advance
}

fn validate_email(answers: &AnswerSet) -> ValidationOutcome {
    let email = answers.text(keys::EMAIL);
    let confirm = answers.text(keys::CONFIRM_EMAIL);
    if email.is_empty() {
        return blocked("Missing email", "Enter your email address.", ICON_FIELD);
    }
    if confirm.is_empty() {
        return blocked(
            "Missing confirmation",
            "Re-enter your email address to confirm it.",
            ICON_FIELD,
        );
    }
    if !email.eq_ignore_ascii_case(confirm) {
        return blocked(
            "Emails do not match",
            "The email addresses do not match.",
            ICON_MISMATCH,
        );
    }
    if rules::has_internal_space(email) {
        return blocked(
            "Invalid email",
            "The email address cannot contain spaces.",
            ICON_FORMAT,
        );
    }
    if !rules::email_format_ok(email) || !rules::email_format_ok(confirm) {
        return blocked("Invalid email", "Enter a valid email address.", ICON_FORMAT);
    }
    ValidationOutcome::RequiresSideEffect(SideEffect::SendVerificationEmail)
}

fn validate_code(answers: &AnswerSet) -> ValidationOutcome {
    let code = answers.text(keys::VALID_CODE);
    let confirm = answers.text(keys::CONFIRM_CODE);
    if code.is_empty() {
        return blocked(
            "Missing code",
            "Enter the verification code we emailed you.",
            ICON_FIELD,
        );
    }
    if confirm.is_empty() {
        return blocked(
            "Missing confirmation",
            "Re-enter the verification code to confirm it.",
            ICON_FIELD,
        );
    }
    match rules::code_shape(code) {
        CodeShape::TooShort => {
            return blocked(
                "Code incomplete",
                "The code is missing digits; it has six.",
                ICON_FORMAT,
            );
        }
        CodeShape::TooLong => {
            return blocked(
                "Code too long",
                "The code has too many digits; it has six.",
                ICON_FORMAT,
            );
        }
        CodeShape::Exact => {}
    }
    if code != confirm {
        return blocked(
            "Codes do not match",
            "The verification codes do not match.",
            ICON_MISMATCH,
        );
    }
    ValidationOutcome::RequiresSideEffect(SideEffect::ConfirmVerificationCode)
}

fn validate_password(answers: &AnswerSet) -> ValidationOutcome {
    let password = answers.text(keys::PASSWORD);
    let confirm = answers.text(keys::CONFIRM_PASSWORD);
    if password.is_empty() {
        return blocked(
            "Missing password",
            "Choose a password to continue.",
            ICON_FIELD,
        );
    }
    if confirm.is_empty() {
        return blocked(
            "Missing confirmation",
            "Re-enter your password to confirm it.",
            ICON_FIELD,
        );
    }
    if password != confirm {
        return blocked(
            "Passwords do not match",
            "The passwords do not match.",
            ICON_MISMATCH,
        );
    }
    if !rules::password_strong(password) || !rules::password_strong(confirm) {
        return blocked(
            "Password too weak",
            "Use at least 8 characters with a lowercase letter, an uppercase letter, a digit, and a special character.",
            ICON_FORMAT,
        );
    }
    ValidationOutcome::RequiresSideEffect(SideEffect::SubmitRegistration)
}

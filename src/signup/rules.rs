//! Pure input checks shared by the registration validators.

use once_cell::sync::Lazy;
use regex::Regex;

/// Characters accepted as the "special" component of a password.
pub const PASSWORD_SPECIALS: &str = "!@#$%^&*()_-+=[]{};:,.?";

/// Minimum password length.
pub const MIN_PASSWORD_LEN: usize = 8;

/// Exact number of digits in an emailed verification code.
pub const CODE_LEN: usize = 6;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("valid email pattern")
});

/// Standard shape check. Internal whitespace is rejected separately (and
/// first) so the user sees the more specific message.
pub fn email_format_ok(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Detects internal whitespace by splitting and counting tokens.
pub fn has_internal_space(email: &str) -> bool {
    email.split_whitespace().count() > 1
}

/// Verification-code length relative to the required six digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeShape {
    Exact,
    TooShort,
    TooLong,
}

pub fn code_shape(code: &str) -> CodeShape {
    match code.chars().count() {
        n if n < CODE_LEN => CodeShape::TooShort,
        n if n > CODE_LEN => CodeShape::TooLong,
        _ => CodeShape::Exact,
    }
}

/// Password strength: lowercase, uppercase, digit, and one special from
/// [`PASSWORD_SPECIALS`], minimum eight characters.
pub fn password_strong(password: &str) -> bool {
    password.chars().count() >= MIN_PASSWORD_LEN
        && password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(|c| PASSWORD_SPECIALS.contains(c))
}

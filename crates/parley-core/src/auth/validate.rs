//! Credential shape validation and email normalization.

use std::sync::LazyLock;

use parley_types::auth::{Credentials, MIN_PASSWORD_LEN};
use parley_types::error::ValidationError;
use regex::Regex;
use secrecy::SecretString;

/// Local part, `@`, one or more `label.` groups, alphabetic TLD.
/// The leading-dot and double-dot rules are checked separately.
static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_'+\-.]*[A-Za-z0-9_+\-]@(?:[A-Za-z0-9][A-Za-z0-9\-]*\.)+[A-Za-z]{2,}$")
        .expect("email regex is valid")
});

/// Whether `email` has a valid address shape (case-insensitive).
pub fn is_valid_email(email: &str) -> bool {
    !email.starts_with('.') && !email.contains("..") && EMAIL_RE.is_match(email)
}

/// Lowercase an email so differently-cased inputs name the same account.
pub fn normalize_email(email: &str) -> String {
    email.to_lowercase()
}

/// Validate raw form fields and build normalized [`Credentials`].
///
/// Missing fields are validation failures, same as malformed ones. Password
/// length is measured in UTF-16 code units, matching browser-side checks.
pub fn validate_credentials(
    email: Option<&str>,
    password: Option<&str>,
) -> Result<Credentials, ValidationError> {
    let email = email.ok_or(ValidationError::MissingField("email"))?;
    let password = password.ok_or(ValidationError::MissingField("password"))?;

    if !is_valid_email(email) {
        return Err(ValidationError::InvalidEmail);
    }
    if password.encode_utf16().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::PasswordTooShort {
            min: MIN_PASSWORD_LEN,
        });
    }

    Ok(Credentials {
        email: normalize_email(email),
        password: SecretString::from(password.to_string()),
    })
}

//! Field limits and password policy mirroring the service's validation.
//!
//! The suite checks the service against these numbers, so they describe what
//! the service documents rather than what it happens to enforce.
//!
//! # Password Rules
//!
//! - Length between 8 and 72 characters
//! - At least one uppercase letter, one lowercase letter and one digit
//! - No whitespace

/// Minimum allowed password length.
pub const PASSWORD_MIN_LEN: usize = 8;

/// Maximum allowed password length.
pub const PASSWORD_MAX_LEN: usize = 72;

/// Length of passwords produced by the random generators.
pub const GENERATED_PASSWORD_LEN: usize = 12;

/// Maximum username length accepted at registration.
pub const USERNAME_MAX_LEN: usize = 255;

/// Maximum length of the local part of an email address.
pub const EMAIL_LOCAL_MAX_LEN: usize = 64;

/// Maximum length of a single domain label in an email address.
pub const EMAIL_LABEL_MAX_LEN: usize = 63;

/// Maximum post title length.
pub const POST_TITLE_MAX_LEN: usize = 255;

/// Validates a password against the registration policy.
///
/// # Examples
///
/// ```
/// use test_data::is_valid_password;
///
/// assert!(is_valid_password("Passw0rdOk"));
/// assert!(!is_valid_password("short1A"));     // Too short
/// assert!(!is_valid_password("Pass word1"));  // Whitespace
/// assert!(!is_valid_password("Password"));    // No digit
/// ```
#[must_use]
pub fn is_valid_password(password: &str) -> bool {
    let length = password.chars().count();
    if !(PASSWORD_MIN_LEN..=PASSWORD_MAX_LEN).contains(&length) {
        return false;
    }
    if password.chars().any(char::is_whitespace) {
        return false;
    }
    let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
    let has_lower = password.chars().any(|c| c.is_ascii_lowercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    has_upper && has_lower && has_digit
}

//! Unique credentials and boundary strings for registration scenarios.
//!
//! Every generator draws from the thread-local RNG without a fixed seed.
//! Emails and usernames carry a UUID-derived suffix so values stay unique
//! within a run even when the faker repeats a name.

use fake::Fake;
use fake::faker::internet::raw::{FreeEmailProvider, Username};
use fake::faker::name::raw::FirstName;
use fake::locales::EN;
use rand::Rng;
use rand::seq::SliceRandom;
use uuid::Uuid;

use crate::error::GenerationError;
use crate::validation::{GENERATED_PASSWORD_LEN, is_valid_password};

/// Maximum number of attempts to generate a valid password.
const MAX_PASSWORD_ATTEMPTS: usize = 100;

/// Number of hexadecimal characters appended to generated identities.
const SUFFIX_LEN: usize = 10;

const UPPERCASE: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const LOWERCASE: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
const DIGITS: &[u8] = b"0123456789";
const ALPHANUMERIC: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
const LETTERS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Returns a short random hexadecimal suffix.
#[must_use]
pub fn unique_suffix() -> String {
    Uuid::new_v4()
        .simple()
        .to_string()
        .chars()
        .take(SUFFIX_LEN)
        .collect()
}

/// Generates a unique, syntactically valid email address.
///
/// The local part is a lowercased first name joined to a unique suffix; the
/// domain is a well-known free email provider.
///
/// # Examples
///
/// ```
/// let email = test_data::fake_email();
/// assert_eq!(email.matches('@').count(), 1);
/// ```
#[must_use]
pub fn fake_email() -> String {
    let first: String = FirstName(EN).fake();
    let provider: String = FreeEmailProvider(EN).fake();
    format!("{}.{}@{provider}", sanitize_identifier(&first), unique_suffix())
}

/// Generates a unique username of ASCII letters, digits and underscores.
#[must_use]
pub fn fake_username() -> String {
    let base: String = Username(EN).fake();
    format!("{}_{}", sanitize_identifier(&base), unique_suffix())
}

/// Generates a password satisfying the registration policy.
///
/// # Errors
///
/// Returns [`GenerationError::PasswordGenerationFailed`] if no compliant
/// password is produced within the retry budget.
pub fn fake_password() -> Result<String, GenerationError> {
    fake_password_with_rng(&mut rand::rng())
}

/// Generates a policy-compliant password using the provided RNG.
///
/// The password always contains at least one uppercase letter, one lowercase
/// letter and one digit, padded with alphanumerics and shuffled.
///
/// # Errors
///
/// Returns [`GenerationError::PasswordGenerationFailed`] if no compliant
/// password is produced within the retry budget.
pub fn fake_password_with_rng<R: Rng>(rng: &mut R) -> Result<String, GenerationError> {
    for _ in 0..MAX_PASSWORD_ATTEMPTS {
        let mut chars = vec![
            pick(rng, UPPERCASE),
            pick(rng, LOWERCASE),
            pick(rng, DIGITS),
        ];
        while chars.len() < GENERATED_PASSWORD_LEN {
            chars.push(pick(rng, ALPHANUMERIC));
        }
        chars.shuffle(rng);
        let candidate: String = chars.into_iter().collect();

        if is_valid_password(&candidate) {
            return Ok(candidate);
        }
    }

    Err(GenerationError::PasswordGenerationFailed {
        max_attempts: MAX_PASSWORD_ATTEMPTS,
    })
}

/// Returns a string of exactly `len` random ASCII letters.
#[must_use]
pub fn random_letters(len: usize) -> String {
    let mut rng = rand::rng();
    (0..len).map(|_| pick(&mut rng, LETTERS)).collect()
}

/// Builds an email whose local part and two domain labels have exact lengths.
///
/// Used for the maximum-length registration checks: the service accepts a
/// 64-character local part and 63-character labels.
///
/// # Examples
///
/// ```
/// let email = test_data::email_with_lengths(3, 4, 2);
/// let (local, domain) = email.split_once('@').expect("at sign");
/// assert_eq!(local.len(), 3);
/// assert_eq!(domain.len(), 4 + 1 + 2);
/// ```
#[must_use]
pub fn email_with_lengths(local_len: usize, label_len: usize, tld_len: usize) -> String {
    format!(
        "{}@{}.{}",
        random_letters(local_len),
        random_letters(label_len),
        random_letters(tld_len)
    )
}

/// Returns six malformed email addresses derived from a fresh valid one.
///
/// The variants cover a missing at sign, a missing local part, an empty
/// domain label, a domain without a dot and consecutive dots.
#[must_use]
pub fn invalid_email_variants() -> Vec<String> {
    let email = fake_email();
    let (local, domain) = email.split_once('@').unwrap_or((email.as_str(), "example.com"));
    let (root, tld) = domain.split_once('.').unwrap_or((domain, "com"));

    vec![
        local.to_owned(),
        format!("{local}.{tld}"),
        format!("@{domain}"),
        format!("{local}@.{tld}"),
        format!("{local}@{root}"),
        format!("{local}@{root}..{tld}"),
    ]
}

fn pick<R: Rng>(rng: &mut R, charset: &[u8]) -> char {
    charset
        .get(rng.random_range(0..charset.len()))
        .map_or('x', |byte| char::from(*byte))
}

fn sanitize_identifier(raw: &str) -> String {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect::<String>()
        .to_lowercase();
    if cleaned.is_empty() {
        "user".to_owned()
    } else {
        cleaned
    }
}

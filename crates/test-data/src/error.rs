//! Error types for the test-data crate.
//!
//! Generation is almost always infallible; these variants cover the retry
//! budget and serialisation of payloads into raw JSON.

use thiserror::Error;

/// Errors that can occur while building test payloads.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// Failed to produce a policy-compliant password after maximum retries.
    #[error("failed to generate valid password after {max_attempts} attempts")]
    PasswordGenerationFailed {
        /// Number of attempts made before giving up.
        max_attempts: usize,
    },

    /// A typed payload could not be converted into raw JSON.
    #[error("failed to serialise {payload} payload: {message}")]
    Serialisation {
        /// Name of the payload type being converted.
        payload: &'static str,
        /// Description of the serialisation error.
        message: String,
    },
}

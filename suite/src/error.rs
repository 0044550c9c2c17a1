//! Error types raised by the harness.
//!
//! Domain failures reported by the service (`status: "error"`) are not errors
//! here; they decode into [`crate::schema::ApiResponse::Error`]. This enum
//! covers everything that should fail a scenario outright.

use thiserror::Error;

use crate::config::ConfigError;
use crate::routes::Endpoint;

/// Failure raised by transport, decoding, database access or fixtures.
#[derive(Debug, Error)]
pub enum HarnessError {
    /// The HTTP exchange itself failed (connection refused, timeout, TLS).
    #[error("transport failure for {method} {url}: {source}")]
    Transport {
        /// HTTP method of the failed request.
        method: String,
        /// Fully qualified request URL.
        url: String,
        /// Underlying client error.
        #[source]
        source: reqwest::Error,
    },

    /// The response body was not JSON.
    #[error("response from {endpoint} is not valid JSON: {message}; body: {body}")]
    InvalidJson {
        /// Endpoint that produced the body.
        endpoint: Endpoint,
        /// Parser diagnostic.
        message: String,
        /// Size-capped body preview.
        body: String,
    },

    /// The body matched neither the endpoint's success shape nor the shared
    /// error shape.
    #[error("response from {endpoint} violates its schema: {message}; body: {body}")]
    SchemaViolation {
        /// Endpoint that produced the body.
        endpoint: Endpoint,
        /// Validation diagnostic.
        message: String,
        /// Offending body.
        body: String,
    },

    /// A fixture needed a success response but the service reported an error.
    #[error("{endpoint} returned an error while preparing state: {message}")]
    UnexpectedApiError {
        /// Endpoint that failed.
        endpoint: Endpoint,
        /// Error text reported by the service.
        message: String,
    },

    /// A database query or connection failed.
    #[error("database error: {0}")]
    Database(String),

    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A request payload could not be built or serialised.
    #[error("payload error: {0}")]
    Payload(String),

    /// A fixture could not establish its precondition.
    #[error("fixture '{fixture}' failed: {message}")]
    Fixture {
        /// Name of the fixture.
        fixture: &'static str,
        /// Description of the failure.
        message: String,
    },
}

impl From<postgres::Error> for HarnessError {
    fn from(error: postgres::Error) -> Self {
        Self::Database(format_postgres_error(&error))
    }
}

impl From<test_data::GenerationError> for HarnessError {
    fn from(error: test_data::GenerationError) -> Self {
        Self::Payload(error.to_string())
    }
}

impl From<serde_json::Error> for HarnessError {
    fn from(error: serde_json::Error) -> Self {
        Self::Payload(error.to_string())
    }
}

/// Renders a postgres error with SQLSTATE, detail, hint and location.
///
/// Client-side errors without a server payload fall back to their `Display`
/// output.
#[must_use]
pub fn format_postgres_error(error: &postgres::Error) -> String {
    let Some(db_error) = error.as_db_error() else {
        return error.to_string();
    };

    let mut summary = format!(
        "postgres error {}: {}",
        db_error.code().code(),
        db_error.message()
    );

    if let Some(detail) = db_error.detail() {
        summary.push_str("; detail: ");
        summary.push_str(detail);
    }

    if let Some(hint) = db_error.hint() {
        summary.push_str("; hint: ");
        summary.push_str(hint);
    }

    if let Some(where_) = db_error.where_() {
        summary.push_str("; where: ");
        summary.push_str(where_);
    }

    summary
}

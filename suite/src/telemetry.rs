//! Tracing setup and scenario stage spans.
//!
//! Scenarios group their work into [`Stage`]s so log output reads as
//! prepare, execute, validate and clean up blocks. Known service defects are
//! tagged with [`KnownIssue`] so they stand out in the logs.

use std::fmt;

use tracing::{info_span, warn};
use tracing_subscriber::{EnvFilter, fmt as subscriber_fmt};

/// Installs the global subscriber for this test binary.
///
/// Honours `RUST_LOG` and defaults to `info`. A subscriber that is already
/// installed is left in place and the conflict is logged.
pub fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = subscriber_fmt().with_env_filter(filter).with_test_writer();
    let result = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    if let Err(e) = result {
        warn!(error = %e, "tracing init failed");
    }
}

/// Phase of a scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Building preconditions and payloads.
    Prepare,
    /// Calling the endpoint under test.
    Execute,
    /// Checking the typed response.
    ValidateApi,
    /// Checking database state.
    ValidateDb,
    /// Removing rows the scenario created.
    Cleanup,
}

impl Stage {
    /// Label used as the span's `stage` field.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Prepare => "prepare",
            Self::Execute => "execute",
            Self::ValidateApi => "validate_api",
            Self::ValidateDb => "validate_db",
            Self::Cleanup => "cleanup",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Runs `body` inside a span for `stage`.
///
/// ```rust,ignore
/// let post_id = step(Stage::Execute, || session.posts().publish(&token, &payload))?;
/// ```
pub fn step<T>(stage: Stage, body: impl FnOnce() -> T) -> T {
    let span = info_span!("stage", stage = stage.as_str());
    span.in_scope(body)
}

/// Known service behaviour that deviates from its documentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KnownIssue {
    /// Response differs from the published API documentation.
    DocIssue,
    /// The service does not enforce a documented maximum length.
    NoMaxValueValidation,
    /// Passwords with special symbols are handled differently than documented.
    PasswordSpecialSymbol,
}

impl KnownIssue {
    /// Stable tag for log filtering.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::DocIssue => "doc_issue",
            Self::NoMaxValueValidation => "no_validation_for_max_value",
            Self::PasswordSpecialSymbol => "password_special_symbol_issue",
        }
    }
}

/// Records that the current scenario exercises a known issue.
pub fn known_issue(issue: KnownIssue, note: &str) {
    warn!(known_issue = issue.tag(), note, "scenario covers a known issue");
}

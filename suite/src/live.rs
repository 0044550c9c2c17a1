//! Gate for scenarios that need a running service and database.
//!
//! Scenarios only run when `API_TESTS_LIVE` is truthy. Otherwise they print
//! a skip marker and return early, so `cargo test` stays green on machines
//! without the service. Once enabled, a session that cannot be set up fails
//! the test instead of being skipped.

use crate::fixtures::Session;

/// Variable enabling live scenarios.
pub const LIVE_ENV_VAR: &str = "API_TESTS_LIVE";

/// Whether `value` counts as enabled: "1", "true" or "yes", any case.
#[must_use]
pub fn is_truthy(value: &str) -> bool {
    matches!(value.trim().to_lowercase().as_str(), "1" | "true" | "yes")
}

/// Returns true when [`LIVE_ENV_VAR`] is set to a truthy value.
#[must_use]
pub fn live_suite_enabled() -> bool {
    std::env::var(LIVE_ENV_VAR).is_ok_and(|value| is_truthy(&value))
}

/// The shared session, or `None` when live scenarios are disabled.
///
/// # Panics
///
/// Panics when live scenarios are enabled but the session cannot be set up,
/// so a broken environment is never reported as a pass.
#[must_use]
#[expect(clippy::print_stderr, reason = "skip marker must reach the test output")]
pub fn live_session() -> Option<&'static Session> {
    if !live_suite_enabled() {
        eprintln!("SKIP-LIVE-SUITE: {LIVE_ENV_VAR} is not set");
        return None;
    }
    match Session::shared() {
        Ok(session) => Some(session),
        Err(err) => panic!("live session setup failed: {err}. Unset {LIVE_ENV_VAR} to skip."),
    }
}

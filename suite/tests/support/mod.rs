//! Shared helpers for the live scenario binaries.
//!
//! Every file under `tests/` is its own binary, so the statics here give
//! module scope: one token per binary, reused by all of its scenarios.

use blog_api_suite::HarnessError;
use blog_api_suite::fixtures::{Scoped, Session};
use blog_api_suite::live::live_session;
use rstest::fixture;

static MODULE_TOKEN: Scoped<String> = Scoped::new();

/// The shared session, or `None` when live scenarios are disabled.
#[fixture]
pub fn live() -> Option<&'static Session> {
    live_session()
}

/// Token of a regular user created once for this test binary.
///
/// Scenarios using it must not ban, promote or otherwise mutate the account.
pub fn module_token(session: &Session) -> String {
    MODULE_TOKEN
        .get_or_try_init(|| session.create_user_get_token())
        .unwrap_or_else(|err| panic!("module token setup failed: {err}"))
}

/// Unwraps a fixture or wrapper result, failing the scenario with context.
#[track_caller]
pub fn require<T>(result: Result<T, HarnessError>, context: &str) -> T {
    result.unwrap_or_else(|err| panic!("{context}: {err}"))
}

const _: fn(&Session) -> String = module_token;
const _: fn(Result<String, HarnessError>, &str) -> String = require::<String>;

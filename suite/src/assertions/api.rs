//! Response-level assertions.

use std::fmt::Debug;

use serde_json::Value;

use crate::schema::ApiResponse;

/// Exact error text returned for requests without credentials.
pub const ACCESS_DENIED: &str = "Access denied";

/// Returns `true` when `actual` contains any of `expected`, ignoring case.
///
/// An empty `expected` list matches anything.
#[must_use]
pub fn error_matches(actual: &str, expected: &[&str]) -> bool {
    if expected.is_empty() {
        return true;
    }
    let haystack = actual.to_lowercase();
    expected
        .iter()
        .any(|needle| haystack.contains(&needle.to_lowercase()))
}

/// Asserts the service reported success and returns the payload.
///
/// # Panics
///
/// Panics if the response is an error.
#[track_caller]
pub fn assert_api_success<S: Debug>(response: &ApiResponse<S>) -> &S {
    match response {
        ApiResponse::Ok(data) => data,
        ApiResponse::Error(err) => panic!(
            "expected status 'ok', got 'error' with message: {:?}",
            err.error
        ),
    }
}

/// Asserts the service reported an error containing one of `expected`.
///
/// Matching is case-insensitive containment, because the same failure is
/// phrased differently on different code paths.
///
/// # Panics
///
/// Panics if the response is a success or the message matches none of the
/// expected fragments.
#[track_caller]
pub fn assert_api_error<S: Debug>(response: &ApiResponse<S>, expected: &[&str]) {
    match response {
        ApiResponse::Ok(data) => {
            panic!("expected status 'error' containing {expected:?}, got 'ok': {data:?}")
        }
        ApiResponse::Error(err) => assert!(
            error_matches(&err.error, expected),
            "error message {:?} does not contain any of {expected:?}",
            err.error
        ),
    }
}

/// Asserts an undecoded body is exactly the access-denied error.
///
/// # Panics
///
/// Panics if `status` is not `"error"` or `error` is not exactly
/// `"Access denied"`.
#[track_caller]
pub fn assert_access_denied_raw(body: &Value) {
    assert_eq!(
        body.get("status").and_then(Value::as_str),
        Some("error"),
        "expected error status in {body}"
    );
    assert_eq!(
        body.get("error").and_then(Value::as_str),
        Some(ACCESS_DENIED),
        "expected exact access-denied message in {body}"
    );
}

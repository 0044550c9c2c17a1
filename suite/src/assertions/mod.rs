//! Assertions comparing API responses with database state.
//!
//! These helpers panic on mismatch with enough context (endpoint, table,
//! filter, expected and actual values) to debug a failure from the log
//! alone.

mod api;
mod database;

pub use api::{
    ACCESS_DENIED, assert_access_denied_raw, assert_api_error, assert_api_success, error_matches,
};
pub use database::{
    CountSnapshot, assert_count, assert_user_not_created, fetch_exact, fetch_single,
    fetch_single_user,
};

//! End-to-end harness for the blog service API.
//!
//! Scenarios drive the public HTTP API and then check the service database
//! to confirm what was, or was not, persisted. The crate supplies the pieces
//! they are built from:
//!
//! - [`config`] resolves the target environment, base URL and database.
//! - [`transport`] sends requests and logs every exchange.
//! - [`schema`] decodes the `status`-discriminated response envelope.
//! - [`api`] wraps each endpoint in one typed method.
//! - [`db`] and [`assertions`] verify persisted state.
//! - [`fixtures`] creates users, posts, comments and privileged tokens.
//! - [`live`] skips scenarios unless a live environment is enabled.
//!
//! The scenarios themselves live under `tests/`.

pub mod api;
pub mod assertions;
pub mod config;
pub mod db;
pub mod error;
pub mod fixtures;
pub mod live;
pub mod routes;
pub mod schema;
pub mod telemetry;
pub mod transport;

pub use error::HarnessError;

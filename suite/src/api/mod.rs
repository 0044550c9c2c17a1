//! One wrapper per resource, one method per endpoint.
//!
//! Each method makes exactly one HTTP call and decodes the body through
//! [`crate::schema`]. Write methods accept any `Serialize` body, so the same
//! call takes a typed payload from `test_data` or a raw
//! [`test_data::RawPayload`] with deliberately broken fields.

mod admin;
mod auth;
mod comments;
mod posts;
mod profile;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::HarnessError;
use crate::routes::{Endpoint, Method};
use crate::schema::{ApiResponse, decode};
use crate::transport::{HttpClient, Query, RawResponse, RequestSpec};

pub use admin::AdminApi;
pub use auth::AuthApi;
pub use comments::CommentsApi;
pub use posts::{PageQuery, PostsApi};
pub use profile::ProfileApi;

/// Typed response together with the raw exchange it came from.
#[derive(Debug, Clone)]
pub struct Exchange<S> {
    /// Decoded response.
    pub response: ApiResponse<S>,
    /// Raw status, URL and body.
    pub raw: RawResponse,
}

/// Calls `endpoint` with no `Authorization` header and no body.
///
/// Used to check that protected endpoints refuse anonymous callers. The
/// success shape is left as raw JSON because such calls are expected to fail.
///
/// # Errors
///
/// Returns [`HarnessError`] on transport failure or when the body matches
/// neither shape.
pub fn unauthenticated(
    client: &HttpClient,
    endpoint: Endpoint,
    param: Option<&str>,
    query: Query,
) -> Result<Exchange<Value>, HarnessError> {
    call(client, endpoint, param, query, None, None)
}

/// Serialises a request body.
fn to_body<B: Serialize + ?Sized>(body: &B) -> Result<Value, HarnessError> {
    Ok(serde_json::to_value(body)?)
}

/// Calls `endpoint` and decodes the body, keeping the raw exchange.
fn call<S: DeserializeOwned>(
    client: &HttpClient,
    endpoint: Endpoint,
    param: Option<&str>,
    query: Query,
    body: Option<Value>,
    token: Option<&str>,
) -> Result<Exchange<S>, HarnessError> {
    let base = RequestSpec::new(endpoint.method(), endpoint.path(param))
        .query(query)
        .bearer(token);
    let raw = client.send(match (endpoint.method(), body) {
        (Method::Post, Some(json)) => base.json(json),
        _ => base,
    })?;
    let response = decode(endpoint, &raw)?;
    Ok(Exchange { response, raw })
}

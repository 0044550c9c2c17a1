//! Blocking HTTP client with bearer injection and exchange logging.
//!
//! This adapter owns transport details only: URL assembly, header handling,
//! a fixed timeout and logging. It never interprets the body; decoding
//! belongs to [`crate::schema`]. Network failures surface as
//! [`HarnessError::Transport`] and are never retried.

use std::time::Duration;

use reqwest::blocking::{Client, Request};
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use reqwest::{StatusCode, Url};
use serde_json::Value;
use tracing::info;

use crate::error::HarnessError;
use crate::routes::Method;

/// Maximum number of characters of a body included in log lines.
pub const MAX_BODY_PREVIEW: usize = 2048;

const TRUNCATION_MARKER: &str = "...[truncated]";
const REDACTED_BEARER: &str = "Bearer ***";

/// Query string parameters, kept as strings so scenarios can send values of
/// the wrong type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query(Vec<(String, String)>);

impl Query {
    /// An empty query.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Appends a parameter.
    #[must_use]
    pub fn param(mut self, key: &str, value: impl ToString) -> Self {
        self.0.push((key.to_owned(), value.to_string()));
        self
    }

    /// Appends a parameter only when a value is present.
    #[must_use]
    pub fn maybe(self, key: &str, value: Option<impl ToString>) -> Self {
        match value {
            Some(present) => self.param(key, present),
            None => self,
        }
    }

    /// Parameter pairs in insertion order.
    #[must_use]
    pub fn pairs(&self) -> &[(String, String)] {
        &self.0
    }
}

/// One outgoing request.
#[derive(Debug, Clone)]
pub struct RequestSpec<'a> {
    method: Method,
    path: String,
    query: Query,
    body: Option<Value>,
    token: Option<&'a str>,
    headers: HeaderMap,
}

impl<'a> RequestSpec<'a> {
    /// Starts a request for `path` relative to the base URL.
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Query::new(),
            body: None,
            token: None,
            headers: HeaderMap::new(),
        }
    }

    /// Sets the query string.
    #[must_use]
    pub fn query(self, query: Query) -> Self {
        Self { query, ..self }
    }

    /// Sets the JSON body.
    #[must_use]
    pub fn json(self, body: Value) -> Self {
        Self {
            body: Some(body),
            ..self
        }
    }

    /// Sets the bearer token, if any.
    #[must_use]
    pub fn bearer(self, token: Option<&'a str>) -> Self {
        Self { token, ..self }
    }

    /// Adds an explicit header. An explicit `Authorization` header wins over
    /// the bearer token.
    #[must_use]
    pub fn header(mut self, name: reqwest::header::HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }
}

/// Status, final URL and body of a completed exchange.
#[derive(Debug, Clone)]
pub struct RawResponse {
    /// HTTP status code.
    pub status: StatusCode,
    /// URL actually requested, including the query string.
    pub url: Url,
    /// Undecoded body text.
    pub body: String,
}

/// HTTP client bound to one service base URL.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: Url,
}

impl HttpClient {
    /// Build a client with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::Transport`] when the reqwest client cannot be
    /// constructed.
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, HarnessError> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .build()
            .map_err(|source| HarnessError::Transport {
                method: "BUILD".to_owned(),
                url: base_url.to_string(),
                source,
            })?;
        Ok(Self { client, base_url })
    }

    /// Base URL every path is appended to.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Sends a `GET` request.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::Transport`] on network failure.
    pub fn get(
        &self,
        path: &str,
        query: Query,
        token: Option<&str>,
    ) -> Result<RawResponse, HarnessError> {
        self.send(RequestSpec::new(Method::Get, path).query(query).bearer(token))
    }

    /// Sends a `POST` request with an optional JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::Transport`] on network failure.
    pub fn post(
        &self,
        path: &str,
        query: Query,
        body: Option<Value>,
        token: Option<&str>,
    ) -> Result<RawResponse, HarnessError> {
        let spec = RequestSpec::new(Method::Post, path).query(query).bearer(token);
        self.send(match body {
            Some(json) => spec.json(json),
            None => spec,
        })
    }

    /// Logs and dispatches a request, then logs the response.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::Transport`] on network failure or when the body
    /// cannot be read.
    pub fn send(&self, spec: RequestSpec<'_>) -> Result<RawResponse, HarnessError> {
        let method = spec.method;
        let request = self.prepare(spec)?;
        let url = request.url().clone();

        info!(
            method = method.as_str(),
            url = %url,
            headers = ?sanitize_headers(request.headers()),
            body = %request_body_preview(&request),
            "HTTP request"
        );

        let transport_error = |source| HarnessError::Transport {
            method: method.as_str().to_owned(),
            url: url.to_string(),
            source,
        };
        let response = self.client.execute(request).map_err(transport_error)?;
        let status = response.status();
        let final_url = response.url().clone();
        let body = response.text().map_err(transport_error)?;

        info!(
            status = status.as_u16(),
            url = %final_url,
            body = %preview(&body),
            "HTTP response"
        );

        Ok(RawResponse {
            status,
            url: final_url,
            body,
        })
    }

    /// Builds the reqwest request without sending it.
    fn prepare(&self, spec: RequestSpec<'_>) -> Result<Request, HarnessError> {
        let url = self.url_for(&spec.path);
        let mut headers = spec.headers;
        if let Some(token) = spec.token.filter(|_| !headers.contains_key(AUTHORIZATION)) {
            let value = HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|err| HarnessError::Payload(format!("invalid bearer token: {err}")))?;
            headers.insert(AUTHORIZATION, value);
        }

        let method = match spec.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
        };
        let mut builder = self
            .client
            .request(method, url.as_str())
            .headers(headers)
            .query(spec.query.pairs());
        if let Some(body) = &spec.body {
            builder = builder.json(body);
        }
        builder.build().map_err(|source| HarnessError::Transport {
            method: spec.method.as_str().to_owned(),
            url,
            source,
        })
    }

    fn url_for(&self, path: &str) -> String {
        format!("{}{path}", self.base_url.as_str().trim_end_matches('/'))
    }
}

/// Returns a copy of `headers` with bearer tokens redacted.
#[must_use]
pub fn sanitize_headers(headers: &HeaderMap) -> Vec<(String, String)> {
    headers
        .iter()
        .map(|(name, value)| {
            let rendered = if name == AUTHORIZATION {
                REDACTED_BEARER.to_owned()
            } else {
                value.to_str().unwrap_or("<binary>").to_owned()
            };
            (name.as_str().to_owned(), rendered)
        })
        .collect()
}

/// Caps `body` at [`MAX_BODY_PREVIEW`] characters, marking truncation.
#[must_use]
pub fn preview(body: &str) -> String {
    if body.chars().count() <= MAX_BODY_PREVIEW {
        return body.to_owned();
    }
    let mut capped: String = body.chars().take(MAX_BODY_PREVIEW).collect();
    capped.push_str(TRUNCATION_MARKER);
    capped
}

fn request_body_preview(request: &Request) -> String {
    request
        .body()
        .and_then(reqwest::blocking::Body::as_bytes)
        .map(|bytes| preview(&String::from_utf8_lossy(bytes)))
        .unwrap_or_default()
}

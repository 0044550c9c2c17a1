//! Typed response shapes and the status-discriminated decoder.
//!
//! Every endpoint answers with the same envelope:
//! `{"status": "ok"|"error", "responseData"?, "error"?, "message"?}`.
//! [`parse_response`] reads `status` first and then validates the body
//! against either the endpoint's success shape or the shared
//! [`ErrorResponse`]. A body matching neither is a
//! [`HarnessError::SchemaViolation`], never a silent pass.

mod admin;
mod auth;
mod comments;
mod posts;
mod profile;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::HarnessError;
use crate::routes::Endpoint;
use crate::transport::{RawResponse, preview};

pub use admin::{BanData, UnbanData};
pub use auth::LoginData;
pub use comments::{Comment, CommentWalk, LocatedComment, MAX_COMMENT_DEPTH, find_comment};
pub use posts::{PostData, PostDetail, PostsPage};
pub use profile::UserProfile;

/// Status discriminator of the envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// `"ok"`
    Ok,
    /// `"error"`
    Error,
}

/// Shared error shape.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable failure description.
    pub error: String,
}

/// Success payload wrapped in `responseData`, with an optional message.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope<T> {
    /// Endpoint-specific data.
    pub response_data: T,
    /// Optional human-readable message.
    #[serde(default)]
    pub message: Option<String>,
}

/// Success payload whose `message` is mandatory.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Announced<T> {
    /// Endpoint-specific data.
    pub response_data: T,
    /// Confirmation such as `"User banned"`.
    pub message: String,
}

/// Success shape of endpoints that only acknowledge the write.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Acknowledged {
    /// Optional human-readable message.
    #[serde(default)]
    pub message: Option<String>,
}

/// Decoded response: exactly one of success or domain error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiResponse<S> {
    /// `status == "ok"` and the body matched the success shape.
    Ok(S),
    /// `status == "error"` and the body matched the error shape.
    Error(ErrorResponse),
}

impl<S> ApiResponse<S> {
    /// Discriminator of this response.
    #[must_use]
    pub const fn status(&self) -> Status {
        match self {
            Self::Ok(_) => Status::Ok,
            Self::Error(_) => Status::Error,
        }
    }

    /// Whether the service reported success.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        matches!(self, Self::Ok(_))
    }

    /// Success payload, if any.
    #[must_use]
    pub const fn ok(&self) -> Option<&S> {
        match self {
            Self::Ok(data) => Some(data),
            Self::Error(_) => None,
        }
    }

    /// Error payload, if any.
    #[must_use]
    pub const fn error(&self) -> Option<&ErrorResponse> {
        match self {
            Self::Ok(_) => None,
            Self::Error(err) => Some(err),
        }
    }

    /// Converts a domain error into [`HarnessError::UnexpectedApiError`].
    ///
    /// Fixtures use this when they need the call to succeed.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::UnexpectedApiError`] for error responses.
    pub fn into_success(self, endpoint: Endpoint) -> Result<S, HarnessError> {
        match self {
            Self::Ok(data) => Ok(data),
            Self::Error(err) => Err(HarnessError::UnexpectedApiError {
                endpoint,
                message: err.error,
            }),
        }
    }
}

/// Response of `POST /auth/register`; `responseData` is a greeting naming the
/// user.
pub type RegisterResponse = ApiResponse<Envelope<String>>;
/// Response of `POST /auth/login`.
pub type LoginResponse = ApiResponse<Envelope<LoginData>>;
/// Response of `POST /profile/info`.
pub type ProfileResponse = ApiResponse<Envelope<UserProfile>>;
/// Response of `POST /posts/publish`.
pub type PublishPostResponse = ApiResponse<Envelope<PostData>>;
/// Response of `POST /posts/{id}/vote`.
pub type VotePostResponse = ApiResponse<Acknowledged>;
/// Response of `POST /posts/{id}/addComment`.
pub type AddCommentResponse = ApiResponse<Acknowledged>;
/// Response of `GET /posts`.
pub type PostsPageResponse = ApiResponse<Envelope<PostsPage>>;
/// Response of `GET /posts/{id}`.
pub type PostDetailResponse = ApiResponse<Envelope<PostDetail>>;
/// Response of `POST /comments/{id}/reply`.
pub type ReplyCommentResponse = ApiResponse<Envelope<Comment>>;
/// Response of both admin user lookups.
pub type AdminUserResponse = ApiResponse<Envelope<UserProfile>>;
/// Response of the admin ban endpoint.
pub type BanResponse = ApiResponse<Announced<BanData>>;
/// Response of the admin unban endpoint.
pub type UnbanResponse = ApiResponse<Announced<UnbanData>>;

/// Decodes a raw exchange for `endpoint`.
///
/// # Errors
///
/// Returns [`HarnessError::InvalidJson`] if the body is not JSON and
/// [`HarnessError::SchemaViolation`] if it matches neither shape.
pub fn decode<S: DeserializeOwned>(
    endpoint: Endpoint,
    raw: &RawResponse,
) -> Result<ApiResponse<S>, HarnessError> {
    parse_response(endpoint, &raw.body)
}

/// Parses body text and validates it against the endpoint's shapes.
///
/// # Errors
///
/// Returns [`HarnessError::InvalidJson`] if the body is not JSON and
/// [`HarnessError::SchemaViolation`] if it matches neither shape.
pub fn parse_response<S: DeserializeOwned>(
    endpoint: Endpoint,
    body: &str,
) -> Result<ApiResponse<S>, HarnessError> {
    let value: Value = serde_json::from_str(body).map_err(|err| HarnessError::InvalidJson {
        endpoint,
        message: err.to_string(),
        body: preview(body),
    })?;
    parse_value(endpoint, value)
}

/// Validates an already decoded body against the endpoint's shapes.
///
/// # Errors
///
/// Returns [`HarnessError::SchemaViolation`] if the body matches neither
/// shape.
pub fn parse_value<S: DeserializeOwned>(
    endpoint: Endpoint,
    value: Value,
) -> Result<ApiResponse<S>, HarnessError> {
    let violation = |message: String, offending: &Value| HarnessError::SchemaViolation {
        endpoint,
        message,
        body: preview(&offending.to_string()),
    };

    match value.get("status").and_then(Value::as_str) {
        Some("ok") => serde_json::from_value::<S>(value.clone())
            .map(ApiResponse::Ok)
            .map_err(|err| violation(format!("success shape: {err}"), &value)),
        Some("error") => serde_json::from_value::<ErrorResponse>(value.clone())
            .map(ApiResponse::Error)
            .map_err(|err| violation(format!("error shape: {err}"), &value)),
        Some(other) => Err(violation(format!("unknown status '{other}'"), &value)),
        None => Err(violation("missing status discriminator".to_owned(), &value)),
    }
}

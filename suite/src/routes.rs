//! Endpoint catalogue and path builders.
//!
//! Every path is relative to the service base URL and lives under
//! [`API_PREFIX`]. Path parameters are inserted verbatim so scenarios can
//! send malformed identifiers.

use std::fmt;

/// Common version prefix for every endpoint.
pub const API_PREFIX: &str = "/api/v1";

/// HTTP verb used by an endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// `GET`
    Get,
    /// `POST`
    Post,
}

impl Method {
    /// Upper-case verb name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Every endpoint the suite exercises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// Account creation.
    Register,
    /// Token issue.
    Login,
    /// Own profile.
    Profile,
    /// Post creation.
    PublishPost,
    /// Post vote.
    VotePost,
    /// Top-level comment on a post.
    AddComment,
    /// Paginated post listing.
    ListPosts,
    /// Post detail with paginated comments.
    PostDetail,
    /// Reply to an existing comment.
    ReplyComment,
    /// Admin lookup by numeric id.
    AdminUserById,
    /// Admin lookup by email.
    AdminUserByEmail,
    /// Admin ban by email.
    BanUser,
    /// Admin unban by email.
    UnbanUser,
}

impl Endpoint {
    /// HTTP verb.
    #[must_use]
    pub const fn method(self) -> Method {
        match self {
            Self::ListPosts | Self::PostDetail | Self::AdminUserByEmail => Method::Get,
            _ => Method::Post,
        }
    }

    /// Path template relative to [`API_PREFIX`].
    #[must_use]
    pub const fn template(self) -> &'static str {
        match self {
            Self::Register => "/auth/register",
            Self::Login => "/auth/login",
            Self::Profile => "/profile/info",
            Self::PublishPost => "/posts/publish",
            Self::VotePost => "/posts/{id}/vote",
            Self::AddComment => "/posts/{id}/addComment",
            Self::ListPosts => "/posts",
            Self::PostDetail => "/posts/{id}",
            Self::ReplyComment => "/comments/{id}/reply",
            Self::AdminUserById => "/admin/user/{id}",
            Self::AdminUserByEmail => "/admin/user/{email}",
            Self::BanUser => "/admin/management/ban/byEmail/{email}",
            Self::UnbanUser => "/admin/management/unban/byEmail/{email}",
        }
    }

    /// Whether the endpoint requires a bearer token.
    #[must_use]
    pub const fn requires_auth(self) -> bool {
        !matches!(self, Self::Register | Self::Login)
    }

    /// Builds the full path, substituting the single path parameter if the
    /// template has one.
    #[must_use]
    pub fn path(self, param: Option<&str>) -> String {
        let template = self.template();
        let relative = match (param, template.find('{'), template.find('}')) {
            (Some(value), Some(start), Some(end)) if start < end => {
                let head = template.get(..start).unwrap_or_default();
                let tail = template.get(end + 1..).unwrap_or_default();
                format!("{head}{value}{tail}")
            }
            _ => template.to_owned(),
        };
        format!("{API_PREFIX}{relative}")
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method(), self.template())
    }
}

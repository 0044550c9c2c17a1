//! Typed rows for verification queries.
//!
//! Identifier columns are cast to text and numeric ids to `bigint` in the
//! SQL so the Rust types stay fixed whatever the service's column types are.

use chrono::{DateTime, Utc};
use postgres::Row;

use crate::error::HarnessError;

/// Decodes one result row.
pub trait FromRow: Sized {
    /// Builds the value from a row.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::Database`] when a column is missing or has an
    /// unexpected type.
    fn from_row(row: &Row) -> Result<Self, HarnessError>;
}

/// Verification queries, one per row type.
pub mod queries {
    /// Selects a [`super::DbUser`] by email (`$1`).
    pub const USER_BY_EMAIL: &str = "SELECT id::bigint AS id, email, username, password, \
         role::text AS role, banned_until::timestamptz AS banned_until \
         FROM users WHERE email = $1";

    /// Selects a [`super::DbUser`] by username (`$1`).
    pub const USER_BY_USERNAME: &str = "SELECT id::bigint AS id, email, username, password, \
         role::text AS role, banned_until::timestamptz AS banned_until \
         FROM users WHERE username = $1";

    /// Selects a [`super::DbUser`] by numeric id (`$1`, bigint).
    pub const USER_BY_ID: &str = "SELECT id::bigint AS id, email, username, password, \
         role::text AS role, banned_until::timestamptz AS banned_until \
         FROM users WHERE id::bigint = $1";

    /// Selects user ids whose email equals `$1` ignoring case.
    pub const USER_IDS_BY_EMAIL_IGNORING_CASE: &str =
        "SELECT id::bigint FROM users WHERE lower(email) = lower($1)";

    /// Selects a [`super::DbPost`] by id (`$1`, text).
    pub const POST_BY_ID: &str = "SELECT id::text AS id, title, content, \
         author_id::bigint AS author_id FROM posts WHERE id::text = $1";

    /// Selects a [`super::DbComment`] by id (`$1`, text).
    pub const COMMENT_BY_ID: &str = "SELECT id::text AS id, text, \
         parent_id::text AS parent_id, post_id::text AS post_id \
         FROM comments WHERE id::text = $1";

    /// Selects the newest [`super::DbComment`] on post `$1` with text `$2`.
    pub const LATEST_COMMENT_WITH_TEXT: &str = "SELECT id::text AS id, text, \
         parent_id::text AS parent_id, post_id::text AS post_id \
         FROM comments WHERE post_id::text = $1 AND text = $2 \
         ORDER BY created_at DESC LIMIT 1";

    /// Selects top-level [`super::DbComment`]s of a post, newest first, with
    /// `LIMIT $2 OFFSET $3`.
    pub const TOP_LEVEL_COMMENTS_PAGE: &str = "SELECT id::text AS id, text, \
         parent_id::text AS parent_id, post_id::text AS post_id \
         FROM comments WHERE post_id::text = $1 AND parent_id IS NULL \
         ORDER BY created_at DESC LIMIT $2 OFFSET $3";

    /// Counts top-level comments of a post (`$1`, text).
    pub const TOP_LEVEL_COMMENT_COUNT: &str = "SELECT COUNT(*)::bigint FROM comments \
         WHERE post_id::text = $1 AND parent_id IS NULL";

    /// Selects the ids of posts listed in `$1` (`text[]`).
    pub const POST_IDS_IN: &str = "SELECT id::text FROM posts WHERE id::text = ANY($1)";

    /// Selects every vote value on a post (`$1`, text).
    pub const VOTE_VALUES: &str = "SELECT value::bigint FROM votes WHERE post_id::text = $1";

    /// Sums vote values of a post (`$1`, text).
    pub const VOTE_SCORE: &str = "SELECT COALESCE(SUM(value), 0)::bigint FROM votes \
         WHERE post_id::text = $1";

    /// Promotes a user to admin by email (`$1`).
    pub const PROMOTE_TO_ADMIN: &str = "UPDATE users SET role = 'ADMIN' WHERE email = $1";

    /// Deletes a user by email (`$1`).
    pub const DELETE_USER_BY_EMAIL: &str = "DELETE FROM users WHERE email = $1";

    /// Deletes a user by username (`$1`).
    pub const DELETE_USER_BY_USERNAME: &str = "DELETE FROM users WHERE username = $1";
}

/// Row of `users`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbUser {
    /// Numeric id.
    pub id: i64,
    /// Stored email.
    pub email: String,
    /// Stored username.
    pub username: String,
    /// Password hash.
    pub password: String,
    /// Role name, e.g. `USER` or `ADMIN`.
    pub role: String,
    /// End of the current ban.
    pub banned_until: Option<DateTime<Utc>>,
}

impl FromRow for DbUser {
    fn from_row(row: &Row) -> Result<Self, HarnessError> {
        Ok(Self {
            id: row.try_get("id")?,
            email: row.try_get("email")?,
            username: row.try_get("username")?,
            password: row.try_get("password")?,
            role: row.try_get("role")?,
            banned_until: row.try_get("banned_until")?,
        })
    }
}

/// Row of `posts`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbPost {
    /// Post id as text.
    pub id: String,
    /// Title.
    pub title: String,
    /// Body text.
    pub content: String,
    /// Author user id.
    pub author_id: Option<i64>,
}

impl FromRow for DbPost {
    fn from_row(row: &Row) -> Result<Self, HarnessError> {
        Ok(Self {
            id: row.try_get("id")?,
            title: row.try_get("title")?,
            content: row.try_get("content")?,
            author_id: row.try_get("author_id")?,
        })
    }
}

/// Row of `comments`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbComment {
    /// Comment id as text.
    pub id: String,
    /// Comment text.
    pub text: String,
    /// Parent comment id, `None` for top-level comments.
    pub parent_id: Option<String>,
    /// Owning post id.
    pub post_id: String,
}

impl FromRow for DbComment {
    fn from_row(row: &Row) -> Result<Self, HarnessError> {
        Ok(Self {
            id: row.try_get("id")?,
            text: row.try_get("text")?,
            parent_id: row.try_get("parent_id")?,
            post_id: row.try_get("post_id")?,
        })
    }
}

impl FromRow for i64 {
    fn from_row(row: &Row) -> Result<Self, HarnessError> {
        Ok(row.try_get(0)?)
    }
}

impl FromRow for String {
    fn from_row(row: &Row) -> Result<Self, HarnessError> {
        Ok(row.try_get(0)?)
    }
}

//! Row counts over an allowlisted set of tables and filter columns.
//!
//! Table and column names are compile-time constants; only the filter value
//! is bound as a parameter.

use std::fmt;

/// Tables the suite verifies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Table {
    /// `users`
    Users,
    /// `posts`
    Posts,
    /// `comments`
    Comments,
    /// `votes`
    Votes,
}

impl Table {
    /// SQL table name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Users => "users",
            Self::Posts => "posts",
            Self::Comments => "comments",
            Self::Votes => "votes",
        }
    }

    /// Counts every row.
    #[must_use]
    pub const fn all(self) -> CountQuery {
        CountQuery {
            table: self,
            filter: None,
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// `SELECT COUNT(*)` over one table with at most one equality filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountQuery {
    table: Table,
    filter: Option<(&'static str, String)>,
}

impl CountQuery {
    /// Users with the given email.
    #[must_use]
    pub fn users_with_email(email: &str) -> Self {
        Self::filtered(Table::Users, "email", email)
    }

    /// Users with the given username.
    #[must_use]
    pub fn users_with_username(username: &str) -> Self {
        Self::filtered(Table::Users, "username", username)
    }

    /// Posts with the given title.
    #[must_use]
    pub fn posts_with_title(title: &str) -> Self {
        Self::filtered(Table::Posts, "title", title)
    }

    /// Posts written by the given user id.
    #[must_use]
    pub fn posts_by_author(author_id: i64) -> Self {
        Self::filtered(Table::Posts, "author_id", &author_id.to_string())
    }

    /// Comments on a post, at any depth.
    #[must_use]
    pub fn comments_on_post(post_id: &str) -> Self {
        Self::filtered(Table::Comments, "post_id", post_id)
    }

    /// Direct replies to a comment.
    #[must_use]
    pub fn replies_to(parent_id: &str) -> Self {
        Self::filtered(Table::Comments, "parent_id", parent_id)
    }

    /// Votes on a post.
    #[must_use]
    pub fn votes_on_post(post_id: &str) -> Self {
        Self::filtered(Table::Votes, "post_id", post_id)
    }

    fn filtered(table: Table, column: &'static str, value: &str) -> Self {
        Self {
            table,
            filter: Some((column, value.to_owned())),
        }
    }

    /// Counted table.
    #[must_use]
    pub const fn table(&self) -> Table {
        self.table
    }

    /// Bound filter value, if any.
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        self.filter.as_ref().map(|(_, value)| value.as_str())
    }

    /// SQL text; the filter column is compared as text against `$1`.
    #[must_use]
    pub fn sql(&self) -> String {
        match &self.filter {
            Some((column, _)) => format!(
                "SELECT COUNT(*)::bigint FROM {} WHERE {column}::text = $1",
                self.table.name()
            ),
            None => format!("SELECT COUNT(*)::bigint FROM {}", self.table.name()),
        }
    }
}

impl fmt::Display for CountQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.filter {
            Some((column, value)) => write!(f, "{} where {column} = '{value}'", self.table),
            None => write!(f, "{}", self.table),
        }
    }
}

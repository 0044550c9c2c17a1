//! Sort orders shared by the API `sort` parameter and verification SQL.
//!
//! Each key maps to a fixed column, so ordered queries never interpolate
//! caller-provided text.

use std::fmt;

/// Field a listing can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    /// `id`
    Id,
    /// `createdAt` / `created_at`
    CreatedAt,
}

impl SortKey {
    /// Field name in the API `sort` parameter.
    #[must_use]
    pub const fn api_field(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::CreatedAt => "createdAt",
        }
    }

    /// Column name in SQL.
    #[must_use]
    pub const fn column(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::CreatedAt => "created_at",
        }
    }
}

/// Direction of a sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Ascending.
    Asc,
    /// Descending.
    Desc,
}

impl Direction {
    const fn api(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    const fn sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// A key and direction, e.g. `createdAt,desc`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sort {
    /// Sorted field.
    pub key: SortKey,
    /// Sort direction.
    pub direction: Direction,
}

impl Sort {
    /// Builds a sort.
    #[must_use]
    pub const fn new(key: SortKey, direction: Direction) -> Self {
        Self { key, direction }
    }

    /// Ids of the posts in `$1` (`text[]`), in this order.
    #[must_use]
    pub fn post_ids_sql(self) -> String {
        format!(
            "SELECT id::text FROM posts WHERE id::text = ANY($1) ORDER BY {} {}",
            self.key.column(),
            self.direction.sql()
        )
    }

    /// Ids of the comments in `$1` (`text[]`) on post `$2`, in this order.
    #[must_use]
    pub fn comment_ids_sql(self) -> String {
        format!(
            "SELECT id::text FROM comments WHERE id::text = ANY($1) AND post_id::text = $2 \
             ORDER BY {} {}",
            self.key.column(),
            self.direction.sql()
        )
    }
}

impl fmt::Display for Sort {
    /// Renders the API form, `field,direction`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.key.api_field(), self.direction.api())
    }
}

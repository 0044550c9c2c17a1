//! Database-level assertions.
//!
//! Query failures are assertion failures here: a scenario cannot be judged
//! if its verification query does not run.

use std::fmt::Debug;

use crate::db::{CountQuery, DbUser, FromRow, Params, SqlClient, queries};

/// Runs `query` and asserts it returns exactly `expected` rows.
///
/// # Panics
///
/// Panics if the query fails or the row count differs.
#[track_caller]
pub fn fetch_exact<T: FromRow + Debug>(
    sql: &SqlClient,
    query: &str,
    params: &Params<'_>,
    expected: usize,
    context: &str,
) -> Vec<T> {
    let rows: Vec<T> = sql
        .query_as(query, params)
        .unwrap_or_else(|err| panic!("{context}: query failed: {err}\nSQL: {query}"));
    assert_eq!(
        rows.len(),
        expected,
        "{context}: expected {expected} row(s), found {}\nSQL: {query}\nrows: {rows:?}",
        rows.len()
    );
    rows
}

/// Runs `query` and returns its only row.
///
/// # Panics
///
/// Panics if the query fails or does not return exactly one row.
#[track_caller]
pub fn fetch_single<T: FromRow + Debug>(
    sql: &SqlClient,
    query: &str,
    params: &Params<'_>,
    context: &str,
) -> T {
    fetch_exact(sql, query, params, 1, context)
        .into_iter()
        .next()
        .unwrap_or_else(|| panic!("{context}: row vanished after count check"))
}

/// Returns the single `users` row for `email`.
///
/// # Panics
///
/// Panics if the query fails or does not return exactly one row.
#[track_caller]
pub fn fetch_single_user(sql: &SqlClient, email: &str, context: Option<&str>) -> DbUser {
    let label = context.map_or_else(|| format!("user with email '{email}'"), str::to_owned);
    fetch_single(sql, queries::USER_BY_EMAIL, &[&email], &label)
}

/// Asserts `query` counts exactly `expected` rows.
///
/// # Panics
///
/// Panics if the count query fails or the count differs.
#[track_caller]
pub fn assert_count(sql: &SqlClient, query: &CountQuery, expected: i64) {
    let actual = count_or_panic(sql, query);
    assert_eq!(
        actual, expected,
        "expected {expected} row(s) in {query}, found {actual}"
    );
}

/// Asserts no `users` row exists for the given email and/or username.
///
/// # Panics
///
/// Panics if a matching row exists or a count query fails.
#[track_caller]
pub fn assert_user_not_created(
    sql: &SqlClient,
    email: Option<&str>,
    username: Option<&str>,
    message: &str,
) {
    let filters = email
        .map(CountQuery::users_with_email)
        .into_iter()
        .chain(username.map(CountQuery::users_with_username));
    for query in filters {
        let actual = count_or_panic(sql, &query);
        assert_eq!(actual, 0, "{message}: found {actual} row(s) in {query}");
    }
}

/// A row count captured before an action, for side-effect-free checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountSnapshot {
    query: CountQuery,
    before: i64,
}

impl CountSnapshot {
    /// Captures the current count.
    ///
    /// # Panics
    ///
    /// Panics if the count query fails.
    #[track_caller]
    #[must_use]
    pub fn take(sql: &SqlClient, query: CountQuery) -> Self {
        let before = count_or_panic(sql, &query);
        Self { query, before }
    }

    /// Count at capture time.
    #[must_use]
    pub const fn before(&self) -> i64 {
        self.before
    }

    /// Asserts the count changed by exactly `delta`.
    ///
    /// # Panics
    ///
    /// Panics if the count query fails or the change differs.
    #[track_caller]
    pub fn assert_delta(&self, sql: &SqlClient, delta: i64, message: &str) {
        let after = count_or_panic(sql, &self.query);
        assert_eq!(
            after - self.before,
            delta,
            "{message}: {} went from {} to {after}, expected change of {delta}",
            self.query,
            self.before
        );
    }

    /// Asserts the count is unchanged.
    ///
    /// # Panics
    ///
    /// Panics if the count query fails or the count changed.
    #[track_caller]
    pub fn assert_unchanged(&self, sql: &SqlClient, message: &str) {
        self.assert_delta(sql, 0, message);
    }
}

#[track_caller]
fn count_or_panic(sql: &SqlClient, query: &CountQuery) -> i64 {
    sql.count(query)
        .unwrap_or_else(|err| panic!("count on {query} failed: {err}"))
}

//! Read-mostly access to the service database for verification.
//!
//! The suite only writes in two places: promoting a user to admin and
//! deleting rows a fixture inserted itself. Everything else is `SELECT`.
//! Queries are logged with their row counts.

mod count;
mod rows;
mod sort;

use std::sync::{Mutex, MutexGuard, PoisonError};

use postgres::types::ToSql;
use postgres::{Client, NoTls, Row};
use tracing::debug;

use crate::config::DatabaseConfig;
use crate::error::HarnessError;

pub use count::{CountQuery, Table};
pub use rows::{DbComment, DbPost, DbUser, FromRow, queries};
pub use sort::{Direction, Sort, SortKey};

/// Positional query parameters.
pub type Params<'a> = [&'a (dyn ToSql + Sync)];

/// Synchronous postgres client shared by all scenarios in a binary.
pub struct SqlClient {
    client: Mutex<Client>,
}

impl SqlClient {
    /// Opens a connection.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::Database`] when the connection fails.
    pub fn connect(config: &DatabaseConfig) -> Result<Self, HarnessError> {
        let client = postgres::Config::new()
            .host(&config.host)
            .port(config.port)
            .dbname(&config.name)
            .user(&config.user)
            .password(&config.password)
            .connect(NoTls)?;
        debug!(host = %config.host, port = config.port, db = %config.name, "database connected");
        Ok(Self {
            client: Mutex::new(client),
        })
    }

    /// Runs a query and returns raw rows.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::Database`] when the query fails.
    pub fn query(&self, sql: &str, params: &Params<'_>) -> Result<Vec<Row>, HarnessError> {
        let rows = self.lock().query(sql, params)?;
        debug!(sql, params = params.len(), rows = rows.len(), "SQL query");
        Ok(rows)
    }

    /// Runs a query and decodes each row.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::Database`] when the query fails or a row does
    /// not match `T`.
    pub fn query_as<T: FromRow>(
        &self,
        sql: &str,
        params: &Params<'_>,
    ) -> Result<Vec<T>, HarnessError> {
        self.query(sql, params)?.iter().map(T::from_row).collect()
    }

    /// Runs a statement and returns the number of affected rows.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::Database`] when the statement fails.
    pub fn execute(&self, sql: &str, params: &Params<'_>) -> Result<u64, HarnessError> {
        let affected = self.lock().execute(sql, params)?;
        debug!(sql, params = params.len(), affected, "SQL statement");
        Ok(affected)
    }

    /// Counts rows matching `query`.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::Database`] when the query fails.
    pub fn count(&self, query: &CountQuery) -> Result<i64, HarnessError> {
        let sql = query.sql();
        let rows = match query.value() {
            Some(value) => self.query(&sql, &[&value])?,
            None => self.query(&sql, &[])?,
        };
        let row = rows.first().ok_or_else(|| {
            HarnessError::Database(format!("count on {} returned no rows", query.table()))
        })?;
        Ok(row.try_get::<_, i64>(0)?)
    }

    fn lock(&self) -> MutexGuard<'_, Client> {
        self.client.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for SqlClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqlClient").finish_non_exhaustive()
    }
}

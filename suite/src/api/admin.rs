//! Admin lookups and ban management.

use super::call;
use crate::error::HarnessError;
use crate::routes::Endpoint;
use crate::schema::{AdminUserResponse, BanResponse, UnbanResponse};
use crate::transport::{HttpClient, Query};

/// Wrapper for `/admin`. Every call needs an admin token.
#[derive(Debug, Clone, Copy)]
pub struct AdminApi<'a> {
    client: &'a HttpClient,
}

impl<'a> AdminApi<'a> {
    /// Binds the wrapper to a client.
    #[must_use]
    pub const fn new(client: &'a HttpClient) -> Self {
        Self { client }
    }

    /// `POST /admin/user/{id}`. The id is sent verbatim so non-numeric values
    /// can be exercised.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError`] on transport failure or schema violation.
    pub fn user_by_id(
        &self,
        token: &str,
        user_id: impl ToString,
    ) -> Result<AdminUserResponse, HarnessError> {
        let id = user_id.to_string();
        call(
            self.client,
            Endpoint::AdminUserById,
            Some(&id),
            Query::new(),
            None,
            Some(token),
        )
        .map(|exchange| exchange.response)
    }

    /// `GET /admin/user/{email}`.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError`] on transport failure or schema violation.
    pub fn user_by_email(
        &self,
        token: &str,
        email: &str,
    ) -> Result<AdminUserResponse, HarnessError> {
        call(
            self.client,
            Endpoint::AdminUserByEmail,
            Some(email),
            Query::new(),
            None,
            Some(token),
        )
        .map(|exchange| exchange.response)
    }

    /// `POST /admin/management/ban/byEmail/{email}?forSeconds=N`.
    ///
    /// `seconds` is sent verbatim so negative or non-numeric durations can be
    /// exercised.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError`] on transport failure or schema violation.
    pub fn ban(
        &self,
        token: &str,
        email: &str,
        seconds: impl ToString,
    ) -> Result<BanResponse, HarnessError> {
        call(
            self.client,
            Endpoint::BanUser,
            Some(email),
            Query::new().param("forSeconds", seconds),
            None,
            Some(token),
        )
        .map(|exchange| exchange.response)
    }

    /// `POST /admin/management/unban/byEmail/{email}`.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError`] on transport failure or schema violation.
    pub fn unban(&self, token: &str, email: &str) -> Result<UnbanResponse, HarnessError> {
        call(
            self.client,
            Endpoint::UnbanUser,
            Some(email),
            Query::new(),
            None,
            Some(token),
        )
        .map(|exchange| exchange.response)
    }
}

//! Registration and login.

use serde::Serialize;
use test_data::LoginUser;
use tracing::warn;

use super::{call, to_body};
use crate::error::HarnessError;
use crate::routes::Endpoint;
use crate::schema::{LoginResponse, RegisterResponse};
use crate::transport::{HttpClient, Query};

/// Wrapper for `/auth`.
#[derive(Debug, Clone, Copy)]
pub struct AuthApi<'a> {
    client: &'a HttpClient,
}

impl<'a> AuthApi<'a> {
    /// Binds the wrapper to a client.
    #[must_use]
    pub const fn new(client: &'a HttpClient) -> Self {
        Self { client }
    }

    /// `POST /auth/register`.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError`] on transport failure or schema violation.
    pub fn register<B: Serialize + ?Sized>(
        &self,
        payload: &B,
    ) -> Result<RegisterResponse, HarnessError> {
        let body = to_body(payload)?;
        call(self.client, Endpoint::Register, None, Query::new(), Some(body), None)
            .map(|exchange| exchange.response)
    }

    /// `POST /auth/login`.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError`] on transport failure or schema violation.
    pub fn login<B: Serialize + ?Sized>(&self, payload: &B) -> Result<LoginResponse, HarnessError> {
        let body = to_body(payload)?;
        call(self.client, Endpoint::Login, None, Query::new(), Some(body), None)
            .map(|exchange| exchange.response)
    }

    /// Logs in and returns the bearer token, or `None` if the service
    /// rejected the credentials.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError`] on transport failure or schema violation.
    pub fn login_and_get_token(&self, login: &LoginUser) -> Result<Option<String>, HarnessError> {
        let response = self.login(login)?;
        match response.ok() {
            Some(envelope) => Ok(Some(envelope.response_data.jwt.clone())),
            None => {
                warn!(
                    email = login.email(),
                    error = response.error().map(|err| err.error.as_str()),
                    "login rejected"
                );
                Ok(None)
            }
        }
    }
}

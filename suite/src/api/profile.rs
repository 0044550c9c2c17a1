//! Own profile.

use super::call;
use crate::error::HarnessError;
use crate::routes::Endpoint;
use crate::schema::ProfileResponse;
use crate::transport::{HttpClient, Query};

/// Wrapper for `/profile`.
#[derive(Debug, Clone, Copy)]
pub struct ProfileApi<'a> {
    client: &'a HttpClient,
}

impl<'a> ProfileApi<'a> {
    /// Binds the wrapper to a client.
    #[must_use]
    pub const fn new(client: &'a HttpClient) -> Self {
        Self { client }
    }

    /// `POST /profile/info` for the token's owner.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError`] on transport failure or schema violation.
    pub fn get_profile(&self, token: &str) -> Result<ProfileResponse, HarnessError> {
        call(self.client, Endpoint::Profile, None, Query::new(), None, Some(token))
            .map(|exchange| exchange.response)
    }
}

//! Nested replies.

use serde::Serialize;

use super::{call, to_body};
use crate::error::HarnessError;
use crate::routes::Endpoint;
use crate::schema::ReplyCommentResponse;
use crate::transport::{HttpClient, Query};

/// Wrapper for `/comments`.
#[derive(Debug, Clone, Copy)]
pub struct CommentsApi<'a> {
    client: &'a HttpClient,
}

impl<'a> CommentsApi<'a> {
    /// Binds the wrapper to a client.
    #[must_use]
    pub const fn new(client: &'a HttpClient) -> Self {
        Self { client }
    }

    /// `POST /comments/{parent_id}/reply`.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError`] on transport failure or schema violation.
    pub fn reply<B: Serialize + ?Sized>(
        &self,
        token: &str,
        parent_id: &str,
        payload: &B,
    ) -> Result<ReplyCommentResponse, HarnessError> {
        let body = to_body(payload)?;
        call(
            self.client,
            Endpoint::ReplyComment,
            Some(parent_id),
            Query::new(),
            Some(body),
            Some(token),
        )
        .map(|exchange| exchange.response)
    }
}

//! Publishing, voting, commenting and reading posts.

use serde::Serialize;

use super::{Exchange, call, to_body};
use crate::error::HarnessError;
use crate::routes::Endpoint;
use crate::schema::{
    AddCommentResponse, Envelope, PostDetail, PostsPage, PublishPostResponse, VotePostResponse,
};
use crate::transport::{HttpClient, Query};

const DEFAULT_PAGE: u32 = 0;
const DEFAULT_PAGE_SIZE: u32 = 20;
const DEFAULT_SORT: &str = "createdAt,asc";

/// `page`, `size` and `sort` query parameters.
///
/// Values are strings so scenarios can send negative, zero or non-numeric
/// pagination. Absent values are omitted from the query string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageQuery {
    page: Option<String>,
    size: Option<String>,
    sort: Option<String>,
}

impl PageQuery {
    /// Listing defaults: first page, 20 items, oldest first.
    #[must_use]
    pub fn listing() -> Self {
        Self::new(DEFAULT_PAGE, DEFAULT_PAGE_SIZE).sort(DEFAULT_SORT)
    }

    /// Explicit page and size without a sort.
    #[must_use]
    pub fn new(page: impl ToString, size: impl ToString) -> Self {
        Self {
            page: Some(page.to_string()),
            size: Some(size.to_string()),
            sort: None,
        }
    }

    /// Replaces the page.
    #[must_use]
    pub fn page(self, page: impl ToString) -> Self {
        Self {
            page: Some(page.to_string()),
            ..self
        }
    }

    /// Replaces the page size.
    #[must_use]
    pub fn size(self, size: impl ToString) -> Self {
        Self {
            size: Some(size.to_string()),
            ..self
        }
    }

    /// Sets the sort expression, e.g. `"id,desc"`.
    #[must_use]
    pub fn sort(self, sort: impl Into<String>) -> Self {
        Self {
            sort: Some(sort.into()),
            ..self
        }
    }

    /// Drops the sort parameter entirely.
    #[must_use]
    pub fn without_sort(self) -> Self {
        Self { sort: None, ..self }
    }

    fn to_query(&self) -> Query {
        Query::new()
            .maybe("page", self.page.as_deref())
            .maybe("size", self.size.as_deref())
            .maybe("sort", self.sort.as_deref())
    }
}

/// Wrapper for `/posts`.
#[derive(Debug, Clone, Copy)]
pub struct PostsApi<'a> {
    client: &'a HttpClient,
}

impl<'a> PostsApi<'a> {
    /// Binds the wrapper to a client.
    #[must_use]
    pub const fn new(client: &'a HttpClient) -> Self {
        Self { client }
    }

    /// `POST /posts/publish`.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError`] on transport failure or schema violation.
    pub fn publish<B: Serialize + ?Sized>(
        &self,
        token: &str,
        payload: &B,
    ) -> Result<PublishPostResponse, HarnessError> {
        let body = to_body(payload)?;
        call(
            self.client,
            Endpoint::PublishPost,
            None,
            Query::new(),
            Some(body),
            Some(token),
        )
        .map(|exchange| exchange.response)
    }

    /// `POST /posts/{id}/vote?value=N`.
    ///
    /// `value` is sent verbatim; the service accepts only `1` and `-1`.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError`] on transport failure or schema violation.
    pub fn vote(
        &self,
        token: &str,
        post_id: &str,
        value: impl ToString,
    ) -> Result<VotePostResponse, HarnessError> {
        call(
            self.client,
            Endpoint::VotePost,
            Some(post_id),
            Query::new().param("value", value),
            None,
            Some(token),
        )
        .map(|exchange| exchange.response)
    }

    /// `POST /posts/{id}/addComment`.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError`] on transport failure or schema violation.
    pub fn add_comment<B: Serialize + ?Sized>(
        &self,
        token: &str,
        post_id: &str,
        payload: &B,
    ) -> Result<AddCommentResponse, HarnessError> {
        let body = to_body(payload)?;
        call(
            self.client,
            Endpoint::AddComment,
            Some(post_id),
            Query::new(),
            Some(body),
            Some(token),
        )
        .map(|exchange| exchange.response)
    }

    /// `GET /posts` with pagination and sort.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError`] on transport failure or schema violation.
    pub fn list(
        &self,
        token: &str,
        query: &PageQuery,
    ) -> Result<Exchange<Envelope<PostsPage>>, HarnessError> {
        call(
            self.client,
            Endpoint::ListPosts,
            None,
            query.to_query(),
            None,
            Some(token),
        )
    }

    /// `GET /posts/{id}` with comment pagination.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError`] on transport failure or schema violation.
    pub fn detail(
        &self,
        token: &str,
        post_id: &str,
        comments: &PageQuery,
    ) -> Result<Exchange<Envelope<PostDetail>>, HarnessError> {
        call(
            self.client,
            Endpoint::PostDetail,
            Some(post_id),
            comments.to_query(),
            None,
            Some(token),
        )
    }
}

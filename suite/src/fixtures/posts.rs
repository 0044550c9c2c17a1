//! Post and comment fixtures.

use test_data::{AddComment, PublishPost};
use uuid::Uuid;

use super::session::Session;
use crate::api::PageQuery;
use crate::error::HarnessError;
use crate::routes::Endpoint;

/// Comments created by [`Session::create_post_with_comments`] when a scenario
/// does not need a specific number.
pub const DEFAULT_COMMENTS_TO_CREATE: usize = 5;

/// A published post and the token of its author.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostHandle {
    /// Post id as returned by the service.
    pub post_id: String,
    /// Author token.
    pub token: String,
}

/// A post with one top-level comment, both by the same user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentHandle {
    /// Post id.
    pub post_id: String,
    /// Author token.
    pub token: String,
    /// Id of the comment.
    pub comment_id: String,
}

/// An id that no post has: a fresh random UUID.
#[must_use]
pub fn unknown_post_id() -> String {
    Uuid::new_v4().to_string()
}

impl Session {
    /// Publishes a random post as the owner of `token` and returns its id.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError`] if the service rejects the post.
    pub fn create_post(&self, token: &str) -> Result<String, HarnessError> {
        let envelope = self
            .posts()
            .publish(token, &PublishPost::random())?
            .into_success(Endpoint::PublishPost)?;
        Ok(envelope.response_data.id)
    }

    /// Creates a fresh user and publishes one post as that user.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError`] if any step fails.
    pub fn create_post_get_id_and_token(&self) -> Result<PostHandle, HarnessError> {
        let token = self.create_user_get_token()?;
        let post_id = self.create_post(&token)?;
        Ok(PostHandle { post_id, token })
    }

    /// Adds one random top-level comment to `post_id`.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError`] if the service rejects the comment.
    pub fn add_random_comment(&self, token: &str, post_id: &str) -> Result<(), HarnessError> {
        self.posts()
            .add_comment(token, post_id, &AddComment::random())?
            .into_success(Endpoint::AddComment)?;
        Ok(())
    }

    /// Publishes a post and adds `count` top-level comments to it.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError`] if any step fails.
    pub fn create_post_with_comments(&self, count: usize) -> Result<PostHandle, HarnessError> {
        let post = self.create_post_get_id_and_token()?;
        for _ in 0..count {
            self.add_random_comment(&post.token, &post.post_id)?;
        }
        Ok(post)
    }

    /// Publishes a post and upvotes it once as its author.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError`] if any step fails.
    pub fn create_post_with_vote(&self) -> Result<PostHandle, HarnessError> {
        let post = self.create_post_get_id_and_token()?;
        self.posts()
            .vote(&post.token, &post.post_id, 1)?
            .into_success(Endpoint::VotePost)?;
        Ok(post)
    }

    /// Publishes a post with `count` comments and returns their ids as listed
    /// by the post detail, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError`] if any step fails.
    pub fn create_post_with_comment_ids(
        &self,
        count: usize,
    ) -> Result<(PostHandle, Vec<String>), HarnessError> {
        let post = self.create_post_with_comments(count)?;
        let detail = self
            .posts()
            .detail(&post.token, &post.post_id, &PageQuery::new(0, count.max(1)))?
            .response
            .into_success(Endpoint::PostDetail)?;
        let ids = detail
            .response_data
            .comments
            .into_iter()
            .map(|comment| comment.id)
            .collect();
        Ok((post, ids))
    }

    /// Publishes a post with one comment and returns all three ids.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError`] if any step fails or the comment is not
    /// listed on the post.
    pub fn create_comment(&self) -> Result<CommentHandle, HarnessError> {
        let (post, ids) = self.create_post_with_comment_ids(1)?;
        let comment_id = ids.into_iter().next().ok_or_else(|| HarnessError::Fixture {
            fixture: "create_comment",
            message: format!("post {} lists no comments after adding one", post.post_id),
        })?;
        Ok(CommentHandle {
            post_id: post.post_id,
            token: post.token,
            comment_id,
        })
    }
}

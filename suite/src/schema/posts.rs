//! Post listing and detail data.

use serde::Deserialize;

use super::comments::Comment;

/// A published post.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostData {
    /// Post id.
    pub id: String,
    /// Title.
    pub title: String,
    /// Body text.
    pub content: String,
    /// Author username.
    pub author: String,
    /// Creation timestamp as returned by the service.
    pub created_at: String,
}

/// One page of `GET /posts`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostsPage {
    /// Posts on this page.
    pub content: Vec<PostData>,
    /// Zero-based page index.
    pub page_number: i64,
    /// Requested page size.
    pub page_size: i64,
    /// Total posts across all pages.
    pub total_elements: i64,
    /// Total number of pages.
    pub total_pages: i64,
}

/// `GET /posts/{id}`: the post, one page of top-level comments and the score.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDetail {
    /// The post itself.
    pub post: PostData,
    /// Top-level comments with nested replies.
    #[serde(default)]
    pub comments: Vec<Comment>,
    /// Sum of all votes.
    pub vote_score: i64,
    /// Whether another comment page exists.
    pub has_more_comments: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_defaults_missing_comments() {
        let detail: PostDetail = serde_json::from_str(
            r#"{
                "post": {"id":"p","title":"t","content":"c","author":"a","createdAt":"2024-01-01T00:00:00Z"},
                "voteScore": -1,
                "hasMoreComments": false
            }"#,
        )
        .expect("valid");
        assert!(detail.comments.is_empty());
        assert_eq!(detail.vote_score, -1);
    }
}

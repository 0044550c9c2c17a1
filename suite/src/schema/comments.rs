//! Recursive comment trees and bounded traversal.
//!
//! The model allows unbounded nesting. Traversal is iterative and stops
//! descending at [`MAX_COMMENT_DEPTH`] so a pathological response cannot
//! blow the stack or loop forever.

use serde::Deserialize;

/// Deepest level [`CommentWalk`] descends to; top-level comments are depth 0.
pub const MAX_COMMENT_DEPTH: usize = 64;

/// A comment with its replies in service order.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    /// Comment id.
    pub id: String,
    /// Comment text.
    pub text: String,
    /// Author username.
    pub author: String,
    /// Creation timestamp as returned by the service.
    pub created_at: String,
    /// Direct replies.
    #[serde(default)]
    pub replies: Vec<Comment>,
}

/// A comment found in a tree, with its position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocatedComment<'a> {
    /// The comment.
    pub comment: &'a Comment,
    /// Id of the direct parent, `None` for top-level comments.
    pub parent_id: Option<&'a str>,
    /// Nesting depth, 0 for top-level comments.
    pub depth: usize,
}

/// Depth-first, pre-order walk over a comment forest.
///
/// Siblings are visited in service order.
#[derive(Debug, Clone)]
pub struct CommentWalk<'a> {
    stack: Vec<LocatedComment<'a>>,
    truncated: bool,
}

impl<'a> CommentWalk<'a> {
    /// Starts a walk over top-level comments.
    #[must_use]
    pub fn new(roots: &'a [Comment]) -> Self {
        let stack = roots
            .iter()
            .rev()
            .map(|comment| LocatedComment {
                comment,
                parent_id: None,
                depth: 0,
            })
            .collect();
        Self {
            stack,
            truncated: false,
        }
    }

    /// Whether any replies were skipped because of the depth bound.
    #[must_use]
    pub const fn truncated(&self) -> bool {
        self.truncated
    }
}

impl<'a> Iterator for CommentWalk<'a> {
    type Item = LocatedComment<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.stack.pop()?;
        if current.depth < MAX_COMMENT_DEPTH {
            self.stack
                .extend(current.comment.replies.iter().rev().map(|reply| LocatedComment {
                    comment: reply,
                    parent_id: Some(current.comment.id.as_str()),
                    depth: current.depth + 1,
                }));
        } else if !current.comment.replies.is_empty() {
            self.truncated = true;
        }
        Some(current)
    }
}

/// Finds a comment anywhere in the forest.
#[must_use]
pub fn find_comment<'a>(roots: &'a [Comment], id: &str) -> Option<LocatedComment<'a>> {
    CommentWalk::new(roots).find(|located| located.comment.id == id)
}

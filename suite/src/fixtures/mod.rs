//! Reusable setup for scenarios.
//!
//! [`Session`] is created once per test binary and owns the clients, the
//! shared password and the privileged tokens. Factories live on it as methods
//! and always create fresh entities, so scenarios never share mutable state.
//! Per-module values use a `static` [`Scoped`].

mod posts;
mod scope;
mod session;
mod users;

pub use posts::{CommentHandle, DEFAULT_COMMENTS_TO_CREATE, PostHandle, unknown_post_id};
pub use scope::Scoped;
pub use session::Session;
pub use users::{
    AuthenticatedUser, BannedAccount, CreatedUser, DEFAULT_BAN_SECONDS, MinimalUser, UserCleanup,
};

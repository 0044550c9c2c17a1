//! Request payloads and credentials for exercising the blog API.
//!
//! This crate has no knowledge of HTTP or the database. It only builds the
//! bodies the suite sends, so it can be reused by any harness that talks to
//! the same service.
//!
//! # Overview
//!
//! The crate supports:
//!
//! - Random valid payloads for every write endpoint
//! - Minimal and boundary-length values for limit checks
//! - Raw JSON payloads with missing, empty or mistyped fields
//! - Password policy validation matching the service rules
//! - XSS and SQL-injection corpora for hostile-input scenarios
//!
//! # Example
//!
//! ```
//! use test_data::{LoginUser, RawPayload, RegisterUser, is_valid_password};
//!
//! let user = RegisterUser::random().expect("random user");
//! assert!(is_valid_password(user.password()));
//!
//! let login = LoginUser::from_register(&user);
//! assert_eq!(login.email(), user.email());
//!
//! let broken = RawPayload::from_payload(&user)
//!     .expect("serialisable")
//!     .without("email");
//! assert!(broken.as_value().get("email").is_none());
//! ```

mod credentials;
mod error;
mod payloads;
mod raw;
pub mod security;
mod validation;

pub use credentials::{
    email_with_lengths, fake_email, fake_password, fake_password_with_rng, fake_username,
    invalid_email_variants, random_letters, unique_suffix,
};
pub use error::GenerationError;
pub use payloads::{AddComment, LoginUser, PublishPost, RegisterUser, ReplyComment};
pub use raw::RawPayload;
pub use validation::{
    EMAIL_LABEL_MAX_LEN, EMAIL_LOCAL_MAX_LEN, GENERATED_PASSWORD_LEN, PASSWORD_MAX_LEN,
    PASSWORD_MIN_LEN, POST_TITLE_MAX_LEN, USERNAME_MAX_LEN, is_valid_password,
};

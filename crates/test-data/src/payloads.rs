//! Typed request bodies for the write endpoints.
//!
//! Each payload is immutable once built: the `with_*` methods consume the
//! value and return a new one. Field names serialise in the service's
//! camelCase wire format.

use fake::Fake;
use fake::faker::lorem::en::{Paragraph, Sentence};
use serde::Serialize;

use crate::credentials::{fake_email, fake_password, fake_username};
use crate::error::GenerationError;

const MINIMAL_EMAIL: &str = "a@a.a";
const MINIMAL_USERNAME: &str = "u";
const MINIMAL_PASSWORD: &str = "Aa1PPPPP";

/// Body of `POST /auth/register`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterUser {
    email: String,
    username: String,
    password: String,
    password_confirmation: String,
}

impl RegisterUser {
    /// Builds a registration with matching password confirmation.
    #[must_use]
    pub fn new(
        email: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        let secret = password.into();
        Self {
            email: email.into(),
            username: username.into(),
            password_confirmation: secret.clone(),
            password: secret,
        }
    }

    /// Builds a random user with a freshly generated password.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError`] when password generation fails.
    pub fn random() -> Result<Self, GenerationError> {
        Ok(Self::with_password(&fake_password()?))
    }

    /// Builds a random user sharing the given password.
    #[must_use]
    pub fn with_password(password: &str) -> Self {
        Self::new(fake_email(), fake_username(), password)
    }

    /// Builds the smallest registration the service accepts.
    #[must_use]
    pub fn minimal() -> Self {
        Self::new(MINIMAL_EMAIL, MINIMAL_USERNAME, MINIMAL_PASSWORD)
    }

    /// Replaces the email.
    #[must_use]
    pub fn with_email(self, email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            ..self
        }
    }

    /// Replaces the username.
    #[must_use]
    pub fn with_username(self, username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            ..self
        }
    }

    /// Replaces both password fields with the same value.
    #[must_use]
    pub fn with_matching_password(self, password: impl Into<String>) -> Self {
        let secret = password.into();
        Self {
            password_confirmation: secret.clone(),
            password: secret,
            ..self
        }
    }

    /// Replaces only the confirmation, leaving the password untouched.
    #[must_use]
    pub fn with_confirmation(self, confirmation: impl Into<String>) -> Self {
        Self {
            password_confirmation: confirmation.into(),
            ..self
        }
    }

    /// Email address.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Username.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Password.
    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }

    /// Password confirmation.
    #[must_use]
    pub fn password_confirmation(&self) -> &str {
        &self.password_confirmation
    }
}

/// Body of `POST /auth/login`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginUser {
    email: String,
    password: String,
}

impl LoginUser {
    /// Builds a login from explicit credentials.
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Builds the login matching a registration.
    #[must_use]
    pub fn from_register(user: &RegisterUser) -> Self {
        Self::new(user.email.clone(), user.password.clone())
    }

    /// Email address.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Password.
    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }
}

/// Body of `POST /posts/publish`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublishPost {
    title: String,
    content: String,
}

impl PublishPost {
    /// Builds a post from explicit values.
    #[must_use]
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }

    /// Builds a post with a five-word title and a two-sentence body.
    #[must_use]
    pub fn random() -> Self {
        let title: String = Sentence(5..6).fake();
        let content: String = Paragraph(2..3).fake();
        Self::new(title, content)
    }

    /// Replaces the title.
    #[must_use]
    pub fn with_title(self, title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..self
        }
    }

    /// Replaces the content.
    #[must_use]
    pub fn with_content(self, content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..self
        }
    }

    /// Title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Content.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }
}

/// Body of `POST /posts/{id}/addComment`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddComment {
    text: String,
}

impl AddComment {
    /// Builds a comment with the given text.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Builds a comment with a short random sentence.
    #[must_use]
    pub fn random() -> Self {
        Self::new(Sentence(3..8).fake::<String>())
    }

    /// Comment text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Body of `POST /comments/{id}/reply`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReplyComment {
    text: String,
}

impl ReplyComment {
    /// Builds a reply with the given text.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Builds a reply with a short random sentence.
    #[must_use]
    pub fn random() -> Self {
        Self::new(Sentence(3..8).fake::<String>())
    }

    /// Reply text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }
}

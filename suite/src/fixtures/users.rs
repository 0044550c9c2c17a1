//! Account fixtures: plain, authenticated, admin and banned users.

use test_data::{LoginUser, RegisterUser};
use tracing::{info, warn};

use super::session::Session;
use crate::db::{DbUser, SqlClient, queries};
use crate::error::HarnessError;
use crate::routes::Endpoint;
use crate::schema::RegisterResponse;
use crate::telemetry::{Stage, step};

/// Ban length used for the session's banned accounts, in seconds.
pub const DEFAULT_BAN_SECONDS: u64 = 99_999;

/// Registration payload with the service's answer; no login performed.
#[derive(Debug, Clone)]
pub struct CreatedUser {
    /// Payload that was sent.
    pub payload: RegisterUser,
    /// Decoded registration response.
    pub response: RegisterResponse,
}

/// A registered and logged-in user.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    /// Registration payload, including the password.
    pub payload: RegisterUser,
    /// Bearer token.
    pub token: String,
}

/// Kind of account banned by [`Session::banned_token`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannedAccount {
    /// Regular user.
    User,
    /// Promoted admin.
    Admin,
}

/// Deletes `users` rows by email and username when dropped.
///
/// Guards rows a scenario may create outside the normal flow: the minimal
/// boundary user and accounts registered with hostile input.
#[derive(Debug)]
pub struct UserCleanup<'a> {
    sql: &'a SqlClient,
    email: Option<String>,
    username: Option<String>,
}

impl UserCleanup<'_> {
    fn purge(&self) -> Result<u64, HarnessError> {
        let mut removed = 0;
        if let Some(email) = &self.email {
            removed += self.sql.execute(queries::DELETE_USER_BY_EMAIL, &[email])?;
        }
        if let Some(username) = &self.username {
            removed += self
                .sql
                .execute(queries::DELETE_USER_BY_USERNAME, &[username])?;
        }
        Ok(removed)
    }
}

impl Drop for UserCleanup<'_> {
    fn drop(&mut self) {
        match step(Stage::Cleanup, || self.purge()) {
            Ok(removed) => info!(
                email = self.email.as_deref(),
                username = self.username.as_deref(),
                removed,
                "cleanup removed users"
            ),
            Err(err) => warn!(error = %err, "cleanup failed"),
        }
    }
}

/// The smallest valid registration, deleted again when dropped.
#[derive(Debug)]
pub struct MinimalUser<'a> {
    /// Payload with the minimal email, username and password.
    pub payload: RegisterUser,
    _cleanup: UserCleanup<'a>,
}

impl Session {
    /// Registers a random user with the session password without logging in.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError`] on transport failure or schema violation.
    pub fn create_user(&self) -> Result<CreatedUser, HarnessError> {
        let payload = RegisterUser::with_password(self.valid_password());
        let response = self.auth().register(&payload)?;
        Ok(CreatedUser { payload, response })
    }

    /// Registers and logs in a random user.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError`] if registration or login fails.
    pub fn create_authenticated_user(&self) -> Result<AuthenticatedUser, HarnessError> {
        let created = self.create_user()?;
        created.response.into_success(Endpoint::Register)?;
        let token = self.login_token(&created.payload, "create_user_get_token")?;
        Ok(AuthenticatedUser {
            payload: created.payload,
            token,
        })
    }

    /// Registers and logs in a random user, returning only the token.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError`] if registration or login fails.
    pub fn create_user_get_token(&self) -> Result<String, HarnessError> {
        self.create_authenticated_user().map(|user| user.token)
    }

    /// Registers a user and reads its numeric id from the database.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError`] if registration fails or the row is missing.
    pub fn created_user_with_id(&self) -> Result<(RegisterUser, i64), HarnessError> {
        let created = self.create_user()?;
        created.response.into_success(Endpoint::Register)?;
        let user = self.user_row(created.payload.email())?;
        Ok((created.payload, user.id))
    }

    /// Registers a user, promotes it to admin in the database and logs in.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError`] if registration, promotion or login fails.
    pub fn create_admin_user(&self) -> Result<AuthenticatedUser, HarnessError> {
        let created = self.create_user()?;
        created.response.into_success(Endpoint::Register)?;
        let promoted = self
            .sql()
            .execute(queries::PROMOTE_TO_ADMIN, &[&created.payload.email()])?;
        if promoted != 1 {
            return Err(HarnessError::Fixture {
                fixture: "create_admin_user",
                message: format!(
                    "expected to promote 1 user '{}', promoted {promoted}",
                    created.payload.email()
                ),
            });
        }
        let token = self.login_token(&created.payload, "create_admin_user")?;
        Ok(AuthenticatedUser {
            payload: created.payload,
            token,
        })
    }

    /// Session-wide admin token. Never ban or demote this account.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError`] if the admin cannot be created.
    pub fn admin_token(&self) -> Result<String, HarnessError> {
        self.admin_token
            .get_or_try_init(|| self.create_admin_user().map(|admin| admin.token))
    }

    /// Session-wide token of a banned account of the given kind.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError`] if the account cannot be created, banned or
    /// logged in.
    pub fn banned_token(&self, kind: BannedAccount) -> Result<String, HarnessError> {
        let scope = match kind {
            BannedAccount::User => &self.banned_user_token,
            BannedAccount::Admin => &self.banned_admin_token,
        };
        scope.get_or_try_init(|| {
            let account = match kind {
                BannedAccount::User => self.create_authenticated_user()?,
                BannedAccount::Admin => self.create_admin_user()?,
            };
            self.ban(&account.payload, DEFAULT_BAN_SECONDS)?;
            self.login_token(&account.payload, "banned_token")
        })
    }

    /// Bans `user` for `seconds` with the session admin token.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError`] if the admin token is unavailable or the ban
    /// is rejected.
    pub fn ban(&self, user: &RegisterUser, seconds: u64) -> Result<(), HarnessError> {
        let admin = self.admin_token()?;
        self.admin()
            .ban(&admin, user.email(), seconds)?
            .into_success(Endpoint::BanUser)?;
        Ok(())
    }

    /// Prepares the minimal boundary user; its row is deleted on drop.
    ///
    /// Leftovers from an interrupted run are removed first.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError`] if leftover rows cannot be removed.
    pub fn minimal_user(&self) -> Result<MinimalUser<'_>, HarnessError> {
        let payload = RegisterUser::minimal();
        let cleanup = self.cleanup_users(Some(payload.email()), Some(payload.username()));
        cleanup.purge()?;
        Ok(MinimalUser {
            payload,
            _cleanup: cleanup,
        })
    }

    /// Returns a guard deleting users with this email and/or username on drop.
    #[must_use]
    pub fn cleanup_users(&self, email: Option<&str>, username: Option<&str>) -> UserCleanup<'_> {
        UserCleanup {
            sql: self.sql(),
            email: email.map(str::to_owned),
            username: username.map(str::to_owned),
        }
    }

    /// Reads the `users` row for `email`.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError`] if the query fails or no row exists.
    pub fn user_row(&self, email: &str) -> Result<DbUser, HarnessError> {
        self.sql()
            .query_as::<DbUser>(queries::USER_BY_EMAIL, &[&email])?
            .into_iter()
            .next()
            .ok_or_else(|| HarnessError::Fixture {
                fixture: "user_row",
                message: format!("no users row for '{email}'"),
            })
    }

    fn login_token(
        &self,
        payload: &RegisterUser,
        fixture: &'static str,
    ) -> Result<String, HarnessError> {
        self.auth()
            .login_and_get_token(&LoginUser::from_register(payload))?
            .ok_or_else(|| HarnessError::Fixture {
                fixture,
                message: format!("login for '{}' returned no token", payload.email()),
            })
    }
}

//! Session-scoped state: clients, the shared password and privileged tokens.

use std::sync::{Mutex, OnceLock, PoisonError};

use tracing::info;

use super::scope::Scoped;
use crate::api::{AdminApi, AuthApi, CommentsApi, PostsApi, ProfileApi};
use crate::config::SuiteConfig;
use crate::db::SqlClient;
use crate::error::HarnessError;
use crate::telemetry::init_tracing;
use crate::transport::HttpClient;

static SESSION: OnceLock<Session> = OnceLock::new();
static SESSION_INIT: Mutex<()> = Mutex::new(());

/// Everything a scenario needs, created once per test binary.
///
/// Session-scoped identities (the admin token and the banned accounts) are
/// created lazily and never mutated by scenarios. Scenarios that ban, unban
/// or promote must create their own accounts.
#[derive(Debug)]
pub struct Session {
    config: SuiteConfig,
    http: HttpClient,
    sql: SqlClient,
    valid_password: String,
    pub(super) admin_token: Scoped<String>,
    pub(super) banned_user_token: Scoped<String>,
    pub(super) banned_admin_token: Scoped<String>,
}

impl Session {
    /// Connects to the service and database described by `config`.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError`] when the HTTP client cannot be built, the
    /// database is unreachable, or password generation fails.
    pub fn connect(config: SuiteConfig) -> Result<Self, HarnessError> {
        let http = HttpClient::new(config.base_url.clone(), config.request_timeout)?;
        let sql = SqlClient::connect(&config.database)?;
        let valid_password = test_data::fake_password()?;
        info!(
            environment = %config.environment,
            base_url = %config.base_url,
            "test session ready"
        );
        Ok(Self {
            config,
            http,
            sql,
            valid_password,
            admin_token: Scoped::new(),
            banned_user_token: Scoped::new(),
            banned_admin_token: Scoped::new(),
        })
    }

    /// Returns the binary-wide session, loading configuration on first use.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError`] when configuration or connection fails. A
    /// failed attempt is not cached.
    pub fn shared() -> Result<&'static Self, HarnessError> {
        if let Some(session) = SESSION.get() {
            return Ok(session);
        }
        let _init = SESSION_INIT.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(session) = SESSION.get() {
            return Ok(session);
        }
        let config = SuiteConfig::load()?;
        init_tracing(config.log_json);
        let session = Self::connect(config)?;
        Ok(SESSION.get_or_init(|| session))
    }

    /// Resolved configuration.
    #[must_use]
    pub const fn config(&self) -> &SuiteConfig {
        &self.config
    }

    /// Raw HTTP client for requests outside the wrappers.
    #[must_use]
    pub const fn http(&self) -> &HttpClient {
        &self.http
    }

    /// Database client.
    #[must_use]
    pub const fn sql(&self) -> &SqlClient {
        &self.sql
    }

    /// Policy-compliant password shared by every user created in this run.
    #[must_use]
    pub fn valid_password(&self) -> &str {
        &self.valid_password
    }

    /// `/auth` wrapper.
    #[must_use]
    pub const fn auth(&self) -> AuthApi<'_> {
        AuthApi::new(&self.http)
    }

    /// `/profile` wrapper.
    #[must_use]
    pub const fn profile(&self) -> ProfileApi<'_> {
        ProfileApi::new(&self.http)
    }

    /// `/posts` wrapper.
    #[must_use]
    pub const fn posts(&self) -> PostsApi<'_> {
        PostsApi::new(&self.http)
    }

    /// `/comments` wrapper.
    #[must_use]
    pub const fn comments(&self) -> CommentsApi<'_> {
        CommentsApi::new(&self.http)
    }

    /// `/admin` wrapper.
    #[must_use]
    pub const fn admin(&self) -> AdminApi<'_> {
        AdminApi::new(&self.http)
    }
}

//! Suite configuration loaded via OrthoConfig and per-environment env files.
//!
//! Raw settings come from `API_TESTS_*` environment variables. The selected
//! environment's env file is then layered on top, overriding any value it
//! defines, and the result is resolved into a [`SuiteConfig`].

mod env_file;
mod environment;

use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

pub use env_file::EnvFile;
pub use environment::TestEnvironment;

/// Prefix shared by every environment variable the suite reads.
pub const ENV_PREFIX: &str = "API_TESTS";

const DEFAULT_BASE_URL: &str = "http://localhost:8080";
const DEFAULT_DB_HOST: &str = "localhost";
const DEFAULT_DB_PORT: u16 = 5432;
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Errors raised while loading configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// OrthoConfig could not load the raw settings.
    #[error("failed to load settings: {message}")]
    Load {
        /// Loader diagnostic.
        message: String,
    },

    /// `API_TESTS_ENV` named an unknown environment.
    #[error("unknown environment '{value}': expected one of local, dev, stg, prod-test")]
    UnknownEnvironment {
        /// Rejected value.
        value: String,
    },

    /// The env file exists but could not be used.
    #[error("env file '{path}' is unusable: {message}", path = path.display())]
    EnvFile {
        /// Path of the env file.
        path: PathBuf,
        /// Description of the failure.
        message: String,
    },

    /// A required setting is absent from both the environment and env file.
    #[error("missing required setting {key}")]
    Missing {
        /// Fully prefixed variable name.
        key: String,
    },

    /// A setting is present but cannot be parsed.
    #[error("invalid value '{value}' for {key}: {message}")]
    Invalid {
        /// Fully prefixed variable name.
        key: String,
        /// Rejected value.
        value: String,
        /// Parser diagnostic.
        message: String,
    },
}

/// Raw settings read from `API_TESTS_*` environment variables.
#[derive(Clone, Default, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "API_TESTS")]
pub struct SuiteSettings {
    /// Target environment name (`local`, `dev`, `stg`, `prod-test`).
    pub env: Option<String>,
    /// Directory holding the env files.
    pub env_dir: Option<PathBuf>,
    /// Base URL of the service under test.
    pub base_url: Option<String>,
    /// Database host.
    pub db_host: Option<String>,
    /// Database port.
    pub db_port: Option<u16>,
    /// Database name.
    pub db_name: Option<String>,
    /// Database user.
    pub db_user: Option<String>,
    /// Database password.
    pub db_password: Option<String>,
    /// Fixed request timeout in seconds.
    pub request_timeout_secs: Option<u64>,
    /// Emit JSON log lines instead of human-readable ones.
    pub log_json: Option<bool>,
}

impl SuiteSettings {
    /// Loads settings from the process environment only.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Load`] when a variable cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::load_from_iter([OsString::from("blog-api-suite")]).map_err(|err| {
            ConfigError::Load {
                message: err.to_string(),
            }
        })
    }

    /// Return the selected environment, falling back to local.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownEnvironment`] for unrecognised names.
    pub fn environment(&self) -> Result<TestEnvironment, ConfigError> {
        self.env
            .as_deref()
            .map_or(Ok(TestEnvironment::default()), str::parse)
    }

    /// Return the env file directory, falling back to the working directory.
    #[must_use]
    pub fn env_dir(&self) -> &Path {
        self.env_dir.as_deref().unwrap_or_else(|| Path::new("."))
    }
}

impl fmt::Debug for SuiteSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SuiteSettings")
            .field("env", &self.env)
            .field("env_dir", &self.env_dir)
            .field("base_url", &self.base_url)
            .field("db_host", &self.db_host)
            .field("db_port", &self.db_port)
            .field("db_name", &self.db_name)
            .field("db_user", &self.db_user)
            .field("db_password", &self.db_password.as_ref().map(|_| "***"))
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("log_json", &self.log_json)
            .finish()
    }
}

/// Database connection parameters.
#[derive(Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    /// Host name.
    pub host: String,
    /// TCP port.
    pub port: u16,
    /// Database name.
    pub name: String,
    /// Login role.
    pub user: String,
    /// Login password.
    pub password: String,
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("name", &self.name)
            .field("user", &self.user)
            .field("password", &"***")
            .finish()
    }
}

/// Fully resolved configuration for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuiteConfig {
    /// Selected environment.
    pub environment: TestEnvironment,
    /// Base URL of the service under test.
    pub base_url: Url,
    /// Fixed per-request timeout.
    pub request_timeout: Duration,
    /// Database connection parameters.
    pub database: DatabaseConfig,
    /// Emit JSON log lines.
    pub log_json: bool,
}

impl SuiteConfig {
    /// Loads settings, layers the selected env file on top and resolves them.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when settings cannot be loaded, the env file is
    /// unusable, or a required value is missing or malformed.
    pub fn load() -> Result<Self, ConfigError> {
        let settings = SuiteSettings::from_env()?;
        let environment = settings.environment()?;
        let env_file =
            EnvFile::load_optional(&settings.env_dir().join(environment.env_file_name()))?;
        Self::resolve(&settings, environment, &env_file)
    }

    /// Resolves raw settings against an env file. Env file values win.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] or [`ConfigError::Invalid`] for absent
    /// or malformed values.
    pub fn resolve(
        settings: &SuiteSettings,
        environment: TestEnvironment,
        env_file: &EnvFile,
    ) -> Result<Self, ConfigError> {
        let layered = Layered(env_file);

        let raw_url = layered
            .string("BASE_URL", settings.base_url.as_deref())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_owned());
        let base_url = Url::parse(&raw_url).map_err(|err| invalid("BASE_URL", &raw_url, &err))?;

        let timeout_secs =
            layered.parsed("REQUEST_TIMEOUT_SECS", settings.request_timeout_secs)?;
        let port = layered.parsed("DB_PORT", settings.db_port)?;
        let log_json = layered.parsed("LOG_JSON", settings.log_json)?;

        let database = DatabaseConfig {
            host: layered
                .string("DB_HOST", settings.db_host.as_deref())
                .unwrap_or_else(|| DEFAULT_DB_HOST.to_owned()),
            port: port.unwrap_or(DEFAULT_DB_PORT),
            name: layered.required("DB_NAME", settings.db_name.as_deref())?,
            user: layered.required("DB_USER", settings.db_user.as_deref())?,
            password: layered.required("DB_PASSWORD", settings.db_password.as_deref())?,
        };

        Ok(Self {
            environment,
            base_url,
            request_timeout: Duration::from_secs(timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)),
            database,
            log_json: log_json.unwrap_or(false),
        })
    }
}

/// Env file values layered over OrthoConfig settings.
struct Layered<'a>(&'a EnvFile);

impl Layered<'_> {
    fn string(&self, key: &str, fallback: Option<&str>) -> Option<String> {
        self.0
            .get(key)
            .or(fallback)
            .filter(|value| !value.is_empty())
            .map(str::to_owned)
    }

    fn required(&self, key: &str, fallback: Option<&str>) -> Result<String, ConfigError> {
        self.string(key, fallback).ok_or_else(|| ConfigError::Missing {
            key: prefixed(key),
        })
    }

    fn parsed<T>(&self, key: &str, fallback: Option<T>) -> Result<Option<T>, ConfigError>
    where
        T: std::str::FromStr,
        T::Err: fmt::Display,
    {
        match self.0.get(key) {
            Some(raw) => raw.parse().map(Some).map_err(|err| invalid(key, raw, &err)),
            None => Ok(fallback),
        }
    }
}

fn prefixed(key: &str) -> String {
    format!("{ENV_PREFIX}_{key}")
}

fn invalid(key: &str, value: &str, err: &dyn fmt::Display) -> ConfigError {
    ConfigError::Invalid {
        key: prefixed(key),
        value: value.to_owned(),
        message: err.to_string(),
    }
}

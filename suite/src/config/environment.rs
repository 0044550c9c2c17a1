//! Target environment selection.

use std::fmt;
use std::str::FromStr;

use super::ConfigError;

/// Deployment the suite runs against.
///
/// Each environment owns one env file holding its base URL and database
/// credentials.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TestEnvironment {
    /// Developer machine, `.env`.
    #[default]
    Local,
    /// Shared development stack, `.env.dev`.
    Dev,
    /// Staging, `.env.stg`.
    Staging,
    /// Production test tenant, `.env.prod-test`.
    ProdTest,
}

impl TestEnvironment {
    /// All environments in selection order.
    pub const ALL: [Self; 4] = [Self::Local, Self::Dev, Self::Staging, Self::ProdTest];

    /// Name accepted on the command line and in `API_TESTS_ENV`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Dev => "dev",
            Self::Staging => "stg",
            Self::ProdTest => "prod-test",
        }
    }

    /// File name of the env file for this environment.
    #[must_use]
    pub const fn env_file_name(self) -> &'static str {
        match self {
            Self::Local => ".env",
            Self::Dev => ".env.dev",
            Self::Staging => ".env.stg",
            Self::ProdTest => ".env.prod-test",
        }
    }
}

impl fmt::Display for TestEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TestEnvironment {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalised = value.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|env| env.as_str() == normalised)
            .ok_or_else(|| ConfigError::UnknownEnvironment {
                value: value.to_owned(),
            })
    }
}

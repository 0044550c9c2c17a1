//! `.env` file loading on top of `dotenvy`.
//!
//! Keys are upper-cased and lose an optional `API_TESTS_` prefix, so
//! `BASE_URL` and `API_TESTS_BASE_URL` name the same setting. Quoting,
//! escapes and `export` prefixes follow dotenv rules. Entries are collected
//! into a map rather than written into the process environment.

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use super::{ConfigError, ENV_PREFIX};

/// Parsed env file contents keyed by bare setting name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvFile {
    values: BTreeMap<String, String>,
}

impl EnvFile {
    /// Reads an env file, treating a missing file as empty.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EnvFile`] when the file exists but cannot be
    /// read or contains a malformed line.
    pub fn load_optional(path: &Path) -> Result<Self, ConfigError> {
        let to_config = |message: String| ConfigError::EnvFile {
            path: path.to_path_buf(),
            message,
        };
        match dotenvy::from_path_iter(path) {
            Ok(entries) => Self::collect(entries).map_err(to_config),
            Err(err) if err.not_found() => Ok(Self::default()),
            Err(err) => Err(to_config(err.to_string())),
        }
    }

    /// Parses env file contents.
    ///
    /// # Errors
    ///
    /// Returns a description of the first malformed line.
    pub fn parse(contents: &str) -> Result<Self, String> {
        Self::collect(dotenvy::from_read_iter(contents.as_bytes()))
    }

    fn collect<R: Read>(entries: dotenvy::Iter<R>) -> Result<Self, String> {
        let mut values = BTreeMap::new();
        for entry in entries {
            let (key, value) = entry.map_err(|err| err.to_string())?;
            let bare = normalise_key(&key);
            if bare.is_empty() {
                return Err(format!("empty key in entry '{key}'"));
            }
            values.insert(bare, value);
        }
        Ok(Self { values })
    }

    /// Looks up a bare setting name such as `BASE_URL`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Number of parsed entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the file held no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

fn normalise_key(raw: &str) -> String {
    let upper = raw.trim().to_ascii_uppercase();
    let prefix = format!("{ENV_PREFIX}_");
    upper
        .strip_prefix(&prefix)
        .map_or_else(|| upper.clone(), str::to_owned)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[test]
    fn parses_comments_exports_and_quotes() {
        let file = EnvFile::parse(
            "# target\n\
             BASE_URL=http://api.test:8080\n\
             export API_TESTS_DB_HOST=db.internal\n\
             db_password=\"p@ss=word\"\n\
             DB_USER='tester'\n\
             \n",
        )
        .expect("valid env file");

        assert_eq!(file.len(), 4);
        assert_eq!(file.get("BASE_URL"), Some("http://api.test:8080"));
        assert_eq!(file.get("DB_HOST"), Some("db.internal"));
        assert_eq!(file.get("DB_PASSWORD"), Some("p@ss=word"));
        assert_eq!(file.get("DB_USER"), Some("tester"));
    }

    #[test]
    fn double_quoted_values_honour_escapes() {
        let file = EnvFile::parse("DB_NAME=\"blog\\\"db\"").expect("valid env file");
        assert_eq!(file.get("DB_NAME"), Some("blog\"db"));
    }

    #[rstest]
    #[case("JUST_A_KEY")]
    #[case("A=1\n=2")]
    #[case("DB_USER=\"unterminated")]
    fn rejects_malformed_lines(#[case] contents: &str) {
        assert!(EnvFile::parse(contents).is_err(), "{contents:?} should not parse");
    }

    #[test]
    fn later_lines_override_earlier_ones() {
        let file = EnvFile::parse("DB_PORT=1\nAPI_TESTS_DB_PORT=2").expect("valid");
        assert_eq!(file.get("DB_PORT"), Some("2"));
    }

    #[test]
    fn missing_file_is_empty() {
        let dir = tempfile::tempdir().expect("temp dir");
        let file = EnvFile::load_optional(&dir.path().join(".env")).expect("missing is fine");
        assert!(file.is_empty());
    }

    #[test]
    fn malformed_file_reports_path() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join(".env");
        std::fs::write(&path, "NOPE").expect("write env file");

        let err = EnvFile::load_optional(&path).expect_err("malformed");
        assert!(err.to_string().contains(".env"), "{err}");
    }
}

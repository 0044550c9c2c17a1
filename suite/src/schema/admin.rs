//! Admin ban management data.

use serde::Deserialize;

/// `responseData` of a successful ban.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BanData {
    /// End of the ban as an ISO-8601 timestamp.
    pub banned_until: String,
}

/// `responseData` of a successful unban; the timestamp is cleared.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnbanData {
    /// Always `null` after an unban.
    pub banned_until: Option<String>,
}

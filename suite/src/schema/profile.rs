//! User profile data shared by the profile and admin lookup endpoints.

use serde::Deserialize;

/// Public view of an account.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// Numeric user id.
    pub id: i64,
    /// Email address, domain lowercased by the service.
    pub email: String,
    /// Username.
    pub username: String,
    /// End of the current ban as an ISO-8601 timestamp, if banned.
    #[serde(default)]
    pub banned_until: Option<String>,
    /// Granted roles, e.g. `ROLE_USER`.
    pub authorities: Vec<String>,
}

//! Authentication response data.

use serde::Deserialize;

/// `responseData` of a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginData {
    /// Bearer token for subsequent requests.
    pub jwt: String,
}

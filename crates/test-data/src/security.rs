//! Hostile inputs for injection scenarios.
//!
//! Each string is exported on its own so scenarios can parametrise over it;
//! the arrays group them by attack family.

/// Inline script element.
pub const XSS_SCRIPT_TAG: &str = "<script>alert(1)</script>";
/// Image whose error handler runs script.
pub const XSS_IMG_ONERROR: &str = "<img src=x onerror=alert(2)>";
/// Script nested inside an SVG element.
pub const XSS_SVG_SCRIPT: &str = "<svg><script>alert(3)</script></svg>";

/// Stacked statement dropping the users table.
pub const SQLI_DROP_TABLE: &str = "1; DROP TABLE users;";
/// Always-true predicate in single quotes.
pub const SQLI_OR_TAUTOLOGY: &str = "' OR '1'='1";
/// Always-true predicate in double quotes.
pub const SQLI_QUOTED_TAUTOLOGY: &str = "\" OR \"\" = \"";
/// Trailing comment cutting off the rest of the statement.
pub const SQLI_COMMENT_OUT: &str = "admin' --";

/// Script-injection strings sent in user-controlled text fields.
pub const XSS_PAYLOADS: [&str; 3] = [XSS_SCRIPT_TAG, XSS_IMG_ONERROR, XSS_SVG_SCRIPT];

/// SQL-injection strings sent in user-controlled text fields.
pub const SQL_INJECTION_PAYLOADS: [&str; 4] = [
    SQLI_DROP_TABLE,
    SQLI_OR_TAUTOLOGY,
    SQLI_QUOTED_TAUTOLOGY,
    SQLI_COMMENT_OUT,
];

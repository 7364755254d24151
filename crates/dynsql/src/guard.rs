//! Keyword-blacklist injection guard.
//!
//! Every table name, filter key, and filter value reaching a statement
//! builder passes through here first. The check is a coarse substring
//! heuristic over the upper-cased string form of the input; it catches
//! keyword injection, not structurally malformed SQL.

use crate::error::{SqlError, SqlResult};
use serde_json::Value;

/// Tokens rejected anywhere in a guarded input (matched against the
/// upper-cased input).
pub const INJECTION_KEYWORDS: [&str; 11] = [
    "DROP", "SELECT", "DELETE", "UPDATE", "INSERT", "EXEC", "--", "/*", "*/", "XP_", "SP_",
];

/// Reject `input` if it contains any blacklisted token.
///
/// `context` names the kind of input for the error message ("table name",
/// "filter key", "filter value").
pub fn check(input: &str, context: &'static str) -> SqlResult<()> {
    let upper = input.to_uppercase();
    for token in INJECTION_KEYWORDS {
        if upper.contains(token) {
            return Err(SqlError::Injection {
                context,
                token,
                input: input.to_string(),
            });
        }
    }
    Ok(())
}

/// Reject a value if its string form contains any blacklisted token.
///
/// Strings are checked directly; other values are checked through their
/// JSON text form (so a list value is scanned as a whole).
pub fn check_value(value: &Value, context: &'static str) -> SqlResult<()> {
    match value {
        Value::String(s) => check(s, context),
        other => check(&other.to_string(), context),
    }
}

/// Reject a filter key/value pair if either side matches the blacklist.
pub fn check_pair(key: &str, value: &Value) -> SqlResult<()> {
    check(key, "filter key")?;
    check_value(value, "filter value")
}

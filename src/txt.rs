//! Key/value view of TXT records
//!
//! DNS-SD services describe themselves with `key=value` strings in a TXT
//! record. Values often carry JSON, so each value is parsed as JSON first
//! and kept as a plain string when that fails.

use std::collections::BTreeMap;

use serde_json::Value;

pub type Properties = BTreeMap<String, Value>;

/// Parses one TXT string into its key and value
///
/// A string without `=` is a flag and maps to `true`. Otherwise the value is
/// everything after the first `=`.
pub fn parse_property(token: &str) -> (String, Value) {
    match token.find('=') {
        None => (token.to_owned(), Value::Bool(true)),
        Some(pos) => {
            let raw = &token[pos + 1..];
            let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_owned()));
            (token[..pos].to_owned(), value)
        }
    }
}

/// Collects the TXT strings of a record into a map
///
/// When a key is repeated the last value wins.
pub fn parse_properties<S: AsRef<str>>(tokens: &[S]) -> Properties {
    tokens
        .iter()
        .map(|token| parse_property(token.as_ref()))
        .collect()
}

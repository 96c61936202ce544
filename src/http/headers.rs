//! Header snapshots for request and response logs.

use std::collections::BTreeMap;

use axum::http::HeaderMap;

/// Render headers as a JSON object of name → list of values.
///
/// Names are sorted, values keep their arrival order. Bytes that are not
/// valid UTF-8 are replaced. Never fails: an unserializable snapshot is
/// logged as `{}`.
pub fn headers_json(headers: &HeaderMap) -> String {
    let mut snapshot: BTreeMap<&str, Vec<String>> = BTreeMap::new();
    for (name, value) in headers {
        snapshot
            .entry(name.as_str())
            .or_default()
            .push(String::from_utf8_lossy(value.as_bytes()).into_owned());
    }
    serde_json::to_string(&snapshot).unwrap_or_else(|_| "{}".to_string())
}

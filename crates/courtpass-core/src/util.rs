//! Small text helpers shared by config loading and the RPC client.

/// Trim an optional config or credential value; blank counts as unset.
pub fn normalize_text_option(value: Option<String>) -> Option<String> {
    let value = value?;
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Endpoint scheme check used when validating `rpc_endpoint`.
pub fn is_http_url(value: &str) -> bool {
    value.starts_with("http://") || value.starts_with("https://")
}

/// First 180 characters of an error body, for logs.
pub fn compact_text(value: &str) -> String {
    value.trim().chars().take(180).collect()
}

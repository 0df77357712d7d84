//! CLI input validation used by clap's `value_parser`.

/// Validate a BFS root key.
///
/// Keys are opaque, so only blank values are rejected here; whether the key
/// exists is checked against the graph once it is loaded.
///
/// # Errors
///
/// Returns a message for an empty or whitespace-only key.
pub fn validate_root(s: &str) -> Result<String, String> {
    if s.trim().is_empty() {
        return Err("root node key cannot be empty".to_string());
    }
    Ok(s.to_string())
}

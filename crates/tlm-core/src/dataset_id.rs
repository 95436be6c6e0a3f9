use crate::error::{Error, Result};

/// Validate a caller-supplied dataset identifier.
///
/// Must be non-empty, composed only of ASCII letters, digits, `.`, `_`, `-`,
/// and must not contain the substring `..` (path traversal guard).
pub fn validate_dataset_id(id: &str) -> Result<()> {
    if id.is_empty() {
        return Err(Error::InvalidId(id.to_string()));
    }
    if id.contains("..") {
        return Err(Error::InvalidId(id.to_string()));
    }
    let legal = id
        .bytes()
        .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'.' | b'_' | b'-'));
    if !legal {
        return Err(Error::InvalidId(id.to_string()));
    }
    Ok(())
}

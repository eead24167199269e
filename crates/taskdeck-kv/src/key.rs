//! Storage key validation.
//!
//! Keys double as file stems for [`FileStore`](crate::FileStore), so they
//! are restricted to a portable character set.

use crate::{Error, Result};

/// Maximum key length in bytes.
pub const MAX_KEY_LENGTH: usize = 64;

/// Validate a storage key.
///
/// Keys must be 1-64 characters of ASCII letters, digits, `-` or `_`.
///
/// # Examples
///
/// ```
/// use taskdeck_kv::validate_key;
///
/// assert!(validate_key("projects").is_ok());
/// assert!(validate_key("../etc/passwd").is_err());
/// ```
pub fn validate_key(key: &str) -> Result<()> {
    let invalid = |reason: &str| Error::InvalidKey {
        key: key.to_string(),
        reason: reason.to_string(),
    };

    if key.is_empty() {
        return Err(invalid("key cannot be empty"));
    }

    if key.len() > MAX_KEY_LENGTH {
        return Err(invalid(&format!(
            "key cannot exceed {MAX_KEY_LENGTH} characters"
        )));
    }

    if !key
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(invalid(
            "key must contain only alphanumerics, '-' and '_'",
        ));
    }

    Ok(())
}

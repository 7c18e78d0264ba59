//! Short code generation and alias validation utilities.
//!
//! Provides cryptographically secure random code generation and validation
//! for custom user-provided aliases.

use crate::error::AppError;
use base64::Engine as _;
use serde_json::json;

/// Length of random bytes before base64 encoding.
const CODE_LENGTH_BYTES: usize = 9;

/// Bounds for custom alias length.
const ALIAS_MIN_LENGTH: usize = 3;
const ALIAS_MAX_LENGTH: usize = 32;

/// Aliases that cannot be used as short codes.
///
/// These are reserved for system endpoints to prevent routing conflicts.
const RESERVED_ALIASES: &[&str] = &["api", "health", "stats", "admin"];

/// Generates a cryptographically secure random short code.
///
/// Uses `getrandom` for entropy and encodes the result as URL-safe base64
/// without padding, producing a 12-character code. The keyspace is large
/// enough that a single existence check per candidate suffices; collisions
/// are handled by the caller's bounded retry loop.
///
/// # Panics
///
/// Panics if the system random number generator fails (extremely rare).
pub fn generate_code() -> String {
    let mut buffer = [0u8; CODE_LENGTH_BYTES];

    getrandom::fill(&mut buffer).expect("Failed to generate random bytes");

    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(buffer)
}

/// Validates a user-provided custom alias.
///
/// # Rules
///
/// - Length: 3-32 characters
/// - Allowed characters: ASCII letters, digits, hyphens, underscores
///   (everything safe in a URL path segment without percent-encoding)
/// - Cannot start or end with a hyphen or underscore
/// - Cannot be a reserved system alias
///
/// Uniqueness against existing links (active or not) is checked separately
/// by the link service through the repository.
///
/// # Errors
///
/// Returns [`AppError::Validation`] if any rule is violated.
pub fn validate_alias(alias: &str) -> Result<(), AppError> {
    if alias.len() < ALIAS_MIN_LENGTH || alias.len() > ALIAS_MAX_LENGTH {
        return Err(AppError::bad_request(
            "Custom alias must be 3-32 characters",
            json!({ "provided_length": alias.len() }),
        ));
    }

    if !alias
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(AppError::bad_request(
            "Custom alias can only contain letters, digits, hyphens, and underscores",
            json!({ "alias": alias }),
        ));
    }

    if alias.starts_with(['-', '_']) || alias.ends_with(['-', '_']) {
        return Err(AppError::bad_request(
            "Custom alias cannot start or end with a hyphen or underscore",
            json!({ "alias": alias }),
        ));
    }

    if RESERVED_ALIASES.contains(&alias.to_ascii_lowercase().as_str()) {
        return Err(AppError::bad_request(
            "This alias is reserved",
            json!({ "alias": alias }),
        ));
    }

    Ok(())
}

//! DTOs for the link shortening endpoint.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use validator::Validate;

/// Request to create a short link.
///
/// Only coarse shape validation happens here; URL normalization and alias
/// rules are enforced by the link service so API and non-API callers share
/// one rulebook.
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenRequest {
    /// Identifier of the creating user.
    #[validate(length(min = 1, max = 64))]
    pub owner_id: String,

    /// The destination URL. A missing scheme is treated as `https://`.
    #[validate(length(min = 1, max = 2048))]
    pub url: String,

    /// Optional caller-chosen short code.
    pub custom_alias: Option<String>,

    /// Optional expiry timestamp. After this time, the link returns 410 Gone.
    pub expires_at: Option<DateTime<Utc>>,
}

//! Link entity representing a shortened URL mapping.

use chrono::{DateTime, Utc};

/// A shortened URL link with ownership and lifecycle metadata.
///
/// The `code` is unique across all links, active or not. `click_count` is
/// maintained by an atomic store-level increment and is advisory with
/// respect to the persisted click events (eventual, not transactional,
/// consistency).
#[derive(Debug, Clone)]
pub struct Link {
    pub id: i64,
    pub code: String,
    pub original_url: String,
    pub owner_id: String,
    pub click_count: i64,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
    pub is_active: bool,
}

impl Link {
    /// Creates a new Link instance.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: i64,
        code: String,
        original_url: String,
        owner_id: String,
        click_count: i64,
        created_at: DateTime<Utc>,
        expires_at: Option<DateTime<Utc>>,
        is_active: bool,
    ) -> Self {
        Self {
            id,
            code,
            original_url,
            owner_id,
            click_count,
            created_at,
            expires_at,
            is_active,
        }
    }

    /// Returns true if the link has passed its expiry time as of `now`.
    ///
    /// Takes the observation time as an argument so the expiry decision is
    /// testable and consistent within a single resolution.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|e| now > e)
    }
}

/// Input data for creating a new link.
#[derive(Debug, Clone)]
pub struct NewLink {
    pub code: String,
    pub original_url: String,
    pub owner_id: String,
    pub expires_at: Option<DateTime<Utc>>,
}

//! DTOs for link representations and listing.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::entities::Link;

/// Public representation of a short link.
#[derive(Debug, Serialize)]
pub struct LinkResponse {
    pub id: i64,
    pub code: String,
    pub original_url: String,
    pub owner_id: String,
    pub click_count: i64,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
    pub is_active: bool,
}

impl From<Link> for LinkResponse {
    fn from(link: Link) -> Self {
        Self {
            id: link.id,
            code: link.code,
            original_url: link.original_url,
            owner_id: link.owner_id,
            click_count: link.click_count,
            created_at: link.created_at,
            expires_at: link.expires_at,
            is_active: link.is_active,
        }
    }
}

/// Response for an owner's link listing (newest first).
#[derive(Debug, Serialize)]
pub struct LinkListResponse {
    pub owner_id: String,
    pub total: usize,
    pub links: Vec<LinkResponse>,
}

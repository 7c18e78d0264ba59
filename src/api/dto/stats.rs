//! DTOs for statistics endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::dto::links::LinkResponse;
use crate::application::services::StatsSummary;
use crate::domain::entities::Click;

/// Caps the raw click records returned with per-link stats.
pub const MAX_RECENT_CLICKS: usize = 500;
pub const DEFAULT_RECENT_CLICKS: usize = 50;

/// Query parameters for per-link statistics.
#[derive(Debug, Deserialize, Default)]
pub struct LinkStatsQuery {
    /// Number of recent click records to include (default 50, max 500).
    pub recent: Option<usize>,
    /// Number of records to skip, newest first (default 0).
    pub offset: Option<usize>,
}

impl LinkStatsQuery {
    pub fn recent_limit(&self) -> usize {
        self.recent
            .unwrap_or(DEFAULT_RECENT_CLICKS)
            .min(MAX_RECENT_CLICKS)
    }

    pub fn recent_offset(&self) -> usize {
        self.offset.unwrap_or(0)
    }
}

/// A single recorded click event.
#[derive(Debug, Serialize)]
pub struct ClickResponse {
    pub clicked_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    pub referrer: String,
    pub country: String,
    pub city: String,
    pub device_type: String,
    pub browser: String,
    pub operating_system: String,
}

impl From<Click> for ClickResponse {
    fn from(click: Click) -> Self {
        Self {
            clicked_at: click.clicked_at,
            ip_address: click.ip_address,
            user_agent: click.user_agent,
            referrer: click.referrer,
            country: click.country,
            city: click.city,
            device_type: click.device_type,
            browser: click.browser,
            operating_system: click.operating_system,
        }
    }
}

/// Per-link statistics: the link, aggregate buckets, recent raw clicks.
#[derive(Debug, Serialize)]
pub struct LinkStatsResponse {
    pub link: LinkResponse,
    pub summary: StatsSummary,
    pub recent_clicks: Vec<ClickResponse>,
}

/// Portfolio statistics for one owner.
#[derive(Debug, Serialize)]
pub struct OwnerStatsResponse {
    pub owner_id: String,
    pub total_links: u64,
    pub active_links: u64,
    pub expired_links: u64,
    pub summary: StatsSummary,
}

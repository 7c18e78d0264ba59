//! Click analytics aggregation service.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::domain::entities::{Click, Link};
use crate::domain::repositories::{ClickRepository, LinkRepository};
use crate::error::AppError;
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use serde_json::json;

/// Aggregated click statistics computed over a set of click events.
///
/// Buckets use ordered maps so serialized output is deterministic.
/// `"Unknown"` is a valid bucket key; enrichment guarantees every persisted
/// event carries a concrete value for each dimension, so bucket totals
/// always sum to `total_clicks`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct StatsSummary {
    pub total_clicks: u64,
    pub clicks_by_country: BTreeMap<String, u64>,
    pub clicks_by_device: BTreeMap<String, u64>,
    pub clicks_by_browser: BTreeMap<String, u64>,
    pub clicks_by_os: BTreeMap<String, u64>,
    /// Clicks per UTC calendar day of the event timestamp (`YYYY-MM-DD`).
    pub clicks_by_day: BTreeMap<String, u64>,
    /// Clicks within the sliding 24-hour window ending at the observation
    /// time. Recomputed per call, never cached.
    pub last_24_hours: u64,
}

/// Per-link statistics: the link itself, its aggregates, and the most
/// recent raw click records.
#[derive(Debug, Clone)]
pub struct LinkStats {
    pub link: Link,
    pub summary: StatsSummary,
    pub recent_clicks: Vec<Click>,
}

/// Portfolio-wide statistics for one owner.
#[derive(Debug, Clone)]
pub struct OwnerStats {
    pub total_links: u64,
    pub active_links: u64,
    pub expired_links: u64,
    pub summary: StatsSummary,
}

/// Service computing click analytics for links and owner portfolios.
pub struct StatsService<L, C>
where
    L: LinkRepository + ?Sized,
    C: ClickRepository + ?Sized,
{
    links: Arc<L>,
    clicks: Arc<C>,
}

impl<L, C> StatsService<L, C>
where
    L: LinkRepository + ?Sized,
    C: ClickRepository + ?Sized,
{
    /// Creates a new stats service.
    pub fn new(links: Arc<L>, clicks: Arc<C>) -> Self {
        Self { links, clicks }
    }

    /// Computes statistics for a single link as of `now`.
    ///
    /// `recent_offset` and `recent_limit` page through the raw click records
    /// returned alongside the aggregates, newest first; the aggregates
    /// themselves always cover every event.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the link does not exist.
    pub async fn link_stats(
        &self,
        link_id: i64,
        now: DateTime<Utc>,
        recent_offset: usize,
        recent_limit: usize,
    ) -> Result<LinkStats, AppError> {
        let link = self
            .links
            .find_by_id(link_id)
            .await?
            .ok_or_else(|| AppError::not_found("Link not found", json!({ "id": link_id })))?;

        let events = self.clicks.find_by_link(link_id).await?;
        let summary = summarize(&events, now);
        let recent_clicks = events
            .into_iter()
            .skip(recent_offset)
            .take(recent_limit)
            .collect();

        Ok(LinkStats {
            link,
            summary,
            recent_clicks,
        })
    }

    /// Computes portfolio statistics for an owner as of `now`.
    ///
    /// An owner with no links gets a zeroed summary, not an error.
    pub async fn owner_stats(
        &self,
        owner_id: &str,
        now: DateTime<Utc>,
    ) -> Result<OwnerStats, AppError> {
        let links = self.links.find_by_owner(owner_id).await?;

        let total_links = links.len() as u64;
        let expired_links = links.iter().filter(|l| l.is_expired_at(now)).count() as u64;
        let active_links = links
            .iter()
            .filter(|l| l.is_active && !l.is_expired_at(now))
            .count() as u64;

        let link_ids: Vec<i64> = links.iter().map(|l| l.id).collect();
        let events = if link_ids.is_empty() {
            Vec::new()
        } else {
            self.clicks.find_by_links(&link_ids).await?
        };

        Ok(OwnerStats {
            total_links,
            active_links,
            expired_links,
            summary: summarize(&events, now),
        })
    }
}

/// Folds click events into a summary in a single pass.
pub fn summarize(events: &[Click], now: DateTime<Utc>) -> StatsSummary {
    let mut summary = StatsSummary::default();
    let window = Duration::hours(24);

    for event in events {
        summary.total_clicks += 1;

        bump(&mut summary.clicks_by_country, &event.country);
        bump(&mut summary.clicks_by_device, &event.device_type);
        bump(&mut summary.clicks_by_browser, &event.browser);
        bump(&mut summary.clicks_by_os, &event.operating_system);

        let day = event.clicked_at.format("%Y-%m-%d").to_string();
        bump(&mut summary.clicks_by_day, &day);

        if now.signed_duration_since(event.clicked_at) < window {
            summary.last_24_hours += 1;
        }
    }

    summary
}

fn bump(bucket: &mut BTreeMap<String, u64>, key: &str) {
    *bucket.entry(key.to_string()).or_insert(0) += 1;
}

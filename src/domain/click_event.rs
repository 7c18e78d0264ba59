//! Click event model for asynchronous click tracking.

use chrono::{DateTime, Utc};

/// Raw visit metadata passed from the redirect handler to the background
/// worker via a bounded channel.
///
/// This decouples the HTTP response from enrichment and database writes:
/// the redirect never blocks on analytics durability. The resolver already
/// holds the link record, so the event carries `link_id` directly and the
/// worker needs no code lookup.
///
/// # Usage Flow
///
/// 1. Created by the resolver with request metadata and the resolution time
/// 2. Sent to the channel with `try_send` (a full queue drops the event)
/// 3. Enriched and persisted by [`crate::domain::click_worker::run_click_worker`]
#[derive(Debug, Clone)]
pub struct ClickEvent {
    pub link_id: i64,
    pub clicked_at: DateTime<Utc>,
    pub ip: Option<String>,
    pub user_agent: Option<String>,
    pub referrer: Option<String>,
}

impl ClickEvent {
    /// Creates a new click event.
    ///
    /// All client metadata is optional to handle missing headers gracefully.
    pub fn new(
        link_id: i64,
        clicked_at: DateTime<Utc>,
        ip: Option<String>,
        user_agent: Option<&str>,
        referrer: Option<&str>,
    ) -> Self {
        Self {
            link_id,
            clicked_at,
            ip,
            user_agent: user_agent.map(|s| s.to_string()),
            referrer: referrer.map(|s| s.to_string()),
        }
    }
}

//! Background worker that enriches and persists click events.
//!
//! Enrichment (geolocation, user-agent classification) is best-effort: a
//! failed or unavailable lookup degrades the affected fields, it never
//! drops the event. Persistence failures are logged and swallowed; the
//! user-facing redirect has already completed by the time the worker sees
//! the event.

use std::net::IpAddr;
use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::domain::click_event::ClickEvent;
use crate::domain::entities::NewClick;
use crate::domain::repositories::ClickRepository;
use crate::enrichment::{GeoLookup, UaParser};

/// Bucket value used when enrichment cannot classify a field.
pub const UNKNOWN: &str = "Unknown";

/// Referrer recorded when the request carried no Referer header.
pub const DIRECT_REFERRER: &str = "Direct";

/// Device type assumed when the user agent does not advertise one.
/// Desktop browsers rarely do, so the absence of a device hint means desktop.
pub const DEFAULT_DEVICE: &str = "Desktop";

/// Consumes click events from the channel until all senders are dropped.
pub async fn run_click_worker(
    mut rx: mpsc::Receiver<ClickEvent>,
    clicks: Arc<dyn ClickRepository>,
    geo: Arc<dyn GeoLookup>,
    ua: Arc<dyn UaParser>,
) {
    while let Some(event) = rx.recv().await {
        let link_id = event.link_id;
        let new_click = enrich_event(event, geo.as_ref(), ua.as_ref());

        match clicks.append(new_click).await {
            Ok(click) => debug!(link_id, click_id = click.id, "click event persisted"),
            Err(e) => warn!(link_id, error = %e, "failed to persist click event"),
        }
    }

    debug!("click worker channel closed, shutting down");
}

/// Turns a raw visit into a fully enriched click record.
///
/// Every derived field is given a concrete value here so the persisted
/// event never needs re-interpretation at aggregation time.
pub fn enrich_event(event: ClickEvent, geo: &dyn GeoLookup, ua: &dyn UaParser) -> NewClick {
    let location = event
        .ip
        .as_deref()
        .and_then(|raw| raw.parse::<IpAddr>().ok())
        .and_then(|ip| geo.lookup(ip));

    let (country, city) = match location {
        Some(loc) => (loc.country, loc.city.unwrap_or_else(|| UNKNOWN.to_string())),
        None => (UNKNOWN.to_string(), UNKNOWN.to_string()),
    };

    let agent = event
        .user_agent
        .as_deref()
        .map(|raw| ua.parse(raw))
        .unwrap_or_default();

    NewClick {
        link_id: event.link_id,
        clicked_at: event.clicked_at,
        ip_address: event.ip,
        user_agent: event.user_agent,
        referrer: event
            .referrer
            .unwrap_or_else(|| DIRECT_REFERRER.to_string()),
        country,
        city,
        device_type: agent
            .device_type
            .unwrap_or_else(|| DEFAULT_DEVICE.to_string()),
        browser: agent.browser.unwrap_or_else(|| UNKNOWN.to_string()),
        operating_system: agent.os.unwrap_or_else(|| UNKNOWN.to_string()),
    }
}

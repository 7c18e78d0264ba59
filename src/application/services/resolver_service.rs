//! Redirect resolution service.
//!
//! Implements the resolution state machine: a code maps to exactly one of
//! not-found, inactive, expired, or an active destination. Only the active
//! outcome mutates state (click counter + click event); the expired outcome
//! additionally latches the link inactive so the decision survives clock
//! changes.

use std::sync::Arc;

use crate::domain::click_event::ClickEvent;
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::url_normalizer::ensure_scheme;
use chrono::{DateTime, Utc};
use serde_json::json;
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Request metadata captured for click tracking.
///
/// All fields are optional; a redirect must succeed even for a client that
/// sends nothing identifiable.
#[derive(Debug, Clone, Default)]
pub struct VisitMeta {
    pub ip: Option<String>,
    pub user_agent: Option<String>,
    pub referrer: Option<String>,
}

/// Service resolving short codes to redirect destinations.
pub struct ResolverService<L: LinkRepository + ?Sized> {
    links: Arc<L>,
    click_tx: mpsc::Sender<ClickEvent>,
}

impl<L: LinkRepository + ?Sized> ResolverService<L> {
    /// Creates a new resolver service.
    pub fn new(links: Arc<L>, click_tx: mpsc::Sender<ClickEvent>) -> Self {
        Self { links, click_tx }
    }

    /// Resolves a short code to its destination URL as of `now`.
    ///
    /// On success the click counter has been incremented and a click event
    /// has been queued for the background recorder. Neither the recorder
    /// queue being full nor a failed counter update fails the redirect;
    /// both are logged and the visitor still gets their destination.
    ///
    /// # State machine
    ///
    /// 1. Unknown code → [`AppError::NotFound`]
    /// 2. Deactivated link → [`AppError::Gone`] (`state: "inactive"`)
    /// 3. Expiry passed → deactivate the link, then [`AppError::Gone`]
    ///    (`state: "expired"`). The latch makes the expiry decision
    ///    permanent: later reads take branch 2 regardless of clock.
    /// 4. Otherwise → destination URL, scheme-normalized.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the store lookup itself fails;
    /// store unavailability is never reported as not-found.
    pub async fn resolve(
        &self,
        code: &str,
        meta: VisitMeta,
        now: DateTime<Utc>,
    ) -> Result<String, AppError> {
        let link = self
            .links
            .find_by_code(code)
            .await?
            .ok_or_else(|| AppError::not_found("Short link not found", json!({ "code": code })))?;

        if !link.is_active {
            return Err(AppError::gone(
                "Short link is no longer active",
                json!({ "code": code, "state": "inactive" }),
            ));
        }

        if link.is_expired_at(now) {
            // One-way latch: once expiry is observed, the link is inactive
            // for good, even if the clock later reads earlier.
            if let Err(e) = self.links.deactivate(link.id).await {
                warn!(link_id = link.id, error = %e, "failed to latch expired link inactive");
            }
            return Err(AppError::gone(
                "Short link has expired",
                json!({ "code": code, "state": "expired" }),
            ));
        }

        // The visitor gets their redirect even if the counter update fails.
        if let Err(e) = self.links.increment_clicks(link.id).await {
            warn!(link_id = link.id, error = %e, "failed to increment click count");
        }

        let event = ClickEvent {
            link_id: link.id,
            clicked_at: now,
            ip: meta.ip,
            user_agent: meta.user_agent,
            referrer: meta.referrer,
        };
        if let Err(e) = self.click_tx.try_send(event) {
            warn!(link_id = link.id, error = %e, "click queue full, dropping event");
        } else {
            debug!(link_id = link.id, "click event queued");
        }

        Ok(ensure_scheme(&link.original_url))
    }
}

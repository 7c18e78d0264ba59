//! Shared application state injected into HTTP handlers.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::application::services::{LinkService, ResolverService, StatsService};
use crate::domain::click_event::ClickEvent;
use crate::domain::repositories::{ClickRepository, LinkRepository};

/// Application state shared across all handlers.
///
/// Services are parameterized over trait objects so the full HTTP stack can
/// run against in-memory repositories in integration tests.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService<dyn LinkRepository>>,
    pub resolver_service: Arc<ResolverService<dyn LinkRepository>>,
    pub stats_service: Arc<StatsService<dyn LinkRepository, dyn ClickRepository>>,
    /// Direct repository handle for the health endpoint's connectivity probe.
    pub links: Arc<dyn LinkRepository>,
    pub click_tx: mpsc::Sender<ClickEvent>,
}

impl AppState {
    /// Wires services over the given repositories and click channel.
    pub fn new(
        links: Arc<dyn LinkRepository>,
        clicks: Arc<dyn ClickRepository>,
        click_tx: mpsc::Sender<ClickEvent>,
    ) -> Self {
        Self {
            link_service: Arc::new(LinkService::new(links.clone())),
            resolver_service: Arc::new(ResolverService::new(links.clone(), click_tx.clone())),
            stats_service: Arc::new(StatsService::new(links.clone(), clicks)),
            links,
            click_tx,
        }
    }
}

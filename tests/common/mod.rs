//! Shared test fixtures: deterministic in-memory repositories, enrichment
//! fakes, and state wiring for driving the full service stack without a
//! database.

#![allow(dead_code)]

use std::net::{IpAddr, SocketAddr};
use std::sync::Mutex;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::extract::ConnectInfo;
use chrono::Utc;
use serde_json::json;
use tokio::sync::mpsc;

use linktrace::AppState;
use linktrace::domain::click_event::ClickEvent;
use linktrace::domain::entities::{Click, Link, NewClick, NewLink};
use linktrace::domain::repositories::{ClickRepository, LinkRepository};
use linktrace::enrichment::{GeoInfo, GeoLookup, UaInfo, UaParser};
use linktrace::error::AppError;

/// In-memory link repository with the same atomicity guarantees the
/// Postgres implementation gets from its unique index and atomic UPDATE.
#[derive(Default)]
pub struct InMemoryLinkRepository {
    links: Mutex<Vec<Link>>,
    next_id: AtomicI64,
}

impl InMemoryLinkRepository {
    pub fn new() -> Self {
        Self {
            links: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(1),
        }
    }

    /// Seeds a link verbatim, bypassing the uniqueness check.
    pub fn seed(&self, link: Link) {
        self.links.lock().unwrap().push(link);
    }

    pub fn get(&self, id: i64) -> Option<Link> {
        self.links.lock().unwrap().iter().find(|l| l.id == id).cloned()
    }
}

#[async_trait]
impl LinkRepository for InMemoryLinkRepository {
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError> {
        let mut links = self.links.lock().unwrap();

        // Uniqueness check and insert under one lock, like the unique index.
        if links.iter().any(|l| l.code == new_link.code) {
            return Err(AppError::conflict(
                "Unique constraint violation",
                json!({ "code": new_link.code }),
            ));
        }

        let link = Link::new(
            self.next_id.fetch_add(1, Ordering::SeqCst),
            new_link.code,
            new_link.original_url,
            new_link.owner_id,
            0,
            Utc::now(),
            new_link.expires_at,
            true,
        );
        links.push(link.clone());
        Ok(link)
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError> {
        let links = self.links.lock().unwrap();
        Ok(links.iter().find(|l| l.code == code).cloned())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Link>, AppError> {
        Ok(self.get(id))
    }

    async fn find_by_owner(&self, owner_id: &str) -> Result<Vec<Link>, AppError> {
        let links = self.links.lock().unwrap();
        let mut owned: Vec<Link> = links
            .iter()
            .filter(|l| l.owner_id == owner_id)
            .cloned()
            .collect();
        owned.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(owned)
    }

    async fn code_exists(&self, code: &str) -> Result<bool, AppError> {
        let links = self.links.lock().unwrap();
        Ok(links.iter().any(|l| l.code == code))
    }

    async fn increment_clicks(&self, id: i64) -> Result<i64, AppError> {
        let mut links = self.links.lock().unwrap();
        let link = links
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or_else(|| AppError::not_found("Link not found", json!({ "id": id })))?;
        link.click_count += 1;
        Ok(link.click_count)
    }

    async fn deactivate(&self, id: i64) -> Result<bool, AppError> {
        let mut links = self.links.lock().unwrap();
        match links.iter_mut().find(|l| l.id == id) {
            Some(link) => {
                link.is_active = false;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

/// In-memory append-only click log.
#[derive(Default)]
pub struct InMemoryClickRepository {
    clicks: Mutex<Vec<Click>>,
    next_id: AtomicI64,
}

impl InMemoryClickRepository {
    pub fn new() -> Self {
        Self {
            clicks: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(1),
        }
    }

    pub fn count(&self) -> usize {
        self.clicks.lock().unwrap().len()
    }
}

#[async_trait]
impl ClickRepository for InMemoryClickRepository {
    async fn append(&self, new_click: NewClick) -> Result<Click, AppError> {
        let click = Click::from_new(self.next_id.fetch_add(1, Ordering::SeqCst), new_click);
        self.clicks.lock().unwrap().push(click.clone());
        Ok(click)
    }

    async fn find_by_link(&self, link_id: i64) -> Result<Vec<Click>, AppError> {
        let clicks = self.clicks.lock().unwrap();
        let mut found: Vec<Click> = clicks
            .iter()
            .filter(|c| c.link_id == link_id)
            .cloned()
            .collect();
        found.sort_by(|a, b| b.clicked_at.cmp(&a.clicked_at).then(b.id.cmp(&a.id)));
        Ok(found)
    }

    async fn find_by_links(&self, link_ids: &[i64]) -> Result<Vec<Click>, AppError> {
        let clicks = self.clicks.lock().unwrap();
        let mut found: Vec<Click> = clicks
            .iter()
            .filter(|c| link_ids.contains(&c.link_id))
            .cloned()
            .collect();
        found.sort_by(|a, b| b.clicked_at.cmp(&a.clicked_at).then(b.id.cmp(&a.id)));
        Ok(found)
    }
}

/// Geo lookup with a fixed address book.
///
/// `203.0.113.1` resolves to US/New York, `198.51.100.7` to FR/Paris;
/// everything else is unknown.
pub struct FakeGeo;

impl GeoLookup for FakeGeo {
    fn lookup(&self, ip: IpAddr) -> Option<GeoInfo> {
        match ip.to_string().as_str() {
            "203.0.113.1" => Some(GeoInfo {
                country: "US".to_string(),
                city: Some("New York".to_string()),
            }),
            "198.51.100.7" => Some(GeoInfo {
                country: "FR".to_string(),
                city: Some("Paris".to_string()),
            }),
            _ => None,
        }
    }
}

/// UA parser keyed on a few fixed strings.
pub struct FakeUa;

impl UaParser for FakeUa {
    fn parse(&self, user_agent: &str) -> UaInfo {
        match user_agent {
            "test-desktop" => UaInfo {
                device_type: Some("Desktop".to_string()),
                browser: Some("Firefox".to_string()),
                os: Some("Linux".to_string()),
            },
            "test-mobile" => UaInfo {
                device_type: Some("Mobile".to_string()),
                browser: Some("Chrome".to_string()),
                os: Some("Android".to_string()),
            },
            _ => UaInfo::default(),
        }
    }
}

/// Repositories plus the receiving end of the click channel.
pub struct TestHarness {
    pub state: AppState,
    pub links: Arc<InMemoryLinkRepository>,
    pub clicks: Arc<InMemoryClickRepository>,
    pub click_rx: mpsc::Receiver<ClickEvent>,
}

/// Builds an [`AppState`] over in-memory repositories.
///
/// The click channel's receiver is handed back so tests can either assert
/// on raw events or feed them to a worker themselves.
pub fn test_harness() -> TestHarness {
    let links = Arc::new(InMemoryLinkRepository::new());
    let clicks = Arc::new(InMemoryClickRepository::new());
    let (click_tx, click_rx) = mpsc::channel(1024);

    let state = AppState::new(links.clone(), clicks.clone(), click_tx);

    TestHarness {
        state,
        links,
        clicks,
        click_rx,
    }
}

/// Injects a fixed peer address so handlers using `ConnectInfo` work under
/// `axum_test::TestServer`, which serves without a real socket.
#[derive(Clone)]
pub struct MockConnectInfoLayer;

impl<S> tower::Layer<S> for MockConnectInfoLayer {
    type Service = MockConnectInfoService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MockConnectInfoService { inner }
    }
}

#[derive(Clone)]
pub struct MockConnectInfoService<S> {
    inner: S,
}

impl<S, B> tower::Service<axum::http::Request<B>> for MockConnectInfoService<S>
where
    S: tower::Service<axum::http::Request<B>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    B: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: axum::http::Request<B>) -> Self::Future {
        let addr: SocketAddr = "203.0.113.1:12345".parse().unwrap();
        req.extensions_mut().insert(ConnectInfo(addr));
        self.inner.call(req)
    }
}

//! API route configuration.

use crate::api::handlers::{
    link_list_handler, link_stats_handler, owner_stats_handler, shorten_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// REST API routes mounted under `/api`.
///
/// # Endpoints
///
/// - `POST /shorten`                 - Create a short link
/// - `GET  /links/{owner_id}`        - List an owner's links (newest first)
/// - `GET  /stats/link/{id}`         - Per-link statistics + recent clicks
/// - `GET  /stats/owner/{owner_id}`  - Owner portfolio statistics
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/shorten", post(shorten_handler))
        .route("/links/{owner_id}", get(link_list_handler))
        .route("/stats/link/{id}", get(link_stats_handler))
        .route("/stats/owner/{owner_id}", get(owner_stats_handler))
}

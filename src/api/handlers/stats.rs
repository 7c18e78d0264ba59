//! Handlers for statistics endpoints.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use chrono::Utc;

use crate::api::dto::links::LinkResponse;
use crate::api::dto::stats::{
    ClickResponse, LinkStatsQuery, LinkStatsResponse, OwnerStatsResponse,
};
use crate::error::AppError;
use crate::state::AppState;

/// Returns statistics for one link.
///
/// # Endpoint
///
/// `GET /api/stats/link/{id}?recent=50&offset=0`
///
/// The response carries the full aggregate buckets plus a page of raw click
/// records, newest first (`recent` and `offset` page the records, not the
/// aggregates).
///
/// # Errors
///
/// Returns 404 Not Found if the link doesn't exist.
pub async fn link_stats_handler(
    Path(id): Path<i64>,
    Query(query): Query<LinkStatsQuery>,
    State(state): State<AppState>,
) -> Result<Json<LinkStatsResponse>, AppError> {
    let stats = state
        .stats_service
        .link_stats(id, Utc::now(), query.recent_offset(), query.recent_limit())
        .await?;

    Ok(Json(LinkStatsResponse {
        link: LinkResponse::from(stats.link),
        summary: stats.summary,
        recent_clicks: stats
            .recent_clicks
            .into_iter()
            .map(ClickResponse::from)
            .collect(),
    }))
}

/// Returns portfolio statistics for one owner.
///
/// # Endpoint
///
/// `GET /api/stats/owner/{owner_id}`
///
/// An owner with no links gets zeroed counts and an empty summary.
pub async fn owner_stats_handler(
    Path(owner_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<OwnerStatsResponse>, AppError> {
    let stats = state.stats_service.owner_stats(&owner_id, Utc::now()).await?;

    Ok(Json(OwnerStatsResponse {
        owner_id,
        total_links: stats.total_links,
        active_links: stats.active_links,
        expired_links: stats.expired_links,
        summary: stats.summary,
    }))
}

//! Handler for owner link listing.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::dto::links::{LinkListResponse, LinkResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Lists an owner's links, newest first.
///
/// # Endpoint
///
/// `GET /api/links/{owner_id}`
///
/// An owner with no links gets an empty list, not a 404.
pub async fn link_list_handler(
    Path(owner_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<LinkListResponse>, AppError> {
    let links = state.link_service.list_links(&owner_id).await?;

    let links: Vec<LinkResponse> = links.into_iter().map(LinkResponse::from).collect();

    Ok(Json(LinkListResponse {
        owner_id,
        total: links.len(),
        links,
    }))
}

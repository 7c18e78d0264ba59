//! Handler for link shortening endpoint.

use axum::{Json, extract::State, http::StatusCode};
use validator::Validate;

use crate::api::dto::links::LinkResponse;
use crate::api::dto::shorten::ShortenRequest;
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short link.
///
/// # Endpoint
///
/// `POST /api/shorten`
///
/// # Request Body
///
/// ```json
/// {
///   "owner_id": "user-1",
///   "url": "example.com/some/page",
///   "custom_alias": "my-link",                 // optional
///   "expires_at": "2027-01-01T00:00:00Z"       // optional
/// }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request if the URL or alias is invalid.
/// Returns 409 Conflict if the alias is taken (even by a deactivated link)
/// or code generation is exhausted.
pub async fn shorten_handler(
    State(state): State<AppState>,
    Json(payload): Json<ShortenRequest>,
) -> Result<(StatusCode, Json<LinkResponse>), AppError> {
    payload.validate()?;

    let link = state
        .link_service
        .create_link(
            payload.owner_id,
            payload.url,
            payload.custom_alias,
            payload.expires_at,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(LinkResponse::from(link))))
}

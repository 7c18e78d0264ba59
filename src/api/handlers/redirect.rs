//! Handler for short URL redirect.

use axum::{
    extract::{ConnectInfo, Path, State},
    http::{HeaderMap, header},
    response::{IntoResponse, Redirect},
};
use chrono::Utc;
use std::net::SocketAddr;

use crate::application::services::VisitMeta;
use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Request Flow
///
/// 1. Capture visit metadata (client IP, User-Agent, Referer)
/// 2. Resolve the code through the resolver state machine
/// 3. Return 307 Temporary Redirect to the destination
///
/// The resolver increments the click counter and queues a click event for
/// the background recorder; neither delays the response.
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist.
/// Returns 410 Gone if the link is inactive or expired (distinct messages).
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
    headers: HeaderMap,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
) -> Result<impl IntoResponse, AppError> {
    let meta = VisitMeta {
        ip: Some(addr.ip().to_string()),
        user_agent: header_value(&headers, header::USER_AGENT),
        referrer: header_value(&headers, header::REFERER),
    };

    let destination = state.resolver_service.resolve(&code, meta, Utc::now()).await?;

    Ok(Redirect::temporary(&destination))
}

fn header_value(headers: &HeaderMap, name: header::HeaderName) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
}

//! Repository trait for click event persistence and retrieval.

use crate::domain::entities::{Click, NewClick};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for the append-only click event log.
///
/// Appending an event is independent of the parent link's counter update;
/// the two may be momentarily inconsistent (advisory analytics, not
/// billing-grade accounting).
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgClickRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClickRepository: Send + Sync {
    /// Appends a new click event.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the referenced link does not exist.
    /// Returns [`AppError::Internal`] on database errors.
    async fn append(&self, new_click: NewClick) -> Result<Click, AppError>;

    /// Retrieves all click events for a link, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_link(&self, link_id: i64) -> Result<Vec<Click>, AppError>;

    /// Retrieves all click events for a set of links, newest first.
    ///
    /// Used for owner-portfolio aggregation. An empty id slice yields an
    /// empty result.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_links(&self, link_ids: &[i64]) -> Result<Vec<Click>, AppError>;
}

//! Repository trait for short link data access.

use crate::domain::entities::{Link, NewLink};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for managing short links.
///
/// Owns the uniqueness and counter invariants: `create` is an atomic
/// insert-if-absent on the code, and `increment_clicks` is an atomic
/// store-level increment.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`; deterministic in-memory fakes
///   live in the integration test suite
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Creates a new short link.
    ///
    /// The uniqueness check and the insert are a single logical operation;
    /// a racing writer sees [`AppError::Conflict`], which callers treat as
    /// retryable (pick another code), never fatal.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the code is already taken.
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError>;

    /// Finds a link by its short code.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Link))` if found (regardless of active state)
    /// - `Ok(None)` if not found
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors — store
    /// unavailability is never collapsed into "not found".
    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError>;

    /// Finds a link by its identifier.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_id(&self, id: i64) -> Result<Option<Link>, AppError>;

    /// Lists all links belonging to an owner, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_owner(&self, owner_id: &str) -> Result<Vec<Link>, AppError>;

    /// Returns true if any link (active or not) is bound to `code`.
    ///
    /// Used for custom alias validation, which must reject reuse of retired
    /// codes.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn code_exists(&self, code: &str) -> Result<bool, AppError>;

    /// Atomically increments the click counter and returns the new value.
    ///
    /// Must never be implemented as a read-modify-write of a cached value;
    /// concurrent redirects to the same code are expected.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the link does not exist.
    /// Returns [`AppError::Internal`] on database errors.
    async fn increment_clicks(&self, id: i64) -> Result<i64, AppError>;

    /// Deactivates a link (one-way latch; never reactivated by the core).
    ///
    /// Idempotent: concurrent callers converge on `is_active = false`
    /// regardless of write order.
    ///
    /// Returns `Ok(true)` if the link was found, `Ok(false)` otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn deactivate(&self, id: i64) -> Result<bool, AppError>;

    /// Cheap connectivity probe used by the health endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the store is unreachable.
    async fn ping(&self) -> Result<(), AppError>;
}

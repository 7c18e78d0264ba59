//! PostgreSQL repository implementations.
//!
//! # Repositories
//!
//! - [`PgLinkRepository`] - Link storage, uniqueness, counters
//! - [`PgClickRepository`] - Append-only click event log

pub mod pg_click_repository;
pub mod pg_link_repository;

pub use pg_click_repository::PgClickRepository;
pub use pg_link_repository::PgLinkRepository;

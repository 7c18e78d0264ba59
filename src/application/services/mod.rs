//! Application services implementing business use cases.
//!
//! Services are generic over the repository traits (`?Sized`, so they can
//! be instantiated with trait objects) and orchestrate domain logic without
//! knowing about HTTP or SQL.

pub mod link_service;
pub mod resolver_service;
pub mod stats_service;

pub use link_service::LinkService;
pub use resolver_service::{ResolverService, VisitMeta};
pub use stats_service::{LinkStats, OwnerStats, StatsService, StatsSummary};

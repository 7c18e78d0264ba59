//! HTTP request handlers.

pub mod health;
pub mod links;
pub mod redirect;
pub mod shorten;
pub mod stats;

pub use health::health_handler;
pub use links::link_list_handler;
pub use redirect::redirect_handler;
pub use shorten::shorten_handler;
pub use stats::{link_stats_handler, owner_stats_handler};

//! Click enrichment capabilities: geolocation and user-agent classification.
//!
//! Both capabilities are expressed as object-safe traits so the background
//! worker can be wired with real lookups in production and deterministic
//! fakes in tests. Lookups are infallible at the call site; a failed or
//! unavailable lookup simply yields no data.

pub mod geoip;
pub mod user_agent;

pub use geoip::{GeoLookup, MaxMindGeo, NoopGeo};
pub use user_agent::{HeuristicUaParser, UaParser};

/// Geographic attribution for an IP address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeoInfo {
    /// ISO country code or full country name, whichever the database yields.
    pub country: String,
    pub city: Option<String>,
}

/// Classification extracted from a User-Agent string.
///
/// `None` fields mean the parser could not classify; the worker substitutes
/// its bucket defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UaInfo {
    pub device_type: Option<String>,
    pub browser: Option<String>,
    pub os: Option<String>,
}

//! IP geolocation backed by MaxMind GeoLite2/GeoIP2 databases.

use std::net::IpAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use maxminddb::{geoip2, Mmap, Reader};
use tracing::info;

use super::GeoInfo;

/// IP-to-location lookup capability.
///
/// Implementations must never block for long; the click worker calls this
/// inline for every event.
pub trait GeoLookup: Send + Sync {
    /// Resolves an IP to a location, or `None` when the address is unknown.
    fn lookup(&self, ip: IpAddr) -> Option<GeoInfo>;
}

/// GeoIP lookup over a memory-mapped MaxMind City database.
pub struct MaxMindGeo {
    reader: Arc<Reader<Mmap>>,
}

impl MaxMindGeo {
    /// Opens a GeoLite2-City or GeoIP2-City `.mmdb` file.
    pub fn open(path: &str) -> Result<Self> {
        let reader = unsafe { Reader::open_mmap(path) }
            .with_context(|| format!("Failed to open GeoIP database at {path}"))?;
        info!(path, "geoip database loaded");
        Ok(Self {
            reader: Arc::new(reader),
        })
    }
}

impl GeoLookup for MaxMindGeo {
    fn lookup(&self, ip: IpAddr) -> Option<GeoInfo> {
        let result = self.reader.lookup(ip).ok()?;

        // City database is a superset of Country data; fall back to the
        // country-only record when no city record decodes.
        if let Ok(Some(city)) = result.decode::<geoip2::City>() {
            let country = city
                .country
                .iso_code
                .or(city.country.names.english)
                .map(|s| s.to_string())?;
            return Some(GeoInfo {
                country,
                city: city.city.names.english.map(|s| s.to_string()),
            });
        }

        if let Ok(Some(country)) = result.decode::<geoip2::Country>() {
            let country = country
                .country
                .iso_code
                .or(country.country.names.english)
                .map(|s| s.to_string())?;
            return Some(GeoInfo {
                country,
                city: None,
            });
        }

        None
    }
}

impl Clone for MaxMindGeo {
    fn clone(&self) -> Self {
        Self {
            reader: self.reader.clone(),
        }
    }
}

/// Lookup used when no GeoIP database is configured. Every click records
/// an unknown location.
#[derive(Debug, Clone, Default)]
pub struct NoopGeo;

impl GeoLookup for NoopGeo {
    fn lookup(&self, _ip: IpAddr) -> Option<GeoInfo> {
        None
    }
}

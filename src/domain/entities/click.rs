//! Click entity representing a single enriched redirect event.

use chrono::{DateTime, Utc};

/// A click event recorded for each successful redirect.
///
/// Created exactly once per resolved visit, never mutated. Raw request
/// metadata (`ip_address`, `user_agent`) may be absent; derived fields are
/// always present and degrade to `"Unknown"` when enrichment could not
/// classify them (`"Direct"` for a missing referrer, `"Desktop"` for an
/// unadvertised device type).
#[derive(Debug, Clone)]
pub struct Click {
    pub id: i64,
    pub link_id: i64,
    pub clicked_at: DateTime<Utc>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub referrer: String,
    pub country: String,
    pub city: String,
    pub device_type: String,
    pub browser: String,
    pub operating_system: String,
}

impl Click {
    /// Completes an enriched click with its assigned identifier.
    pub fn from_new(id: i64, new_click: NewClick) -> Self {
        Self {
            id,
            link_id: new_click.link_id,
            clicked_at: new_click.clicked_at,
            ip_address: new_click.ip_address,
            user_agent: new_click.user_agent,
            referrer: new_click.referrer,
            country: new_click.country,
            city: new_click.city,
            device_type: new_click.device_type,
            browser: new_click.browser,
            operating_system: new_click.operating_system,
        }
    }
}

/// Input data for appending a new click event.
///
/// Fully enriched before persistence; the repository stores it verbatim.
#[derive(Debug, Clone)]
pub struct NewClick {
    pub link_id: i64,
    pub clicked_at: DateTime<Utc>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub referrer: String,
    pub country: String,
    pub city: String,
    pub device_type: String,
    pub browser: String,
    pub operating_system: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_click_carries_enriched_fields() {
        let new_click = NewClick {
            link_id: 42,
            clicked_at: Utc::now(),
            ip_address: Some("203.0.113.9".to_string()),
            user_agent: Some("Mozilla/5.0".to_string()),
            referrer: "https://news.ycombinator.com/".to_string(),
            country: "US".to_string(),
            city: "Portland".to_string(),
            device_type: "Desktop".to_string(),
            browser: "Firefox".to_string(),
            operating_system: "Linux".to_string(),
        };

        assert_eq!(new_click.link_id, 42);
        assert_eq!(new_click.country, "US");
        assert_eq!(new_click.device_type, "Desktop");
    }

    #[test]
    fn test_new_click_degraded_fields() {
        let new_click = NewClick {
            link_id: 1,
            clicked_at: Utc::now(),
            ip_address: None,
            user_agent: None,
            referrer: "Direct".to_string(),
            country: "Unknown".to_string(),
            city: "Unknown".to_string(),
            device_type: "Desktop".to_string(),
            browser: "Unknown".to_string(),
            operating_system: "Unknown".to_string(),
        };

        assert!(new_click.ip_address.is_none());
        assert_eq!(new_click.referrer, "Direct");
        assert_eq!(new_click.country, "Unknown");
    }
}

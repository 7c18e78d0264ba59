//! URL normalization and sanitization utilities.
//!
//! Ensures consistent URL representation: a default scheme is prepended to
//! scheme-less input, hostnames are lowercased, fragments and default ports
//! are removed.

use url::Url;

/// Errors that can occur during URL normalization.
#[derive(Debug, thiserror::Error)]
pub enum UrlNormalizationError {
    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,

    #[error("Failed to normalize URL: {0}")]
    NormalizationFailed(String),
}

/// Prepends the default scheme to a scheme-less URL.
///
/// Input that already starts with `http://` or `https://` is returned
/// unchanged, which makes the operation idempotent: applying it twice yields
/// the same result as applying it once. Used both at creation time (before
/// full normalization) and at resolution time, so scheme-less destinations
/// stored by older writers still redirect correctly.
pub fn ensure_scheme(input: &str) -> String {
    if has_http_scheme(input) {
        input.to_string()
    } else {
        format!("https://{input}")
    }
}

/// True when the input starts with an explicit `http://` or `https://`
/// scheme. Schemes are case-insensitive per RFC 3986, so `HTTP://` counts.
fn has_http_scheme(input: &str) -> bool {
    let head: String = input.chars().take(8).map(|c| c.to_ascii_lowercase()).collect();
    head.starts_with("http://") || head.starts_with("https://")
}

/// Normalizes a URL to a canonical form.
///
/// # Normalization Rules
///
/// 1. **Scheme**: prepended (`https://`) when missing; only HTTP and HTTPS
///    are accepted afterwards
/// 2. **Hostname**: converted to lowercase
/// 3. **Default ports**: removed (80 for HTTP, 443 for HTTPS)
/// 4. **Fragments**: removed (e.g., `#section`)
/// 5. **Query parameters**: preserved as-is
/// 6. **Path**: preserved with case sensitivity
///
/// # Security
///
/// Rejects dangerous protocols like `javascript:`, `data:`, `file:`, etc.
///
/// # Errors
///
/// Returns [`UrlNormalizationError::InvalidFormat`] for malformed URLs.
/// Returns [`UrlNormalizationError::UnsupportedProtocol`] for non-HTTP(S) schemes.
pub fn normalize_url(input: &str) -> Result<String, UrlNormalizationError> {
    if input.trim().is_empty() {
        return Err(UrlNormalizationError::InvalidFormat(
            "empty input".to_string(),
        ));
    }

    // Explicit non-HTTP schemes are rejected, not silently rewritten.
    if input.contains("://") && !has_http_scheme(input) {
        return Err(UrlNormalizationError::UnsupportedProtocol);
    }
    if input.split_once(':').is_some_and(|(scheme, _)| {
        matches!(
            scheme.to_ascii_lowercase().as_str(),
            "javascript" | "data" | "mailto"
        )
    }) {
        return Err(UrlNormalizationError::UnsupportedProtocol);
    }

    let mut url = Url::parse(&ensure_scheme(input))
        .map_err(|e| UrlNormalizationError::InvalidFormat(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        _ => return Err(UrlNormalizationError::UnsupportedProtocol),
    }

    if let Some(host) = url.host_str() {
        let host_lowercase = host.to_ascii_lowercase();
        url.set_host(Some(&host_lowercase)).map_err(|_| {
            UrlNormalizationError::NormalizationFailed("Failed to set normalized host".to_string())
        })?;
    } else {
        return Err(UrlNormalizationError::InvalidFormat(
            "missing host".to_string(),
        ));
    }

    url.set_fragment(None);

    let is_default_port = matches!(
        (url.scheme(), url.port()),
        ("http", Some(80)) | ("https", Some(443))
    );
    if is_default_port {
        url.set_port(None).map_err(|_| {
            UrlNormalizationError::NormalizationFailed("Failed to remove default port".to_string())
        })?;
    }

    Ok(url.to_string())
}

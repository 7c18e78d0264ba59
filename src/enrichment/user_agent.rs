//! User-agent classification.
//!
//! Token-based matching over the raw header, covering the browsers, OSes
//! and device classes that show up in real traffic. Match order matters:
//! most UA strings contain several engine tokens (`Mozilla`, `AppleWebKit`,
//! `Safari`) and the distinguishing token must be checked first.

use super::UaInfo;

/// User-agent classification capability.
pub trait UaParser: Send + Sync {
    fn parse(&self, user_agent: &str) -> UaInfo;
}

/// Token-matching classifier over the raw User-Agent header.
#[derive(Debug, Clone, Default)]
pub struct HeuristicUaParser;

impl UaParser for HeuristicUaParser {
    fn parse(&self, user_agent: &str) -> UaInfo {
        let ua = user_agent.to_ascii_lowercase();
        UaInfo {
            device_type: detect_device(&ua),
            browser: detect_browser(&ua),
            os: detect_os(&ua),
        }
    }
}

fn detect_device(ua: &str) -> Option<String> {
    // Tablets advertise "mobile" too on some platforms, so check them first.
    if ua.contains("ipad") || ua.contains("tablet") || (ua.contains("android") && !ua.contains("mobile")) {
        Some("Tablet".to_string())
    } else if ua.contains("mobile") || ua.contains("iphone") || ua.contains("android") {
        Some("Mobile".to_string())
    } else if ua.contains("bot") || ua.contains("crawler") || ua.contains("spider") {
        Some("Bot".to_string())
    } else if ua.contains("mozilla") || ua.contains("opera") {
        Some("Desktop".to_string())
    } else {
        None
    }
}

fn detect_browser(ua: &str) -> Option<String> {
    let browser = if ua.contains("edg/") || ua.contains("edge/") {
        "Edge"
    } else if ua.contains("opr/") || ua.contains("opera") {
        "Opera"
    } else if ua.contains("samsungbrowser") {
        "Samsung Internet"
    } else if ua.contains("firefox/") {
        "Firefox"
    } else if ua.contains("chrome/") || ua.contains("crios/") {
        "Chrome"
    } else if ua.contains("safari/") {
        "Safari"
    } else if ua.contains("curl/") {
        "curl"
    } else if ua.contains("wget/") {
        "Wget"
    } else {
        return None;
    };
    Some(browser.to_string())
}

fn detect_os(ua: &str) -> Option<String> {
    let os = if ua.contains("windows") {
        "Windows"
    } else if ua.contains("android") {
        "Android"
    } else if ua.contains("iphone") || ua.contains("ipad") || ua.contains("ios") {
        "iOS"
    } else if ua.contains("mac os") || ua.contains("macintosh") {
        "macOS"
    } else if ua.contains("cros") {
        "Chrome OS"
    } else if ua.contains("linux") {
        "Linux"
    } else {
        return None;
    };
    Some(os.to_string())
}

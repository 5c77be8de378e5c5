//! Canonical backend routes.
//!
//! Every URL the client calls is built through [`Endpoints`] so the route
//! names live in exactly one place.
//!
//! ```text
//! GET  {base}/health   ← connectivity probe
//! POST {base}/chat     ← one conversation turn
//! ```

/// Central authority for backend URLs.
///
/// # Examples
///
/// ```
/// use pitbox_sdk::Endpoints;
///
/// assert_eq!(
///     Endpoints::health("http://localhost:8765"),
///     "http://localhost:8765/health",
/// );
/// assert_eq!(
///     Endpoints::chat("http://localhost:8765/"),
///     "http://localhost:8765/chat",
/// );
/// ```
pub struct Endpoints;

impl Endpoints {
    /// Path of the health probe.
    pub const HEALTH: &'static str = "/health";

    /// Path of the chat endpoint.
    pub const CHAT: &'static str = "/chat";

    /// Absolute URL of the health probe.
    pub fn health(base_url: &str) -> String {
        join(base_url, Self::HEALTH)
    }

    /// Absolute URL of the chat endpoint.
    pub fn chat(base_url: &str) -> String {
        join(base_url, Self::CHAT)
    }
}

fn join(base_url: &str, path: &str) -> String {
    format!("{}{path}", base_url.trim_end_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_for_bare_base() {
        assert_eq!(Endpoints::health("http://h:1"), "http://h:1/health");
        assert_eq!(Endpoints::chat("http://h:1"), "http://h:1/chat");
    }

    #[test]
    fn base_with_path_prefix() {
        assert_eq!(
            Endpoints::chat("http://h:1/api/"),
            "http://h:1/api/chat"
        );
    }
}

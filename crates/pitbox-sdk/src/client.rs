//! Low-level HTTP client for the assistant backend.
//!
//! [`PitBoxClient`] performs exactly one request per call and reports
//! every failure as an [`SdkError`].  Higher layers decide how failures
//! are surfaced.

use std::time::Duration;

use pitbox_models::{ChatRequest, ChatResponse, MessageText};
use tracing::debug;

use crate::config::ClientConfig;
use crate::endpoints::Endpoints;
use crate::error::SdkError;

/// HTTP access to the `/health` and `/chat` endpoints.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct PitBoxClient {
    http: reqwest::Client,
    base_url: String,
    health_timeout: Duration,
}

impl PitBoxClient {
    /// Build a client for the configured backend.
    ///
    /// Fails with [`SdkError::Config`] if the base URL does not parse.
    pub fn new(config: &ClientConfig) -> Result<Self, SdkError> {
        reqwest::Url::parse(&config.base_url)
            .map_err(|e| SdkError::Config(format!("invalid base URL {:?}: {e}", config.base_url)))?;

        Ok(Self {
            http: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            health_timeout: config.health_timeout,
        })
    }

    /// `GET /health`, bounded by the configured probe timeout.
    ///
    /// Succeeds on any 2xx status; the body is not read.
    pub async fn health(&self) -> Result<(), SdkError> {
        let res = self
            .http
            .get(Endpoints::health(&self.base_url))
            .timeout(self.health_timeout)
            .send()
            .await?;

        let status = res.status();
        debug!(%status, "health probe answered");
        if !status.is_success() {
            return Err(SdkError::Status(status));
        }
        Ok(())
    }

    /// `POST /chat` with `{"message": text}`.
    ///
    /// No timeout is set beyond the transport defaults.
    pub async fn chat(&self, text: &MessageText) -> Result<ChatResponse, SdkError> {
        let res = self
            .http
            .post(Endpoints::chat(&self.base_url))
            .json(&ChatRequest::new(text))
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            return Err(SdkError::Status(status));
        }

        let bytes = res.bytes().await?;
        let body: ChatResponse = serde_json::from_slice(&bytes)?;
        Ok(body)
    }

    /// The backend base URL, without trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{serve, unreachable_url};
    use axum::http::StatusCode;
    use axum::routing::{get, post};
    use axum::{Json, Router};

    #[test]
    fn rejects_invalid_base_url() {
        let err = PitBoxClient::new(&ClientConfig::new("not a url")).unwrap_err();
        assert!(matches!(err, SdkError::Config(_)));
    }

    #[test]
    fn keeps_base_url_without_trailing_slash() {
        let client = PitBoxClient::new(&ClientConfig::new("http://localhost:8765/")).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8765");
    }

    #[tokio::test]
    async fn chat_posts_message_and_reads_response() {
        let app = Router::new().route(
            "/chat",
            post(|Json(req): Json<ChatRequest>| async move {
                Json(ChatResponse {
                    response: format!("echo: {}", req.message),
                })
            }),
        );
        let base = serve(app).await;
        let client = PitBoxClient::new(&ClientConfig::new(base)).unwrap();

        let text = MessageText::parse("status?").unwrap();
        let body = client.chat(&text).await.unwrap();
        assert_eq!(body.response, "echo: status?");
    }

    #[tokio::test]
    async fn chat_maps_error_status() {
        let app = Router::new().route("/chat", post(|| async { StatusCode::SERVICE_UNAVAILABLE }));
        let base = serve(app).await;
        let client = PitBoxClient::new(&ClientConfig::new(base)).unwrap();

        let text = MessageText::parse("status?").unwrap();
        let err = client.chat(&text).await.unwrap_err();
        assert!(matches!(err, SdkError::Status(s) if s == reqwest::StatusCode::SERVICE_UNAVAILABLE));
    }

    #[tokio::test]
    async fn chat_rejects_malformed_body() {
        let app = Router::new().route("/chat", post(|| async { "definitely not json" }));
        let base = serve(app).await;
        let client = PitBoxClient::new(&ClientConfig::new(base)).unwrap();

        let text = MessageText::parse("status?").unwrap();
        let err = client.chat(&text).await.unwrap_err();
        assert!(matches!(err, SdkError::Serialization(_)));
    }

    #[tokio::test]
    async fn health_reports_transport_errors() {
        let client = PitBoxClient::new(&ClientConfig::new(unreachable_url().await)).unwrap();
        let err = client.health().await.unwrap_err();
        assert!(matches!(err, SdkError::Http(_)));
    }

    #[tokio::test]
    async fn health_accepts_any_success_status() {
        let app = Router::new().route("/health", get(|| async { StatusCode::NO_CONTENT }));
        let base = serve(app).await;
        let client = PitBoxClient::new(&ClientConfig::new(base)).unwrap();
        assert!(client.health().await.is_ok());
    }
}

//! HTTP surface of the mock backend.
//!
//! | Route          | Response                                           |
//! |----------------|----------------------------------------------------|
//! | `GET /`        | [`ServiceInfo`]                                    |
//! | `GET /health`  | `{"status":"healthy","service":"pitbox-ai-api"}`   |
//! | `POST /chat`   | canned race-engineer reply picked by keyword       |

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Json, State};
use axum::routing::{get, post};
use axum::Router;
use pitbox_models::{ChatRequest, ChatResponse, HealthResponse, MessageText, ServiceInfo};
use tracing::info;

use crate::error::ApiError;

const SERVICE_NAME: &str = "pitbox-ai-api";

/// State shared across handlers.
#[derive(Debug, Clone, Default)]
pub struct MockState {
    /// Delay applied before every `/chat` answer.
    pub latency: Duration,
}

/// Build the mock router.
pub fn router(state: MockState) -> Router {
    Router::new()
        .route("/", get(service_info))
        .route("/health", get(health))
        .route("/chat", post(chat))
        .with_state(Arc::new(state))
}

/// `GET /` — describe the service.
async fn service_info() -> Json<ServiceInfo> {
    let endpoints = BTreeMap::from([
        ("/chat".to_string(), "POST - Send a message to the NASCAR AI agent".to_string()),
        ("/health".to_string(), "GET - Check API health status".to_string()),
    ]);

    Json(ServiceInfo {
        name: "NASCAR Pit Box AI API (mock)".to_string(),
        status: "running".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        endpoints,
    })
}

/// `GET /health`.
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: SERVICE_NAME.to_string(),
    })
}

/// `POST /chat` — answer one message.
async fn chat(
    State(state): State<Arc<MockState>>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    let text = MessageText::parse(req.message)?;
    info!(chars = text.as_str().len(), "chat request received");

    if !state.latency.is_zero() {
        tokio::time::sleep(state.latency).await;
    }

    Ok(Json(ChatResponse {
        response: canned_reply(&text),
    }))
}

/// Pick a reply by the first matching keyword.
fn canned_reply(text: &MessageText) -> String {
    let lower = text.as_str().to_lowercase();
    let has = |words: &[&str]| words.iter().any(|w| lower.contains(w));

    if has(&["lead", "winning", "p1"]) {
        "**Driver A** is leading, 1.2 seconds clear of the field.".to_string()
    } else if has(&["pit", "box"]) {
        "Pit window opens in 5 laps. Recommend:\n- four tires\n- full fuel".to_string()
    } else if has(&["tire", "tyre"]) {
        "Tire wear is at 62%. Expect about two tenths of falloff per lap.".to_string()
    } else if has(&["fuel"]) {
        "Fuel is good to the end of the stage with a 1.5 lap margin.".to_string()
    } else {
        format!("Copy that: \"{}\". Standing by for more data.", text.as_str().trim())
    }
}

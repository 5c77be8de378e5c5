//! One-shot backend connectivity probe.
//!
//! [`ConnectivityMonitor`] calls `GET /health` once and publishes the
//! resulting [`ConnectivityState`] on a watch channel.  The reading is
//! advisory: nothing in the dispatch path consults it.
//!
//! There is no periodic re-check.  A caller wanting one would build a new
//! monitor per probe.

use pitbox_models::ConnectivityState;
use tokio::sync::{watch, OnceCell};
use tracing::{info, warn};

use crate::client::PitBoxClient;

/// Probes the backend health endpoint at most once.
#[derive(Debug)]
pub struct ConnectivityMonitor {
    client: PitBoxClient,
    state: watch::Sender<ConnectivityState>,
    probe: OnceCell<ConnectivityState>,
}

impl ConnectivityMonitor {
    /// Create a monitor in the [`ConnectivityState::Checking`] state.
    pub fn new(client: PitBoxClient) -> Self {
        let (state, _) = watch::channel(ConnectivityState::Checking);
        Self {
            client,
            state,
            probe: OnceCell::new(),
        }
    }

    /// Run the health probe and return its outcome.
    ///
    /// Only the first call performs a request; later calls (including
    /// concurrent ones) return the same result.  Every failure mode
    /// (non-2xx, refused connection, DNS, timeout) yields
    /// [`ConnectivityState::Offline`].
    pub async fn check(&self) -> ConnectivityState {
        *self
            .probe
            .get_or_init(|| async {
                let outcome = self.client.health().await;
                match &outcome {
                    Ok(()) => info!(backend = %self.client.base_url(), "backend online"),
                    Err(e) => warn!(backend = %self.client.base_url(), error = %e, "backend offline"),
                }
                let state = ConnectivityState::from_probe(outcome.is_ok());
                self.state.send_replace(state);
                state
            })
            .await
    }

    /// The latest published state.
    pub fn state(&self) -> ConnectivityState {
        *self.state.borrow()
    }

    /// Receive every state change (at most one after `Checking`).
    pub fn subscribe(&self) -> watch::Receiver<ConnectivityState> {
        self.state.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use axum::http::StatusCode;
    use axum::routing::get;
    use axum::Router;

    use super::*;
    use crate::config::ClientConfig;
    use crate::test_support::{serve, unreachable_url};

    async fn monitor_for(app: Router) -> ConnectivityMonitor {
        let base = serve(app).await;
        ConnectivityMonitor::new(PitBoxClient::new(&ClientConfig::new(base)).unwrap())
    }

    #[tokio::test]
    async fn ok_status_is_online() {
        let monitor = monitor_for(Router::new().route("/health", get(|| async { StatusCode::OK }))).await;
        assert_eq!(monitor.state(), ConnectivityState::Checking);
        assert_eq!(monitor.check().await, ConnectivityState::Online);
        assert_eq!(monitor.state(), ConnectivityState::Online);
    }

    #[tokio::test]
    async fn server_error_is_offline() {
        let monitor = monitor_for(
            Router::new().route("/health", get(|| async { StatusCode::INTERNAL_SERVER_ERROR })),
        )
        .await;
        assert_eq!(monitor.check().await, ConnectivityState::Offline);
    }

    #[tokio::test]
    async fn missing_route_is_offline() {
        let monitor = monitor_for(Router::new()).await;
        assert_eq!(monitor.check().await, ConnectivityState::Offline);
    }

    #[tokio::test]
    async fn transport_error_is_offline() {
        let client = PitBoxClient::new(&ClientConfig::new(unreachable_url().await)).unwrap();
        let monitor = ConnectivityMonitor::new(client);
        assert_eq!(monitor.check().await, ConnectivityState::Offline);
    }

    #[tokio::test]
    async fn slow_backend_times_out_offline() {
        let app = Router::new().route(
            "/health",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(2)).await;
                StatusCode::OK
            }),
        );
        let base = serve(app).await;
        let config = ClientConfig::new(base).with_health_timeout(Duration::from_millis(100));
        let monitor = ConnectivityMonitor::new(PitBoxClient::new(&config).unwrap());
        assert_eq!(monitor.check().await, ConnectivityState::Offline);
    }

    #[tokio::test]
    async fn probes_only_once() {
        use std::sync::atomic::{AtomicUsize, Ordering};
        use std::sync::Arc;

        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();
        let app = Router::new().route(
            "/health",
            get(move || {
                let counter = counter.clone();
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    StatusCode::OK
                }
            }),
        );
        let monitor = monitor_for(app).await;

        assert_eq!(monitor.check().await, ConnectivityState::Online);
        assert_eq!(monitor.check().await, ConnectivityState::Online);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn subscribers_see_the_result() {
        let monitor = monitor_for(Router::new().route("/health", get(|| async { StatusCode::OK }))).await;
        let mut rx = monitor.subscribe();
        assert_eq!(*rx.borrow(), ConnectivityState::Checking);

        monitor.check().await;
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow_and_update(), ConnectivityState::Online);
    }
}

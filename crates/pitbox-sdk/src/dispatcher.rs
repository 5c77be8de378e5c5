//! Message dispatch: one user message in, one assistant turn out.
//!
//! The [`Dispatch`] trait is the seam between the session controller and
//! the transport.  [`MessageDispatcher`] is the HTTP implementation; tests
//! plug in scripted dispatchers.

use std::future::Future;

use pitbox_models::{MessageText, NewTurn};
use tracing::{debug, warn};

use crate::client::PitBoxClient;

/// Resolves one user message into exactly one assistant turn.
///
/// Implementations must not fail: transport and protocol errors are
/// turned into a [`NewTurn::failure`].
pub trait Dispatch: Send + Sync + 'static {
    /// Send `text` and produce the assistant turn that answers it.
    fn dispatch(&self, text: MessageText) -> impl Future<Output = NewTurn> + Send;
}

/// User-facing text of a failed exchange.
pub fn remediation_message(base_url: &str) -> String {
    format!(
        "Sorry, I encountered an error. Please make sure the backend server is running at {base_url}."
    )
}

/// Dispatches messages to `POST /chat`.
#[derive(Debug, Clone)]
pub struct MessageDispatcher {
    client: PitBoxClient,
    failure_message: String,
}

impl MessageDispatcher {
    /// Create a dispatcher sending through `client`.
    pub fn new(client: PitBoxClient) -> Self {
        let failure_message = remediation_message(client.base_url());
        Self {
            client,
            failure_message,
        }
    }

    /// Make a single `/chat` attempt for `text`.
    ///
    /// A 2xx answer carrying a string `response` becomes an assistant
    /// turn; anything else becomes a failed turn with the remediation
    /// message.
    pub async fn send(&self, text: MessageText) -> NewTurn {
        match self.client.chat(&text).await {
            Ok(body) => {
                debug!(chars = body.response.len(), "assistant reply received");
                NewTurn::assistant(body.response)
            }
            Err(e) => {
                warn!(backend = %self.client.base_url(), error = %e, "chat request failed");
                NewTurn::failure(self.failure_message.clone())
            }
        }
    }

    /// The text used for failed turns.
    pub fn failure_message(&self) -> &str {
        &self.failure_message
    }
}

impl Dispatch for MessageDispatcher {
    fn dispatch(&self, text: MessageText) -> impl Future<Output = NewTurn> + Send {
        self.send(text)
    }
}

//! # Pit Box SDK
//!
//! Chat session and connectivity controller for the **Pit Box AI**
//! assistant.
//!
//! The SDK provides:
//!
//! * [`PitBoxClient`]: HTTP access to the backend `/health` and `/chat`
//!   endpoints.
//! * [`ConnectivityMonitor`]: one-shot health probe publishing a
//!   [`ConnectivityState`](pitbox_models::ConnectivityState).
//! * [`TranscriptStore`]: append-only, id-stamped conversation log.
//! * [`MessageDispatcher`]: turns one user message into exactly one
//!   assistant turn, success or failure.
//! * [`SessionController`]: the session state machine, driven directly or
//!   through an [`Intent`] channel.
//! * [`SdkError`]: error type for low-level backend calls.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use pitbox_sdk::{ClientConfig, MessageDispatcher, PitBoxClient, SessionController};
//!
//! # async fn run() -> Result<(), pitbox_sdk::SdkError> {
//! let client = PitBoxClient::new(&ClientConfig::from_env())?;
//! let mut session = SessionController::new(MessageDispatcher::new(client));
//!
//! session.start();
//! if let Ok(reply) = session.send("who is leading?").await {
//!     println!("{}", reply.content);
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod connectivity;
pub mod dispatcher;
pub mod endpoints;
pub mod error;
pub mod session;
pub mod transcript;

#[cfg(test)]
mod test_support;

pub use client::PitBoxClient;
pub use config::ClientConfig;
pub use connectivity::ConnectivityMonitor;
pub use dispatcher::{remediation_message, Dispatch, MessageDispatcher};
pub use endpoints::Endpoints;
pub use error::SdkError;
pub use session::{Intent, Rejected, SessionController, CANCELLED_MESSAGE, WELCOME_MESSAGE};
pub use transcript::TranscriptStore;

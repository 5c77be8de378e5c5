//! Session controller.
//!
//! [`SessionController`] owns the conversation: its phase, the transcript
//! and the `pending` flag.  It turns presentation intents into transcript
//! mutations and publishes a [`SessionSnapshot`] after each change.
//!
//! # State machine
//!
//! ```text
//! Idle ──start──▶ Active(pending=false) ──send──▶ Active(pending=true)
//!                        ▲                                │
//!                        └────────── reply / cancel ──────┘
//! ```
//!
//! At most one exchange is in flight; a send while pending is rejected
//! without touching the transcript.  Every exchange ends with exactly one
//! assistant turn, including one whose `send` future is dropped and one
//! whose controller is dropped mid-flight.

use std::sync::Arc;

use futures::future::BoxFuture;
use futures::FutureExt;
use pitbox_models::{MessageText, NewTurn, SessionId, SessionPhase, SessionSnapshot, Turn};
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};

use crate::dispatcher::Dispatch;
use crate::transcript::TranscriptStore;

/// Assistant text appended when the session starts.
pub const WELCOME_MESSAGE: &str = "Welcome to Pit Box AI! I'm your NASCAR intelligence assistant. \
Ask me anything about racing, strategies, drivers, teams, or race analytics!";

/// Failed assistant text appended when an exchange is abandoned before
/// its reply arrives.
pub const CANCELLED_MESSAGE: &str = "The request was cancelled before Pit Box replied.";

// ---------------------------------------------------------------------------
// Intents and rejections
// ---------------------------------------------------------------------------

/// A user request forwarded by the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Begin the conversation.
    Start,
    /// Send one message.
    Send(String),
}

/// Why a `send` intent was refused.  A rejected intent has no effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Rejected {
    /// The session has not been started.
    #[error("session has not been started")]
    NotStarted,
    /// Another message is still awaiting its reply.
    #[error("a message is already awaiting its reply")]
    Busy,
    /// The text was empty or whitespace only.
    #[error("message must not be blank")]
    Blank,
}

/// An in-flight dispatch, resolving to the assistant turn draft.
type Exchange = BoxFuture<'static, NewTurn>;

// ---------------------------------------------------------------------------
// SessionController
// ---------------------------------------------------------------------------

/// Owner of one conversation.
///
/// The controller is meant to live in a single task.  Observers read
/// state through [`subscribe`](Self::subscribe); they never share the
/// controller itself.
pub struct SessionController<D> {
    id: SessionId,
    phase: SessionPhase,
    pending: bool,
    transcript: TranscriptStore,
    dispatcher: Arc<D>,
    snapshots: watch::Sender<SessionSnapshot>,
}

impl<D: Dispatch> SessionController<D> {
    /// Create an idle session sending through `dispatcher`.
    pub fn new(dispatcher: D) -> Self {
        let id = SessionId::new();
        let (snapshots, _) = watch::channel(SessionSnapshot::idle(id));
        debug!(session = %id, "session created");
        Self {
            id,
            phase: SessionPhase::Idle,
            pending: false,
            transcript: TranscriptStore::new(),
            dispatcher: Arc::new(dispatcher),
            snapshots,
        }
    }

    // ------------------------------------------------------------------
    // Transitions
    // ------------------------------------------------------------------

    /// `Idle → Active`, appending the welcome turn.
    ///
    /// Returns `false` (and changes nothing) if the session is already
    /// active.
    pub fn start(&mut self) -> bool {
        if self.phase == SessionPhase::Active {
            debug!(session = %self.id, "start ignored, session already active");
            return false;
        }

        self.phase = SessionPhase::Active;
        let welcome = self.transcript.append(NewTurn::assistant(WELCOME_MESSAGE));
        info!(session = %self.id, turn = %welcome.id, "session started");
        self.publish();
        true
    }

    /// Append the user turn, mark the session pending and start the
    /// dispatch.  The caller must hand the exchange's output to
    /// [`resolve`](Self::resolve).
    pub(crate) fn submit(&mut self, text: &str) -> Result<Exchange, Rejected> {
        if self.phase != SessionPhase::Active {
            return Err(Rejected::NotStarted);
        }
        if self.pending {
            return Err(Rejected::Busy);
        }
        let text = MessageText::parse(text).map_err(|_| Rejected::Blank)?;

        let user_turn = self.transcript.append(NewTurn::user(&text));
        self.pending = true;
        info!(session = %self.id, turn = %user_turn.id, "message dispatched");
        self.publish();

        let dispatcher = Arc::clone(&self.dispatcher);
        Ok(async move { dispatcher.dispatch(text).await }.boxed())
    }

    /// Submit `text`, await the reply and append it.
    ///
    /// Dropping the returned future after the user turn was appended ends
    /// the exchange with a failed [`CANCELLED_MESSAGE`] turn.
    pub async fn send(&mut self, text: &str) -> Result<Arc<Turn>, Rejected> {
        let exchange = self.submit(text)?;
        let mut guard = InFlight {
            session: self,
            armed: true,
        };
        let reply = exchange.await;
        guard.armed = false;
        Ok(guard.session.complete(reply))
    }

    /// Drive the session from a stream of intents.
    ///
    /// At most one exchange runs at a time; `Send` intents that arrive
    /// while it is in flight are rejected.  Returns the final snapshot once
    /// every intent sender is dropped and the last exchange has resolved.
    pub async fn run(mut self, mut intents: mpsc::UnboundedReceiver<Intent>) -> SessionSnapshot {
        let mut in_flight: Option<Exchange> = None;

        loop {
            tokio::select! {
                reply = settle(&mut in_flight), if in_flight.is_some() => {
                    in_flight = None;
                    self.resolve(reply);
                }
                intent = intents.recv() => match intent {
                    Some(Intent::Start) => {
                        self.start();
                    }
                    Some(Intent::Send(text)) => match self.submit(&text) {
                        Ok(exchange) => in_flight = Some(exchange),
                        Err(reason) => {
                            info!(session = %self.id, %reason, "send intent rejected");
                        }
                    },
                    None => {
                        if let Some(exchange) = in_flight.take() {
                            let reply = exchange.await;
                            self.resolve(reply);
                        }
                        break;
                    }
                },
            }
        }

        debug!(session = %self.id, "intent channel closed");
        self.snapshot()
    }
}

impl<D> SessionController<D> {
    /// Append the assistant turn that ends the current exchange and clear
    /// `pending`.
    ///
    /// Returns `None` and changes nothing when no exchange is in flight.
    pub(crate) fn resolve(&mut self, reply: NewTurn) -> Option<Arc<Turn>> {
        if !self.pending {
            warn!(session = %self.id, "reply ignored, no exchange in flight");
            return None;
        }
        Some(self.complete(reply))
    }

    fn complete(&mut self, reply: NewTurn) -> Arc<Turn> {
        let turn = self.transcript.append(reply);
        self.pending = false;
        if turn.failed {
            warn!(session = %self.id, turn = %turn.id, "exchange failed");
        } else {
            info!(session = %self.id, turn = %turn.id, "reply received");
        }
        self.publish();
        turn
    }

    fn abandon(&mut self) {
        if self.pending {
            warn!(session = %self.id, "exchange abandoned before its reply");
            self.complete(NewTurn::failure(CANCELLED_MESSAGE));
        }
    }

    // ------------------------------------------------------------------
    // Observation
    // ------------------------------------------------------------------

    /// Receive a snapshot after every state change.
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.snapshots.subscribe()
    }

    /// Current state as a snapshot.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            id: self.id,
            phase: self.phase,
            turns: self.transcript.all(),
            pending: self.pending,
        }
    }

    /// Session identifier.
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Current phase.
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Whether an exchange is in flight.
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Transcript snapshot.
    pub fn turns(&self) -> Arc<[Arc<Turn>]> {
        self.transcript.all()
    }

    fn publish(&self) {
        self.snapshots.send_replace(self.snapshot());
    }
}

impl<D> Drop for SessionController<D> {
    fn drop(&mut self) {
        self.abandon();
    }
}

/// Ends the exchange of a `send` future dropped before its reply.
struct InFlight<'a, D> {
    session: &'a mut SessionController<D>,
    armed: bool,
}

impl<D> Drop for InFlight<'_, D> {
    fn drop(&mut self) {
        if self.armed {
            self.session.abandon();
        }
    }
}

async fn settle(in_flight: &mut Option<Exchange>) -> NewTurn {
    match in_flight {
        Some(exchange) => exchange.await,
        None => std::future::pending().await,
    }
}

//! Session identity, phase and observable snapshots.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::turn::Turn;

// ---------------------------------------------------------------------------
// SessionId
// ---------------------------------------------------------------------------

/// Identifier of a chat session, used to correlate log lines.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(Uuid);

impl SessionId {
    /// Generate a fresh random session id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// SessionPhase
// ---------------------------------------------------------------------------

/// Lifecycle phase of a session.
///
/// A session starts [`Idle`](Self::Idle) and moves to
/// [`Active`](Self::Active) exactly once.  There is no way back.
#[derive(
    Serialize,
    Deserialize,
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SessionPhase {
    /// Waiting for the user to start the conversation.
    #[default]
    Idle,
    /// Conversation in progress.
    Active,
}

// ---------------------------------------------------------------------------
// SessionSnapshot
// ---------------------------------------------------------------------------

/// Immutable view of a session, published after every state change.
///
/// `turns` is a shared slice of shared turns; neither cloning nor
/// publishing a snapshot copies turn content.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    /// Session the snapshot belongs to.
    pub id: SessionId,
    /// Current lifecycle phase.
    pub phase: SessionPhase,
    /// Transcript in conversation order.
    pub turns: Arc<[Arc<Turn>]>,
    /// `true` while a dispatched message awaits its reply.
    pub pending: bool,
}

impl SessionSnapshot {
    /// Snapshot of a freshly created, idle session.
    pub fn idle(id: SessionId) -> Self {
        Self {
            id,
            phase: SessionPhase::Idle,
            turns: Arc::from(Vec::new()),
            pending: false,
        }
    }

    /// Whether the session has been started.
    pub fn is_active(&self) -> bool {
        self.phase == SessionPhase::Active
    }

    /// Number of user-authored turns.
    pub fn user_turn_count(&self) -> usize {
        self.turns.iter().filter(|t| t.is_user()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_snapshot_is_empty() {
        let snapshot = SessionSnapshot::idle(SessionId::new());
        assert_eq!(snapshot.phase, SessionPhase::Idle);
        assert!(!snapshot.is_active());
        assert!(!snapshot.pending);
        assert!(snapshot.turns.is_empty());
        assert_eq!(snapshot.user_turn_count(), 0);
    }

    #[test]
    fn session_ids_are_unique() {
        assert_ne!(SessionId::new(), SessionId::new());
    }

    #[test]
    fn phase_defaults_to_idle() {
        assert_eq!(SessionPhase::default(), SessionPhase::Idle);
        assert_eq!(SessionPhase::Active.to_string(), "active");
    }
}

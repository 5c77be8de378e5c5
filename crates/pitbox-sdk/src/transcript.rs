//! Append-only conversation log.

use std::sync::Arc;

use chrono::Utc;
use pitbox_models::{NewTurn, Turn, TurnId};

/// Ordered, append-only sequence of turns.
///
/// The store assigns ids (starting at 1) and timestamps.  It never edits
/// or removes a turn, and it does not look at turn content.  Turns are
/// shared with every snapshot taken after they were appended.
#[derive(Debug, Clone)]
pub struct TranscriptStore {
    turns: Vec<Arc<Turn>>,
    next_id: u64,
}

impl TranscriptStore {
    /// An empty transcript.
    pub fn new() -> Self {
        Self {
            turns: Vec::new(),
            next_id: 1,
        }
    }

    /// Stamp `draft` with the next id and the current time, then append it.
    pub fn append(&mut self, draft: NewTurn) -> Arc<Turn> {
        let id = TurnId::new(self.next_id);
        self.next_id += 1;

        let turn = Arc::new(Turn::from_draft(id, Utc::now(), draft));
        self.turns.push(Arc::clone(&turn));
        turn
    }

    /// Immutable snapshot of every turn in conversation order.
    pub fn all(&self) -> Arc<[Arc<Turn>]> {
        self.turns.iter().cloned().collect()
    }

    /// The most recently appended turn.
    pub fn last(&self) -> Option<&Turn> {
        self.turns.last().map(|turn| &**turn)
    }

    /// Number of turns.
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// Whether no turn has been appended yet.
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}

impl Default for TranscriptStore {
    fn default() -> Self {
        Self::new()
    }
}

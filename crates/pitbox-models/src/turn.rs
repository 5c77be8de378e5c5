//! Conversation turns.
//!
//! A [`Turn`] is one message in the transcript, authored either by the
//! user or by the assistant.  Turns are created from a [`NewTurn`] draft
//! by the transcript store, which assigns the [`TurnId`] and timestamp.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ModelError;

// ---------------------------------------------------------------------------
// TurnId
// ---------------------------------------------------------------------------

/// Sequence number of a turn within a session.
///
/// Ids start at 1 and increase by one with every appended turn.  An id is
/// never reused within a session.
///
/// # Examples
///
/// ```
/// use pitbox_models::TurnId;
///
/// let id = TurnId::new(3);
/// assert_eq!(id.to_string(), "3");
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TurnId(u64);

impl TurnId {
    /// Create a turn id from its raw sequence number.
    pub fn new(seq: u64) -> Self {
        Self(seq)
    }
}

impl fmt::Display for TurnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for TurnId {
    fn from(seq: u64) -> Self {
        Self(seq)
    }
}

// ---------------------------------------------------------------------------
// Role
// ---------------------------------------------------------------------------

/// Author of a turn.
#[derive(
    Serialize,
    Deserialize,
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    /// Text typed by the user.
    User,
    /// Text produced by the remote assistant (or a local placeholder).
    Assistant,
}

// ---------------------------------------------------------------------------
// MessageText
// ---------------------------------------------------------------------------

/// User text that is guaranteed not to be blank.
///
/// The text is stored verbatim; only the blank check looks at trimmed
/// content.
///
/// # Examples
///
/// ```
/// use pitbox_models::{MessageText, ModelError};
///
/// let text = MessageText::parse("who is leading?").unwrap();
/// assert_eq!(text.as_str(), "who is leading?");
///
/// assert_eq!(MessageText::parse("   "), Err(ModelError::BlankMessage));
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct MessageText(String);

impl MessageText {
    /// Validate `text`, rejecting empty or whitespace-only input.
    pub fn parse(text: impl Into<String>) -> Result<Self, ModelError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(ModelError::BlankMessage);
        }
        Ok(Self(text))
    }

    /// Return the inner string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MessageText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for MessageText {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for MessageText {
    type Error = ModelError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

impl From<MessageText> for String {
    fn from(text: MessageText) -> Self {
        text.0
    }
}

// ---------------------------------------------------------------------------
// NewTurn
// ---------------------------------------------------------------------------

/// A turn that has not been appended to a transcript yet.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct NewTurn {
    /// Author of the turn.
    pub role: Role,
    /// Opaque text payload.
    pub content: String,
    /// Whether the turn stands for a communication failure.
    pub failed: bool,
}

impl NewTurn {
    /// A turn carrying the user's text.
    pub fn user(text: &MessageText) -> Self {
        Self {
            role: Role::User,
            content: text.as_str().to_string(),
            failed: false,
        }
    }

    /// A genuine assistant reply.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            failed: false,
        }
    }

    /// An assistant-role placeholder for a failed exchange.
    pub fn failure(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            failed: true,
        }
    }
}

// ---------------------------------------------------------------------------
// Turn
// ---------------------------------------------------------------------------

/// One message of the conversation, as stored in the transcript.
///
/// Turns are immutable once appended.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    /// Position in the session, unique and increasing.
    pub id: TurnId,
    /// Author of the turn.
    pub role: Role,
    /// Opaque text payload (assistant content may contain markdown).
    pub content: String,
    /// Time (UTC) at which the turn was appended.
    pub created_at: DateTime<Utc>,
    /// `true` when the turn reports a communication failure rather than
    /// genuine assistant content.
    pub failed: bool,
}

impl Turn {
    /// Materialize a draft with its assigned id and timestamp.
    pub fn from_draft(id: TurnId, created_at: DateTime<Utc>, draft: NewTurn) -> Self {
        Self {
            id,
            role: draft.role,
            content: draft.content,
            created_at,
            failed: draft.failed,
        }
    }

    /// Whether the user authored this turn.
    pub fn is_user(&self) -> bool {
        self.role == Role::User
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_text_rejects_blank_input() {
        assert_eq!(MessageText::parse(""), Err(ModelError::BlankMessage));
        assert_eq!(MessageText::parse(" \t\n "), Err(ModelError::BlankMessage));
    }

    #[test]
    fn message_text_keeps_surrounding_whitespace() {
        let text = MessageText::parse("  box this lap  ").unwrap();
        assert_eq!(text.as_str(), "  box this lap  ");
    }

    #[test]
    fn message_text_deserialize_validates() {
        let ok: MessageText = serde_json::from_str("\"pit now?\"").unwrap();
        assert_eq!(ok.as_str(), "pit now?");
        assert!(serde_json::from_str::<MessageText>("\"  \"").is_err());
    }

    #[test]
    fn role_display_and_parse() {
        assert_eq!(Role::User.to_string(), "user");
        assert_eq!(Role::Assistant.to_string(), "assistant");
        assert_eq!("assistant".parse::<Role>().unwrap(), Role::Assistant);
    }

    #[test]
    fn role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::User).unwrap(), "\"user\"");
    }

    #[test]
    fn new_turn_constructors() {
        let text = MessageText::parse("status?").unwrap();
        let user = NewTurn::user(&text);
        assert_eq!(user.role, Role::User);
        assert_eq!(user.content, "status?");
        assert!(!user.failed);

        let reply = NewTurn::assistant("Track position updated");
        assert_eq!(reply.role, Role::Assistant);
        assert!(!reply.failed);

        let failure = NewTurn::failure("backend unreachable");
        assert_eq!(failure.role, Role::Assistant);
        assert!(failure.failed);
    }

    #[test]
    fn turn_from_draft_keeps_fields() {
        let now = Utc::now();
        let turn = Turn::from_draft(TurnId::new(2), now, NewTurn::assistant("Driver A"));
        assert_eq!(turn.id, TurnId::new(2));
        assert_eq!(turn.created_at, now);
        assert_eq!(turn.content, "Driver A");
        assert_eq!(turn.role, Role::Assistant);
        assert!(!turn.is_user());
    }

    #[test]
    fn turn_ids_are_ordered() {
        assert!(TurnId::new(1) < TurnId::new(2));
        assert_eq!(TurnId::from(7), TurnId::new(7));
    }
}

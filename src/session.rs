//! Session-scoped conversation state
//!
//! A [`Session`] owns the ordered chat history and the latest plan artifact.
//! It starts empty, is only mutated by the workflow controller, and is
//! dropped when the interactive session ends.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Author of a history entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Text typed by the user, or a synthetic request built on their behalf
    User,
    /// Reply from the completion service (or the fallback reply)
    Assistant,
}

impl Role {
    /// Label used when the history is displayed
    pub fn display_label(&self) -> &'static str {
        match self {
            Self::User => "You",
            Self::Assistant => "Planner AI",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User => write!(f, "user"),
            Self::Assistant => write!(f, "assistant"),
        }
    }
}

/// One immutable history entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    role: Role,
    content: String,
}

impl ChatMessage {
    /// Create a user entry
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    /// Create an assistant entry
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }

    /// Author of the entry
    pub fn role(&self) -> Role {
        self.role
    }

    /// Text of the entry
    pub fn content(&self) -> &str {
        &self.content
    }
}

/// History plus the latest-artifact slot for one interactive session
///
/// # Examples
///
/// ```
/// use planforge::session::{ChatMessage, Session};
///
/// let mut session = Session::new();
/// session.append(ChatMessage::user("Build a todo app"));
/// session.append(ChatMessage::assistant("1. [REQUIREMENTS] ..."));
/// session.set_latest_artifact("1. [REQUIREMENTS] ...");
/// assert_eq!(session.len(), 2);
///
/// session.clear();
/// assert!(session.is_empty());
/// assert!(session.latest_artifact().is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Session {
    history: Vec<ChatMessage>,
    latest_artifact: Option<String>,
}

impl Session {
    /// Create an empty session
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry at the end of the history
    pub fn append(&mut self, message: ChatMessage) {
        self.history.push(message);
    }

    /// Overwrite the latest artifact
    pub fn set_latest_artifact(&mut self, text: impl Into<String>) {
        self.latest_artifact = Some(text.into());
    }

    /// The latest artifact, or `None` if absent or blank
    pub fn latest_artifact(&self) -> Option<&str> {
        self.latest_artifact
            .as_deref()
            .filter(|text| !text.trim().is_empty())
    }

    /// Empty the history and the artifact slot together
    pub fn clear(&mut self) {
        self.history.clear();
        self.latest_artifact = None;
    }

    /// All entries in insertion order
    pub fn messages(&self) -> &[ChatMessage] {
        &self.history
    }

    /// Most recent entry
    pub fn last(&self) -> Option<&ChatMessage> {
        self.history.last()
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.history.len()
    }

    /// True when the history has no entries
    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// Plain-text rendering of the whole history
    ///
    /// Each entry is `"<label>: <content>"`, entries separated by a blank line.
    pub fn transcript(&self) -> String {
        self.history
            .iter()
            .map(|m| format!("{}: {}", m.role().display_label(), m.content()))
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

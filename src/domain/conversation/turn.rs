//! Turns and the append-only transcript.
//!
//! A turn is an immutable record of one user or assistant message. User
//! turns hold the raw text exactly as typed, including blank or invalid
//! input.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Timestamp, TurnId};

/// Who produced a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnRole {
    User,
    Assistant,
}

/// One message in the transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    id: TurnId,
    role: TurnRole,
    content: String,
    created_at: Timestamp,
}

impl Turn {
    /// Creates a turn stamped with a fresh id and the current time.
    pub fn new(role: TurnRole, content: impl Into<String>) -> Self {
        Self {
            id: TurnId::new(),
            role,
            content: content.into(),
            created_at: Timestamp::now(),
        }
    }

    /// Creates a user turn.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(TurnRole::User, content)
    }

    /// Creates an assistant turn.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(TurnRole::Assistant, content)
    }

    pub fn id(&self) -> &TurnId {
        &self.id
    }

    pub fn role(&self) -> TurnRole {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn is_user(&self) -> bool {
        self.role == TurnRole::User
    }

    pub fn is_assistant(&self) -> bool {
        self.role == TurnRole::Assistant
    }
}

/// Ordered, append-only list of turns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Transcript {
    turns: Vec<Turn>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a turn. There is no way to edit or remove one afterwards.
    pub(crate) fn append(&mut self, turn: Turn) -> &Turn {
        self.turns.push(turn);
        &self.turns[self.turns.len() - 1]
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn iter(&self) -> impl Iterator<Item = &Turn> {
        self.turns.iter()
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn last(&self) -> Option<&Turn> {
        self.turns.last()
    }

    pub fn user_turn_count(&self) -> usize {
        self.turns.iter().filter(|t| t.is_user()).count()
    }
}

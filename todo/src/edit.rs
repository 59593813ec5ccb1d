//! Edit session state machine.
//!
//! ```text
//! Idle ──start(id, text)──▶ Editing(id, text)
//! Editing ──update_buffer(t)──▶ Editing(id, t)
//! Editing ──commit──▶ Idle   (writes the buffer to the todo)
//! Editing ──cancel──▶ Idle   (discards the buffer)
//! ```
//!
//! At most one session exists. Starting a new edit while one is open discards
//! the open buffer.

use crate::engine;
use crate::types::{Todo, TodoId};
use serde::{Deserialize, Serialize};

/// In-progress edit of a single todo
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum EditSession {
    /// Nothing is being edited
    #[default]
    Idle,
    /// A todo is being edited
    Editing {
        /// Todo under edit
        id: TodoId,
        /// Scratch text, committed on save
        buffer: String,
    },
}

impl EditSession {
    /// Opens a session for `id` with the buffer set to its current text
    #[must_use]
    pub fn start(self, id: TodoId, current_text: impl Into<String>) -> Self {
        if let Self::Editing { id: previous, .. } = &self {
            tracing::debug!(%previous, next = %id, "Discarding open edit session");
        }
        Self::Editing {
            id,
            buffer: current_text.into(),
        }
    }

    /// Replaces the buffer; does nothing while idle
    #[must_use]
    pub fn update_buffer(self, text: impl Into<String>) -> Self {
        match self {
            Self::Idle => Self::Idle,
            Self::Editing { id, .. } => Self::Editing {
                id,
                buffer: text.into(),
            },
        }
    }

    /// Closes the session and writes the buffer to the todo under edit
    ///
    /// Returns the new session (always idle) and the resulting collection.
    /// Committing while idle returns the collection unchanged.
    #[must_use]
    pub fn commit(self, todos: &[Todo]) -> (Self, Vec<Todo>) {
        match self {
            Self::Idle => (Self::Idle, todos.to_vec()),
            Self::Editing { id, buffer } => (Self::Idle, engine::edit_text(todos, id, &buffer)),
        }
    }

    /// Closes the session without touching any todo
    #[must_use]
    pub fn cancel(self) -> Self {
        if let Self::Editing { id, .. } = self {
            tracing::debug!(%id, "Edit session cancelled");
        }
        Self::Idle
    }

    /// Id of the todo under edit
    #[must_use]
    pub const fn editing_id(&self) -> Option<TodoId> {
        match self {
            Self::Idle => None,
            Self::Editing { id, .. } => Some(*id),
        }
    }

    /// Current buffer, if editing
    #[must_use]
    pub fn buffer(&self) -> Option<&str> {
        match self {
            Self::Idle => None,
            Self::Editing { buffer, .. } => Some(buffer),
        }
    }

    /// Returns true if `id` is the todo under edit
    #[must_use]
    pub fn is_editing(&self, id: TodoId) -> bool {
        self.editing_id() == Some(id)
    }
}

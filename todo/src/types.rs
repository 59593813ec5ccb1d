//! Domain types for the to-do list.
//!
//! A list is an insertion-ordered collection of [`Todo`] items plus the UI
//! state that travels with it: the active [`Filter`], the in-progress
//! [`EditSession`], and the new-todo draft.

use crate::edit::EditSession;
use crate::filter::{self, Counts, Filter};
use serde::{Deserialize, Serialize};
use std::num::ParseIntError;
use std::str::FromStr;

/// Unique identifier for a todo item
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(u64);

impl TodoId {
    /// Wraps a raw identifier
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw identifier
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for TodoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for TodoId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

/// A single todo item
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    /// Unique identifier, fixed at creation
    pub id: TodoId,
    /// Text shown in the list
    pub text: String,
    /// Whether the todo is done
    pub completed: bool,
}

impl Todo {
    /// Creates a pending todo
    #[must_use]
    pub fn new(id: TodoId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            completed: false,
        }
    }
}

/// Held state of a to-do list session
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoState {
    /// All todos in insertion order
    pub todos: Vec<Todo>,
    /// Active filter selection
    pub filter: Filter,
    /// In-progress edit, if any
    pub edit: EditSession,
    /// Contents of the new-todo input
    pub draft: String,
}

impl TodoState {
    /// Creates an empty list showing every todo
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty list with the given filter selected
    #[must_use]
    pub fn with_filter(filter: Filter) -> Self {
        Self {
            filter,
            ..Self::default()
        }
    }

    /// Returns a todo by ID
    #[must_use]
    pub fn get(&self, id: TodoId) -> Option<&Todo> {
        self.todos.iter().find(|todo| todo.id == id)
    }

    /// Checks if a todo exists
    #[must_use]
    pub fn contains(&self, id: TodoId) -> bool {
        self.get(id).is_some()
    }

    /// Aggregate counts over the whole list
    #[must_use]
    pub fn counts(&self) -> Counts {
        filter::counts(&self.todos)
    }

    /// Todos matching the active filter, in list order
    pub fn visible(&self) -> impl Iterator<Item = &Todo> {
        filter::filtered_view(&self.todos, self.filter)
    }
}

/// Every gesture the to-do list understands
///
/// Each variant corresponds to one callback of the presentation layer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TodoAction {
    /// Add a todo with the given text (ignored when blank)
    SubmitNewTodo {
        /// Raw text as typed
        text: String,
    },

    /// Flip a todo between pending and completed
    Toggle {
        /// Todo to flip
        id: TodoId,
    },

    /// Remove a todo
    Delete {
        /// Todo to remove
        id: TodoId,
    },

    /// Open the edit session for a todo
    StartEdit {
        /// Todo to edit
        id: TodoId,
    },

    /// Replace the edit buffer
    EditBufferChanged {
        /// New buffer contents
        text: String,
    },

    /// Write the edit buffer back to the todo and close the session
    CommitEdit,

    /// Close the edit session without changing the todo
    CancelEdit,

    /// Complete every todo
    MarkAllDone,

    /// Remove every todo
    ClearAll,

    /// Change the active filter
    SetFilter {
        /// Filter to show
        filter: Filter,
    },

    /// Replace the new-todo draft
    DraftChanged {
        /// New draft contents
        text: String,
    },

    /// Add the draft as a todo, clearing it on success
    SubmitDraft,
}

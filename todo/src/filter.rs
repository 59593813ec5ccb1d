//! Filter view: which todos are shown, and how many there are of each kind.

use crate::types::Todo;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Which todos the list shows
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Filter {
    /// Every todo
    #[default]
    All,
    /// Todos not yet completed
    Pending,
    /// Completed todos
    Completed,
}

impl Filter {
    /// Every filter, in tab order
    pub const ALL: [Self; 3] = [Self::All, Self::Pending, Self::Completed];

    /// Lowercase name, as accepted by [`FromStr`]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Pending => "pending",
            Self::Completed => "completed",
        }
    }

    /// Returns true if `todo` belongs in this view
    #[must_use]
    pub const fn matches(self, todo: &Todo) -> bool {
        match self {
            Self::All => true,
            Self::Pending => !todo.completed,
            Self::Completed => todo.completed,
        }
    }
}

impl std::fmt::Display for Filter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string names no filter
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown filter `{input}` (expected all, pending or completed)")]
pub struct ParseFilterError {
    /// The rejected input
    pub input: String,
}

impl FromStr for Filter {
    type Err = ParseFilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|filter| filter.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ParseFilterError {
                input: wanted.to_string(),
            })
    }
}

/// Aggregate counts over a collection
///
/// `pending + completed == total` always holds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counts {
    /// Number of todos
    pub total: usize,
    /// Number of todos not completed
    pub pending: usize,
    /// Number of completed todos
    pub completed: usize,
}

impl Counts {
    /// Size of the view selected by `filter`
    #[must_use]
    pub const fn for_filter(self, filter: Filter) -> usize {
        match filter {
            Filter::All => self.total,
            Filter::Pending => self.pending,
            Filter::Completed => self.completed,
        }
    }
}

/// Lazily yields the todos matching `filter`, in collection order
pub fn filtered_view(todos: &[Todo], filter: Filter) -> impl Iterator<Item = &Todo> {
    todos.iter().filter(move |todo| filter.matches(todo))
}

/// Counts todos by completion
#[must_use]
pub fn counts(todos: &[Todo]) -> Counts {
    let completed = todos.iter().filter(|todo| todo.completed).count();
    Counts {
        total: todos.len(),
        pending: todos.len() - completed,
        completed,
    }
}

//! Render model for the to-do list.
//!
//! [`ListView`] is everything a presentation layer needs to draw the list:
//! the visible rows, the filter tabs with their counts, the open edit, and the
//! footer. It is derived from [`TodoState`] and never feeds back into it.

use crate::edit::EditSession;
use crate::filter::{Counts, Filter};
use crate::types::{Todo, TodoId, TodoState};
use serde::{Deserialize, Serialize};

/// Row currently being edited
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditingRow {
    /// Todo under edit
    pub id: TodoId,
    /// Current buffer contents
    pub buffer: String,
}

/// Snapshot of what the list shows
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListView {
    /// Todos matching the active filter, in list order
    pub items: Vec<Todo>,
    /// Counts over the whole list
    pub counts: Counts,
    /// Active filter
    pub filter: Filter,
    /// Open edit, if any
    pub editing: Option<EditingRow>,
    /// Contents of the new-todo input
    pub draft: String,
}

impl ListView {
    /// Derives the view from the held state
    #[must_use]
    pub fn from_state(state: &TodoState) -> Self {
        let editing = match &state.edit {
            EditSession::Idle => None,
            EditSession::Editing { id, buffer } => Some(EditingRow {
                id: *id,
                buffer: buffer.clone(),
            }),
        };

        Self {
            items: state.visible().cloned().collect(),
            counts: state.counts(),
            filter: state.filter,
            editing,
            draft: state.draft.clone(),
        }
    }

    /// True when the list holds no todos at all
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.counts.total == 0
    }

    /// Filter tabs are only offered once there is something to filter
    #[must_use]
    pub const fn show_filter_bar(&self) -> bool {
        !self.is_empty()
    }

    /// Footer line, e.g. `Total: 1 item` or `Total: 3 items`
    #[must_use]
    pub fn footer(&self) -> String {
        let total = self.counts.total;
        let noun = if total == 1 { "item" } else { "items" };
        format!("Total: {total} {noun}")
    }

    /// Label of a filter tab, e.g. `Pending (2)`
    #[must_use]
    pub fn tab_label(&self, filter: Filter) -> String {
        let name = match filter {
            Filter::All => "All",
            Filter::Pending => "Pending",
            Filter::Completed => "Completed",
        };
        format!("{name} ({})", self.counts.for_filter(filter))
    }

    /// Plain-text rendering
    ///
    /// The active tab is bracketed, completed rows are checked, and the
    /// row under edit shows its buffer instead of its text.
    #[must_use]
    pub fn render_text(&self, show_ids: bool) -> String {
        if self.is_empty() {
            return "No todos yet!\n".to_string();
        }

        let mut lines = Vec::with_capacity(self.items.len() + 2);
        if self.show_filter_bar() {
            let tabs: Vec<String> = Filter::ALL
                .into_iter()
                .map(|filter| {
                    let label = self.tab_label(filter);
                    if filter == self.filter {
                        format!("[{label}]")
                    } else {
                        format!(" {label} ")
                    }
                })
                .collect();
            lines.push(tabs.join(" "));
        }

        lines.extend(self.items.iter().map(|todo| self.render_row(todo, show_ids)));
        lines.push(self.footer());

        let mut out = lines.join("\n");
        out.push('\n');
        out
    }

    fn render_row(&self, todo: &Todo, show_ids: bool) -> String {
        let id = if show_ids {
            format!("#{:<4} ", todo.id)
        } else {
            String::new()
        };
        match &self.editing {
            Some(row) if row.id == todo.id => format!("  {id}> {}_", row.buffer),
            _ => {
                let mark = if todo.completed { 'x' } else { ' ' };
                format!("  {id}[{mark}] {}", todo.text)
            },
        }
    }
}

impl std::fmt::Display for ListView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.render_text(true))
    }
}

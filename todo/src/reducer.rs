//! Reducer logic for the to-do list.
//!
//! Every gesture maps onto one engine operation or edit-session transition.
//! No action can fail: blank submissions and unknown ids leave the state as
//! it was, and the reducer never returns effects.

use crate::engine;
use crate::types::{TodoAction, TodoId, TodoState};
use std::sync::Arc;
use tasklist_core::{effect::Effect, environment::IdGenerator, reducer::Reducer, SmallVec};

/// Environment dependencies for the to-do reducer
#[derive(Clone)]
pub struct TodoEnvironment {
    /// Source of ids for new todos
    pub ids: Arc<dyn IdGenerator>,
}

impl TodoEnvironment {
    /// Creates a new `TodoEnvironment`
    #[must_use]
    pub fn new(ids: Arc<dyn IdGenerator>) -> Self {
        Self { ids }
    }
}

/// Reducer for the to-do list
#[derive(Clone, Copy, Debug, Default)]
pub struct TodoReducer;

impl TodoReducer {
    /// Creates a new `TodoReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Adds `text` as a todo, returning whether one was created
    fn submit(state: &mut TodoState, text: &str, env: &TodoEnvironment) -> bool {
        let before = state.todos.len();
        state.todos = engine::add(&state.todos, text, env.ids.as_ref());
        let added = state.todos.len() > before;
        if !added {
            tracing::debug!("Ignored blank todo");
        }
        added
    }

    fn log_if_absent(state: &TodoState, id: TodoId, operation: &'static str) {
        if !state.contains(id) {
            tracing::debug!(%id, operation, "No todo with this id, ignoring");
        }
    }
}

impl Reducer for TodoReducer {
    type State = TodoState;
    type Action = TodoAction;
    type Environment = TodoEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            // ========== List ==========
            TodoAction::SubmitNewTodo { text } => {
                Self::submit(state, &text, env);
            },

            TodoAction::DraftChanged { text } => {
                state.draft = text;
            },

            TodoAction::SubmitDraft => {
                let draft = std::mem::take(&mut state.draft);
                if !Self::submit(state, &draft, env) {
                    // Keep what the user typed
                    state.draft = draft;
                }
            },

            TodoAction::Toggle { id } => {
                Self::log_if_absent(state, id, "toggle");
                state.todos = engine::toggle(&state.todos, id);
            },

            TodoAction::Delete { id } => {
                Self::log_if_absent(state, id, "delete");
                state.todos = engine::delete(&state.todos, id);
                if state.edit.is_editing(id) {
                    state.edit = std::mem::take(&mut state.edit).cancel();
                }
            },

            TodoAction::MarkAllDone => {
                state.todos = engine::mark_all_done(&state.todos);
            },

            TodoAction::ClearAll => {
                state.todos = engine::clear(&state.todos);
                state.edit = std::mem::take(&mut state.edit).cancel();
            },

            TodoAction::SetFilter { filter } => {
                state.filter = filter;
            },

            // ========== Edit session ==========
            TodoAction::StartEdit { id } => {
                let Some(current_text) = state.get(id).map(|todo| todo.text.clone()) else {
                    Self::log_if_absent(state, id, "start_edit");
                    return SmallVec::new();
                };
                state.edit = std::mem::take(&mut state.edit).start(id, current_text);
            },

            TodoAction::EditBufferChanged { text } => {
                state.edit = std::mem::take(&mut state.edit).update_buffer(text);
            },

            TodoAction::CommitEdit => {
                let (edit, todos) = std::mem::take(&mut state.edit).commit(&state.todos);
                state.edit = edit;
                state.todos = todos;
            },

            TodoAction::CancelEdit => {
                state.edit = std::mem::take(&mut state.edit).cancel();
            },
        }

        SmallVec::new()
    }
}

//! Session facade exposing the presentation layer's event surface.
//!
//! A [`TodoApp`] owns the Store that holds the list state. Each `on_*`
//! callback forwards one gesture as an action; subscribers obtained from
//! [`TodoApp::subscribe`] are notified after every state change and re-render
//! from [`TodoApp::view`].

use crate::filter::Filter;
use crate::reducer::{TodoEnvironment, TodoReducer};
use crate::types::{TodoAction, TodoId, TodoState};
use crate::view::ListView;
use tasklist_runtime::{Store, StoreConfig, StoreError};
use tokio::sync::broadcast;

/// Store specialised to the to-do list
pub type TodoStore = Store<TodoState, TodoAction, TodoEnvironment, TodoReducer>;

/// One to-do list session
pub struct TodoApp {
    store: TodoStore,
}

impl TodoApp {
    /// Starts an empty session with default settings
    #[must_use]
    pub fn new(env: TodoEnvironment) -> Self {
        Self::with_config(env, Filter::default(), StoreConfig::default())
    }

    /// Starts an empty session with the given initial filter and Store settings
    #[must_use]
    pub fn with_config(env: TodoEnvironment, initial_filter: Filter, config: StoreConfig) -> Self {
        let store = Store::with_config(
            TodoState::with_filter(initial_filter),
            TodoReducer::new(),
            env,
            config,
        );
        Self { store }
    }

    /// Forwards an action to the Store
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] after [`TodoApp::shutdown`].
    pub async fn dispatch(&self, action: TodoAction) -> Result<(), StoreError> {
        self.store.send(action).await
    }

    /// Adds a todo; blank text is ignored
    ///
    /// # Errors
    ///
    /// See [`TodoApp::dispatch`].
    pub async fn on_submit_new_todo(&self, text: impl Into<String>) -> Result<(), StoreError> {
        self.dispatch(TodoAction::SubmitNewTodo { text: text.into() }).await
    }

    /// Flips a todo between pending and completed
    ///
    /// # Errors
    ///
    /// See [`TodoApp::dispatch`].
    pub async fn on_toggle(&self, id: TodoId) -> Result<(), StoreError> {
        self.dispatch(TodoAction::Toggle { id }).await
    }

    /// Removes a todo
    ///
    /// # Errors
    ///
    /// See [`TodoApp::dispatch`].
    pub async fn on_delete(&self, id: TodoId) -> Result<(), StoreError> {
        self.dispatch(TodoAction::Delete { id }).await
    }

    /// Opens the edit session for a todo
    ///
    /// # Errors
    ///
    /// See [`TodoApp::dispatch`].
    pub async fn on_start_edit(&self, id: TodoId) -> Result<(), StoreError> {
        self.dispatch(TodoAction::StartEdit { id }).await
    }

    /// Replaces the edit buffer
    ///
    /// # Errors
    ///
    /// See [`TodoApp::dispatch`].
    pub async fn on_edit_buffer_change(&self, text: impl Into<String>) -> Result<(), StoreError> {
        self.dispatch(TodoAction::EditBufferChanged { text: text.into() })
            .await
    }

    /// Saves the edit buffer to the todo under edit
    ///
    /// # Errors
    ///
    /// See [`TodoApp::dispatch`].
    pub async fn on_commit_edit(&self) -> Result<(), StoreError> {
        self.dispatch(TodoAction::CommitEdit).await
    }

    /// Abandons the open edit
    ///
    /// # Errors
    ///
    /// See [`TodoApp::dispatch`].
    pub async fn on_cancel_edit(&self) -> Result<(), StoreError> {
        self.dispatch(TodoAction::CancelEdit).await
    }

    /// Completes every todo
    ///
    /// # Errors
    ///
    /// See [`TodoApp::dispatch`].
    pub async fn on_mark_all_done(&self) -> Result<(), StoreError> {
        self.dispatch(TodoAction::MarkAllDone).await
    }

    /// Removes every todo
    ///
    /// # Errors
    ///
    /// See [`TodoApp::dispatch`].
    pub async fn on_clear_all(&self) -> Result<(), StoreError> {
        self.dispatch(TodoAction::ClearAll).await
    }

    /// Changes the active filter
    ///
    /// # Errors
    ///
    /// See [`TodoApp::dispatch`].
    pub async fn on_set_filter(&self, filter: Filter) -> Result<(), StoreError> {
        self.dispatch(TodoAction::SetFilter { filter }).await
    }

    /// Replaces the new-todo draft
    ///
    /// # Errors
    ///
    /// See [`TodoApp::dispatch`].
    pub async fn on_draft_change(&self, text: impl Into<String>) -> Result<(), StoreError> {
        self.dispatch(TodoAction::DraftChanged { text: text.into() })
            .await
    }

    /// Adds the draft as a todo
    ///
    /// # Errors
    ///
    /// See [`TodoApp::dispatch`].
    pub async fn on_submit_draft(&self) -> Result<(), StoreError> {
        self.dispatch(TodoAction::SubmitDraft).await
    }

    /// Current render model
    pub async fn view(&self) -> ListView {
        self.store.state(ListView::from_state).await
    }

    /// Copy of the held state
    pub async fn snapshot(&self) -> TodoState {
        self.store.state(Clone::clone).await
    }

    /// Receives every processed action, after the state has changed
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<TodoAction> {
        self.store.subscribe_actions()
    }

    /// Ends the session; later callbacks fail with
    /// [`StoreError::ShutdownInProgress`]
    pub fn shutdown(&self) {
        self.store.shutdown();
    }
}

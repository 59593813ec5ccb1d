//! In-memory to-do list built on the Tasklist reducer architecture.
//!
//! The list is an insertion-ordered collection of todos with a filter view,
//! a single in-progress edit, and a new-todo draft. It demonstrates:
//!
//! - Pure list operations in [`engine`] (`&[Todo]` in, new `Vec<Todo>` out)
//! - A lazy filtered view with aggregate counts in [`filter`]
//! - An explicit edit-session state machine in [`edit`]
//! - A [`TodoReducer`] that maps every gesture onto those pieces
//! - A [`TodoApp`] session facade with one callback per gesture
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use tasklist_core::environment::{MonotonicIdGenerator, SystemClock};
//! use todo::{Filter, TodoApp, TodoEnvironment};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let env = TodoEnvironment::new(Arc::new(MonotonicIdGenerator::new(SystemClock)));
//! let app = TodoApp::new(env);
//!
//! app.on_submit_new_todo("Buy milk").await?;
//! app.on_submit_new_todo("Walk dog").await?;
//!
//! let first = app.view().await.items[0].id;
//! app.on_toggle(first).await?;
//! app.on_set_filter(Filter::Completed).await?;
//!
//! let view = app.view().await;
//! println!("{}", view.render_text(true));
//! # Ok(())
//! # }
//! ```

pub mod app;
pub mod command;
pub mod config;
pub mod edit;
pub mod engine;
pub mod filter;
pub mod reducer;
pub mod types;
pub mod view;

pub use app::{TodoApp, TodoStore};
pub use command::{Command, CommandError};
pub use config::Config;
pub use edit::EditSession;
pub use filter::{Counts, Filter};
pub use reducer::{TodoEnvironment, TodoReducer};
pub use types::{Todo, TodoAction, TodoId, TodoState};
pub use view::ListView;

//! Integration tests driving a to-do session through its callbacks
//!
//! Each test plays a sequence of user gestures against a [`TodoApp`] and
//! checks the rendered view, the held state, and change notifications.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)] // Test code can use unwrap/expect/panic

use std::sync::Arc;
use tasklist_runtime::{StoreConfig, StoreError};
use tasklist_core::environment::MonotonicIdGenerator;
use tasklist_testing::{test_clock, SequentialIdGenerator};
use todo::{EditSession, Filter, TodoAction, TodoApp, TodoEnvironment, TodoId};
use tokio::sync::broadcast::error::TryRecvError;

fn app() -> TodoApp {
    TodoApp::new(TodoEnvironment::new(Arc::new(SequentialIdGenerator::new())))
}

fn texts(view: &todo::ListView) -> Vec<&str> {
    view.items.iter().map(|todo| todo.text.as_str()).collect()
}

#[tokio::test]
async fn add_toggle_and_filter() {
    let app = app();

    app.on_submit_new_todo("Buy milk").await.unwrap();
    app.on_submit_new_todo("Walk dog").await.unwrap();
    app.on_toggle(TodoId::new(1)).await.unwrap();

    app.on_set_filter(Filter::Completed).await.unwrap();
    let view = app.view().await;
    assert_eq!(texts(&view), vec!["Buy milk"]);
    assert_eq!(view.counts.total, 2);
    assert_eq!(view.counts.pending, 1);
    assert_eq!(view.counts.completed, 1);

    app.on_set_filter(Filter::Pending).await.unwrap();
    assert_eq!(texts(&app.view().await), vec!["Walk dog"]);

    app.on_set_filter(Filter::All).await.unwrap();
    assert_eq!(texts(&app.view().await), vec!["Buy milk", "Walk dog"]);
}

#[tokio::test]
async fn blank_submission_leaves_list_empty() {
    let app = app();

    app.on_submit_new_todo("   ").await.unwrap();

    let view = app.view().await;
    assert!(view.is_empty());
    assert_eq!(view.render_text(true), "No todos yet!\n");
}

#[tokio::test]
async fn edit_commit_and_cancel() {
    let app = app();
    app.on_submit_new_todo("Walk dog").await.unwrap();
    let id = TodoId::new(1);

    app.on_start_edit(id).await.unwrap();
    app.on_edit_buffer_change("Walk the dog").await.unwrap();
    let editing = app.view().await.editing.unwrap();
    assert_eq!(editing.id, id);
    assert_eq!(editing.buffer, "Walk the dog");

    app.on_commit_edit().await.unwrap();
    let state = app.snapshot().await;
    assert_eq!(state.get(id).unwrap().text, "Walk the dog");
    assert_eq!(state.edit, EditSession::Idle);

    app.on_start_edit(id).await.unwrap();
    app.on_edit_buffer_change("scrapped").await.unwrap();
    app.on_cancel_edit().await.unwrap();
    let state = app.snapshot().await;
    assert_eq!(state.get(id).unwrap().text, "Walk the dog");
    assert_eq!(state.edit, EditSession::Idle);
}

#[tokio::test]
async fn mark_all_done_then_clear() {
    let app = app();
    for text in ["a", "b", "c"] {
        app.on_submit_new_todo(text).await.unwrap();
    }
    app.on_toggle(TodoId::new(2)).await.unwrap();

    app.on_mark_all_done().await.unwrap();
    let view = app.view().await;
    assert!(view.items.iter().all(|todo| todo.completed));
    assert_eq!(view.counts.completed, 3);

    app.on_clear_all().await.unwrap();
    assert!(app.view().await.is_empty());
}

#[tokio::test]
async fn delete_removes_only_that_todo() {
    let app = app();
    app.on_submit_new_todo("keep").await.unwrap();
    app.on_submit_new_todo("drop").await.unwrap();

    app.on_delete(TodoId::new(2)).await.unwrap();
    app.on_delete(TodoId::new(99)).await.unwrap();

    assert_eq!(texts(&app.view().await), vec!["keep"]);
}

#[tokio::test]
async fn draft_submits_and_clears() {
    let app = app();

    app.on_draft_change("Pay rent").await.unwrap();
    assert_eq!(app.view().await.draft, "Pay rent");

    app.on_submit_draft().await.unwrap();
    let view = app.view().await;
    assert_eq!(texts(&view), vec!["Pay rent"]);
    assert!(view.draft.is_empty());
}

#[tokio::test]
async fn initial_filter_is_honoured() {
    let app = TodoApp::with_config(
        TodoEnvironment::new(Arc::new(SequentialIdGenerator::new())),
        Filter::Pending,
        StoreConfig::default().with_broadcast_capacity(4),
    );
    app.on_submit_new_todo("a").await.unwrap();
    app.on_toggle(TodoId::new(1)).await.unwrap();

    let view = app.view().await;
    assert_eq!(view.filter, Filter::Pending);
    assert!(view.items.is_empty());
    assert!(view.show_filter_bar());
}

#[tokio::test]
async fn subscribers_see_every_gesture_in_order() {
    let app = app();
    let mut changes = app.subscribe();

    app.on_submit_new_todo("Buy milk").await.unwrap();
    app.on_toggle(TodoId::new(1)).await.unwrap();

    assert_eq!(
        changes.try_recv().unwrap(),
        TodoAction::SubmitNewTodo {
            text: "Buy milk".to_string()
        }
    );
    assert_eq!(
        changes.try_recv().unwrap(),
        TodoAction::Toggle { id: TodoId::new(1) }
    );
    assert!(matches!(changes.try_recv(), Err(TryRecvError::Empty)));
}

#[tokio::test]
async fn notification_arrives_after_state_changed() {
    let app = Arc::new(app());
    let mut changes = app.subscribe();

    let reader = {
        let app = Arc::clone(&app);
        tokio::spawn(async move {
            changes.recv().await.unwrap();
            app.view().await.counts.total
        })
    };

    app.on_submit_new_todo("Buy milk").await.unwrap();
    assert_eq!(reader.await.unwrap(), 1);
}

#[tokio::test]
async fn callbacks_fail_after_shutdown() {
    let app = app();
    app.on_submit_new_todo("before").await.unwrap();

    app.shutdown();

    assert!(matches!(
        app.on_submit_new_todo("after").await,
        Err(StoreError::ShutdownInProgress)
    ));
    assert_eq!(texts(&app.view().await), vec!["before"]);
}

#[tokio::test]
async fn scripted_commands_drive_the_session() {
    let app = app();
    let script = "add Buy milk\nadd Walk dog\ntoggle 1\nedit #2\nbuffer Walk the dog\nsave\nfilter completed";

    for line in script.lines() {
        match line.parse::<todo::Command>().unwrap() {
            todo::Command::Dispatch(action) => app.dispatch(action).await.unwrap(),
            other => panic!("unexpected command {other:?}"),
        }
    }

    app.on_set_filter(Filter::All).await.unwrap();
    assert_eq!(
        app.view().await.render_text(false),
        "[All (2)]  Pending (1)   Completed (1) \n  [x] Buy milk\n  [ ] Walk the dog\nTotal: 2 items\n"
    );
}

#[tokio::test]
async fn clock_seeded_ids_stay_unique_within_a_tick() {
    let app = TodoApp::new(TodoEnvironment::new(Arc::new(MonotonicIdGenerator::new(
        test_clock(),
    ))));
    for text in ["a", "b", "c"] {
        app.on_submit_new_todo(text).await.unwrap();
    }

    let ids: Vec<u64> = app.view().await.items.iter().map(|todo| todo.id.get()).collect();
    let base = 1_735_689_600_000; // 2025-01-01T00:00:00Z in millis
    assert_eq!(ids, vec![base, base + 1, base + 2]);
}

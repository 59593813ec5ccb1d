//! List state engine.
//!
//! Pure operations over the todo collection. Each takes the current
//! collection by reference and returns a new one; none of them fails, and an
//! id that matches nothing leaves the collection unchanged.

use crate::types::{Todo, TodoId};
use tasklist_core::environment::IdGenerator;

/// Appends a pending todo with the trimmed text
///
/// Blank or whitespace-only text returns an unchanged copy without drawing an
/// id from `ids`. Ids already present in `todos` are skipped, so the new todo
/// never shares an id with an existing one.
#[must_use]
pub fn add(todos: &[Todo], raw_text: &str, ids: &dyn IdGenerator) -> Vec<Todo> {
    let text = raw_text.trim();
    let mut next = todos.to_vec();
    if !text.is_empty() {
        next.push(Todo::new(fresh_id(todos, ids), text));
    }
    next
}

// Terminates: a generator never repeats, and `todos` holds finitely many ids.
fn fresh_id(todos: &[Todo], ids: &dyn IdGenerator) -> TodoId {
    loop {
        let candidate = TodoId::new(ids.next_id());
        if todos.iter().all(|todo| todo.id != candidate) {
            return candidate;
        }
        tracing::debug!(id = %candidate, "Skipping id already in the list");
    }
}

/// Inverts `completed` on the matching todo
#[must_use]
pub fn toggle(todos: &[Todo], id: TodoId) -> Vec<Todo> {
    update(todos, id, |todo| todo.completed = !todo.completed)
}

/// Removes the matching todo, keeping the order of the rest
#[must_use]
pub fn delete(todos: &[Todo], id: TodoId) -> Vec<Todo> {
    todos.iter().filter(|todo| todo.id != id).cloned().collect()
}

/// Replaces the text of the matching todo
///
/// Unlike [`add`], the new text is stored verbatim: it is neither trimmed nor
/// rejected when empty.
#[must_use]
pub fn edit_text(todos: &[Todo], id: TodoId, new_text: &str) -> Vec<Todo> {
    update(todos, id, |todo| new_text.clone_into(&mut todo.text))
}

/// Marks every todo completed
#[must_use]
pub fn mark_all_done(todos: &[Todo]) -> Vec<Todo> {
    todos
        .iter()
        .map(|todo| Todo {
            completed: true,
            ..todo.clone()
        })
        .collect()
}

/// Discards every todo
#[must_use]
pub const fn clear(_todos: &[Todo]) -> Vec<Todo> {
    Vec::new()
}

fn update(todos: &[Todo], id: TodoId, f: impl Fn(&mut Todo)) -> Vec<Todo> {
    todos
        .iter()
        .map(|todo| {
            let mut todo = todo.clone();
            if todo.id == id {
                f(&mut todo);
            }
            todo
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use tasklist_testing::SequentialIdGenerator;

    fn list(entries: &[(u64, &str, bool)]) -> Vec<Todo> {
        entries
            .iter()
            .map(|&(id, text, completed)| Todo {
                completed,
                ..Todo::new(TodoId::new(id), text)
            })
            .collect()
    }

    /// Collections with unique small ids and arbitrary completion
    ///
    /// Ids overlap what `SequentialIdGenerator` hands out first.
    fn arb_todos() -> impl Strategy<Value = Vec<Todo>> {
        prop::collection::btree_map(0u64..64, ("[a-z ]{1,12}", any::<bool>()), 0..16).prop_map(
            |entries| {
                entries
                    .into_iter()
                    .map(|(id, (text, completed))| Todo {
                        completed,
                        ..Todo::new(TodoId::new(id), text)
                    })
                    .collect()
            },
        )
    }

    #[test]
    fn add_appends_trimmed_pending_todo() {
        let ids = SequentialIdGenerator::new();
        let todos = add(&[], "  Buy milk \n", &ids);

        assert_eq!(todos, list(&[(1, "Buy milk", false)]));
    }

    #[test]
    fn add_blank_is_ignored_without_consuming_an_id() {
        let ids = SequentialIdGenerator::new();
        let before = list(&[(1, "Buy milk", false)]);

        assert_eq!(add(&before, "", &ids), before);
        assert_eq!(add(&before, "   ", &ids), before);
        assert_eq!(add(&before, "\t\n", &ids), before);
        assert_eq!(ids.issued(), 0);
    }

    #[test]
    fn add_skips_ids_already_in_the_list() {
        let ids = SequentialIdGenerator::new();
        let before = list(&[(1, "existing", false), (2, "also existing", true)]);

        let todos = add(&before, "new", &ids);

        assert_eq!(todos[2].id, TodoId::new(3));
        assert_eq!(ids.issued(), 3);
    }

    #[test]
    fn buy_milk_walk_dog_scenario() {
        let ids = SequentialIdGenerator::new();
        let todos = add(&[], "Buy milk", &ids);
        let todos = add(&todos, "Walk dog", &ids);

        let texts: Vec<_> = todos.iter().map(|t| (t.text.as_str(), t.completed)).collect();
        assert_eq!(texts, vec![("Buy milk", false), ("Walk dog", false)]);
        assert_ne!(todos[0].id, todos[1].id);
    }

    #[test]
    fn toggle_flips_only_the_match() {
        let todos = list(&[(1, "a", false), (2, "b", true)]);

        assert_eq!(toggle(&todos, TodoId::new(1)), list(&[(1, "a", true), (2, "b", true)]));
        assert_eq!(toggle(&todos, TodoId::new(2)), list(&[(1, "a", false), (2, "b", false)]));
    }

    #[test]
    fn delete_keeps_order_of_the_rest() {
        let todos = list(&[(1, "a", false), (2, "b", false), (3, "c", true)]);

        assert_eq!(delete(&todos, TodoId::new(2)), list(&[(1, "a", false), (3, "c", true)]));
    }

    #[test]
    fn edit_text_stores_text_verbatim() {
        let todos = list(&[(1, "Buy milk", false)]);

        // No trimming and no emptiness check on edit, unlike add
        assert_eq!(edit_text(&todos, TodoId::new(1), "  oat milk  "), list(&[(1, "  oat milk  ", false)]));
        assert_eq!(edit_text(&todos, TodoId::new(1), ""), list(&[(1, "", false)]));
    }

    #[test]
    fn edit_text_keeps_completion() {
        let todos = list(&[(1, "Buy milk", true)]);

        assert_eq!(edit_text(&todos, TodoId::new(1), "Buy bread"), list(&[(1, "Buy bread", true)]));
    }

    #[test]
    fn mark_all_done_is_idempotent() {
        let todos = list(&[(1, "a", false), (2, "b", true), (3, "c", false)]);

        let once = mark_all_done(&todos);
        assert!(once.iter().all(|todo| todo.completed));
        assert_eq!(mark_all_done(&once), once);
    }

    #[test]
    fn operations_leave_input_untouched() {
        let todos = list(&[(1, "a", false)]);
        let snapshot = todos.clone();

        let _ = toggle(&todos, TodoId::new(1));
        let _ = delete(&todos, TodoId::new(1));
        let _ = edit_text(&todos, TodoId::new(1), "b");
        let _ = mark_all_done(&todos);
        let _ = clear(&todos);

        assert_eq!(todos, snapshot);
    }

    proptest! {
        #[test]
        fn add_grows_by_one_with_fresh_id(todos in arb_todos(), text in "[ ]{0,3}[a-z]{1,10}[ ]{0,3}") {
            let ids = SequentialIdGenerator::new();
            let result = add(&todos, &text, &ids);

            prop_assert_eq!(result.len(), todos.len() + 1);
            prop_assert_eq!(&result[..todos.len()], &todos[..]);
            let last = &result[todos.len()];
            prop_assert_eq!(last.text.as_str(), text.trim());
            prop_assert!(!last.completed);
            prop_assert!(todos.iter().all(|todo| todo.id != last.id));
        }

        #[test]
        fn toggle_is_self_inverse(todos in arb_todos(), pick in any::<prop::sample::Index>()) {
            prop_assume!(!todos.is_empty());
            let id = todos[pick.index(todos.len())].id;

            prop_assert_eq!(toggle(&toggle(&todos, id), id), todos);
        }

        #[test]
        fn absent_id_is_a_no_op(todos in arb_todos(), text in ".*") {
            let missing = TodoId::new(5000);

            prop_assert_eq!(&toggle(&todos, missing), &todos);
            prop_assert_eq!(&delete(&todos, missing), &todos);
            prop_assert_eq!(&edit_text(&todos, missing, &text), &todos);
        }

        #[test]
        fn delete_removes_exactly_one(todos in arb_todos(), pick in any::<prop::sample::Index>()) {
            prop_assume!(!todos.is_empty());
            let id = todos[pick.index(todos.len())].id;
            let result = delete(&todos, id);

            prop_assert_eq!(result.len(), todos.len() - 1);
            prop_assert!(result.iter().all(|todo| todo.id != id));
        }

        #[test]
        fn clear_always_empties(todos in arb_todos()) {
            prop_assert!(clear(&todos).is_empty());
        }
    }
}

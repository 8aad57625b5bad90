//! Property-based tests for the todo reducer and list view.

use std::sync::Arc;

use proptest::prelude::*;
use todo::{Filter, Priority, TodoAction, TodoEnvironment, TodoReducer, TodoState, TodoStore, query};
use todo_core::environment::AlwaysConfirm;
use todo_runtime::Store;
use todo_testing::{SequentialIds, stepping_clock};

fn new_store() -> TodoStore {
    let env = TodoEnvironment::new(
        Arc::new(stepping_clock()),
        Arc::new(SequentialIds::new()),
        Arc::new(AlwaysConfirm),
    );
    Store::new(TodoState::new(), TodoReducer::new(), env)
}

fn priority() -> impl Strategy<Value = Priority> {
    prop_oneof![Just(Priority::High), Just(Priority::Medium), Just(Priority::Low)]
}

fn filter() -> impl Strategy<Value = Filter> {
    prop_oneof![Just(Filter::All), Just(Filter::Active), Just(Filter::Completed)]
}

fn blank() -> impl Strategy<Value = String> {
    "[ \t\n]{0,6}"
}

fn add(store: &mut TodoStore, text: &str, priority: Priority) {
    let _ = store.send(TodoAction::AddTodo {
        text: text.to_string(),
        priority,
    });
}

/// Store holding one todo per entry, completed where the flag is set
fn populated(entries: &[(String, Priority, bool)]) -> TodoStore {
    let mut store = new_store();
    for (text, priority, done) in entries {
        add(&mut store, text, *priority);
        if *done {
            let id = store.state(|s| s.todos.last().map(|t| t.id));
            if let Some(id) = id {
                let _ = store.send(TodoAction::ToggleTodo { id });
            }
        }
    }
    store
}

proptest! {
    #[test]
    fn count_matches_non_blank_adds(texts in prop::collection::vec("[ a-z]{0,8}", 0..20)) {
        let mut store = new_store();
        for text in &texts {
            add(&mut store, text, Priority::Medium);
        }

        let expected = texts.iter().filter(|t| !t.trim().is_empty()).count();
        prop_assert_eq!(store.state(TodoState::count), expected);
    }

    #[test]
    fn blank_add_never_changes_count(
        existing in prop::collection::vec("[a-z]{1,8}", 0..5),
        text in blank(),
        priority in priority(),
    ) {
        let mut store = new_store();
        for text in &existing {
            add(&mut store, text, Priority::Low);
        }
        let before = store.state(Clone::clone);

        add(&mut store, &text, priority);

        prop_assert_eq!(store.state(Clone::clone), before);
    }

    #[test]
    fn blank_edit_keeps_text(original in "[a-z]{1,10}", text in blank()) {
        let mut store = new_store();
        add(&mut store, &original, Priority::Medium);
        let id = store.state(|s| s.todos[0].id);

        let _ = store.send(TodoAction::EditTodo { id, text });

        prop_assert_eq!(store.state(|s| s.todos[0].text.clone()), original);
    }

    #[test]
    fn toggle_twice_restores_flag(done in any::<bool>()) {
        let mut store = populated(&[("Buy milk".to_string(), Priority::High, done)]);
        let id = store.state(|s| s.todos[0].id);

        let _ = store.send(TodoAction::ToggleTodo { id });
        let _ = store.send(TodoAction::ToggleTodo { id });

        prop_assert_eq!(store.state(|s| s.todos[0].completed), done);
    }

    #[test]
    fn three_cycles_restore_priority(start in priority()) {
        let mut store = new_store();
        add(&mut store, "Buy milk", start);
        let id = store.state(|s| s.todos[0].id);

        for _ in 0..3 {
            let _ = store.send(TodoAction::CyclePriority { id });
        }

        prop_assert_eq!(store.state(|s| s.todos[0].priority), start);
    }

    #[test]
    fn active_and_completed_partition_all(
        entries in prop::collection::vec(("[a-z]{1,6}", priority(), any::<bool>()), 0..12),
    ) {
        let store = populated(&entries);

        store.state(|s| {
            let all = query(&s.todos, Filter::All, "");
            let active = query(&s.todos, Filter::Active, "");
            let completed = query(&s.todos, Filter::Completed, "");

            prop_assert_eq!(active.len() + completed.len(), all.len());
            prop_assert!(active.iter().all(|t| !t.completed));
            prop_assert!(completed.iter().all(|t| t.completed));
            prop_assert!(all.iter().all(|t| active.contains(t) || completed.contains(t)));
            Ok(())
        })?;
    }

    #[test]
    fn visible_list_is_sorted(
        entries in prop::collection::vec(("[a-z]{1,6}", priority(), any::<bool>()), 0..12),
        filter in filter(),
        search in "[a-z]{0,2}",
    ) {
        let store = populated(&entries);

        store.state(|s| {
            let visible = query(&s.todos, filter, &search);
            for pair in visible.windows(2) {
                let (a, b) = (pair[0], pair[1]);
                prop_assert!(
                    a.priority.weight() > b.priority.weight()
                        || (a.priority == b.priority && a.created_at >= b.created_at)
                );
            }
            prop_assert!(visible.iter().all(|t| filter.admits(t.completed)));
            prop_assert!(visible.iter().all(|t| t.text.contains(search.as_str())));
            Ok(())
        })?;
    }
}

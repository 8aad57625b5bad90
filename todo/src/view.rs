//! Derived views over the todo collection.
//!
//! Nothing here is stored. Every view is recomputed from the todo slice and
//! the session inputs on each read.

use serde::Serialize;

use crate::types::{Filter, Priority, TodoItem};

/// Filter, search and sort todos for display
///
/// Keeps todos admitted by `filter` whose text contains `search`
/// (case-insensitive; an empty search matches everything), ordered by
/// priority (high first), then by creation time (newest first). Todos that
/// tie on both keep the most recently added first.
#[must_use]
pub fn query<'a>(todos: &'a [TodoItem], filter: Filter, search: &str) -> Vec<&'a TodoItem> {
    let needle = search.to_lowercase();

    // Newest-inserted first so the stable sort below breaks full ties that way.
    let mut visible: Vec<&TodoItem> = todos
        .iter()
        .rev()
        .filter(|todo| filter.admits(todo.completed))
        .filter(|todo| todo.text.to_lowercase().contains(&needle))
        .collect();

    visible.sort_by(|a, b| {
        b.priority
            .weight()
            .cmp(&a.priority.weight())
            .then_with(|| b.created_at.cmp(&a.created_at))
    });
    visible
}

/// Aggregate counts over the whole collection
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct TodoStats {
    /// Every todo
    pub total: usize,
    /// Todos not completed
    pub active: usize,
    /// Completed todos
    pub completed: usize,
    /// Todos that are both active and high priority
    pub active_high: usize,
}

impl TodoStats {
    /// Count `todos`
    #[must_use]
    pub fn of(todos: &[TodoItem]) -> Self {
        todos.iter().fold(Self::default(), |mut stats, todo| {
            stats.total += 1;
            if todo.completed {
                stats.completed += 1;
            } else {
                stats.active += 1;
                if todo.priority == Priority::High {
                    stats.active_high += 1;
                }
            }
            stats
        })
    }
}

/// Why the visible list is empty
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum EmptyView {
    /// A search is active and nothing matches it
    NoMatches,
    /// There are no todos at all
    NoTodos,
    /// Todos exist, but none pass the filter
    FilteredOut,
}

impl EmptyView {
    /// Pick the explanation for an empty list
    ///
    /// An active search takes precedence over an empty collection.
    #[must_use]
    pub const fn classify(collection_empty: bool, search: &str) -> Self {
        if !search.is_empty() {
            Self::NoMatches
        } else if collection_empty {
            Self::NoTodos
        } else {
            Self::FilteredOut
        }
    }

    /// Headline
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::NoMatches => "No matching todos",
            Self::NoTodos => "No todos yet!",
            Self::FilteredOut => "No todos in this filter",
        }
    }

    /// Suggestion shown under the headline
    #[must_use]
    pub const fn hint(self) -> &'static str {
        match self {
            Self::NoMatches => "Try a different search term",
            Self::NoTodos => "Add a todo above to get started",
            Self::FilteredOut => "All todos are in a different category",
        }
    }
}

//! Reducer logic for the todo list.
//!
//! Commands are validated against state, turned into events, and the events
//! are applied. Events never leave this module, so the todo collection only
//! changes through a validated command. Deletions ask the injected
//! [`Confirm`] capability first.

use std::sync::Arc;

use crate::types::{
    Draft, EditBuffer, Notice, Priority, TodoAction, TodoId, TodoItem, TodoState,
};
use todo_core::{
    DateTime, SmallVec, Utc,
    effect::Effect,
    environment::{Clock, Confirm, IdGenerator, Prompt},
    reducer::Reducer,
    smallvec,
};

/// Environment dependencies for the todo reducer
#[derive(Clone)]
pub struct TodoEnvironment {
    /// Clock for creation timestamps
    pub clock: Arc<dyn Clock>,
    /// Source of todo identifiers
    pub ids: Arc<dyn IdGenerator>,
    /// Asks the user before destructive changes
    pub confirm: Arc<dyn Confirm>,
}

impl TodoEnvironment {
    /// Creates a new `TodoEnvironment`
    #[must_use]
    pub fn new(
        clock: Arc<dyn Clock>,
        ids: Arc<dyn IdGenerator>,
        confirm: Arc<dyn Confirm>,
    ) -> Self {
        Self {
            clock,
            ids,
            confirm,
        }
    }
}

/// A validated change to the todo list
#[derive(Clone, Debug, PartialEq, Eq)]
enum TodoEvent {
    TodoAdded {
        id: TodoId,
        text: String,
        priority: Priority,
        created_at: DateTime<Utc>,
    },
    TodoToggled {
        id: TodoId,
        completed: bool,
    },
    TodoDeleted {
        id: TodoId,
    },
    TodoEdited {
        id: TodoId,
        text: String,
    },
    PriorityChanged {
        id: TodoId,
        priority: Priority,
    },
    CompletedCleared {
        ids: Vec<TodoId>,
    },
    NoticeRaised {
        notice: Notice,
    },
}

/// Reducer for the todo list
#[derive(Clone, Debug)]
pub struct TodoReducer;

impl TodoReducer {
    /// Creates a new `TodoReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Prompt shown before deleting a single todo
    #[must_use]
    pub fn delete_prompt() -> Prompt {
        Prompt::new("Delete Todo", "Are you sure you want to delete this todo?")
            .with_confirm_label("Delete")
    }

    /// Prompt shown before clearing `count` completed todos
    #[must_use]
    pub fn clear_completed_prompt(count: usize) -> Prompt {
        let noun = if count == 1 { "todo" } else { "todos" };
        Prompt::new(
            "Clear Completed",
            format!("Are you sure you want to delete {count} completed {noun}?"),
        )
        .with_confirm_label("Clear")
    }

    /// Applies an event to state
    fn apply_event(state: &mut TodoState, event: &TodoEvent) {
        match event {
            TodoEvent::TodoAdded {
                id,
                text,
                priority,
                created_at,
            } => {
                state
                    .todos
                    .push(TodoItem::new(*id, text.clone(), *priority, *created_at));
                state.session.draft = Draft::default();
                state.notice = None;
            },
            TodoEvent::TodoToggled { id, completed } => {
                if let Some(todo) = state.get_mut(id) {
                    todo.completed = *completed;
                }
                state.notice = None;
            },
            TodoEvent::TodoDeleted { id } => {
                state.todos.retain(|todo| todo.id != *id);
                Self::close_edit_of(state, |editing| editing == id);
                state.notice = None;
            },
            TodoEvent::TodoEdited { id, text } => {
                if let Some(todo) = state.get_mut(id) {
                    todo.text.clone_from(text);
                }
                Self::close_edit_of(state, |editing| editing == id);
                state.notice = None;
            },
            TodoEvent::PriorityChanged { id, priority } => {
                if let Some(todo) = state.get_mut(id) {
                    todo.priority = *priority;
                }
                state.notice = None;
            },
            TodoEvent::CompletedCleared { ids } => {
                state.todos.retain(|todo| !ids.contains(&todo.id));
                Self::close_edit_of(state, |editing| ids.contains(editing));
                state.notice = None;
            },
            TodoEvent::NoticeRaised { notice } => {
                state.notice = Some(*notice);
            },
        }
    }

    fn close_edit_of(state: &mut TodoState, removed: impl Fn(&TodoId) -> bool) {
        if state
            .session
            .editing
            .as_ref()
            .is_some_and(|buffer| removed(&buffer.id))
        {
            state.session.editing = None;
        }
    }

    fn emit(state: &mut TodoState, event: TodoEvent) -> SmallVec<[Effect<TodoAction>; 4]> {
        tracing::trace!(?event, "Applying event");
        Self::apply_event(state, &event);
        SmallVec::new()
    }
}

impl Default for TodoReducer {
    fn default() -> Self {
        Self::new()
    }
}

impl Reducer for TodoReducer {
    type State = TodoState;
    type Action = TodoAction;
    type Environment = TodoEnvironment;

    #[allow(clippy::too_many_lines)] // One arm per action
    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            // ========== Commands ==========
            TodoAction::AddTodo { text, priority } => {
                let text = text.trim();
                if text.is_empty() {
                    tracing::debug!("Ignoring todo with blank text");
                    return SmallVec::new();
                }

                let event = TodoEvent::TodoAdded {
                    id: TodoId::from(env.ids.next_id()),
                    text: text.to_string(),
                    priority,
                    created_at: env.clock.now(),
                };
                Self::emit(state, event)
            },

            TodoAction::SubmitDraft => {
                let draft = state.session.draft.clone();
                smallvec![Effect::Send(TodoAction::AddTodo {
                    text: draft.text,
                    priority: draft.priority,
                })]
            },

            TodoAction::ToggleTodo { id } => {
                let Some(todo) = state.get(&id) else {
                    tracing::debug!(%id, "Toggle ignored, todo not found");
                    return SmallVec::new();
                };

                let event = TodoEvent::TodoToggled {
                    id,
                    completed: !todo.completed,
                };
                Self::emit(state, event)
            },

            TodoAction::DeleteTodo { id } => {
                if !state.exists(&id) {
                    tracing::debug!(%id, "Delete ignored, todo not found");
                    return SmallVec::new();
                }

                if !env.confirm.confirm(&Self::delete_prompt()) {
                    tracing::debug!(%id, "Delete cancelled");
                    return SmallVec::new();
                }

                tracing::info!(%id, "Todo deleted");
                Self::emit(state, TodoEvent::TodoDeleted { id })
            },

            TodoAction::EditTodo { id, text } => {
                if !state.exists(&id) {
                    tracing::debug!(%id, "Edit ignored, todo not found");
                    return SmallVec::new();
                }

                let text = text.trim();
                if text.is_empty() {
                    tracing::debug!(%id, "Edit rejected, blank text");
                    return Self::emit(
                        state,
                        TodoEvent::NoticeRaised {
                            notice: Notice::EmptyTodoText,
                        },
                    );
                }

                let event = TodoEvent::TodoEdited {
                    id,
                    text: text.to_string(),
                };
                Self::emit(state, event)
            },

            TodoAction::CyclePriority { id } => {
                let Some(todo) = state.get(&id) else {
                    tracing::debug!(%id, "Priority cycle ignored, todo not found");
                    return SmallVec::new();
                };

                let event = TodoEvent::PriorityChanged {
                    id,
                    priority: todo.priority.next(),
                };
                Self::emit(state, event)
            },

            TodoAction::SetPriority { id, priority } => {
                if !state.exists(&id) {
                    tracing::debug!(%id, "Priority change ignored, todo not found");
                    return SmallVec::new();
                }

                Self::emit(state, TodoEvent::PriorityChanged { id, priority })
            },

            TodoAction::ClearCompleted => {
                let ids: Vec<TodoId> = state
                    .todos
                    .iter()
                    .filter(|todo| todo.completed)
                    .map(|todo| todo.id)
                    .collect();

                if ids.is_empty() {
                    return Self::emit(
                        state,
                        TodoEvent::NoticeRaised {
                            notice: Notice::NothingToClear,
                        },
                    );
                }

                if !env
                    .confirm
                    .confirm(&Self::clear_completed_prompt(ids.len()))
                {
                    tracing::debug!(count = ids.len(), "Clear completed cancelled");
                    return SmallVec::new();
                }

                tracing::info!(count = ids.len(), "Completed todos cleared");
                Self::emit(state, TodoEvent::CompletedCleared { ids })
            },

            // ========== Edit buffer ==========
            TodoAction::StartEdit { id } => {
                if let Some(text) = state.get(&id).map(|todo| todo.text.clone()) {
                    state.session.editing = Some(EditBuffer { id, text });
                }
                SmallVec::new()
            },

            TodoAction::SetEditText { text } => {
                if let Some(buffer) = state.session.editing.as_mut() {
                    buffer.text = text;
                }
                SmallVec::new()
            },

            TodoAction::SaveEdit => match &state.session.editing {
                Some(buffer) => smallvec![Effect::Send(TodoAction::EditTodo {
                    id: buffer.id,
                    text: buffer.text.clone(),
                })],
                None => SmallVec::new(),
            },

            TodoAction::CancelEdit => {
                state.session.editing = None;
                SmallVec::new()
            },

            // ========== Session inputs ==========
            TodoAction::SetDraftText { text } => {
                state.session.draft.text = text;
                SmallVec::new()
            },

            TodoAction::SetDraftPriority { priority } => {
                state.session.draft.priority = priority;
                SmallVec::new()
            },

            TodoAction::SetFilter { filter } => {
                state.session.filter = filter;
                SmallVec::new()
            },

            TodoAction::SetSearch { text } => {
                state.session.search = text;
                SmallVec::new()
            },

            TodoAction::ClearSearch => {
                state.session.search.clear();
                SmallVec::new()
            },

            TodoAction::DismissNotice => {
                state.notice = None;
                SmallVec::new()
            },
        }
    }
}

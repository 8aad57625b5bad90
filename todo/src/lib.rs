//! In-memory todo list built on the reducer architecture.
//!
//! Todos are added, edited, toggled, prioritized, filtered, searched and
//! deleted by sending [`TodoAction`]s to a store driving [`TodoReducer`].
//! The list the user sees is derived on every read: filtered, searched, and
//! sorted by priority then recency.
//!
//! Deleting a todo and clearing completed todos ask the injected
//! [`Confirm`](todo_core::environment::Confirm) capability first.
//!
//! # Quick Start
//!
//! ```
//! use std::sync::Arc;
//! use todo::{Filter, Priority, TodoAction, TodoEnvironment, TodoReducer, TodoState};
//! use todo_core::environment::{AlwaysConfirm, SystemClock, UuidGenerator};
//! use todo_runtime::Store;
//!
//! # fn main() -> Result<(), todo_runtime::StoreError> {
//! let env = TodoEnvironment::new(
//!     Arc::new(SystemClock),
//!     Arc::new(UuidGenerator),
//!     Arc::new(AlwaysConfirm),
//! );
//! let mut store = Store::new(TodoState::new(), TodoReducer::new(), env);
//!
//! store.send(TodoAction::AddTodo {
//!     text: "Buy milk".to_string(),
//!     priority: Priority::High,
//! })?;
//! let id = store.state(|s| s.todos[0].id);
//! store.send(TodoAction::ToggleTodo { id })?;
//! store.send(TodoAction::SetFilter { filter: Filter::Active })?;
//!
//! assert!(store.state(|s| s.visible().is_empty()));
//! assert_eq!(store.state(|s| s.stats().completed), 1);
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod reducer;
pub mod types;
pub mod view;

// Re-export commonly used types
pub use config::{Config, ConfigError};
pub use reducer::{TodoEnvironment, TodoReducer};
pub use types::{
    Draft, EditBuffer, Filter, Notice, Priority, Session, Severity, TodoAction, TodoId, TodoItem,
    TodoState,
};
pub use view::{EmptyView, TodoStats, query};

/// Store type for the todo list
pub type TodoStore = todo_runtime::Store<TodoState, TodoAction, TodoEnvironment, TodoReducer>;

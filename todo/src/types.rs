//! Domain types for the todo list.
//!
//! A todo list is an ordered collection of todo items plus the session
//! inputs a screen keeps next to it: the active filter, the search text, the
//! draft being typed and an optional edit buffer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

use crate::view::{self, EmptyView, TodoStats};

/// Unique identifier for a todo item
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TodoId(Uuid);

impl TodoId {
    /// Creates a new random `TodoId`
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TodoId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for TodoId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for TodoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error returned when parsing a [`Priority`] or [`Filter`] from text
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown {kind} `{value}` (expected one of: {expected})")]
pub struct ParseChoiceError {
    kind: &'static str,
    value: String,
    expected: &'static str,
}

/// How urgent a todo is
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Shown first
    High,
    /// Default for new todos
    #[default]
    Medium,
    /// Shown last
    Low,
}

impl Priority {
    /// Sort weight: high=3, medium=2, low=1
    #[must_use]
    pub const fn weight(self) -> u8 {
        match self {
            Self::High => 3,
            Self::Medium => 2,
            Self::Low => 1,
        }
    }

    /// The next priority in the cycle high → medium → low → high
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::High => Self::Medium,
            Self::Medium => Self::Low,
            Self::Low => Self::High,
        }
    }

    /// Human readable label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Priority {
    type Err = ParseChoiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "high" | "h" => Ok(Self::High),
            "medium" | "m" => Ok(Self::Medium),
            "low" | "l" => Ok(Self::Low),
            _ => Err(ParseChoiceError {
                kind: "priority",
                value: s.to_string(),
                expected: "high, medium, low",
            }),
        }
    }
}

/// Which todos the list shows
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Filter {
    /// Every todo
    #[default]
    All,
    /// Todos not yet completed
    Active,
    /// Completed todos
    Completed,
}

impl Filter {
    /// Whether a todo with the given completion flag passes this filter
    #[must_use]
    pub const fn admits(self, completed: bool) -> bool {
        match self {
            Self::All => true,
            Self::Active => !completed,
            Self::Completed => completed,
        }
    }

    /// Human readable label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Active => "Active",
            Self::Completed => "Completed",
        }
    }
}

impl std::fmt::Display for Filter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Filter {
    type Err = ParseChoiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "active" => Ok(Self::Active),
            "completed" | "done" => Ok(Self::Completed),
            _ => Err(ParseChoiceError {
                kind: "filter",
                value: s.to_string(),
                expected: "all, active, completed",
            }),
        }
    }
}

/// A single todo item
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItem {
    /// Unique identifier
    pub id: TodoId,
    /// Trimmed, never blank
    pub text: String,
    /// Whether the todo is completed
    pub completed: bool,
    /// Urgency, used as the primary sort key
    pub priority: Priority,
    /// When the todo was created
    pub created_at: DateTime<Utc>,
}

impl TodoItem {
    /// Creates a new, not yet completed, todo item
    #[must_use]
    pub const fn new(
        id: TodoId,
        text: String,
        priority: Priority,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            text,
            completed: false,
            priority,
            created_at,
        }
    }
}

/// The pending input of the "add" row
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Draft {
    /// Text typed so far, untrimmed
    pub text: String,
    /// Priority the next todo will get
    pub priority: Priority,
}

/// An open edit of an existing todo
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditBuffer {
    /// The todo being edited
    pub id: TodoId,
    /// Replacement text, untrimmed
    pub text: String,
}

/// Session inputs that shape the visible list
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Active completion filter
    pub filter: Filter,
    /// Case-insensitive substring to match against todo text
    pub search: String,
    /// Pending new todo
    pub draft: Draft,
    /// Open edit, if any
    pub editing: Option<EditBuffer>,
}

/// How loudly a notice should be shown
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Something the user did was rejected
    Error,
    /// Nothing went wrong, but nothing happened either
    Info,
}

/// A user-visible message raised by the reducer
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Notice {
    /// An edit would have left the todo blank
    EmptyTodoText,
    /// `ClearCompleted` found nothing to remove
    NothingToClear,
}

impl Notice {
    /// Severity of the notice
    #[must_use]
    pub const fn severity(self) -> Severity {
        match self {
            Self::EmptyTodoText => Severity::Error,
            Self::NothingToClear => Severity::Info,
        }
    }

    /// Title of the dialog showing the notice
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self.severity() {
            Severity::Error => "Error",
            Severity::Info => "Info",
        }
    }

    /// Message body
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::EmptyTodoText => "Todo text cannot be empty",
            Self::NothingToClear => "No completed todos to clear",
        }
    }
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.title(), self.message())
    }
}

/// State of the todo list
///
/// `todos` keeps insertion order; display order is derived on every read.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoState {
    /// All todos, oldest first
    pub todos: Vec<TodoItem>,
    /// Filter, search, draft and edit buffer
    pub session: Session,
    /// Last notice raised and not yet dismissed
    pub notice: Option<Notice>,
}

impl TodoState {
    /// Creates a new empty todo state
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of todos
    #[must_use]
    pub fn count(&self) -> usize {
        self.todos.len()
    }

    /// Returns a todo by ID
    #[must_use]
    pub fn get(&self, id: &TodoId) -> Option<&TodoItem> {
        self.todos.iter().find(|t| t.id == *id)
    }

    pub(crate) fn get_mut(&mut self, id: &TodoId) -> Option<&mut TodoItem> {
        self.todos.iter_mut().find(|t| t.id == *id)
    }

    /// Checks if a todo exists
    #[must_use]
    pub fn exists(&self, id: &TodoId) -> bool {
        self.get(id).is_some()
    }

    /// The list as the session currently shows it: filtered, searched, sorted
    #[must_use]
    pub fn visible(&self) -> Vec<&TodoItem> {
        view::query(&self.todos, self.session.filter, &self.session.search)
    }

    /// Aggregate counts over every todo, ignoring filter and search
    #[must_use]
    pub fn stats(&self) -> TodoStats {
        TodoStats::of(&self.todos)
    }

    /// Why the visible list is empty, or `None` when it is not
    #[must_use]
    pub fn empty_view(&self) -> Option<EmptyView> {
        if self.visible().is_empty() {
            Some(EmptyView::classify(self.todos.is_empty(), &self.session.search))
        } else {
            None
        }
    }
}

/// Actions the todo list accepts
///
/// Every action is an intent from the user. The reducer validates it against
/// state before anything in the todo collection changes; there is no way to
/// write a todo that skipped that validation. Session inputs (filter, search,
/// draft, edit buffer) are applied directly.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TodoAction {
    /// Command: Add a todo; blank text is ignored
    AddTodo {
        /// Text of the todo, trimmed before storing
        text: String,
        /// Priority of the new todo
        priority: Priority,
    },

    /// Command: Add the session draft as a todo
    SubmitDraft,

    /// Command: Replace the draft text
    SetDraftText {
        /// New draft text
        text: String,
    },

    /// Command: Choose the priority for the next todo
    SetDraftPriority {
        /// Selected priority
        priority: Priority,
    },

    /// Command: Flip a todo between active and completed
    ToggleTodo {
        /// Todo to toggle
        id: TodoId,
    },

    /// Command: Delete a todo, after confirmation
    DeleteTodo {
        /// Todo to delete
        id: TodoId,
    },

    /// Command: Replace a todo's text; blank text is rejected
    EditTodo {
        /// Todo to edit
        id: TodoId,
        /// Replacement text, trimmed before storing
        text: String,
    },

    /// Command: Open the edit buffer for a todo
    StartEdit {
        /// Todo to edit
        id: TodoId,
    },

    /// Command: Replace the text in the edit buffer
    SetEditText {
        /// New buffer text
        text: String,
    },

    /// Command: Apply the edit buffer
    SaveEdit,

    /// Command: Discard the edit buffer
    CancelEdit,

    /// Command: Advance a todo's priority high → medium → low → high
    CyclePriority {
        /// Todo to update
        id: TodoId,
    },

    /// Command: Set a todo's priority
    SetPriority {
        /// Todo to update
        id: TodoId,
        /// New priority
        priority: Priority,
    },

    /// Command: Delete all completed todos, after confirmation
    ClearCompleted,

    /// Command: Change the completion filter
    SetFilter {
        /// New filter
        filter: Filter,
    },

    /// Command: Change the search text
    SetSearch {
        /// New search text
        text: String,
    },

    /// Command: Clear the search text
    ClearSearch,

    /// Command: Dismiss the outstanding notice
    DismissNotice,
}

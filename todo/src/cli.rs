//! Line commands for the terminal front end.
//!
//! Each input line parses into a [`Command`]. Commands that change the list
//! translate into the [`TodoAction`]s a screen would send; list positions are
//! resolved against the list as currently displayed.

use std::fmt::Write as _;

use thiserror::Error;

use crate::types::{Filter, ParseChoiceError, Priority, TodoAction, TodoItem, TodoState};
use crate::view::TodoStats;

/// Help text listing every command
pub const HELP: &str = "\
Commands:
  add [high|medium|low] <text>   add a todo (priority defaults to the selected one)
  select <high|medium|low>       select the priority for the next todo
  toggle <n>                     mark todo n done / not done
  edit <n> <text>                replace the text of todo n
  cycle <n>                      cycle the priority of todo n
  priority <n> <high|medium|low> set the priority of todo n
  delete <n>                     delete todo n (asks first)
  clear                          delete all completed todos (asks first)
  filter <all|active|completed>  choose which todos are listed
  search [text]                  search todo text; no text clears the search
  list | stats | json            show the list, the counts, or the list as JSON
  help | quit";

/// Errors produced while turning a line into actions
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// The line had no command word
    #[error("Empty command, type `help` for a list of commands")]
    Empty,

    /// The command word is not known
    #[error("Unknown command `{0}`, type `help` for a list of commands")]
    Unknown(String),

    /// A required argument is missing
    #[error("`{command}` needs {what}")]
    MissingArgument {
        /// The command
        command: &'static str,
        /// Description of the missing argument
        what: &'static str,
    },

    /// A list position is not a number
    #[error("`{0}` is not a list position")]
    BadPosition(String),

    /// A list position is outside the displayed list
    #[error("There is no todo {position} in the list ({len} shown)")]
    OutOfRange {
        /// The 1-based position given
        position: usize,
        /// Number of todos displayed
        len: usize,
    },

    /// A priority or filter name was not recognised
    #[error(transparent)]
    Choice(#[from] ParseChoiceError),
}

/// A parsed input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Add a todo
    Add {
        /// Explicit priority, otherwise the selected one
        priority: Option<Priority>,
        /// Text as typed
        text: String,
    },
    /// Select the priority for the next todo
    Select(Priority),
    /// Toggle the todo at a position
    Toggle(usize),
    /// Replace the text of the todo at a position
    Edit {
        /// 1-based position
        position: usize,
        /// Replacement text as typed
        text: String,
    },
    /// Cycle the priority of the todo at a position
    Cycle(usize),
    /// Set the priority of the todo at a position
    SetPriority {
        /// 1-based position
        position: usize,
        /// New priority
        priority: Priority,
    },
    /// Delete the todo at a position
    Delete(usize),
    /// Delete every completed todo
    ClearCompleted,
    /// Change the filter
    Filter(Filter),
    /// Change the search text; empty clears it
    Search(String),
    /// Show the list
    List,
    /// Show the counts
    Stats,
    /// Show the list as JSON
    Json,
    /// Show help
    Help,
    /// Leave
    Quit,
}

impl Command {
    /// Parse one input line
    ///
    /// # Errors
    ///
    /// Returns a [`CommandError`] describing what is wrong with the line.
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let line = line.trim();
        let (word, rest) = split_word(line);

        match word.to_ascii_lowercase().as_str() {
            "" => Err(CommandError::Empty),
            "add" | "a" => {
                let (first, remainder) = split_word(rest);
                Ok(match first.parse::<Priority>() {
                    Ok(priority) => Self::Add {
                        priority: Some(priority),
                        text: remainder.to_string(),
                    },
                    Err(_) => Self::Add {
                        priority: None,
                        text: rest.to_string(),
                    },
                })
            },
            "select" => Ok(Self::Select(require(rest, "select", "a priority")?.parse()?)),
            "toggle" | "t" => Ok(Self::Toggle(position(rest, "toggle")?)),
            "edit" | "e" => {
                let (first, text) = split_word(rest);
                Ok(Self::Edit {
                    position: position(first, "edit")?,
                    text: text.to_string(),
                })
            },
            "cycle" | "c" => Ok(Self::Cycle(position(rest, "cycle")?)),
            "priority" | "p" => {
                let (first, priority) = split_word(rest);
                Ok(Self::SetPriority {
                    position: position(first, "priority")?,
                    priority: require(priority, "priority", "a priority")?.parse()?,
                })
            },
            "delete" | "d" | "rm" => Ok(Self::Delete(position(rest, "delete")?)),
            "clear" => Ok(Self::ClearCompleted),
            "filter" | "f" => Ok(Self::Filter(require(rest, "filter", "a filter")?.parse()?)),
            "search" | "s" => Ok(Self::Search(rest.to_string())),
            "list" | "ls" => Ok(Self::List),
            "stats" => Ok(Self::Stats),
            "json" => Ok(Self::Json),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" | "q" => Ok(Self::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }

    /// Actions to send for this command, resolving positions against `visible`
    ///
    /// Display-only commands produce no actions.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::OutOfRange`] if a position is not displayed.
    pub fn actions(&self, visible: &[&TodoItem]) -> Result<Vec<TodoAction>, CommandError> {
        let at = |position: usize| {
            position
                .checked_sub(1)
                .and_then(|index| visible.get(index))
                .map(|todo| todo.id)
                .ok_or(CommandError::OutOfRange {
                    position,
                    len: visible.len(),
                })
        };

        Ok(match self {
            Self::Add { priority, text } => {
                let mut actions = vec![TodoAction::SetDraftText { text: text.clone() }];
                // A blank add is ignored, so it must not change the selection either
                if let Some(priority) = priority.filter(|_| !text.trim().is_empty()) {
                    actions.push(TodoAction::SetDraftPriority { priority });
                }
                actions.push(TodoAction::SubmitDraft);
                actions
            },
            Self::Select(priority) => vec![TodoAction::SetDraftPriority {
                priority: *priority,
            }],
            Self::Toggle(position) => vec![TodoAction::ToggleTodo { id: at(*position)? }],
            Self::Edit { position, text } => {
                let id = at(*position)?;
                vec![
                    TodoAction::StartEdit { id },
                    TodoAction::SetEditText { text: text.clone() },
                    TodoAction::SaveEdit,
                    // No-op once the edit applied; closes the buffer after a rejected one
                    TodoAction::CancelEdit,
                ]
            },
            Self::Cycle(position) => vec![TodoAction::CyclePriority { id: at(*position)? }],
            Self::SetPriority { position, priority } => vec![TodoAction::SetPriority {
                id: at(*position)?,
                priority: *priority,
            }],
            Self::Delete(position) => vec![TodoAction::DeleteTodo { id: at(*position)? }],
            Self::ClearCompleted => vec![TodoAction::ClearCompleted],
            Self::Filter(filter) => vec![TodoAction::SetFilter { filter: *filter }],
            Self::Search(text) if text.is_empty() => vec![TodoAction::ClearSearch],
            Self::Search(text) => vec![TodoAction::SetSearch { text: text.clone() }],
            Self::List | Self::Stats | Self::Json | Self::Help | Self::Quit => Vec::new(),
        })
    }
}

fn split_word(input: &str) -> (&str, &str) {
    let input = input.trim_start();
    match input.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim_start()),
        None => (input, ""),
    }
}

fn require<'a>(
    value: &'a str,
    command: &'static str,
    what: &'static str,
) -> Result<&'a str, CommandError> {
    let value = value.trim();
    if value.is_empty() {
        Err(CommandError::MissingArgument { command, what })
    } else {
        Ok(value)
    }
}

fn position(value: &str, command: &'static str) -> Result<usize, CommandError> {
    let value = require(value, command, "a list position")?;
    value
        .parse()
        .map_err(|_| CommandError::BadPosition(value.to_string()))
}

/// Counts line, e.g. `Total: 3  Active: 2  Done: 1  High: 1`
///
/// The high-priority count is only shown when non-zero.
#[must_use]
pub fn render_stats(stats: &TodoStats) -> String {
    let mut line = format!(
        "Total: {}  Active: {}  Done: {}",
        stats.total, stats.active, stats.completed
    );
    if stats.active_high > 0 {
        let _ = write!(line, "  High: {}", stats.active_high);
    }
    line
}

/// The visible list with 1-based positions, or the empty-state explanation
#[must_use]
pub fn render_list(state: &TodoState) -> String {
    let mut out = format!("[{}]", state.session.filter);
    if !state.session.search.is_empty() {
        let _ = write!(out, " search: \"{}\"", state.session.search);
    }
    out.push('\n');

    if let Some(empty) = state.empty_view() {
        let _ = write!(out, "  {}\n  {}", empty.title(), empty.hint());
        return out;
    }

    for (index, todo) in state.visible().iter().enumerate() {
        let mark = if todo.completed { 'x' } else { ' ' };
        let _ = writeln!(
            out,
            "  {:>2}. [{mark}] {} ({})",
            index + 1,
            todo.text,
            todo.priority
        );
    }
    out.truncate(out.trim_end().len());
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{TodoId, TodoItem};
    use chrono::Utc;

    fn item(text: &str, priority: Priority, completed: bool) -> TodoItem {
        let mut item = TodoItem::new(TodoId::new(), text.to_string(), priority, Utc::now());
        item.completed = completed;
        item
    }

    #[test]
    fn parses_add_with_and_without_priority() {
        assert_eq!(
            Command::parse("add high Buy milk"),
            Ok(Command::Add {
                priority: Some(Priority::High),
                text: "Buy milk".to_string(),
            })
        );
        assert_eq!(
            Command::parse("  add   Call mom "),
            Ok(Command::Add {
                priority: None,
                text: "Call mom".to_string(),
            })
        );
        assert_eq!(
            Command::parse("add"),
            Ok(Command::Add {
                priority: None,
                text: String::new(),
            })
        );
    }

    #[test]
    fn parses_positional_commands() {
        assert_eq!(Command::parse("toggle 2"), Ok(Command::Toggle(2)));
        assert_eq!(
            Command::parse("edit 1 New text"),
            Ok(Command::Edit {
                position: 1,
                text: "New text".to_string(),
            })
        );
        assert_eq!(
            Command::parse("priority 3 low"),
            Ok(Command::SetPriority {
                position: 3,
                priority: Priority::Low,
            })
        );
        assert_eq!(Command::parse("search"), Ok(Command::Search(String::new())));
        assert_eq!(
            Command::parse("filter active"),
            Ok(Command::Filter(Filter::Active))
        );
    }

    #[test]
    fn reports_bad_input() {
        assert_eq!(Command::parse("   "), Err(CommandError::Empty));
        assert_eq!(
            Command::parse("frobnicate"),
            Err(CommandError::Unknown("frobnicate".to_string()))
        );
        assert_eq!(
            Command::parse("toggle"),
            Err(CommandError::MissingArgument {
                command: "toggle",
                what: "a list position",
            })
        );
        assert_eq!(
            Command::parse("delete one"),
            Err(CommandError::BadPosition("one".to_string()))
        );
        assert!(matches!(
            Command::parse("filter someday"),
            Err(CommandError::Choice(_))
        ));
    }

    #[test]
    fn add_translates_to_draft_submission() {
        let command = Command::parse("add low Water plants").unwrap();

        assert_eq!(
            command.actions(&[]).unwrap(),
            vec![
                TodoAction::SetDraftText {
                    text: "Water plants".to_string(),
                },
                TodoAction::SetDraftPriority {
                    priority: Priority::Low,
                },
                TodoAction::SubmitDraft,
            ]
        );
    }

    #[test]
    fn blank_add_keeps_selected_priority() {
        let command = Command::parse("add high").unwrap();

        assert_eq!(
            command.actions(&[]).unwrap(),
            vec![
                TodoAction::SetDraftText {
                    text: String::new(),
                },
                TodoAction::SubmitDraft,
            ]
        );
    }

    #[test]
    fn edit_closes_the_buffer_afterwards() {
        let first = item("first", Priority::High, false);

        assert_eq!(
            Command::parse("edit 1").unwrap().actions(&[&first]).unwrap(),
            vec![
                TodoAction::StartEdit { id: first.id },
                TodoAction::SetEditText {
                    text: String::new(),
                },
                TodoAction::SaveEdit,
                TodoAction::CancelEdit,
            ]
        );
    }

    #[test]
    fn positions_resolve_against_visible_list() {
        let first = item("first", Priority::High, false);
        let second = item("second", Priority::Low, false);
        let visible = vec![&first, &second];

        assert_eq!(
            Command::Toggle(2).actions(&visible).unwrap(),
            vec![TodoAction::ToggleTodo { id: second.id }]
        );
        assert_eq!(
            Command::Delete(3).actions(&visible),
            Err(CommandError::OutOfRange {
                position: 3,
                len: 2,
            })
        );
        assert!(Command::Cycle(0).actions(&visible).is_err());
    }

    #[test]
    fn stats_line_hides_zero_high_count() {
        let mut stats = TodoStats {
            total: 2,
            active: 1,
            completed: 1,
            active_high: 0,
        };
        assert_eq!(render_stats(&stats), "Total: 2  Active: 1  Done: 1");

        stats.active_high = 1;
        assert_eq!(render_stats(&stats), "Total: 2  Active: 1  Done: 1  High: 1");
    }

    #[test]
    fn list_rendering() {
        let mut state = TodoState::new();
        assert_eq!(
            render_list(&state),
            "[All]\n  No todos yet!\n  Add a todo above to get started"
        );

        state.todos.push(item("Buy milk", Priority::High, true));
        state.todos.push(item("Call mom", Priority::Low, false));
        assert_eq!(
            render_list(&state),
            "[All]\n   1. [x] Buy milk (High)\n   2. [ ] Call mom (Low)"
        );

        state.session.search = "zzz".to_string();
        assert_eq!(
            render_list(&state),
            "[All] search: \"zzz\"\n  No matching todos\n  Try a different search term"
        );
    }
}

//! Line commands understood by the `todo` binary.

use crate::filter::{Filter, ParseFilterError};
use crate::types::{TodoAction, TodoId};
use std::str::FromStr;
use thiserror::Error;

/// Usage text printed by `help`
pub const HELP: &str = "\
Commands:
  add <text>        add a todo
  toggle <id>       flip a todo between pending and completed
  delete <id>       remove a todo
  edit <id>         start editing a todo
  buffer <text>     replace the edit buffer
  save              commit the edit
  cancel            abandon the edit
  draft <text>      replace the new-todo draft
  submit            add the draft as a todo
  done-all          complete every todo
  clear             remove every todo
  filter <all|pending|completed>
  json              print the current view as JSON
  help              show this message
  quit              exit
";

/// Errors produced while parsing a command line
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// First word is not a known command
    #[error("unknown command '{0}' (try 'help')")]
    Unknown(String),

    /// Command needs an argument that was not given
    #[error("'{command}' needs {argument}")]
    MissingArgument {
        /// Command name
        command: &'static str,
        /// What was expected
        argument: &'static str,
    },

    /// Argument is not a todo id
    #[error("'{0}' is not a todo id")]
    InvalidId(String),

    /// Argument is not a filter name
    #[error(transparent)]
    InvalidFilter(#[from] ParseFilterError),
}

/// One parsed input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// A gesture forwarded to the session
    Dispatch(TodoAction),
    /// Print the view as JSON
    Json,
    /// Print usage
    Help,
    /// Leave the loop
    Quit,
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim_start();
        let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));

        let action = match word.to_ascii_lowercase().as_str() {
            "json" => return Ok(Self::Json),
            "help" | "?" => return Ok(Self::Help),
            "quit" | "exit" => return Ok(Self::Quit),
            "add" => TodoAction::SubmitNewTodo {
                text: text_argument("add", rest)?,
            },
            "toggle" => TodoAction::Toggle {
                id: id_argument("toggle", rest)?,
            },
            "delete" | "rm" => TodoAction::Delete {
                id: id_argument("delete", rest)?,
            },
            "edit" => TodoAction::StartEdit {
                id: id_argument("edit", rest)?,
            },
            // Empty buffers are allowed; committing them blanks the todo.
            "buffer" => TodoAction::EditBufferChanged {
                text: rest.to_string(),
            },
            "save" => TodoAction::CommitEdit,
            "cancel" => TodoAction::CancelEdit,
            "draft" => TodoAction::DraftChanged {
                text: rest.to_string(),
            },
            "submit" => TodoAction::SubmitDraft,
            "done-all" => TodoAction::MarkAllDone,
            "clear" => TodoAction::ClearAll,
            "filter" => {
                let raw = rest.trim();
                if raw.is_empty() {
                    return Err(CommandError::MissingArgument {
                        command: "filter",
                        argument: "all, pending or completed",
                    });
                }
                TodoAction::SetFilter {
                    filter: raw.parse::<Filter>()?,
                }
            },
            _ => return Err(CommandError::Unknown(word.to_string())),
        };

        Ok(Self::Dispatch(action))
    }
}

fn text_argument(command: &'static str, rest: &str) -> Result<String, CommandError> {
    if rest.trim().is_empty() {
        return Err(CommandError::MissingArgument {
            command,
            argument: "some text",
        });
    }
    Ok(rest.to_string())
}

fn id_argument(command: &'static str, rest: &str) -> Result<TodoId, CommandError> {
    let raw = rest.trim();
    if raw.is_empty() {
        return Err(CommandError::MissingArgument {
            command,
            argument: "a todo id",
        });
    }
    raw.trim_start_matches('#')
        .parse()
        .map_err(|_| CommandError::InvalidId(raw.to_string()))
}

//! # Console Commands
//!
//! One line of user input maps to one [`DashboardCommand`].

use crate::dashboard::models::RecordId;
use std::str::FromStr;

/// Help shown for the `help` command and after a parse error
pub const HELP_TEXT: &str = "\
Commands:
  next | prev | page N      move between pages
  refresh                   reload the current page
  new                       open the editor for a new record
  edit ID                   open the editor on a displayed record
  set FIELD VALUE           edit title, description, location or image
  submit | cancel           save or discard the open draft
  delete ID                 delete a record
  help | quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DashboardCommand {
    NextPage,
    PrevPage,
    GoTo(usize),
    Refresh,
    New,
    Edit(RecordId),
    Set { field: String, value: String },
    Submit,
    Cancel,
    Delete(RecordId),
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandParseError {
    #[error("empty command")]
    Empty,
    #[error("unknown command '{0}'")]
    Unknown(String),
    #[error("'{command}' needs {expected}")]
    MissingArgument {
        command: &'static str,
        expected: &'static str,
    },
    #[error("'{0}' is not a valid number")]
    InvalidNumber(String),
}

fn parse_number<T: FromStr>(value: &str) -> Result<T, CommandParseError> {
    value
        .parse()
        .map_err(|_| CommandParseError::InvalidNumber(value.to_string()))
}

impl FromStr for DashboardCommand {
    type Err = CommandParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match word.to_ascii_lowercase().as_str() {
            "" => return Err(CommandParseError::Empty),
            "next" | "n" => DashboardCommand::NextPage,
            "prev" | "p" => DashboardCommand::PrevPage,
            "page" | "goto" => {
                if rest.is_empty() {
                    return Err(CommandParseError::MissingArgument {
                        command: "page",
                        expected: "a page number",
                    });
                }
                DashboardCommand::GoTo(parse_number(rest)?)
            }
            "refresh" | "retry" | "r" => DashboardCommand::Refresh,
            "new" => DashboardCommand::New,
            "edit" => {
                if rest.is_empty() {
                    return Err(CommandParseError::MissingArgument {
                        command: "edit",
                        expected: "a record id",
                    });
                }
                DashboardCommand::Edit(parse_number(rest)?)
            }
            "set" => {
                let (field, value) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
                if field.is_empty() {
                    return Err(CommandParseError::MissingArgument {
                        command: "set",
                        expected: "a field name and a value",
                    });
                }
                DashboardCommand::Set {
                    field: field.to_string(),
                    value: value.trim().to_string(),
                }
            }
            "submit" | "save" => DashboardCommand::Submit,
            "cancel" => DashboardCommand::Cancel,
            "delete" | "rm" => {
                if rest.is_empty() {
                    return Err(CommandParseError::MissingArgument {
                        command: "delete",
                        expected: "a record id",
                    });
                }
                DashboardCommand::Delete(parse_number(rest)?)
            }
            "help" | "?" => DashboardCommand::Help,
            "quit" | "exit" | "q" => DashboardCommand::Quit,
            other => return Err(CommandParseError::Unknown(other.to_string())),
        };
        Ok(command)
    }
}

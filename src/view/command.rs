//! Commands accepted by the interactive terminal view.

use crate::query::{SearchBy, UnknownSearchBy};
use std::str::FromStr;
use thiserror::Error;

pub const HELP: &str = "\
Commands:
  search <address|hash|block|any> <text...>  filter transactions (resets to page 1)
  clear                                      remove the filter
  page <n>                                   go to page n
  next | prev                                move one page
  dismiss                                    hide the alert
  help                                       show this message
  quit                                       exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Search { search_by: SearchBy, text: String },
    Clear,
    Page(u64),
    Next,
    Previous,
    Dismiss,
    Help,
    Quit,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CommandError {
    #[error("Empty command")]
    Empty,

    #[error("Unknown command: {0}. Type 'help' for a list")]
    Unknown(String),

    #[error("Missing argument for '{0}'")]
    MissingArgument(&'static str),

    #[error("Invalid page number: {0}")]
    InvalidPage(String),

    #[error(transparent)]
    SearchBy(#[from] UnknownSearchBy),
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (name, rest) = match line.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (line, ""),
        };

        match name.to_lowercase().as_str() {
            "" => Err(CommandError::Empty),
            "search" | "s" => {
                let (field, text) = match rest.split_once(char::is_whitespace) {
                    Some((field, text)) => (field, text.trim()),
                    None => (rest, ""),
                };
                if field.is_empty() {
                    return Err(CommandError::MissingArgument("search"));
                }
                Ok(Command::Search {
                    search_by: field.parse()?,
                    text: text.to_string(),
                })
            }
            "clear" => Ok(Command::Clear),
            "page" | "p" => {
                if rest.is_empty() {
                    return Err(CommandError::MissingArgument("page"));
                }
                match rest.parse::<u64>() {
                    Ok(page) if page >= 1 => Ok(Command::Page(page)),
                    _ => Err(CommandError::InvalidPage(rest.to_string())),
                }
            }
            "next" | "n" => Ok(Command::Next),
            "prev" | "previous" => Ok(Command::Previous),
            "dismiss" => Ok(Command::Dismiss),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" | "q" => Ok(Command::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

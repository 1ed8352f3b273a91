use crate::models::{InvalidPageSize, PageSize};
use std::str::FromStr;
use thiserror::Error;

pub const HELP: &str = "\
Commands:
  n, next          next page
  p, prev          previous page
  g, go <number>   go to a comic (0 for the latest)
  r, random        go to a random comic
  s, size <1|3|5>  change the page size
  h, help          show this help
  q, quit          exit";

/// A line typed at the prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Next,
    Previous,
    Go(u32),
    Random,
    Size(PageSize),
    Help,
    Quit,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CommandError {
    #[error("Please enter the serial number of the comic to view.")]
    MissingNumber,
    #[error("Please enter a valid number.")]
    InvalidNumber,
    #[error("Please choose a page size of 1, 3 or 5.")]
    MissingPageSize,
    #[error("{0}")]
    PageSize(#[from] InvalidPageSize),
    #[error("Unknown command {0:?}, type h for help.")]
    Unknown(String),
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let name = words.next().unwrap_or_default().to_lowercase();
        let arg = words.next();

        match name.as_str() {
            "n" | "next" => Ok(Command::Next),
            "p" | "prev" | "previous" => Ok(Command::Previous),
            "r" | "random" => Ok(Command::Random),
            "h" | "help" | "?" => Ok(Command::Help),
            "q" | "quit" | "exit" => Ok(Command::Quit),
            "g" | "go" => {
                let arg = arg.ok_or(CommandError::MissingNumber)?;
                let num = arg.parse().map_err(|_| CommandError::InvalidNumber)?;
                Ok(Command::Go(num))
            }
            "s" | "size" => {
                let arg = arg.ok_or(CommandError::MissingPageSize)?;
                Ok(Command::Size(arg.parse()?))
            }
            _ => Err(CommandError::Unknown(line.trim().into())),
        }
    }
}

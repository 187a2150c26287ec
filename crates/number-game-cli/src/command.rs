//! Line commands typed at the prompt.

use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Leave the menu with the configured rules
    Start,
    /// `names Ana, Ben`
    Names(Vec<String>),
    Round,
    /// `card 3`, counted from 1 like the cards on screen
    Card(usize),
    /// Anything else is typed digits: a secret, guess or arrangement
    Digits(String),
    Reset,
    View,
    /// The view as JSON, as a browser front end would receive it
    Json,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("Type something, or \"help\"")]
    Empty,
    #[error("Usage: card <1-5>")]
    Card,
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        match word.to_ascii_lowercase().as_str() {
            "" => Err(CommandError::Empty),
            "start" => Ok(Command::Start),
            "names" => Ok(Command::Names(
                rest.split(',').map(|n| n.trim().to_string()).collect(),
            )),
            "round" | "go" => Ok(Command::Round),
            "card" => rest
                .parse::<usize>()
                .ok()
                .and_then(|n| n.checked_sub(1))
                .map(Command::Card)
                .ok_or(CommandError::Card),
            "reset" | "menu" => Ok(Command::Reset),
            "view" => Ok(Command::View),
            "json" => Ok(Command::Json),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            _ => Ok(Command::Digits(line.to_string())),
        }
    }
}

pub const HELP: &str = "\
Commands:
  start            leave the menu and seat the players
  names Ana, Ben   set player names (any time)
  round            start the current player's round
  card N           pick power-up card N (1-5)
  371              submit digits: a secret, a guess or an arrangement
  view             show the table
  json             dump the table as JSON
  reset            back to the menu
  quit";

//! User commands and their text syntax

use std::str::FromStr;
use thiserror::Error;

use crate::state::{DurationError, Hours, Minutes};

/// Help text listing every command
pub const HELP_TEXT: &str = "\
Commands:
  hours <H>, h <H>    - Select hours (0-23)
  mins <M>, m <M>     - Select minutes (0-59)
  h+ / h- / m+ / m-   - Step a picker by one
  toggle, t, <enter>  - Start Timer / Stop Music
  start               - Start the countdown
  stop                - Stop the countdown
  silence             - Stop the alarm
  status              - Print the current state as JSON
  help                - Show this help
  quit, q             - Exit";

/// An action requested by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    SetHours(Hours),
    SetMinutes(Minutes),
    HoursUp,
    HoursDown,
    MinutesUp,
    MinutesDown,
    /// Stop the alarm, else stop the countdown, else start one
    Toggle,
    StartCountdown,
    StopCountdown,
    StopAlarm,
    Status,
    Help,
    Quit,
}

/// A command line that could not be understood
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("unknown command '{0}', type 'help' for a list")]
    Unknown(String),

    #[error("'{0}' expects a number")]
    MissingValue(String),

    #[error("'{0}' is not a number")]
    InvalidNumber(String),

    #[error("'{0}' takes no arguments")]
    UnexpectedArgument(String),

    #[error(transparent)]
    OutOfRange(#[from] DurationError),
}

fn parse_number(value: &str) -> Result<u32, CommandError> {
    value
        .parse::<u32>()
        .map_err(|_| CommandError::InvalidNumber(value.to_string()))
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim().to_lowercase();
        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            return Ok(Command::Toggle);
        };
        let argument = words.next();
        if let Some(extra) = words.next() {
            return Err(CommandError::UnexpectedArgument(extra.to_string()));
        }

        match name {
            "hours" | "h" | "mins" | "m" => {
                let value = argument.ok_or_else(|| CommandError::MissingValue(name.to_string()))?;
                let value = parse_number(value)?;
                if name.starts_with('h') {
                    Ok(Command::SetHours(Hours::new(value)?))
                } else {
                    Ok(Command::SetMinutes(Minutes::new(value)?))
                }
            }
            _ if argument.is_some() => Err(CommandError::UnexpectedArgument(name.to_string())),
            "h+" => Ok(Command::HoursUp),
            "h-" => Ok(Command::HoursDown),
            "m+" => Ok(Command::MinutesUp),
            "m-" => Ok(Command::MinutesDown),
            "toggle" | "t" => Ok(Command::Toggle),
            "start" => Ok(Command::StartCountdown),
            "stop" => Ok(Command::StopCountdown),
            "silence" => Ok(Command::StopAlarm),
            "status" => Ok(Command::Status),
            "help" | "?" => Ok(Command::Help),
            "quit" | "q" | "exit" => Ok(Command::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

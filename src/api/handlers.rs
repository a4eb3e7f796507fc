//! Command handlers

use tracing::{error, info};

use super::commands::{Command, HELP_TEXT};
use crate::state::{AppState, ToggleAction};

/// What the event loop should do after a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Nothing to print; the view update speaks for itself
    Silent,
    /// Text for the user
    Message(String),
    /// Leave the event loop
    Quit,
}

/// Apply one user command to the application state
pub fn handle_command(state: &mut AppState, command: Command) -> Reply {
    match command {
        Command::SetHours(hours) => {
            state.update_duration("hours", |d| d.hours = hours);
            Reply::Silent
        }
        Command::SetMinutes(minutes) => {
            state.update_duration("mins", |d| d.minutes = minutes);
            Reply::Silent
        }
        Command::HoursUp => {
            state.update_duration("hours", |d| d.hours = d.hours.step_up());
            Reply::Silent
        }
        Command::HoursDown => {
            state.update_duration("hours", |d| d.hours = d.hours.step_down());
            Reply::Silent
        }
        Command::MinutesUp => {
            state.update_duration("mins", |d| d.minutes = d.minutes.step_up());
            Reply::Silent
        }
        Command::MinutesDown => {
            state.update_duration("mins", |d| d.minutes = d.minutes.step_down());
            Reply::Silent
        }
        Command::Toggle => {
            let action = state.toggle();
            info!("Toggle pressed: {:?}", action);
            match action {
                ToggleAction::StartedCountdown if state.duration().total_seconds() == 0 => {
                    Reply::Message("Countdown of zero length started".to_string())
                }
                _ => Reply::Silent,
            }
        }
        Command::StartCountdown => {
            if state.countdown().is_active() {
                Reply::Message("Countdown already running".to_string())
            } else {
                state.start_countdown();
                Reply::Silent
            }
        }
        Command::StopCountdown => {
            if state.stop_countdown() {
                Reply::Silent
            } else {
                Reply::Message("No countdown running".to_string())
            }
        }
        Command::StopAlarm => {
            if state.stop_alarm() {
                Reply::Silent
            } else {
                Reply::Message("Alarm is not playing".to_string())
            }
        }
        Command::Status => match serde_json::to_string_pretty(&state.status()) {
            Ok(json) => Reply::Message(json),
            Err(e) => {
                error!("Failed to serialize status: {}", e);
                Reply::Message(format!("Status unavailable: {}", e))
            }
        },
        Command::Help => Reply::Message(HELP_TEXT.to_string()),
        Command::Quit => Reply::Quit,
    }
}

//! User-facing surface
//! 
//! This module contains the command syntax, the command handlers and the
//! structures rendered on the display.

pub mod commands;
pub mod handlers;
pub mod responses;

pub use commands::{Command, CommandError, HELP_TEXT};
pub use handlers::{handle_command, Reply};
pub use responses::{StatusResponse, View};

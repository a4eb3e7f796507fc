//! Reads user commands from a line-oriented input

use std::{
    io::{self, BufRead},
    thread,
};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::{api::Command, events::AppEvent};

/// Parse each line of `reader` into a command and forward it to the event loop.
///
/// Lines that fail to parse are handed to `on_error` and skipped. Returns
/// once the input ends or the event loop stops listening.
pub fn read_commands<R, F>(reader: R, events: &mpsc::UnboundedSender<AppEvent>, mut on_error: F)
where
    R: BufRead,
    F: FnMut(String),
{
    for line in reader.lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                warn!("Failed to read input: {}", e);
                break;
            }
        };

        match line.parse::<Command>() {
            Ok(command) => {
                if events.send(AppEvent::Command(command)).is_err() {
                    break;
                }
            }
            Err(e) => on_error(e.to_string()),
        }
    }
    debug!("Input closed");
}

/// Read stdin on a dedicated thread so a pending read never holds up shutdown
pub fn spawn_stdin_reader(events: mpsc::UnboundedSender<AppEvent>) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        read_commands(io::stdin().lock(), &events, |message| println!("\n{}", message));
    })
}

//! The application event loop

use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::{
    api::{handle_command, Reply},
    events::AppEvent,
    state::AppState,
};

/// Handle events one at a time until the user quits, a shutdown signal
/// arrives, or every sender is gone. Messages for the user go to `output`.
pub async fn event_loop_task<F>(
    state: &mut AppState,
    events_rx: &mut mpsc::UnboundedReceiver<AppEvent>,
    mut output: F,
) where
    F: FnMut(String),
{
    info!("Starting event loop");

    while let Some(event) = events_rx.recv().await {
        match event {
            AppEvent::Tick(tick) => state.on_tick(tick),
            AppEvent::Command(command) => {
                debug!("Command: {:?}", command);
                match handle_command(state, command) {
                    Reply::Silent => {}
                    Reply::Message(message) => output(message),
                    Reply::Quit => {
                        info!("Quit requested");
                        break;
                    }
                }
            }
            AppEvent::Shutdown => {
                info!("Shutdown signal received");
                break;
            }
        }
    }

    info!("Event loop stopped");
}

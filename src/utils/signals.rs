//! Signal handling for graceful shutdown

use std::io;
use signal_hook_tokio::Signals;
use futures::stream::StreamExt;
use tokio::sync::mpsc;
use tracing::info;

use crate::events::AppEvent;

/// Install handlers for SIGTERM and SIGINT
pub fn register_shutdown_signals() -> io::Result<Signals> {
    Signals::new([
        signal_hook::consts::SIGTERM,
        signal_hook::consts::SIGINT,
    ])
}

/// Wait for the first shutdown signal and ask the event loop to stop
pub async fn shutdown_signal(mut signals: Signals, events: mpsc::UnboundedSender<AppEvent>) {
    if let Some(signal) = signals.next().await {
        info!("Received signal: {}", signal);
        events.send(AppEvent::Shutdown).ok();
    }
}

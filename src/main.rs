//! Alarm Clock - a live terminal clock with a countdown timer
//!
//! This is the main entry point for the alarm-clock application.

use anyhow::Context;
use tokio::sync::mpsc;
use tracing::{info, warn};

use alarm_clock::{
    api::HELP_TEXT,
    config::Config,
    services::{resolve_alarm_asset, PlaybackController, ProcessBackend},
    state::AppState,
    tasks::{event_loop_task, render_task, spawn_stdin_reader},
    utils::{register_shutdown_signals, shutdown_signal},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Logs go to stderr so they stay off the status line
    tracing_subscriber::fmt()
        .with_env_filter(format!("alarm_clock={}", config.log_level()))
        .with_writer(std::io::stderr)
        .init();

    info!("Starting alarm-clock v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Configuration: asset_dir={}, player={:?}, loop_alarm={}",
        config.asset_dir.display(),
        config.player,
        config.loop_alarm
    );

    let duration = config
        .initial_duration()
        .context("invalid initial duration")?;

    if let Err(e) = resolve_alarm_asset(&config.asset_dir) {
        warn!("{}; the alarm will stay silent", e);
    }

    let signals = register_shutdown_signals().context("failed to install signal handlers")?;

    let (events_tx, mut events_rx) = mpsc::unbounded_channel();

    // Create application state
    let backend = ProcessBackend::new(config.player.clone());
    let playback =
        PlaybackController::new(Box::new(backend), config.asset_dir.clone(), config.loop_alarm);
    let mut state = AppState::new(playback, duration, events_tx.clone());

    tokio::spawn(shutdown_signal(signals, events_tx.clone()));
    spawn_stdin_reader(events_tx);

    println!("{}\n", HELP_TEXT);
    let renderer = tokio::spawn(render_task(state.subscribe_view()));

    state.mount();
    event_loop_task(&mut state, &mut events_rx, |message| println!("\n{}", message)).await;
    state.unmount();

    // Dropping the state closes the view channel and ends the renderer
    drop(state);
    renderer.await.ok();

    info!("Shutdown complete");
    Ok(())
}

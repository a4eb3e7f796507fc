//! One-second periodic tick sources

use std::time::Duration;
use tokio::{
    sync::mpsc,
    task::JoinHandle,
    time::{interval_at, Instant, MissedTickBehavior},
};
use tracing::debug;

use crate::events::AppEvent;

/// Period of every tick source in the application
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Which component a tick is addressed to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickSource {
    Clock,
    Countdown,
}

/// A single delivery from a periodic source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    pub source: TickSource,
    /// Identifies the run that acquired the source
    pub generation: u64,
}

/// Guard over a spawned periodic source.
///
/// The source sends a [`Tick`] into the application's event channel once per
/// period, first firing one period after acquisition. It runs until
/// [`Ticker::stop`] is called or the guard is dropped, so it can never
/// outlive its owner.
#[derive(Debug)]
pub struct Ticker {
    tick: Tick,
    handle: JoinHandle<()>,
}

impl Ticker {
    /// Acquire a periodic source that delivers `tick` every `period`
    pub fn spawn(tick: Tick, period: Duration, events: mpsc::UnboundedSender<AppEvent>) -> Self {
        debug!("Acquiring {:?} ticker (generation {})", tick.source, tick.generation);

        let handle = tokio::spawn(async move {
            let mut interval = interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                interval.tick().await;
                if events.send(AppEvent::Tick(tick)).is_err() {
                    // Event loop is gone
                    break;
                }
            }
        });

        Self { tick, handle }
    }

    pub fn tick(&self) -> Tick {
        self.tick
    }

    /// Stop delivering ticks. Stopping twice is a no-op.
    pub fn stop(&self) {
        if !self.handle.is_finished() {
            debug!("Releasing {:?} ticker (generation {})", self.tick.source, self.tick.generation);
        }
        self.handle.abort();
    }

    pub fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

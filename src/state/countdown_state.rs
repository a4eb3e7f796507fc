//! Countdown state structure and tick logic

use serde::Serialize;

use super::DurationSelection;

/// Render a second count as `HH:MM:SS`
pub fn format_time(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let seconds = seconds % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}

/// Phase of the countdown engine. Expiry is instantaneous and lands back in `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CountdownPhase {
    Idle,
    Running,
}

/// Result of feeding one tick to the countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// One second was taken off
    Decremented { remaining_seconds: u64 },
    /// The countdown was already at zero; it is now idle and the alarm is due
    Expired,
    /// The tick belongs to a countdown that no longer runs
    Stale,
}

/// Countdown state for the running timer
#[derive(Debug, Clone, Default)]
pub struct CountdownState {
    active: bool,
    remaining_seconds: u64,
    /// Bumped on every start so ticks from an earlier run can be told apart
    generation: u64,
}

impl CountdownState {
    /// Create an idle countdown
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin counting down from the selection and return the run's tick generation.
    ///
    /// A zero selection still enters `Running`; it expires on the next tick.
    pub fn start(&mut self, selection: DurationSelection) -> u64 {
        self.generation += 1;
        self.active = true;
        self.remaining_seconds = selection.total_seconds();
        self.generation
    }

    /// Apply one tick from the source registered under `generation`
    pub fn tick(&mut self, generation: u64) -> TickOutcome {
        if !self.active || generation != self.generation {
            return TickOutcome::Stale;
        }

        if self.remaining_seconds > 0 {
            self.remaining_seconds -= 1;
            TickOutcome::Decremented {
                remaining_seconds: self.remaining_seconds,
            }
        } else {
            self.reset();
            TickOutcome::Expired
        }
    }

    /// Cancel a running countdown. Returns `false` if there was nothing to stop.
    pub fn stop(&mut self) -> bool {
        if !self.active {
            return false;
        }
        self.reset();
        true
    }

    fn reset(&mut self) {
        self.active = false;
        self.remaining_seconds = 0;
    }

    /// Check if the countdown is running
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn phase(&self) -> CountdownPhase {
        if self.active {
            CountdownPhase::Running
        } else {
            CountdownPhase::Idle
        }
    }

    /// Get remaining seconds if the countdown is running
    pub fn remaining_seconds(&self) -> Option<u64> {
        if self.active {
            Some(self.remaining_seconds)
        } else {
            None
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// `HH:MM:SS` of the remaining time, empty when idle
    pub fn display(&self) -> String {
        self.remaining_seconds()
            .map(format_time)
            .unwrap_or_default()
    }
}

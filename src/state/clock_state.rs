//! Live clock state refreshed by the clock driver

use chrono::{DateTime, Local, NaiveDateTime, Timelike};
use serde::Serialize;

/// Display format for the live clock, e.g. `Mon, 05 Feb 2024 14:03:09`
pub const CLOCK_FORMAT: &str = "%a, %d %b %Y %H:%M:%S";

/// Background asset shown behind the clock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Background {
    #[serde(rename = "AMImage")]
    AmImage,
    #[serde(rename = "PMImage")]
    PmImage,
}

impl Background {
    pub fn for_hour(hour: u32) -> Self {
        if is_am_hour(hour) {
            Background::AmImage
        } else {
            Background::PmImage
        }
    }

    /// Bundled asset name
    pub fn asset_name(&self) -> &'static str {
        match self {
            Background::AmImage => "AMImage",
            Background::PmImage => "PMImage",
        }
    }
}

/// Midnight counts as AM, noon as PM
pub fn is_am_hour(hour: u32) -> bool {
    hour < 12
}

pub fn format_clock(time: &NaiveDateTime) -> String {
    time.format(CLOCK_FORMAT).to_string()
}

/// Current wall-clock time, overwritten on every clock tick
#[derive(Debug, Clone)]
pub struct ClockState {
    current_time: DateTime<Local>,
}

impl ClockState {
    pub fn new(now: DateTime<Local>) -> Self {
        Self { current_time: now }
    }

    pub fn update(&mut self, now: DateTime<Local>) {
        self.current_time = now;
    }

    pub fn current_time(&self) -> DateTime<Local> {
        self.current_time
    }

    pub fn is_am(&self) -> bool {
        is_am_hour(self.current_time.hour())
    }

    pub fn background(&self) -> Background {
        Background::for_hour(self.current_time.hour())
    }

    pub fn formatted(&self) -> String {
        format_clock(&self.current_time.naive_local())
    }
}

impl Default for ClockState {
    fn default() -> Self {
        Self::new(Local::now())
    }
}

//! Duration selector: the hours/minutes pair a countdown starts from

use serde::Serialize;
use thiserror::Error;

/// Rejected selector input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DurationError {
    #[error("hours must be between 0 and 23, got {0}")]
    HoursOutOfRange(u32),
    #[error("minutes must be between 0 and 59, got {0}")]
    MinutesOutOfRange(u32),
}

/// Hour wheel value, always within 0..=23
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize)]
#[serde(transparent)]
pub struct Hours(u8);

impl Hours {
    pub const MAX: u8 = 23;

    pub fn new(value: u32) -> Result<Self, DurationError> {
        if value <= u32::from(Self::MAX) {
            Ok(Self(value as u8))
        } else {
            Err(DurationError::HoursOutOfRange(value))
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// One notch up the wheel, stopping at 23
    pub fn step_up(self) -> Self {
        Self(self.0.saturating_add(1).min(Self::MAX))
    }

    /// One notch down the wheel, stopping at 0
    pub fn step_down(self) -> Self {
        Self(self.0.saturating_sub(1))
    }
}

impl TryFrom<u32> for Hours {
    type Error = DurationError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Minute wheel value, always within 0..=59
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize)]
#[serde(transparent)]
pub struct Minutes(u8);

impl Minutes {
    pub const MAX: u8 = 59;

    pub fn new(value: u32) -> Result<Self, DurationError> {
        if value <= u32::from(Self::MAX) {
            Ok(Self(value as u8))
        } else {
            Err(DurationError::MinutesOutOfRange(value))
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }

    pub fn step_up(self) -> Self {
        Self(self.0.saturating_add(1).min(Self::MAX))
    }

    pub fn step_down(self) -> Self {
        Self(self.0.saturating_sub(1))
    }
}

impl TryFrom<u32> for Minutes {
    type Error = DurationError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// The selected countdown duration.
///
/// This is `Copy`: a countdown captures the selection by value when it
/// starts, so later edits never reach a running countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct DurationSelection {
    pub hours: Hours,
    pub minutes: Minutes,
}

impl DurationSelection {
    pub fn new(hours: Hours, minutes: Minutes) -> Self {
        Self { hours, minutes }
    }

    /// Build a selection from raw integers, rejecting out-of-range values
    pub fn from_parts(hours: u32, minutes: u32) -> Result<Self, DurationError> {
        Ok(Self::new(Hours::new(hours)?, Minutes::new(minutes)?))
    }

    /// Length of the countdown in seconds
    pub fn total_seconds(&self) -> u64 {
        u64::from(self.hours.get()) * 3600 + u64::from(self.minutes.get()) * 60
    }
}

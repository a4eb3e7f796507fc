//! State management module
//! 
//! This module contains all state-related structures and their management logic.

pub mod app_state;
pub mod clock_state;
pub mod countdown_state;
pub mod duration;

// Re-export main types
pub use app_state::{AppState, ToggleAction};
pub use clock_state::{is_am_hour, Background, ClockState};
pub use countdown_state::{format_time, CountdownPhase, CountdownState, TickOutcome};
pub use duration::{DurationError, DurationSelection, Hours, Minutes};

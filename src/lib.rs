//! Alarm Clock - a live terminal clock with a countdown timer
//! 
//! This library provides the clock driver, the duration selector, the
//! countdown engine and the alarm playback controller, wired together by a
//! single event loop that owns all application state.

pub mod api;
pub mod config;
pub mod events;
pub mod services;
pub mod state;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use api::{Command, View};
pub use config::Config;
pub use events::AppEvent;
pub use state::AppState;
pub use utils::signals::shutdown_signal;

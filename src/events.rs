//! Events consumed by the application event loop.
//!
//! Every state change in the application is driven by one of these events,
//! delivered over a single channel and handled one at a time.

use crate::{api::Command, tasks::ticker::Tick};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// A periodic source fired
    Tick(Tick),
    /// The user issued a command
    Command(Command),
    /// A termination signal arrived
    Shutdown,
}

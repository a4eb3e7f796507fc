//! Background tasks module
//! 
//! This module contains the tick sources, the event loop and the tasks that
//! connect it to the terminal.

pub mod event_loop;
pub mod input;
pub mod renderer;
pub mod ticker;

// Re-export main functions
pub use event_loop::event_loop_task;
pub use input::spawn_stdin_reader;
pub use renderer::render_task;
pub use ticker::{Tick, TickSource, Ticker, TICK_PERIOD};

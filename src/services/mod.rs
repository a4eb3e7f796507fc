//! Alarm sound playback module
//! 
//! This module contains the playback controller and the audio backend that
//! drives a system player process.

pub mod playback;
pub mod player;

// Re-export main types
pub use playback::{
    resolve_alarm_asset, AudioBackend, PlaybackController, PlaybackError, PlaybackHandle,
    PlaybackStatus,
};
pub use player::ProcessBackend;

//! Alarm playback controller

use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Logical name of the bundled alarm sound
pub const ALARM_SOUND_NAME: &str = "AlarmSound";
pub const ALARM_SOUND_EXTENSION: &str = "mp3";

/// Why the alarm could not be started
#[derive(Debug, Error)]
pub enum PlaybackError {
    #[error("alarm sound not found at {}", .path.display())]
    NotFound { path: PathBuf },

    #[error("no audio player could play {}: {reason}", .path.display())]
    Backend { path: PathBuf, reason: String },
}

/// Status reported by a playback handle when polled
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaybackStatus {
    Playing,
    /// The sound reached its natural end
    Finished,
    /// The player exited abnormally
    Failed(String),
}

/// A sound that is currently playing
pub trait PlaybackHandle: Send {
    fn poll(&mut self) -> PlaybackStatus;

    /// Halt playback immediately
    fn stop(&mut self);
}

/// Something that can start playing an audio file
pub trait AudioBackend: Send {
    fn play(&mut self, path: &Path) -> Result<Box<dyn PlaybackHandle>, PlaybackError>;
}

/// Locate the alarm sound inside `asset_dir`
pub fn resolve_alarm_asset(asset_dir: &Path) -> Result<PathBuf, PlaybackError> {
    let path = asset_dir.join(format!("{}.{}", ALARM_SOUND_NAME, ALARM_SOUND_EXTENSION));
    if path.is_file() {
        Ok(path)
    } else {
        Err(PlaybackError::NotFound { path })
    }
}

/// Owns the alarm sound's lifecycle. Nothing else touches the playback handle.
pub struct PlaybackController {
    backend: Box<dyn AudioBackend>,
    asset_dir: PathBuf,
    looped: bool,
    handle: Option<Box<dyn PlaybackHandle>>,
}

impl PlaybackController {
    pub fn new(backend: Box<dyn AudioBackend>, asset_dir: PathBuf, looped: bool) -> Self {
        Self {
            backend,
            asset_dir,
            looped,
            handle: None,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.handle.is_some()
    }

    pub fn asset_dir(&self) -> &Path {
        &self.asset_dir
    }

    /// Start the alarm sound. Already playing is not an error.
    pub fn start(&mut self) -> Result<(), PlaybackError> {
        if self.is_playing() {
            debug!("Alarm already playing");
            return Ok(());
        }

        let path = resolve_alarm_asset(&self.asset_dir)?;
        let handle = self.backend.play(&path)?;
        self.handle = Some(handle);
        info!("Alarm started: {}", path.display());
        Ok(())
    }

    /// Stop the alarm and release the handle. Returns `false` if nothing was playing.
    pub fn stop(&mut self) -> bool {
        match self.handle.take() {
            Some(mut handle) => {
                handle.stop();
                info!("Alarm stopped");
                true
            }
            None => false,
        }
    }

    /// Notice a sound that ended on its own. Returns whether the alarm is still playing.
    pub fn refresh(&mut self) -> bool {
        let status = match self.handle.as_mut() {
            Some(handle) => handle.poll(),
            None => return false,
        };

        match status {
            PlaybackStatus::Playing => true,
            PlaybackStatus::Finished => {
                self.handle = None;
                if !self.looped {
                    info!("Alarm sound finished");
                    return false;
                }
                debug!("Alarm sound finished, looping");
                match self.start() {
                    Ok(()) => true,
                    Err(e) => {
                        warn!("Failed to restart alarm: {}", e);
                        false
                    }
                }
            }
            PlaybackStatus::Failed(reason) => {
                self.handle = None;
                warn!("Alarm player failed: {}", reason);
                false
            }
        }
    }
}

impl Drop for PlaybackController {
    fn drop(&mut self) {
        self.stop();
    }
}

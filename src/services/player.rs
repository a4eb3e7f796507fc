//! Audio playback through a system player process

use std::{
    path::{Path, PathBuf},
    process::Stdio,
};
use tokio::process::{Child, Command};
use tracing::{debug, warn};

use super::playback::{AudioBackend, PlaybackError, PlaybackHandle, PlaybackStatus};

/// MP3-capable players tried in order when none is configured
pub fn default_players() -> Vec<String> {
    let players: &[&str] = if cfg!(target_os = "macos") {
        &["afplay"]
    } else {
        &[
            "paplay",
            "mpg123 -q",
            "ffplay -nodisp -autoexit -loglevel quiet",
        ]
    };
    players.iter().map(|p| p.to_string()).collect()
}

/// Plays the alarm by spawning an external audio player.
///
/// Candidates are tried in order. A candidate that cannot be spawned, or
/// that exits with an error, hands over to the next one.
#[derive(Debug, Clone)]
pub struct ProcessBackend {
    candidates: Vec<String>,
}

impl ProcessBackend {
    /// `player` may carry extra arguments, e.g. `"mpg123 -q"`
    pub fn new(player: Option<String>) -> Self {
        match player {
            Some(player) => Self::with_candidates(vec![player]),
            None => Self::with_candidates(default_players()),
        }
    }

    pub fn with_candidates(candidates: Vec<String>) -> Self {
        Self { candidates }
    }

    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }
}

/// Spawn the first candidate from `start` on that launches.
/// Returns the child and its index, or every failure seen.
fn spawn_from(
    candidates: &[String],
    start: usize,
    path: &Path,
    failures: &mut Vec<String>,
) -> Option<(Child, usize)> {
    for (index, candidate) in candidates.iter().enumerate().skip(start) {
        let mut parts = candidate.split_whitespace();
        let Some(program) = parts.next() else {
            continue;
        };

        debug!("Attempting to play alarm with {}", program);
        let spawned = Command::new(program)
            .args(parts)
            .arg(path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn();

        match spawned {
            Ok(child) => return Some((child, index)),
            Err(e) => failures.push(format!("{}: {}", program, e)),
        }
    }
    None
}

impl AudioBackend for ProcessBackend {
    fn play(&mut self, path: &Path) -> Result<Box<dyn PlaybackHandle>, PlaybackError> {
        let mut failures = Vec::new();

        match spawn_from(&self.candidates, 0, path, &mut failures) {
            Some((child, index)) => Ok(Box::new(PlayerProcess {
                child,
                index,
                candidates: self.candidates.clone(),
                path: path.to_path_buf(),
            })),
            None => Err(PlaybackError::Backend {
                path: path.to_path_buf(),
                reason: if failures.is_empty() {
                    "no player configured".to_string()
                } else {
                    failures.join("; ")
                },
            }),
        }
    }
}

/// A running player process; killed when stopped or dropped
struct PlayerProcess {
    child: Child,
    /// Position of the running player among `candidates`
    index: usize,
    candidates: Vec<String>,
    path: PathBuf,
}

impl PlayerProcess {
    /// Replace a failed player with the next candidate that launches
    fn fall_back(&mut self, reason: String) -> PlaybackStatus {
        warn!("Alarm player {} failed: {}", self.candidates[self.index], reason);

        let mut failures = vec![reason];
        match spawn_from(&self.candidates, self.index + 1, &self.path, &mut failures) {
            Some((child, index)) => {
                self.child = child;
                self.index = index;
                PlaybackStatus::Playing
            }
            None => PlaybackStatus::Failed(failures.join("; ")),
        }
    }
}

impl PlaybackHandle for PlayerProcess {
    fn poll(&mut self) -> PlaybackStatus {
        match self.child.try_wait() {
            Ok(None) => PlaybackStatus::Playing,
            Ok(Some(status)) if status.success() => PlaybackStatus::Finished,
            Ok(Some(status)) => self.fall_back(format!("player exited with {}", status)),
            Err(e) => self.fall_back(format!("failed to poll player: {}", e)),
        }
    }

    fn stop(&mut self) {
        if let Err(e) = self.child.start_kill() {
            // The process may already have exited
            warn!("Failed to kill alarm player: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    /// Poll until the handle leaves `Playing`
    async fn settle(handle: &mut Box<dyn PlaybackHandle>) -> PlaybackStatus {
        for _ in 0..500 {
            match handle.poll() {
                PlaybackStatus::Playing => tokio::time::sleep(Duration::from_millis(10)).await,
                status => return status,
            }
        }
        panic!("player never exited");
    }

    fn spawned(result: Result<Box<dyn PlaybackHandle>, PlaybackError>) -> Box<dyn PlaybackHandle> {
        match result {
            Ok(handle) => handle,
            Err(e) => panic!("player failed to spawn: {}", e),
        }
    }

    #[test]
    fn configured_player_replaces_defaults() {
        let backend = ProcessBackend::new(Some("mpg123 -q".to_string()));
        assert_eq!(backend.candidates(), ["mpg123 -q".to_string()]);
        assert!(!ProcessBackend::new(None).candidates().is_empty());
    }

    #[test]
    fn defaults_are_mp3_capable() {
        let players = default_players();
        assert!(!players.iter().any(|p| p.starts_with("aplay")));
    }

    #[tokio::test]
    async fn unknown_player_is_a_backend_error() {
        let mut backend = ProcessBackend::new(Some("definitely-not-a-player-binary".to_string()));
        let err = match backend.play(Path::new("AlarmSound.mp3")) {
            Err(e) => e,
            Ok(_) => panic!("spawning a missing binary must fail"),
        };
        assert!(matches!(err, PlaybackError::Backend { .. }));
        assert!(err.to_string().contains("definitely-not-a-player-binary"));
    }

    #[tokio::test]
    async fn blank_player_is_rejected() {
        let mut backend = ProcessBackend::new(Some("   ".to_string()));
        let err = backend.play(Path::new("AlarmSound.mp3")).err().unwrap();
        assert!(err.to_string().contains("no player configured"));
    }

    #[tokio::test]
    async fn player_that_exits_with_an_error_hands_over_to_the_next() {
        // `false` exits 1 like a player without a sound server; `true` stands in for a working one
        let mut backend =
            ProcessBackend::with_candidates(vec!["false".to_string(), "true".to_string()]);
        let handle = backend.play(Path::new("AlarmSound.mp3"));
        let mut handle = spawned(handle);

        assert_eq!(settle(&mut handle).await, PlaybackStatus::Finished);
    }

    #[tokio::test]
    async fn every_player_failing_is_reported() {
        let mut backend = ProcessBackend::with_candidates(vec![
            "false".to_string(),
            "definitely-not-a-player-binary".to_string(),
        ]);
        let handle = backend.play(Path::new("AlarmSound.mp3"));
        let mut handle = spawned(handle);

        let PlaybackStatus::Failed(reason) = settle(&mut handle).await else {
            panic!("a failing player must not report success");
        };
        assert!(reason.contains("player exited with"));
        assert!(reason.contains("definitely-not-a-player-binary"));
    }
}

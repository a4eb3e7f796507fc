//! What the display surface shows, and the `status` report

use serde::Serialize;

use crate::state::{Background, CountdownPhase, Hours, Minutes};

pub const START_LABEL: &str = "Start Timer";
/// Shown while the countdown runs as well as while the alarm sounds
pub const STOP_LABEL: &str = "Stop Music";

pub fn button_label(countdown_active: bool, alarm_playing: bool) -> &'static str {
    if countdown_active || alarm_playing {
        STOP_LABEL
    } else {
        START_LABEL
    }
}

/// Snapshot of everything on screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct View {
    pub clock: String,
    pub background: Background,
    pub hours: Hours,
    pub minutes: Minutes,
    pub button_label: &'static str,
    /// `HH:MM:SS`, or empty when no countdown runs
    pub time_remaining: String,
}

impl View {
    pub fn remaining_label(&self) -> String {
        format!("Time Remaining: {}", self.time_remaining)
    }

    /// Single-line rendering for the terminal
    pub fn render_line(&self) -> String {
        format!(
            "{} [{}] | {:>2} hours {:>2} mins | [ {} ] | {}",
            self.clock,
            self.background.asset_name(),
            self.hours.get(),
            self.minutes.get(),
            self.button_label,
            self.remaining_label(),
        )
    }
}

/// Full state report printed by the `status` command
#[derive(Debug, Clone, Serialize)]
pub struct StatusResponse {
    pub view: View,
    pub countdown: CountdownPhase,
    pub remaining_seconds: Option<u64>,
    pub alarm_playing: bool,
    pub asset_dir: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view(button_label: &'static str, time_remaining: &str) -> View {
        View {
            clock: "Mon, 05 Feb 2024 14:03:09".to_string(),
            background: Background::PmImage,
            hours: Hours::new(1).unwrap(),
            minutes: Minutes::new(30).unwrap(),
            button_label,
            time_remaining: time_remaining.to_string(),
        }
    }

    #[test]
    fn label_covers_both_stop_cases() {
        assert_eq!(button_label(false, false), "Start Timer");
        assert_eq!(button_label(true, false), "Stop Music");
        assert_eq!(button_label(false, true), "Stop Music");
        assert_eq!(button_label(true, true), "Stop Music");
    }

    #[test]
    fn remaining_label_is_blank_when_idle() {
        assert_eq!(view(START_LABEL, "").remaining_label(), "Time Remaining: ");
        assert_eq!(
            view(STOP_LABEL, "01:29:59").remaining_label(),
            "Time Remaining: 01:29:59"
        );
    }

    #[test]
    fn render_line_shows_every_element() {
        assert_eq!(
            view(STOP_LABEL, "01:29:59").render_line(),
            "Mon, 05 Feb 2024 14:03:09 [PMImage] |  1 hours 30 mins | [ Stop Music ] | Time Remaining: 01:29:59"
        );
    }

    #[test]
    fn view_serializes_asset_names() {
        let json = serde_json::to_value(view(START_LABEL, "")).unwrap();
        assert_eq!(json["background"], "PMImage");
        assert_eq!(json["hours"], 1);
        assert_eq!(json["button_label"], "Start Timer");
    }
}

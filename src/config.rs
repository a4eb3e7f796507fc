//! Configuration and CLI argument handling

use std::path::PathBuf;
use clap::Parser;

use crate::state::{DurationError, DurationSelection};

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "alarm-clock")]
#[command(about = "A live terminal clock with a countdown timer that sounds an alarm at zero")]
#[command(version)]
pub struct Config {
    /// Directory holding the bundled AlarmSound.mp3
    #[arg(long, default_value = "assets")]
    pub asset_dir: PathBuf,

    /// Audio player command used for the alarm (defaults to afplay, or paplay, mpg123, ffplay)
    #[arg(long)]
    pub player: Option<String>,

    /// Replay the alarm sound until it is silenced
    #[arg(long)]
    pub loop_alarm: bool,

    /// Initial hours on the duration selector (0-23)
    #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u8).range(0..=23))]
    pub hours: u8,

    /// Initial minutes on the duration selector (0-59)
    #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u8).range(0..=59))]
    pub minutes: u8,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Duration selector values to start with
    pub fn initial_duration(&self) -> Result<DurationSelection, DurationError> {
        DurationSelection::from_parts(u32::from(self.hours), u32::from(self.minutes))
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }
}

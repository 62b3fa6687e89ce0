//! Configuration and CLI argument handling for the headless host

use std::{path::PathBuf, time::Duration};
use clap::Parser;

use crate::state::Size;

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "url-timer")]
#[command(about = "Headless host for the per-page URL timer overlay")]
#[command(version)]
#[command(after_help = "Reads page commands from stdin (goto, hide, show, grab, move, release,\nreset, snooze, status, quit). End of stdin stops command reading but keeps\nthe page loaded; quit, SIGINT or SIGTERM unload it and exit.")]
pub struct Config {
    /// JSON settings file holding urlList, timeLimit and isEnabled
    #[arg(short, long, default_value = "url-timer.json")]
    pub store: PathBuf,

    /// Location of the page when it loads
    #[arg(short, long, default_value = "about:blank")]
    pub url: String,

    /// Viewport size as WIDTHxHEIGHT
    #[arg(long, default_value = "1280x720", value_parser = parse_viewport)]
    pub viewport: Size,

    /// Settings file poll interval in seconds
    #[arg(short, long, default_value = "2")]
    pub poll: u64,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the settings poll interval, never shorter than one second
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll.max(1))
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }
}

/// Parse `WIDTHxHEIGHT` into a viewport size
pub fn parse_viewport(value: &str) -> Result<Size, String> {
    let (width, height) = value
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("Expected WIDTHxHEIGHT, got {}", value))?;

    let width: f64 = width
        .trim()
        .parse()
        .map_err(|_| format!("Invalid viewport width: {}", width))?;
    let height: f64 = height
        .trim()
        .parse()
        .map_err(|_| format!("Invalid viewport height: {}", height))?;

    if width <= 0.0 || height <= 0.0 {
        return Err(format!("Viewport must be positive, got {}", value));
    }
    Ok(Size::new(width, height))
}

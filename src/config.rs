//! Configuration and CLI argument handling

use clap::Parser;

use crate::state::{ModeCatalogue, ModeKey};

/// CLI argument parsing structure
#[derive(Parser, Debug, Clone)]
#[command(name = "pomo-clock")]
#[command(about = "A Pomodoro countdown timer served over a local HTTP interface")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Pomodoro duration in minutes
    #[arg(long = "pomodoro", default_value_t = 25, value_parser = clap::value_parser!(u32).range(1..))]
    pub pomodoro_minutes: u32,

    /// Short break duration in minutes
    #[arg(long = "short-break", default_value_t = 5, value_parser = clap::value_parser!(u32).range(1..))]
    pub short_break_minutes: u32,

    /// Long break duration in minutes
    #[arg(long = "long-break", default_value_t = 15, value_parser = clap::value_parser!(u32).range(1..))]
    pub long_break_minutes: u32,

    /// Mode selected at startup (pomodoro, shortBreak, longBreak)
    #[arg(short, long, default_value = "pomodoro")]
    pub mode: ModeKey,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    /// Build the mode presets from the configured durations
    pub fn catalogue(&self) -> ModeCatalogue {
        ModeCatalogue::with_durations(
            self.pomodoro_minutes,
            self.short_break_minutes,
            self.long_break_minutes,
        )
    }
}

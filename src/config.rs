//! Configuration and CLI argument handling

use clap::Parser;

use crate::services::AmbientAudio;

/// CLI argument parsing structure
#[derive(Debug, Parser)]
#[command(name = "focus-timer")]
#[command(about = "A focus timer with a drag-to-set dial and ambient sound")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Initial session length in minutes (clamped to 1-60)
    #[arg(short, long, default_value = "25", allow_negative_numbers = true)]
    pub minutes: i64,

    /// Start with ambient sound switched off
    #[arg(long)]
    pub mute: bool,

    /// Run without an audio output
    #[arg(long)]
    pub no_audio: bool,

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

    /// Audio companion matching the audio flags
    pub fn audio(&self) -> AmbientAudio {
        AmbientAudio::new(!self.no_audio, !self.mute)
    }
}

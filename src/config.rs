//! Configuration and CLI argument handling

use std::time::Duration;
use clap::{Parser, ValueEnum};

use crate::timer::Profile;

/// Command-line spelling of a deployment profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ProfileArg {
    /// Maximum duration 255
    Standard,
    /// Maximum duration 10
    Compact,
}

impl From<ProfileArg> for Profile {
    fn from(arg: ProfileArg) -> Self {
        match arg {
            ProfileArg::Standard => Profile::Standard,
            ProfileArg::Compact => Profile::Compact,
        }
    }
}

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "soft-timer")]
#[command(about = "A software countdown/stopwatch timer with an HTTP control surface")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Countdown duration used by the demo, in ticks
    #[arg(short, long, default_value = "5", allow_negative_numbers = true)]
    pub timer: i64,

    /// Deployment profile selecting the maximum duration
    #[arg(long = "profile", value_enum, default_value_t = ProfileArg::Standard)]
    pub profile_arg: ProfileArg,

    /// Tick period of the background driver in milliseconds (0 disables it)
    #[arg(long, default_value = "1000")]
    pub tick_ms: u64,

    /// Run the console demonstration and exit
    #[arg(long)]
    pub demo: bool,

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

    /// Get the selected timer profile
    pub fn profile(&self) -> Profile {
        self.profile_arg.into()
    }

    /// Get the background tick period
    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }
}

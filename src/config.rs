//! Configuration and CLI argument handling

use std::time::Duration;

use clap::Parser;

use crate::timer::TimerConfiguration;

/// CLI argument parsing structure
#[derive(Debug, Parser)]
#[command(name = "wod-timer")]
#[command(about = "Workout interval timer with a local control server")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Default countdown length in seconds, used until a workout is picked
    #[arg(short, long, default_value = "180")]
    pub duration: u32,

    /// Ring the terminal bell on phase and round changes
    #[arg(long)]
    pub bell: bool,

    /// Clock period in milliseconds
    #[arg(long, default_value = "1000", hide = true)]
    pub tick_millis: u64,

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

    /// Timer configured at startup
    pub fn default_timer(&self) -> TimerConfiguration {
        TimerConfiguration::countdown(self.duration)
    }

    /// Clock period, never shorter than a millisecond
    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_millis.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_app_timer() {
        let config = Config::try_parse_from(["wod-timer"]).expect("parse");
        assert_eq!(config.address(), "127.0.0.1:20554");
        assert_eq!(config.default_timer(), TimerConfiguration::countdown(180));
        assert_eq!(config.tick_period(), Duration::from_secs(1));
        assert_eq!(config.log_level(), "info");
    }

    #[test]
    fn flags_override_defaults() {
        let config = Config::try_parse_from([
            "wod-timer", "-p", "8080", "--duration", "60", "--bell", "--tick-millis", "0", "-v",
        ])
        .expect("parse");
        assert_eq!(config.port, 8080);
        assert!(config.bell);
        assert_eq!(config.default_timer(), TimerConfiguration::countdown(60));
        assert_eq!(config.tick_period(), Duration::from_millis(1));
        assert_eq!(config.log_level(), "debug");
    }
}

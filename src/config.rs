//! Configuration and CLI argument handling

use std::time::Duration;
use clap::Parser;

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "countdown-widget")]
#[command(about = "A countdown timer widget served over HTTP")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Milliseconds between ticks
    #[arg(long, default_value = "1000", value_parser = clap::value_parser!(u64).range(1..))]
    pub tick_ms: u64,

    /// Duration to configure at startup, given as the raw input text
    #[arg(short, long)]
    pub duration: Option<String>,

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

    /// Get the tick period
    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::try_parse_from(["countdown-widget"]).unwrap();
        assert_eq!(config.address(), "127.0.0.1:20554");
        assert_eq!(config.tick_period(), Duration::from_secs(1));
        assert_eq!(config.duration, None);
        assert_eq!(config.log_level(), "info");
    }

    #[test]
    fn flags_override_defaults() {
        let config = Config::try_parse_from([
            "countdown-widget", "-p", "8080", "--tick-ms", "250", "-d", "90", "-v",
        ])
        .unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.tick_period(), Duration::from_millis(250));
        assert_eq!(config.duration.as_deref(), Some("90"));
        assert_eq!(config.log_level(), "debug");
    }

    #[test]
    fn zero_tick_rejected() {
        assert!(Config::try_parse_from(["countdown-widget", "--tick-ms", "0"]).is_err());
    }
}

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::error::{Error, Result};
use crate::view::ThemeName;

#[derive(Debug, Parser)]
#[command(name = "dockstat")]
#[command(about = "Interactive terminal dashboard for Docker resources and compose stacks")]
#[command(version)]
pub struct Cli {
    /// Seconds between automatic refreshes
    #[arg(long, default_value_t = 5)]
    pub refresh_interval: u64,

    /// Seconds a container or stack gets to stop before it is killed
    #[arg(long, default_value_t = 30)]
    pub grace_period: u64,

    /// Colour palette
    #[arg(long, value_enum, default_value_t = ThemeName::Default)]
    pub theme: ThemeName,

    /// Directory for log files [default: <temp dir>/dockstat]
    #[arg(long)]
    pub log_dir: Option<PathBuf>,

    /// Log level for the dockstat target (overridden by DOCKSTAT_LOG)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

/// Immutable runtime configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub refresh_interval: Duration,
    pub grace_period: Duration,
    pub theme: ThemeName,
    pub log_dir: PathBuf,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            refresh_interval: Duration::from_secs(5),
            grace_period: Duration::from_secs(30),
            theme: ThemeName::Default,
            log_dir: default_log_dir(),
            log_level: "info".to_string(),
        }
    }
}

impl TryFrom<Cli> for Config {
    type Error = Error;

    fn try_from(cli: Cli) -> Result<Self> {
        if cli.refresh_interval < 1 {
            return Err(Error::Config("--refresh-interval must be at least 1 second".into()));
        }
        Ok(Self {
            refresh_interval: Duration::from_secs(cli.refresh_interval),
            grace_period: Duration::from_secs(cli.grace_period),
            theme: cli.theme,
            log_dir: cli.log_dir.unwrap_or_else(default_log_dir),
            log_level: cli.log_level,
        })
    }
}

pub fn default_log_dir() -> PathBuf {
    std::env::temp_dir().join("dockstat")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Config> {
        let cli = Cli::try_parse_from(std::iter::once("dockstat").chain(args.iter().copied()))
            .map_err(|e| Error::Config(e.to_string()))?;
        Config::try_from(cli)
    }

    #[test]
    fn defaults() {
        let config = parse(&[]).expect("defaults parse");
        assert_eq!(config, Config::default());
    }

    #[test]
    fn explicit_values() {
        let config = parse(&[
            "--refresh-interval",
            "2",
            "--grace-period",
            "10",
            "--theme",
            "light",
            "--log-dir",
            "/tmp/x",
        ])
        .expect("parse");
        assert_eq!(config.refresh_interval, Duration::from_secs(2));
        assert_eq!(config.grace_period, Duration::from_secs(10));
        assert_eq!(config.theme, ThemeName::Light);
        assert_eq!(config.log_dir, PathBuf::from("/tmp/x"));
    }

    #[test]
    fn zero_interval_is_rejected() {
        assert!(matches!(parse(&["--refresh-interval", "0"]), Err(Error::Config(_))));
    }

    #[test]
    fn unknown_theme_is_rejected() {
        assert!(parse(&["--theme", "neon"]).is_err());
    }
}

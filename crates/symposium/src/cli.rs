//! # Command Line
//!
//! ```text
//! symposium [ACTORS] [THINK_SECS] [USE_SECS] [--config FILE] ...
//! ```
//!
//! Values given on the command line override the config file, which
//! overrides the built-in defaults.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use symposium_core::{CoreResult, TableConfig};

/// Dining philosophers around a shared table.
#[derive(Debug, Parser)]
#[command(name = "symposium", version)]
#[command(about = "Deadlock-free dining philosophers, rendered live (press ^C to stop)")]
pub struct Cli {
    /// Number of philosophers at the table
    pub actors: Option<u32>,

    /// Seconds each philosopher thinks between meals
    #[arg(value_parser = parse_secs)]
    pub think: Option<Duration>,

    /// Seconds each philosopher eats
    #[arg(value_parser = parse_secs)]
    pub eat: Option<Duration>,

    /// TOML config file
    #[arg(long, short, env = "SYMPOSIUM_CONFIG")]
    pub config: Option<PathBuf>,

    /// Delay between seating consecutive philosophers (ms)
    #[arg(long)]
    pub stagger_ms: Option<u64>,

    /// Screen refresh period (ms)
    #[arg(long)]
    pub refresh_ms: Option<u64>,

    /// Stop after this many seconds instead of waiting for ^C
    #[arg(long, value_parser = parse_secs)]
    pub duration: Option<Duration>,

    /// Do not draw the table
    #[arg(long)]
    pub no_render: bool,

    /// More log output on stderr (-v info, -vv debug, -vvv trace)
    #[arg(long, short, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Layers the command line over the config file over the defaults.
    ///
    /// # Errors
    ///
    /// Config file read/parse errors and validation errors.
    pub fn resolve_config(&self) -> CoreResult<TableConfig> {
        let mut config = match &self.config {
            Some(path) => TableConfig::load(path)?,
            None => TableConfig::default(),
        };

        if let Some(actors) = self.actors {
            config.actors = actors;
        }
        if let Some(think) = self.think {
            config.set_think(think);
        }
        if let Some(eat) = self.eat {
            config.set_use_duration(eat);
        }
        if let Some(stagger) = self.stagger_ms {
            config.stagger_ms = Some(stagger);
        }
        if let Some(refresh) = self.refresh_ms {
            config.refresh_ms = refresh;
        }

        config.validate()?;
        Ok(config)
    }

    /// Filter directive for the log level selected by `-v`.
    #[must_use]
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

/// Parses non-negative, possibly fractional, seconds.
fn parse_secs(arg: &str) -> Result<Duration, String> {
    let secs: f64 = arg
        .trim()
        .parse()
        .map_err(|_| format!("`{arg}` is not a number of seconds"))?;
    Duration::try_from_secs_f64(secs).map_err(|_| format!("`{arg}` must be a non-negative duration"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("symposium").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_positional_arguments() {
        let config = parse(&["7", "2", "0.5"]).resolve_config().unwrap();
        assert_eq!(config.actors, 7);
        assert_eq!(config.think_ms, 2000);
        assert_eq!(config.use_ms, 500);
    }

    #[test]
    fn test_defaults_without_arguments() {
        let config = parse(&[]).resolve_config().unwrap();
        assert_eq!(config, TableConfig::default());
    }

    #[test]
    fn test_negative_seconds_rejected() {
        let result = Cli::try_parse_from(["symposium", "5", "-1", "1"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_garbage_seconds_rejected() {
        assert!(parse_secs("soon").is_err());
        assert_eq!(parse_secs(" 1.5 ").unwrap(), Duration::from_millis(1500));
    }

    #[test]
    fn test_zero_actors_rejected() {
        assert!(parse(&["0", "1", "1"]).resolve_config().is_err());
    }

    #[test]
    fn test_flags_override() {
        let cli = parse(&["3", "1", "1", "--stagger-ms", "0", "--refresh-ms", "50", "-vv"]);
        let config = cli.resolve_config().unwrap();
        assert_eq!(config.stagger_ms, Some(0));
        assert_eq!(config.refresh_ms, 50);
        assert_eq!(cli.log_level(), "debug");
    }

    #[test]
    fn test_command_line_beats_config_file() {
        let id = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let path = std::env::temp_dir().join(format!("symposium_cli_{id}.toml"));
        std::fs::write(&path, "actors = 9\nthink_ms = 10\nuse_ms = 20\n").unwrap();

        let cli = parse(&["4", "--config", path.to_str().unwrap()]);
        let config = cli.resolve_config().unwrap();
        assert_eq!(config.actors, 4);
        assert_eq!(config.think_ms, 10);
        assert_eq!(config.use_ms, 20);

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_duration_flag() {
        let cli = parse(&["--duration", "2.5", "--no-render"]);
        assert_eq!(cli.duration, Some(Duration::from_millis(2500)));
        assert!(cli.no_render);
    }
}

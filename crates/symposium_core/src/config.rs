//! # Table Configuration
//!
//! Loaded once at startup, from TOML or built in code:
//!
//! ```toml
//! actors = 5
//! think_ms = 1000
//! use_ms = 1000
//! stagger_ms = 200   # optional, defaults to 1000 / actors
//! refresh_ms = 20
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// Default observer refresh period.
pub const DEFAULT_REFRESH_MS: u64 = 20;

/// Launch spread across the whole table when no stagger is given.
pub const DEFAULT_LAUNCH_SPREAD_MS: u64 = 1000;

/// Construction parameters for a [`Table`](crate::Table) and its runtime.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TableConfig {
    /// Number of actors (N).
    pub actors: u32,
    /// How long an actor thinks between meals (ms).
    pub think_ms: u64,
    /// How long an actor holds the resource (ms).
    pub use_ms: u64,
    /// Delay between consecutive actor launches (ms).
    pub stagger_ms: Option<u64>,
    /// Observer refresh period (ms).
    pub refresh_ms: u64,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            actors: 5,
            think_ms: 1000,
            use_ms: 1000,
            stagger_ms: None,
            refresh_ms: DEFAULT_REFRESH_MS,
        }
    }
}

impl TableConfig {
    /// A config with the given shape and no launch stagger.
    #[must_use]
    pub fn new(actors: u32, think: Duration, use_duration: Duration) -> Self {
        Self {
            actors,
            think_ms: millis(think),
            use_ms: millis(use_duration),
            stagger_ms: Some(0),
            ..Self::default()
        }
    }

    /// Sets the think duration, saturating at `u64::MAX` milliseconds.
    pub fn set_think(&mut self, think: Duration) {
        self.think_ms = millis(think);
    }

    /// Sets the use duration, saturating at `u64::MAX` milliseconds.
    pub fn set_use_duration(&mut self, use_duration: Duration) {
        self.use_ms = millis(use_duration);
    }

    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::ConfigParse`] for malformed TOML or unknown
    /// keys, and the [`validate`](Self::validate) errors.
    pub fn from_toml_str(source: &str) -> CoreResult<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::ConfigRead`] if the file cannot be read, plus
    /// the [`from_toml_str`](Self::from_toml_str) errors.
    pub fn load(path: impl AsRef<Path>) -> CoreResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| CoreError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    /// Checks value ranges.
    ///
    /// # Errors
    ///
    /// [`CoreError::NoActors`] for `actors == 0`,
    /// [`CoreError::InvalidConfig`] for a zero refresh period.
    pub fn validate(&self) -> CoreResult<()> {
        if self.actors == 0 {
            return Err(CoreError::NoActors);
        }
        if self.refresh_ms == 0 {
            return Err(CoreError::InvalidConfig(
                "refresh_ms must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Number of actors as an index bound.
    #[must_use]
    pub fn actor_count(&self) -> usize {
        self.actors as usize
    }

    /// Think duration.
    #[must_use]
    pub const fn think(&self) -> Duration {
        Duration::from_millis(self.think_ms)
    }

    /// Use duration.
    #[must_use]
    pub const fn use_duration(&self) -> Duration {
        Duration::from_millis(self.use_ms)
    }

    /// Delay between actor launches; spreads launches over one second
    /// when unset.
    #[must_use]
    pub fn stagger(&self) -> Duration {
        let ms = self
            .stagger_ms
            .unwrap_or(DEFAULT_LAUNCH_SPREAD_MS / u64::from(self.actors.max(1)));
        Duration::from_millis(ms)
    }

    /// Observer refresh period.
    #[must_use]
    pub const fn refresh(&self) -> Duration {
        Duration::from_millis(self.refresh_ms)
    }
}

#[allow(clippy::cast_possible_truncation)]
fn millis(duration: Duration) -> u64 {
    duration.as_millis().min(u128::from(u64::MAX)) as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TableConfig::default();
        assert_eq!(config.actors, 5);
        assert_eq!(config.stagger(), Duration::from_millis(200));
        assert_eq!(config.refresh(), Duration::from_millis(20));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_partial_document() {
        let config = TableConfig::from_toml_str("actors = 3\nuse_ms = 250\n").unwrap();
        assert_eq!(config.actors, 3);
        assert_eq!(config.use_duration(), Duration::from_millis(250));
        assert_eq!(config.think(), Duration::from_secs(1));
        assert_eq!(config.stagger(), Duration::from_millis(333));
    }

    #[test]
    fn test_explicit_stagger() {
        let config = TableConfig::from_toml_str("stagger_ms = 0").unwrap();
        assert_eq!(config.stagger(), Duration::ZERO);
    }

    #[test]
    fn test_zero_actors_rejected() {
        assert!(matches!(
            TableConfig::from_toml_str("actors = 0"),
            Err(CoreError::NoActors)
        ));
    }

    #[test]
    fn test_zero_refresh_rejected() {
        assert!(matches!(
            TableConfig::from_toml_str("refresh_ms = 0"),
            Err(CoreError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(matches!(
            TableConfig::from_toml_str("philosophers = 5"),
            Err(CoreError::ConfigParse(_))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let path = std::env::temp_dir().join("symposium_missing_config.toml");
        assert!(matches!(
            TableConfig::load(&path),
            Err(CoreError::ConfigRead { .. })
        ));
    }

    #[test]
    fn test_load_round_trips_through_disk() {
        let id = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let path = std::env::temp_dir().join(format!("symposium_config_{id}.toml"));
        std::fs::write(&path, "actors = 7\nthink_ms = 5\n").unwrap();

        let config = TableConfig::load(&path).unwrap();
        assert_eq!(config.actors, 7);
        assert_eq!(config.think(), Duration::from_millis(5));

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_duration_setters_round_down_to_millis() {
        let mut config = TableConfig::default();
        config.set_think(Duration::from_micros(2_500));
        config.set_use_duration(Duration::from_secs(3));
        assert_eq!(config.think_ms, 2);
        assert_eq!(config.use_duration(), Duration::from_secs(3));

        config.set_think(Duration::MAX);
        assert_eq!(config.think_ms, u64::MAX);
    }

    #[test]
    fn test_new_has_no_stagger() {
        let config = TableConfig::new(4, Duration::from_millis(3), Duration::from_millis(7));
        assert_eq!(config.stagger(), Duration::ZERO);
        assert_eq!(config.think_ms, 3);
        assert_eq!(config.use_ms, 7);
    }
}

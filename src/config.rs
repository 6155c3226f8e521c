//! Runtime settings: defaults, an optional TOML file, then `NFL_STATS_*`
//! environment variables.

use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::{Result, StatsError};

/// Base path of ESPN's core v2 API for the NFL.
pub const DEFAULT_API_BASE_URL: &str =
    "https://sports.core.api.espn.com/v2/sports/football/leagues/nfl";

/// Config file looked up in the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "nfl-stats-hub.toml";

pub const ENV_PREFIX: &str = "NFL_STATS";

/// Upper bound for every TTL, interval and timeout: 30 days.
pub const MAX_DURATION_SECS: u64 = 30 * 24 * 60 * 60;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// Number of leaders requested per category.
    #[serde(default = "default_leaders_limit")]
    pub leaders_limit: usize,
    #[serde(default = "default_standings_ttl")]
    pub standings_ttl_secs: u64,
    #[serde(default = "default_leaders_ttl")]
    pub leaders_ttl_secs: u64,
    /// Interval of the presentation-side refresh timer.
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval_secs: u64,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_image_timeout")]
    pub image_timeout_secs: u64,
    #[serde(default)]
    pub log_dir: Option<PathBuf>,
    #[serde(default)]
    pub log_to_file: bool,
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_leaders_limit() -> usize {
    20
}

fn default_standings_ttl() -> u64 {
    600
}

fn default_leaders_ttl() -> u64 {
    300
}

fn default_refresh_interval() -> u64 {
    300
}

fn default_request_timeout() -> u64 {
    10
}

fn default_image_timeout() -> u64 {
    5
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            leaders_limit: default_leaders_limit(),
            standings_ttl_secs: default_standings_ttl(),
            leaders_ttl_secs: default_leaders_ttl(),
            refresh_interval_secs: default_refresh_interval(),
            request_timeout_secs: default_request_timeout(),
            image_timeout_secs: default_image_timeout(),
            log_dir: None,
            log_to_file: false,
        }
    }
}

impl Settings {
    /// Load settings from `path` (or `nfl-stats-hub.toml` if present) and the
    /// environment.
    ///
    /// A missing default file is fine; an explicitly given path must exist.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(p) => File::from(p).required(true),
            None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let settings: Settings = Config::builder()
            .add_source(file)
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        Ok(settings)
    }

    /// Reject durations that are zero or too large to add to an `Instant`.
    pub fn validate(&self) -> Result<()> {
        let checks = [
            ("standings_ttl_secs", self.standings_ttl_secs),
            ("leaders_ttl_secs", self.leaders_ttl_secs),
            ("refresh_interval_secs", self.refresh_interval_secs),
            ("request_timeout_secs", self.request_timeout_secs),
            ("image_timeout_secs", self.image_timeout_secs),
        ];
        if let Some((name, _)) = checks.iter().find(|(_, v)| *v == 0) {
            return Err(StatsError::InvalidSettings {
                message: format!("{name} must be greater than zero"),
            });
        }
        if let Some((name, value)) = checks.iter().find(|(_, v)| *v > MAX_DURATION_SECS) {
            return Err(StatsError::InvalidSettings {
                message: format!("{name} = {value} exceeds the maximum of {MAX_DURATION_SECS}"),
            });
        }
        if self.leaders_limit == 0 {
            return Err(StatsError::InvalidSettings {
                message: "leaders_limit must be greater than zero".to_string(),
            });
        }
        Ok(())
    }

    pub fn standings_ttl(&self) -> Duration {
        Duration::from_secs(self.standings_ttl_secs)
    }

    pub fn leaders_ttl(&self) -> Duration {
        Duration::from_secs(self.leaders_ttl_secs)
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn image_timeout(&self) -> Duration {
        Duration::from_secs(self.image_timeout_secs)
    }

    /// Directory for per-run log files: `log_dir` if set, otherwise
    /// `<data dir>/nfl-stats-hub/logs`.
    pub fn resolved_log_dir(&self) -> PathBuf {
        if let Some(dir) = &self.log_dir {
            return dir.clone();
        }
        let base = dirs::data_local_dir().unwrap_or_else(|| {
            let mut home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
            home.push(".local");
            home.push("share");
            home
        });
        base.join("nfl-stats-hub").join("logs")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(settings.leaders_limit, 20);
        assert_eq!(settings.standings_ttl(), Duration::from_secs(600));
        assert_eq!(settings.leaders_ttl(), Duration::from_secs(300));
        assert_eq!(settings.refresh_interval(), Duration::from_secs(300));
        assert_eq!(settings.request_timeout(), Duration::from_secs(10));
        assert_eq!(settings.image_timeout(), Duration::from_secs(5));
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_load_from_file_overrides_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("hub.toml");
        fs::write(
            &path,
            "leaders_limit = 5\nstandings_ttl_secs = 60\napi_base_url = \"http://localhost:9999\"\n",
        )
        .unwrap();

        let settings = Settings::load(Some(&path)).unwrap();
        assert_eq!(settings.leaders_limit, 5);
        assert_eq!(settings.standings_ttl_secs, 60);
        assert_eq!(settings.api_base_url, "http://localhost:9999");
        // Untouched fields keep their defaults
        assert_eq!(settings.leaders_ttl_secs, 300);
    }

    #[test]
    fn test_load_missing_explicit_file_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing.toml");
        assert!(Settings::load(Some(&path)).is_err());
    }

    #[test]
    fn test_zero_ttl_rejected() {
        let settings = Settings {
            leaders_ttl_secs: 0,
            ..Settings::default()
        };
        match settings.validate() {
            Err(StatsError::InvalidSettings { message }) => {
                assert!(message.contains("leaders_ttl_secs"))
            }
            other => panic!("Expected InvalidSettings, got {:?}", other),
        }
    }

    #[test]
    fn test_oversized_durations_rejected() {
        let settings = Settings {
            standings_ttl_secs: u64::MAX,
            ..Settings::default()
        };
        match settings.validate() {
            Err(StatsError::InvalidSettings { message }) => {
                assert!(message.contains("standings_ttl_secs"))
            }
            other => panic!("Expected InvalidSettings, got {:?}", other),
        }

        let settings = Settings {
            refresh_interval_secs: MAX_DURATION_SECS + 1,
            ..Settings::default()
        };
        assert!(settings.validate().is_err());

        let settings = Settings {
            leaders_ttl_secs: MAX_DURATION_SECS,
            ..Settings::default()
        };
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_oversized_ttl_in_file_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("hub.toml");
        fs::write(&path, format!("standings_ttl_secs = {}\n", MAX_DURATION_SECS + 1)).unwrap();

        assert!(matches!(
            Settings::load(Some(&path)),
            Err(StatsError::InvalidSettings { .. })
        ));
    }

    #[test]
    fn test_zero_leaders_limit_rejected() {
        let settings = Settings {
            leaders_limit: 0,
            ..Settings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_resolved_log_dir_prefers_explicit() {
        let settings = Settings {
            log_dir: Some(PathBuf::from("/tmp/hub-logs")),
            ..Settings::default()
        };
        assert_eq!(settings.resolved_log_dir(), PathBuf::from("/tmp/hub-logs"));

        let default_dir = Settings::default().resolved_log_dir();
        assert!(default_dir.ends_with("nfl-stats-hub/logs"));
    }
}

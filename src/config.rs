//! Configuration management for StreamVault
//!
//! Config is stored at ~/.config/streamvault/config.toml. Environment
//! variables override the file; `resolve` folds both into [`Settings`].

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use crate::carousel::{DEFAULT_AUTO_ROTATE_INTERVAL, TRANSITION_DURATION};

/// Where hero slides come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeroSource {
    /// TMDB discover lists (movies then shows)
    Tmdb,
    /// Featured films of the local catalogue
    Catalog,
    /// Built-in sample slides
    Sample,
}

impl fmt::Display for HeroSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            HeroSource::Tmdb => "tmdb",
            HeroSource::Catalog => "catalog",
            HeroSource::Sample => "sample",
        })
    }
}

impl FromStr for HeroSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "tmdb" => Ok(HeroSource::Tmdb),
            "catalog" | "catalogue" => Ok(HeroSource::Catalog),
            "sample" => Ok(HeroSource::Sample),
            other => Err(format!(
                "unknown hero source '{}', expected tmdb, catalog or sample",
                other
            )),
        }
    }
}

/// Application configuration as written in the config file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// TMDB v3 API key or v4 read token
    pub tmdb_api_key: Option<String>,
    /// SQLite url of the film catalogue
    pub database_url: Option<String>,
    /// Hero auto-advance interval
    pub auto_rotate_interval_ms: Option<u64>,
    pub hero_source: Option<HeroSource>,
    /// Default tracing filter
    pub log_level: Option<String>,
}

/// Effective settings after environment overrides and defaults
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub tmdb_api_key: Option<String>,
    pub database_url: String,
    pub auto_rotate_interval: Duration,
    pub hero_source: HeroSource,
    pub log_level: String,
}

impl Config {
    /// Get config file path (~/.config/streamvault/config.toml)
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("streamvault").join("config.toml"))
    }

    /// Load from `path`; a missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => {
                return Err(e).with_context(|| format!("failed to read {}", path.display()))
            }
        };
        toml::from_str(&contents).with_context(|| format!("invalid config {}", path.display()))
    }

    /// Save config to `path`
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let toml = toml::to_string_pretty(self)?;
        std::fs::write(path, toml)?;
        Ok(())
    }

    pub fn resolve(&self) -> Settings {
        self.resolve_with(|key| std::env::var(key).ok())
    }

    /// Resolve with an injected environment lookup.
    ///
    /// Without an explicit hero source, TMDB is used when a key is available
    /// and the built-in slides otherwise.
    pub fn resolve_with(&self, env: impl Fn(&str) -> Option<String>) -> Settings {
        let non_empty = |s: Option<String>| s.filter(|v| !v.trim().is_empty());

        let tmdb_api_key =
            non_empty(env("TMDB_API_KEY")).or_else(|| non_empty(self.tmdb_api_key.clone()));
        let database_url = non_empty(env("DATABASE_URL"))
            .or_else(|| non_empty(self.database_url.clone()))
            .unwrap_or_else(default_database_url);
        let auto_rotate_interval = self
            .auto_rotate_interval_ms
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_AUTO_ROTATE_INTERVAL)
            .max(TRANSITION_DURATION);
        let hero_source = self.hero_source.unwrap_or(if tmdb_api_key.is_some() {
            HeroSource::Tmdb
        } else {
            HeroSource::Sample
        });

        Settings {
            tmdb_api_key,
            database_url,
            auto_rotate_interval,
            hero_source,
            log_level: self.log_level.clone().unwrap_or_else(|| "info".to_string()),
        }
    }
}

/// `sqlite://<data dir>/streamvault/catalog.db`
pub fn default_database_url() -> String {
    let path = dirs::data_dir()
        .map(|d| d.join("streamvault").join("catalog.db"))
        .unwrap_or_else(|| PathBuf::from("streamvault.db"));
    format!("sqlite://{}", path.to_string_lossy().replace('\\', "/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.tmdb_api_key.is_none());
        assert!(config.hero_source.is_none());
    }

    #[test]
    fn test_resolve_defaults() {
        let settings = Config::default().resolve_with(no_env);
        assert_eq!(settings.tmdb_api_key, None);
        assert_eq!(settings.hero_source, HeroSource::Sample);
        assert_eq!(settings.auto_rotate_interval, Duration::from_millis(8000));
        assert_eq!(settings.log_level, "info");
        assert!(settings.database_url.starts_with("sqlite://"));
    }

    #[test]
    fn test_env_overrides_file() {
        let config = Config {
            tmdb_api_key: Some("from-file".into()),
            database_url: Some("sqlite://file.db".into()),
            ..Config::default()
        };
        let settings = config.resolve_with(|key| match key {
            "TMDB_API_KEY" => Some("from-env".into()),
            "DATABASE_URL" => Some("sqlite::memory:".into()),
            _ => None,
        });
        assert_eq!(settings.tmdb_api_key.as_deref(), Some("from-env"));
        assert_eq!(settings.database_url, "sqlite::memory:");
        assert_eq!(settings.hero_source, HeroSource::Tmdb);
    }

    #[test]
    fn test_blank_env_ignored() {
        let config = Config {
            tmdb_api_key: Some("from-file".into()),
            ..Config::default()
        };
        let settings = config.resolve_with(|_| Some("  ".into()));
        assert_eq!(settings.tmdb_api_key.as_deref(), Some("from-file"));
    }

    #[test]
    fn test_interval_clamped_to_transition() {
        let config = Config {
            auto_rotate_interval_ms: Some(100),
            ..Config::default()
        };
        assert_eq!(config.resolve_with(no_env).auto_rotate_interval, TRANSITION_DURATION);
    }

    #[test]
    fn test_explicit_hero_source_wins() {
        let config = Config {
            tmdb_api_key: Some("key".into()),
            hero_source: Some(HeroSource::Catalog),
            ..Config::default()
        };
        assert_eq!(config.resolve_with(no_env).hero_source, HeroSource::Catalog);
    }

    #[test]
    fn test_round_trip_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        assert_eq!(Config::load_from(&path).unwrap(), Config::default());

        let config = Config {
            hero_source: Some(HeroSource::Catalog),
            auto_rotate_interval_ms: Some(5000),
            ..Config::default()
        };
        config.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "hero_source = \"radio\"").unwrap();
        assert!(Config::load_from(&path).is_err());
    }
}

//! Ladle configuration file handling

use crate::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

fn default_server_origin() -> String {
    "https://ladle.example.com".to_string()
}

fn default_landing_ttl_secs() -> u64 {
    300
}

fn default_random_count() -> u32 {
    3
}

/// Ladle configuration
///
/// Represents the complete ~/.config/ladle/config.yaml file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LadleConfig {
    /// Origin of the recipe backend, without a trailing slash
    #[serde(default = "default_server_origin")]
    pub server_origin: String,

    /// How long landing-page content may be served from cache, in seconds
    #[serde(default = "default_landing_ttl_secs")]
    pub landing_ttl_secs: u64,

    /// How many random recipes the landing page shows
    #[serde(default = "default_random_count")]
    pub random_count: u32,
}

impl LadleConfig {
    /// Create a configuration with the built-in defaults
    pub fn new() -> Self {
        Self {
            server_origin: default_server_origin(),
            landing_ttl_secs: default_landing_ttl_secs(),
            random_count: default_random_count(),
        }
    }

    /// Load configuration from the default path (~/.config/ladle/config.yaml),
    /// falling back to defaults when the file does not exist yet
    pub fn load_default() -> Result<Self> {
        let path = Self::default_path();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::new());
        }
        Self::load(&path)
    }

    /// Load configuration from a specific path
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(crate::LadleError::Config(format!(
                "Config file not found: {}",
                path.display()
            )));
        }

        tracing::info!(path = %path.display(), "Loading Ladle configuration");

        let content = fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&content)?;

        Ok(config)
    }

    /// Save configuration to the default path
    pub fn save_default(&self) -> Result<()> {
        let path = Self::default_path();
        self.save(&path)
    }

    /// Save configuration to a specific path
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        tracing::info!(path = %path.display(), "Saving Ladle configuration");

        let yaml = serde_yaml::to_string(self)?;
        fs::write(path, yaml)?;

        Ok(())
    }

    /// Get the default config path (~/.config/ladle/config.yaml)
    pub fn default_path() -> PathBuf {
        // Always use ~/.config for consistency across platforms (macOS, Linux)
        let mut path = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push(".config");
        path.push("ladle");
        path.push("config.yaml");
        path
    }

    /// Landing-page cache window as a Duration
    pub fn landing_ttl(&self) -> Duration {
        Duration::from_secs(self.landing_ttl_secs)
    }
}

impl Default for LadleConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_config_defaults() {
        let config = LadleConfig::new();
        assert_eq!(config.landing_ttl_secs, 300);
        assert_eq!(config.landing_ttl(), Duration::from_secs(300));
        assert_eq!(config.random_count, 3);
    }

    #[test]
    fn test_save_and_load() {
        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path();

        let mut config = LadleConfig::new();
        config.server_origin = "http://localhost:3000".to_string();
        config.landing_ttl_secs = 60;

        config.save(path).unwrap();

        let loaded = LadleConfig::load(path).unwrap();
        assert_eq!(loaded.server_origin, "http://localhost:3000");
        assert_eq!(loaded.landing_ttl_secs, 60);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let temp_file = NamedTempFile::new().unwrap();
        fs::write(temp_file.path(), "server_origin: http://localhost:3000\n").unwrap();

        let loaded = LadleConfig::load(temp_file.path()).unwrap();
        assert_eq!(loaded.server_origin, "http://localhost:3000");
        assert_eq!(loaded.landing_ttl_secs, 300);
    }

    #[test]
    fn test_default_path() {
        let path = LadleConfig::default_path();
        assert!(path.ends_with("ladle/config.yaml"));
    }

    #[test]
    fn test_load_missing_file() {
        let result = LadleConfig::load("/nonexistent/config.yaml");
        assert!(result.is_err());
    }
}

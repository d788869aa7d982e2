//! Client-side configuration.
//!
//! Reads/writes `~/.taskhub/config.toml`. The server URL can also come
//! from the `TASKHUB_SERVER` environment variable, which wins over the file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

pub const DEFAULT_SERVER: &str = "http://localhost:5000";

/// Client configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Server URL (e.g. "http://localhost:5000").
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub server: String,
}

impl ClientConfig {
    /// Default config file path: ~/.taskhub/config.toml.
    pub fn default_path() -> PathBuf {
        dirs_path().join("config.toml")
    }

    /// Load config from disk, or return default if file doesn't exist.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: ClientConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save config to disk.
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Resolve the server base URL: environment, then file, then default.
    pub fn resolve_server(&self) -> String {
        if let Ok(url) = std::env::var("TASKHUB_SERVER") {
            if !url.is_empty() {
                return url;
            }
        }
        if !self.server.is_empty() {
            return self.server.clone();
        }
        DEFAULT_SERVER.to_string()
    }
}

/// Return the TaskHub config directory (~/.taskhub).
fn dirs_path() -> PathBuf {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".taskhub")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert!(config.server.is_empty());
    }

    #[test]
    fn test_roundtrip() {
        let config = ClientConfig {
            server: "http://localhost:5000".to_string(),
        };
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let back: ClientConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(back.server, "http://localhost:5000");
    }

    #[test]
    fn test_load_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = ClientConfig::load(&dir.path().join("nope.toml")).unwrap();
        assert!(config.server.is_empty());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let config = ClientConfig {
            server: "http://example.com:5000".to_string(),
        };
        config.save(&path).unwrap();
        let back = ClientConfig::load(&path).unwrap();
        assert_eq!(back.server, config.server);
    }
}

//! Configuration loading.
//!
//! The config lives at `<config_dir>/tatami/config.toml`. A missing file
//! is not an error: the defaults are a complete working setup.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

use crate::config::schema::Config;

/// Resolves the config path and reads the file.
pub struct ConfigLoader {
    path: PathBuf,
}

impl ConfigLoader {
    /// Loader for the conventional per-user location.
    pub fn new() -> Result<Self> {
        let base = dirs::config_dir().context("could not determine the user config directory")?;
        Ok(ConfigLoader {
            path: base.join("tatami").join("config.toml"),
        })
    }

    /// Loader for an explicit path (the `--config` flag).
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        ConfigLoader { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and parse the config, or hand back the defaults when the file
    /// does not exist. A file that exists but fails to parse is an error:
    /// silently ignoring a typo would be worse than refusing to start.
    pub fn load(&self) -> Result<Config> {
        if !self.path.exists() {
            info!("no config at {:?}, using defaults", self.path);
            return Ok(Config::default());
        }

        let text = std::fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read {:?}", self.path))?;
        let config: Config = toml::from_str(&text)
            .with_context(|| format!("failed to parse {:?}", self.path))?;

        info!("loaded config from {:?}", self.path);
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let loader = ConfigLoader::with_path(dir.path().join("nope.toml"));
        let config = loader.load().unwrap();
        assert_eq!(config.general.workspace_count, 9);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[general]\ngap = 12\n").unwrap();

        let config = ConfigLoader::with_path(&path).load().unwrap();
        assert_eq!(config.general.gap, 12);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[general\ngap = oops").unwrap();

        assert!(ConfigLoader::with_path(&path).load().is_err());
    }
}

//! FreedomPath configuration.
//!
//! Loaded from `<home>/config.toml`, where `<home>` is `$FREEDOMPATH_HOME`
//! or `~/.freedompath`. A missing file means defaults.
//!
//! ```toml
//! data-dir = "/path/to/store"   # optional, defaults to <home>
//!
//! [advisor]
//! endpoint = "https://generativelanguage.googleapis.com"
//! model = "gemini-3-flash-preview"
//! timeout-secs = 30
//! api-key-env = "GEMINI_API_KEY"
//! ```

use std::path::{Path, PathBuf};
use std::{env, fs, io};

use serde::Deserialize;

use crate::storage::Storage;

/// Errors that can occur while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not determine home directory")]
    NoHome,

    #[error("failed to read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("invalid config at {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// FreedomPath configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Config {
    /// Where the store lives. Defaults to the FreedomPath home.
    pub data_dir: Option<PathBuf>,

    pub advisor: AdvisorConfig,
}

/// Connection settings for the pattern-analysis and coach service.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct AdvisorConfig {
    pub endpoint: String,
    pub model: String,
    pub timeout_secs: u64,

    /// Name of the environment variable holding the API key.
    pub api_key_env: String,
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://generativelanguage.googleapis.com".to_string(),
            model: "gemini-3-flash-preview".to_string(),
            timeout_secs: 30,
            api_key_env: "GEMINI_API_KEY".to_string(),
        }
    }
}

impl AdvisorConfig {
    /// The API key from the configured environment variable, if set.
    pub fn api_key(&self) -> Option<String> {
        env::var(&self.api_key_env).ok().filter(|k| !k.is_empty())
    }
}

impl Config {
    /// Load config from the FreedomPath home.
    pub fn load() -> Result<Self, ConfigError> {
        let home = Self::home().ok_or(ConfigError::NoHome)?;
        Self::from_path(&home.join("config.toml"))
    }

    /// Load config from a specific file. A missing file yields defaults.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents = match fs::read_to_string(path) {
            Ok(s) => s,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::debug!("no config at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// The FreedomPath home: `$FREEDOMPATH_HOME`, else `~/.freedompath`.
    pub fn home() -> Option<PathBuf> {
        match env::var_os("FREEDOMPATH_HOME") {
            Some(dir) if !dir.is_empty() => Some(PathBuf::from(dir)),
            _ => Storage::default_root(),
        }
    }

    /// Directory holding the store.
    pub fn data_root(&self) -> Option<PathBuf> {
        self.data_dir.clone().or_else(Self::home)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use tempfile::TempDir;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::from_path(&dir.path().join("config.toml")).unwrap();

        assert_eq!(config, Config::default());
        assert_eq!(config.advisor.timeout_secs, 30);
    }

    #[test]
    fn partial_file_merges_with_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "data-dir = \"/tmp/fp\"\n\n[advisor]\nmodel = \"gemini-2.5-flash\"\n",
        )
        .unwrap();

        let config = Config::from_path(&path).unwrap();

        assert_eq!(config.data_dir, Some(PathBuf::from("/tmp/fp")));
        assert_eq!(config.data_root(), Some(PathBuf::from("/tmp/fp")));
        assert_eq!(config.advisor.model, "gemini-2.5-flash");
        assert_eq!(config.advisor.api_key_env, "GEMINI_API_KEY");
    }

    #[test]
    fn invalid_file_is_a_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[advisor\ntimeout-secs = ").unwrap();

        let err = Config::from_path(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn unset_key_variable_means_no_key() {
        let advisor = AdvisorConfig {
            api_key_env: "FREEDOMPATH_TEST_KEY_THAT_IS_NEVER_SET".into(),
            ..AdvisorConfig::default()
        };
        assert!(advisor.api_key().is_none());
    }
}

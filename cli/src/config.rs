//! Configuration for the `todoey` binary.
//!
//! Sources, lowest precedence first: built-in defaults, a TOML file,
//! environment variables, command-line flags.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:3000";
pub const API_URL_ENV: &str = "TODOEY_API_URL";
pub const SESSION_FILE_ENV: &str = "TODOEY_SESSION_FILE";

/// Shape of `config.toml`. Every key is optional.
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub api_url: Option<String>,
    pub session_file: Option<PathBuf>,
}

/// Values that override the file, typically from env and flags.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub api_url: Option<String>,
    pub session_file: Option<PathBuf>,
}

impl Overrides {
    pub fn from_env() -> Self {
        Self {
            api_url: std::env::var(API_URL_ENV).ok().filter(|v| !v.is_empty()),
            session_file: std::env::var_os(SESSION_FILE_ENV)
                .filter(|v| !v.is_empty())
                .map(PathBuf::from),
        }
    }

    /// `other` wins wherever it is set.
    pub fn merge(self, other: Overrides) -> Self {
        Self {
            api_url: other.api_url.or(self.api_url),
            session_file: other.session_file.or(self.session_file),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_url: String,
    pub session_file: PathBuf,
}

impl Config {
    /// Resolve the effective configuration.
    ///
    /// An explicit `path` must exist; the default location is read only when
    /// present.
    pub fn load(path: Option<&Path>, overrides: Overrides) -> Result<Self> {
        let file = match path {
            Some(path) => read_file(path)?,
            None => match default_config_path() {
                Some(path) if path.exists() => read_file(&path)?,
                _ => FileConfig::default(),
            },
        };
        Self::resolve(file, overrides)
    }

    fn resolve(file: FileConfig, overrides: Overrides) -> Result<Self> {
        let api_url = overrides
            .api_url
            .or(file.api_url)
            .unwrap_or_else(|| DEFAULT_API_URL.to_owned());
        let session_file = match overrides.session_file.or(file.session_file) {
            Some(path) => path,
            None => default_session_path()
                .ok_or_else(|| anyhow!("could not determine a data directory for the session file"))?,
        };
        Ok(Self {
            api_url,
            session_file,
        })
    }
}

fn read_file(path: &Path) -> Result<FileConfig> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    toml::from_str(&raw).with_context(|| format!("invalid config file {}", path.display()))
}

pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("todoey").join("config.toml"))
}

pub fn default_session_path() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join("todoey").join("session.json"))
}

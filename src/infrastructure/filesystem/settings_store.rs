use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::common::error::GitOpsError;
use crate::common::result::GitOpsResult;

/// Directory under the home directory that holds the settings file.
pub const SETTINGS_DIR: &str = ".gitops-apply";

/// Default settings file name.
pub const SETTINGS_FILE: &str = "config.yml";

/// Connection settings as stored on disk. Every field is optional so flags
/// and environment variables can fill the gaps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Settings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_seconds: Option<u64>,
}

impl Settings {
    /// Values from `other` win where present.
    pub fn merge(self, other: Settings) -> Settings {
        Settings {
            base_url: other.base_url.or(self.base_url),
            account_id: other.account_id.or(self.account_id),
            api_key: other.api_key.or(self.api_key),
            timeout_seconds: other.timeout_seconds.or(self.timeout_seconds),
        }
    }
}

/// Reads settings files.
#[derive(Debug, Default, Clone)]
pub struct SettingsStore;

impl SettingsStore {
    pub fn new() -> Self {
        Self
    }

    /// `~/.gitops-apply/config.yml`, when a home directory is known.
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(SETTINGS_DIR).join(SETTINGS_FILE))
    }

    /// Loads settings from `path`. The file must exist.
    pub fn load(&self, path: &Path) -> GitOpsResult<Settings> {
        let content = fs::read_to_string(path).map_err(|e| {
            GitOpsError::filesystem_error_with_source(
                format!("Failed to read settings file: {}", path.display()),
                Some(path.to_path_buf()),
                e,
            )
        })?;

        if content.trim().is_empty() {
            return Ok(Settings::default());
        }

        serde_yaml::from_str(&content).map_err(|e| {
            GitOpsError::config_error_with_source(
                format!("Invalid settings file: {}", path.display()),
                e,
            )
        })
    }

    /// Loads `explicit` if given, otherwise the default file when it exists.
    pub fn load_or_default(&self, explicit: Option<&Path>) -> GitOpsResult<Settings> {
        match explicit {
            Some(path) => self.load(path),
            None => match Self::default_path() {
                Some(path) if path.exists() => self.load(&path),
                _ => Ok(Settings::default()),
            },
        }
    }
}

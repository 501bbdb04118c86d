//! Settings file management.
//!
//! Handles locating the data directory and reading, writing, and validating
//! its optional `config.toml`. A missing file means defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::cipher::KdfParams;
use crate::core::constants::{
    APP_DIR, CONFIG_FILE, DEFAULT_FILE_EXTENSION, DEFAULT_PROFILE, HOME_ENV,
};
use crate::core::domain::validate_profile_name;
use crate::error::{ConfigError, Result};

/// User settings stored in `<data dir>/config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Profile used when `--profile` is not given.
    pub default_profile: String,
    /// Key derivation cost for newly sealed profiles and files.
    pub kdf: KdfParams,
    pub files: FileSettings,
}

/// File encryption settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSettings {
    /// Extension appended to encrypted files.
    pub extension: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_profile: DEFAULT_PROFILE.to_string(),
            kdf: KdfParams::default(),
            files: FileSettings::default(),
        }
    }
}

impl Default for FileSettings {
    fn default() -> Self {
        Self {
            extension: DEFAULT_FILE_EXTENSION.to_string(),
        }
    }
}

impl Settings {
    /// Path to the settings file in a data directory.
    pub fn path(data_dir: &Path) -> PathBuf {
        data_dir.join(CONFIG_FILE)
    }

    /// Load settings from a data directory.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` if the TOML is malformed and
    /// `ConfigError::InvalidValue` if a value fails validation.
    pub fn load(data_dir: &Path) -> Result<Self> {
        let path = Self::path(data_dir);
        debug!(path = %path.display(), "loading settings");

        let contents = match std::fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("no settings file, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::ReadFile(e).into()),
        };

        let settings: Self = toml::from_str(&contents).map_err(ConfigError::Parse)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to a data directory, creating it if needed.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::WriteFile` if the file cannot be written.
    pub fn save(&self, data_dir: &Path) -> Result<()> {
        debug!(path = %data_dir.display(), "saving settings");
        self.validate()?;

        let contents = toml::to_string_pretty(self).map_err(ConfigError::Serialize)?;
        std::fs::create_dir_all(data_dir).map_err(ConfigError::WriteFile)?;
        std::fs::write(Self::path(data_dir), contents).map_err(ConfigError::WriteFile)?;
        Ok(())
    }

    /// Validate settings values.
    ///
    /// Checks:
    /// - KDF parameters are inside the accepted bounds
    /// - The file extension is non-empty and has no dots or separators
    /// - The default profile name is valid
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` on validation failure.
    pub fn validate(&self) -> Result<()> {
        self.kdf.validate()?;

        let ext = &self.files.extension;
        if ext.is_empty() || ext.contains(['.', '/', '\\']) {
            return Err(ConfigError::InvalidValue {
                field: "files.extension",
                reason: format!("'{}' must be a non-empty name without dots or slashes", ext),
            }
            .into());
        }

        validate_profile_name(&self.default_profile).map_err(|e| ConfigError::InvalidValue {
            field: "default_profile",
            reason: e.to_string(),
        })?;

        Ok(())
    }
}

/// Resolve the data directory: `$CREDKEEP_HOME`, else `~/.credkeep`.
///
/// # Errors
///
/// Returns `ConfigError::NoHomeDir` if neither is available.
pub fn data_dir() -> Result<PathBuf> {
    if let Some(dir) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    let home = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
    Ok(home.join(APP_DIR))
}

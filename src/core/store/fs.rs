//! Filesystem profile storage.
//!
//! Profiles live at `<root>/profiles/<name>.profile`, written with mode
//! 0600 on Unix via write-then-rename.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::{open_profile, seal_profile, Store};
use crate::core::cipher::Envelope;
use crate::core::constants::{PROFILES_DIR, PROFILE_EXTENSION};
use crate::core::domain::{validate_profile_name, Profile};
use crate::core::types::ProfileName;
use crate::error::{ProfileError, Result};

/// Filesystem-backed profile store.
#[derive(Debug, Clone)]
pub struct Filesystem {
    dir: PathBuf,
    envelope: Envelope,
}

impl Filesystem {
    /// Store rooted at a data directory. Profiles go in its `profiles/`
    /// subdirectory, which is created on first save.
    pub fn new(data_dir: impl Into<PathBuf>, envelope: Envelope) -> Self {
        Self {
            dir: data_dir.into().join(PROFILES_DIR),
            envelope,
        }
    }

    /// Directory holding the profile files.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of a profile file.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidProfileName` for names that cannot
    /// be used as file names.
    pub fn path(&self, name: &str) -> Result<PathBuf> {
        validate_profile_name(name)?;
        Ok(self.dir.join(format!("{}.{}", name, PROFILE_EXTENSION)))
    }
}

impl Store for Filesystem {
    fn exists(&self, name: &str) -> Result<bool> {
        Ok(self.path(name)?.is_file())
    }

    fn load(&self, name: &str, password: &str) -> Result<Profile> {
        let path = self.path(name)?;
        debug!(profile = name, path = %path.display(), "loading profile");

        let sealed = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(ProfileError::NotFound(name.to_string()).into());
            }
            Err(source) => return Err(ProfileError::Read { path, source }.into()),
        };

        let profile = open_profile(name, &sealed, password)?;
        debug!(profile = name, sites = profile.len(), "profile loaded");
        Ok(profile)
    }

    fn save(&self, profile: &Profile, password: &str) -> Result<()> {
        let path = self.path(profile.name())?;
        let sealed = seal_profile(&self.envelope, profile, password)?;

        fs::create_dir_all(&self.dir).map_err(|source| ProfileError::Write {
            path: self.dir.clone(),
            source,
        })?;
        write_private(&path, &sealed).map_err(|source| ProfileError::Write {
            path: path.clone(),
            source,
        })?;

        debug!(profile = profile.name(), sites = profile.len(), bytes = sealed.len(), "profile saved");
        Ok(())
    }

    fn list(&self) -> Result<Vec<ProfileName>> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(ProfileError::Read {
                    path: self.dir.clone(),
                    source,
                }
                .into())
            }
        };

        let mut names = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some(PROFILE_EXTENSION) {
                continue;
            }
            match path.file_stem().and_then(|s| s.to_str()) {
                Some(stem) if validate_profile_name(stem).is_ok() => names.push(stem.to_string()),
                _ => warn!(path = %path.display(), "ignoring unexpected file in profiles directory"),
            }
        }
        names.sort();
        Ok(names)
    }

    fn remove(&self, name: &str) -> Result<()> {
        let path = self.path(name)?;
        match fs::remove_file(&path) {
            Ok(()) => {
                debug!(profile = name, "profile removed");
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(ProfileError::NotFound(name.to_string()).into())
            }
            Err(source) => Err(ProfileError::Write { path, source }.into()),
        }
    }
}

/// Write `data` to `path` with Unix mode 0600, replacing any existing file.
///
/// The data goes to a sibling temp file which is then renamed over the
/// target, so readers never observe a partial file.
pub(crate) fn write_private(path: &Path, data: &[u8]) -> io::Result<()> {
    let mut tmp_name = path.file_name().unwrap_or_default().to_os_string();
    tmp_name.push(".tmp");
    let tmp_path = path.with_file_name(tmp_name);

    let written = (|| {
        #[cfg(unix)]
        let mut f = {
            use std::os::unix::fs::OpenOptionsExt;
            fs::OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .mode(0o600)
                .open(&tmp_path)?
        };
        #[cfg(not(unix))]
        let mut f = fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&tmp_path)?;

        f.write_all(data)?;
        f.sync_all()?;
        drop(f);
        fs::rename(&tmp_path, path)
    })();

    if written.is_err() {
        let _ = fs::remove_file(&tmp_path);
    }
    written
}

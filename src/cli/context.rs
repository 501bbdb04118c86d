//! Per-invocation state shared by commands.

use std::path::PathBuf;

use tracing::debug;

use crate::cli::prompt::Prompt;
use crate::core::cipher::Envelope;
use crate::core::config::{self, Settings};
use crate::core::files::FileEncryptor;
use crate::core::hooks::{Hooks, TracingHooks};
use crate::core::session::Session;
use crate::core::store::Filesystem;
use crate::error::Result;

/// Resolved data directory, settings, and target profile.
pub struct Context {
    pub data_dir: PathBuf,
    pub settings: Settings,
    pub profile: String,
    store: Filesystem,
}

impl Context {
    /// Resolve the data directory and load settings.
    ///
    /// `profile` overrides the configured default profile.
    pub fn load(profile: Option<String>) -> Result<Self> {
        let data_dir = config::data_dir()?;
        let settings = Settings::load(&data_dir)?;
        let profile = profile.unwrap_or_else(|| settings.default_profile.clone());
        let store = Filesystem::new(&data_dir, Envelope::new(settings.kdf));
        debug!(data_dir = %data_dir.display(), profile = %profile, "context loaded");

        Ok(Self {
            data_dir,
            settings,
            profile,
            store,
        })
    }

    pub fn store(&self) -> &Filesystem {
        &self.store
    }

    /// Open the target profile.
    pub fn open(&self, hooks: &mut dyn Hooks) -> Result<Session<'_>> {
        Session::open(&self.store, &self.profile, hooks)
    }

    /// File encryptor using the configured KDF cost and extension.
    pub fn encryptor(&self) -> FileEncryptor {
        FileEncryptor::new(self.settings.kdf, self.settings.files.extension.clone())
    }
}

/// Hooks for CLI commands: prompts, with every step logged.
pub fn hooks(assume_yes: bool) -> TracingHooks<Prompt> {
    TracingHooks::new(Prompt::new(assume_yes))
}

//! In-memory profile storage.

use std::cell::RefCell;
use std::collections::BTreeMap;

use super::{open_profile, seal_profile, Store};
use crate::core::cipher::Envelope;
use crate::core::domain::{validate_profile_name, Profile};
use crate::core::types::ProfileName;
use crate::error::{ProfileError, Result};

/// Profile store that keeps sealed profiles in a map.
///
/// Profiles are still sealed and opened with the envelope cipher, so the
/// password semantics match [`super::Filesystem`].
#[derive(Debug, Default)]
pub struct Memory {
    envelope: Envelope,
    profiles: RefCell<BTreeMap<ProfileName, Vec<u8>>>,
}

impl Memory {
    pub fn new(envelope: Envelope) -> Self {
        Self {
            envelope,
            profiles: RefCell::new(BTreeMap::new()),
        }
    }

    /// Raw sealed bytes of a profile.
    pub fn sealed(&self, name: &str) -> Option<Vec<u8>> {
        self.profiles.borrow().get(name).cloned()
    }
}

impl Store for Memory {
    fn exists(&self, name: &str) -> Result<bool> {
        Ok(self.profiles.borrow().contains_key(name))
    }

    fn load(&self, name: &str, password: &str) -> Result<Profile> {
        let profiles = self.profiles.borrow();
        let sealed = profiles
            .get(name)
            .ok_or_else(|| ProfileError::NotFound(name.to_string()))?;
        open_profile(name, sealed, password)
    }

    fn save(&self, profile: &Profile, password: &str) -> Result<()> {
        validate_profile_name(profile.name())?;
        let sealed = seal_profile(&self.envelope, profile, password)?;
        self.profiles
            .borrow_mut()
            .insert(profile.name().to_string(), sealed);
        Ok(())
    }

    fn list(&self) -> Result<Vec<ProfileName>> {
        Ok(self.profiles.borrow().keys().cloned().collect())
    }

    fn remove(&self, name: &str) -> Result<()> {
        self.profiles
            .borrow_mut()
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| ProfileError::NotFound(name.to_string()).into())
    }
}

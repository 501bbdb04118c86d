//! Open profile sessions.
//!
//! A session ties a decrypted profile to the store it came from and the
//! password that opened it. Changes made through [`Session::registry_mut`]
//! stay in memory until [`Session::commit`] re-encrypts and saves them.

use tracing::{debug, info};
use zeroize::Zeroizing;

use crate::core::domain::{validate_profile_name, Profile};
use crate::core::hooks::{fail, Hooks, Step};
use crate::core::registry::Registry;
use crate::core::store::Store;
use crate::error::{ProfileError, Result, ValidationError};

/// A decrypted profile bound to its store and password.
pub struct Session<'a> {
    store: &'a dyn Store,
    registry: Registry,
    password: Zeroizing<String>,
}

impl<'a> Session<'a> {
    /// Open an existing profile, asking the hooks for its password.
    ///
    /// The password is only requested once the profile is known to exist.
    ///
    /// # Errors
    ///
    /// Returns `ProfileError::NotFound` for a missing profile and
    /// `ProfileError::WrongPasswordOrCorrupt` if the password does not open
    /// it.
    pub fn open(store: &'a dyn Store, name: &str, hooks: &mut dyn Hooks) -> Result<Self> {
        hooks.on_step(Step::ProfileLoading);
        if !store.exists(name).map_err(|e| fail(hooks, Step::ProfileLoading, e))? {
            return Err(fail(
                hooks,
                Step::ProfileLoading,
                ProfileError::NotFound(name.to_string()),
            ));
        }

        hooks.on_step(Step::ProfilePassword);
        let password = hooks
            .password(Step::ProfilePassword)
            .map_err(|e| fail(hooks, Step::ProfilePassword, e))?;

        let profile = store
            .load(name, &password)
            .map_err(|e| fail(hooks, Step::ProfileLoading, e))?;
        debug!(profile = name, sites = profile.len(), "session opened");

        Ok(Self {
            store,
            registry: Registry::new(profile),
            password,
        })
    }

    /// Start a new, empty profile, asking the hooks for its password.
    ///
    /// Nothing is written until [`Session::commit`].
    ///
    /// # Errors
    ///
    /// Returns `ProfileError::AlreadyExists` if the name is taken and
    /// `ValidationError` for an invalid name or empty password.
    pub fn create(store: &'a dyn Store, name: &str, hooks: &mut dyn Hooks) -> Result<Self> {
        validate_profile_name(name).map_err(|e| fail(hooks, Step::ProfileNewPassword, e))?;
        if store.exists(name).map_err(|e| fail(hooks, Step::ProfileLoading, e))? {
            return Err(fail(
                hooks,
                Step::ProfileLoading,
                ProfileError::AlreadyExists(name.to_string()),
            ));
        }

        let password = new_password(hooks)?;
        debug!(profile = name, "session created");

        Ok(Self {
            store,
            registry: Registry::new(Profile::new(name)),
            password,
        })
    }

    /// Profile name.
    pub fn name(&self) -> &str {
        self.registry.profile().name()
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }

    /// Replace the password used by the next commit.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::EmptyPassword` if the hooks supply an empty
    /// password.
    pub fn change_password(&mut self, hooks: &mut dyn Hooks) -> Result<()> {
        self.password = new_password(hooks)?;
        info!(profile = self.name(), "profile password changed");
        Ok(())
    }

    /// Encrypt and save the profile.
    ///
    /// # Errors
    ///
    /// Returns `ProfileError::Write` if the profile cannot be written.
    pub fn commit(&self, hooks: &mut dyn Hooks) -> Result<()> {
        hooks.on_step(Step::ProfileSaving);
        self.store
            .save(self.registry.profile(), &self.password)
            .map_err(|e| fail(hooks, Step::ProfileSaving, e))?;
        debug!(profile = self.name(), "session committed");
        hooks.on_step(Step::Done);
        Ok(())
    }
}

fn new_password(hooks: &mut dyn Hooks) -> Result<Zeroizing<String>> {
    hooks.on_step(Step::ProfileNewPassword);
    let password = hooks
        .password(Step::ProfileNewPassword)
        .map_err(|e| fail(hooks, Step::ProfileNewPassword, e))?;
    if password.is_empty() {
        return Err(fail(
            hooks,
            Step::ProfileNewPassword,
            ValidationError::EmptyPassword,
        ));
    }
    Ok(password)
}

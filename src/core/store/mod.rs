//! Profile storage.
//!
//! A store keeps sealed profiles by name. Two backends exist:
//!
//! - [`Filesystem`]: one envelope file per profile under `<data dir>/profiles/`.
//! - [`Memory`]: an in-process map, for tests and embedders.
//!
//! Both seal and open through the same envelope cipher, so the error mapping
//! is identical:
//!
//! - missing profile → `ProfileError::NotFound`
//! - authentication failure → `ProfileError::WrongPasswordOrCorrupt`
//! - unparseable envelope → `CipherError::MalformedEnvelope`
//! - plaintext that is not a profile document → `ProfileError::Corrupt`

use crate::core::cipher::Envelope;
use crate::core::domain::Profile;
use crate::core::types::ProfileName;
use crate::error::{CipherError, Error, ProfileError, Result};

mod fs;
mod memory;

pub use fs::Filesystem;
pub(crate) use fs::write_private;
pub use memory::Memory;

/// Sealed profile storage.
pub trait Store {
    /// Check whether a profile exists.
    fn exists(&self, name: &str) -> Result<bool>;

    /// Load and decrypt a profile.
    ///
    /// # Errors
    ///
    /// Returns `ProfileError::NotFound` if there is no such profile and
    /// `ProfileError::WrongPasswordOrCorrupt` if the password does not open
    /// it. The two are never confused.
    fn load(&self, name: &str, password: &str) -> Result<Profile>;

    /// Encrypt and persist a profile, replacing any previous version.
    ///
    /// # Errors
    ///
    /// Returns `ProfileError::Write` if the profile cannot be written. A
    /// failed save leaves the previous version in place.
    fn save(&self, profile: &Profile, password: &str) -> Result<()>;

    /// Names of all stored profiles, sorted.
    fn list(&self) -> Result<Vec<ProfileName>>;

    /// Delete a profile.
    ///
    /// # Errors
    ///
    /// Returns `ProfileError::NotFound` if there is no such profile.
    fn remove(&self, name: &str) -> Result<()>;
}

/// Seal a profile document.
pub(crate) fn seal_profile(envelope: &Envelope, profile: &Profile, password: &str) -> Result<Vec<u8>> {
    let document = zeroize::Zeroizing::new(profile.to_document()?);
    envelope.seal(&document, password)
}

/// Open a sealed profile and map failures to profile errors.
pub(crate) fn open_profile(name: &str, sealed: &[u8], password: &str) -> Result<Profile> {
    let plaintext = match Envelope::open(sealed, password) {
        Ok(p) => p,
        Err(Error::Cipher(CipherError::Authentication)) => {
            return Err(ProfileError::WrongPasswordOrCorrupt(name.to_string()).into());
        }
        Err(e) => return Err(e),
    };

    Profile::from_document(name, &plaintext).map_err(|reason| {
        ProfileError::Corrupt {
            name: name.to_string(),
            reason,
        }
        .into()
    })
}

//! Argon2id key derivation.
//!
//! Derives the 32-byte envelope key from a password and a per-envelope salt.
//! Parameters travel inside every envelope, so changing the defaults never
//! breaks existing profiles.

use argon2::{Algorithm, Argon2, Params, Version};
use rand::rngs::OsRng;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use crate::error::{CipherError, ConfigError, Result};

/// Salt length in bytes.
pub const SALT_LEN: usize = 16;

/// Derived key length in bytes.
pub const KEY_LEN: usize = 32;

/// Accepted memory cost range, in KiB.
pub const MEMORY_KIB_RANGE: std::ops::RangeInclusive<u32> = 8..=1_048_576;

/// Accepted iteration range.
pub const ITERATIONS_RANGE: std::ops::RangeInclusive<u32> = 1..=64;

/// Accepted parallelism range.
pub const PARALLELISM_RANGE: std::ops::RangeInclusive<u32> = 1..=16;

/// Argon2id cost parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KdfParams {
    /// Memory cost in KiB.
    pub memory_kib: u32,
    /// Number of passes.
    pub iterations: u32,
    /// Degree of parallelism (lanes).
    pub parallelism: u32,
}

impl Default for KdfParams {
    /// OWASP-recommended Argon2id baseline (19 MiB, 2 passes, 1 lane).
    fn default() -> Self {
        Self {
            memory_kib: 19_456,
            iterations: 2,
            parallelism: 1,
        }
    }
}

impl KdfParams {
    /// Create a parameter set.
    pub fn new(memory_kib: u32, iterations: u32, parallelism: u32) -> Self {
        Self {
            memory_kib,
            iterations,
            parallelism,
        }
    }

    /// Check the parameters are inside the accepted bounds.
    ///
    /// Returns a human readable reason on failure so callers can wrap it in
    /// the error type that fits their layer.
    pub fn check(&self) -> std::result::Result<(), String> {
        if !MEMORY_KIB_RANGE.contains(&self.memory_kib) {
            return Err(format!("memory cost {} KiB out of range", self.memory_kib));
        }
        if !ITERATIONS_RANGE.contains(&self.iterations) {
            return Err(format!("iterations {} out of range", self.iterations));
        }
        if !PARALLELISM_RANGE.contains(&self.parallelism) {
            return Err(format!("parallelism {} out of range", self.parallelism));
        }
        self.argon2_params().map(|_| ())
    }

    /// Validate parameters coming from the settings file.
    pub fn validate(&self) -> Result<()> {
        self.check().map_err(|reason| {
            ConfigError::InvalidValue {
                field: "kdf",
                reason,
            }
            .into()
        })
    }

    fn argon2_params(&self) -> std::result::Result<Params, String> {
        Params::new(
            self.memory_kib,
            self.iterations,
            self.parallelism,
            Some(KEY_LEN),
        )
        .map_err(|e| format!("invalid Argon2id parameters: {}", e))
    }
}

/// Generate a random salt.
pub fn generate_salt() -> [u8; SALT_LEN] {
    let mut salt = [0u8; SALT_LEN];
    OsRng.fill_bytes(&mut salt);
    salt
}

/// Derive a 32-byte key from `password` and `salt`.
///
/// # Errors
///
/// Returns `CipherError::KeyDerivation` if the parameters are rejected by
/// Argon2 or hashing fails.
pub fn derive_key(
    password: &[u8],
    salt: &[u8; SALT_LEN],
    params: &KdfParams,
) -> Result<Zeroizing<[u8; KEY_LEN]>> {
    let argon2_params = params
        .argon2_params()
        .map_err(CipherError::KeyDerivation)?;
    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, argon2_params);

    let mut key = Zeroizing::new([0u8; KEY_LEN]);
    argon2
        .hash_password_into(password, salt, key.as_mut())
        .map_err(|e| CipherError::KeyDerivation(format!("{}", e)))?;

    Ok(key)
}

//! Cryptographic operations.
//!
//! Everything credkeep encrypts (profiles and standalone files) goes through
//! one self-describing envelope format:
//!
//! - **kdf**: Argon2id derives a 32-byte key from the password and a random salt.
//! - **envelope**: XChaCha20-Poly1305 seals the payload; salt, KDF parameters
//!   and nonce are stored in the authenticated header.
//!
//! Only the password is needed to open an envelope.

pub mod envelope;
pub mod kdf;

pub use envelope::{is_envelope, Envelope, Header};
pub use kdf::KdfParams;

//! Password-sealed envelope format.
//!
//! ```text
//! offset  size  field
//!      0     4  magic "CKEV"
//!      4     1  version (1)
//!      5     4  argon2id memory cost, KiB (u32 LE)
//!      9     4  argon2id iterations (u32 LE)
//!     13     4  argon2id parallelism (u32 LE)
//!     17    16  salt
//!     33    24  xchacha20-poly1305 nonce
//!     57   n+16 ciphertext || poly1305 tag
//! ```
//!
//! The header is passed as associated data, so any modified byte after the
//! version fails authentication rather than decrypting to something else.

use chacha20poly1305::aead::{Aead, KeyInit, Payload};
use chacha20poly1305::{Key, XChaCha20Poly1305, XNonce};
use rand::rngs::OsRng;
use rand::RngCore;
use tracing::{debug, trace};
use zeroize::Zeroizing;

use super::kdf::{self, KdfParams, SALT_LEN};
use crate::error::{CipherError, Result};

/// Envelope magic bytes.
pub const MAGIC: &[u8; 4] = b"CKEV";

/// Current envelope format version.
pub const VERSION: u8 = 1;

/// Nonce length in bytes.
pub const NONCE_LEN: usize = 24;

/// Authentication tag length in bytes.
pub const TAG_LEN: usize = 16;

/// Total header length in bytes.
pub const HEADER_LEN: usize = 4 + 1 + 12 + SALT_LEN + NONCE_LEN;

/// Parsed envelope header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub kdf: KdfParams,
    pub salt: [u8; SALT_LEN],
    pub nonce: [u8; NONCE_LEN],
}

impl Header {
    fn to_bytes(&self) -> [u8; HEADER_LEN] {
        let mut out = [0u8; HEADER_LEN];
        out[0..4].copy_from_slice(MAGIC);
        out[4] = VERSION;
        out[5..9].copy_from_slice(&self.kdf.memory_kib.to_le_bytes());
        out[9..13].copy_from_slice(&self.kdf.iterations.to_le_bytes());
        out[13..17].copy_from_slice(&self.kdf.parallelism.to_le_bytes());
        out[17..33].copy_from_slice(&self.salt);
        out[33..HEADER_LEN].copy_from_slice(&self.nonce);
        out
    }

    /// Parse and bounds-check a header.
    ///
    /// # Errors
    ///
    /// Returns `CipherError::MalformedEnvelope` if the bytes are too short to
    /// hold a header and tag, the magic or version is wrong, or the KDF
    /// parameters are out of range.
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < HEADER_LEN + TAG_LEN {
            return Err(malformed(format!(
                "{} bytes is shorter than the minimum {}",
                bytes.len(),
                HEADER_LEN + TAG_LEN
            )));
        }
        if &bytes[0..4] != MAGIC {
            return Err(malformed("bad magic".to_string()));
        }
        if bytes[4] != VERSION {
            return Err(malformed(format!("unsupported version {}", bytes[4])));
        }

        let kdf = KdfParams::new(
            read_u32(&bytes[5..9]),
            read_u32(&bytes[9..13]),
            read_u32(&bytes[13..17]),
        );
        kdf.check().map_err(malformed)?;

        let mut salt = [0u8; SALT_LEN];
        salt.copy_from_slice(&bytes[17..33]);
        let mut nonce = [0u8; NONCE_LEN];
        nonce.copy_from_slice(&bytes[33..HEADER_LEN]);

        Ok(Self { kdf, salt, nonce })
    }
}

/// Seals and opens envelopes.
///
/// Holds the KDF parameters used for new envelopes. Opening always uses the
/// parameters recorded in the envelope itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct Envelope {
    kdf: KdfParams,
}

impl Envelope {
    /// Envelope cipher sealing with the given KDF parameters.
    pub fn new(kdf: KdfParams) -> Self {
        Self { kdf }
    }

    /// KDF parameters used by `seal`.
    pub fn kdf(&self) -> &KdfParams {
        &self.kdf
    }

    /// Encrypt `plaintext` under `password`.
    ///
    /// A fresh salt and nonce are drawn for every call, so sealing the same
    /// input twice yields different bytes.
    ///
    /// # Errors
    ///
    /// Returns `CipherError::KeyDerivation` for unusable KDF parameters or
    /// `CipherError::Encryption` if the AEAD refuses the input.
    pub fn seal(&self, plaintext: &[u8], password: &str) -> Result<Vec<u8>> {
        trace!(plaintext_len = plaintext.len(), "sealing envelope");

        let mut nonce = [0u8; NONCE_LEN];
        OsRng.fill_bytes(&mut nonce);
        let header = Header {
            kdf: self.kdf,
            salt: kdf::generate_salt(),
            nonce,
        };
        let header_bytes = header.to_bytes();

        let key = kdf::derive_key(password.as_bytes(), &header.salt, &header.kdf)?;
        let cipher = XChaCha20Poly1305::new(Key::from_slice(&key[..]));
        let body = cipher
            .encrypt(
                XNonce::from_slice(&header.nonce),
                Payload {
                    msg: plaintext,
                    aad: &header_bytes,
                },
            )
            .map_err(|e| CipherError::Encryption(format!("{}", e)))?;

        let mut out = Vec::with_capacity(HEADER_LEN + body.len());
        out.extend_from_slice(&header_bytes);
        out.extend(body);

        debug!(envelope_len = out.len(), "envelope sealed");
        Ok(out)
    }

    /// Decrypt an envelope produced by `seal`.
    ///
    /// # Errors
    ///
    /// Returns `CipherError::MalformedEnvelope` if the bytes do not parse and
    /// `CipherError::Authentication` if the password is wrong or any byte
    /// was modified. The two authentication cases are not distinguished.
    pub fn open(envelope: &[u8], password: &str) -> Result<Zeroizing<Vec<u8>>> {
        trace!(envelope_len = envelope.len(), "opening envelope");

        let header = Header::parse(envelope)?;
        let (header_bytes, body) = envelope.split_at(HEADER_LEN);

        let key = kdf::derive_key(password.as_bytes(), &header.salt, &header.kdf)?;
        let cipher = XChaCha20Poly1305::new(Key::from_slice(&key[..]));
        let plaintext = cipher
            .decrypt(
                XNonce::from_slice(&header.nonce),
                Payload {
                    msg: body,
                    aad: header_bytes,
                },
            )
            .map_err(|_| CipherError::Authentication)?;

        Ok(Zeroizing::new(plaintext))
    }
}

/// Check whether `bytes` start like an envelope (magic and version).
pub fn is_envelope(bytes: &[u8]) -> bool {
    bytes.len() >= HEADER_LEN + TAG_LEN && &bytes[0..4] == MAGIC && bytes[4] == VERSION
}

fn read_u32(bytes: &[u8]) -> u32 {
    let mut buf = [0u8; 4];
    buf.copy_from_slice(bytes);
    u32::from_le_bytes(buf)
}

fn malformed(reason: String) -> crate::error::Error {
    CipherError::MalformedEnvelope(reason).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn envelope() -> Envelope {
        Envelope::new(KdfParams::new(64, 1, 1))
    }

    fn is_auth_error(result: Result<Zeroizing<Vec<u8>>>) -> bool {
        matches!(result, Err(Error::Cipher(CipherError::Authentication)))
    }

    #[test]
    fn test_seal_open_roundtrip() {
        let sealed = envelope().seal(b"top secret", "hunter2").unwrap();
        let opened = Envelope::open(&sealed, "hunter2").unwrap();
        assert_eq!(opened.as_slice(), b"top secret");
    }

    #[test]
    fn test_empty_plaintext() {
        let sealed = envelope().seal(b"", "pw").unwrap();
        assert_eq!(sealed.len(), HEADER_LEN + TAG_LEN);
        assert!(Envelope::open(&sealed, "pw").unwrap().is_empty());
    }

    #[test]
    fn test_seal_is_randomized() {
        let a = envelope().seal(b"same", "pw").unwrap();
        let b = envelope().seal(b"same", "pw").unwrap();
        assert_ne!(a, b);
        assert_ne!(a[17..33], b[17..33], "salt should differ");
    }

    #[test]
    fn test_wrong_password() {
        let sealed = envelope().seal(b"data", "right").unwrap();
        assert!(is_auth_error(Envelope::open(&sealed, "wrong")));
    }

    #[test]
    fn test_every_body_byte_is_authenticated() {
        let sealed = envelope().seal(b"abc", "pw").unwrap();
        for i in HEADER_LEN..sealed.len() {
            let mut tampered = sealed.clone();
            tampered[i] ^= 0x01;
            assert!(
                is_auth_error(Envelope::open(&tampered, "pw")),
                "byte {} not authenticated",
                i
            );
        }
    }

    #[test]
    fn test_salt_and_nonce_are_authenticated() {
        let sealed = envelope().seal(b"abc", "pw").unwrap();
        for i in [17, 32, 33, HEADER_LEN - 1] {
            let mut tampered = sealed.clone();
            tampered[i] ^= 0x80;
            assert!(is_auth_error(Envelope::open(&tampered, "pw")));
        }
    }

    #[test]
    fn test_truncated_is_malformed() {
        let sealed = envelope().seal(b"abc", "pw").unwrap();
        let result = Envelope::open(&sealed[..HEADER_LEN + TAG_LEN - 1], "pw");
        assert!(matches!(
            result,
            Err(Error::Cipher(CipherError::MalformedEnvelope(_)))
        ));
    }

    #[test]
    fn test_bad_magic_and_version_are_malformed() {
        let sealed = envelope().seal(b"abc", "pw").unwrap();

        let mut bad_magic = sealed.clone();
        bad_magic[0] = b'X';
        assert!(matches!(
            Envelope::open(&bad_magic, "pw"),
            Err(Error::Cipher(CipherError::MalformedEnvelope(_)))
        ));

        let mut bad_version = sealed;
        bad_version[4] = 9;
        assert!(matches!(
            Envelope::open(&bad_version, "pw"),
            Err(Error::Cipher(CipherError::MalformedEnvelope(_)))
        ));
    }

    #[test]
    fn test_absurd_kdf_params_are_malformed() {
        let mut sealed = envelope().seal(b"abc", "pw").unwrap();
        sealed[5..9].copy_from_slice(&u32::MAX.to_le_bytes());
        assert!(matches!(
            Envelope::open(&sealed, "pw"),
            Err(Error::Cipher(CipherError::MalformedEnvelope(_)))
        ));
    }

    #[test]
    fn test_header_records_params() {
        let params = KdfParams::new(128, 2, 1);
        let sealed = Envelope::new(params).seal(b"x", "pw").unwrap();
        let header = Header::parse(&sealed).unwrap();
        assert_eq!(header.kdf, params);
    }

    #[test]
    fn test_is_envelope() {
        let sealed = envelope().seal(b"x", "pw").unwrap();
        assert!(is_envelope(&sealed));
        assert!(!is_envelope(b"plain text file"));
    }
}

//! Error types for credkeep.
//!
//! Every layer has its own error enum; all of them convert into [`Error`]
//! so callers can use `?` across module boundaries.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Cipher(#[from] CipherError),

    #[error(transparent)]
    Profile(#[from] ProfileError),

    #[error(transparent)]
    Site(#[from] SiteError),

    #[error(transparent)]
    File(#[from] FileError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("{0}")]
    Other(String),
}

/// Configuration file errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("unable to determine home directory")]
    NoHomeDir,

    #[error("failed to read config: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to write config: {0}")]
    WriteFile(#[source] std::io::Error),

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("invalid value for '{field}': {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

/// Envelope encryption errors.
///
/// `Authentication` deliberately covers both a wrong password and tampered
/// data; the two cases are never distinguished.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CipherError {
    #[error("authentication failed: wrong password or corrupted data")]
    Authentication,

    #[error("malformed envelope: {0}")]
    MalformedEnvelope(String),

    #[error("encryption failed: {0}")]
    Encryption(String),

    #[error("key derivation failed: {0}")]
    KeyDerivation(String),
}

/// Profile storage errors.
#[derive(Error, Debug)]
pub enum ProfileError {
    #[error("profile not found: {0}")]
    NotFound(String),

    #[error("profile already exists: {0}")]
    AlreadyExists(String),

    #[error("cannot open profile {0}: wrong password or corrupted file")]
    WrongPasswordOrCorrupt(String),

    #[error("profile {name} is corrupted: {reason}")]
    Corrupt { name: String, reason: String },

    #[error("failed to read profile {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to save profile {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Site registry errors.
#[derive(Error, Debug)]
pub enum SiteError {
    #[error("site already exists: {0}")]
    Exists(String),

    #[error("site not found: {0}")]
    NotFound(String),

    #[error("no field {field} in site {site}")]
    FieldNotFound { site: String, field: String },

    #[error("invalid pattern: {0}")]
    PatternCompile(#[from] regex::Error),
}

/// File encryption errors.
#[derive(Error, Debug)]
pub enum FileError {
    #[error("failed to open input file {}: {source}", path.display())]
    InputOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to create output file {}: {source}", path.display())]
    OutputCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encrypt file: {0}")]
    Encrypt(#[source] CipherError),

    #[error("failed to decrypt file: {0}")]
    Decrypt(#[source] CipherError),

    #[error("output file {} is the same as the input", .0.display())]
    InvalidOutput(PathBuf),

    #[error("failed to delete original file {}: {source}", path.display())]
    DeleteOriginal {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Input validation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("site name cannot be empty")]
    EmptySiteName,

    #[error("field name cannot be empty")]
    EmptyFieldName,

    #[error("field name {0} is reserved")]
    ReservedField(String),

    #[error("invalid profile name '{name}': {reason}")]
    InvalidProfileName { name: String, reason: String },

    #[error("password cannot be empty")]
    EmptyPassword,

    #[error("invalid field assignment '{0}': expected KEY=VALUE")]
    InvalidAssignment(String),
}

pub type Result<T> = std::result::Result<T, Error>;

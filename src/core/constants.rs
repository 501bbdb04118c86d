//! Constants used throughout credkeep.
//!
//! Centralizes magic strings and default values.

/// Data directory relative to HOME (~/.credkeep).
pub const APP_DIR: &str = ".credkeep";

/// Environment variable overriding the data directory.
pub const HOME_ENV: &str = "CREDKEEP_HOME";

/// Settings file name inside the data directory.
pub const CONFIG_FILE: &str = "config.toml";

/// Directory holding encrypted profiles, relative to the data directory.
pub const PROFILES_DIR: &str = "profiles";

/// File extension of encrypted profiles.
pub const PROFILE_EXTENSION: &str = "profile";

/// Profile used when none is given on the command line or in settings.
pub const DEFAULT_PROFILE: &str = "default";

/// Extension appended to encrypted files when no output path is given.
pub const DEFAULT_FILE_EXTENSION: &str = "enc";

/// Field holding a site's password. Flagged as sensitive on retrieval.
pub const PASSWORD_FIELD: &str = "password";

/// Reserved key carrying a site's tag list in the persisted format.
pub const TAGS_FIELD: &str = "$$_TAGS";

/// Site field recording where an encrypted file was written.
pub const FILE_PATH_FIELD: &str = "file";

/// Site field holding a base64 copy of an encrypted file.
pub const FILE_CONTENT_FIELD: &str = "content";

/// Version of the decrypted profile document.
pub const PROFILE_DOCUMENT_VERSION: u32 = 1;

/// Environment variable supplying the password of an existing profile or file.
pub const PASSWORD_ENV: &str = "CREDKEEP_PASSWORD";

/// Environment variable supplying a new password.
pub const NEW_PASSWORD_ENV: &str = "CREDKEEP_NEW_PASSWORD";

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "CREDKEEP_LOG";

/// Environment variable selecting the log format (`json` or text).
pub const LOG_FORMAT_ENV: &str = "CREDKEEP_LOG_FORMAT";

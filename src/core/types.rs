//! Type aliases for domain concepts.
//!
//! Provides semantic type aliases to make function signatures more descriptive.

/// A site name, unique (case-sensitive) within a profile.
pub type SiteName = String;

/// A field name inside a site (e.g., username, password, url).
pub type FieldName = String;

/// A plaintext field value.
pub type FieldValue = String;

/// A free-form label attached to a site.
pub type Tag = String;

/// A profile name. Doubles as the profile's file stem on disk.
pub type ProfileName = String;

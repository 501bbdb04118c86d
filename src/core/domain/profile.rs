//! Profile type.
//!
//! A named collection of sites. Site names are unique and case-sensitive.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::Site;
use crate::core::constants::PROFILE_DOCUMENT_VERSION;
use crate::core::types::{ProfileName, SiteName};
use crate::error::{Result, ValidationError};

/// A decrypted profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    name: ProfileName,
    sites: BTreeMap<SiteName, Site>,
}

/// Plaintext layout sealed inside a profile envelope.
#[derive(Debug, Serialize, Deserialize)]
struct Document {
    version: u32,
    #[serde(default)]
    sites: BTreeMap<SiteName, Site>,
}

impl Profile {
    /// Create an empty profile.
    pub fn new(name: impl Into<ProfileName>) -> Self {
        Self {
            name: name.into(),
            sites: BTreeMap::new(),
        }
    }

    /// Profile name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Look up a site.
    pub fn site(&self, name: &str) -> Option<&Site> {
        self.sites.get(name)
    }

    /// Look up a site for mutation.
    pub fn site_mut(&mut self, name: &str) -> Option<&mut Site> {
        self.sites.get_mut(name)
    }

    /// Whether a site exists.
    pub fn contains(&self, name: &str) -> bool {
        self.sites.contains_key(name)
    }

    /// Sites ordered by name.
    pub fn sites(&self) -> impl Iterator<Item = (&str, &Site)> {
        self.sites.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of sites.
    pub fn len(&self) -> usize {
        self.sites.len()
    }

    /// Whether the profile has no sites.
    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }

    pub(crate) fn insert(&mut self, name: SiteName, site: Site) {
        self.sites.insert(name, site);
    }

    pub(crate) fn remove(&mut self, name: &str) -> Option<Site> {
        self.sites.remove(name)
    }

    /// Serialize the site map to the plaintext profile document.
    pub fn to_document(&self) -> Result<Vec<u8>> {
        let doc = Document {
            version: PROFILE_DOCUMENT_VERSION,
            sites: self.sites.clone(),
        };
        Ok(serde_json::to_vec(&doc)?)
    }

    /// Rebuild a profile from a plaintext document.
    ///
    /// Returns a reason string on failure; the store wraps it with the
    /// profile name.
    pub fn from_document(
        name: impl Into<ProfileName>,
        bytes: &[u8],
    ) -> std::result::Result<Self, String> {
        let doc: Document = serde_json::from_slice(bytes).map_err(|e| e.to_string())?;
        if doc.version != PROFILE_DOCUMENT_VERSION {
            return Err(format!("unsupported document version {}", doc.version));
        }
        if doc.sites.contains_key("") {
            return Err("empty site name".to_string());
        }
        Ok(Self {
            name: name.into(),
            sites: doc.sites,
        })
    }
}

/// Validate a site name.
///
/// # Errors
///
/// Returns `ValidationError::EmptySiteName` for an empty name.
pub fn validate_site_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(ValidationError::EmptySiteName.into());
    }
    Ok(())
}

/// Validate a profile name.
///
/// Profile names become file names, so they are limited to
/// `[A-Za-z0-9_.-]` and may not start with a dot.
///
/// # Errors
///
/// Returns `ValidationError::InvalidProfileName` describing the problem.
pub fn validate_profile_name(name: &str) -> Result<()> {
    let invalid = |reason: &str| -> crate::error::Error {
        ValidationError::InvalidProfileName {
            name: name.to_string(),
            reason: reason.to_string(),
        }
        .into()
    };

    if name.is_empty() {
        return Err(invalid("cannot be empty"));
    }
    if name.starts_with('.') {
        return Err(invalid("cannot start with a dot"));
    }
    if let Some(ch) = name
        .chars()
        .find(|c| !c.is_ascii_alphanumeric() && !matches!(c, '_' | '-' | '.'))
    {
        return Err(invalid(&format!(
            "invalid character '{}'. Only A-Z, a-z, 0-9, '_', '-' and '.' are allowed",
            ch
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::constants::TAGS_FIELD;

    fn sample() -> Profile {
        let mut profile = Profile::new("personal");
        let mut site = Site::new();
        site.set_field("username", "alice").unwrap();
        site.merge_tags(&["mail"]);
        profile.insert("mail.example.com".to_string(), site);
        profile
    }

    #[test]
    fn test_document_roundtrip() {
        let profile = sample();
        let bytes = profile.to_document().unwrap();
        let back = Profile::from_document("personal", &bytes).unwrap();
        assert_eq!(back, profile);
    }

    #[test]
    fn test_document_layout() {
        let bytes = sample().to_document().unwrap();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(value["version"], 1);
        assert_eq!(value["sites"]["mail.example.com"]["username"], "alice");
        assert_eq!(value["sites"]["mail.example.com"][TAGS_FIELD], r#"["mail"]"#);
    }

    #[test]
    fn test_from_document_rejects_garbage() {
        assert!(Profile::from_document("p", b"not json").is_err());
        assert!(Profile::from_document("p", br#"{"version":99,"sites":{}}"#).is_err());
        assert!(Profile::from_document("p", br#"{"version":1,"sites":{"":{}}}"#).is_err());
    }

    #[test]
    fn test_site_names_are_case_sensitive() {
        let mut profile = Profile::new("p");
        profile.insert("Example".to_string(), Site::new());
        assert!(profile.contains("Example"));
        assert!(!profile.contains("example"));
    }

    #[test]
    fn test_validate_profile_name() {
        assert!(validate_profile_name("default").is_ok());
        assert!(validate_profile_name("work-2.old_x").is_ok());
        assert!(validate_profile_name("").is_err());
        assert!(validate_profile_name(".hidden").is_err());
        assert!(validate_profile_name("../escape").is_err());
        assert!(validate_profile_name("a/b").is_err());
        assert!(validate_profile_name("with space").is_err());
    }

    #[test]
    fn test_validate_site_name() {
        assert!(validate_site_name("github.com").is_ok());
        assert!(validate_site_name("").is_err());
    }
}

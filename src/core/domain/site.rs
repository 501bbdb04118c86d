//! Site type.
//!
//! A site is a set of named fields plus an ordered tag list. In memory the
//! tags live in their own member; the persisted form is a flat string map
//! that carries the tags as a JSON array under [`TAGS_FIELD`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::constants::{PASSWORD_FIELD, TAGS_FIELD};
use crate::core::types::{FieldName, FieldValue, Tag};
use crate::error::{Result, ValidationError};

/// A credential record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<String, String>",
    into = "BTreeMap<String, String>"
)]
pub struct Site {
    fields: BTreeMap<FieldName, FieldValue>,
    tags: Vec<Tag>,
}

impl Site {
    /// Create an empty site.
    pub fn new() -> Self {
        Self::default()
    }

    /// Value of a field, if present.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// All regular fields, ordered by name.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of regular fields.
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// The password field, if set.
    pub fn password(&self) -> Option<&str> {
        self.field(PASSWORD_FIELD)
    }

    /// Set a field, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if the name is empty or reserved.
    pub fn set_field(&mut self, name: &str, value: &str) -> Result<()> {
        validate_field_name(name)?;
        self.fields.insert(name.to_string(), value.to_string());
        Ok(())
    }

    /// Remove a field. Absent fields are ignored.
    pub fn remove_field(&mut self, name: &str) -> Option<FieldValue> {
        self.fields.remove(name)
    }

    /// Tags in their stored order.
    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    /// Merge new tags into the tag list.
    ///
    /// The result is `tags` (first occurrence of each kept) followed by
    /// every existing tag not already present, so `[a, b]` merged with
    /// `[b, c]` gives `[b, c, a]`. An empty `tags` leaves the list alone.
    pub fn merge_tags<S: AsRef<str>>(&mut self, tags: &[S]) {
        if tags.is_empty() {
            return;
        }

        let mut merged: Vec<Tag> = Vec::with_capacity(tags.len() + self.tags.len());
        for tag in tags.iter().map(AsRef::as_ref) {
            if !merged.iter().any(|t| t == tag) {
                merged.push(tag.to_string());
            }
        }
        for tag in self.tags.drain(..) {
            if !merged.contains(&tag) {
                merged.push(tag);
            }
        }
        self.tags = merged;
    }

    /// Remove tags. Tags that are not present are ignored.
    pub fn remove_tags<S: AsRef<str>>(&mut self, tags: &[S]) {
        self.tags
            .retain(|t| !tags.iter().any(|removed| removed.as_ref() == t));
    }

    /// Whether the site carries `tag`.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Tags of this site that appear in `wanted`, in site order.
    pub fn matching_tags<S: AsRef<str>>(&self, wanted: &[S]) -> Vec<&str> {
        self.tags
            .iter()
            .filter(|t| wanted.iter().any(|w| w.as_ref() == t.as_str()))
            .map(String::as_str)
            .collect()
    }
}

/// Validate a regular field name.
///
/// # Errors
///
/// Returns `ValidationError::EmptyFieldName` or
/// `ValidationError::ReservedField`.
pub fn validate_field_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(ValidationError::EmptyFieldName.into());
    }
    if name == TAGS_FIELD {
        return Err(ValidationError::ReservedField(name.to_string()).into());
    }
    Ok(())
}

impl TryFrom<BTreeMap<String, String>> for Site {
    type Error = String;

    fn try_from(mut map: BTreeMap<String, String>) -> std::result::Result<Self, Self::Error> {
        let tags = match map.remove(TAGS_FIELD) {
            Some(raw) => serde_json::from_str::<Vec<Tag>>(&raw)
                .map_err(|e| format!("invalid tag list: {}", e))?,
            None => Vec::new(),
        };
        if map.contains_key("") {
            return Err("empty field name".to_string());
        }

        let mut site = Site { fields: map, tags: Vec::new() };
        site.merge_tags(&tags);
        Ok(site)
    }
}

impl From<Site> for BTreeMap<String, String> {
    fn from(site: Site) -> Self {
        let mut map = site.fields;
        if !site.tags.is_empty() {
            // A Vec<String> always serializes.
            if let Ok(raw) = serde_json::to_string(&site.tags) {
                map.insert(TAGS_FIELD.to_string(), raw);
            }
        }
        map
    }
}

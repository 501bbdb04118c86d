//! Request values for registry operations.
//!
//! Each operation takes its options as one of these structs instead of
//! reading them from shared state.

use crate::core::types::{FieldName, FieldValue, SiteName, Tag};

/// Options for [`super::Registry::add`].
#[derive(Debug, Clone, Default)]
pub struct AddSite {
    pub name: SiteName,
    /// Stored in the `password` field when present and non-empty.
    pub password: Option<String>,
    /// Applied in order, so a later duplicate wins.
    pub fields: Vec<(FieldName, FieldValue)>,
    pub tags: Vec<Tag>,
}

impl AddSite {
    pub fn new(name: impl Into<SiteName>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    pub fn field(mut self, name: impl Into<FieldName>, value: impl Into<FieldValue>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    pub fn tag(mut self, tag: impl Into<Tag>) -> Self {
        self.tags.push(tag.into());
        self
    }
}

/// Changes applied by [`super::Registry::set`].
///
/// Applied in this order: delete fields, set password, set fields, delete
/// tags, add tags.
#[derive(Debug, Clone, Default)]
pub struct SiteUpdate {
    pub password: Option<String>,
    pub set_fields: Vec<(FieldName, FieldValue)>,
    pub delete_fields: Vec<FieldName>,
    pub add_tags: Vec<Tag>,
    pub delete_tags: Vec<Tag>,
}

impl SiteUpdate {
    /// Whether the update would change nothing.
    pub fn is_empty(&self) -> bool {
        self.password.as_deref().map_or(true, str::is_empty)
            && self.set_fields.is_empty()
            && self.delete_fields.is_empty()
            && self.add_tags.is_empty()
            && self.delete_tags.is_empty()
    }
}

/// How a list pattern is matched against site names.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PatternMode {
    /// Substring first, regex as a fallback.
    #[default]
    Auto,
    /// Regex only.
    Regex,
    /// Substring only.
    Literal,
}

/// Options for [`super::Registry::list`].
#[derive(Debug, Clone, Default)]
pub struct ListQuery {
    /// Empty matches every site.
    pub pattern: String,
    /// When non-empty, only sites carrying at least one of these are listed.
    pub tags: Vec<Tag>,
    pub mode: PatternMode,
}

impl ListQuery {
    pub fn pattern(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            ..Self::default()
        }
    }
}

/// Options for [`super::Registry::get`].
#[derive(Debug, Clone, Default)]
pub struct FieldQuery {
    /// Fields to return, in order. Empty selects every field.
    pub fields: Vec<FieldName>,
    /// Include the site's tags.
    pub tags: bool,
    /// Return a single value for the clipboard instead of a view.
    pub copy: bool,
}

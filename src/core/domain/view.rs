//! Read-only views returned by registry queries.

use serde::Serialize;
use zeroize::Zeroizing;

use crate::core::types::{FieldName, SiteName, Tag};

/// A listed site with its name split around the matched span.
///
/// `prefix + matched + suffix` always equals `name`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchResult {
    pub name: SiteName,
    pub prefix: String,
    pub matched: String,
    pub suffix: String,
    pub tags: Vec<Tag>,
}

impl MatchResult {
    /// Split `name` at the byte range `start..end`.
    ///
    /// The range must lie on character boundaries, which both substring and
    /// regex searches guarantee.
    pub fn new(name: &str, start: usize, end: usize, tags: &[Tag]) -> Self {
        Self {
            name: name.to_string(),
            prefix: name[..start].to_string(),
            matched: name[start..end].to_string(),
            suffix: name[end..].to_string(),
            tags: tags.to_vec(),
        }
    }

    /// A result whose match covers the whole name.
    pub fn whole(name: &str, tags: &[Tag]) -> Self {
        Self::new(name, 0, name.len(), tags)
    }

    /// Whether the match is the entire name.
    pub fn is_whole(&self) -> bool {
        self.prefix.is_empty() && self.suffix.is_empty()
    }
}

/// A single field handed to the caller for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldView {
    pub name: FieldName,
    pub value: String,
    /// Set for the password field. Callers redact sensitive values when
    /// displaying them.
    pub sensitive: bool,
}

/// Fields (and optionally tags) selected from a site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SiteView {
    pub site: SiteName,
    pub fields: Vec<FieldView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<Tag>>,
}

impl SiteView {
    /// Look up a selected field by name.
    pub fn field(&self, name: &str) -> Option<&FieldView> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// Outcome of a `get` request.
#[derive(Debug)]
pub enum Retrieval {
    /// Fields to display.
    Fields(SiteView),
    /// A single value to hand to the clipboard, never to be printed.
    Clipboard {
        field: FieldName,
        value: Zeroizing<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_result_split() {
        let m = MatchResult::new("site1.com", 0, 4, &[]);
        assert_eq!(m.prefix, "");
        assert_eq!(m.matched, "site");
        assert_eq!(m.suffix, "1.com");
        assert_eq!(format!("{}{}{}", m.prefix, m.matched, m.suffix), m.name);
        assert!(!m.is_whole());
    }

    #[test]
    fn test_match_result_whole() {
        let m = MatchResult::whole("other.net", &["x".to_string()]);
        assert!(m.is_whole());
        assert_eq!(m.matched, "other.net");
        assert_eq!(m.tags, vec!["x".to_string()]);
    }

    #[test]
    fn test_match_result_multibyte() {
        let name = "café.fr";
        let start = name.find("é").unwrap();
        let m = MatchResult::new(name, start, start + "é".len(), &[]);
        assert_eq!(m.prefix, "caf");
        assert_eq!(m.matched, "é");
        assert_eq!(m.suffix, ".fr");
    }
}

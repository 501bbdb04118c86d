//! Site name matching for `list`.

use regex::Regex;

use crate::core::registry::PatternMode;
use crate::error::SiteError;

/// Matches site names against a list pattern.
///
/// In `Auto` mode the regex is compiled on the first name that has no
/// substring match, and at most once.
pub(super) struct Matcher<'a> {
    pattern: &'a str,
    mode: PatternMode,
    regex: Option<Regex>,
}

impl<'a> Matcher<'a> {
    /// Build a matcher. `Regex` mode compiles immediately.
    pub fn new(pattern: &'a str, mode: PatternMode) -> Result<Self, SiteError> {
        let regex = match mode {
            PatternMode::Regex if !pattern.is_empty() => Some(Regex::new(pattern)?),
            _ => None,
        };
        Ok(Self {
            pattern,
            mode,
            regex,
        })
    }

    /// Byte range of the match in `name`, if any.
    pub fn find(&mut self, name: &str) -> Result<Option<(usize, usize)>, SiteError> {
        if self.pattern.is_empty() {
            return Ok(Some((0, name.len())));
        }

        if self.mode != PatternMode::Regex {
            if let Some(start) = name.find(self.pattern) {
                return Ok(Some((start, start + self.pattern.len())));
            }
            if self.mode == PatternMode::Literal {
                return Ok(None);
            }
        }

        if self.regex.is_none() {
            self.regex = Some(Regex::new(self.pattern)?);
        }
        Ok(self
            .regex
            .as_ref()
            .and_then(|regex| regex.find(name))
            .map(|m| (m.start(), m.end())))
    }
}

//! HTML tag removal with an optional keep-list.

use regex::{Captures, Regex};

use super::patterns::HTML_TAG_RE;
use crate::error::Result;

/// Removes HTML tags, except those whose name starts with a kept name.
///
/// Kept names are joined into a case-insensitive alternation and compiled
/// as-is, so a name containing pattern syntax such as `(` fails to compile.
/// Both `<sup>` and `</sup>` are kept for the name `sup`.
#[derive(Debug, Clone)]
pub(crate) struct HtmlTagFilter {
    keep: Option<Regex>,
}

impl HtmlTagFilter {
    /// Build a filter keeping the given tag names.
    pub fn new(keep: &[String]) -> Result<Self> {
        if keep.is_empty() {
            return Ok(Self { keep: None });
        }

        let pattern = format!("(?i)^/?(?:{})", keep.join("|"));
        let keep = Regex::new(&pattern)?;
        log::debug!("HtmlTagFilter: keeping tags matching {}", pattern);

        Ok(Self { keep: Some(keep) })
    }

    /// Remove every tag not on the keep-list.
    pub fn strip(&self, text: &str) -> String {
        match &self.keep {
            None => HTML_TAG_RE.replace_all(text, "").into_owned(),
            Some(keep) => HTML_TAG_RE
                .replace_all(text, |caps: &Captures| {
                    if keep.is_match(&caps[1]) {
                        caps[0].to_string()
                    } else {
                        String::new()
                    }
                })
                .into_owned(),
        }
    }
}

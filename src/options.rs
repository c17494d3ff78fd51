//! Conversion options and per-field default merging.

use std::path::Path;

use serde::Deserialize;

use crate::error::Result;

/// Options controlling how Markdown is flattened to plain text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionOptions {
    /// Collapse every whitespace run (newlines included) to a single space
    pub one_line: bool,

    /// Replacement for list markers; `None` deletes them
    pub list_unicode_char: Option<String>,

    /// Remove leading list markers (`*`, `-`, `+`, `1.`)
    pub strip_list_leaders: bool,

    /// Enable GitHub-flavored Markdown stages
    pub gfm: bool,

    /// Replace images with their alt text instead of removing them
    pub use_img_alt_text: bool,

    /// Remove abbreviation definitions (`*[HTML]: Hyper Text Markup Language`)
    pub abbr: bool,

    /// Replace inline links with their URL instead of their text
    pub replace_links_with_url: bool,

    /// HTML tag names that are kept verbatim
    pub html_tags_to_skip: Vec<String>,

    /// Maximum output length in characters, ellipsis included
    pub max_length: Option<usize>,

    /// Strip whitespace and invisible characters from both ends
    pub trim: bool,
}

impl ConversionOptions {
    /// Create new conversion options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable whitespace collapsing.
    pub fn with_one_line(mut self, one_line: bool) -> Self {
        self.one_line = one_line;
        self
    }

    /// Replace list markers with the given character.
    pub fn with_list_unicode_char(mut self, marker: impl Into<String>) -> Self {
        self.list_unicode_char = Some(marker.into());
        self
    }

    /// Enable or disable list marker stripping.
    pub fn with_strip_list_leaders(mut self, strip: bool) -> Self {
        self.strip_list_leaders = strip;
        self
    }

    /// Enable or disable GitHub-flavored Markdown stages.
    pub fn with_gfm(mut self, gfm: bool) -> Self {
        self.gfm = gfm;
        self
    }

    /// Keep image alt text.
    pub fn with_img_alt_text(mut self, use_alt: bool) -> Self {
        self.use_img_alt_text = use_alt;
        self
    }

    /// Enable or disable abbreviation stripping.
    pub fn with_abbr(mut self, abbr: bool) -> Self {
        self.abbr = abbr;
        self
    }

    /// Replace links with their URL.
    pub fn with_links_as_url(mut self, replace: bool) -> Self {
        self.replace_links_with_url = replace;
        self
    }

    /// Set HTML tags to keep.
    pub fn with_html_tags_to_skip<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.html_tags_to_skip = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Set maximum output length.
    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = Some(max_length);
        self
    }

    /// Enable or disable edge trimming.
    pub fn with_trim(mut self, trim: bool) -> Self {
        self.trim = trim;
        self
    }

    /// Active list marker replacement, if any.
    ///
    /// An empty string counts as disabled.
    pub(crate) fn list_marker(&self) -> Option<&str> {
        self.list_unicode_char.as_deref().filter(|c| !c.is_empty())
    }
}

impl Default for ConversionOptions {
    fn default() -> Self {
        Self {
            one_line: true,
            list_unicode_char: None,
            strip_list_leaders: true,
            gfm: true,
            use_img_alt_text: true,
            abbr: false,
            replace_links_with_url: false,
            html_tags_to_skip: Vec::new(),
            max_length: None,
            trim: false,
        }
    }
}

/// List marker setting as it appears in option files: a string or `false`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawListMarker")]
pub enum ListMarker {
    /// Replace markers with this string
    Char(String),
    /// Delete markers
    Disabled,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawListMarker {
    Char(String),
    Flag(bool),
}

impl TryFrom<RawListMarker> for ListMarker {
    type Error = String;

    fn try_from(raw: RawListMarker) -> std::result::Result<Self, Self::Error> {
        match raw {
            RawListMarker::Char(c) if c.is_empty() => Ok(ListMarker::Disabled),
            RawListMarker::Char(c) => Ok(ListMarker::Char(c)),
            RawListMarker::Flag(false) => Ok(ListMarker::Disabled),
            RawListMarker::Flag(true) => {
                Err("listUnicodeChar must be a string or false".to_string())
            }
        }
    }
}

/// A partial set of options. Unset fields fall back to the defaults.
///
/// # Example
///
/// ```
/// use unmd::OptionOverrides;
///
/// let overrides = OptionOverrides::from_json(r#"{"oneLine": false}"#).unwrap();
/// let options = overrides.resolve();
/// assert!(!options.one_line);
/// assert!(options.gfm);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct OptionOverrides {
    pub one_line: Option<bool>,
    pub list_unicode_char: Option<ListMarker>,
    pub strip_list_leaders: Option<bool>,
    pub gfm: Option<bool>,
    pub use_img_alt_text: Option<bool>,
    pub abbr: Option<bool>,
    #[serde(rename = "replaceLinksWithURL", alias = "replaceLinksWithUrl")]
    pub replace_links_with_url: Option<bool>,
    pub html_tags_to_skip: Option<Vec<String>>,
    pub max_length: Option<usize>,
    pub trim: Option<bool>,
}

impl OptionOverrides {
    /// Parse overrides from a JSON object.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load overrides from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Layer `other` on top of `self`; fields set in `other` win.
    pub fn merge(self, other: OptionOverrides) -> Self {
        Self {
            one_line: other.one_line.or(self.one_line),
            list_unicode_char: other.list_unicode_char.or(self.list_unicode_char),
            strip_list_leaders: other.strip_list_leaders.or(self.strip_list_leaders),
            gfm: other.gfm.or(self.gfm),
            use_img_alt_text: other.use_img_alt_text.or(self.use_img_alt_text),
            abbr: other.abbr.or(self.abbr),
            replace_links_with_url: other
                .replace_links_with_url
                .or(self.replace_links_with_url),
            html_tags_to_skip: other.html_tags_to_skip.or(self.html_tags_to_skip),
            max_length: other.max_length.or(self.max_length),
            trim: other.trim.or(self.trim),
        }
    }

    /// Merge with the defaults, field by field.
    pub fn resolve(self) -> ConversionOptions {
        let defaults = ConversionOptions::default();
        let list_unicode_char = match self.list_unicode_char {
            Some(ListMarker::Char(c)) => Some(c),
            Some(ListMarker::Disabled) => None,
            None => defaults.list_unicode_char,
        };

        ConversionOptions {
            one_line: self.one_line.unwrap_or(defaults.one_line),
            list_unicode_char,
            strip_list_leaders: self
                .strip_list_leaders
                .unwrap_or(defaults.strip_list_leaders),
            gfm: self.gfm.unwrap_or(defaults.gfm),
            use_img_alt_text: self.use_img_alt_text.unwrap_or(defaults.use_img_alt_text),
            abbr: self.abbr.unwrap_or(defaults.abbr),
            replace_links_with_url: self
                .replace_links_with_url
                .unwrap_or(defaults.replace_links_with_url),
            html_tags_to_skip: self
                .html_tags_to_skip
                .unwrap_or(defaults.html_tags_to_skip),
            max_length: self.max_length.or(defaults.max_length),
            trim: self.trim.unwrap_or(defaults.trim),
        }
    }
}

impl From<OptionOverrides> for ConversionOptions {
    fn from(overrides: OptionOverrides) -> Self {
        overrides.resolve()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_defaults() {
        let options = ConversionOptions::default();
        assert!(options.one_line);
        assert!(options.strip_list_leaders);
        assert!(options.gfm);
        assert!(options.use_img_alt_text);
        assert!(!options.abbr);
        assert!(!options.replace_links_with_url);
        assert!(!options.trim);
        assert_eq!(options.list_unicode_char, None);
        assert!(options.html_tags_to_skip.is_empty());
        assert_eq!(options.max_length, None);
    }

    #[test]
    fn test_builder() {
        let options = ConversionOptions::new()
            .with_one_line(false)
            .with_list_unicode_char("•")
            .with_html_tags_to_skip(["sup", "sub"])
            .with_max_length(80)
            .with_trim(true);

        assert!(!options.one_line);
        assert_eq!(options.list_marker(), Some("•"));
        assert_eq!(options.html_tags_to_skip, vec!["sup", "sub"]);
        assert_eq!(options.max_length, Some(80));
        assert!(options.trim);
    }

    #[test]
    fn test_empty_list_char_is_disabled() {
        let options = ConversionOptions::new().with_list_unicode_char("");
        assert_eq!(options.list_marker(), None);
    }

    #[test]
    fn test_partial_overrides_keep_defaults() {
        let options = OptionOverrides::from_json(r#"{"oneLine": false, "abbr": true}"#)
            .unwrap()
            .resolve();

        assert!(!options.one_line);
        assert!(options.abbr);
        assert!(options.gfm);
        assert!(options.strip_list_leaders);
        assert!(options.use_img_alt_text);
    }

    #[test]
    fn test_overrides_all_keys() {
        let json = r#"{
            "oneLine": false,
            "listUnicodeChar": "-",
            "stripListLeaders": false,
            "gfm": false,
            "useImgAltText": false,
            "abbr": true,
            "replaceLinksWithURL": true,
            "htmlTagsToSkip": ["sup"],
            "maxLength": 20,
            "trim": true
        }"#;
        let options = OptionOverrides::from_json(json).unwrap().resolve();

        assert_eq!(options.list_unicode_char.as_deref(), Some("-"));
        assert!(!options.strip_list_leaders);
        assert!(!options.gfm);
        assert!(!options.use_img_alt_text);
        assert!(options.replace_links_with_url);
        assert_eq!(options.html_tags_to_skip, vec!["sup"]);
        assert_eq!(options.max_length, Some(20));
        assert!(options.trim);
    }

    #[test]
    fn test_list_char_false_disables() {
        let options = OptionOverrides::from_json(r#"{"listUnicodeChar": false}"#)
            .unwrap()
            .resolve();
        assert_eq!(options.list_unicode_char, None);
    }

    #[test]
    fn test_list_char_true_rejected() {
        let result = OptionOverrides::from_json(r#"{"listUnicodeChar": true}"#);
        assert!(matches!(result, Err(Error::Options(_))));
    }

    #[test]
    fn test_unknown_key_rejected() {
        let result = OptionOverrides::from_json(r#"{"oneline": true}"#);
        assert!(matches!(result, Err(Error::Options(_))));
    }

    #[test]
    fn test_null_max_length_is_unset() {
        let options = OptionOverrides::from_json(r#"{"maxLength": null}"#)
            .unwrap()
            .resolve();
        assert_eq!(options.max_length, None);
    }

    #[test]
    fn test_merge_prefers_later() {
        let base = OptionOverrides {
            one_line: Some(false),
            gfm: Some(false),
            ..Default::default()
        };
        let top = OptionOverrides {
            one_line: Some(true),
            ..Default::default()
        };
        let merged = base.merge(top);
        assert_eq!(merged.one_line, Some(true));
        assert_eq!(merged.gfm, Some(false));
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("options.json");
        std::fs::write(&path, r#"{"trim": true, "maxLength": 5}"#).unwrap();

        let options = OptionOverrides::from_file(&path).unwrap().resolve();
        assert!(options.trim);
        assert_eq!(options.max_length, Some(5));
    }

    #[test]
    fn test_from_missing_file() {
        let result = OptionOverrides::from_file("/nonexistent/options.json");
        assert!(matches!(result, Err(Error::Io(_))));
    }
}

//! Unicode-aware trimming.
//!
//! [`str::trim`] only strips `White_Space`. Markdown sources often carry
//! invisible padding that renders blank but is not whitespace: format
//! controls, private-use characters, Hangul fillers, the Braille blank.
//! These helpers strip all of it.

use regex::Regex;
use std::sync::LazyLock;

/// Whitespace, general category `C*`, and blank-rendering letters/marks.
static TRIM_CHAR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[\s\p{C}\x{034F}\x{115F}\x{1160}\x{17B4}\x{17B5}\x{180E}\x{2800}\x{3164}\x{FFA0}]$",
    )
    .unwrap()
});

/// Check whether a character belongs to the trim class.
pub fn is_trim_char(c: char) -> bool {
    let mut buf = [0u8; 4];
    TRIM_CHAR_RE.is_match(c.encode_utf8(&mut buf))
}

/// Strip trim-class characters from the start of `s`.
///
/// # Example
///
/// ```
/// assert_eq!(unmd::trim_start("\u{3164}\u{200B} hi "), "hi ");
/// ```
pub fn trim_start(s: &str) -> &str {
    s.trim_start_matches(is_trim_char)
}

/// Strip trim-class characters from the end of `s`.
pub fn trim_end(s: &str) -> &str {
    s.trim_end_matches(is_trim_char)
}

/// Strip trim-class characters from both ends of `s`.
pub fn trim(s: &str) -> &str {
    trim_end(trim_start(s))
}

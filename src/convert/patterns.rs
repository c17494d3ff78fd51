//! Cached regex patterns for the rewrite stages.
//!
//! Compiled once on first use and shared by every conversion.

use regex::Regex;
use std::sync::LazyLock;

// === Structure ===

/// Whole lines made of 3+ of one marker (`-`, `*` or `_`), spaces allowed
/// between them, with the line ending
pub static HORIZONTAL_RULE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?mR)^(?:(?:-[ \t]*){3,}|(?:\*[ \t]*){3,}|(?:_[ \t]*){3,})(?:\r?\n|$)",
    )
    .unwrap()
});

/// Leading list markers: indentation, `*`/`-`/`+`/`1.`, required space
pub static LIST_LEADER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?mR)^([\s\t]*)([*\-+]|\d+\.)\s+").unwrap());

/// Abbreviation definition line: `*[HTML]: Hyper Text Markup Language`
pub static ABBREVIATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\[.*\]:.*\n").unwrap());

/// Any HTML tag; the body between the brackets is captured
pub static HTML_TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<([^>]*)>").unwrap());

// === GitHub-flavored Markdown ===

pub static GFM_HEADER_RULE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n={2,}").unwrap());

pub static GFM_TILDE_FENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"~{3}.*\n").unwrap());

pub static GFM_STRIKETHROUGH_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"~~").unwrap());

pub static GFM_BACKTICK_FENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"`{3}.*\n").unwrap());

// === Inline rewrites ===

/// Setext underline spanning the whole text
pub static SETEXT_RULE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[=-]{2,}\s*$").unwrap());

/// Footnote reference `[^1]`, optionally followed by `: text` to the end
pub static FOOTNOTE_REF_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\^.+?\](: .*?$)?").unwrap());

/// Trailing `[ref]: target` definition
pub static FOOTNOTE_DEF_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s{0,2}\[.*?\]: .*?$").unwrap());

/// `![alt](src)` or `![alt][ref]`
pub static IMAGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[(.*?)\][\[(].*?[\])]").unwrap());

/// `[text](url)` or `[text][ref]`
pub static LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]*?)\][\[(](.*?)[\])]").unwrap());

/// `>` quote markers, keeping a leading newline
pub static BLOCKQUOTE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?mR)^(\n)?\s{0,3}>\s?").unwrap());

/// Standalone `[label]: url "title"` definition
pub static REFERENCE_LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^\s{1,2}\[(.*?)\]: (\S+)( ".*?")?\s*$"#).unwrap());

/// `# Title`, `## Title ##`; the title lands in group 3 or 6
pub static ATX_HEADER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?mR)^(\n)?\s{0,}#{1,6}\s*( (.+))? +#+$|^(\n)?\s{0,}#{1,6}\s*( (.+))?$",
    )
    .unwrap()
});

pub static INLINE_CODE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"`(.+?)`").unwrap());

pub static STRIKETHROUGH_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"~(.*?)~").unwrap());

// === Post-processing ===

pub static WHITESPACE_RUN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

//! Markdown to plain text conversion.
//!
//! The converter applies a fixed sequence of textual rewrites to the input.
//! It never fails from the caller's point of view: if the rewrite stages
//! cannot be prepared, the failure is reported to a [`DiagnosticSink`] and
//! the original input is returned untouched.
//!
//! # Example
//!
//! ```
//! use unmd::{convert, ConversionOptions};
//!
//! let text = convert("# Title\n\nSome *emphasis* and a [link](http://x).", &ConversionOptions::default());
//! assert_eq!(text, "Title Some emphasis and a link.");
//! ```

mod delimited;
mod html;
mod patterns;
mod stages;

use rayon::prelude::*;

use crate::error::{Error, Result};
use crate::options::ConversionOptions;
use crate::trim::{trim_end, trim_start};
use html::HtmlTagFilter;
use stages::{collapse_whitespace, remove_horizontal_rules, StageContext, REWRITE_STAGES};

/// Appended to truncated output.
pub const ELLIPSIS: &str = "...";

/// Receives conversion failures.
///
/// Reporting is best-effort and must not panic.
pub trait DiagnosticSink: Send + Sync {
    /// Report a failed conversion.
    fn error(&self, err: &Error);
}

/// Reports failures through the `log` facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn error(&self, err: &Error) {
        log::error!("Markdown conversion failed, returning input unchanged: {}", err);
    }
}

/// Discards failures.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn error(&self, _err: &Error) {}
}

/// A converter with its options validated and patterns compiled.
///
/// Build once and reuse; a `Converter` is `Send + Sync`.
///
/// # Example
///
/// ```
/// use unmd::{ConversionOptions, Converter};
///
/// let converter = Converter::new(ConversionOptions::new().with_html_tags_to_skip(["sup"]))?;
/// assert_eq!(converter.convert("x<sup>2</sup> <b>y</b>"), "x<sup>2</sup> y");
/// # Ok::<(), unmd::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Converter {
    options: ConversionOptions,
    html: HtmlTagFilter,
}

impl Converter {
    /// Create a converter.
    ///
    /// Fails with [`Error::Pattern`] when a name in
    /// [`html_tags_to_skip`](ConversionOptions::html_tags_to_skip) does not
    /// compile as a pattern.
    pub fn new(options: ConversionOptions) -> Result<Self> {
        let html = HtmlTagFilter::new(&options.html_tags_to_skip)?;
        Ok(Self { options, html })
    }

    /// Get the options.
    pub fn options(&self) -> &ConversionOptions {
        &self.options
    }

    /// Convert Markdown to plain text.
    pub fn convert(&self, markdown: &str) -> String {
        let mut output = remove_horizontal_rules(markdown);

        let ctx = StageContext {
            options: &self.options,
            html: &self.html,
        };
        let tracing = log::log_enabled!(log::Level::Trace);
        for stage in REWRITE_STAGES {
            if let Some(next) = (stage.apply)(&output, &ctx) {
                if tracing && next != output {
                    log::trace!(
                        "stage '{}' rewrote {} -> {} bytes",
                        stage.name,
                        output.len(),
                        next.len()
                    );
                }
                output = next;
            }
        }

        if self.options.one_line {
            output = collapse_whitespace(&output);
        }

        if let Some(max_length) = self.options.max_length {
            output = truncate(output, max_length);
        }

        if self.options.trim {
            output = trim_end(trim_start(&output)).to_string();
        }

        output
    }
}

/// Cut `text` to `max_length` characters, ending with [`ELLIPSIS`].
///
/// Text already within the limit is returned as-is. A limit shorter than
/// the ellipsis yields the bare ellipsis.
fn truncate(text: String, max_length: usize) -> String {
    if text.chars().count() <= max_length {
        return text;
    }

    let keep = max_length.saturating_sub(ELLIPSIS.chars().count());
    let cut = match text.char_indices().nth(keep) {
        Some((idx, _)) => &text[..idx],
        None => text.as_str(),
    };
    format!("{}{}", trim_end(cut), ELLIPSIS)
}

/// Convert Markdown to plain text.
///
/// Never fails. When the options cannot be compiled (a malformed name in
/// `html_tags_to_skip`), the error is logged and `markdown` is returned
/// unchanged.
pub fn convert(markdown: &str, options: &ConversionOptions) -> String {
    convert_with_sink(markdown, options, &LogSink)
}

/// Convert possibly absent Markdown. `None` converts as the empty string.
pub fn convert_opt(markdown: Option<&str>, options: &ConversionOptions) -> String {
    convert(markdown.unwrap_or_default(), options)
}

/// Convert Markdown to plain text, reporting failures to `sink`.
pub fn convert_with_sink(
    markdown: &str,
    options: &ConversionOptions,
    sink: &dyn DiagnosticSink,
) -> String {
    match Converter::new(options.clone()) {
        Ok(converter) => converter.convert(markdown),
        Err(err) => {
            sink.error(&err);
            markdown.to_string()
        }
    }
}

/// Convert many Markdown strings in parallel.
///
/// Results keep the input order. If the options cannot be compiled, the
/// failure is logged once and every input is returned unchanged.
pub fn convert_batch<S>(inputs: &[S], options: &ConversionOptions) -> Vec<String>
where
    S: AsRef<str> + Sync,
{
    match Converter::new(options.clone()) {
        Ok(converter) => inputs
            .par_iter()
            .map(|input| converter.convert(input.as_ref()))
            .collect(),
        Err(err) => {
            LogSink.error(&err);
            inputs.iter().map(|input| input.as_ref().to_string()).collect()
        }
    }
}

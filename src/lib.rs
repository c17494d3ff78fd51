//! # unmd
//!
//! Markdown to plain text conversion for Rust.
//!
//! This library strips Markdown syntax from a string and returns readable
//! plain text, suitable for previews, search indexing, and meta
//! descriptions.
//!
//! ## Quick Start
//!
//! ```
//! use unmd::{convert, ConversionOptions};
//!
//! let options = ConversionOptions::new().with_max_length(16);
//! let text = convert("## Release notes\n\nNow **faster** parsing", &options);
//! assert_eq!(text, "Release notes...");
//! ```
//!
//! ## Features
//!
//! - **Order-dependent rewrite pipeline**: headers, emphasis, links, images,
//!   lists, quotes, code, footnotes, HTML
//! - **Fail-open**: a conversion that cannot run returns its input unchanged
//! - **Unicode-aware trimming**: strips invisible fillers `str::trim` keeps
//! - **Truncation**: character-based limit with an ellipsis
//! - **Parallel batches**: uses Rayon for many inputs

pub mod convert;
pub mod error;
pub mod options;
pub mod trim;

#[cfg(feature = "ffi")]
pub mod ffi;

// Re-export commonly used types
pub use convert::{
    convert, convert_batch, convert_opt, convert_with_sink, Converter, DiagnosticSink, LogSink,
    NullSink, ELLIPSIS,
};
pub use error::{Error, Result};
pub use options::{ConversionOptions, ListMarker, OptionOverrides};
pub use trim::{is_trim_char, trim, trim_end, trim_start};

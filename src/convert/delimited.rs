//! Scanners for spans opened and closed by the same delimiter run.
//!
//! `*bold*`, `__bold__` and ```` ```code``` ```` need the closing run to
//! repeat the opening run exactly, which a backreference-free regex cannot
//! express. Each scanner walks the text left to right and, at every
//! delimiter, tries the longest opening run first and the shortest inner
//! span first. Unbalanced delimiters are copied through unchanged.

use std::ops::Range;

struct Span {
    /// Index just past the closing run
    end: usize,
    /// Content between the runs
    inner: Range<usize>,
}

fn run_len(chars: &[char], from: usize, delim: char) -> usize {
    chars[from..].iter().take_while(|&&c| c == delim).count()
}

fn closes(chars: &[char], at: usize, delim: char, count: usize) -> bool {
    at + count <= chars.len() && chars[at..at + count].iter().all(|&c| c == delim)
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Match an emphasis span starting at `start`.
///
/// The inner text starts and ends with a non-whitespace character and stays
/// on one line. `accept` sees the index just past the closing run and can
/// veto the candidate.
fn match_emphasis(
    chars: &[char],
    start: usize,
    delim: char,
    accept: impl Fn(usize) -> bool,
) -> Option<Span> {
    let run = run_len(chars, start, delim);

    for count in (1..=run).rev() {
        let first = start + count;
        match chars.get(first) {
            Some(c) if !c.is_whitespace() => {}
            _ => continue,
        }

        let mut end = first + 1;
        loop {
            let last_ok = end == first + 1 || !chars[end - 1].is_whitespace();
            if last_ok && closes(chars, end, delim, count) && accept(end + count) {
                return Some(Span {
                    end: end + count,
                    inner: first..end,
                });
            }
            if end >= chars.len() || (end > first + 1 && chars[end - 1] == '\n') {
                break;
            }
            end += 1;
        }
    }

    None
}

/// Match a code span of 3+ backticks starting at `start`.
fn match_fence(chars: &[char], start: usize) -> Option<Span> {
    let run = run_len(chars, start, '`');

    for count in (3..=run).rev() {
        let first = start + count;
        let mut end = first;
        loop {
            if closes(chars, end, '`', count) {
                return Some(Span {
                    end: end + count,
                    inner: first..end,
                });
            }
            if end >= chars.len() || chars[end] == '\n' {
                break;
            }
            end += 1;
        }
    }

    None
}

/// Unwrap `*text*`, `**text**`, ... to `text`.
pub(crate) fn unwrap_emphasis(text: &str, delim: char) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut i = 0;

    while i < chars.len() {
        if chars[i] == delim {
            if let Some(span) = match_emphasis(&chars, i, delim, |_| true) {
                out.extend(&chars[span.inner]);
                i = span.end;
                continue;
            }
        }
        out.push(chars[i]);
        i += 1;
    }

    out
}

/// Unwrap `_text_` only where the delimiters are not inside a word.
///
/// The opening run must follow the start of the text or a non-word
/// character, and the closing run must precede the end of the text or a
/// non-word character. `snake_case_name` stays intact.
pub(crate) fn unwrap_flanked_emphasis(text: &str, delim: char) -> String {
    let chars: Vec<char> = text.chars().collect();
    let n = chars.len();
    let accept = |j: usize| j == n || !is_word_char(chars[j]);
    let mut out = String::with_capacity(text.len());
    let mut i = 0;

    while i < n {
        // (opening boundary char, span)
        let at_start = if i == 0 && chars[0] == delim {
            match_emphasis(&chars, 0, delim, accept).map(|span| (None, span))
        } else {
            None
        };
        let found = at_start.or_else(|| {
            let boundary = chars[i];
            if !is_word_char(boundary) && chars.get(i + 1) == Some(&delim) {
                match_emphasis(&chars, i + 1, delim, accept).map(|span| (Some(boundary), span))
            } else {
                None
            }
        });

        match found {
            Some((boundary, span)) => {
                out.extend(boundary);
                out.extend(&chars[span.inner]);
                i = span.end;
                // the closing boundary is consumed with the match
                if i < n {
                    out.push(chars[i]);
                    i += 1;
                }
            }
            None => {
                out.push(chars[i]);
                i += 1;
            }
        }
    }

    out
}

/// Unwrap ```` ```code``` ```` spans with matching fence lengths.
pub(crate) fn unwrap_code_fences(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut i = 0;

    while i < chars.len() {
        if chars[i] == '`' {
            if let Some(span) = match_fence(&chars, i) {
                out.extend(&chars[span.inner]);
                i = span.end;
                continue;
            }
        }
        out.push(chars[i]);
        i += 1;
    }

    out
}

//! The ordered rewrite stages.
//!
//! Each stage is a pure function over the previous stage's output. A stage
//! returns `None` when its option is off and the text passes through.

use regex::{Captures, NoExpand};

use super::delimited::{unwrap_code_fences, unwrap_emphasis, unwrap_flanked_emphasis};
use super::html::HtmlTagFilter;
use super::patterns::*;
use crate::options::ConversionOptions;

/// Everything a stage may read.
pub(crate) struct StageContext<'a> {
    pub options: &'a ConversionOptions,
    pub html: &'a HtmlTagFilter,
}

/// A named rewrite step.
pub(crate) struct Stage {
    pub name: &'static str,
    pub apply: fn(&str, &StageContext<'_>) -> Option<String>,
}

/// Horizontal rules go first: list stripping would otherwise eat `- - -`.
pub(crate) fn remove_horizontal_rules(text: &str) -> String {
    HORIZONTAL_RULE_RE.replace_all(text, "").into_owned()
}

/// Stages in application order.
pub(crate) const REWRITE_STAGES: &[Stage] = &[
    Stage {
        name: "list leaders",
        apply: strip_list_leaders,
    },
    Stage {
        name: "gfm",
        apply: strip_gfm,
    },
    Stage {
        name: "abbreviations",
        apply: strip_abbreviations,
    },
    Stage {
        name: "html",
        apply: strip_html,
    },
    Stage {
        name: "html keep-list",
        apply: strip_html,
    },
    Stage {
        name: "setext rules",
        apply: strip_setext_rules,
    },
    Stage {
        name: "footnotes",
        apply: strip_footnotes,
    },
    Stage {
        name: "images",
        apply: rewrite_images,
    },
    Stage {
        name: "links",
        apply: rewrite_links,
    },
    Stage {
        name: "blockquotes",
        apply: strip_blockquotes,
    },
    Stage {
        name: "reference links",
        apply: strip_reference_links,
    },
    Stage {
        name: "atx headers",
        apply: rewrite_atx_headers,
    },
    Stage {
        name: "emphasis",
        apply: unwrap_star_emphasis,
    },
    Stage {
        name: "underscore emphasis",
        apply: unwrap_underscore_emphasis,
    },
    Stage {
        name: "code blocks",
        apply: unwrap_code_blocks,
    },
    Stage {
        name: "inline code",
        apply: unwrap_inline_code,
    },
    Stage {
        name: "strikethrough",
        apply: unwrap_strikethrough,
    },
];

fn strip_list_leaders(text: &str, ctx: &StageContext<'_>) -> Option<String> {
    if !ctx.options.strip_list_leaders {
        return None;
    }

    let stripped = match ctx.options.list_marker() {
        Some(marker) => LIST_LEADER_RE.replace_all(text, |caps: &Captures| {
            format!("{} {}", marker, &caps[1])
        }),
        None => LIST_LEADER_RE.replace_all(text, "${1}"),
    };
    Some(stripped.into_owned())
}

fn strip_gfm(text: &str, ctx: &StageContext<'_>) -> Option<String> {
    if !ctx.options.gfm {
        return None;
    }

    let result = GFM_HEADER_RULE_RE.replace_all(text, "\n");
    let result = GFM_TILDE_FENCE_RE.replace_all(&result, "");
    let result = GFM_STRIKETHROUGH_RE.replace_all(&result, "");
    let result = GFM_BACKTICK_FENCE_RE.replace_all(&result, "");
    Some(result.into_owned())
}

fn strip_abbreviations(text: &str, ctx: &StageContext<'_>) -> Option<String> {
    if !ctx.options.abbr {
        return None;
    }
    // only the first definition
    Some(ABBREVIATION_RE.replace(text, "").into_owned())
}

fn strip_html(text: &str, ctx: &StageContext<'_>) -> Option<String> {
    Some(ctx.html.strip(text))
}

fn strip_setext_rules(text: &str, _ctx: &StageContext<'_>) -> Option<String> {
    Some(SETEXT_RULE_RE.replace_all(text, "").into_owned())
}

fn strip_footnotes(text: &str, _ctx: &StageContext<'_>) -> Option<String> {
    let result = FOOTNOTE_REF_RE.replace_all(text, "");
    let result = FOOTNOTE_DEF_RE.replace_all(&result, "");
    Some(result.into_owned())
}

fn rewrite_images(text: &str, ctx: &StageContext<'_>) -> Option<String> {
    let replacement = if ctx.options.use_img_alt_text {
        "${1}"
    } else {
        ""
    };
    Some(IMAGE_RE.replace_all(text, replacement).into_owned())
}

fn rewrite_links(text: &str, ctx: &StageContext<'_>) -> Option<String> {
    let replacement = if ctx.options.replace_links_with_url {
        "${2}"
    } else {
        "${1}"
    };
    Some(LINK_RE.replace_all(text, replacement).into_owned())
}

fn strip_blockquotes(text: &str, _ctx: &StageContext<'_>) -> Option<String> {
    Some(BLOCKQUOTE_RE.replace_all(text, "${1}").into_owned())
}

fn strip_reference_links(text: &str, _ctx: &StageContext<'_>) -> Option<String> {
    Some(REFERENCE_LINK_RE.replace_all(text, "").into_owned())
}

fn rewrite_atx_headers(text: &str, _ctx: &StageContext<'_>) -> Option<String> {
    Some(ATX_HEADER_RE.replace_all(text, "${1}${3}${4}${6}").into_owned())
}

fn unwrap_star_emphasis(text: &str, _ctx: &StageContext<'_>) -> Option<String> {
    Some(unwrap_emphasis(text, '*'))
}

fn unwrap_underscore_emphasis(text: &str, _ctx: &StageContext<'_>) -> Option<String> {
    Some(unwrap_flanked_emphasis(text, '_'))
}

fn unwrap_code_blocks(text: &str, _ctx: &StageContext<'_>) -> Option<String> {
    Some(unwrap_code_fences(text))
}

fn unwrap_inline_code(text: &str, _ctx: &StageContext<'_>) -> Option<String> {
    Some(INLINE_CODE_RE.replace_all(text, "${1}").into_owned())
}

fn unwrap_strikethrough(text: &str, _ctx: &StageContext<'_>) -> Option<String> {
    Some(STRIKETHROUGH_RE.replace_all(text, "${1}").into_owned())
}

/// Replace every whitespace run with one space.
pub(crate) fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_RUN_RE
        .replace_all(text, NoExpand(" "))
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(name: &str, text: &str, options: &ConversionOptions) -> String {
        let html = HtmlTagFilter::new(&options.html_tags_to_skip).unwrap();
        let ctx = StageContext {
            options,
            html: &html,
        };
        let stage = REWRITE_STAGES
            .iter()
            .find(|s| s.name == name)
            .expect("stage exists");
        (stage.apply)(text, &ctx).unwrap_or_else(|| text.to_string())
    }

    #[test]
    fn test_horizontal_rules() {
        assert_eq!(remove_horizontal_rules("a\n---\nb"), "a\nb");
        assert_eq!(remove_horizontal_rules("a\n* * *\nb"), "a\nb");
        assert_eq!(remove_horizontal_rules("a\n___\nb"), "a\nb");
        assert_eq!(remove_horizontal_rules("- item"), "- item");
        assert_eq!(remove_horizontal_rules("a\n- - -  \nb"), "a\nb");
        assert_eq!(remove_horizontal_rules("a\n---"), "a\n");
    }

    #[test]
    fn test_horizontal_rules_need_whole_line() {
        assert_eq!(remove_horizontal_rules("***x***"), "***x***");
        assert_eq!(remove_horizontal_rules("___x___"), "___x___");
        assert_eq!(remove_horizontal_rules("---text"), "---text");
        assert_eq!(remove_horizontal_rules("-*_"), "-*_");
    }

    #[test]
    fn test_horizontal_rules_crlf() {
        assert_eq!(remove_horizontal_rules("a\r\n***\r\nb"), "a\r\nb");
    }

    #[test]
    fn test_crlf_line_ends() {
        let options = ConversionOptions::default();
        assert_eq!(run("atx headers", "## Sub ##\r\nBody", &options), "Sub\r\nBody");
        assert_eq!(run("list leaders", "- a\r\n- b", &options), "a\r\nb");
        assert_eq!(run("blockquotes", "> a\r\n> b", &options), "a\r\nb");
    }

    #[test]
    fn test_list_leaders() {
        let options = ConversionOptions::default();
        assert_eq!(run("list leaders", "- a\n* b\n+ c\n12. d", &options), "a\nb\nc\nd");
        assert_eq!(run("list leaders", "  - nested", &options), "  nested");
    }

    #[test]
    fn test_list_leaders_with_marker() {
        let options = ConversionOptions::new().with_list_unicode_char("•");
        assert_eq!(run("list leaders", "- item", &options), "• item");
        assert_eq!(run("list leaders", "  1. item", &options), "•   item");
    }

    #[test]
    fn test_list_marker_with_dollar() {
        let options = ConversionOptions::new().with_list_unicode_char("$1");
        assert_eq!(run("list leaders", "- item", &options), "$1 item");
    }

    #[test]
    fn test_list_leaders_disabled() {
        let options = ConversionOptions::new().with_strip_list_leaders(false);
        assert_eq!(run("list leaders", "- item", &options), "- item");
    }

    #[test]
    fn test_gfm() {
        let options = ConversionOptions::default();
        assert_eq!(run("gfm", "Title\n===\ntext", &options), "Title\n\ntext");
        assert_eq!(run("gfm", "~~~rust\ncode\n~~~\n", &options), "code\n");
        assert_eq!(run("gfm", "~~gone~~", &options), "gone");
        assert_eq!(run("gfm", "```js\nx\n```\n", &options), "x\n");
    }

    #[test]
    fn test_abbreviations() {
        let options = ConversionOptions::new().with_abbr(true);
        assert_eq!(
            run("abbreviations", "*[HTML]: Hyper Text\nHTML rocks", &options),
            "HTML rocks"
        );
        let options = ConversionOptions::default();
        assert_eq!(
            run("abbreviations", "*[HTML]: Hyper Text\n", &options),
            "*[HTML]: Hyper Text\n"
        );
    }

    #[test]
    fn test_footnotes() {
        let options = ConversionOptions::default();
        assert_eq!(run("footnotes", "Text[^1] more", &options), "Text more");
        assert_eq!(
            run("footnotes", "Text\n\n  [label]: http://x \"T\"", &options),
            "Text\n\n"
        );
    }

    #[test]
    fn test_footnote_definition_only_at_end() {
        let options = ConversionOptions::default();
        assert_eq!(run("footnotes", "a\n[x]: y\nb", &options), "a\n[x]: y\nb");
    }

    #[test]
    fn test_setext_rules() {
        let options = ConversionOptions::default();
        assert_eq!(run("setext rules", "==", &options), "");
        assert_eq!(run("setext rules", "---  ", &options), "");
        assert_eq!(run("setext rules", "Title\n==", &options), "Title\n==");
    }

    #[test]
    fn test_reference_links() {
        let options = ConversionOptions::default();
        assert_eq!(
            run("reference links", "  [label]: http://x \"T\"", &options),
            ""
        );
        assert_eq!(run("reference links", " [a]: http://a", &options), "");
        assert_eq!(
            run("reference links", "Text\n  [x]: y", &options),
            "Text\n  [x]: y"
        );
    }

    #[test]
    fn test_images_and_links() {
        let options = ConversionOptions::default();
        assert_eq!(run("images", "![alt](img.png)", &options), "alt");
        assert_eq!(run("links", "[text](http://x)", &options), "text");
        assert_eq!(run("links", "[text][ref]", &options), "text");

        let options = ConversionOptions::new()
            .with_img_alt_text(false)
            .with_links_as_url(true);
        assert_eq!(run("images", "![alt](img.png)", &options), "");
        assert_eq!(run("links", "[text](http://x)", &options), "http://x");
    }

    #[test]
    fn test_blockquotes() {
        let options = ConversionOptions::default();
        assert_eq!(run("blockquotes", "> quoted\n>  more", &options), "quoted\n more");
    }

    #[test]
    fn test_atx_headers() {
        let options = ConversionOptions::default();
        assert_eq!(run("atx headers", "# Title", &options), "Title");
        assert_eq!(run("atx headers", "## Sub ##", &options), "Sub");
        assert_eq!(run("atx headers", "###### Deep", &options), "Deep");
        assert_eq!(run("atx headers", "#hashtag", &options), "#hashtag");
    }

    #[test]
    fn test_inline_code_and_strike() {
        let options = ConversionOptions::default();
        assert_eq!(run("inline code", "use `x` here", &options), "use x here");
        assert_eq!(run("strikethrough", "~old~ new", &options), "old new");
    }

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("a \n\n\tb  c"), "a b c");
    }
}

//! Turning locale HTML into text a voice can read.

use std::sync::LazyLock;

use regex::Regex;

/// Cleaned text shorter than this (in characters) isn't worth synthesizing.
pub const MIN_TEXT_CHARS: usize = 5;

/// Block elements carry images and callouts, not speech; drop them with their content.
static BLOCK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<div[^>]*>.*?</div>").expect("valid regex"));

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").expect("valid regex"));

/// Entities and symbols the voice would otherwise mispronounce or skip, in application order.
const REPLACEMENTS: &[(&str, &str)] = &[
    ("&mdash;", "..."),
    ("&ndash;", "..."),
    ("\u{2014}", "..."),
    ("\u{2013}", "..."),
    ("\u{03c0}", "pi"),
    ("\u{00b2}", " squared"),
    ("\u{00b3}", " cubed"),
    ("\u{2153}", "one third"),
];

/// Strip markup from a dialogue line.
///
/// Removes `<div>` blocks along with their content, then every remaining tag, then rewrites a
/// fixed set of dashes and math symbols into speakable text and trims the result.
/// Applying this twice yields the same text as applying it once.
pub fn strip_markup(text: &str) -> String {
    let text = BLOCK_RE.replace_all(text, "");
    let text = TAG_RE.replace_all(&text, "");

    let mut out = text.into_owned();
    for &(from, to) in REPLACEMENTS {
        if out.contains(from) {
            out = out.replace(from, to);
        }
    }

    out.trim().to_owned()
}

/// Whether cleaned text is long enough to send to the synthesis service.
pub fn is_speakable(clean: &str) -> bool {
    clean.chars().count() >= MIN_TEXT_CHARS
}

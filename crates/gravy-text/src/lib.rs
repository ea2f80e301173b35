#![forbid(unsafe_code)]
#![deny(
    dead_code,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]

//! String helpers for text shown in (and read back from) UI widgets.
//!
//! Every helper borrows its input and only allocates when it has to change
//! something. [`TextExt`] exposes the same helpers as methods on `str`.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;

/// Character budget used by [`truncate_default`].
pub const DEFAULT_TRUNCATE_CHARS: usize = 100;

const ELLIPSIS: &str = "...";

static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"</?[^>]+>").expect("tag pattern is valid"));
static WHITESPACE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s{2,}").expect("whitespace pattern is valid"));

/// Trim leading and trailing whitespace.
#[must_use]
pub fn strip(text: &str) -> &str {
    text.trim()
}

/// Remove every opening and closing markup tag.
#[must_use]
pub fn strip_tags(text: &str) -> Cow<'_, str> {
    TAG.replace_all(text, "")
}

/// Replace runs of two or more whitespace characters with a single space.
#[must_use]
pub fn collapse_whitespace(text: &str) -> Cow<'_, str> {
    WHITESPACE_RUN.replace_all(text, " ")
}

/// Escape `&`, `<` and `>` as HTML entities.
#[must_use]
pub fn html_encode(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>']) {
        return Cow::Borrowed(text);
    }

    let mut encoded = String::with_capacity(text.len() + 8);
    for ch in text.chars() {
        match ch {
            '&' => encoded.push_str("&amp;"),
            '<' => encoded.push_str("&lt;"),
            '>' => encoded.push_str("&gt;"),
            other => encoded.push(other),
        }
    }
    Cow::Owned(encoded)
}

/// Undo [`html_encode`].
///
/// `&amp;` is decoded first, so doubly-escaped input such as `&amp;lt;`
/// decodes all the way to `<`.
#[must_use]
pub fn html_decode(text: &str) -> Cow<'_, str> {
    if !text.contains('&') {
        return Cow::Borrowed(text);
    }

    Cow::Owned(
        text.replace("&amp;", "&")
            .replace("&lt;", "<")
            .replace("&gt;", ">"),
    )
}

/// Shorten `text` to at most `max_chars` characters.
///
/// Longer text keeps its first `max_chars - 3` characters, cut back to the
/// last sentence break (`.`) inside them when there is one, followed by
/// `...`.
#[must_use]
pub fn truncate(text: &str, max_chars: usize) -> Cow<'_, str> {
    if text.chars().count() <= max_chars {
        return Cow::Borrowed(text);
    }

    let keep = max_chars.saturating_sub(ELLIPSIS.len());
    let end = text
        .char_indices()
        .nth(keep)
        .map_or(text.len(), |(index, _)| index);
    let mut prefix = &text[..end];
    if let Some(dot) = prefix.rfind('.') {
        prefix = &prefix[..=dot];
    }
    Cow::Owned(format!("{prefix}{ELLIPSIS}"))
}

/// [`truncate`] with the default budget of [`DEFAULT_TRUNCATE_CHARS`].
#[must_use]
pub fn truncate_default(text: &str) -> Cow<'_, str> {
    truncate(text, DEFAULT_TRUNCATE_CHARS)
}

/// Method-call access to the helpers in this crate.
pub trait TextExt {
    /// See [`strip`].
    fn strip(&self) -> &str;
    /// See [`strip_tags`].
    fn strip_tags(&self) -> Cow<'_, str>;
    /// See [`html_encode`].
    fn html_encode(&self) -> Cow<'_, str>;
    /// See [`html_decode`].
    fn html_decode(&self) -> Cow<'_, str>;
    /// See [`truncate`].
    fn truncate_chars(&self, max_chars: usize) -> Cow<'_, str>;
}

impl TextExt for str {
    fn strip(&self) -> &str {
        strip(self)
    }

    fn strip_tags(&self) -> Cow<'_, str> {
        strip_tags(self)
    }

    fn html_encode(&self) -> Cow<'_, str> {
        html_encode(self)
    }

    fn html_decode(&self) -> Cow<'_, str> {
        html_decode(self)
    }

    fn truncate_chars(&self, max_chars: usize) -> Cow<'_, str> {
        truncate(self, max_chars)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_trims_both_ends() {
        assert_eq!(strip("  \t hello world \n"), "hello world");
        assert_eq!(strip(""), "");
    }

    #[test]
    fn strip_tags_removes_markup() {
        assert_eq!(
            strip_tags("<p>Hello <b>there</b><br/>friend</p>"),
            "Hello therefriend"
        );
        assert!(matches!(strip_tags("plain"), Cow::Borrowed("plain")));
        assert_eq!(strip_tags("a < b"), "a < b");
    }

    #[test]
    fn collapse_whitespace_keeps_single_spaces() {
        assert_eq!(collapse_whitespace("a  b\n\n c d"), "a b c d");
    }

    #[test]
    fn html_encode_escapes_ampersand_first() {
        assert_eq!(html_encode("a < b && c > d"), "a &lt; b &amp;&amp; c &gt; d");
        assert!(matches!(html_encode("safe"), Cow::Borrowed("safe")));
        assert_eq!(html_encode(""), "");
    }

    #[test]
    fn html_decode_reverses_encode() {
        let original = "<tag attr=\"x\"> & more";
        assert_eq!(html_decode(&html_encode(original)), original);
        assert_eq!(html_decode("&amp;lt;"), "<");
        assert!(matches!(html_decode("nothing"), Cow::Borrowed("nothing")));
    }

    #[test]
    fn truncate_leaves_short_text_alone() {
        assert!(matches!(truncate("short", 10), Cow::Borrowed("short")));
        assert_eq!(truncate("exactly10!", 10), "exactly10!");
    }

    #[test]
    fn truncate_cuts_at_last_sentence_break() {
        assert_eq!(
            truncate("First sentence. Second sentence runs long", 25),
            "First sentence...."
        );
        assert_eq!(truncate("no breaks in this text at all", 10), "no brea...");
    }

    #[test]
    fn truncate_counts_characters_not_bytes() {
        assert_eq!(truncate("ééééééé", 5), "éé...");
        assert_eq!(truncate("abcdef", 2), "...");
    }

    #[test]
    fn truncate_default_uses_hundred_characters() {
        let long = "x".repeat(150);
        let truncated = truncate_default(&long);
        assert_eq!(truncated.chars().count(), DEFAULT_TRUNCATE_CHARS);
        assert!(truncated.ends_with(ELLIPSIS));
    }

    #[test]
    fn text_ext_delegates() {
        assert_eq!("  hi ".strip(), "hi");
        assert_eq!("<i>x</i>".strip_tags(), "x");
        assert_eq!("<".html_encode(), "&lt;");
        assert_eq!("&gt;".html_decode(), ">");
        assert_eq!("abcdefgh".truncate_chars(6), "abc...");
    }
}

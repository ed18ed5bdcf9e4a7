//! Fragment identifiers for heading anchors.

use std::sync::LazyLock;

use regex::Regex;

static NON_WORD_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w]+").expect("non-word pattern is valid"));

/// Generate the anchor name for a heading.
///
/// Lowercases the text and collapses every run of non-word characters into a
/// single hyphen, dropping hyphens at either end.
///
/// ```
/// use flora_markdown::slugify;
///
/// assert_eq!(slugify("Hello, World!"), "hello-world");
/// assert_eq!(slugify("Héllo Wörld"), "héllo-wörld");
/// ```
pub fn slugify(text: &str) -> String {
    let lower = text.to_lowercase();
    NON_WORD_RUN
        .replace_all(&lower, "-")
        .trim_matches('-')
        .to_string()
}

//! HTML escaping for text and attribute values.

use std::borrow::Cow;

/// Entity for each character the escaper rewrites.
const ESCAPE_REPLACEMENTS: [(char, &str); 5] = [
    ('&', "&amp;"),
    ('<', "&lt;"),
    ('>', "&gt;"),
    ('"', "&quot;"),
    ('\'', "&#39;"),
];

fn replacement(ch: char) -> Option<&'static str> {
    ESCAPE_REPLACEMENTS
        .iter()
        .find(|(c, _)| *c == ch)
        .map(|(_, entity)| *entity)
}

/// Escape unsafe HTML characters.
///
/// With `encode` set, every `&`, `<`, `>`, `"` and `'` is replaced by its
/// entity. Without it, an `&` that already starts an entity reference
/// (`&amp;`, `&#39;`, ...) is left alone so escaped input is not escaped twice.
///
/// Input that needs no escaping is returned borrowed.
///
/// ```
/// use flora_markdown::escape;
///
/// assert_eq!(escape("<a>&amp;", true), "&lt;a&gt;&amp;amp;");
/// assert_eq!(escape("<a>&amp;", false), "&lt;a&gt;&amp;");
/// ```
pub fn escape(html: &str, encode: bool) -> Cow<'_, str> {
    let needs_escape = |i: usize, ch: char| match ch {
        '<' | '>' | '"' | '\'' => true,
        '&' => encode || !starts_entity(&html[i..]),
        _ => false,
    };

    let Some(first) = html.char_indices().position(|(i, ch)| needs_escape(i, ch)) else {
        return Cow::Borrowed(html);
    };

    let mut out = String::with_capacity(html.len() + 16);
    for (n, (i, ch)) in html.char_indices().enumerate() {
        match replacement(ch) {
            Some(entity) if n >= first && needs_escape(i, ch) => out.push_str(entity),
            _ => out.push(ch),
        }
    }
    Cow::Owned(out)
}

/// Whether `s` (which begins with `&`) is an entity reference: `&#?\w+;`.
fn starts_entity(s: &str) -> bool {
    let rest = &s.as_bytes()[1..];
    let rest = rest.strip_prefix(b"#").unwrap_or(rest);
    let word_len = rest
        .iter()
        .take_while(|b| b.is_ascii_alphanumeric() || **b == b'_')
        .count();
    word_len > 0 && rest.get(word_len) == Some(&b';')
}

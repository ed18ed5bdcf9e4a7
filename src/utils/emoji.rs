//! Emoji shortcode substitution (`:smile:` -> 😄).

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::{Captures, Regex};

static SHORTCODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r":([a-z0-9_+\-]+):").expect("shortcode pattern is valid")
});

/// Replace known emoji shortcodes with their glyphs.
///
/// Unknown shortcodes are left as written. Returns the input borrowed when
/// nothing matched.
pub fn emojis(text: &str) -> Cow<'_, str> {
    SHORTCODE.replace_all(text, |caps: &Captures<'_>| {
        match ::emojis::get_by_shortcode(&caps[1]) {
            Some(emoji) => emoji.as_str().to_string(),
            None => caps[0].to_string(),
        }
    })
}

//! URL normalization for links and images.
//!
//! Percent-encodes URLs the way browsers expect in `href`/`src` attributes
//! and rejects URLs that can run script.

use std::sync::LazyLock;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use regex::Regex;

use crate::config::BLOCKED_URL_SCHEMES;

/// A `%` followed by any number of `25`s, i.e. a percent encoded one or more times.
static ENCODED_PERCENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("%(?:25)+").expect("encoded percent pattern is valid"));

/// Characters left as-is: the reserved and unreserved URI characters.
const URI_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b';')
    .remove(b',')
    .remove(b'/')
    .remove(b'?')
    .remove(b':')
    .remove(b'@')
    .remove(b'&')
    .remove(b'=')
    .remove(b'+')
    .remove(b'$')
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')')
    .remove(b'#');

/// Reasons a URL cannot be used in generated markup.
#[derive(Debug, Clone, PartialEq)]
pub enum UrlError {
    /// URL contains control characters
    ControlCharacter,
    /// URL uses a scheme that can execute script
    BlockedScheme(String),
}

impl std::fmt::Display for UrlError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ControlCharacter => write!(f, "URL contains control characters"),
            Self::BlockedScheme(scheme) => write!(f, "URL scheme '{}' is not allowed", scheme),
        }
    }
}

impl std::error::Error for UrlError {}

/// Normalize a link or image URL.
///
/// Returns `None` for a missing URL or one that cannot be used safely;
/// callers then render the link text without the link.
///
/// ```
/// use flora_markdown::clean_url;
///
/// assert_eq!(clean_url(Some("http://x/a b")), Some("http://x/a%20b".to_string()));
/// assert_eq!(clean_url(Some("http://x/%25")), Some("http://x/%".to_string()));
/// assert_eq!(clean_url(None), None);
/// ```
pub fn clean_url(href: Option<&str>) -> Option<String> {
    let href = href?;
    match encode_uri(href) {
        Ok(encoded) => Some(encoded),
        Err(err) => {
            tracing::debug!(%href, %err, "dropping url");
            None
        }
    }
}

/// Percent-encode `href`, collapsing `%25` back to `%` so already-encoded
/// input is not escaped a second time.
fn encode_uri(href: &str) -> Result<String, UrlError> {
    if href
        .chars()
        .any(|c| c.is_ascii_control() && !matches!(c, '\t' | '\n' | '\r'))
    {
        return Err(UrlError::ControlCharacter);
    }
    check_scheme(href)?;

    let encoded = utf8_percent_encode(href, URI_SET).to_string();
    Ok(ENCODED_PERCENT.replace_all(&encoded, "%").into_owned())
}

/// Reject script-capable schemes, ignoring case and the whitespace browsers
/// strip before resolving a URL.
fn check_scheme(href: &str) -> Result<(), UrlError> {
    let compact: String = href
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect();

    match BLOCKED_URL_SCHEMES
        .iter()
        .find(|scheme| compact.starts_with(**scheme))
    {
        Some(scheme) => Err(UrlError::BlockedScheme(scheme.trim_end_matches(':').to_string())),
        None => Ok(()),
    }
}

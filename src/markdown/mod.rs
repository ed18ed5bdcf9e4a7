//! Markdown rendering.
//!
//! Converts user-authored markdown to sanitized HTML:
//!
//! 1. emoji shortcodes become glyphs,
//! 2. pulldown-cmark parses the text (GFM extensions, smart punctuation) and
//!    the event rewriter applies the custom heading/link/image/code rules,
//! 3. `ammonia` sanitizes the assembled document.

mod highlight;
mod nodes;
mod sanitize;
mod writer;

use std::panic::{self, AssertUnwindSafe};

use pulldown_cmark::{Options, Parser};
use serde::{Deserialize, Serialize};

use crate::error::MarkdownError;
use crate::utils::emojis;

pub use highlight::{Highlighted, detect_language, highlight_code};
pub use nodes::{CodeBlockNode, HeadingNode, ImageNode, LinkNode, RenderNode};
pub use sanitize::{sanitize_document, sanitize_fragment};

/// Outcome of [`to_html`]: exactly one of `content` and `error` is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkdownResult {
    /// Sanitized HTML
    pub content: Option<String>,
    /// Why rendering failed
    pub error: Option<String>,
}

impl MarkdownResult {
    /// Whether rendering succeeded.
    pub fn is_ok(&self) -> bool {
        self.content.is_some()
    }

    /// Convert back into a `Result`, with the error message as the error.
    pub fn into_result(self) -> Result<String, String> {
        match (self.content, self.error) {
            (Some(content), _) => Ok(content),
            (None, error) => Err(error.unwrap_or_default()),
        }
    }
}

impl From<Result<String, MarkdownError>> for MarkdownResult {
    fn from(result: Result<String, MarkdownError>) -> Self {
        match result {
            Ok(content) => Self {
                content: Some(content),
                error: None,
            },
            Err(err) => Self {
                content: None,
                error: Some(err.to_string()),
            },
        }
    }
}

/// Toggles for the optional stages of the pipeline.
///
/// The default enables everything, which is what [`to_html`] uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderOptions {
    /// Curly quotes, en/em dashes and ellipses
    pub smart_punctuation: bool,
    /// Tables, strikethrough, task lists, footnotes and alerts
    pub gfm: bool,
    /// Replace `:shortcode:` with emoji glyphs
    pub emoji: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            smart_punctuation: true,
            gfm: true,
            emoji: true,
        }
    }
}

impl RenderOptions {
    fn parser_options(&self) -> Options {
        let mut options = Options::empty();
        if self.smart_punctuation {
            options.insert(Options::ENABLE_SMART_PUNCTUATION);
        }
        if self.gfm {
            options.insert(Options::ENABLE_TABLES);
            options.insert(Options::ENABLE_STRIKETHROUGH);
            options.insert(Options::ENABLE_TASKLISTS);
            options.insert(Options::ENABLE_FOOTNOTES);
            options.insert(Options::ENABLE_GFM);
        }
        options
    }
}

/// Convert markdown to sanitized HTML.
///
/// Never panics: failures, including panics inside the parser or
/// highlighter, are reported through [`MarkdownResult::error`].
///
/// ```
/// use flora_markdown::to_html;
///
/// let result = to_html("Hello **world**");
/// assert_eq!(result.content.as_deref(), Some("<p>Hello <strong>world</strong></p>\n"));
/// assert_eq!(result.error, None);
/// ```
pub fn to_html(text: &str) -> MarkdownResult {
    to_html_with(text, &RenderOptions::default())
}

/// [`to_html`] with explicit options.
pub fn to_html_with(text: &str, options: &RenderOptions) -> MarkdownResult {
    let result = panic::catch_unwind(AssertUnwindSafe(|| render_with(text, options)))
        .unwrap_or_else(|payload| Err(MarkdownError::from_panic(payload)));

    if let Err(err) = &result {
        tracing::warn!(%err, "markdown render failed");
    }
    result.into()
}

/// Convert markdown to sanitized HTML with the default options.
pub fn render(text: &str) -> Result<String, MarkdownError> {
    render_with(text, &RenderOptions::default())
}

/// Convert markdown to sanitized HTML, propagating failures.
///
/// Unlike [`to_html_with`], panics are not caught.
pub fn render_with(text: &str, options: &RenderOptions) -> Result<String, MarkdownError> {
    let source = if options.emoji {
        emojis(text)
    } else {
        text.into()
    };

    let parser = Parser::new_ext(&source, options.parser_options());
    let html = writer::render_events(parser)?;
    tracing::trace!(input_len = text.len(), html_len = html.len(), "rendered markdown");

    Ok(sanitize_document(&html))
}

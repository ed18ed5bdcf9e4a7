//! Markdown to sanitized HTML.
//!
//! Renders user-authored markdown for display: emoji shortcodes, GFM
//! extensions, smart punctuation, syntax-highlighted code blocks with a
//! language caption, anchored headings, and links/images that open in a new
//! tab. All output passes through an HTML sanitizer.
//!
//! ```
//! use flora_markdown::to_html;
//!
//! let result = to_html("# Title\n\n[link](http://example.com)");
//! let html = result.content.unwrap();
//! assert!(html.contains("<h1>Title</h1>"));
//! assert!(html.contains(r#"<a target="_blank" rel="external" href="http://example.com">link</a>"#));
//! ```

pub mod config;
pub mod error;
pub mod markdown;
pub mod utils;

#[cfg(feature = "wasm")]
mod wasm;

pub use error::MarkdownError;
pub use markdown::{
    Highlighted, MarkdownResult, RenderOptions, highlight_code, render, render_with, to_html,
    to_html_with,
};
pub use utils::{clean_url, emojis, escape, slugify};

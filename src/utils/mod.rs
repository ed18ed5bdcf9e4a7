//! Text utilities shared by the renderer.
//!
//! Provides:
//! - [`escape`] - HTML entity escaping
//! - [`clean_url`] - URL normalization for links and images
//! - [`emojis`] - Emoji shortcode substitution
//! - [`slugify`] - Heading anchor names

mod emoji;
mod escape;
mod slug;
mod url;

pub use emoji::emojis;
pub use escape::escape;
pub use slug::slugify;
pub use url::{UrlError, clean_url};

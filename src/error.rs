//! Error types for markdown rendering.
//!
//! Every failure inside the pipeline surfaces as a [`MarkdownError`]; the
//! entry point turns it into the `error` field of a
//! [`MarkdownResult`](crate::MarkdownResult).

use thiserror::Error;

/// A render that could not complete.
#[derive(Debug, Error)]
pub enum MarkdownError {
    /// The syntax highlighter failed on a code block
    #[error("failed to highlight code block: {0}")]
    Highlight(#[from] syntect::Error),
    /// A panic was raised while rendering
    #[error("renderer panicked: {0}")]
    Panicked(String),
}

impl MarkdownError {
    /// Build a [`MarkdownError::Panicked`] from a `catch_unwind` payload.
    pub(crate) fn from_panic(payload: Box<dyn std::any::Any + Send>) -> Self {
        let message = if let Some(msg) = payload.downcast_ref::<&str>() {
            (*msg).to_string()
        } else if let Some(msg) = payload.downcast_ref::<String>() {
            msg.clone()
        } else {
            "unknown panic".to_string()
        };
        Self::Panicked(message)
    }
}

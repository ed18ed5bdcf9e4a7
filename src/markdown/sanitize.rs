//! HTML sanitization policies.
//!
//! Two `ammonia` policies are used: one for raw HTML blocks met while
//! parsing, and one for the finished document, which additionally allows
//! `target` so external links can open in a new tab.

use std::sync::LazyLock;

use ammonia::Builder;

use crate::config::{EXTRA_ALLOWED_TAGS, FINAL_PASS_ATTRIBUTE, GENERIC_ATTRIBUTES, TAG_ATTRIBUTES};

static FRAGMENT_POLICY: LazyLock<Builder<'static>> = LazyLock::new(base_policy);

static DOCUMENT_POLICY: LazyLock<Builder<'static>> = LazyLock::new(|| {
    let mut policy = base_policy();
    policy.add_generic_attributes([FINAL_PASS_ATTRIBUTE]);
    policy
});

/// Permissive policy: ammonia's defaults plus the markup the renderer emits.
///
/// `rel` is kept as authored, so ammonia must not inject its own.
fn base_policy() -> Builder<'static> {
    let mut policy = Builder::default();
    policy
        .add_tags(EXTRA_ALLOWED_TAGS.iter().copied())
        .add_generic_attributes(GENERIC_ATTRIBUTES.iter().copied())
        .link_rel(None);
    for (tag, attributes) in TAG_ATTRIBUTES {
        policy.add_tag_attributes(*tag, attributes.iter().copied());
    }
    policy
}

/// Sanitize a raw HTML block embedded in the markdown source.
pub fn sanitize_fragment(html: &str) -> String {
    FRAGMENT_POLICY.clean(html).to_string()
}

/// Sanitize the assembled document.
pub fn sanitize_document(html: &str) -> String {
    DOCUMENT_POLICY.clean(html).to_string()
}

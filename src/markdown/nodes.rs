//! Custom markup for headings, images, links and code blocks.
//!
//! Each node kind implements [`RenderNode`]; the event rewriter builds a node
//! once it has seen the node's full content and splices the rendered HTML
//! back into the event stream.

use pulldown_cmark::HeadingLevel;

use super::highlight::{highlight_code, language_label};
use crate::config::{ANCHOR_CLASS, FIGURE_CLASS, FIGURE_LINK_CLASS};
use crate::error::MarkdownError;
use crate::utils::{clean_url, escape, slugify};

/// A node that renders itself to HTML.
pub trait RenderNode {
    /// Append this node's markup to `out`.
    fn render(&self, out: &mut String) -> Result<(), MarkdownError>;
}

/// Heading wrapped in a self-link so readers can copy its URL.
#[derive(Debug)]
pub struct HeadingNode<'a> {
    pub level: HeadingLevel,
    /// Plain text of the heading, used for the anchor name
    pub text: &'a str,
    /// Rendered inline content
    pub inner_html: &'a str,
}

impl RenderNode for HeadingNode<'_> {
    fn render(&self, out: &mut String) -> Result<(), MarkdownError> {
        let slug = slugify(self.text);
        let level = self.level;
        out.push_str(&format!(
            r##"<a name="{slug}" class="{ANCHOR_CLASS}" href="#{slug}"><{level}>{}</{level}></a>"##,
            self.inner_html
        ));
        out.push('\n');
        Ok(())
    }
}

/// Image shown as a captioned figure that opens full size in a new tab.
#[derive(Debug)]
pub struct ImageNode<'a> {
    pub url: &'a str,
    pub title: &'a str,
    /// Alt text, also used as the caption
    pub alt: &'a str,
}

impl ImageNode<'_> {
    /// Whether this image renders as a figure rather than falling back to text.
    pub fn is_figure(&self) -> bool {
        clean_url(Some(self.url)).is_some()
    }
}

impl RenderNode for ImageNode<'_> {
    fn render(&self, out: &mut String) -> Result<(), MarkdownError> {
        let alt = escape(self.alt, true);
        let Some(href) = clean_url(Some(self.url)) else {
            out.push_str(&alt);
            return Ok(());
        };
        let href = escape(&href, false);

        let mut attributes = vec![format!(r#"src="{href}""#), format!(r#"alt="{alt}""#)];
        if !self.title.is_empty() {
            attributes.push(format!(r#"title="{}""#, escape(self.title, true)));
        }

        out.push_str(&format!(
            concat!(
                r#"<div class="{figure}">"#,
                r#"<a target="_blank" rel="external" class="{link}" href="{href}">"#,
                r#"<img {attributes}></a>{alt}</div>"#,
            ),
            figure = FIGURE_CLASS,
            link = FIGURE_LINK_CLASS,
            href = href,
            attributes = attributes.join(" "),
            alt = alt,
        ));
        Ok(())
    }
}

/// External link that opens in a new tab.
#[derive(Debug)]
pub struct LinkNode<'a> {
    pub url: &'a str,
    /// Written into the `title` attribute as-is
    pub title: &'a str,
    /// Rendered link content
    pub inner_html: &'a str,
}

impl RenderNode for LinkNode<'_> {
    fn render(&self, out: &mut String) -> Result<(), MarkdownError> {
        let Some(href) = clean_url(Some(self.url)) else {
            out.push_str(self.inner_html);
            return Ok(());
        };

        out.push_str(r#"<a target="_blank" rel="external" href=""#);
        out.push_str(&escape(&href, false));
        out.push('"');
        if !self.title.is_empty() {
            out.push_str(r#" title=""#);
            out.push_str(self.title);
            out.push('"');
        }
        out.push('>');
        out.push_str(self.inner_html);
        out.push_str("</a>");
        Ok(())
    }
}

/// Fenced or indented code block with a language caption.
#[derive(Debug)]
pub struct CodeBlockNode<'a> {
    /// First word of the fence info string, empty if none
    pub hint: &'a str,
    pub code: &'a str,
}

impl RenderNode for CodeBlockNode<'_> {
    fn render(&self, out: &mut String) -> Result<(), MarkdownError> {
        let highlighted = highlight_code(self.code, self.hint)?;

        if self.hint.is_empty() {
            out.push_str("<pre><code>");
        } else {
            out.push_str(&format!(
                r#"<pre><code class="language-{}">"#,
                escape(self.hint, true)
            ));
        }
        out.push_str(&language_label(highlighted.label()));
        out.push_str(&highlighted.html);
        out.push_str("</code></pre>\n");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(node: &dyn RenderNode) -> String {
        let mut out = String::new();
        node.render(&mut out).unwrap();
        out
    }

    #[test]
    fn test_heading_anchor() {
        let html = render(&HeadingNode {
            level: HeadingLevel::H2,
            text: "Hello, World!",
            inner_html: "Hello, <em>World</em>!",
        });
        assert_eq!(
            html,
            concat!(
                r##"<a name="hello-world" class="flora-anchor" href="#hello-world">"##,
                "<h2>Hello, <em>World</em>!</h2></a>\n"
            )
        );
    }

    #[test]
    fn test_image_figure() {
        let html = render(&ImageNode {
            url: "http://x/cat.png",
            title: "A \"cat\"",
            alt: "cat",
        });
        assert!(html.starts_with(r#"<div class="m-auto"#));
        assert!(html.contains(
            r#"<img src="http://x/cat.png" alt="cat" title="A &quot;cat&quot;">"#
        ));
        assert!(html.ends_with("</a>cat</div>"));
    }

    #[test]
    fn test_image_without_title() {
        let html = render(&ImageNode {
            url: "a b.png",
            title: "",
            alt: "pic",
        });
        assert!(html.contains(r#"<img src="a%20b.png" alt="pic">"#));
    }

    #[test]
    fn test_image_rejected_url_renders_alt() {
        let node = ImageNode {
            url: "javascript:alert(1)",
            title: "",
            alt: "<oops>",
        };
        assert!(!node.is_figure());
        assert_eq!(render(&node), "&lt;oops&gt;");
    }

    #[test]
    fn test_heading_level_six() {
        let html = render(&HeadingNode {
            level: HeadingLevel::H6,
            text: "Fine print",
            inner_html: "Fine print",
        });
        assert!(html.ends_with("<h6>Fine print</h6></a>\n"));
    }

    #[test]
    fn test_link() {
        let html = render(&LinkNode {
            url: "http://example.com/?a=1&amp;b=2",
            title: "",
            inner_html: "text",
        });
        assert_eq!(
            html,
            r#"<a target="_blank" rel="external" href="http://example.com/?a=1&amp;b=2">text</a>"#
        );
    }

    #[test]
    fn test_link_title_is_verbatim() {
        let html = render(&LinkNode {
            url: "http://example.com",
            title: "it's",
            inner_html: "text",
        });
        assert!(html.contains(r#" title="it's">"#));
    }

    #[test]
    fn test_link_rejected_url_renders_text() {
        let html = render(&LinkNode {
            url: "vbscript:msgbox",
            title: "",
            inner_html: "<em>text</em>",
        });
        assert_eq!(html, "<em>text</em>");
    }

    #[test]
    fn test_code_block_with_hint() {
        let html = render(&CodeBlockNode {
            hint: "rust",
            code: "fn main() {}\n",
        });
        assert!(html.starts_with(r#"<pre><code class="language-rust"><div class="#));
        assert!(html.contains(">Rust</div>"));
        assert!(html.ends_with("</code></pre>\n"));
    }

    #[test]
    fn test_code_block_unknown() {
        let html = render(&CodeBlockNode { hint: "", code: "" });
        assert!(html.starts_with("<pre><code><div"));
        assert!(html.contains(">Unknown</div>"));
    }
}

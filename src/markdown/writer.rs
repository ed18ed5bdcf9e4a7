//! Event stream rewriting.
//!
//! Buffers the events of headings, links, images, code blocks and raw HTML
//! blocks until they close, renders them through [`RenderNode`], and hands the
//! resulting HTML back to pulldown-cmark's writer as a single event.
//! Paragraphs are buffered too, so one that holds only an image figure can be
//! emitted without its `<p>`.

use pulldown_cmark::{CodeBlockKind, CowStr, Event, HeadingLevel, LinkType, Tag, TagEnd, html};

use super::nodes::{CodeBlockNode, HeadingNode, ImageNode, LinkNode, RenderNode};
use super::sanitize::sanitize_fragment;
use crate::error::MarkdownError;

/// Render a parser's events to HTML with the custom node rules applied.
pub fn render_events<'a, I>(events: I) -> Result<String, MarkdownError>
where
    I: IntoIterator<Item = Event<'a>>,
{
    let mut rewriter = Rewriter::default();
    for event in events {
        rewriter.push(event)?;
    }

    let mut html_output = String::new();
    html::push_html(&mut html_output, rewriter.output.into_iter());
    Ok(html_output)
}

#[derive(Debug)]
enum FrameKind<'a> {
    Heading(HeadingLevel),
    Link {
        url: CowStr<'a>,
        title: CowStr<'a>,
    },
    Image {
        url: CowStr<'a>,
        title: CowStr<'a>,
    },
    CodeBlock(String),
    HtmlBlock,
    Paragraph,
}

/// A node whose content is still being collected.
#[derive(Debug)]
struct Frame<'a> {
    kind: FrameKind<'a>,
    /// Inner events, rendered when the node closes
    events: Vec<Event<'a>>,
    /// Plain text seen inside the node (including nested nodes)
    text: String,
    /// Direct children that rendered as block-level figures
    figures: usize,
}

/// A closed node, ready to go back into the event stream.
struct Rendered<'a> {
    event: Event<'a>,
    /// Block-level markup produced from inline syntax (an image figure)
    figure: bool,
}

impl<'a> Frame<'a> {
    fn new(kind: FrameKind<'a>) -> Self {
        Self {
            kind,
            events: Vec::new(),
            text: String::new(),
            figures: 0,
        }
    }

    fn accept(&mut self, event: Event<'a>) {
        match &event {
            Event::Text(text) | Event::Code(text) => self.text.push_str(text),
            Event::Html(html) if matches!(self.kind, FrameKind::HtmlBlock) => {
                self.text.push_str(html)
            }
            Event::SoftBreak | Event::HardBreak => self.text.push(' '),
            _ => {}
        }
        self.events.push(event);
    }

    fn inner_html(&self) -> String {
        let mut inner = String::new();
        html::push_html(&mut inner, self.events.iter().cloned());
        inner
    }

    /// Render the finished node as raw HTML events.
    fn finish(self) -> Result<Vec<Rendered<'a>>, MarkdownError> {
        let mut out = String::new();
        let mut figure = false;
        let event: fn(CowStr<'a>) -> Event<'a> = match &self.kind {
            FrameKind::Paragraph => return Ok(self.finish_paragraph()),
            FrameKind::Heading(level) => {
                let inner_html = self.inner_html();
                HeadingNode {
                    level: *level,
                    text: &self.text,
                    inner_html: &inner_html,
                }
                .render(&mut out)?;
                Event::Html
            }
            FrameKind::Link { url, title } => {
                let inner_html = self.inner_html();
                LinkNode {
                    url,
                    title,
                    inner_html: &inner_html,
                }
                .render(&mut out)?;
                Event::InlineHtml
            }
            FrameKind::Image { url, title } => {
                let node = ImageNode {
                    url,
                    title,
                    alt: &self.text,
                };
                node.render(&mut out)?;
                figure = node.is_figure();
                Event::InlineHtml
            }
            FrameKind::CodeBlock(hint) => {
                CodeBlockNode {
                    hint,
                    code: &self.text,
                }
                .render(&mut out)?;
                Event::Html
            }
            FrameKind::HtmlBlock => {
                out.push_str(&sanitize_fragment(&self.text));
                out.push('\n');
                Event::Html
            }
        };
        Ok(vec![Rendered {
            event: event(out.into()),
            figure,
        }])
    }

    /// A paragraph holding nothing but one figure is replaced by the figure;
    /// any other paragraph is replayed as-is.
    fn finish_paragraph(self) -> Vec<Rendered<'a>> {
        let plain = |event| Rendered {
            event,
            figure: false,
        };

        if self.figures == 1 && self.events.len() == 1 {
            return self
                .events
                .into_iter()
                .map(|event| match event {
                    Event::InlineHtml(html) | Event::Html(html) => {
                        plain(Event::Html(format!("{html}\n").into()))
                    }
                    event => plain(event),
                })
                .collect();
        }

        std::iter::once(Event::Start(Tag::Paragraph))
            .chain(self.events)
            .chain(std::iter::once(Event::End(TagEnd::Paragraph)))
            .map(plain)
            .collect()
    }
}

#[derive(Debug, Default)]
struct Rewriter<'a> {
    frames: Vec<Frame<'a>>,
    /// Events ready for the HTML writer
    output: Vec<Event<'a>>,
}

impl<'a> Rewriter<'a> {
    /// Feed one parser event.
    fn push(&mut self, event: Event<'a>) -> Result<(), MarkdownError> {
        match event {
            Event::Start(Tag::Paragraph) => self.open(FrameKind::Paragraph),
            Event::Start(Tag::Heading { level, .. }) => self.open(FrameKind::Heading(level)),
            Event::Start(Tag::Link {
                link_type,
                dest_url,
                title,
                ..
            }) => {
                let url = match link_type {
                    LinkType::Email => format!("mailto:{dest_url}").into(),
                    _ => dest_url,
                };
                self.open(FrameKind::Link { url, title })
            }
            Event::Start(Tag::Image {
                dest_url, title, ..
            }) => self.open(FrameKind::Image {
                url: dest_url,
                title,
            }),
            Event::Start(Tag::CodeBlock(kind)) => {
                let hint = match kind {
                    CodeBlockKind::Fenced(info) => {
                        info.split_whitespace().next().unwrap_or_default().to_string()
                    }
                    CodeBlockKind::Indented => String::new(),
                };
                self.open(FrameKind::CodeBlock(hint))
            }
            Event::Start(Tag::HtmlBlock) => self.open(FrameKind::HtmlBlock),
            Event::End(
                TagEnd::Paragraph
                | TagEnd::Heading(_)
                | TagEnd::Link
                | TagEnd::Image
                | TagEnd::CodeBlock
                | TagEnd::HtmlBlock,
            ) => match self.frames.pop() {
                Some(frame) => {
                    let text = frame.text.clone();
                    let rendered = frame.finish()?;
                    if let Some(parent) = self.frames.last_mut() {
                        parent.text.push_str(&text);
                    }
                    for Rendered { event, figure } in rendered {
                        if figure && let Some(parent) = self.frames.last_mut() {
                            parent.figures += 1;
                        }
                        self.emit(event);
                    }
                }
                None => self.emit(event),
            },
            event => self.emit(event),
        }
        Ok(())
    }

    fn open(&mut self, kind: FrameKind<'a>) {
        self.frames.push(Frame::new(kind));
    }

    /// Route an event into the innermost open node, or out to the writer.
    fn emit(&mut self, event: Event<'a>) {
        match self.frames.last_mut() {
            Some(frame) => frame.accept(event),
            None => self.output.push(event),
        }
    }
}

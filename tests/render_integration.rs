//! End-to-end rendering tests.

use flora_markdown::{MarkdownResult, clean_url, escape, to_html};
use proptest::prelude::*;

fn content(markdown: &str) -> String {
    let result = to_html(markdown);
    assert_eq!(result.error, None, "unexpected error for {markdown:?}");
    result.content.expect("content is set when error is not")
}

#[test]
fn test_title_and_link() {
    let html = content("# Title\n\n[link](http://example.com)");
    assert!(html.contains(r##"<a name="title" class="flora-anchor" href="#title"><h1>Title</h1></a>"##));
    assert!(html.contains(r#"<a target="_blank" rel="external" href="http://example.com">link</a>"#));
}

#[test]
fn test_plain_text_is_preserved() {
    for text in ["hello world", "just some words 123", "Ünïcödé text"] {
        let html = content(text);
        assert!(html.contains(text), "{html:?} should contain {text:?}");
    }
}

#[test]
fn test_script_payloads_removed() {
    let payloads = [
        "<script>alert(1)</script>",
        "inline <script>alert(1)</script> script",
        "<img src=x onerror=alert(1)>",
        "[click](javascript:alert(1))",
        "![img](javascript:alert(1))",
        "<a href=\"javascript:alert(1)\">x</a>",
        "```html\n<script>alert(1)</script>\n```",
        "<div>\n<script>alert(1)</script>\n</div>",
        "[x](http://example.com \"a\\\" onmouseover=\\\"alert(1)\")",
    ];
    for payload in payloads {
        let html = content(payload);
        assert!(!html.contains("<script"), "{payload:?} -> {html:?}");
        assert!(!html.contains("onerror"), "{payload:?} -> {html:?}");
        assert!(!html.contains("onmouseover"), "{payload:?} -> {html:?}");
        assert!(!html.contains("javascript:"), "{payload:?} -> {html:?}");
    }
}

#[test]
fn test_rejected_link_degrades_to_text() {
    let html = content("[click me](javascript:alert(1))");
    assert!(html.contains("click me"));
    assert!(!html.contains("<a"));
}

#[test]
fn test_rejected_image_degrades_to_alt() {
    let html = content("![a kitten](vbscript:msgbox)");
    assert!(html.contains("a kitten"));
    assert!(!html.contains("<img"));
}

#[test]
fn test_image_figure() {
    let html = content("![a kitten](http://example.com/kitten.png \"Cute\")");
    assert!(html.contains(r#"<img src="http://example.com/kitten.png" alt="a kitten" title="Cute">"#));
    assert!(html.contains(r#"target="_blank""#));
    assert!(html.contains("a kitten</div>"));
}

#[test]
fn test_lone_image_has_no_empty_paragraphs() {
    let html = content("![a kitten](http://example.com/kitten.png)\n\nAfter the kitten.");
    assert!(html.starts_with("<div class="));
    assert!(!html.contains("<p></p>"));
    assert!(!html.contains("<p><div"));
    assert!(html.contains("<p>After the kitten.</p>"));
}

#[test]
fn test_data_image_falls_back_to_alt() {
    let html = content("![pic](data:image/png;base64,AAAA)");
    assert!(html.contains("pic"));
    assert!(!html.contains("<img"));
    assert!(!html.contains("data:"));
}

#[test]
fn test_deepest_heading_level() {
    let html = content("###### Deep");
    assert!(html.contains(r##"<a name="deep" class="flora-anchor" href="#deep"><h6>Deep</h6></a>"##));
}

#[test]
fn test_setext_headings() {
    let html = content("Setext\n======\n\nSub\n---\n");
    assert!(html.contains(r##"href="#setext"><h1>Setext</h1></a>"##));
    assert!(html.contains(r##"href="#sub"><h2>Sub</h2></a>"##));
}

#[test]
fn test_code_block_label_and_highlight() {
    let html = content("```rust\nfn main() {\n    println!(\"hi\");\n}\n```\n");
    assert!(html.contains(r#"<pre><code class="language-rust">"#));
    assert!(html.contains(">Rust</div>"));
    assert!(html.contains(r#"<span class="hl-"#));
}

#[test]
fn test_code_block_without_hint_gets_label() {
    let html = content("```\n#!/bin/sh\necho hi\n```\n");
    assert!(html.contains("<pre><code><div"));
    assert!(!html.contains(">Unknown</div>"));
}

#[test]
fn test_code_block_content_is_escaped() {
    let html = content("```\n<b>not bold</b>\n```\n");
    assert!(!html.contains("<b>"));
    assert!(html.contains("&lt;"));
}

#[test]
fn test_emoji_substitution() {
    let html = content("Great job :tada:");
    assert!(html.contains("Great job 🎉"));
}

#[test]
fn test_heading_anchor_with_punctuation() {
    let html = content("## Hello, World!");
    assert!(html.contains(r##"href="#hello-world""##));
}

#[test]
fn test_url_percent_encoding_in_link() {
    let html = content("[x](<http://example.com/a b>)");
    assert!(html.contains(r#"href="http://example.com/a%20b""#));
}

#[test]
fn test_escape_and_clean_url_exports() {
    assert_eq!(escape("<a>&amp;", true), "&lt;a&gt;&amp;amp;");
    assert_eq!(escape("<a>&amp;", false), "&lt;a&gt;&amp;");
    assert_eq!(clean_url(None), None);
    assert_eq!(clean_url(Some("http://x/%25")).as_deref(), Some("http://x/%"));
}

#[test]
fn test_malformed_markdown_still_renders() {
    let inputs = [
        "",
        "[[[[[[[[",
        "```",
        "> > > > > > > > > > > > >",
        "* * * *\n- - -\n1. 2. 3.",
        "| a |\n|---|\n| b | c | d |",
        "![](",
        "<div><span></div>",
        "[^1]\n\n[^1]: footnote",
    ];
    for input in inputs {
        let result = to_html(input);
        assert!(result.content.is_some(), "{input:?} -> {result:?}");
        assert_eq!(result.error, None);
    }
}

#[test]
fn test_result_has_exactly_one_field() {
    let MarkdownResult { content, error } = to_html("anything");
    assert!(content.is_some() != error.is_some());
}

proptest! {
    #[test]
    fn prop_to_html_never_panics(input in "\\PC*") {
        let result = to_html(&input);
        prop_assert!(result.content.is_some() != result.error.is_some());
    }

    #[test]
    fn prop_no_script_survives(prefix in "[a-z #*_\\[\\]()\n]{0,20}", suffix in "[a-z #*_\\[\\]()\n]{0,20}") {
        let input = format!("{prefix}<script>alert(1)</script>{suffix}");
        let html = to_html(&input).content.unwrap_or_default();
        prop_assert!(!html.contains("<script"));
    }

    #[test]
    fn prop_plain_words_preserved(words in "[a-zA-Z0-9]{1,12}( [a-zA-Z0-9]{1,12}){0,6}") {
        let html = to_html(&words).content.unwrap_or_default();
        prop_assert!(html.contains(&words));
    }
}

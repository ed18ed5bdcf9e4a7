//! Syntax highlighting for fenced code blocks.
//!
//! Uses syntect's bundled grammars and emits class-based markup
//! (`<span class="hl-keyword">`), so colors come from a stylesheet and the
//! output survives sanitization.

use std::sync::LazyLock;

use syntect::html::{ClassStyle, ClassedHTMLGenerator};
use syntect::parsing::{ParseState, ScopeStackOp, SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;

use crate::config::{
    AUTO_DETECT_CANDIDATES, AUTO_DETECT_MAX_LINES, HIGHLIGHT_CLASS_PREFIX, INVALID_SCOPE_PENALTY,
    LANGUAGE_LABEL_CLASS, RELEVANT_SCOPE_PREFIXES, UNKNOWN_LANGUAGE,
};
use crate::error::MarkdownError;
use crate::utils::escape;

static SYNTAX_SET: LazyLock<SyntaxSet> = LazyLock::new(SyntaxSet::load_defaults_newlines);

/// A highlighted code snippet.
#[derive(Debug, Clone, PartialEq)]
pub struct Highlighted {
    /// Language used for highlighting; `None` when detection found nothing
    pub language: Option<String>,
    /// Highlighted HTML body (no `<pre>`/`<code>` wrapper)
    pub html: String,
}

impl Highlighted {
    /// Name shown above the code block.
    pub fn label(&self) -> &str {
        self.language.as_deref().unwrap_or(UNKNOWN_LANGUAGE)
    }
}

/// Highlight `code` using the language `hint` from the code fence.
///
/// An empty or unknown hint falls back to [`detect_language`].
pub fn highlight_code(code: &str, hint: &str) -> Result<Highlighted, MarkdownError> {
    let ss = &*SYNTAX_SET;

    if !hint.is_empty()
        && let Some(syntax) = ss.find_syntax_by_token(hint)
    {
        return Ok(Highlighted {
            language: Some(hint.to_string()),
            html: highlight_with(syntax, code)?,
        });
    }

    match detect_language(code) {
        Some(syntax) => {
            tracing::trace!(language = %syntax.name, %hint, "detected code block language");
            Ok(Highlighted {
                language: Some(syntax.name.clone()),
                html: highlight_with(syntax, code)?,
            })
        }
        None => Ok(Highlighted {
            language: None,
            html: escape(code, true).into_owned(),
        }),
    }
}

/// Guess the grammar for an unlabeled snippet.
///
/// A recognizable first line (shebang, `<?xml`, modelines) decides outright.
/// Otherwise every candidate grammar is scored by how many meaningful scopes
/// it finds; the best positive score wins.
pub fn detect_language(code: &str) -> Option<&'static SyntaxReference> {
    let ss = &*SYNTAX_SET;

    if let Some(first_line) = code.lines().next()
        && let Some(syntax) = ss.find_syntax_by_first_line(first_line)
    {
        return Some(syntax);
    }

    let mut best: Option<(&SyntaxReference, i64)> = None;
    for token in AUTO_DETECT_CANDIDATES {
        let Some(syntax) = ss.find_syntax_by_token(token) else {
            continue;
        };
        let Some(score) = relevance(syntax, code) else {
            continue;
        };
        if score > 0 && best.is_none_or(|(_, top)| score > top) {
            best = Some((syntax, score));
        }
    }
    best.map(|(syntax, _)| syntax)
}

/// Relevance of `syntax` for `code`, or `None` if the grammar fails to parse it.
fn relevance(syntax: &SyntaxReference, code: &str) -> Option<i64> {
    let mut state = ParseState::new(syntax);
    let mut score = 0;

    for line in LinesWithEndings::from(code).take(AUTO_DETECT_MAX_LINES) {
        let ops = state.parse_line(line, &SYNTAX_SET).ok()?;
        for (_, op) in ops {
            let ScopeStackOp::Push(scope) = op else {
                continue;
            };
            let name = scope.build_string();
            if name.starts_with("invalid") {
                score -= INVALID_SCOPE_PENALTY;
            } else if RELEVANT_SCOPE_PREFIXES
                .iter()
                .any(|prefix| name.starts_with(prefix))
            {
                score += 1;
            }
        }
    }
    Some(score)
}

fn highlight_with(syntax: &SyntaxReference, code: &str) -> Result<String, MarkdownError> {
    let mut generator = ClassedHTMLGenerator::new_with_class_style(
        syntax,
        &SYNTAX_SET,
        ClassStyle::SpacedPrefixed {
            prefix: HIGHLIGHT_CLASS_PREFIX,
        },
    );
    for line in LinesWithEndings::from(code) {
        generator.parse_html_for_line_which_includes_newline(line)?;
    }
    Ok(generator.finalize())
}

/// Caption shown above a code block, e.g. `Rust`.
pub fn language_label(language: &str) -> String {
    let mut chars = language.chars();
    let display: String = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    };
    format!(
        r#"<div class="{LANGUAGE_LABEL_CLASS}">{}</div>"#,
        escape(&display, true)
    )
}

//! Renderer configuration.
//!
//! Centralizes the constants that shape the generated markup: CSS classes,
//! highlighting limits and the sanitizer allowlists.

// =============================================================================
// Markup Classes
// =============================================================================

/// Class on the self-link wrapped around every heading.
pub const ANCHOR_CLASS: &str = "flora-anchor";

/// Classes on the container that captions an image.
pub const FIGURE_CLASS: &str = "m-auto flex flex-col gap-1 pb-2 text-sm text-slate-400 text-center";

/// Class on the link that lets readers open an image at full size.
pub const FIGURE_LINK_CLASS: &str = "hover:cursor-zoom-in";

/// Classes on the language label above a code block.
pub const LANGUAGE_LABEL_CLASS: &str = "pb-2 text-xs text-slate-400 select-none";

// =============================================================================
// Syntax Highlighting
// =============================================================================

/// Prefix for the token classes emitted by the highlighter (`hl-keyword`, ...).
pub const HIGHLIGHT_CLASS_PREFIX: &str = "hl-";

/// Label used when a code block has no usable hint and detection fails.
pub const UNKNOWN_LANGUAGE: &str = "unknown";

/// Grammars tried, in order, when guessing the language of a code block.
/// Earlier entries win ties.
pub const AUTO_DETECT_CANDIDATES: &[&str] = &[
    "rs", "py", "js", "ts", "go", "java", "c", "cpp", "cs", "rb", "php", "sh", "sql", "html",
    "css", "json", "yaml", "xml", "lua", "hs",
];

/// Only the first lines of a snippet are scored during detection.
pub const AUTO_DETECT_MAX_LINES: usize = 200;

/// Scope prefixes that count towards a grammar's relevance score.
pub const RELEVANT_SCOPE_PREFIXES: &[&str] = &[
    "keyword",
    "storage",
    "entity.name",
    "support",
    "constant.language",
    "variable.language",
    "meta.tag",
];

/// Weight of an `invalid.*` scope in the relevance score.
pub const INVALID_SCOPE_PENALTY: i64 = 3;

// =============================================================================
// Sanitization
// =============================================================================

/// Tags allowed on top of the sanitizer's defaults.
pub const EXTRA_ALLOWED_TAGS: &[&str] = &["figure", "figcaption", "input", "mark", "section"];

/// Attributes allowed on every tag.
pub const GENERIC_ATTRIBUTES: &[&str] = &["class", "id", "title", "lang", "dir"];

/// Per-tag attributes allowed on top of the sanitizer's defaults.
pub const TAG_ATTRIBUTES: &[(&str, &[&str])] = &[
    ("a", &["name", "rel"]),
    ("img", &["loading"]),
    ("input", &["type", "checked", "disabled"]),
    ("ol", &["start"]),
    ("th", &["align"]),
    ("td", &["align"]),
];

/// Attribute only the final pass over the assembled document allows.
pub const FINAL_PASS_ATTRIBUTE: &str = "target";

// =============================================================================
// URL Normalization
// =============================================================================

/// Schemes that can execute script; links and images using them are dropped.
pub const BLOCKED_URL_SCHEMES: &[&str] = &["javascript:", "vbscript:", "data:"];

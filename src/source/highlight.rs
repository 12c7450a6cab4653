//! Toy per-language token classifier for the code pane
//!
//! Purely cosmetic: classifies fragments of a source line so the presentation
//! layer can color them. Classification is a fixed word-list lookup, not a real
//! lexer, and has no bearing on playback correctness.

use super::SdkLanguage;
use serde::Serialize;

/// Display class of one fragment of a source line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Keyword,
    Type,
    StringLit,
    Activity,
    Function,
    Comment,
    Decorator,
    Plain,
}

/// One classified fragment; fragments concatenate back to the input line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Span<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
}

const ACTIVITY_NAMES: &[&str] = &[
    "chargeCard",
    "reserveInventory",
    "shipOrder",
    "ChargeCard",
    "ReserveInventory",
    "ShipOrder",
    "charge_card",
    "reserve_inventory",
    "ship_order",
];

const FUNCTION_NAMES: &[&str] = &[
    "proxyActivities",
    "CheckoutWorkflow",
    "CheckoutWorkflowImpl",
    "execute_activity",
    "ExecuteActivity",
    "WithActivityOptions",
    "newActivityStub",
    "newBuilder",
    "setStartToCloseTimeout",
    "workflow",
];

fn keywords(language: SdkLanguage) -> &'static [&'static str] {
    match language {
        SdkLanguage::TypeScript => &[
            "import", "from", "const", "export", "async", "function", "await", "return",
        ],
        SdkLanguage::Go => &[
            "package", "import", "func", "var", "err", "ctx", "return", "if", "nil",
        ],
        SdkLanguage::Python => &[
            "from", "import", "class", "def", "async", "await", "self", "return",
        ],
        SdkLanguage::Java => &[
            "import", "public", "private", "class", "return", "new", "final",
        ],
    }
}

fn types(language: SdkLanguage) -> &'static [&'static str] {
    match language {
        SdkLanguage::TypeScript => &["Promise", "string", "void"],
        SdkLanguage::Go => &["string", "error", "Context"],
        SdkLanguage::Python => &["str", "dict", "timedelta"],
        SdkLanguage::Java => &["String", "Duration", "void"],
    }
}

/// Classify one source line into display spans.
///
/// Full-line comments and decorators are recognized first; otherwise the line
/// splits into words, whitespace runs, and single punctuation characters, and
/// each word is classified against the per-language word lists.
pub fn classify_line(text: &str, language: SdkLanguage) -> Vec<Span<'_>> {
    if text.is_empty() {
        return Vec::new();
    }

    let trimmed = text.trim_start();
    let comment_marker = match language {
        SdkLanguage::Python => "#",
        SdkLanguage::TypeScript | SdkLanguage::Go | SdkLanguage::Java => "//",
    };
    if trimmed.starts_with(comment_marker) {
        return vec![Span {
            kind: TokenKind::Comment,
            text,
        }];
    }

    if matches!(language, SdkLanguage::Python | SdkLanguage::Java) && trimmed.starts_with('@') {
        return vec![Span {
            kind: TokenKind::Decorator,
            text,
        }];
    }

    split_fragments(text)
        .into_iter()
        .map(|fragment| Span {
            kind: classify_fragment(fragment, language),
            text: fragment,
        })
        .collect()
}

fn classify_fragment(fragment: &str, language: SdkLanguage) -> TokenKind {
    if keywords(language).contains(&fragment) {
        TokenKind::Keyword
    } else if types(language).contains(&fragment) {
        TokenKind::Type
    } else if fragment.starts_with('\'') || fragment.starts_with('"') {
        TokenKind::StringLit
    } else if ACTIVITY_NAMES.contains(&fragment) {
        TokenKind::Activity
    } else if FUNCTION_NAMES.contains(&fragment) {
        TokenKind::Function
    } else {
        TokenKind::Plain
    }
}

fn is_punct(c: char) -> bool {
    matches!(
        c,
        '{' | '}'
            | '('
            | ')'
            | '<'
            | '>'
            | ':'
            | ';'
            | ','
            | '.'
            | '\''
            | '"'
            | '['
            | ']'
            | '&'
    )
}

/// Split into word runs, whitespace runs, and single punctuation characters.
fn split_fragments(text: &str) -> Vec<&str> {
    let mut fragments = Vec::new();
    let mut start = 0;
    let mut in_whitespace = false;

    for (offset, c) in text.char_indices() {
        if is_punct(c) {
            if start < offset {
                fragments.push(&text[start..offset]);
            }
            fragments.push(&text[offset..offset + c.len_utf8()]);
            start = offset + c.len_utf8();
            in_whitespace = false;
        } else if c.is_whitespace() != in_whitespace {
            if start < offset {
                fragments.push(&text[start..offset]);
            }
            start = offset;
            in_whitespace = c.is_whitespace();
        }
    }
    if start < text.len() {
        fragments.push(&text[start..]);
    }

    fragments
}

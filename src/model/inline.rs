//! Inline emphasis markup inside block text.
//!
//! Block text marks emphasis with tags (`<b>…</b>`, `<i>…</i>`). Anything
//! else, asterisks included, is literal text.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// A run of text with uniform emphasis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextRun {
    /// The text content
    pub text: String,

    /// Bold text
    pub bold: bool,

    /// Italic text
    pub italic: bool,
}

impl TextRun {
    /// Create a plain run.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: false,
            italic: false,
        }
    }

    /// Create a bold run.
    pub fn bold(text: impl Into<String>) -> Self {
        Self {
            bold: true,
            ..Self::new(text)
        }
    }

    /// Create an italic run.
    pub fn italic(text: impl Into<String>) -> Self {
        Self {
            italic: true,
            ..Self::new(text)
        }
    }
}

fn marker_regex() -> &'static Regex {
    static MARKERS: OnceLock<Regex> = OnceLock::new();
    MARKERS.get_or_init(|| Regex::new(r"</?[bi]>").expect("markup pattern is valid"))
}

/// Split `text` into emphasis runs. Adjacent runs never share the same
/// emphasis; empty runs are dropped.
pub fn parse_inline(text: &str) -> Vec<TextRun> {
    let mut runs: Vec<TextRun> = Vec::new();
    let mut bold = false;
    let mut italic = false;
    let mut last = 0;

    for m in marker_regex().find_iter(text) {
        push_run(&mut runs, &text[last..m.start()], bold, italic);
        last = m.end();
        match m.as_str() {
            "<b>" => bold = true,
            "</b>" => bold = false,
            "<i>" => italic = true,
            _ => italic = false,
        }
    }

    push_run(&mut runs, &text[last..], bold, italic);
    runs
}

fn push_run(runs: &mut Vec<TextRun>, piece: &str, bold: bool, italic: bool) {
    if piece.is_empty() {
        return;
    }
    match runs.last_mut() {
        Some(prev) if prev.bold == bold && prev.italic == italic => prev.text.push_str(piece),
        _ => runs.push(TextRun {
            text: piece.to_string(),
            bold,
            italic,
        }),
    }
}

/// Text with all tags removed.
pub fn strip_markup(text: &str) -> String {
    parse_inline(text).into_iter().map(|run| run.text).collect()
}

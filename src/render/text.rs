//! Plain text view of a document.

use crate::layout::BULLET;
use crate::model::{strip_markup, Block, Document};

/// Render the block sequence as plain text.
///
/// Headings are underlined, bullet items get the bullet glyph and verbatim
/// blocks are indented by four spaces. Spacers become blank lines.
pub fn to_text(doc: &Document) -> String {
    let mut parts: Vec<String> = Vec::with_capacity(doc.len());

    for block in doc.blocks() {
        let part = match block {
            Block::Heading { text, .. } => {
                let text = strip_markup(text);
                let rule = "-".repeat(text.chars().count());
                format!("{text}\n{rule}")
            }
            Block::Paragraph { text, .. } => strip_markup(text),
            Block::BulletList { items, .. } => items
                .iter()
                .map(|item| format!("{BULLET} {}", strip_markup(item)))
                .collect::<Vec<_>>()
                .join("\n"),
            Block::Preformatted { text, .. } => text
                .trim_end_matches('\n')
                .lines()
                .map(|line| format!("    {line}").trim_end().to_string())
                .collect::<Vec<_>>()
                .join("\n"),
            Block::Spacer { .. } => continue,
        };
        parts.push(part);
    }

    parts.join("\n\n")
}

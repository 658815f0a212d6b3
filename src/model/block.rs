//! Content blocks: the units the layout engine positions and paginates.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::inline::strip_markup;

/// A unit of document content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Block {
    /// A section heading
    Heading {
        /// Heading text, may contain emphasis markup
        text: String,
        /// Style name
        style: String,
    },

    /// A paragraph of flowing text
    Paragraph {
        /// Paragraph text, may contain emphasis markup
        text: String,
        /// Style name
        style: String,
    },

    /// A bulleted list; items render in order
    BulletList {
        /// Item texts, may contain emphasis markup
        items: Vec<String>,
        /// Style name applied to every item
        style: String,
    },

    /// Verbatim text with preserved whitespace and line breaks
    Preformatted {
        /// Literal text
        text: String,
        /// Style name
        style: String,
    },

    /// Vertical whitespace
    Spacer {
        /// Height in points
        height: f32,
    },
}

impl Block {
    /// The payload-free tag of this block.
    pub fn kind(&self) -> BlockKind {
        match self {
            Block::Heading { .. } => BlockKind::Heading,
            Block::Paragraph { .. } => BlockKind::Paragraph,
            Block::BulletList { .. } => BlockKind::BulletList,
            Block::Preformatted { .. } => BlockKind::Preformatted,
            Block::Spacer { .. } => BlockKind::Spacer,
        }
    }

    /// Style name, if the block carries text.
    pub fn style_name(&self) -> Option<&str> {
        match self {
            Block::Heading { style, .. }
            | Block::Paragraph { style, .. }
            | Block::BulletList { style, .. }
            | Block::Preformatted { style, .. } => Some(style),
            Block::Spacer { .. } => None,
        }
    }

    /// Text content with emphasis markup removed. Bullet items are joined
    /// by newlines; preformatted text is returned verbatim.
    pub fn plain_text(&self) -> String {
        match self {
            Block::Heading { text, .. } | Block::Paragraph { text, .. } => strip_markup(text),
            Block::BulletList { items, .. } => items
                .iter()
                .map(|item| strip_markup(item))
                .collect::<Vec<_>>()
                .join("\n"),
            Block::Preformatted { text, .. } => text.clone(),
            Block::Spacer { .. } => String::new(),
        }
    }

    /// Check if this is a heading.
    pub fn is_heading(&self) -> bool {
        matches!(self, Block::Heading { .. })
    }
}

/// Kind of a [`Block`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockKind {
    Heading,
    Paragraph,
    BulletList,
    Preformatted,
    Spacer,
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BlockKind::Heading => "heading",
            BlockKind::Paragraph => "paragraph",
            BlockKind::BulletList => "bullet list",
            BlockKind::Preformatted => "preformatted",
            BlockKind::Spacer => "spacer",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_kind() {
        let block = Block::Spacer { height: 12.0 };
        assert_eq!(block.kind(), BlockKind::Spacer);
        assert_eq!(block.style_name(), None);
        assert_eq!(block.plain_text(), "");
    }

    #[test]
    fn test_plain_text_strips_markup() {
        let block = Block::Paragraph {
            text: "<b>Fact:</b> Financials_Table".to_string(),
            style: "Body".to_string(),
        };
        assert_eq!(block.plain_text(), "Fact: Financials_Table");
        assert_eq!(block.style_name(), Some("Body"));
    }

    #[test]
    fn test_preformatted_is_verbatim() {
        let text = "Total Sales    = SUM(Financials_Table[Sales])\n  *not emphasis*";
        let block = Block::Preformatted {
            text: text.to_string(),
            style: "Mono".to_string(),
        };
        assert_eq!(block.plain_text(), text);
    }

    #[test]
    fn test_bullet_list_plain_text() {
        let block = Block::BulletList {
            items: vec!["first".to_string(), "<b>second</b>".to_string()],
            style: "Body".to_string(),
        };
        assert_eq!(block.plain_text(), "first\nsecond");
    }

    #[test]
    fn test_block_serializes_with_kind_tag() {
        let block = Block::Heading {
            text: "Results".to_string(),
            style: "H2".to_string(),
        };
        let json = serde_json::to_string(&block).unwrap();
        assert!(json.contains("\"kind\":\"heading\""));
        assert!(json.contains("\"Results\""));
    }
}

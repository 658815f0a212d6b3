//! Document-level types and the report builder.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{Block, StyleSheet};
use crate::error::Result;
use crate::render::{self, RenderOptions};

/// Lifecycle of a [`Document`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentState {
    /// Blocks may be appended
    #[default]
    Building,
    /// An artifact has been produced; later appends do not affect it
    Rendered,
}

/// Style names the builder attaches to each kind of content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleRoles {
    pub title: String,
    pub heading: String,
    pub body: String,
    pub mono: String,
}

impl Default for StyleRoles {
    fn default() -> Self {
        Self {
            title: "Title".to_string(),
            heading: "Heading2".to_string(),
            body: "BodyText".to_string(),
            mono: "Code".to_string(),
        }
    }
}

/// Document metadata written to the PDF info dictionary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    /// Document title
    pub title: Option<String>,

    /// Document author
    pub author: Option<String>,

    /// Document subject
    pub subject: Option<String>,

    /// Keywords
    pub keywords: Option<String>,

    /// Creator application
    pub creator: Option<String>,
}

/// An ordered sequence of content blocks plus the styles they refer to.
///
/// Blocks are only ever appended; their order is the vertical order on the
/// rendered pages.
///
/// # Example
///
/// ```no_run
/// use pqreport::{Document, StyleSheet};
///
/// let mut doc = Document::new(StyleSheet::base());
/// doc.append_title("Quarterly summary")
///     .append_section("Scope", "Only <b>cleaned</b> rows are counted.")
///     .append_bullet_list(["first", "second"])
///     .append_preformatted("Total = SUM(Sales)");
/// let path = doc.render("summary.pdf")?;
/// # Ok::<(), pqreport::Error>(())
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Document metadata
    pub metadata: Metadata,

    styles: StyleSheet,
    roles: StyleRoles,
    blocks: Vec<Block>,
    state: DocumentState,
}

impl Document {
    /// Create an empty document using `styles` and the default roles.
    pub fn new(styles: StyleSheet) -> Self {
        Self::with_roles(styles, StyleRoles::default())
    }

    /// Create an empty document with explicit style roles.
    pub fn with_roles(styles: StyleSheet, roles: StyleRoles) -> Self {
        Self {
            metadata: Metadata::default(),
            styles,
            roles,
            blocks: Vec::new(),
            state: DocumentState::Building,
        }
    }

    /// Set the metadata.
    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// Append a block as-is.
    pub fn push(&mut self, block: Block) -> &mut Self {
        if self.state == DocumentState::Rendered {
            log::warn!(
                "appending a {} to an already rendered document",
                block.kind()
            );
        }
        self.blocks.push(block);
        self
    }

    /// Append the document title (a paragraph in the title style).
    pub fn append_title(&mut self, text: impl Into<String>) -> &mut Self {
        let style = self.roles.title.clone();
        self.push(Block::Paragraph {
            text: text.into(),
            style,
        })
    }

    /// Append a heading.
    pub fn append_heading(&mut self, text: impl Into<String>) -> &mut Self {
        let style = self.roles.heading.clone();
        self.push(Block::Heading {
            text: text.into(),
            style,
        })
    }

    /// Append a body paragraph.
    pub fn append_paragraph(&mut self, text: impl Into<String>) -> &mut Self {
        let style = self.roles.body.clone();
        self.push(Block::Paragraph {
            text: text.into(),
            style,
        })
    }

    /// Append a heading followed by a body paragraph.
    pub fn append_section(
        &mut self,
        title: impl Into<String>,
        body: impl Into<String>,
    ) -> &mut Self {
        self.append_heading(title).append_paragraph(body)
    }

    /// Append one bulleted list with the given items in order.
    pub fn append_bullet_list<I, S>(&mut self, items: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let style = self.roles.body.clone();
        self.push(Block::BulletList {
            items: items.into_iter().map(Into::into).collect(),
            style,
        })
    }

    /// Append verbatim text in the monospace style.
    pub fn append_preformatted(&mut self, text: impl Into<String>) -> &mut Self {
        let style = self.roles.mono.clone();
        self.push(Block::Preformatted {
            text: text.into(),
            style,
        })
    }

    /// Append vertical whitespace.
    pub fn append_spacer(&mut self, height: f32) -> &mut Self {
        self.push(Block::Spacer { height })
    }

    /// Blocks in document order.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// The style sheet.
    pub fn styles(&self) -> &StyleSheet {
        &self.styles
    }

    /// The style roles.
    pub fn roles(&self) -> &StyleRoles {
        &self.roles
    }

    /// Current lifecycle state.
    pub fn state(&self) -> DocumentState {
        self.state
    }

    /// Number of blocks.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Check if the document has no blocks.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Heading texts in document order, markup removed.
    pub fn headings(&self) -> Vec<String> {
        self.blocks
            .iter()
            .filter(|block| block.is_heading())
            .map(Block::plain_text)
            .collect()
    }

    /// Plain text of the whole document, blocks separated by blank lines.
    pub fn plain_text(&self) -> String {
        self.blocks
            .iter()
            .map(Block::plain_text)
            .filter(|text| !text.is_empty())
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Render to `destination` with default options (A4, 36 pt margins).
    ///
    /// Returns the destination path on success.
    pub fn render(&mut self, destination: impl AsRef<Path>) -> Result<PathBuf> {
        self.render_with_options(destination, &RenderOptions::default())
    }

    /// Render to `destination` with explicit options.
    pub fn render_with_options(
        &mut self,
        destination: impl AsRef<Path>,
        options: &RenderOptions,
    ) -> Result<PathBuf> {
        let path = render::render_to_path(self, destination.as_ref(), options)?;
        self.state = DocumentState::Rendered;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BlockKind;

    #[test]
    fn test_document_new() {
        let doc = Document::new(StyleSheet::base());
        assert!(doc.is_empty());
        assert_eq!(doc.state(), DocumentState::Building);
    }

    #[test]
    fn test_append_section_adds_heading_and_paragraph() {
        let mut doc = Document::new(StyleSheet::base());
        doc.append_section("Results", "All rows parse.");

        let kinds: Vec<BlockKind> = doc.blocks().iter().map(Block::kind).collect();
        assert_eq!(kinds, vec![BlockKind::Heading, BlockKind::Paragraph]);
        assert_eq!(doc.blocks()[0].style_name(), Some("Heading2"));
        assert_eq!(doc.blocks()[1].style_name(), Some("BodyText"));
    }

    #[test]
    fn test_append_order_is_preserved() {
        let mut doc = Document::new(StyleSheet::base());
        doc.append_title("Title")
            .append_heading("One")
            .append_bullet_list(["a", "b"])
            .append_preformatted("x  y")
            .append_spacer(12.0)
            .append_heading("Two");

        assert_eq!(doc.len(), 6);
        assert_eq!(doc.headings(), vec!["One", "Two"]);
        assert_eq!(doc.blocks()[2].plain_text(), "a\nb");
        assert_eq!(doc.blocks()[3].style_name(), Some("Code"));
    }

    #[test]
    fn test_custom_roles() {
        let roles = StyleRoles {
            title: "T".to_string(),
            heading: "H".to_string(),
            body: "B".to_string(),
            mono: "M".to_string(),
        };
        let mut doc = Document::with_roles(StyleSheet::new(), roles);
        doc.append_title("x").append_heading("y");
        assert_eq!(doc.blocks()[0].style_name(), Some("T"));
        assert_eq!(doc.blocks()[1].style_name(), Some("H"));
    }

    #[test]
    fn test_plain_text_skips_spacers() {
        let mut doc = Document::new(StyleSheet::base());
        doc.append_paragraph("one").append_spacer(10.0).append_paragraph("two");
        assert_eq!(doc.plain_text(), "one\n\ntwo");
    }
}

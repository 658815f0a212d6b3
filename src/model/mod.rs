//! Document model types for report content.
//!
//! This module defines the format-agnostic representation that the layout
//! engine consumes: named styles, content blocks with inline emphasis, and
//! the document that orders them.

mod block;
mod document;
mod inline;
mod style;

pub use block::{Block, BlockKind};
pub use document::{Document, DocumentState, Metadata, StyleRoles};
pub use inline::{parse_inline, strip_markup, TextRun};
pub use style::{Alignment, Color, FontFamily, Style, StyleSheet};

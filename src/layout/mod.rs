//! Layout engine: turns a block sequence into positioned items on pages.
//!
//! Coordinates are PDF user space: points, origin at the bottom-left
//! corner of the page, y growing upwards.

mod flow;
mod metrics;
mod wrap;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::{Color, Document};

pub use metrics::{BuiltinFont, ASCENT};
pub use wrap::{wrap_runs, wrap_verbatim, Fragment, Line};

/// Horizontal offset of the bullet glyph from the text area.
pub const BULLET_OFFSET: f32 = 6.0;

/// Indent of bullet item text from the text area.
pub const BULLET_INDENT: f32 = 18.0;

/// Bullet glyph drawn before every list item.
pub const BULLET: char = '\u{2022}';

/// Page dimensions in points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageSize {
    pub width: f32,
    pub height: f32,
}

impl PageSize {
    /// ISO A4 (210 x 297 mm).
    pub const A4: PageSize = PageSize {
        width: 595.2756,
        height: 841.8898,
    };

    /// US Letter (8.5 x 11 in).
    pub const LETTER: PageSize = PageSize {
        width: 612.0,
        height: 792.0,
    };
}

/// Page margins in points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Margins {
    /// The same margin on all four sides.
    pub const fn all(value: f32) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }
}

/// Page size plus margins.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageGeometry {
    pub size: PageSize,
    pub margins: Margins,
}

impl PageGeometry {
    pub fn new(size: PageSize, margins: Margins) -> Self {
        Self { size, margins }
    }

    /// Left edge of the frame.
    pub fn frame_left(&self) -> f32 {
        self.margins.left
    }

    /// Right edge of the frame.
    pub fn frame_right(&self) -> f32 {
        self.size.width - self.margins.right
    }

    /// Top edge of the frame.
    pub fn frame_top(&self) -> f32 {
        self.size.height - self.margins.top
    }

    /// Bottom edge of the frame.
    pub fn frame_bottom(&self) -> f32 {
        self.margins.bottom
    }

    pub fn frame_width(&self) -> f32 {
        self.frame_right() - self.frame_left()
    }

    pub fn frame_height(&self) -> f32 {
        self.frame_top() - self.frame_bottom()
    }
}

impl Default for PageGeometry {
    /// A4 with 36 pt on every side.
    fn default() -> Self {
        Self::new(PageSize::A4, Margins::all(36.0))
    }
}

/// A run of text at an absolute position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedRun {
    pub x: f32,
    pub font: BuiltinFont,
    pub size: f32,
    pub color: Color,
    pub text: String,
}

/// One text line; written as a single text object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedLine {
    /// Index of the block this line belongs to
    pub block: usize,
    /// Baseline y coordinate
    pub baseline: f32,
    /// Runs in reading order
    pub runs: Vec<PlacedRun>,
}

impl PlacedLine {
    /// Concatenated text of all runs.
    pub fn text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }
}

/// A filled rectangle (block background).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedRect {
    pub block: usize,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub color: Color,
}

/// Anything drawn on a page, in painting order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PlacedItem {
    Line(PlacedLine),
    Rect(PlacedRect),
}

/// A heading position, used for the document outline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bookmark {
    pub title: String,
    /// Zero-based page index
    pub page: usize,
    /// Top of the heading's first line
    pub top: f32,
}

/// A page with everything placed on it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LaidOutPage {
    /// Page number (1-indexed)
    pub number: u32,
    pub items: Vec<PlacedItem>,
}

impl LaidOutPage {
    fn new(number: u32) -> Self {
        Self {
            number,
            items: Vec::new(),
        }
    }

    /// Text lines on this page, top to bottom.
    pub fn lines(&self) -> impl Iterator<Item = &PlacedLine> {
        self.items.iter().filter_map(|item| match item {
            PlacedItem::Line(line) => Some(line),
            PlacedItem::Rect(_) => None,
        })
    }

    /// Check if nothing was placed on the page.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// The result of laying out a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub geometry: PageGeometry,
    pub pages: Vec<LaidOutPage>,
    pub bookmarks: Vec<Bookmark>,
}

impl Layout {
    /// Number of pages.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Fonts used anywhere in the layout, sorted.
    pub fn fonts(&self) -> Vec<BuiltinFont> {
        let mut fonts: Vec<BuiltinFont> = self
            .pages
            .iter()
            .flat_map(|page| page.lines())
            .flat_map(|line| line.runs.iter().map(|run| run.font))
            .collect();
        fonts.sort();
        fonts.dedup();
        fonts
    }

    /// All text lines in reading order.
    pub fn lines(&self) -> impl Iterator<Item = &PlacedLine> {
        self.pages.iter().flat_map(|page| page.lines())
    }
}

/// Lay out every block of `doc` onto pages of the given geometry.
///
/// Fails with [`crate::Error::Layout`] naming the first block that cannot
/// be measured or paginated.
pub fn layout_document(doc: &Document, geometry: &PageGeometry) -> Result<Layout> {
    flow::Paginator::new(doc, geometry).run()
}

//! Vertical flow and pagination of measured blocks.

use super::{
    wrap_runs, wrap_verbatim, Bookmark, BuiltinFont, LaidOutPage, Layout, Line, PageGeometry,
    PlacedItem, PlacedLine, PlacedRect, PlacedRun, ASCENT, BULLET, BULLET_INDENT, BULLET_OFFSET,
};
use crate::encoding::prepare_text;
use crate::error::{Error, Result};
use crate::model::{parse_inline, Alignment, Block, Document, Style};

/// Tolerance for vertical comparisons, in points.
const EPSILON: f32 = 0.01;

struct MeasuredLine {
    line: Line,
    bullet: bool,
    in_list: bool,
    gap_before: f32,
}

struct Measured<'a> {
    style: &'a Style,
    lines: Vec<MeasuredLine>,
    /// Background padding, zero without a background. The background grows
    /// outwards by this much; the text area is unchanged.
    pad: f32,
    area_left: f32,
    area_right: f32,
}

impl Measured<'_> {
    fn text_left(&self) -> f32 {
        self.area_left
    }

    fn text_right(&self) -> f32 {
        self.area_right
    }

    /// Height of the whole block on an unbroken page.
    fn height(&self) -> f32 {
        let lines: f32 = self
            .lines
            .iter()
            .map(|l| l.gap_before + self.style.leading)
            .sum();
        lines + 2.0 * self.pad + self.style.space_after
    }
}

pub(super) struct Paginator<'a> {
    doc: &'a Document,
    geometry: &'a PageGeometry,
    pages: Vec<LaidOutPage>,
    current: LaidOutPage,
    cursor: f32,
    bookmarks: Vec<Bookmark>,
}

impl<'a> Paginator<'a> {
    pub(super) fn new(doc: &'a Document, geometry: &'a PageGeometry) -> Self {
        Self {
            doc,
            geometry,
            pages: Vec::new(),
            current: LaidOutPage::new(1),
            cursor: geometry.frame_top(),
            bookmarks: Vec::new(),
        }
    }

    pub(super) fn run(mut self) -> Result<Layout> {
        let doc = self.doc;
        let blocks = doc.blocks();

        for (index, block) in blocks.iter().enumerate() {
            match block {
                Block::Spacer { height } => self.place_spacer(index, block, *height)?,
                _ => {
                    let measured = self.measure(index, block)?;
                    let keep = if measured.style.keep_with_next {
                        self.lead_in(blocks.get(index + 1))
                    } else {
                        0.0
                    };
                    self.place(index, block, &measured, keep);
                }
            }
        }

        if !self.current.is_empty() || self.pages.is_empty() {
            self.pages.push(self.current);
        }

        log::debug!(
            "laid out {} blocks on {} page(s)",
            blocks.len(),
            self.pages.len()
        );

        Ok(Layout {
            geometry: *self.geometry,
            pages: self.pages,
            bookmarks: self.bookmarks,
        })
    }

    fn at_top(&self) -> bool {
        self.cursor >= self.geometry.frame_top() - EPSILON
    }

    fn fits(&self, height: f32) -> bool {
        self.cursor - height >= self.geometry.frame_bottom() - EPSILON
    }

    fn new_page(&mut self) {
        let number = self.current.number + 1;
        let finished = std::mem::replace(&mut self.current, LaidOutPage::new(number));
        log::debug!(
            "page {} full ({} items)",
            finished.number,
            finished.items.len()
        );
        self.pages.push(finished);
        self.cursor = self.geometry.frame_top();
    }

    fn place_spacer(&mut self, index: usize, block: &Block, height: f32) -> Result<()> {
        if !height.is_finite() || height < 0.0 {
            return Err(Error::layout(
                index,
                block.kind(),
                format!("invalid spacer height {height}"),
            ));
        }
        if self.at_top() {
            return Ok(());
        }
        if self.fits(height) {
            self.cursor -= height;
        } else {
            self.new_page();
        }
        Ok(())
    }

    /// Height the next block needs before its first line can be placed.
    fn lead_in(&self, next: Option<&Block>) -> f32 {
        let Some(style) = next
            .and_then(Block::style_name)
            .and_then(|name| self.doc.styles().get(name))
        else {
            return 0.0;
        };
        let pad = if style.background.is_some() {
            style.border_padding.max(0.0)
        } else {
            0.0
        };
        style.space_before + style.leading + 2.0 * pad
    }

    fn measure(&self, index: usize, block: &Block) -> Result<Measured<'a>> {
        let doc: &'a Document = self.doc;
        let kind = block.kind();
        let name = block.style_name().unwrap_or_default();
        let style = doc
            .styles()
            .get(name)
            .ok_or_else(|| Error::layout(index, kind, format!("unknown style '{name}'")))?;

        if !style.font_size.is_finite() || style.font_size <= 0.0 {
            return Err(Error::layout(
                index,
                kind,
                format!("font size {} of style '{name}' is not positive", style.font_size),
            ));
        }
        if !style.leading.is_finite() || style.leading <= 0.0 {
            return Err(Error::layout(
                index,
                kind,
                format!("leading {} of style '{name}' is not positive", style.leading),
            ));
        }

        let pad = if style.background.is_some() {
            style.border_padding.max(0.0)
        } else {
            0.0
        };
        let line_height = style.leading + 2.0 * pad;
        if line_height > self.geometry.frame_height() + EPSILON {
            return Err(Error::layout(
                index,
                kind,
                format!(
                    "line height {line_height} exceeds frame height {}",
                    self.geometry.frame_height()
                ),
            ));
        }

        let area_left = self.geometry.frame_left() + style.left_indent;
        let area_right = self.geometry.frame_right();
        let mut text_width = area_right - area_left;
        if matches!(block, Block::BulletList { .. }) {
            text_width -= BULLET_INDENT;
        }
        if text_width <= 0.0 {
            return Err(Error::layout(index, kind, "indent leaves no room for text"));
        }

        let encode_err =
            |c: char| Error::layout(index, kind, format!("character {c:?} has no WinAnsi code"));
        let size = style.font_size;

        let lines = match block {
            Block::Heading { text, .. } | Block::Paragraph { text, .. } => {
                let runs = styled_runs(text, style).map_err(encode_err)?;
                wrap_runs(&runs, size, text_width)
                    .into_iter()
                    .map(|line| MeasuredLine {
                        line,
                        bullet: false,
                        in_list: false,
                        gap_before: 0.0,
                    })
                    .collect()
            }
            Block::BulletList { items, .. } => {
                let mut lines = Vec::new();
                for (i, item) in items.iter().enumerate() {
                    let runs = styled_runs(item, style).map_err(encode_err)?;
                    let mut wrapped = wrap_runs(&runs, size, text_width);
                    if wrapped.is_empty() {
                        wrapped.push(Line::default());
                    }
                    for (j, line) in wrapped.into_iter().enumerate() {
                        lines.push(MeasuredLine {
                            line,
                            bullet: j == 0,
                            in_list: true,
                            gap_before: if i > 0 && j == 0 {
                                style.space_after
                            } else {
                                0.0
                            },
                        });
                    }
                }
                lines
            }
            Block::Preformatted { text, .. } => {
                let font = BuiltinFont::for_style(style, false, false);
                let mut lines = Vec::new();
                for source in text.trim_end_matches('\n').split('\n') {
                    let prepared = prepare_text(source).map_err(encode_err)?;
                    for piece in wrap_verbatim(&prepared, font, size, text_width) {
                        let mut line = Line::default();
                        if !piece.is_empty() {
                            line.width = font.text_width(&piece, size);
                            line.fragments.push(super::Fragment { text: piece, font });
                        }
                        lines.push(MeasuredLine {
                            line,
                            bullet: false,
                            in_list: false,
                            gap_before: 0.0,
                        });
                    }
                }
                lines
            }
            Block::Spacer { .. } => Vec::new(),
        };

        Ok(Measured {
            style,
            lines,
            pad,
            area_left,
            area_right,
        })
    }

    fn place(&mut self, index: usize, block: &Block, measured: &Measured<'_>, keep_with_next: f32) {
        let style = measured.style;
        let pad = measured.pad;

        if !self.at_top() {
            self.cursor -= style.space_before;
        }

        if keep_with_next > 0.0 && !self.at_top() {
            let needed = measured.height() + keep_with_next;
            if needed <= self.geometry.frame_height() && !self.fits(needed) {
                self.new_page();
            }
        }

        // (top of the fragment, slot for its background)
        let mut fragment: Option<(f32, usize)> = None;
        let mut bookmarked = false;

        for measured_line in &measured.lines {
            if measured_line.gap_before > 0.0 && !self.at_top() {
                self.cursor -= measured_line.gap_before;
            }

            let mut need = style.leading + pad;
            if fragment.is_none() {
                need += pad;
            }
            if !self.fits(need) && !self.at_top() {
                if let Some(open) = fragment.take() {
                    self.close_fragment(index, measured, open);
                }
                self.new_page();
            }

            if fragment.is_none() {
                fragment = Some((self.cursor, self.current.items.len()));
                self.cursor -= pad;
            }

            let line_top = self.cursor;
            if block.is_heading() && !bookmarked {
                self.bookmarks.push(Bookmark {
                    title: block.plain_text(),
                    page: self.pages.len(),
                    top: line_top,
                });
                bookmarked = true;
            }

            if let Some(line) = self.place_line(index, measured, measured_line, line_top) {
                self.current.items.push(PlacedItem::Line(line));
            }
            self.cursor -= style.leading;
        }

        if let Some(open) = fragment.take() {
            self.close_fragment(index, measured, open);
        }
        self.cursor -= style.space_after;
    }

    fn close_fragment(&mut self, index: usize, measured: &Measured<'_>, (top, slot): (f32, usize)) {
        self.cursor -= measured.pad;
        if let Some(color) = measured.style.background {
            let rect = PlacedRect {
                block: index,
                x: measured.area_left - measured.pad,
                y: self.cursor,
                width: measured.area_right - measured.area_left + 2.0 * measured.pad,
                height: top - self.cursor,
                color,
            };
            self.current.items.insert(slot, PlacedItem::Rect(rect));
        }
    }

    fn place_line(
        &self,
        index: usize,
        measured: &Measured<'_>,
        measured_line: &MeasuredLine,
        line_top: f32,
    ) -> Option<PlacedLine> {
        let style = measured.style;
        let size = style.font_size;
        let baseline = line_top - size * ASCENT - (style.leading - size).max(0.0) / 2.0;

        let left = if measured_line.in_list {
            measured.text_left() + BULLET_INDENT
        } else {
            measured.text_left()
        };
        let available = measured.text_right() - left;
        let mut x = match style.alignment {
            Alignment::Left => left,
            Alignment::Center => left + ((available - measured_line.line.width) / 2.0).max(0.0),
        };

        let mut runs = Vec::with_capacity(measured_line.line.fragments.len() + 1);
        if measured_line.bullet {
            runs.push(PlacedRun {
                x: measured.text_left() + BULLET_OFFSET,
                font: BuiltinFont::for_style(style, false, false),
                size,
                color: style.color,
                text: format!("{BULLET} "),
            });
        }
        for fragment in &measured_line.line.fragments {
            runs.push(PlacedRun {
                x,
                font: fragment.font,
                size,
                color: style.color,
                text: fragment.text.clone(),
            });
            x += fragment.font.text_width(&fragment.text, size);
        }

        if runs.is_empty() {
            return None;
        }
        Some(PlacedLine {
            block: index,
            baseline,
            runs,
        })
    }
}

/// Emphasis runs of `text` as prepared WinAnsi text with their faces.
fn styled_runs(text: &str, style: &Style) -> std::result::Result<Vec<(String, BuiltinFont)>, char> {
    parse_inline(text)
        .into_iter()
        .map(|run| {
            let prepared = prepare_text(&run.text.replace('\n', " "))?;
            Ok((prepared, BuiltinFont::for_style(style, run.bold, run.italic)))
        })
        .collect()
}

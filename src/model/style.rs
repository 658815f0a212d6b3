//! Named paragraph styles and the style sheet that holds them.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// An RGB color with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    /// Pure black.
    pub const BLACK: Color = Color::rgb(0, 0, 0);

    /// Light grey used behind code blocks (`#f5f5f5`).
    pub const WHITESMOKE: Color = Color::rgb(0xf5, 0xf5, 0xf5);

    /// Create a color from its channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a `#rrggbb` (or `rrggbb`) hex string.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Self::rgb(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Channels scaled to the 0.0..=1.0 range used by PDF color operators.
    pub fn components(&self) -> [f32; 3] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        ]
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Font family. Both families map to standard 14 PDF fonts, so nothing
/// needs to be embedded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontFamily {
    /// Proportional sans-serif (Helvetica)
    #[default]
    Helvetica,
    /// Fixed-width (Courier)
    Courier,
}

/// Horizontal alignment of lines inside the frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    /// Left alignment (default)
    #[default]
    Left,
    /// Center alignment
    Center,
}

/// A named set of text-rendering properties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Style {
    /// Style name used for lookups
    pub name: String,

    /// Name of the style this one was derived from
    pub parent: Option<String>,

    /// Font family
    pub font: FontFamily,

    /// Bold face
    pub bold: bool,

    /// Italic (oblique) face
    pub italic: bool,

    /// Font size in points
    pub font_size: f32,

    /// Distance between baselines in points
    pub leading: f32,

    /// Text color
    pub color: Color,

    /// Background fill behind the block
    pub background: Option<Color>,

    /// Padding between text and the background edge, in points
    pub border_padding: f32,

    /// Left indent in points
    pub left_indent: f32,

    /// Space before the block in points
    pub space_before: f32,

    /// Space after the block in points
    pub space_after: f32,

    /// Line alignment
    pub alignment: Alignment,

    /// Keep this block on the same page as the first line of the next one
    pub keep_with_next: bool,
}

impl Style {
    /// Create a root style with Helvetica 10/12 defaults.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent: None,
            font: FontFamily::Helvetica,
            bold: false,
            italic: false,
            font_size: 10.0,
            leading: 12.0,
            color: Color::BLACK,
            background: None,
            border_padding: 0.0,
            left_indent: 0.0,
            space_before: 0.0,
            space_after: 0.0,
            alignment: Alignment::Left,
            keep_with_next: false,
        }
    }

    /// Derive a new style that inherits every attribute from `self`.
    pub fn derive(&self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent: Some(self.name.clone()),
            ..self.clone()
        }
    }

    pub fn font(mut self, font: FontFamily) -> Self {
        self.font = font;
        self
    }

    pub fn bold(mut self, bold: bool) -> Self {
        self.bold = bold;
        self
    }

    pub fn italic(mut self, italic: bool) -> Self {
        self.italic = italic;
        self
    }

    pub fn font_size(mut self, size: f32) -> Self {
        self.font_size = size;
        self
    }

    pub fn leading(mut self, leading: f32) -> Self {
        self.leading = leading;
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }

    pub fn border_padding(mut self, padding: f32) -> Self {
        self.border_padding = padding;
        self
    }

    pub fn left_indent(mut self, indent: f32) -> Self {
        self.left_indent = indent;
        self
    }

    pub fn space_before(mut self, space: f32) -> Self {
        self.space_before = space;
        self
    }

    pub fn space_after(mut self, space: f32) -> Self {
        self.space_after = space;
        self
    }

    pub fn alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn keep_with_next(mut self, keep: bool) -> Self {
        self.keep_with_next = keep;
        self
    }
}

/// A set of styles addressed by name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StyleSheet {
    styles: BTreeMap<String, Style>,
}

impl StyleSheet {
    /// Create an empty style sheet.
    pub fn new() -> Self {
        Self::default()
    }

    /// The base sample sheet: Normal, BodyText, Title, Heading1, Heading2
    /// and Code.
    pub fn base() -> Self {
        let normal = Style::new("Normal");
        let body = normal.derive("BodyText").space_before(6.0);
        let title = normal
            .derive("Title")
            .bold(true)
            .font_size(18.0)
            .leading(22.0)
            .alignment(Alignment::Center)
            .space_after(6.0);
        let heading1 = normal
            .derive("Heading1")
            .bold(true)
            .font_size(18.0)
            .leading(22.0)
            .space_after(6.0)
            .keep_with_next(true);
        let heading2 = normal
            .derive("Heading2")
            .bold(true)
            .font_size(14.0)
            .leading(18.0)
            .space_before(12.0)
            .space_after(6.0)
            .keep_with_next(true);
        let code = normal
            .derive("Code")
            .font(FontFamily::Courier)
            .font_size(8.0)
            .leading(8.8)
            .left_indent(36.0);

        let mut sheet = Self::new();
        for style in [normal, body, title, heading1, heading2, code] {
            sheet.add(style);
        }
        sheet
    }

    /// Add (or replace) a style.
    pub fn add(&mut self, style: Style) {
        self.styles.insert(style.name.clone(), style);
    }

    /// Look up a style by name.
    pub fn get(&self, name: &str) -> Option<&Style> {
        self.styles.get(name)
    }

    /// Look up a style by name, failing with [`Error::UnknownStyle`].
    pub fn resolve(&self, name: &str) -> Result<&Style> {
        self.get(name)
            .ok_or_else(|| Error::UnknownStyle(name.to_string()))
    }

    /// Derive `name` from the existing style `parent`, let `configure`
    /// apply the overrides and add the result to the sheet.
    pub fn derive_from<F>(&mut self, parent: &str, name: &str, configure: F) -> Result<&Style>
    where
        F: FnOnce(Style) -> Style,
    {
        let style = configure(self.resolve(parent)?.derive(name));
        self.add(style);
        self.resolve(name)
    }

    /// Check whether a style exists.
    pub fn contains(&self, name: &str) -> bool {
        self.styles.contains_key(name)
    }

    /// Style names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.styles.keys().map(String::as_str)
    }

    /// Number of styles.
    pub fn len(&self) -> usize {
        self.styles.len()
    }

    /// Check if the sheet is empty.
    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_from_hex() {
        assert_eq!(Color::from_hex("#0b5394"), Some(Color::rgb(0x0b, 0x53, 0x94)));
        assert_eq!(Color::from_hex("f5f5f5"), Some(Color::WHITESMOKE));
        assert_eq!(Color::from_hex("#12345"), None);
        assert_eq!(Color::from_hex("#zzzzzz"), None);
        assert_eq!(Color::rgb(0x0b, 0x53, 0x94).to_string(), "#0b5394");
    }

    #[test]
    fn test_derive_inherits_parent() {
        let base = StyleSheet::base();
        let heading = base.get("Heading2").unwrap();
        let h2 = heading.derive("H2").space_after(8.0);

        assert_eq!(h2.parent.as_deref(), Some("Heading2"));
        assert!(h2.bold);
        assert_eq!(h2.font_size, 14.0);
        assert_eq!(h2.space_before, 12.0);
        assert_eq!(h2.space_after, 8.0);
        assert!(h2.keep_with_next);
    }

    #[test]
    fn test_derive_from_unknown_parent() {
        let mut sheet = StyleSheet::new();
        let result = sheet.derive_from("Missing", "Child", |s| s);
        assert!(matches!(result, Err(Error::UnknownStyle(name)) if name == "Missing"));
        assert!(sheet.is_empty());
    }

    #[test]
    fn test_derive_from_adds_style() {
        let mut sheet = StyleSheet::base();
        let before = sheet.len();
        let mono = sheet
            .derive_from("Code", "Mono", |s| s.font_size(9.0).leading(12.0))
            .unwrap();
        assert_eq!(mono.font, FontFamily::Courier);
        assert_eq!(mono.left_indent, 36.0);
        assert_eq!(sheet.len(), before + 1);
        assert!(sheet.contains("Mono"));
    }

    #[test]
    fn test_base_sheet_names() {
        let sheet = StyleSheet::base();
        let names: Vec<&str> = sheet.names().collect();
        assert_eq!(
            names,
            vec!["BodyText", "Code", "Heading1", "Heading2", "Normal", "Title"]
        );
    }
}

//! Glyph metrics of the standard 14 fonts used by the layout engine.
//!
//! Widths are in 1/1000 em, taken from the Adobe AFM files. Oblique faces
//! share the widths of their upright counterparts; every Courier glyph is
//! 600 units wide.

use serde::{Deserialize, Serialize};

use crate::encoding::win_ansi_byte;
use crate::model::{FontFamily, Style};

/// Helvetica, 0x20..=0x7E.
#[rustfmt::skip]
const HELVETICA_ASCII: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // 20-2F
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // 30-3F
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // 40-4F
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // 50-5F
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // 60-6F
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,      // 70-7E
];

/// Helvetica-Bold, 0x20..=0x7E.
#[rustfmt::skip]
const HELVETICA_BOLD_ASCII: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278, // 20-2F
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611, // 30-3F
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778, // 40-4F
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556, // 50-5F
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611, // 60-6F
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,      // 70-7E
];

/// Helvetica, 0x80..=0x9F (undefined slots are 0).
#[rustfmt::skip]
const HELVETICA_HIGH: [u16; 32] = [
    556, 0, 222, 556, 333, 1000, 556, 556, 333, 1000, 667, 333, 1000, 0, 611, 0,
    0, 222, 222, 333, 333, 350, 556, 1000, 333, 1000, 500, 333, 944, 0, 500, 667,
];

/// Helvetica-Bold, 0x80..=0x9F (undefined slots are 0).
#[rustfmt::skip]
const HELVETICA_BOLD_HIGH: [u16; 32] = [
    556, 0, 278, 556, 500, 1000, 556, 556, 333, 1000, 667, 333, 1000, 0, 611, 0,
    0, 278, 278, 500, 500, 350, 556, 1000, 333, 1000, 556, 333, 944, 0, 500, 667,
];

/// Helvetica, 0xA0..=0xFF. The bold face reuses these.
#[rustfmt::skip]
const HELVETICA_LATIN1: [u16; 96] = [
    278, 333, 556, 556, 556, 556, 260, 556, 333, 737, 370, 556, 584, 333, 737, 333, // A0-AF
    400, 584, 333, 333, 333, 556, 537, 278, 333, 333, 365, 556, 834, 834, 834, 611, // B0-BF
    667, 667, 667, 667, 667, 667, 1000, 722, 667, 667, 667, 667, 278, 278, 278, 278, // C0-CF
    722, 722, 778, 778, 778, 778, 778, 584, 778, 722, 722, 722, 722, 667, 667, 611, // D0-DF
    556, 556, 556, 556, 556, 556, 889, 500, 556, 556, 556, 556, 278, 278, 278, 278, // E0-EF
    556, 556, 556, 556, 556, 556, 556, 584, 611, 556, 556, 556, 556, 500, 556, 500, // F0-FF
];

const COURIER_WIDTH: u16 = 600;

/// Fraction of the font size above the baseline.
pub const ASCENT: f32 = 0.718;

/// One of the standard 14 fonts this crate uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BuiltinFont {
    Helvetica,
    HelveticaBold,
    HelveticaOblique,
    HelveticaBoldOblique,
    Courier,
    CourierBold,
    CourierOblique,
    CourierBoldOblique,
}

impl BuiltinFont {
    /// All faces, in resource-name order.
    pub const ALL: [BuiltinFont; 8] = [
        BuiltinFont::Helvetica,
        BuiltinFont::HelveticaBold,
        BuiltinFont::HelveticaOblique,
        BuiltinFont::HelveticaBoldOblique,
        BuiltinFont::Courier,
        BuiltinFont::CourierBold,
        BuiltinFont::CourierOblique,
        BuiltinFont::CourierBoldOblique,
    ];

    /// Pick the face for a family and emphasis.
    pub fn select(family: FontFamily, bold: bool, italic: bool) -> Self {
        match (family, bold, italic) {
            (FontFamily::Helvetica, false, false) => BuiltinFont::Helvetica,
            (FontFamily::Helvetica, true, false) => BuiltinFont::HelveticaBold,
            (FontFamily::Helvetica, false, true) => BuiltinFont::HelveticaOblique,
            (FontFamily::Helvetica, true, true) => BuiltinFont::HelveticaBoldOblique,
            (FontFamily::Courier, false, false) => BuiltinFont::Courier,
            (FontFamily::Courier, true, false) => BuiltinFont::CourierBold,
            (FontFamily::Courier, false, true) => BuiltinFont::CourierOblique,
            (FontFamily::Courier, true, true) => BuiltinFont::CourierBoldOblique,
        }
    }

    /// Face for a style with extra emphasis from inline markup.
    pub fn for_style(style: &Style, bold: bool, italic: bool) -> Self {
        Self::select(style.font, style.bold || bold, style.italic || italic)
    }

    /// PostScript name written as `/BaseFont`.
    pub fn base_name(&self) -> &'static str {
        match self {
            BuiltinFont::Helvetica => "Helvetica",
            BuiltinFont::HelveticaBold => "Helvetica-Bold",
            BuiltinFont::HelveticaOblique => "Helvetica-Oblique",
            BuiltinFont::HelveticaBoldOblique => "Helvetica-BoldOblique",
            BuiltinFont::Courier => "Courier",
            BuiltinFont::CourierBold => "Courier-Bold",
            BuiltinFont::CourierOblique => "Courier-Oblique",
            BuiltinFont::CourierBoldOblique => "Courier-BoldOblique",
        }
    }

    /// Resource name used in page content streams (`F1`..`F8`).
    pub fn resource_name(&self) -> String {
        let index = Self::ALL.iter().position(|f| f == self).unwrap_or(0);
        format!("F{}", index + 1)
    }

    fn is_bold(&self) -> bool {
        matches!(
            self,
            BuiltinFont::HelveticaBold | BuiltinFont::HelveticaBoldOblique
        )
    }

    fn is_fixed_pitch(&self) -> bool {
        matches!(
            self,
            BuiltinFont::Courier
                | BuiltinFont::CourierBold
                | BuiltinFont::CourierOblique
                | BuiltinFont::CourierBoldOblique
        )
    }

    /// Advance width of `c` in 1/1000 em. Characters without a WinAnsi
    /// byte measure as zero.
    pub fn char_width(&self, c: char) -> u16 {
        let Some(byte) = win_ansi_byte(c) else {
            return 0;
        };
        if self.is_fixed_pitch() {
            return COURIER_WIDTH;
        }
        match byte {
            0x20..=0x7E if self.is_bold() => HELVETICA_BOLD_ASCII[(byte - 0x20) as usize],
            0x20..=0x7E => HELVETICA_ASCII[(byte - 0x20) as usize],
            0x80..=0x9F if self.is_bold() => HELVETICA_BOLD_HIGH[(byte - 0x80) as usize],
            0x80..=0x9F => HELVETICA_HIGH[(byte - 0x80) as usize],
            0xA0..=0xFF => HELVETICA_LATIN1[(byte - 0xA0) as usize],
            _ => 0,
        }
    }

    /// Width of `text` at `size` points.
    pub fn text_width(&self, text: &str, size: f32) -> f32 {
        let units: u32 = text.chars().map(|c| self.char_width(c) as u32).sum();
        units as f32 * size / 1000.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_faces() {
        assert_eq!(
            BuiltinFont::select(FontFamily::Helvetica, true, false),
            BuiltinFont::HelveticaBold
        );
        assert_eq!(
            BuiltinFont::select(FontFamily::Courier, false, true),
            BuiltinFont::CourierOblique
        );
    }

    #[test]
    fn test_resource_names_are_unique() {
        let names: Vec<String> = BuiltinFont::ALL.iter().map(|f| f.resource_name()).collect();
        assert_eq!(names[0], "F1");
        assert_eq!(names[7], "F8");
        let mut dedup = names.clone();
        dedup.dedup();
        assert_eq!(dedup.len(), names.len());
    }

    #[test]
    fn test_helvetica_widths() {
        let font = BuiltinFont::Helvetica;
        assert_eq!(font.char_width(' '), 278);
        assert_eq!(font.char_width('A'), 667);
        assert_eq!(font.char_width('i'), 222);
        assert_eq!(font.char_width('~'), 584);
        assert_eq!(font.char_width('\u{2022}'), 350);
        // "Hello" = 722 + 556 + 222 + 222 + 556
        assert!((font.text_width("Hello", 10.0) - 22.78).abs() < 1e-3);
    }

    #[test]
    fn test_bold_is_wider() {
        let text = "Objectives";
        assert!(
            BuiltinFont::HelveticaBold.text_width(text, 14.0)
                > BuiltinFont::Helvetica.text_width(text, 14.0)
        );
        assert_eq!(
            BuiltinFont::HelveticaBoldOblique.char_width('m'),
            BuiltinFont::HelveticaBold.char_width('m')
        );
    }

    #[test]
    fn test_courier_is_fixed_pitch() {
        let font = BuiltinFont::Courier;
        assert!((font.text_width("COGS", 9.0) - 21.6).abs() < 1e-4);
        assert_eq!(font.char_width('i'), font.char_width('W'));
    }

    #[test]
    fn test_unencodable_measures_zero() {
        assert_eq!(BuiltinFont::Helvetica.char_width('\u{4E2D}'), 0);
    }
}

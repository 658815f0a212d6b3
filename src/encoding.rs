//! WinAnsiEncoding support for the standard 14 fonts.
//!
//! Text is NFC-normalized first so precomposed Latin-1 letters stay
//! encodable. A handful of characters outside the encoding have fixed
//! ASCII transliterations; anything else is rejected.

use unicode_normalization::UnicodeNormalization;

/// Code points 0x80..=0x9F of WinAnsiEncoding (0 = undefined).
const WIN_ANSI_HIGH: [u32; 32] = [
    0x20AC, 0, 0x201A, 0x0192, 0x201E, 0x2026, 0x2020, 0x2021, // 80-87
    0x02C6, 0x2030, 0x0160, 0x2039, 0x0152, 0, 0x017D, 0, // 88-8F
    0, 0x2018, 0x2019, 0x201C, 0x201D, 0x2022, 0x2013, 0x2014, // 90-97
    0x02DC, 0x2122, 0x0161, 0x203A, 0x0153, 0, 0x017E, 0x0178, // 98-9F
];

/// Tab stops used when expanding tabs.
pub const TAB_WIDTH: usize = 4;

/// Map a character to its WinAnsi byte.
pub fn win_ansi_byte(c: char) -> Option<u8> {
    let cp = c as u32;
    match cp {
        0x20..=0x7E | 0xA0..=0xFF => Some(cp as u8),
        _ => WIN_ANSI_HIGH
            .iter()
            .position(|&mapped| mapped != 0 && mapped == cp)
            .map(|i| 0x80 + i as u8),
    }
}

/// Map a WinAnsi byte back to its character.
pub fn win_ansi_char(byte: u8) -> Option<char> {
    match byte {
        0x20..=0x7E | 0xA0..=0xFF => Some(byte as char),
        0x80..=0x9F => match WIN_ANSI_HIGH[(byte - 0x80) as usize] {
            0 => None,
            cp => char::from_u32(cp),
        },
        _ => None,
    }
}

/// Fixed replacement for characters WinAnsi cannot express.
pub fn transliterate(c: char) -> Option<&'static str> {
    match c {
        '\u{2192}' => Some("->"),
        '\u{2190}' => Some("<-"),
        '\u{2194}' => Some("<->"),
        '\u{21D2}' => Some("=>"),
        '\u{2264}' => Some("<="),
        '\u{2265}' => Some(">="),
        '\u{2260}' => Some("!="),
        '\u{2248}' => Some("~"),
        '\u{2212}' => Some("-"),
        '\u{2011}' => Some("-"),
        '\u{2009}' | '\u{200A}' | '\u{202F}' => Some(" "),
        '\u{200B}' | '\u{FEFF}' => Some(""),
        _ => None,
    }
}

/// Normalize `text` into characters that all have a WinAnsi byte.
///
/// Tabs become [`TAB_WIDTH`] spaces and carriage returns are dropped;
/// line feeds are rejected, callers split lines first.
/// Returns the first character that cannot be represented.
pub fn prepare_text(text: &str) -> Result<String, char> {
    let mut out = String::with_capacity(text.len());
    let mut substituted = false;

    for c in text.nfc() {
        match c {
            '\t' => out.extend(std::iter::repeat(' ').take(TAB_WIDTH)),
            '\r' => {}
            c if win_ansi_byte(c).is_some() => out.push(c),
            c => match transliterate(c) {
                Some(replacement) => {
                    substituted = true;
                    out.push_str(replacement);
                }
                None => return Err(c),
            },
        }
    }

    if substituted {
        log::debug!("transliterated characters outside WinAnsi in {:?}", text);
    }
    Ok(out)
}

/// Encode prepared text. Returns the first unencodable character.
pub fn encode(text: &str) -> Result<Vec<u8>, char> {
    text.chars()
        .map(|c| win_ansi_byte(c).ok_or(c))
        .collect()
}

/// Decode WinAnsi bytes, replacing undefined bytes with U+FFFD.
pub fn decode(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|&b| win_ansi_char(b).unwrap_or('\u{FFFD}'))
        .collect()
}

//! Line breaking for flowing and verbatim text.

use super::metrics::BuiltinFont;

/// Tolerance for width comparisons, in points.
const EPSILON: f32 = 0.01;

/// A piece of a line set in a single face.
#[derive(Debug, Clone, PartialEq)]
pub struct Fragment {
    pub text: String,
    pub font: BuiltinFont,
}

/// A broken line: fragments in reading order and their total width.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Line {
    pub fragments: Vec<Fragment>,
    pub width: f32,
}

impl Line {
    fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    fn push(&mut self, text: &str, font: BuiltinFont, size: f32) {
        if text.is_empty() {
            return;
        }
        self.width += font.text_width(text, size);
        match self.fragments.last_mut() {
            Some(last) if last.font == font => last.text.push_str(text),
            _ => self.fragments.push(Fragment {
                text: text.to_string(),
                font,
            }),
        }
    }

    /// Text of the line with faces dropped.
    pub fn text(&self) -> String {
        self.fragments.iter().map(|f| f.text.as_str()).collect()
    }
}

enum Token {
    Word(Vec<Fragment>),
    Space(BuiltinFont),
}

/// Split styled runs into words and collapsed whitespace.
fn tokenize(runs: &[(String, BuiltinFont)]) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut word: Vec<Fragment> = Vec::new();

    for (text, font) in runs {
        for c in text.chars() {
            if c.is_whitespace() && c != '\u{00A0}' {
                if !word.is_empty() {
                    tokens.push(Token::Word(std::mem::take(&mut word)));
                }
                if !matches!(tokens.last(), Some(Token::Space(_))) {
                    tokens.push(Token::Space(*font));
                }
                continue;
            }
            match word.last_mut() {
                Some(last) if last.font == *font => last.text.push(c),
                _ => word.push(Fragment {
                    text: c.to_string(),
                    font: *font,
                }),
            }
        }
    }
    if !word.is_empty() {
        tokens.push(Token::Word(word));
    }
    tokens
}

fn word_width(word: &[Fragment], size: f32) -> f32 {
    word.iter().map(|f| f.font.text_width(&f.text, size)).sum()
}

/// Greedy word wrapping of styled runs into lines no wider than
/// `max_width`. Whitespace collapses to single spaces; a word wider than
/// the line is broken between characters.
pub fn wrap_runs(runs: &[(String, BuiltinFont)], size: f32, max_width: f32) -> Vec<Line> {
    let mut lines = Vec::new();
    let mut current = Line::default();
    let mut pending_space: Option<BuiltinFont> = None;

    for token in tokenize(runs) {
        let word = match token {
            Token::Space(font) => {
                if !current.is_empty() {
                    pending_space = Some(font);
                }
                continue;
            }
            Token::Word(word) => word,
        };

        let width = word_width(&word, size);
        let space_width = pending_space
            .map(|font| font.text_width(" ", size))
            .unwrap_or(0.0);

        if !current.is_empty() && current.width + space_width + width <= max_width + EPSILON {
            if let Some(font) = pending_space {
                current.push(" ", font, size);
            }
            for fragment in &word {
                current.push(&fragment.text, fragment.font, size);
            }
        } else {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            if width <= max_width + EPSILON {
                for fragment in &word {
                    current.push(&fragment.text, fragment.font, size);
                }
            } else {
                break_word(&word, size, max_width, &mut lines, &mut current);
            }
        }
        pending_space = None;
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Place an over-long word character by character. Every line receives at
/// least one character, so the loop always advances.
fn break_word(word: &[Fragment], size: f32, max_width: f32, lines: &mut Vec<Line>, current: &mut Line) {
    for fragment in word {
        for c in fragment.text.chars() {
            let width = fragment.font.char_width(c) as f32 * size / 1000.0;
            if !current.is_empty() && current.width + width > max_width + EPSILON {
                lines.push(std::mem::take(current));
            }
            let mut buf = [0u8; 4];
            current.push(c.encode_utf8(&mut buf), fragment.font, size);
        }
    }
}

/// Wrap one verbatim line. Leading whitespace is kept; a break happens
/// after the last space that fits, or between characters if there is
/// none, and the space at the break is dropped.
pub fn wrap_verbatim(line: &str, font: BuiltinFont, size: f32, max_width: f32) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut rest = line;

    while font.text_width(rest, size) > max_width + EPSILON {
        let mut width = 0.0;
        let mut fit_end = 0;
        let mut last_space = None;

        for (i, c) in rest.char_indices() {
            width += font.char_width(c) as f32 * size / 1000.0;
            if width > max_width + EPSILON {
                break;
            }
            fit_end = i + c.len_utf8();
            if c == ' ' && !rest[..i].trim().is_empty() {
                last_space = Some(i);
            }
        }

        if fit_end == 0 {
            // Not even one character fits; place it anyway.
            fit_end = rest.chars().next().map(char::len_utf8).unwrap_or(rest.len());
        }

        match last_space {
            Some(space) => {
                pieces.push(rest[..space].trim_end().to_string());
                rest = &rest[space + 1..];
            }
            None => {
                pieces.push(rest[..fit_end].to_string());
                rest = &rest[fit_end..];
            }
        }
    }

    pieces.push(rest.to_string());
    pieces
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(text: &str) -> Vec<(String, BuiltinFont)> {
        vec![(text.to_string(), BuiltinFont::Helvetica)]
    }

    #[test]
    fn test_short_text_is_one_line() {
        let lines = wrap_runs(&plain("Promote headers only when needed"), 10.0, 500.0);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].text(), "Promote headers only when needed");
    }

    #[test]
    fn test_whitespace_collapses() {
        let lines = wrap_runs(&plain("  a \n\n b  "), 10.0, 500.0);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].text(), "a b");
    }

    #[test]
    fn test_wraps_at_word_boundary() {
        let text = "one two three four five six seven eight nine ten";
        let lines = wrap_runs(&plain(text), 10.0, 60.0);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(line.width <= 60.0 + EPSILON);
            assert!(!line.text().starts_with(' '));
            assert!(!line.text().ends_with(' '));
        }
        let joined: Vec<String> = lines.iter().map(Line::text).collect();
        assert_eq!(joined.join(" "), text);
    }

    #[test]
    fn test_long_word_breaks_between_characters() {
        let lines = wrap_runs(&plain("Financials_Table_Financials_Table"), 10.0, 40.0);
        assert!(lines.len() > 1);
        let joined: String = lines.iter().map(Line::text).collect();
        assert_eq!(joined, "Financials_Table_Financials_Table");
    }

    #[test]
    fn test_mixed_faces_keep_fragments() {
        let runs = vec![
            ("Fact:".to_string(), BuiltinFont::HelveticaBold),
            (" Financials_Table".to_string(), BuiltinFont::Helvetica),
        ];
        let lines = wrap_runs(&runs, 10.0, 500.0);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].fragments.len(), 2);
        assert_eq!(lines[0].fragments[0].font, BuiltinFont::HelveticaBold);
        assert_eq!(lines[0].text(), "Fact: Financials_Table");
    }

    #[test]
    fn test_verbatim_fits() {
        let pieces = wrap_verbatim("Total Sales    = SUM(x)", BuiltinFont::Courier, 9.0, 500.0);
        assert_eq!(pieces, vec!["Total Sales    = SUM(x)"]);
    }

    #[test]
    fn test_verbatim_breaks_at_space() {
        // 10 chars per line at 5.4pt each
        let pieces = wrap_verbatim("aaaa bbbb cccc", BuiltinFont::Courier, 9.0, 54.0);
        assert_eq!(pieces, vec!["aaaa bbbb", "cccc"]);
    }

    #[test]
    fn test_verbatim_hard_break() {
        let pieces = wrap_verbatim("abcdefghijkl", BuiltinFont::Courier, 10.0, 30.0);
        assert_eq!(pieces, vec!["abcde", "fghij", "kl"]);
    }

    #[test]
    fn test_verbatim_keeps_indent() {
        let pieces = wrap_verbatim("    x", BuiltinFont::Courier, 10.0, 500.0);
        assert_eq!(pieces, vec!["    x"]);
    }
}

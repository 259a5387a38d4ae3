//! The built-in default font
//!
//! A small five pixel high font covering upper-case letters, digits, the space and the usual
//! punctuation. Lower-case letters share the sprites of their upper-case counterparts.

use crate::font::{Font, FontBuilder};
use crate::sprite::GlyphSprite;
use crate::LOG_TARGET;
use lazy_static::lazy_static;
use log::error;
use std::sync::Arc;

#[rustfmt::skip]
const GLYPHS: &[(char, &[&str])] = &[
    ('A', &[".#.", "#.#", "###", "#.#", "#.#"]),
    ('B', &["##.", "#.#", "##.", "#.#", "##."]),
    ('C', &[".##", "#..", "#..", "#..", ".##"]),
    ('D', &["##.", "#.#", "#.#", "#.#", "##."]),
    ('E', &["###", "#..", "##.", "#..", "###"]),
    ('F', &["###", "#..", "##.", "#..", "#.."]),
    ('G', &[".##", "#..", "#.#", "#.#", ".##"]),
    ('H', &["#.#", "#.#", "###", "#.#", "#.#"]),
    ('I', &["###", ".#.", ".#.", ".#.", "###"]),
    ('J', &["..#", "..#", "..#", "#.#", ".#."]),
    ('K', &["#.#", "#.#", "##.", "#.#", "#.#"]),
    ('L', &["#..", "#..", "#..", "#..", "###"]),
    ('M', &["#...#", "##.##", "#.#.#", "#...#", "#...#"]),
    ('N', &["#..#", "##.#", "#.##", "#..#", "#..#"]),
    ('O', &[".#.", "#.#", "#.#", "#.#", ".#."]),
    ('P', &["##.", "#.#", "##.", "#..", "#.."]),
    ('Q', &[".#.", "#.#", "#.#", "##.", ".##"]),
    ('R', &["##.", "#.#", "##.", "#.#", "#.#"]),
    ('S', &[".##", "#..", ".#.", "..#", "##."]),
    ('T', &["###", ".#.", ".#.", ".#.", ".#."]),
    ('U', &["#.#", "#.#", "#.#", "#.#", "###"]),
    ('V', &["#.#", "#.#", "#.#", "#.#", ".#."]),
    ('W', &["#...#", "#...#", "#.#.#", "##.##", "#...#"]),
    ('X', &["#.#", "#.#", ".#.", "#.#", "#.#"]),
    ('Y', &["#.#", "#.#", ".#.", ".#.", ".#."]),
    ('Z', &["###", "..#", ".#.", "#..", "###"]),
    ('0', &["###", "#.#", "#.#", "#.#", "###"]),
    ('1', &[".#.", "##.", ".#.", ".#.", "###"]),
    ('2', &["##.", "..#", ".#.", "#..", "###"]),
    ('3', &["##.", "..#", ".#.", "..#", "##."]),
    ('4', &["#.#", "#.#", "###", "..#", "..#"]),
    ('5', &["###", "#..", "##.", "..#", "##."]),
    ('6', &[".##", "#..", "###", "#.#", "###"]),
    ('7', &["###", "..#", ".#.", ".#.", ".#."]),
    ('8', &["###", "#.#", "###", "#.#", "###"]),
    ('9', &["###", "#.#", "###", "..#", "##."]),
    (' ', &["...", "...", "...", "...", "..."]),
    ('.', &[".", ".", ".", ".", "#"]),
    (',', &[".", ".", ".", "#", "#"]),
    ('!', &["#", "#", "#", ".", "#"]),
    ('?', &["##.", "..#", ".#.", "...", ".#."]),
    (':', &[".", "#", ".", "#", "."]),
    ('\'', &["#", "#", ".", ".", "."]),
    ('-', &["...", "...", "###", "...", "..."]),
    ('+', &["...", ".#.", "###", ".#.", "..."]),
    ('(', &[".#", "#.", "#.", "#.", ".#"]),
    (')', &["#.", ".#", ".#", ".#", "#."]),
    ('/', &["..#", "..#", ".#.", "#..", "#.."]),
];

lazy_static! {
    static ref DEFAULT_FONT: Arc<Font> = Arc::new(build_default_font());
}

/// Returns the process-wide default font
pub fn default_font() -> &'static Font {
    DEFAULT_FONT.as_ref()
}

/// Returns a shared handle on the default font
pub fn shared_default_font() -> Arc<Font> {
    Arc::clone(&DEFAULT_FONT)
}

fn build_default_font() -> Font {
    let mut builder = FontBuilder::new();

    for &(ch, rows) in GLYPHS {
        let sprite = match GlyphSprite::from_rows(rows) {
            Ok(sprite) => Arc::new(sprite),
            Err(err) => {
                error!(target: LOG_TARGET, "built-in glyph {ch:?} is invalid: {err}");
                continue;
            }
        };

        if ch.is_ascii_uppercase() {
            builder.register_glyph(ch.to_ascii_lowercase(), Arc::clone(&sprite));
        }
        builder.register_glyph(ch, sprite);
    }

    builder.build()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::font::GlyphSource;
    use crate::COLOR_CHAR;

    #[test]
    fn all_glyphs_are_loaded() {
        let font = default_font();
        let letters = GLYPHS.iter().filter(|(ch, _)| ch.is_ascii_uppercase()).count();

        assert_eq!(font.len(), GLYPHS.len() + letters);
        assert_eq!(font.line_height(), 5);
    }

    #[test]
    fn lower_case_shares_upper_case() {
        let font = default_font();
        for ch in 'a'..='z' {
            assert_eq!(font.glyph_for(ch), font.glyph_for(ch.to_ascii_uppercase()));
        }
    }

    #[test]
    fn measures_text() {
        let font = default_font();
        // H(3) I(3) + 1 spacing
        assert_eq!(font.measure_width("HI"), Ok(7));
        // M(5) space(3) W(5) + 2 spacing
        assert_eq!(font.measure_width("m w"), Ok(15));
        assert_eq!(font.measure_width(&format!("{COLOR_CHAR}1")), Ok(4));
        assert!(!font.is_renderable("Hello, world! (1+2=3?)"));
        assert!(font.is_renderable("Hello, world! (1+2-3?)"));
    }

    #[test]
    fn shared_handle_points_to_same_font() {
        let a = shared_default_font();
        let b = shared_default_font();
        assert!(Arc::ptr_eq(&a, &b));
        assert!(std::ptr::eq(a.as_ref(), default_font()));
    }
}

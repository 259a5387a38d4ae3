use crate::errors::FontError;
use crate::font::GlyphSource;
use crate::sprite::GlyphSprite;
use crate::{COLOR_CHAR, LOG_TARGET, NEWLINE_CHAR};
use glyphmap_shared::types::{Point, Size};
use log::warn;

/// A glyph together with its top-left position, relative to the origin of the text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacedGlyph<'a> {
    pub ch: char,
    pub position: Point<i64>,
    pub sprite: &'a GlyphSprite,
}

/// Positions every drawable character of `text`.
///
/// Glyphs are placed left to right with one pixel between them. A newline moves back to the start
/// of the text and down by the line height plus `line_spacing`. Colour escapes are skipped.
pub fn layout_text<'a, G>(
    font: &'a G,
    text: &str,
    line_spacing: u32,
) -> Result<Vec<PlacedGlyph<'a>>, FontError>
where
    G: GlyphSource + ?Sized,
{
    if let Some((index, ch)) = font.first_unrenderable(text) {
        warn!(target: LOG_TARGET, "cannot lay out text: no glyph for {ch:?} at position {index}");
        return Err(FontError::UnrenderableText { ch, index });
    }

    let line_advance = i64::from(font.line_height()).saturating_add(i64::from(line_spacing));
    let mut cursor = Point::<i64>::ZERO;
    let mut placed = Vec::with_capacity(text.len());

    for ch in text.chars() {
        if ch == NEWLINE_CHAR {
            cursor = Point::new(0, cursor.y.saturating_add(line_advance));
            continue;
        }
        if ch == COLOR_CHAR {
            continue;
        }

        let Some(sprite) = font.glyph_for(ch) else {
            continue;
        };

        placed.push(PlacedGlyph {
            ch,
            position: cursor,
            sprite,
        });
        cursor.x = cursor.x.saturating_add(i64::from(sprite.width()) + 1);
    }

    Ok(placed)
}

/// Returns the size of the box `text` covers when laid out with `layout_text`. The width is the
/// widest line as measured by `measure_width`. Sizes that do not fit a `u32` saturate.
pub fn text_size<G>(font: &G, text: &str, line_spacing: u32) -> Result<Size<u32>, FontError>
where
    G: GlyphSource + ?Sized,
{
    if text.is_empty() {
        return Ok(Size::<u32>::ZERO);
    }
    if let Some((index, ch)) = font.first_unrenderable(text) {
        return Err(FontError::UnrenderableText { ch, index });
    }

    let mut width = 0;
    let mut lines: u32 = 0;
    for line in text.split(NEWLINE_CHAR) {
        width = width.max(font.measure_width(line)?);
        lines = lines.saturating_add(1);
    }

    let height = lines
        .saturating_mul(font.line_height())
        .saturating_add((lines - 1).saturating_mul(line_spacing));
    Ok(Size::new(width, height))
}

/// Replaces every character the font cannot render with `placeholder`
pub fn replace_unrenderable<G>(font: &G, text: &str, placeholder: char) -> String
where
    G: GlyphSource + ?Sized,
{
    text.chars()
        .map(|ch| {
            if ch == COLOR_CHAR || ch == NEWLINE_CHAR || font.glyph_for(ch).is_some() {
                ch
            } else {
                placeholder
            }
        })
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::font::FontBuilder;

    fn font() -> crate::font::Font {
        FontBuilder::new()
            .with_glyph('A', GlyphSprite::blank(5, 7))
            .with_glyph('B', GlyphSprite::blank(4, 6))
            .build()
    }

    fn positions(placed: &[PlacedGlyph<'_>]) -> Vec<(char, i64, i64)> {
        placed
            .iter()
            .map(|p| (p.ch, p.position.x, p.position.y))
            .collect()
    }

    #[test]
    fn single_line() {
        let font = font();
        let placed = layout_text(&font, "ABA", 1).unwrap();
        assert_eq!(
            positions(&placed),
            vec![('A', 0, 0), ('B', 6, 0), ('A', 11, 0)]
        );
        assert_eq!(placed[1].sprite.width(), 4);
    }

    #[test]
    fn newline_moves_down() {
        let font = font();
        let placed = layout_text(&font, "AB\nB", 1).unwrap();
        assert_eq!(
            positions(&placed),
            vec![('A', 0, 0), ('B', 6, 0), ('B', 0, 8)]
        );

        let placed = layout_text(&font, "A\n\nA", 3).unwrap();
        assert_eq!(positions(&placed), vec![('A', 0, 0), ('A', 0, 20)]);
    }

    #[test]
    fn colour_escapes_are_skipped() {
        let font = font();
        let placed = layout_text(&font, "\u{00A7}A\u{00A7}B", 1).unwrap();
        assert_eq!(positions(&placed), vec![('A', 0, 0), ('B', 6, 0)]);
    }

    #[test]
    fn empty_text() {
        assert!(layout_text(&font(), "", 1).unwrap().is_empty());
    }

    #[test]
    fn unrenderable_text() {
        assert_eq!(
            layout_text(&font(), "AC", 1),
            Err(FontError::UnrenderableText { ch: 'C', index: 1 })
        );
    }

    #[test]
    fn size_of_text() {
        let font = font();
        assert_eq!(text_size(&font, "", 1), Ok(Size::new(0, 0)));
        assert_eq!(text_size(&font, "AB", 1), Ok(Size::new(10, 7)));
        assert_eq!(text_size(&font, "A\nAB", 2), Ok(Size::new(10, 16)));
        assert!(text_size(&font, "A\nC", 1).is_err());
    }

    #[test]
    fn huge_line_spacing_saturates() {
        let font = font();
        assert_eq!(
            text_size(&font, "A\nA\nA", 3_000_000_000),
            Ok(Size::new(5, u32::MAX))
        );

        let placed = layout_text(&font, "A\nA\nA", u32::MAX).unwrap();
        assert_eq!(placed[2].position.y, 2 * (7 + i64::from(u32::MAX)));
    }

    #[test]
    fn placeholder_replacement() {
        let font = font();
        assert_eq!(replace_unrenderable(&font, "ABC\nD", 'A'), "ABA\nA");
        assert_eq!(replace_unrenderable(&font, "\u{00A7}B", 'A'), "\u{00A7}B");
        assert!(font.is_renderable(&replace_unrenderable(&font, "xyz", 'B')));
    }
}

use crate::errors::FontError;
use crate::sprite::GlyphSprite;
use crate::{COLOR_CHAR, LOG_TARGET, NEWLINE_CHAR};
use log::debug;
use std::collections::HashMap;
use std::sync::Arc;

/// Read access to a set of glyphs. Implemented by both the [`FontBuilder`] and the frozen
/// [`Font`], so text can be measured at any point of the font's lifetime.
pub trait GlyphSource {
    /// Returns the sprite for the given character, if any
    fn glyph_for(&self, ch: char) -> Option<&GlyphSprite>;

    /// Height of the tallest glyph that has been registered
    fn line_height(&self) -> u32;

    /// Returns the position and character of the first character in `text` that cannot be
    /// rendered. Colour escapes and newlines never need a glyph.
    fn first_unrenderable(&self, text: &str) -> Option<(usize, char)> {
        text.chars()
            .enumerate()
            .filter(|&(_, ch)| ch != COLOR_CHAR && ch != NEWLINE_CHAR)
            .find(|&(_, ch)| self.glyph_for(ch).is_none())
    }

    /// Returns true when every character in `text` can be rendered with this font
    fn is_renderable(&self, text: &str) -> bool {
        self.first_unrenderable(text).is_none()
    }

    /// Returns the width in pixels of `text` rendered in this font.
    ///
    /// Every glyph is separated by a single pixel. The spacing is counted over all characters,
    /// colour escapes included, even though the escapes themselves have no width.
    fn measure_width(&self, text: &str) -> Result<u32, FontError> {
        if let Some((index, ch)) = self.first_unrenderable(text) {
            return Err(FontError::UnrenderableText { ch, index });
        }

        let mut count: u32 = 0;
        let mut width: u32 = 0;
        for ch in text.chars() {
            count = count.saturating_add(1);
            if ch == COLOR_CHAR {
                continue;
            }
            // an unregistered newline has no width
            if let Some(sprite) = self.glyph_for(ch) {
                width = width.saturating_add(sprite.width());
            }
        }

        if count == 0 {
            return Ok(0);
        }

        Ok(width.saturating_add(count - 1))
    }
}

/// A font that is still being assembled. Glyphs can be added or replaced until the font is
/// frozen with [`FontBuilder::build`].
#[derive(Debug, Default, Clone)]
pub struct FontBuilder {
    glyphs: HashMap<char, Arc<GlyphSprite>>,
    line_height: u32,
}

impl FontBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the sprite for the given character, replacing any earlier sprite. The line height
    /// grows with taller sprites but never shrinks.
    pub fn register_glyph(&mut self, ch: char, sprite: impl Into<Arc<GlyphSprite>>) -> &mut Self {
        let sprite = sprite.into();
        debug!(target: LOG_TARGET, "registering glyph {ch:?} ({}x{})", sprite.width(), sprite.height());

        self.line_height = self.line_height.max(sprite.height());
        self.glyphs.insert(ch, sprite);
        self
    }

    pub fn with_glyph(mut self, ch: char, sprite: impl Into<Arc<GlyphSprite>>) -> Self {
        self.register_glyph(ch, sprite);
        self
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// Freezes the font. The returned font can no longer be modified.
    pub fn build(self) -> Font {
        debug!(
            target: LOG_TARGET,
            "building font with {} glyphs, line height {}",
            self.glyphs.len(),
            self.line_height
        );

        Font {
            glyphs: self.glyphs,
            line_height: self.line_height,
        }
    }
}

impl GlyphSource for FontBuilder {
    fn glyph_for(&self, ch: char) -> Option<&GlyphSprite> {
        self.glyphs.get(&ch).map(Arc::as_ref)
    }

    fn line_height(&self) -> u32 {
        self.line_height
    }
}

/// A frozen, read-only font
#[derive(Debug, Clone)]
pub struct Font {
    glyphs: HashMap<char, Arc<GlyphSprite>>,
    line_height: u32,
}

impl Font {
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    pub fn contains(&self, ch: char) -> bool {
        self.glyphs.contains_key(&ch)
    }

    /// All characters that have a glyph, in ascending order
    pub fn chars(&self) -> impl Iterator<Item = char> {
        let mut chars: Vec<char> = self.glyphs.keys().copied().collect();
        chars.sort_unstable();
        chars.into_iter()
    }
}

impl GlyphSource for Font {
    fn glyph_for(&self, ch: char) -> Option<&GlyphSprite> {
        self.glyphs.get(&ch).map(Arc::as_ref)
    }

    fn line_height(&self) -> u32 {
        self.line_height
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use test_case::test_case;

    fn sprite(width: u32, height: u32) -> GlyphSprite {
        GlyphSprite::new(width, height, vec![true; (width * height) as usize]).unwrap()
    }

    fn ab_font() -> Font {
        FontBuilder::new()
            .with_glyph('A', sprite(5, 7))
            .with_glyph('B', sprite(4, 7))
            .build()
    }

    #[test]
    fn empty_font() {
        let font = FontBuilder::new().build();
        assert_eq!(font.line_height(), 0);
        assert!(font.is_renderable(""));
        assert_eq!(font.measure_width(""), Ok(0));
        assert!(font.is_empty());
    }

    #[test]
    fn line_height_never_shrinks() {
        let mut builder = FontBuilder::new();
        builder.register_glyph('A', sprite(5, 7));
        assert_eq!(builder.line_height(), 7);

        builder.register_glyph('a', sprite(3, 4));
        assert_eq!(builder.line_height(), 7);

        // replacing the tallest glyph keeps the height as well
        builder.register_glyph('A', sprite(5, 2));
        assert_eq!(builder.line_height(), 7);
        assert_eq!(builder.glyph_for('A').unwrap().height(), 2);

        let font = builder.build();
        assert_eq!(font.line_height(), 7);
    }

    #[test]
    fn overwrite_replaces_glyph() {
        let mut builder = FontBuilder::new();
        builder.register_glyph('A', sprite(5, 7));
        builder.register_glyph('A', sprite(2, 7));
        assert_eq!(builder.len(), 1);
        assert_eq!(builder.measure_width("A"), Ok(2));
    }

    #[test]
    fn glyph_lookup() {
        let font = ab_font();
        assert_eq!(font.glyph_for('A').map(GlyphSprite::width), Some(5));
        assert!(font.glyph_for('C').is_none());
        assert!(font.contains('B'));
        assert_eq!(font.chars().collect::<Vec<_>>(), vec!['A', 'B']);
    }

    #[test_case("AB", 10 ; "two glyphs")]
    #[test_case("AA", 11 ; "repeated glyph")]
    #[test_case("A", 5 ; "single glyph")]
    #[test_case("BAB", 15 ; "three glyphs")]
    #[test_case("\u{00A7}A", 6 ; "colour escape adds spacing only")]
    #[test_case("A\u{00A7}B", 11 ; "colour escape between glyphs")]
    #[test_case("\u{00A7}", 0 ; "lone colour escape")]
    #[test_case("A\nB", 11 ; "unregistered newline")]
    fn measure(text: &str, expected: u32) {
        assert_eq!(ab_font().measure_width(text), Ok(expected));
    }

    #[test]
    fn registered_newline_has_width() {
        let font = FontBuilder::new()
            .with_glyph('A', sprite(5, 7))
            .with_glyph('\n', sprite(2, 1))
            .build();
        assert_eq!(font.measure_width("A\nA"), Ok(5 + 2 + 5 + 2));
    }

    #[test_case("", true ; "empty text")]
    #[test_case("AB", true ; "known glyphs")]
    #[test_case("A\nB", true ; "newline needs no glyph")]
    #[test_case("\u{00A7}\u{00A7}", true ; "colour escapes need no glyph")]
    #[test_case("ABC", false ; "missing glyph at end")]
    #[test_case("a", false ; "lookup is case sensitive")]
    #[test_case(" ", false ; "space needs a glyph")]
    fn renderable(text: &str, expected: bool) {
        let font = ab_font();
        assert_eq!(font.is_renderable(text), expected);
        assert_eq!(font.measure_width(text).is_ok(), expected);
    }

    #[test]
    fn unrenderable_reports_first_missing_character() {
        let font = ab_font();
        assert_eq!(
            font.measure_width("AxBy"),
            Err(FontError::UnrenderableText { ch: 'x', index: 1 })
        );
        assert_eq!(font.first_unrenderable("AB\u{00A7}?"), Some((3, '?')));
    }

    #[test]
    fn sprites_can_be_shared() {
        let shared = Arc::new(sprite(3, 5));
        let font = FontBuilder::new()
            .with_glyph('O', Arc::clone(&shared))
            .with_glyph('0', Arc::clone(&shared))
            .build();

        assert_eq!(font.glyph_for('O'), font.glyph_for('0'));
        assert_eq!(Arc::strong_count(&shared), 3);
    }

    #[test]
    fn builder_can_measure() {
        let builder = FontBuilder::new().with_glyph('A', sprite(5, 7));
        assert!(builder.is_renderable("AA"));
        assert_eq!(builder.measure_width("AA"), Ok(11));
    }

    #[test]
    fn font_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Font>();
    }
}

use crate::errors::FontError;
use glyphmap_shared::types::Size;

/// The pixels of a single character. Pixels are stored row-major and are either solid (`true`)
/// or transparent (`false`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphSprite {
    width: u32,
    height: u32,
    pixels: Vec<bool>,
}

impl GlyphSprite {
    /// Creates a new sprite. Fails when `pixels` does not hold exactly `width * height` entries.
    pub fn new(width: u32, height: u32, pixels: Vec<bool>) -> Result<Self, FontError> {
        let expected = (width as usize).checked_mul(height as usize);
        if expected != Some(pixels.len()) {
            return Err(FontError::MalformedSprite {
                width,
                height,
                len: pixels.len(),
            });
        }

        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Creates a fully transparent sprite, mostly used for whitespace
    pub fn blank(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![false; width as usize * height as usize],
        }
    }

    /// Creates a sprite from text rows where `#` is a solid pixel and any other character is
    /// transparent. All rows must have the same length.
    ///
    /// ```
    /// use glyphmap_font::GlyphSprite;
    ///
    /// let sprite = GlyphSprite::from_rows(&[".#.", "#.#"]).unwrap();
    /// assert_eq!(sprite.width(), 3);
    /// assert!(sprite.pixel_at(1, 0));
    /// ```
    pub fn from_rows(rows: &[&str]) -> Result<Self, FontError> {
        let width = rows.first().map_or(0, |row| row.chars().count());
        let pixels: Vec<bool> = rows
            .iter()
            .flat_map(|row| row.chars().map(|c| c == '#'))
            .collect();

        if rows.iter().any(|row| row.chars().count() != width) {
            return Err(FontError::MalformedSprite {
                width: width as u32,
                height: rows.len() as u32,
                len: pixels.len(),
            });
        }

        Self::new(width as u32, rows.len() as u32, pixels)
    }

    /// Returns true when the pixel is solid. Anything outside the sprite is transparent.
    pub fn pixel_at(&self, row: i64, col: i64) -> bool {
        if row < 0 || col < 0 || row >= i64::from(self.height) || col >= i64::from(self.width) {
            return false;
        }

        self.pixels[row as usize * self.width as usize + col as usize]
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn size(&self) -> Size<u32> {
        Size::new(self.width, self.height)
    }
}

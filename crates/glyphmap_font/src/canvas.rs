use crate::errors::FontError;
use crate::font::GlyphSource;
use crate::layout::layout_text;
use glyphmap_shared::types::{Point, Size};

/// An in-memory surface of solid or transparent pixels. Anything drawn outside of the surface is
/// clipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    size: Size<u32>,
    pixels: Vec<bool>,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        let size = Size::new(width, height);
        Self {
            size,
            pixels: vec![false; size.area()],
        }
    }

    pub fn width(&self) -> u32 {
        self.size.width
    }

    pub fn height(&self) -> u32 {
        self.size.height
    }

    fn index(&self, x: i64, y: i64) -> Option<usize> {
        if x < 0 || y < 0 || x >= i64::from(self.size.width) || y >= i64::from(self.size.height) {
            return None;
        }

        Some(y as usize * self.size.width as usize + x as usize)
    }

    /// Returns true when the pixel is solid. Pixels outside the canvas are transparent.
    pub fn pixel(&self, x: i64, y: i64) -> bool {
        self.index(x, y).is_some_and(|idx| self.pixels[idx])
    }

    pub fn set_pixel(&mut self, x: i64, y: i64, solid: bool) {
        if let Some(idx) = self.index(x, y) {
            self.pixels[idx] = solid;
        }
    }

    pub fn clear(&mut self) {
        self.pixels.fill(false);
    }

    /// Number of solid pixels on the canvas
    pub fn solid_count(&self) -> usize {
        self.pixels.iter().filter(|&&p| p).count()
    }

    /// Draws `text` with its top-left corner at (`x`, `y`). Only solid glyph pixels are drawn, so
    /// whatever is on the canvas already shows through transparent pixels.
    pub fn draw_text<G>(
        &mut self,
        x: i64,
        y: i64,
        font: &G,
        text: &str,
        line_spacing: u32,
    ) -> Result<(), FontError>
    where
        G: GlyphSource + ?Sized,
    {
        let line_height = i64::from(font.line_height());
        let text_origin = Point::new(x, y);

        for placed in layout_text(font, text, line_spacing)? {
            let origin = text_origin.saturating_add(placed.position);

            for row in 0..line_height {
                for col in 0..i64::from(placed.sprite.width()) {
                    if placed.sprite.pixel_at(row, col) {
                        let pixel = origin.saturating_add(Point::new(col, row));
                        self.set_pixel(pixel.x, pixel.y, true);
                    }
                }
            }
        }

        Ok(())
    }

    /// Renders the canvas as text, one line per pixel row
    pub fn to_ascii(&self, solid: char, transparent: char) -> String {
        let width = self.size.width as usize;
        if width == 0 {
            return String::new();
        }

        self.pixels
            .chunks(width)
            .map(|row| {
                row.iter()
                    .map(|&p| if p { solid } else { transparent })
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

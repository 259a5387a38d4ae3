//! Glyphmap
//!
//! Bitmap fonts for low resolution pixel surfaces such as in-game maps. This crate ties the
//! workspace crates together:
//!
//! - `font`: sprites, fonts, layout and an in-memory canvas (`glyphmap_font`)
//! - `config`: the settings store (`glyphmap_config`)
//! - `types`: shared types (`glyphmap_shared`)

pub use glyphmap_config as config;
pub use glyphmap_font as font;
pub use glyphmap_shared::types;

pub mod prelude {
    pub use glyphmap_font::canvas::Canvas;
    pub use glyphmap_font::layout::{layout_text, replace_unrenderable, text_size, PlacedGlyph};
    pub use glyphmap_font::manager::{FontManager, DEFAULT_FONT_NAME};
    pub use glyphmap_font::{
        default_font, Font, FontBuilder, FontError, GlyphSource, GlyphSprite, COLOR_CHAR,
        NEWLINE_CHAR,
    };
}

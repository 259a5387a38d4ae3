//! Bitmap fonts for low resolution pixel surfaces
//!
//! A font maps characters onto [`GlyphSprite`]s, small fixed-size grids of solid or transparent
//! pixels. Fonts are assembled with a [`FontBuilder`] and frozen into an immutable [`Font`] that can
//! be shared freely between threads.
//!
//! - `sprite`: the per-character pixel grid
//! - `font`: building, freezing and measuring fonts
//! - `builtin`: the process-wide default font
//! - `manager`: a registry of named fonts in either building or frozen state
//! - `layout`: positions glyphs for a piece of text
//! - `canvas`: an in-memory pixel surface text can be drawn onto

pub mod builtin;
pub mod canvas;
pub mod errors;
pub mod font;
pub mod layout;
pub mod manager;
pub mod sprite;

pub use builtin::default_font;
pub use errors::FontError;
pub use font::{Font, FontBuilder, GlyphSource};
pub use sprite::GlyphSprite;

pub const LOG_TARGET: &str = "glyphmap-font";

/// Inline colour escape. Never needs a glyph and never takes up width.
pub const COLOR_CHAR: char = '\u{00A7}';

/// Line break. Never needs a glyph.
pub const NEWLINE_CHAR: char = '\n';

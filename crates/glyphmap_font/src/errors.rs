//! Errors that can be returned by the font engine
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FontError {
    /// The pixel data does not cover the sprite dimensions exactly
    #[error("size of pixel data ({len}) does not match dimensions {width}x{height}")]
    MalformedSprite { width: u32, height: u32, len: usize },

    /// The font has been frozen and does not accept new glyphs
    #[error("font {0} is frozen and cannot be modified")]
    FontFrozen(String),

    /// The text holds a character without a glyph
    #[error("text contains a character without a glyph: {ch:?} at position {index}")]
    UnrenderableText { ch: char, index: usize },

    #[error("font {0} is not known")]
    UnknownFont(String),

    #[error("font {0} already exists")]
    DuplicateFont(String),
}

use crate::builtin::shared_default_font;
use crate::errors::FontError;
use crate::font::{Font, FontBuilder};
use crate::sprite::GlyphSprite;
use crate::LOG_TARGET;
use log::{debug, warn};
use std::collections::HashMap;
use std::sync::Arc;

/// Name under which the built-in font is registered
pub const DEFAULT_FONT_NAME: &str = "default";

enum FontSlot {
    Building(FontBuilder),
    Frozen(Arc<Font>),
}

/// Keeps track of named fonts. Each font is either still being built, or frozen. Only frozen fonts
/// are handed out to renderers.
pub struct FontManager {
    fonts: HashMap<String, FontSlot>,
}

impl Default for FontManager {
    fn default() -> Self {
        Self::new()
    }
}

impl FontManager {
    /// Creates a manager that already holds the built-in font as a frozen font
    pub fn new() -> Self {
        let mut fonts = HashMap::new();
        fonts.insert(
            DEFAULT_FONT_NAME.to_string(),
            FontSlot::Frozen(shared_default_font()),
        );

        Self { fonts }
    }

    /// Starts a new, empty font
    pub fn create(&mut self, name: &str) -> Result<(), FontError> {
        if self.fonts.contains_key(name) {
            return Err(FontError::DuplicateFont(name.to_string()));
        }

        debug!(target: LOG_TARGET, "creating font {name}");
        self.fonts
            .insert(name.to_string(), FontSlot::Building(FontBuilder::new()));
        Ok(())
    }

    /// Sets the sprite for a character in the given font. Frozen fonts are left untouched.
    pub fn register_glyph(
        &mut self,
        name: &str,
        ch: char,
        sprite: impl Into<Arc<GlyphSprite>>,
    ) -> Result<(), FontError> {
        match self.fonts.get_mut(name) {
            Some(FontSlot::Building(builder)) => {
                builder.register_glyph(ch, sprite);
                Ok(())
            }
            Some(FontSlot::Frozen(_)) => {
                warn!(target: LOG_TARGET, "cannot register {ch:?}: font {name} is frozen");
                Err(FontError::FontFrozen(name.to_string()))
            }
            None => Err(FontError::UnknownFont(name.to_string())),
        }
    }

    /// Freezes the given font. A font can only be frozen once.
    pub fn freeze(&mut self, name: &str) -> Result<Arc<Font>, FontError> {
        let Some(slot) = self.fonts.get_mut(name) else {
            return Err(FontError::UnknownFont(name.to_string()));
        };

        let builder = match slot {
            FontSlot::Building(builder) => std::mem::take(builder),
            FontSlot::Frozen(_) => return Err(FontError::FontFrozen(name.to_string())),
        };

        let font = Arc::new(builder.build());
        *slot = FontSlot::Frozen(Arc::clone(&font));

        debug!(target: LOG_TARGET, "font {name} is frozen");
        Ok(font)
    }

    /// Returns the font with the given name, as long as it has been frozen
    pub fn font(&self, name: &str) -> Option<Arc<Font>> {
        match self.fonts.get(name) {
            Some(FontSlot::Frozen(font)) => Some(Arc::clone(font)),
            _ => None,
        }
    }

    /// Returns true for frozen fonts, false for fonts that are still building and None for
    /// unknown fonts
    pub fn is_frozen(&self, name: &str) -> Option<bool> {
        self.fonts
            .get(name)
            .map(|slot| matches!(slot, FontSlot::Frozen(_)))
    }

    /// Names of all fonts, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.fonts.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

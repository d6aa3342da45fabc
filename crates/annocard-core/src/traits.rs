//! The contracts that bind every stage together
//!
//! - [`FontRef`] - Your window into font data and metrics
//! - [`Renderer`] - Where a plan becomes an image
//! - [`ImageStore`] - Where an image becomes a saved file
//! - [`ContentResolver`] - How opaque content references reach font bytes

use std::io::Read;
use std::path::PathBuf;

use crate::{
    error::{PersistError, RenderError},
    plan::CardPlan,
    types::{FontMetrics, GlyphId, RasterImage},
};

/// Your key to unlocking font secrets
///
/// ```ignore
/// struct MyFont {
///     data: Vec<u8>,
/// }
///
/// impl FontRef for MyFont {
///     fn data(&self) -> &[u8] {
///         &self.data
///     }
///
///     fn units_per_em(&self) -> u16 {
///         1000
///     }
///
///     fn glyph_id(&self, ch: char) -> Option<GlyphId> {
///         Some(42)
///     }
///
///     fn advance_width(&self, glyph_id: GlyphId) -> f32 {
///         500.0
///     }
/// }
/// ```
pub trait FontRef: Send + Sync {
    /// Raw font bytes as they live in the file
    ///
    /// Empty for faces that only carry metrics; renderers draw nothing for them.
    fn data(&self) -> &[u8];

    /// Face within a collection file
    fn face_index(&self) -> u32 {
        0
    }

    /// The font's internal coordinate system scale
    fn units_per_em(&self) -> u16;

    /// Find the glyph that represents this character
    ///
    /// Returns None when the font doesn't contain this character.
    fn glyph_id(&self, ch: char) -> Option<GlyphId>;

    /// How wide this glyph stands, in font units
    fn advance_width(&self, glyph_id: GlyphId) -> f32;

    /// Ascent, descent and line gap in font units
    fn metrics(&self) -> Option<FontMetrics> {
        None
    }

    /// How many glyphs this font contains
    fn glyph_count(&self) -> Option<u32> {
        None
    }
}

/// Where a plan becomes visible
pub trait Renderer: Send + Sync {
    /// Your renderer's signature
    fn name(&self) -> &'static str;

    /// Rasterize the whole plan, or nothing at all
    fn render(&self, plan: &CardPlan) -> Result<RasterImage, RenderError>;
}

/// Where a finished card is saved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageLocation(pub String);

impl std::fmt::Display for ImageLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Platform gallery or photo store
pub trait ImageStore: Send + Sync {
    fn name(&self) -> &'static str;

    /// Save the image and report where it landed
    fn persist(&self, image: &RasterImage) -> Result<ImageLocation, PersistError>;
}

/// Turns `content://` references into font bytes
pub trait ContentResolver: Send + Sync {
    /// Whether fonts can be built straight from an opened stream
    fn supports_streaming(&self) -> bool {
        true
    }

    /// Open the referenced content for reading
    fn open(&self, uri: &str) -> std::io::Result<Box<dyn Read + Send>>;

    /// Map the reference onto a real filesystem path, if it has one
    fn real_path(&self, uri: &str) -> Option<PathBuf>;
}

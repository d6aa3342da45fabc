//! Where typefaces come from: font files, content references, system families
//!
//! The first stage of the pipeline. Whatever the reader configured, this
//! crate hands back something text can be measured and drawn with. A broken
//! font file never stops a card from being made; it just means the card is
//! set in the default sans-serif.
//!
//! ## Memory Management
//!
//! Fonts store their raw data and create `FontRef` on-demand for parsing.
//! Nothing is memory-mapped, so every file handle is closed as soon as the
//! bytes are read.

use std::fs;
use std::path::Path;

use read_fonts::{FontRef as ReadFontRef, TableProvider};

use annocard_core::{error::FontLoadError, traits::FontRef, types::FontMetrics};

pub mod builtin;
pub mod content;
pub mod resolver;
pub mod system;

pub use builtin::BuiltinFace;
pub use content::DirectoryContentResolver;
pub use resolver::{ResolvedTypefaces, TypefaceResolver};
pub use system::SystemFonts;

/// Maximum font file size (50MB) to prevent resource exhaustion.
pub const MAX_FONT_SIZE: u64 = 50 * 1024 * 1024;

/// A font that's been brought into memory, ready to measure text
///
/// Stores the raw font data and creates `FontRef` on-demand for parsing.
/// For TTC collections, the `face_index` specifies which face to use.
pub struct Font {
    data: Vec<u8>,
    face_index: u32,
    units_per_em: u16,
    metrics: Option<FontMetrics>,
}

impl Font {
    /// Opens a font file from disk and makes it usable
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, FontLoadError> {
        Self::from_file_index(path, 0)
    }

    /// Opens a specific face from a font file (for TTC collections)
    pub fn from_file_index(path: impl AsRef<Path>, face_index: u32) -> Result<Self, FontLoadError> {
        let path = path.as_ref();
        let meta = fs::metadata(path)
            .map_err(|_| FontLoadError::FileNotFound(path.display().to_string()))?;
        if meta.len() > MAX_FONT_SIZE {
            return Err(FontLoadError::TooLarge {
                size: meta.len(),
                max: MAX_FONT_SIZE,
            });
        }

        let data = fs::read(path)?;
        Self::from_data_index(data, face_index)
    }

    /// Turns raw font bytes into something we can work with
    pub fn from_data(data: Vec<u8>) -> Result<Self, FontLoadError> {
        Self::from_data_index(data, 0)
    }

    /// Turns raw font bytes into a specific face (for TTC collections)
    pub fn from_data_index(data: Vec<u8>, face_index: u32) -> Result<Self, FontLoadError> {
        if data.len() as u64 > MAX_FONT_SIZE {
            return Err(FontLoadError::TooLarge {
                size: data.len() as u64,
                max: MAX_FONT_SIZE,
            });
        }

        // Validate the font data by attempting to parse it
        let font_ref =
            ReadFontRef::from_index(&data, face_index).map_err(|_| FontLoadError::InvalidData)?;

        // Without a cmap there is nothing to measure
        if font_ref.cmap().is_err() {
            return Err(FontLoadError::InvalidData);
        }

        let units_per_em = font_ref
            .head()
            .map(|head| head.units_per_em())
            .unwrap_or(1000);
        let metrics = read_metrics(&font_ref, units_per_em);

        Ok(Font {
            data,
            face_index,
            units_per_em,
            metrics,
        })
    }

    /// Creates a FontRef on-demand for parsing operations
    fn font_ref(&self) -> Option<ReadFontRef<'_>> {
        ReadFontRef::from_index(&self.data, self.face_index).ok()
    }
}

/// Vertical metrics from `hhea`, or OS/2 typo metrics when `hhea` is empty
fn read_metrics(font: &ReadFontRef<'_>, units_per_em: u16) -> Option<FontMetrics> {
    let from_hhea = font
        .hhea()
        .ok()
        .map(|hhea| {
            (
                hhea.ascender().to_i16(),
                hhea.descender().to_i16(),
                hhea.line_gap().to_i16(),
            )
        })
        .filter(|(ascent, descent, _)| ascent > descent);

    let from_os2 = || {
        font.os2()
            .ok()
            .map(|os2| {
                (
                    os2.s_typo_ascender(),
                    os2.s_typo_descender(),
                    os2.s_typo_line_gap(),
                )
            })
            .filter(|(ascent, descent, _)| ascent > descent)
    };

    from_hhea
        .or_else(from_os2)
        .map(|(ascent, descent, line_gap)| FontMetrics {
            units_per_em,
            ascent,
            descent,
            line_gap,
        })
}

impl FontRef for Font {
    fn data(&self) -> &[u8] {
        &self.data
    }

    fn face_index(&self) -> u32 {
        self.face_index
    }

    fn units_per_em(&self) -> u16 {
        self.units_per_em
    }

    fn glyph_id(&self, ch: char) -> Option<u32> {
        self.font_ref()
            .and_then(|font| font.cmap().ok()?.map_codepoint(ch).map(|gid| gid.to_u32()))
            .filter(|gid| *gid != 0)
    }

    fn advance_width(&self, glyph_id: u32) -> f32 {
        self.font_ref()
            .and_then(|font| {
                let hmtx = font.hmtx().ok()?;
                let glyph = read_fonts::types::GlyphId::new(glyph_id);
                hmtx.advance(glyph).map(|advance| advance as f32)
            })
            .unwrap_or(self.units_per_em as f32 / 2.0)
    }

    fn metrics(&self) -> Option<FontMetrics> {
        self.metrics
    }

    fn glyph_count(&self) -> Option<u32> {
        self.font_ref()
            .and_then(|font| font.maxp().ok().map(|maxp| maxp.num_glyphs() as u32))
    }
}

impl std::fmt::Debug for Font {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Font")
            .field("bytes", &self.data.len())
            .field("face_index", &self.face_index)
            .field("units_per_em", &self.units_per_em)
            .finish()
    }
}

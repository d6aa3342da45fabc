//! The face of last resort
//!
//! Used only when no font file, content reference or system family can be
//! loaded at all. It has metrics but no outlines, so cards still get a
//! correct layout and the renderer simply draws no glyphs.

use annocard_core::{traits::FontRef, types::FontMetrics};

const UNITS_PER_EM: u16 = 1000;
const NARROW_ADVANCE: f32 = 600.0;
const WIDE_ADVANCE: f32 = 1000.0;

/// First code point treated as full-width (CJK radicals onwards)
const WIDE_START: u32 = 0x2E80;

/// Metrics-only face with fixed advances
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinFace;

impl BuiltinFace {
    pub fn new() -> Self {
        Self
    }
}

impl FontRef for BuiltinFace {
    fn data(&self) -> &[u8] {
        &[]
    }

    fn units_per_em(&self) -> u16 {
        UNITS_PER_EM
    }

    fn glyph_id(&self, ch: char) -> Option<u32> {
        Some(ch as u32)
    }

    fn advance_width(&self, glyph_id: u32) -> f32 {
        if glyph_id >= WIDE_START {
            WIDE_ADVANCE
        } else {
            NARROW_ADVANCE
        }
    }

    fn metrics(&self) -> Option<FontMetrics> {
        Some(FontMetrics {
            units_per_em: UNITS_PER_EM,
            ascent: 800,
            descent: -200,
            line_gap: 0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latin_is_narrow_cjk_is_wide() {
        let face = BuiltinFace::new();
        let a = face.glyph_id('a').unwrap_or(0);
        let han = face.glyph_id('感').unwrap_or(0);
        assert_eq!(face.advance_width(a), 600.0);
        assert_eq!(face.advance_width(han), 1000.0);
        assert!(face.data().is_empty());
    }
}

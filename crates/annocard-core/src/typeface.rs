//! A resolved typeface: the faces text is measured and drawn with
//!
//! The primary face answers first; fallback faces cover characters it lacks.
//! Shaping is plain left-to-right advancement, one glyph per character.

use std::path::PathBuf;
use std::sync::Arc;

use crate::{
    traits::FontRef,
    types::{GlyphId, SystemFamily},
};

/// Where the primary face came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypefaceOrigin {
    File(PathBuf),
    Content(String),
    System(SystemFamily),
    /// No usable font anywhere; metrics only
    Builtin,
}

/// A glyph placed along a run, relative to the run's origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapedGlyph {
    /// Index into [`Typeface::faces`]
    pub face: usize,
    pub id: GlyphId,
    pub x: f32,
    pub advance: f32,
    /// Byte offset of the source character
    pub cluster: usize,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShapedRun {
    pub glyphs: Vec<ShapedGlyph>,
    pub advance_width: f32,
}

/// Vertical extents of one line at a pixel size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineMetrics {
    pub ascent: f32,
    pub descent: f32,
}

impl LineMetrics {
    /// Distance from the top of the line to the bottom
    pub fn height(&self) -> f32 {
        self.ascent + self.descent
    }
}

const DEFAULT_ASCENT_EM: f32 = 0.8;
const DEFAULT_DESCENT_EM: f32 = 0.2;

#[derive(Clone)]
pub struct Typeface {
    faces: Vec<Arc<dyn FontRef>>,
    origin: TypefaceOrigin,
    synthetic_bold: bool,
}

impl Typeface {
    pub fn new(primary: Arc<dyn FontRef>, origin: TypefaceOrigin) -> Self {
        Self {
            faces: vec![primary],
            origin,
            synthetic_bold: false,
        }
    }

    /// Appends a face consulted for characters the earlier faces lack
    pub fn with_fallback(mut self, face: Arc<dyn FontRef>) -> Self {
        self.faces.push(face);
        self
    }

    /// Same faces, drawn with an extra outline stroke
    pub fn emboldened(&self) -> Self {
        Self {
            faces: self.faces.clone(),
            origin: self.origin.clone(),
            synthetic_bold: true,
        }
    }

    pub fn origin(&self) -> &TypefaceOrigin {
        &self.origin
    }

    pub fn faces(&self) -> &[Arc<dyn FontRef>] {
        &self.faces
    }

    pub fn primary(&self) -> &Arc<dyn FontRef> {
        &self.faces[0]
    }

    pub fn synthetic_bold(&self) -> bool {
        self.synthetic_bold
    }

    /// First face that maps the character, or `.notdef` in the primary
    pub fn lookup(&self, ch: char) -> (usize, GlyphId) {
        self.faces
            .iter()
            .enumerate()
            .find_map(|(idx, face)| face.glyph_id(ch).map(|gid| (idx, gid)))
            .unwrap_or((0, 0))
    }

    /// Place one glyph per character at the given pixel size
    pub fn shape(&self, text: &str, size: f32) -> ShapedRun {
        let mut glyphs = Vec::with_capacity(text.len());
        let mut x = 0.0;

        for (cluster, ch) in text.char_indices() {
            if ch.is_control() {
                continue;
            }
            let (face_idx, id) = self.lookup(ch);
            let face = &self.faces[face_idx];
            let scale = size / face.units_per_em().max(1) as f32;
            let advance = face.advance_width(id) * scale;

            glyphs.push(ShapedGlyph {
                face: face_idx,
                id,
                x,
                advance,
                cluster,
            });
            x += advance;
        }

        ShapedRun {
            glyphs,
            advance_width: x,
        }
    }

    /// Advance width of the text at the given pixel size
    pub fn measure(&self, text: &str, size: f32) -> f32 {
        text.chars()
            .filter(|ch| !ch.is_control())
            .map(|ch| {
                let (face_idx, id) = self.lookup(ch);
                let face = &self.faces[face_idx];
                face.advance_width(id) * size / face.units_per_em().max(1) as f32
            })
            .sum()
    }

    /// Ascent and descent of the primary face at the given pixel size
    pub fn line_metrics(&self, size: f32) -> LineMetrics {
        match self.primary().metrics() {
            Some(m) if m.units_per_em > 0 && m.ascent > m.descent => {
                let scale = size / m.units_per_em as f32;
                LineMetrics {
                    ascent: m.ascent as f32 * scale,
                    descent: -(m.descent as f32) * scale,
                }
            },
            _ => LineMetrics {
                ascent: DEFAULT_ASCENT_EM * size,
                descent: DEFAULT_DESCENT_EM * size,
            },
        }
    }
}

impl std::fmt::Debug for Typeface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Typeface")
            .field("origin", &self.origin)
            .field("faces", &self.faces.len())
            .field("synthetic_bold", &self.synthetic_bold)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FontMetrics;

    // Latin-only mock with fixed advances
    struct LatinFont;

    impl FontRef for LatinFont {
        fn data(&self) -> &[u8] {
            &[]
        }

        fn units_per_em(&self) -> u16 {
            1000
        }

        fn glyph_id(&self, ch: char) -> Option<u32> {
            ch.is_ascii().then_some(ch as u32)
        }

        fn advance_width(&self, _glyph_id: u32) -> f32 {
            500.0
        }

        fn metrics(&self) -> Option<FontMetrics> {
            Some(FontMetrics {
                units_per_em: 1000,
                ascent: 900,
                descent: -300,
                line_gap: 0,
            })
        }
    }

    // Covers everything, twice as wide
    struct WideFont;

    impl FontRef for WideFont {
        fn data(&self) -> &[u8] {
            &[]
        }

        fn units_per_em(&self) -> u16 {
            2000
        }

        fn glyph_id(&self, ch: char) -> Option<u32> {
            Some(ch as u32)
        }

        fn advance_width(&self, _glyph_id: u32) -> f32 {
            2000.0
        }
    }

    fn typeface() -> Typeface {
        Typeface::new(Arc::new(LatinFont), TypefaceOrigin::Builtin)
            .with_fallback(Arc::new(WideFont))
    }

    #[test]
    fn shape_advances_sequentially() {
        let run = typeface().shape("abc", 20.0);
        assert_eq!(run.glyphs.len(), 3);
        assert_eq!(run.glyphs[1].x, 10.0);
        assert_eq!(run.advance_width, 30.0);
    }

    #[test]
    fn missing_glyphs_use_fallback_face() {
        let tf = typeface();
        let run = tf.shape("a感", 20.0);
        assert_eq!(run.glyphs[0].face, 0);
        assert_eq!(run.glyphs[1].face, 1);
        assert_eq!(run.glyphs[1].cluster, 1);
        assert_eq!(run.advance_width, 10.0 + 20.0);
        assert_eq!(tf.measure("a感", 20.0), run.advance_width);
    }

    #[test]
    fn line_metrics_scale_with_size() {
        let metrics = typeface().line_metrics(10.0);
        assert_eq!(metrics.ascent, 9.0);
        assert_eq!(metrics.descent, 3.0);
        assert_eq!(metrics.height(), 12.0);
    }

    #[test]
    fn line_metrics_default_without_tables() {
        let tf = Typeface::new(Arc::new(WideFont), TypefaceOrigin::Builtin);
        let metrics = tf.line_metrics(10.0);
        assert!((metrics.height() - 10.0).abs() < 1e-4);
    }

    #[test]
    fn emboldened_keeps_faces() {
        let bold = typeface().emboldened();
        assert!(bold.synthetic_bold());
        assert_eq!(bold.faces().len(), 2);
    }
}

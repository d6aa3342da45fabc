//! The data structures that flow between stages

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::style::Color;

/// Unique identifier for a glyph within a font
pub type GlyphId = u32;

/// Prefix that marks a typeface setting as an opaque content reference
pub const CONTENT_SCHEME: &str = "content://";

/// One saved note, ready to be turned into a card
///
/// Built fresh for every share action and dropped once the image exists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnotationCard {
    pub book_name: String,
    pub book_author: String,
    pub chapter_name: String,
    /// The passage the reader selected
    pub excerpt: String,
    /// The reader's own words about the passage
    pub reflection: String,
    pub theme: usize,
}

impl AnnotationCard {
    /// Left header label: book name and author, trimmed
    pub fn left_label(&self) -> String {
        format!("{} {}", self.book_name, self.book_author)
            .trim()
            .to_string()
    }

    /// Right header label: the chapter name
    pub fn right_label(&self) -> &str {
        &self.chapter_name
    }
}

/// The three families every platform is expected to have
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SystemFamily {
    #[default]
    SansSerif,
    Serif,
    Monospace,
}

impl SystemFamily {
    /// Maps the stored integer preference: 1 is serif, 2 is monospace, anything else sans
    pub fn from_preference(preference: i64) -> Self {
        match preference {
            1 => SystemFamily::Serif,
            2 => SystemFamily::Monospace,
            _ => SystemFamily::SansSerif,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SystemFamily::SansSerif => "sans-serif",
            SystemFamily::Serif => "serif",
            SystemFamily::Monospace => "monospace",
        }
    }
}

/// Where the reading typeface comes from
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypefaceSource {
    SystemFamily(SystemFamily),
    FileReference(PathBuf),
    ContentReference(String),
    Unset,
}

impl TypefaceSource {
    /// Classifies a stored typeface setting
    ///
    /// Empty means unset, a `content://` prefix means a content reference,
    /// anything else is a file path.
    pub fn from_config(value: &str) -> Self {
        if value.is_empty() {
            TypefaceSource::Unset
        } else if value.starts_with(CONTENT_SCHEME) {
            TypefaceSource::ContentReference(value.to_string())
        } else {
            TypefaceSource::FileReference(PathBuf::from(value))
        }
    }
}

/// Font-wide vertical metrics in font units
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FontMetrics {
    pub units_per_em: u16,
    /// Distance above the baseline (positive)
    pub ascent: i16,
    /// Distance below the baseline (negative, as stored in the font)
    pub descent: i16,
    pub line_gap: i16,
}

/// One wrapped line: a byte range of the layout's text plus where it sits
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineRecord {
    pub start: usize,
    pub end: usize,
    /// Baseline offset from the top of the layout
    pub baseline: f32,
    /// Measured advance of the visible content (trailing whitespace excluded)
    pub width: f32,
}

/// A string wrapped to a pixel width, measured but not drawn
#[derive(Debug, Clone, PartialEq)]
pub struct TextLayout {
    pub text: String,
    pub lines: Vec<LineRecord>,
    pub height: f32,
    pub font_size: f32,
    pub target_width: f32,
}

impl TextLayout {
    /// Zero lines, zero height
    pub fn empty(font_size: f32, target_width: f32) -> Self {
        Self {
            text: String::new(),
            lines: Vec::new(),
            height: 0.0,
            font_size,
            target_width,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Text of one line, or an empty string for an out-of-range index
    pub fn line_text(&self, index: usize) -> &str {
        self.lines
            .get(index)
            .and_then(|line| self.text.get(line.start..line.end))
            .unwrap_or("")
    }

    /// Height rounded up to whole pixels
    pub fn pixel_height(&self) -> u32 {
        self.height.ceil().max(0.0) as u32
    }
}

/// A header that fits its width
#[derive(Debug, Clone, PartialEq)]
pub struct MetadataFitResult {
    /// Chosen pixel size, within [floor, start]
    pub size: f32,
    pub left: String,
    pub right: String,
    /// Whether the floor-size truncation branch produced this result
    pub truncated: bool,
}

/// A finished card: straight (non-premultiplied) RGBA8, row-major
#[derive(Clone, PartialEq, Eq)]
pub struct RasterImage {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl RasterImage {
    /// Color at a pixel, `None` outside the image
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = ((y as usize) * (self.width as usize) + x as usize) * 4;
        let px = self.data.get(idx..idx + 4)?;
        Some(Color::rgba(px[0], px[1], px[2], px[3]))
    }

    /// Pixels packed as 32-bit ARGB words
    pub fn to_argb(&self) -> Vec<u32> {
        self.data
            .chunks_exact(4)
            .map(|px| {
                (px[3] as u32) << 24 | (px[0] as u32) << 16 | (px[1] as u32) << 8 | px[2] as u32
            })
            .collect()
    }
}

impl std::fmt::Debug for RasterImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RasterImage")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.data.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typeface_setting_shapes() {
        assert_eq!(TypefaceSource::from_config(""), TypefaceSource::Unset);
        assert_eq!(
            TypefaceSource::from_config("content://fonts/1"),
            TypefaceSource::ContentReference("content://fonts/1".into())
        );
        assert_eq!(
            TypefaceSource::from_config("/sdcard/Fonts/kai.ttf"),
            TypefaceSource::FileReference(PathBuf::from("/sdcard/Fonts/kai.ttf"))
        );
        assert_eq!(
            TypefaceSource::from_config("fonts/relative.otf"),
            TypefaceSource::FileReference(PathBuf::from("fonts/relative.otf"))
        );
    }

    #[test]
    fn system_preference_maps_unknown_to_sans() {
        assert_eq!(SystemFamily::from_preference(0), SystemFamily::SansSerif);
        assert_eq!(SystemFamily::from_preference(1), SystemFamily::Serif);
        assert_eq!(SystemFamily::from_preference(2), SystemFamily::Monospace);
        assert_eq!(SystemFamily::from_preference(7), SystemFamily::SansSerif);
        assert_eq!(SystemFamily::from_preference(-1), SystemFamily::SansSerif);
    }

    #[test]
    fn left_label_trims_missing_author() {
        let card = AnnotationCard {
            book_name: "Walden".into(),
            ..Default::default()
        };
        assert_eq!(card.left_label(), "Walden");
        assert_eq!(card.right_label(), "");
    }

    #[test]
    fn raster_pixel_and_argb_agree() {
        let image = RasterImage {
            width: 2,
            height: 1,
            data: vec![10, 20, 30, 255, 0, 0, 0, 0],
        };
        assert_eq!(image.pixel(0, 0), Some(Color::rgba(10, 20, 30, 255)));
        assert_eq!(image.pixel(2, 0), None);
        assert_eq!(image.to_argb(), vec![0xFF0A141E, 0]);
    }

    #[test]
    fn empty_layout_has_no_lines() {
        let layout = TextLayout::empty(16.0, 100.0);
        assert!(layout.is_empty());
        assert_eq!(layout.pixel_height(), 0);
        assert_eq!(layout.line_text(0), "");
    }
}

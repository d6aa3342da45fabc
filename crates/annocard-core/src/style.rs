//! Colors, themes, and the card's fixed geometry

use serde::{Deserialize, Serialize};

/// Simple RGBA color that works everywhere
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color from `0xRRGGBB`
    pub const fn rgb_hex(rgb: u32) -> Self {
        Self::rgba((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8, 255)
    }

    pub const fn black() -> Self {
        Self::rgba(0, 0, 0, 255)
    }

    pub const fn white() -> Self {
        Self::rgba(255, 255, 255, 255)
    }

    pub const fn transparent() -> Self {
        Self::rgba(0, 0, 0, 0)
    }

    /// Same color, different alpha
    pub const fn with_alpha(self, a: u8) -> Self {
        Self::rgba(self.r, self.g, self.b, a)
    }
}

/// A share style: one accent, one surface, one ink
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub name: &'static str,
    /// Strip, border, header labels, accent bar, divider, panel tint, title
    pub accent: Color,
    /// Card background
    pub surface: Color,
    /// Excerpt and reflection body text
    pub text: Color,
}

static THEMES: [Theme; 5] = [
    Theme {
        name: "default",
        accent: Color::rgb_hex(0x5A7C62),
        surface: Color::rgb_hex(0xF5F5F0),
        text: Color::rgb_hex(0x3D3D3D),
    },
    Theme {
        name: "clay",
        accent: Color::rgb_hex(0xB0703C),
        surface: Color::rgb_hex(0xFFF3DC),
        text: Color::rgb_hex(0x4A3B2A),
    },
    Theme {
        name: "ink",
        accent: Color::rgb_hex(0x2F2F2F),
        surface: Color::rgb_hex(0xFAFAFA),
        text: Color::rgb_hex(0x1F1F1F),
    },
    Theme {
        name: "retro",
        accent: Color::rgb_hex(0x8B5A3C),
        surface: Color::rgb_hex(0xEFE3D3),
        text: Color::rgb_hex(0x4B3621),
    },
    Theme {
        name: "black-gold",
        accent: Color::rgb_hex(0xC9A45C),
        surface: Color::rgb_hex(0x1E1E1E),
        text: Color::rgb_hex(0xE8E0CC),
    },
];

impl Theme {
    /// All built-in themes, in selection order
    pub fn all() -> &'static [Theme] {
        &THEMES
    }

    /// Looks up a theme; an out-of-range index selects the default
    pub fn by_index(index: usize) -> &'static Theme {
        THEMES.get(index).unwrap_or(&THEMES[0])
    }

    /// Tint behind the excerpt accent bar
    pub fn accent_bar(&self) -> Color {
        self.accent.with_alpha(0x66)
    }

    /// Fill of the reflection panel
    pub fn panel(&self) -> Color {
        self.accent.with_alpha(0x14)
    }

    /// Divider opacity at its center
    pub fn divider_peak(&self) -> Color {
        self.accent.with_alpha(0x80)
    }
}

/// Every fixed measurement of the card
///
/// Paddings, gaps and radii are canvas pixels. Text sizes are sp-equivalent
/// and multiplied by `text_scale` before use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardStyle {
    pub width: u32,
    pub horizontal_padding: f32,
    pub accent_strip_height: f32,
    pub top_padding: f32,
    pub bottom_padding: f32,
    pub text_inset: f32,
    pub text_scale: f32,

    pub header_start_size: f32,
    pub header_floor_size: f32,
    pub header_size_step: f32,
    pub header_gap: f32,
    /// Right label share of the header width when truncating
    pub header_right_share: f32,
    /// Minimum left label share of the header width when truncating
    pub header_left_share: f32,

    pub excerpt_size: f32,
    pub excerpt_line_spacing: f32,
    pub excerpt_top_gap: f32,
    pub excerpt_bottom_gap: f32,
    pub accent_bar_width: f32,

    pub divider_top_gap: f32,
    pub divider_width: f32,
    pub divider_bottom_gap: f32,

    pub reflection_title: String,
    pub reflection_title_size: f32,
    pub reflection_size: f32,
    pub reflection_line_spacing: f32,
    pub panel_padding_top: f32,
    pub panel_padding_horizontal: f32,
    pub panel_title_gap: f32,
    pub panel_padding_bottom: f32,
    pub panel_radius: f32,

    pub card_radius: f32,
    pub border_width: f32,
}

impl Default for CardStyle {
    fn default() -> Self {
        Self {
            width: 1125,
            horizontal_padding: 36.0,
            accent_strip_height: 6.0,
            top_padding: 22.0,
            bottom_padding: 28.0,
            text_inset: 14.0,
            text_scale: 3.0,

            header_start_size: 12.0,
            header_floor_size: 10.0,
            header_size_step: 0.5,
            header_gap: 24.0,
            header_right_share: 0.38,
            header_left_share: 0.40,

            excerpt_size: 18.0,
            excerpt_line_spacing: 1.8,
            excerpt_top_gap: 16.0,
            excerpt_bottom_gap: 18.0,
            accent_bar_width: 3.0,

            divider_top_gap: 2.0,
            divider_width: 1.0,
            divider_bottom_gap: 18.0,

            reflection_title: "[感想]".to_string(),
            reflection_title_size: 16.0,
            reflection_size: 16.0,
            reflection_line_spacing: 1.6,
            panel_padding_top: 12.0,
            panel_padding_horizontal: 14.0,
            panel_title_gap: 10.0,
            panel_padding_bottom: 14.0,
            panel_radius: 8.0,

            card_radius: 22.0,
            border_width: 1.5,
        }
    }
}

impl CardStyle {
    /// Width between the horizontal paddings
    pub fn content_width(&self) -> f32 {
        self.width as f32 - self.horizontal_padding * 2.0
    }

    /// Wrap width for excerpt and reflection text
    pub fn text_width(&self) -> f32 {
        self.content_width() - self.text_inset * 2.0
    }

    /// Converts an sp-equivalent size to canvas pixels
    pub fn px(&self, sp: f32) -> f32 {
        sp * self.text_scale
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_range_theme_falls_back_to_default() {
        assert_eq!(Theme::by_index(4).name, "black-gold");
        assert_eq!(Theme::by_index(5).name, "default");
        assert_eq!(Theme::by_index(usize::MAX).name, "default");
        assert_eq!(Theme::all().len(), 5);
    }

    #[test]
    fn default_theme_matches_accent_green() {
        let theme = Theme::by_index(0);
        assert_eq!(theme.accent, Color::rgba(0x5A, 0x7C, 0x62, 0xFF));
        assert_eq!(theme.panel().a, 0x14);
        assert_eq!(theme.accent_bar().a, 0x66);
    }

    #[test]
    fn default_style_content_width() {
        let style = CardStyle::default();
        assert_eq!(style.content_width(), 1053.0);
        assert_eq!(style.text_width(), 1025.0);
        assert_eq!(style.px(12.0), 36.0);
    }

    #[test]
    fn partial_style_json_keeps_defaults() {
        let style: CardStyle = serde_json::from_str(r#"{"width": 900}"#).unwrap();
        assert_eq!(style.width, 900);
        assert_eq!(style.horizontal_padding, 36.0);
        assert_eq!(style.reflection_title, "[感想]");
    }
}

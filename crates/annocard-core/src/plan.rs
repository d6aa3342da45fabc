//! The card plan: every shape and run of text with absolute geometry
//!
//! A plan is produced once by the layout planner and read once by a
//! renderer. Ops are stored in paint order, so the renderer never reorders
//! or measures anything.

use crate::{style::Color, typeface::Typeface, types::TextLayout};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle in canvas pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Rect {
    pub const fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }
}

/// A color at a position along a gradient, 0.0 to 1.0
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientStop {
    pub offset: f32,
    pub color: Color,
}

impl GradientStop {
    pub const fn new(offset: f32, color: Color) -> Self {
        Self { offset, color }
    }
}

/// Which of the plan's two typefaces a run uses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaceWeight {
    Regular,
    Bold,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    /// Pixel size
    pub size: f32,
    pub color: Color,
    pub weight: FaceWeight,
}

/// One draw instruction
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    FillRect {
        rect: Rect,
        color: Color,
    },
    FillRoundRect {
        rect: Rect,
        radius: f32,
        color: Color,
    },
    StrokeRoundRect {
        rect: Rect,
        radius: f32,
        width: f32,
        color: Color,
    },
    /// A straight stroke whose color follows `stops` from `from` to `to`
    GradientLine {
        from: Point,
        to: Point,
        width: f32,
        stops: Vec<GradientStop>,
    },
    /// A single run; `origin.y` is the baseline
    Text {
        text: String,
        origin: Point,
        style: TextStyle,
    },
    /// A wrapped block; `origin` is the layout's top-left corner
    Paragraph {
        origin: Point,
        layout: TextLayout,
        style: TextStyle,
    },
}

/// Heights of the card's variable sections, for callers and tests
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PlanMetrics {
    pub header_height: f32,
    pub excerpt_height: f32,
    pub title_height: f32,
    pub reflection_height: f32,
    pub panel_height: f32,
    pub header_size: f32,
}

/// A fully positioned card, ready to rasterize
#[derive(Debug, Clone)]
pub struct CardPlan {
    pub width: u32,
    pub height: u32,
    pub regular: Typeface,
    pub bold: Typeface,
    pub ops: Vec<DrawOp>,
    pub metrics: PlanMetrics,
}

impl CardPlan {
    /// Typeface used by runs of the given weight
    pub fn typeface(&self, weight: FaceWeight) -> &Typeface {
        match weight {
            FaceWeight::Regular => &self.regular,
            FaceWeight::Bold => &self.bold,
        }
    }
}

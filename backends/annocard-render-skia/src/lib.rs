//! Skia Renderer - card plans rasterized via tiny-skia
//!
//! Walks a [`CardPlan`] op by op and paints it onto one canvas. Shapes go
//! through kurbo paths, glyphs through skrifa outlines, and both are filled
//! with tiny-skia's anti-aliased rasterizer at fractional positions.
//!
//! The canvas is premultiplied while drawing and converted to straight
//! RGBA once at the end. Any failure drops the canvas: callers get either
//! a finished image or an error, never a half-painted card.

use kurbo::{PathEl, RoundedRect, Shape};
use skrifa::{
    instance::{LocationRef, Size},
    outline::{DrawSettings, OutlineGlyphCollection},
    MetadataProvider,
};
use tiny_skia::{
    FillRule, LinearGradient, Paint, PathBuilder, Pixmap, SpreadMode, Stroke, Transform,
};

use annocard_core::{
    error::RenderError,
    plan::{CardPlan, DrawOp, GradientStop, Point, Rect, TextStyle},
    traits::Renderer,
    types::{RasterImage, TextLayout},
    Color, Typeface,
};

/// Tolerance when flattening rounded corners into curves
const CURVE_TOLERANCE: f64 = 0.1;

/// Synthetic bold stroke width as a fraction of the font size
const EMBOLDEN_RATIO: f32 = 1.0 / 24.0;

/// tiny-skia powered renderer for annotation cards
pub struct SkiaRenderer {
    /// Maximum canvas dimension to prevent memory exhaustion
    max_size: u32,
}

impl SkiaRenderer {
    pub fn new() -> Self {
        Self { max_size: 16384 }
    }

    /// Renderer that refuses canvases larger than `max_size` on either side
    pub fn with_max_size(max_size: u32) -> Self {
        Self { max_size }
    }

    fn draw_op(
        &self,
        pixmap: &mut Pixmap,
        plan: &CardPlan,
        op: &DrawOp,
    ) -> Result<(), RenderError> {
        match op {
            DrawOp::FillRect { rect, color } => {
                let Some(rect) = to_skia_rect(rect) else {
                    log::trace!("Skia: skipping empty rect");
                    return Ok(());
                };
                pixmap.fill_rect(rect, &solid(*color), Transform::identity(), None);
            },
            DrawOp::FillRoundRect {
                rect,
                radius,
                color,
            } => {
                let path = rounded_rect_path(rect, *radius)?;
                pixmap.fill_path(
                    &path,
                    &solid(*color),
                    FillRule::Winding,
                    Transform::identity(),
                    None,
                );
            },
            DrawOp::StrokeRoundRect {
                rect,
                radius,
                width,
                color,
            } => {
                let path = rounded_rect_path(rect, *radius)?;
                let stroke = Stroke {
                    width: *width,
                    ..Stroke::default()
                };
                pixmap.stroke_path(&path, &solid(*color), &stroke, Transform::identity(), None);
            },
            DrawOp::GradientLine {
                from,
                to,
                width,
                stops,
            } => draw_gradient_line(pixmap, *from, *to, *width, stops)?,
            DrawOp::Text {
                text,
                origin,
                style,
            } => {
                let typeface = plan.typeface(style.weight);
                draw_run(pixmap, typeface, text, origin.x, origin.y, style)?;
            },
            DrawOp::Paragraph {
                origin,
                layout,
                style,
            } => {
                let typeface = plan.typeface(style.weight);
                draw_paragraph(pixmap, typeface, layout, *origin, style)?;
            },
        }
        Ok(())
    }
}

impl Default for SkiaRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for SkiaRenderer {
    fn name(&self) -> &'static str {
        "skia"
    }

    fn render(&self, plan: &CardPlan) -> Result<RasterImage, RenderError> {
        let (width, height) = (plan.width, plan.height);
        if width == 0 || height == 0 || width > self.max_size || height > self.max_size {
            return Err(RenderError::InvalidDimensions { width, height });
        }

        let mut pixmap =
            Pixmap::new(width, height).ok_or(RenderError::PixmapCreationFailed { width, height })?;

        for op in &plan.ops {
            self.draw_op(&mut pixmap, plan, op)?;
        }

        log::debug!(
            "Skia: rendered {} ops onto {}x{} canvas",
            plan.ops.len(),
            width,
            height
        );

        Ok(RasterImage {
            width,
            height,
            data: demultiply(pixmap.take()),
        })
    }
}

fn solid(color: Color) -> Paint<'static> {
    let mut paint = Paint {
        anti_alias: true,
        ..Default::default()
    };
    paint.set_color_rgba8(color.r, color.g, color.b, color.a);
    paint
}

fn to_skia_color(color: Color) -> tiny_skia::Color {
    tiny_skia::Color::from_rgba8(color.r, color.g, color.b, color.a)
}

fn to_skia_rect(rect: &Rect) -> Option<tiny_skia::Rect> {
    tiny_skia::Rect::from_ltrb(rect.left, rect.top, rect.right, rect.bottom)
}

fn rounded_rect_path(rect: &Rect, radius: f32) -> Result<tiny_skia::Path, RenderError> {
    let shape = RoundedRect::new(
        rect.left as f64,
        rect.top as f64,
        rect.right as f64,
        rect.bottom as f64,
        radius as f64,
    );
    kurbo_to_skia(shape.path_elements(CURVE_TOLERANCE)).ok_or(RenderError::PathBuildingFailed)
}

/// Translate kurbo's path format into tiny-skia's native format
fn kurbo_to_skia(elements: impl IntoIterator<Item = PathEl>) -> Option<tiny_skia::Path> {
    let mut builder = PathBuilder::new();
    for element in elements {
        match element {
            PathEl::MoveTo(p) => builder.move_to(p.x as f32, p.y as f32),
            PathEl::LineTo(p) => builder.line_to(p.x as f32, p.y as f32),
            PathEl::QuadTo(ctrl, end) => {
                builder.quad_to(ctrl.x as f32, ctrl.y as f32, end.x as f32, end.y as f32)
            },
            PathEl::CurveTo(c1, c2, end) => builder.cubic_to(
                c1.x as f32,
                c1.y as f32,
                c2.x as f32,
                c2.y as f32,
                end.x as f32,
                end.y as f32,
            ),
            PathEl::ClosePath => builder.close(),
        }
    }
    builder.finish()
}

fn draw_gradient_line(
    pixmap: &mut Pixmap,
    from: Point,
    to: Point,
    width: f32,
    stops: &[GradientStop],
) -> Result<(), RenderError> {
    let start = tiny_skia::Point::from_xy(from.x, from.y);
    let end = tiny_skia::Point::from_xy(to.x, to.y);
    let stops = stops
        .iter()
        .map(|stop| {
            tiny_skia::GradientStop::new(stop.offset.clamp(0.0, 1.0), to_skia_color(stop.color))
        })
        .collect();
    let shader = LinearGradient::new(start, end, stops, SpreadMode::Pad, Transform::identity())
        .ok_or_else(|| RenderError::BackendError("degenerate divider gradient".to_string()))?;

    let mut builder = PathBuilder::new();
    builder.move_to(from.x, from.y);
    builder.line_to(to.x, to.y);
    let path = builder.finish().ok_or(RenderError::PathBuildingFailed)?;

    let paint = Paint {
        shader,
        anti_alias: true,
        ..Default::default()
    };
    let stroke = Stroke {
        width,
        ..Stroke::default()
    };
    pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
    Ok(())
}

fn draw_paragraph(
    pixmap: &mut Pixmap,
    typeface: &Typeface,
    layout: &TextLayout,
    origin: Point,
    style: &TextStyle,
) -> Result<(), RenderError> {
    for (index, line) in layout.lines.iter().enumerate() {
        let text = layout.line_text(index);
        if text.is_empty() {
            continue;
        }
        draw_run(
            pixmap,
            typeface,
            text,
            origin.x,
            origin.y + line.baseline,
            style,
        )?;
    }
    Ok(())
}

/// Paints one run of text with its baseline at `baseline`
fn draw_run(
    pixmap: &mut Pixmap,
    typeface: &Typeface,
    text: &str,
    x: f32,
    baseline: f32,
    style: &TextStyle,
) -> Result<(), RenderError> {
    let run = typeface.shape(text, style.size);
    if run.glyphs.is_empty() {
        return Ok(());
    }

    // One outline table per face, built lazily; faces without data draw nothing
    let mut outlines: Vec<Option<Option<OutlineGlyphCollection<'_>>>> =
        typeface.faces().iter().map(|_| None).collect();

    let paint = solid(style.color);
    let embolden = typeface.synthetic_bold().then(|| Stroke {
        width: style.size * EMBOLDEN_RATIO,
        ..Stroke::default()
    });

    for glyph in &run.glyphs {
        let slot = &mut outlines[glyph.face];
        if slot.is_none() {
            *slot = Some(outline_collection(typeface, glyph.face)?);
        }
        let Some(Some(collection)) = slot.as_ref() else {
            continue;
        };

        let Some(path) = glyph_path(collection, glyph.id, style.size)? else {
            continue;
        };

        // Fonts are y-up, the canvas is y-down
        let transform = Transform::from_row(1.0, 0.0, 0.0, -1.0, x + glyph.x, baseline);
        pixmap.fill_path(&path, &paint, FillRule::Winding, transform, None);
        if let Some(stroke) = &embolden {
            pixmap.stroke_path(&path, &paint, stroke, transform, None);
        }
    }
    Ok(())
}

fn outline_collection(
    typeface: &Typeface,
    face: usize,
) -> Result<Option<OutlineGlyphCollection<'_>>, RenderError> {
    let Some(font) = typeface.faces().get(face) else {
        return Ok(None);
    };
    let data = font.data();
    if data.is_empty() {
        return Ok(None);
    }
    let font_ref = skrifa::FontRef::from_index(data, font.face_index())
        .map_err(|err| RenderError::BackendError(format!("unreadable face {face}: {err}")))?;
    Ok(Some(font_ref.outline_glyphs()))
}

/// Glyph outline in pixel units, `None` for glyphs with nothing to draw
fn glyph_path(
    outlines: &OutlineGlyphCollection<'_>,
    glyph_id: u32,
    size: f32,
) -> Result<Option<tiny_skia::Path>, RenderError> {
    let Some(glyph) = outlines.get(skrifa::GlyphId::new(glyph_id)) else {
        log::warn!("Skia: glyph {} has no outline", glyph_id);
        return Ok(None);
    };

    let mut path = kurbo::BezPath::new();
    let mut pen = PathPen { path: &mut path };
    let settings = DrawSettings::unhinted(Size::new(size), LocationRef::default());
    glyph
        .draw(settings, &mut pen)
        .map_err(|err| RenderError::BackendError(format!("glyph {glyph_id}: {err}")))?;

    if path.elements().is_empty() {
        return Ok(None);
    }
    kurbo_to_skia(path.elements().iter().copied())
        .map(Some)
        .ok_or(RenderError::PathBuildingFailed)
}

/// Convert the premultiplied canvas back to straight RGBA for output
fn demultiply(mut data: Vec<u8>) -> Vec<u8> {
    for px in data.chunks_exact_mut(4) {
        let a = px[3];
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        if a == 255 {
            continue;
        }
        let a_u = a as u32;
        px[0] = ((px[0] as u32 * 255 + a_u / 2) / a_u).min(255) as u8;
        px[1] = ((px[1] as u32 * 255 + a_u / 2) / a_u).min(255) as u8;
        px[2] = ((px[2] as u32 * 255 + a_u / 2) / a_u).min(255) as u8;
    }
    data
}

/// Bridge between skrifa's outline commands and kurbo's path format
struct PathPen<'a> {
    path: &'a mut kurbo::BezPath,
}

impl skrifa::outline::OutlinePen for PathPen<'_> {
    fn move_to(&mut self, x: f32, y: f32) {
        self.path.move_to((x as f64, y as f64));
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.path.line_to((x as f64, y as f64));
    }

    fn quad_to(&mut self, cx0: f32, cy0: f32, x: f32, y: f32) {
        self.path
            .quad_to((cx0 as f64, cy0 as f64), (x as f64, y as f64));
    }

    fn curve_to(&mut self, cx0: f32, cy0: f32, cx1: f32, cy1: f32, x: f32, y: f32) {
        self.path.curve_to(
            (cx0 as f64, cy0 as f64),
            (cx1 as f64, cy1 as f64),
            (x as f64, y as f64),
        );
    }

    fn close(&mut self) {
        self.path.close_path();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_renderer_default() {
        let renderer = SkiaRenderer::default();
        assert_eq!(renderer.name(), "skia");
        assert_eq!(renderer.max_size, 16384);
    }

    #[test]
    fn demultiply_restores_straight_color() {
        // 50% red, premultiplied
        let out = demultiply(vec![128, 0, 0, 128, 0, 0, 0, 0, 10, 20, 30, 255]);
        assert_eq!(&out[0..4], &[255, 0, 0, 128]);
        assert_eq!(&out[4..8], &[0, 0, 0, 0]);
        assert_eq!(&out[8..12], &[10, 20, 30, 255]);
    }

    #[test]
    fn rounded_rect_builds_a_path() {
        let rect = Rect::new(0.0, 0.0, 100.0, 40.0);
        let path = rounded_rect_path(&rect, 8.0).unwrap();
        let bounds = path.bounds();
        assert_eq!(bounds.width(), 100.0);
        assert_eq!(bounds.height(), 40.0);
    }
}

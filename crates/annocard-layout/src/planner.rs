//! Composes the whole card at a fixed width
//!
//! Every height is measured before any geometry is fixed: header, excerpt
//! and reflection are laid out first, their heights summed with the fixed
//! gaps, and only then are the draw ops placed top to bottom.

use annocard_core::{
    plan::{CardPlan, DrawOp, FaceWeight, GradientStop, PlanMetrics, Point, Rect, TextStyle},
    AnnotationCard, CardStyle, Theme, Typeface,
};

use crate::{fit::MetadataFitter, flow::TextFlowEngine};

pub struct CardLayoutPlanner {
    style: CardStyle,
    flow: TextFlowEngine,
}

impl CardLayoutPlanner {
    pub fn new(style: CardStyle) -> Self {
        Self {
            style,
            flow: TextFlowEngine::new(),
        }
    }

    pub fn style(&self) -> &CardStyle {
        &self.style
    }

    /// Lay out one card
    ///
    /// `reflection` is drawn in the panel in place of the card's stored
    /// reflection, so callers can share an edited version.
    pub fn plan(
        &self,
        card: &AnnotationCard,
        reflection: &str,
        theme: &Theme,
        regular: &Typeface,
        bold: &Typeface,
    ) -> CardPlan {
        let style = &self.style;
        let width = style.width as f32;
        let pad = style.horizontal_padding;
        let content_width = style.content_width();
        let text_width = style.text_width();

        // Measure
        let header = MetadataFitter::from_style(style).fit(
            &card.left_label(),
            card.right_label(),
            regular,
            content_width,
        );
        let header_metrics = regular.line_metrics(header.size);

        let excerpt_size = style.px(style.excerpt_size);
        let excerpt = self.flow.flow(
            &card.excerpt,
            regular,
            excerpt_size,
            text_width,
            style.excerpt_line_spacing,
        );

        let title_size = style.px(style.reflection_title_size);
        let title_metrics = bold.line_metrics(title_size);

        let reflection_size = style.px(style.reflection_size);
        let reflection = self.flow.flow(
            reflection,
            regular,
            reflection_size,
            text_width,
            style.reflection_line_spacing,
        );

        let panel_height = style.panel_padding_top
            + title_metrics.height()
            + style.panel_title_gap
            + reflection.height
            + style.panel_padding_bottom;

        let content_height = style.accent_strip_height
            + style.top_padding
            + header_metrics.height()
            + style.excerpt_top_gap
            + excerpt.height
            + style.excerpt_bottom_gap
            + style.divider_top_gap
            + style.divider_width
            + style.divider_bottom_gap
            + panel_height
            + style.bottom_padding;
        let height = content_height.ceil().max(1.0) as u32;

        let metrics = PlanMetrics {
            header_height: header_metrics.height(),
            excerpt_height: excerpt.height,
            title_height: title_metrics.height(),
            reflection_height: reflection.height,
            panel_height,
            header_size: header.size,
        };

        // Place
        let mut ops = Vec::with_capacity(12);
        let card_rect = Rect::new(0.0, 0.0, width, height as f32);
        ops.push(DrawOp::FillRoundRect {
            rect: card_rect,
            radius: style.card_radius,
            color: theme.surface,
        });
        ops.push(DrawOp::StrokeRoundRect {
            rect: card_rect,
            radius: style.card_radius,
            width: style.border_width,
            color: theme.accent,
        });
        ops.push(DrawOp::FillRect {
            rect: Rect::new(0.0, 0.0, width, style.accent_strip_height),
            color: theme.accent,
        });

        let header_style = TextStyle {
            size: header.size,
            color: theme.accent,
            weight: FaceWeight::Regular,
        };
        let header_baseline = style.accent_strip_height + style.top_padding + header_metrics.ascent;
        let right_width = regular.measure(&header.right, header.size);
        ops.push(DrawOp::Text {
            text: header.left,
            origin: Point::new(pad, header_baseline),
            style: header_style,
        });
        ops.push(DrawOp::Text {
            text: header.right,
            origin: Point::new(width - pad - right_width, header_baseline),
            style: header_style,
        });

        let excerpt_top = header_baseline + header_metrics.descent + style.excerpt_top_gap;
        if !excerpt.is_empty() {
            ops.push(DrawOp::FillRect {
                rect: Rect::new(
                    pad,
                    excerpt_top,
                    pad + style.accent_bar_width,
                    excerpt_top + excerpt.height,
                ),
                color: theme.accent_bar(),
            });
            ops.push(DrawOp::Paragraph {
                origin: Point::new(pad + style.text_inset, excerpt_top),
                layout: excerpt,
                style: TextStyle {
                    size: excerpt_size,
                    color: theme.text,
                    weight: FaceWeight::Regular,
                },
            });
        }

        let divider_y =
            excerpt_top + metrics.excerpt_height + style.excerpt_bottom_gap + style.divider_top_gap;
        let faded = theme.accent.with_alpha(0);
        ops.push(DrawOp::GradientLine {
            from: Point::new(pad, divider_y),
            to: Point::new(width - pad, divider_y),
            width: style.divider_width,
            stops: vec![
                GradientStop::new(0.0, faded),
                GradientStop::new(0.5, theme.divider_peak()),
                GradientStop::new(1.0, faded),
            ],
        });

        let panel_top = divider_y + style.divider_bottom_gap;
        let panel = Rect::new(pad, panel_top, width - pad, panel_top + panel_height);
        ops.push(DrawOp::FillRoundRect {
            rect: panel,
            radius: style.panel_radius,
            color: theme.panel(),
        });

        let title_baseline = panel.top + style.panel_padding_top + title_metrics.ascent;
        let panel_text_x = panel.left + style.panel_padding_horizontal;
        ops.push(DrawOp::Text {
            text: style.reflection_title.clone(),
            origin: Point::new(panel_text_x, title_baseline),
            style: TextStyle {
                size: title_size,
                color: theme.accent,
                weight: FaceWeight::Bold,
            },
        });

        if !reflection.is_empty() {
            ops.push(DrawOp::Paragraph {
                origin: Point::new(
                    panel_text_x,
                    title_baseline + title_metrics.descent + style.panel_title_gap,
                ),
                layout: reflection,
                style: TextStyle {
                    size: reflection_size,
                    color: theme.text,
                    weight: FaceWeight::Regular,
                },
            });
        }

        log::debug!(
            "Planned {}x{} card ({}): header {:.1}px, excerpt {:.1}px, reflection {:.1}px",
            style.width,
            height,
            theme.name,
            metrics.header_size,
            metrics.excerpt_height,
            metrics.reflection_height
        );

        CardPlan {
            width: style.width,
            height,
            regular: regular.clone(),
            bold: bold.clone(),
            ops,
            metrics,
        }
    }
}

impl Default for CardLayoutPlanner {
    fn default() -> Self {
        Self::new(CardStyle::default())
    }
}

//! Greedy line wrapping with Unicode break opportunities
//!
//! Measure-only: a [`TextLayout`] says where every line starts, ends and
//! sits, so a canvas can be sized before anything is drawn.

use icu_segmenter::{options::LineBreakOptions, GraphemeClusterSegmenter, LineSegmenter};

use annocard_core::{
    types::{LineRecord, TextLayout},
    Typeface,
};

/// A wrapped line before vertical placement: byte range plus visible width
#[derive(Debug, Clone, Copy)]
struct Span {
    start: usize,
    end: usize,
    width: f32,
}

/// Wraps text into width-constrained lines
#[derive(Debug, Clone, Copy, Default)]
pub struct TextFlowEngine;

impl TextFlowEngine {
    pub fn new() -> Self {
        Self
    }

    /// Flow `text` into lines no wider than `width` pixels
    ///
    /// `\n` is a hard break, and a trailing `\r` before it is dropped. Every
    /// paragraph yields at least one line, so blank lines keep their height.
    /// Whitespace at the end of a line hangs: it is neither measured nor
    /// part of the line's range.
    pub fn flow(
        &self,
        text: &str,
        typeface: &Typeface,
        size: f32,
        width: f32,
        spacing: f32,
    ) -> TextLayout {
        if text.is_empty() {
            return TextLayout::empty(size, width);
        }

        let mut spans = Vec::new();
        let mut offset = 0;
        for paragraph in text.split('\n') {
            let content = paragraph.strip_suffix('\r').unwrap_or(paragraph);
            wrap_paragraph(content, offset, typeface, size, width, &mut spans);
            offset += paragraph.len() + 1;
        }

        let metrics = typeface.line_metrics(size);
        let natural = metrics.height();
        let pitch = natural * spacing.max(0.0);

        let lines: Vec<LineRecord> = spans
            .iter()
            .enumerate()
            .map(|(index, span)| LineRecord {
                start: span.start,
                end: span.end,
                baseline: metrics.ascent + index as f32 * pitch,
                width: span.width,
            })
            .collect();

        let height = (lines.len().saturating_sub(1)) as f32 * pitch + natural;
        log::trace!(
            "Flowed {} bytes into {} lines, height {:.1}",
            text.len(),
            lines.len(),
            height
        );

        TextLayout {
            text: text.to_string(),
            lines,
            height,
            font_size: size,
            target_width: width,
        }
    }
}

/// Break positions inside `text`, excluding 0 and always ending at `text.len()`
fn break_opportunities(text: &str) -> Vec<usize> {
    let mut breaks: Vec<usize> = LineSegmenter::new_auto(LineBreakOptions::default())
        .segment_str(text)
        .filter(|&pos| pos > 0 && pos <= text.len())
        .collect();
    breaks.dedup();
    if breaks.last() != Some(&text.len()) {
        breaks.push(text.len());
    }
    breaks
}

fn wrap_paragraph(
    text: &str,
    base: usize,
    typeface: &Typeface,
    size: f32,
    width: f32,
    out: &mut Vec<Span>,
) {
    if text.is_empty() {
        out.push(Span {
            start: base,
            end: base,
            width: 0.0,
        });
        return;
    }

    let mut line = Span {
        start: 0,
        end: 0,
        width: 0.0,
    };
    // Advance from the line start to the current segment, hanging whitespace included
    let mut pen = 0.0;
    let mut segment_start = 0;

    for segment_end in break_opportunities(text) {
        let segment = &text[segment_start..segment_end];
        let visible = segment.trim_end();
        let visible_end = segment_start + visible.len();
        let visible_width = typeface.measure(visible, size);
        let hanging_width = typeface.measure(&text[visible_end..segment_end], size);

        if !visible.is_empty() && pen + visible_width > width {
            if line.end > line.start {
                out.push(offset(line, base));
            }
            line = Span {
                start: segment_start,
                end: segment_start,
                width: 0.0,
            };
            pen = 0.0;

            if visible_width > width {
                line = split_graphemes(
                    text,
                    segment_start,
                    visible_end,
                    typeface,
                    size,
                    width,
                    base,
                    out,
                );
                pen = line.width + hanging_width;
                segment_start = segment_end;
                continue;
            }
        }

        if !visible.is_empty() {
            line.width = pen + visible_width;
            line.end = visible_end;
        }
        pen += visible_width + hanging_width;
        segment_start = segment_end;
    }

    out.push(offset(line, base));
}

/// Breaks an over-wide word between grapheme clusters
///
/// Emits every full piece and returns the last one as the open line.
#[allow(clippy::too_many_arguments)]
fn split_graphemes(
    text: &str,
    start: usize,
    end: usize,
    typeface: &Typeface,
    size: f32,
    width: f32,
    base: usize,
    out: &mut Vec<Span>,
) -> Span {
    let word = &text[start..end];
    let boundaries: Vec<usize> = GraphemeClusterSegmenter::new().segment_str(word).collect();

    let mut piece = Span {
        start,
        end: start,
        width: 0.0,
    };
    for pair in boundaries.windows(2) {
        let cluster = &word[pair[0]..pair[1]];
        let cluster_width = typeface.measure(cluster, size);
        if piece.end > piece.start && piece.width + cluster_width > width {
            out.push(offset(piece, base));
            piece = Span {
                start: start + pair[0],
                end: start + pair[0],
                width: 0.0,
            };
        }
        piece.end = start + pair[1];
        piece.width += cluster_width;
    }
    piece
}

fn offset(span: Span, base: usize) -> Span {
    Span {
        start: span.start + base,
        end: span.end + base,
        width: span.width,
    }
}

//! Fitting the two header labels onto one line
//!
//! The font shrinks step by step first. Labels are only cut when even the
//! floor size cannot hold both, so the header never drops below a legible
//! size just to show a few more characters.

use icu_segmenter::GraphemeClusterSegmenter;

use annocard_core::{types::MetadataFitResult, CardStyle, Typeface};

const ELLIPSIS: &str = "\u{2026}";

/// Header fitting parameters, all in canvas pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetadataFitter {
    pub start_size: f32,
    pub floor_size: f32,
    pub step: f32,
    /// Space kept between the two labels
    pub gap: f32,
    pub right_share: f32,
    pub left_share: f32,
}

impl MetadataFitter {
    pub fn from_style(style: &CardStyle) -> Self {
        Self {
            start_size: style.px(style.header_start_size),
            floor_size: style.px(style.header_floor_size),
            step: style.px(style.header_size_step),
            gap: style.header_gap,
            right_share: style.header_right_share,
            left_share: style.header_left_share,
        }
    }

    /// Largest size in `[floor, start]` at which both labels fit `width`
    ///
    /// Falls back to the floor size with end-ellipsized labels: the right
    /// label gets at most `right_share` of the width, the left label whatever
    /// remains but never less than `left_share`.
    pub fn fit(
        &self,
        left: &str,
        right: &str,
        typeface: &Typeface,
        width: f32,
    ) -> MetadataFitResult {
        for size in self.sizes() {
            let needed = typeface.measure(left, size) + typeface.measure(right, size) + self.gap;
            if needed <= width {
                return MetadataFitResult {
                    size,
                    left: left.to_string(),
                    right: right.to_string(),
                    truncated: false,
                };
            }
        }

        let size = self.floor_size;
        let right = ellipsize_end(right, typeface, size, self.right_share * width);
        let right_width = typeface.measure(&right, size);
        let allowance = (width - right_width - self.gap).max(self.left_share * width);
        let left = ellipsize_end(left, typeface, size, allowance);

        log::debug!(
            "Header truncated at {:.1}px: {:?} / {:?}",
            size,
            left,
            right
        );
        MetadataFitResult {
            size,
            left,
            right,
            truncated: true,
        }
    }

    /// Candidate sizes from start down to floor, floor included
    fn sizes(&self) -> impl Iterator<Item = f32> {
        let Self {
            start_size,
            floor_size,
            step,
            ..
        } = *self;
        let count = if step > 0.0 && start_size > floor_size {
            ((start_size - floor_size) / step).round() as u32
        } else {
            0
        };
        (0..=count).map(move |i| (start_size - i as f32 * step).max(floor_size))
    }
}

/// Shortens `text` at a grapheme boundary and appends an ellipsis so it fits `max_width`
///
/// Text that already fits comes back unchanged. When not even the ellipsis
/// fits, the result is empty.
pub fn ellipsize_end(text: &str, typeface: &Typeface, size: f32, max_width: f32) -> String {
    if typeface.measure(text, size) <= max_width {
        return text.to_string();
    }

    let ellipsis_width = typeface.measure(ELLIPSIS, size);
    if max_width <= 0.0 || ellipsis_width > max_width {
        return String::new();
    }

    let boundaries: Vec<usize> = GraphemeClusterSegmenter::new().segment_str(text).collect();
    let budget = max_width - ellipsis_width;
    // Prefix widths only grow, so the fitting boundaries form a prefix of the list
    let fitting = boundaries.partition_point(|&end| typeface.measure(&text[..end], size) <= budget);
    let end = fitting
        .checked_sub(1)
        .and_then(|idx| boundaries.get(idx))
        .copied()
        .unwrap_or(0);

    let mut out = text[..end].trim_end().to_string();
    out.push_str(ELLIPSIS);
    out
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use annocard_core::TypefaceOrigin;
    use annocard_fontdb::BuiltinFace;

    use super::*;

    fn face() -> Typeface {
        Typeface::new(Arc::new(BuiltinFace::new()), TypefaceOrigin::Builtin)
    }

    fn fitter() -> MetadataFitter {
        MetadataFitter {
            start_size: 12.0,
            floor_size: 10.0,
            step: 0.5,
            gap: 4.0,
            right_share: 0.38,
            left_share: 0.40,
        }
    }

    #[test]
    fn short_labels_keep_start_size() {
        let result = fitter().fit("Walden", "Ch 1", &face(), 300.0);
        assert_eq!(result.size, 12.0);
        assert!(!result.truncated);
        assert_eq!(result.left, "Walden");
    }

    #[test]
    fn shrinks_before_truncating() {
        // 20 chars plus the gap: 148px at 12, 142px at 11.5, 136px at 11
        let result = fitter().fit("aaaaaaaaaa", "bbbbbbbbbb", &face(), 137.0);
        assert_eq!(result.size, 11.0);
        assert!(!result.truncated);
    }

    #[test]
    fn sizes_walk_down_to_floor() {
        let sizes: Vec<f32> = fitter().sizes().collect();
        assert_eq!(sizes, [12.0, 11.5, 11.0, 10.5, 10.0]);
    }

    #[test]
    fn floor_truncates_both_labels() {
        let tf = face();
        let result = fitter().fit(&"a".repeat(40), &"b".repeat(40), &tf, 100.0);
        assert!(result.truncated);
        assert_eq!(result.size, 10.0);
        assert!(result.right.ends_with(ELLIPSIS));
        assert!(tf.measure(&result.right, 10.0) <= 38.0);
        let total = tf.measure(&result.left, 10.0) + tf.measure(&result.right, 10.0) + 4.0;
        assert!(total <= 100.0);
    }

    #[test]
    fn ellipsize_keeps_fitting_text() {
        assert_eq!(ellipsize_end("abc", &face(), 10.0, 18.0), "abc");
    }

    #[test]
    fn ellipsize_cuts_at_grapheme_and_trims_space() {
        // budget 30px minus 6px ellipsis leaves 4 characters
        assert_eq!(ellipsize_end("abc defgh", &face(), 10.0, 30.0), "abc\u{2026}");
        assert_eq!(ellipsize_end("abcdefgh", &face(), 10.0, 30.0), "abcd\u{2026}");
    }

    #[test]
    fn ellipsize_gives_up_when_ellipsis_does_not_fit() {
        assert_eq!(ellipsize_end("abcdef", &face(), 10.0, 5.0), "");
    }
}

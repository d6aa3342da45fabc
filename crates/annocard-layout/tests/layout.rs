//! Integration tests for flowing, fitting and planning

use std::sync::Arc;

use annocard_core::{AnnotationCard, CardStyle, DrawOp, Theme, Typeface, TypefaceOrigin};
use annocard_fontdb::BuiltinFace;
use annocard_layout::{CardLayoutPlanner, MetadataFitter, TextFlowEngine};
use proptest::prelude::*;

const TOLERANCE: f32 = 0.01;

fn builtin() -> Typeface {
    Typeface::new(Arc::new(BuiltinFace::new()), TypefaceOrigin::Builtin)
}

fn card(excerpt: &str, reflection: &str) -> AnnotationCard {
    AnnotationCard {
        book_name: "Very Long Book Title".into(),
        book_author: "By Very Long Author Name".into(),
        chapter_name: "Chapter One Hundred and Twenty Three".into(),
        excerpt: excerpt.into(),
        reflection: reflection.into(),
        theme: 0,
    }
}

fn plan_height(excerpt: &str, reflection: &str) -> u32 {
    let regular = builtin();
    let bold = regular.emboldened();
    CardLayoutPlanner::default()
        .plan(
            &card(excerpt, reflection),
            reflection,
            Theme::by_index(0),
            &regular,
            &bold,
        )
        .height
}

#[test]
fn test_plan_when_excerpt_is_empty_then_excerpt_block_has_zero_height() {
    let regular = builtin();
    let bold = regular.emboldened();
    let plan = CardLayoutPlanner::default().plan(
        &card("", ""),
        "test note",
        Theme::by_index(0),
        &regular,
        &bold,
    );

    assert_eq!(plan.metrics.excerpt_height, 0.0);
    assert!(plan.metrics.reflection_height > 0.0);
    assert!(plan.height > 0);
    assert_eq!(plan.width, 1125);
}

#[test]
fn test_fit_when_labels_overflow_at_floor_then_truncates_right_first() {
    let style = CardStyle::default();
    let width = style.content_width();
    assert_eq!(width, 1053.0);

    let tf = builtin();
    let result = MetadataFitter::from_style(&style).fit(
        "Very Long Book Title By Very Long Author Name",
        "Chapter One Hundred and Twenty Three",
        &tf,
        width,
    );

    let floor = style.px(style.header_floor_size);
    assert!(result.truncated);
    assert_eq!(result.size, floor);
    assert!(result.right.ends_with('\u{2026}'));

    let right = tf.measure(&result.right, floor);
    let left = tf.measure(&result.left, floor);
    assert!(right <= 0.38 * width + TOLERANCE);
    assert!(left + right + style.header_gap <= width + TOLERANCE);
}

#[test]
fn test_flow_when_text_has_newline_then_break_is_preserved() {
    let layout = TextFlowEngine::new().flow("line one\nline two", &builtin(), 48.0, 1025.0, 1.6);

    assert_eq!(layout.line_count(), 2);
    assert_eq!(layout.line_text(0), "line one");
    assert_eq!(layout.line_text(1), "line two");
    assert_eq!(layout.lines[0].end, 8);
    assert_eq!(layout.lines[1].start, 9);
}

#[test]
fn test_plan_when_theme_is_out_of_range_then_uses_default_palette() {
    let regular = builtin();
    let bold = regular.emboldened();
    let plan = CardLayoutPlanner::default().plan(
        &card("x", "y"),
        "y",
        Theme::by_index(42),
        &regular,
        &bold,
    );

    match &plan.ops[0] {
        DrawOp::FillRoundRect { color, .. } => assert_eq!(*color, Theme::all()[0].surface),
        other => panic!("unexpected first op: {:?}", other),
    }
}

#[test]
fn test_flow_when_cjk_has_no_spaces_then_wraps_between_characters() {
    let text = "读书不觉已春深一寸光阴一寸金";
    let layout = TextFlowEngine::new().flow(text, &builtin(), 10.0, 50.0, 1.0);

    // 10px per character, five per line
    assert_eq!(layout.line_count(), 3);
    assert_eq!(layout.line_text(0), "读书不觉已");
    for line in &layout.lines {
        assert!(line.width <= 50.0 + TOLERANCE);
    }
}

fn flowable_text() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-zA-Z ,.\n读书感想]{0,300}").unwrap()
}

proptest! {
    #[test]
    fn prop_lines_never_exceed_target_width(
        text in flowable_text(),
        size in 8.0f32..40.0,
        width in 60.0f32..900.0,
        spacing in 1.0f32..2.0,
    ) {
        let tf = builtin();
        let layout = TextFlowEngine::new().flow(&text, &tf, size, width, spacing);

        for index in 0..layout.line_count() {
            prop_assert!(layout.lines[index].width <= width + TOLERANCE);
            prop_assert!(tf.measure(layout.line_text(index), size) <= width + TOLERANCE);
        }
        prop_assert_eq!(layout.is_empty(), text.is_empty());
        prop_assert!(layout.line_count() > text.matches('\n').count() || text.is_empty());
    }

    #[test]
    fn prop_fitter_size_stays_in_bounds(
        left in "[a-zA-Z 读书]{0,80}",
        right in "[a-zA-Z 感想]{0,80}",
        width in 200.0f32..1100.0,
    ) {
        let tf = builtin();
        let style = CardStyle::default();
        let fitter = MetadataFitter::from_style(&style);
        let result = fitter.fit(&left, &right, &tf, width);

        prop_assert!(result.size >= fitter.floor_size && result.size <= fitter.start_size);
        let right_width = tf.measure(&result.right, result.size);
        let left_width = tf.measure(&result.left, result.size);
        prop_assert!(left_width + right_width + fitter.gap <= width + TOLERANCE);
        if result.truncated {
            prop_assert_eq!(result.size, fitter.floor_size);
            prop_assert!(right_width <= 0.38 * width + TOLERANCE);
        } else {
            prop_assert_eq!(&result.left, &left);
            prop_assert_eq!(&result.right, &right);
        }
    }

    #[test]
    fn prop_height_grows_with_text(
        excerpt in "[a-z 读]{0,200}",
        extra in "[a-z 读\n]{0,120}",
        reflection in "[a-z ]{0,100}",
    ) {
        let longer = format!("{excerpt}{extra}");
        prop_assert!(plan_height(&excerpt, &reflection) <= plan_height(&longer, &reflection));

        let longer_reflection = format!("{reflection}{extra}");
        prop_assert!(
            plan_height(&excerpt, &reflection) <= plan_height(&excerpt, &longer_reflection)
        );
    }

    #[test]
    fn prop_card_width_is_constant(excerpt in flowable_text(), reflection in flowable_text()) {
        let regular = builtin();
        let bold = regular.emboldened();
        let plan = CardLayoutPlanner::default().plan(
            &card(&excerpt, &reflection),
            &reflection,
            Theme::by_index(1),
            &regular,
            &bold,
        );
        prop_assert_eq!(plan.width, 1125);
        prop_assert!(plan.height > 0);
    }
}

// Copyright 2026 the Rendered Text Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use super::utils::{TestEnv, LINE_HEIGHT};
use crate::kurbo::Size;
use crate::{ErrorKind, HorizontalFormatting, RenderedText};
use std::vec::Vec;

fn offsets(text: &RenderedText) -> Vec<f32> {
    text.paragraphs()
        .iter()
        .flat_map(|paragraph| paragraph.lines().iter().map(|line| line.horizontal_offset()))
        .collect()
}

#[test]
fn alignment_offsets() {
    let env = TestEnv::new();
    let mut text = env.plain("AAAA");
    text.set_horizontal_formatting(HorizontalFormatting::Right);
    text.update_formatting(100.).unwrap();
    assert_eq!(offsets(&text), [60.]);
    text.set_horizontal_formatting(HorizontalFormatting::Centre);
    text.update_formatting(100.).unwrap();
    assert_eq!(offsets(&text), [30.]);
    text.set_horizontal_formatting(HorizontalFormatting::Left);
    text.update_formatting(100.).unwrap();
    assert_eq!(offsets(&text), [0.]);
}

#[test]
fn area_change_without_wrap_only_realigns() {
    let env = TestEnv::new();
    let mut text = env.plain("AAAA");
    text.set_horizontal_formatting(HorizontalFormatting::Right);
    text.update_formatting(100.).unwrap();
    let lines = text.paragraphs()[0].lines().to_vec();
    text.update_formatting(200.).unwrap();
    assert_eq!(offsets(&text), [160.]);
    assert_eq!(
        text.paragraphs()[0].lines()[0].glyph_range(),
        lines[0].glyph_range()
    );
}

#[test]
fn justified_lines_fill_the_area() {
    let env = TestEnv::new();
    let mut text = env.plain("AA BB CC DD");
    text.set_word_wrap(true);
    text.set_horizontal_formatting(HorizontalFormatting::Justified);
    text.update_formatting(55.).unwrap();

    let lines = text.paragraphs()[0].lines();
    assert_eq!(lines.len(), 2);
    let first = lines[0];
    assert_eq!(first.justifiable_count(), 1);
    assert_eq!(
        first.width() + first.justifiable_count() as f32 * first.justify_space(),
        55.
    );
    assert_eq!(lines[1].justify_space(), 0., "last line follows its own formatting");

    text.set_last_justified_line_formatting(HorizontalFormatting::Justified);
    text.update_formatting(55.).unwrap();
    let last = text.paragraphs()[0].lines()[1];
    assert_eq!(
        last.width() + last.justifiable_count() as f32 * last.justify_space(),
        55.
    );
}

#[test]
fn justification_needs_justifiable_glyphs() {
    let env = TestEnv::new();
    let mut text = env.plain("AAAA");
    text.set_horizontal_formatting(HorizontalFormatting::Justified);
    text.set_last_justified_line_formatting(HorizontalFormatting::Justified);
    text.update_formatting(100.).unwrap();
    let line = text.paragraphs()[0].lines()[0];
    assert_eq!(line.justify_space(), 0.);
    assert_eq!(line.horizontal_offset(), 0.);
}

#[test]
fn formatting_twice_is_idempotent() {
    let env = TestEnv::new();
    let mut text = env.markup("The [colour='FF00FF00']quick brown[br]fox jumps over");
    text.set_word_wrap(true);
    text.set_horizontal_formatting(HorizontalFormatting::Justified);
    let first_fit = text.update_formatting(70.).unwrap();
    let before = text.clone();
    let second_fit = text.update_formatting(70.).unwrap();

    assert_eq!(first_fit, second_fit);
    assert_eq!(before.extents(), text.extents());
    for (a, b) in before.paragraphs().iter().zip(text.paragraphs()) {
        assert_eq!(a.lines(), b.lines());
        assert_eq!(a.glyphs(), b.glyphs());
        assert!(!b.is_lines_dirty());
    }
}

#[test]
fn clones_are_independent() {
    let env = TestEnv::new();
    let mut original = env.plain("AAAA BBBB");
    original.update_formatting(45.).unwrap();
    let mut clone = original.clone();

    clone.set_word_wrap(true);
    clone.update_formatting(45.).unwrap();
    assert_eq!(clone.line_count(), 2);
    assert_eq!(original.line_count(), 1);
    assert!(!original.word_wrap());

    original
        .render_text(
            "X",
            None,
            Some(env.font.clone()),
            crate::ParagraphDirection::LeftToRight,
        )
        .unwrap();
    assert_eq!(clone.text().len(), 9);
    assert_eq!(clone.paragraphs()[0].glyphs().len(), 9);
}

#[test]
fn paragraph_overrides_pin_their_value() {
    let env = TestEnv::new();
    let mut text = env.plain("AAAA\nBBBB");
    text.paragraph_mut(1)
        .unwrap()
        .set_horizontal_formatting_override(Some(HorizontalFormatting::Right));
    text.update_formatting(100.).unwrap();
    assert_eq!(offsets(&text), [0., 60.]);

    text.set_horizontal_formatting(HorizontalFormatting::Centre);
    text.update_formatting(100.).unwrap();
    assert_eq!(offsets(&text), [30., 60.]);

    text.paragraph_mut(1)
        .unwrap()
        .set_horizontal_formatting_override(None);
    text.update_formatting(100.).unwrap();
    assert_eq!(offsets(&text), [30., 30.]);
}

#[test]
fn paragraph_word_wrap_override() {
    let env = TestEnv::new();
    let mut text = env.plain("AAAA BBBB\nAAAA BBBB");
    text.paragraph_mut(0).unwrap().set_word_wrap_override(Some(true));
    assert!(!text.update_formatting(45.).unwrap());
    assert_eq!(text.paragraphs()[0].lines().len(), 2);
    assert_eq!(text.paragraphs()[1].lines().len(), 1);
    assert!(text.paragraphs()[0].is_fitting_into_area_width());
    assert!(!text.paragraphs()[1].is_fitting_into_area_width());
}

#[test]
fn negative_width_is_rejected() {
    let env = TestEnv::new();
    let mut text = env.plain("AAAA");
    text.update_formatting(100.).unwrap();
    let extents = text.extents();
    let error = text.update_formatting(-1.).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::NegativeAreaWidth);
    assert_eq!(text.extents(), extents);
    assert_eq!(
        text.update_formatting(f32::NAN).unwrap_err().kind(),
        ErrorKind::NegativeAreaWidth
    );
}

#[test]
fn extents_and_line_heights() {
    let env = TestEnv::new();
    let mut text = env.markup("AAAA\nB[font='Big']B\n\nC");
    text.update_formatting(100.).unwrap();
    let heights: Vec<f32> = text
        .paragraphs()
        .iter()
        .map(|paragraph| paragraph.height())
        .collect();
    assert_eq!(
        heights,
        [LINE_HEIGHT, 2. * LINE_HEIGHT, 2. * LINE_HEIGHT, 2. * LINE_HEIGHT],
        "the empty paragraph takes the height of its line break's style"
    );
    assert_eq!(
        text.extents(),
        Size::new(40., f64::from(7. * LINE_HEIGHT))
    );
}

#[test]
fn empty_paragraph_uses_default_font_height() {
    let env = TestEnv::new();
    let mut text = env.plain("A\n\nB");
    text.update_formatting(100.).unwrap();
    assert_eq!(text.paragraphs()[1].height(), LINE_HEIGHT);
}

// Copyright 2026 the Rendered Text Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use super::utils::{MockWidget, TestEnv, LINE_HEIGHT};
use crate::kurbo::{Point, Size};
use crate::{ElementKind, ErrorKind, HorizontalFormatting, TextElement, TextStyle};
use std::sync::Arc;
use std::vec::Vec;

#[test]
fn wider_image_reflows_wrapped_lines() {
    let env = TestEnv::new();
    let mut text = env.markup("AAAA [image='Foo']");
    text.set_word_wrap(true);
    assert!(text.update_formatting(65.).unwrap());
    assert_eq!(text.line_count(), 1);
    assert_eq!(text.paragraphs()[0].glyphs()[5].advance, 20.);

    env.image.set_size(Size::new(40., 8.));
    text.update_dynamic_object_extents(&env.host);
    assert!(text.paragraphs()[0].is_lines_dirty());
    assert_eq!(text.paragraphs()[0].glyphs()[5].advance, 40.);

    assert!(text.update_formatting(65.).unwrap());
    assert_eq!(text.line_count(), 2);
}

#[test]
fn taller_image_only_changes_line_height() {
    let env = TestEnv::new();
    let mut text = env.markup("AAAA [image='Foo']");
    text.set_word_wrap(true);
    text.update_formatting(100.).unwrap();
    assert_eq!(text.extents().height, f64::from(LINE_HEIGHT));

    env.image.set_size(Size::new(20., 40.));
    text.update_dynamic_object_extents(&env.host);
    assert!(!text.paragraphs()[0].is_lines_dirty());
    text.update_formatting(100.).unwrap();
    assert_eq!(text.extents().height, 40.);
}

#[test]
fn wider_image_without_wrap_realigns() {
    let env = TestEnv::new();
    let mut text = env.markup("AB[image='Foo']");
    text.set_horizontal_formatting(HorizontalFormatting::Right);
    text.update_formatting(100.).unwrap();
    assert_eq!(text.paragraphs()[0].lines()[0].horizontal_offset(), 60.);

    env.image.set_size(Size::new(40., 8.));
    text.update_dynamic_object_extents(&env.host);
    assert!(!text.paragraphs()[0].is_lines_dirty());
    text.update_formatting(100.).unwrap();
    let line = text.paragraphs()[0].lines()[0];
    assert_eq!(line.width(), 60.);
    assert_eq!(line.horizontal_offset(), 40.);
}

#[test]
fn widgets_resolve_and_follow_the_layout() {
    let env = TestEnv::new();
    let mut text = env.markup("x[window='Child']");
    text.update_formatting(100.).unwrap();
    assert_eq!(text.paragraphs()[0].glyphs()[1].advance, 0.);

    text.update_dynamic_object_extents(&env.host);
    text.update_formatting(100.).unwrap();
    assert_eq!(text.paragraphs()[0].glyphs()[1].advance, 30.);
    assert_eq!(text.extents().height, 24.);

    let mut out = Vec::new();
    text.create_render_geometry(&mut out, Point::new(5., 7.), None, None, None);
    assert_eq!(env.widget.position(), Some(Point::new(15., 7.)));
    assert!(
        out.iter().all(|buffer| buffer.quads.iter().all(|quad| quad.glyph.is_some())),
        "widgets draw nothing themselves"
    );

    env.widget.set_size(Size::new(50., 24.));
    text.update_dynamic_object_extents(&env.host);
    text.update_formatting(100.).unwrap();
    assert_eq!(text.extents().width, 60.);
}

#[test]
fn destroyed_widget_disconnects() {
    let mut env = TestEnv::new();
    let child = Arc::new(MockWidget::new(Size::new(30., 24.)));
    env.host.add("Temp", child.clone());
    let mut text = env.markup("[window='Temp']x");
    text.update_dynamic_object_extents(&env.host);
    text.update_formatting(100.).unwrap();
    assert_eq!(text.extents().width, 40.);

    env.host.remove("Temp");
    drop(child);
    text.update_dynamic_object_extents(&env.host);
    text.update_formatting(100.).unwrap();
    assert_eq!(text.extents().width, 10.);
    let TextElement::Widget(widget) = &text.elements()[0] else {
        panic!("expected a widget element");
    };
    assert!(widget.widget().is_none());
}

#[test]
fn replacing_an_element_reshapes_its_paragraphs() {
    let env = TestEnv::new();
    let mut text = env.markup("AB\n[font='Big']CD");
    text.update_formatting(100.).unwrap();
    assert_eq!(text.extents().width, 40.);

    let mut style = TextStyle::new(Some(env.font.clone()));
    style.underline = true;
    text.replace_element(1, TextElement::Style(style)).unwrap();
    text.update_formatting(100.).unwrap();
    assert_eq!(text.extents().width, 20.);
    assert_eq!(text.extents().height, f64::from(2. * LINE_HEIGHT));
    assert_eq!(text.elements()[1].kind(), ElementKind::Style);

    let image = TextElement::Image(crate::ImageElement::new(None));
    let error = text.replace_element(0, image).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::InvalidOperation);
}

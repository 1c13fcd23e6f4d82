// Copyright 2026 the Rendered Text Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Helpers to assert layout invariants during testing.

use crate::{RenderedText, RenderedTextParagraph};
use std::string::String;

/// Assert that the lines of `paragraph` cover its glyphs without gaps or
/// overlaps.
pub(crate) fn assert_lines_partition(paragraph: &RenderedTextParagraph) {
    let lines = paragraph.lines();
    assert!(!lines.is_empty(), "a laid out paragraph has at least one line");
    let mut expected_start = 0;
    for line in lines {
        let range = line.glyph_range();
        assert_eq!(range.start, expected_start, "gap or overlap between lines");
        assert!(range.end >= range.start, "line range is reversed");
        expected_start = range.end;
    }
    assert_eq!(
        expected_start,
        paragraph.glyphs().len(),
        "lines do not cover every glyph"
    );
}

/// Assert that the plain text of `text` is `expected`.
pub(crate) fn assert_text(text: &RenderedText, expected: &str) {
    let actual: String = text.text().iter().collect();
    assert_eq!(actual, expected, "plain text mismatch");
}

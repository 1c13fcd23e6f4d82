// Copyright 2026 the Rendered Text Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layout of one paragraph: glyph setup, line breaking, formatting, queries
//! and geometry.

mod glyph;
mod line;
mod query;
mod render;

pub use glyph::RenderedGlyph;
pub use line::Line;
pub use query::IndexBounds;

use crate::element::{GlyphContext, TextElement};
use crate::format::{BaseDirection, HorizontalFormatting};
use crate::parser::ParsedText;
use crate::resources::same_font;
use crate::util::nearly_zero;
use alloc::vec::Vec;
use core::ops::Range;
use smallvec::SmallVec;

/// Text between two hard line breaks.
///
/// Glyphs are stored in logical order. Lines partition the glyphs and are
/// rebuilt whenever the paragraph is marked dirty; formatting and heights
/// are tracked per line.
#[derive(Clone, Debug)]
pub struct RenderedTextParagraph {
    glyphs: Vec<RenderedGlyph>,
    lines: SmallVec<[Line; 1]>,
    /// Characters of the parsed text making up this paragraph.
    text_range: Range<usize>,
    source_start: usize,
    source_end: usize,
    direction: BaseDirection,
    /// Element whose height an empty paragraph takes.
    fallback_element: Option<u16>,

    horizontal_formatting: Option<HorizontalFormatting>,
    last_justified_formatting: Option<HorizontalFormatting>,
    word_wrap: Option<bool>,
    default_horizontal_formatting: HorizontalFormatting,
    default_last_justified_formatting: HorizontalFormatting,
    default_word_wrap: bool,

    lines_dirty: bool,
    fits: bool,
    area_width: Option<f32>,
}

impl RenderedTextParagraph {
    pub(crate) fn new(
        text_range: Range<usize>,
        source_range: Range<usize>,
        direction: BaseDirection,
        fallback_element: Option<u16>,
    ) -> Self {
        Self {
            glyphs: Vec::new(),
            lines: SmallVec::new(),
            text_range,
            source_start: source_range.start,
            source_end: source_range.end,
            direction,
            fallback_element,
            horizontal_formatting: None,
            last_justified_formatting: None,
            word_wrap: None,
            default_horizontal_formatting: HorizontalFormatting::default(),
            default_last_justified_formatting: HorizontalFormatting::default(),
            default_word_wrap: false,
            lines_dirty: true,
            fits: true,
            area_width: None,
        }
    }

    /// Builds glyphs for the paragraph's characters.
    ///
    /// `levels` assigns embedding levels; `None` keeps the levels from the
    /// previous setup. Characters past the end of the element index array
    /// use `default_element`.
    pub(crate) fn setup_glyphs(
        &mut self,
        source: &ParsedText,
        elements: &[TextElement],
        default_element: u16,
        levels: Option<&[u8]>,
    ) {
        let range = self.text_range.clone();
        let element_of = |position: usize| {
            source
                .element_indices
                .get(position)
                .copied()
                .unwrap_or(default_element)
        };

        self.glyphs.resize(range.len(), RenderedGlyph::default());
        let mut previous: Option<(u16, Option<u32>)> = None;
        for (i, position) in range.clone().enumerate() {
            let codepoint = source.text[position];
            let element_index = element_of(position);
            let element = &elements[usize::from(element_index)];
            let span = source.source_span(position);

            let glyph = &mut self.glyphs[i];
            *glyph = RenderedGlyph {
                bidi_level: levels
                    .and_then(|levels| levels.get(i).copied())
                    .unwrap_or(glyph.bidi_level),
                ..RenderedGlyph::default()
            };
            glyph.element_index = element_index;
            glyph.source_index = u32::try_from(span.start).unwrap_or(u32::MAX);
            glyph.source_length = u32::try_from(span.len()).unwrap_or(u32::MAX);
            glyph.is_justifiable = codepoint == ' ';
            glyph.is_breakable = matches!(codepoint, ' ' | '\t' | '\r');
            glyph.is_whitespace = glyph.is_breakable;
            glyph.is_right_to_left = glyph.bidi_level % 2 == 1;

            let kerning_from = previous.and_then(|(index, id)| {
                let shared = match (elements[usize::from(index)].font(), element.font()) {
                    (Some(a), Some(b)) => same_font(a, b),
                    _ => false,
                };
                if shared {
                    id
                } else {
                    None
                }
            });
            let context = GlyphContext {
                previous: kerning_from,
                first_in_run: previous.is_none_or(|(index, _)| index != element_index),
                last_in_run: position + 1 == range.end || element_of(position + 1) != element_index,
            };
            element.setup_glyph(glyph, codepoint, context);
            previous = Some((element_index, glyph.font_glyph));
        }

        self.lines.clear();
        self.lines_dirty = true;
    }

    /// Glyphs in logical order.
    pub fn glyphs(&self) -> &[RenderedGlyph] {
        &self.glyphs
    }

    /// Lines of the last layout.
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Range of the input text covered by this paragraph.
    pub fn source_range(&self) -> Range<usize> {
        self.source_start..self.source_end
    }

    /// Resolved base direction.
    pub fn direction(&self) -> BaseDirection {
        self.direction
    }

    /// Returns `true` if the last layout needed no mid-word break and no
    /// line is wider than the area.
    pub fn is_fitting_into_area_width(&self) -> bool {
        self.fits
    }

    /// Returns `true` if lines must be rebuilt before they are used.
    pub fn is_lines_dirty(&self) -> bool {
        self.lines_dirty
    }

    /// Width of the widest line.
    pub fn width(&self) -> f32 {
        self.lines.iter().fold(0., |width, line| width.max(line.width()))
    }

    /// Sum of the line heights.
    pub fn height(&self) -> f32 {
        self.lines.iter().map(Line::height).sum()
    }

    /// Effective horizontal formatting.
    pub fn horizontal_formatting(&self) -> HorizontalFormatting {
        self.horizontal_formatting
            .unwrap_or(self.default_horizontal_formatting)
    }

    /// Effective formatting of the last line of a justified paragraph.
    pub fn last_justified_line_formatting(&self) -> HorizontalFormatting {
        self.last_justified_formatting
            .unwrap_or(self.default_last_justified_formatting)
    }

    /// Effective word wrap.
    pub fn word_wrap(&self) -> bool {
        self.word_wrap.unwrap_or(self.default_word_wrap)
    }

    /// Pins the horizontal formatting; `None` follows the document default.
    pub fn set_horizontal_formatting_override(&mut self, value: Option<HorizontalFormatting>) {
        let old = self.horizontal_formatting();
        self.horizontal_formatting = value;
        if self.horizontal_formatting() != old {
            self.mark_horizontal_formatting_dirty();
        }
    }

    /// Pins the last justified line formatting; `None` follows the document
    /// default.
    pub fn set_last_justified_line_formatting_override(
        &mut self,
        value: Option<HorizontalFormatting>,
    ) {
        let old = self.last_justified_line_formatting();
        self.last_justified_formatting = value;
        if self.last_justified_line_formatting() != old {
            self.mark_horizontal_formatting_dirty();
        }
    }

    /// Pins word wrap; `None` follows the document default.
    pub fn set_word_wrap_override(&mut self, value: Option<bool>) {
        let old = self.word_wrap();
        self.word_wrap = value;
        if self.word_wrap() != old {
            self.lines_dirty = true;
        }
    }

    pub(crate) fn set_default_horizontal_formatting(&mut self, value: HorizontalFormatting) {
        let old = self.horizontal_formatting();
        self.default_horizontal_formatting = value;
        if self.horizontal_formatting() != old {
            self.mark_horizontal_formatting_dirty();
        }
    }

    pub(crate) fn set_default_last_justified_line_formatting(
        &mut self,
        value: HorizontalFormatting,
    ) {
        let old = self.last_justified_line_formatting();
        self.default_last_justified_formatting = value;
        if self.last_justified_line_formatting() != old {
            self.mark_horizontal_formatting_dirty();
        }
    }

    pub(crate) fn set_default_word_wrap(&mut self, value: bool) {
        let old = self.word_wrap();
        self.default_word_wrap = value;
        if self.word_wrap() != old {
            self.lines_dirty = true;
        }
    }

    fn mark_horizontal_formatting_dirty(&mut self) {
        for line in &mut self.lines {
            line.horz_dirty = true;
        }
    }

    /// Reacts to a change of the area width.
    fn on_area_width_changed(&mut self, area_width: f32) {
        self.area_width = Some(area_width);
        if self.word_wrap() {
            self.lines_dirty = true;
        } else if !self.lines_dirty {
            self.mark_horizontal_formatting_dirty();
            self.fits = line::fits(self.width(), area_width);
        }
    }

    /// Applies a change of an element's metrics to its glyphs and lines.
    pub(crate) fn on_element_metrics_changed(&mut self, element: u16, width: f32, height: f32) {
        let mut touched = false;
        for (index, glyph) in self.glyphs.iter_mut().enumerate() {
            if glyph.element_index != element {
                continue;
            }
            touched = true;
            glyph.advance += width;
            let line = self.lines.partition_point(|line| line.glyph_end <= index);
            if let Some(line) = self.lines.get_mut(line) {
                line.width += width;
                line.horz_dirty = true;
                if !nearly_zero(height) {
                    line.height_dirty = true;
                }
            }
        }
        if self.glyphs.is_empty()
            && self.fallback_element == Some(element)
            && !nearly_zero(height)
        {
            for line in &mut self.lines {
                line.height_dirty = true;
            }
        }
        if touched && !nearly_zero(width) {
            if self.word_wrap() {
                self.lines_dirty = true;
            }
            // Forces the fit check on the next formatting pass.
            self.area_width = None;
        }
    }

    /// Brings lines, heights and horizontal formatting up to date.
    pub(crate) fn update_formatting(
        &mut self,
        elements: &[TextElement],
        area_width: f32,
        default_height: f32,
    ) {
        if self.area_width != Some(area_width) {
            self.on_area_width_changed(area_width);
        }
        self.update_lines(elements, area_width);
        self.update_line_heights(elements, default_height);
        self.update_horizontal_formatting(area_width);
    }
}

// Copyright 2026 the Rendered Text Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Line breaking and per-line formatting.

use super::RenderedTextParagraph;
use crate::element::TextElement;
use crate::format::HorizontalFormatting;
use crate::util::WIDTH_EPSILON;
use core::ops::Range;

/// A row of glyphs produced by line breaking.
#[derive(Copy, Clone, Default, Debug, PartialEq)]
pub struct Line {
    pub(crate) glyph_start: usize,
    pub(crate) glyph_end: usize,
    pub(crate) width: f32,
    pub(crate) height: f32,
    pub(crate) horz_offset: f32,
    pub(crate) justify_space: f32,
    pub(crate) justifiable_count: u32,
    pub(crate) height_dirty: bool,
    pub(crate) horz_dirty: bool,
}

impl Line {
    fn new(glyphs: Range<usize>, width: f32, justifiable_count: u32) -> Self {
        Self {
            glyph_start: glyphs.start,
            glyph_end: glyphs.end,
            width,
            justifiable_count,
            height_dirty: true,
            horz_dirty: true,
            ..Self::default()
        }
    }

    /// Glyph indices covered by the line.
    pub fn glyph_range(&self) -> Range<usize> {
        self.glyph_start..self.glyph_end
    }

    /// Content width, excluding whitespace hanging past a wrap point.
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Height of the tallest element on the line.
    pub fn height(&self) -> f32 {
        self.height
    }

    /// Horizontal offset applied by alignment.
    pub fn horizontal_offset(&self) -> f32 {
        self.horz_offset
    }

    /// Extra space given to each justifiable glyph.
    pub fn justify_space(&self) -> f32 {
        self.justify_space
    }

    /// Number of glyphs that receive justification space.
    pub fn justifiable_count(&self) -> u32 {
        self.justifiable_count
    }

    fn is_empty(&self) -> bool {
        self.glyph_start == self.glyph_end
    }
}

pub(crate) fn fits(width: f32, area_width: f32) -> bool {
    width <= area_width + WIDTH_EPSILON
}

/// Last whitespace position at which the current line may be split.
#[derive(Copy, Clone, Debug)]
struct Breakpoint {
    /// Last glyph of the whitespace run.
    index: usize,
    /// Line width before the whitespace run.
    width_before: f32,
    justifiable_before: u32,
    /// Line width including the whitespace run.
    width_after: f32,
    justifiable_after: u32,
}

impl RenderedTextParagraph {
    /// Rebuilds lines if they are dirty.
    pub(crate) fn update_lines(&mut self, elements: &[TextElement], area_width: f32) {
        if !self.lines_dirty {
            return;
        }
        self.lines.clear();
        self.fits = true;
        self.area_width = Some(area_width);

        let word_wrap = self.word_wrap();
        let mut line_start = 0;
        let mut width = 0.;
        let mut justifiable = 0;
        let mut overhang = 0.;
        let mut breakpoint: Option<Breakpoint> = None;

        for (index, glyph) in self.glyphs.iter().enumerate() {
            let justifiable_here = u32::from(glyph.is_justifiable);
            if glyph.is_whitespace {
                if glyph.is_breakable {
                    breakpoint = Some(match breakpoint {
                        Some(previous) if previous.index + 1 == index => Breakpoint {
                            index,
                            width_after: width + glyph.advance,
                            justifiable_after: justifiable + justifiable_here,
                            ..previous
                        },
                        _ => Breakpoint {
                            index,
                            width_before: width + overhang,
                            justifiable_before: justifiable,
                            width_after: width + glyph.advance,
                            justifiable_after: justifiable + justifiable_here,
                        },
                    });
                }
                width += glyph.advance;
                justifiable += justifiable_here;
                overhang = 0.;
                continue;
            }

            let element = &elements[usize::from(glyph.element_index)];
            let full_width = glyph.advance.max(element.glyph_width(glyph));
            if word_wrap && !fits(width + full_width, area_width) {
                if let Some(breakpoint) = breakpoint.take() {
                    self.lines.push(Line::new(
                        line_start..breakpoint.index + 1,
                        breakpoint.width_before,
                        breakpoint.justifiable_before,
                    ));
                    line_start = breakpoint.index + 1;
                    width -= breakpoint.width_after;
                    justifiable -= breakpoint.justifiable_after;
                }
                if !fits(width + full_width, area_width) && index > line_start {
                    self.lines
                        .push(Line::new(line_start..index, width + overhang, justifiable));
                    line_start = index;
                    width = 0.;
                    justifiable = 0;
                    self.fits = false;
                }
                if index == line_start && !fits(full_width, area_width) {
                    self.fits = false;
                }
            }
            width += glyph.advance;
            justifiable += justifiable_here;
            overhang = (full_width - glyph.advance).max(0.);
        }

        let width = width + overhang;
        if !word_wrap && !fits(width, area_width) {
            self.fits = false;
        }
        self.lines.push(Line::new(
            line_start..self.glyphs.len(),
            width,
            justifiable,
        ));
        self.lines_dirty = false;
    }

    /// Recomputes the height of lines marked dirty.
    pub(crate) fn update_line_heights(&mut self, elements: &[TextElement], default_height: f32) {
        for line_index in 0..self.lines.len() {
            let line = self.lines[line_index];
            if !line.height_dirty {
                continue;
            }
            let height = if line.is_empty() {
                self.empty_line_height(elements, line.glyph_start, default_height)
            } else {
                self.glyphs[line.glyph_range()]
                    .iter()
                    .map(|glyph| elements[usize::from(glyph.element_index)].height())
                    .fold(0., f32::max)
            };
            let line = &mut self.lines[line_index];
            line.height = height;
            line.height_dirty = false;
        }
    }

    /// Height of a line without glyphs: that of the nearest preceding text
    /// glyph, else the paragraph's fallback style, else the default font.
    fn empty_line_height(
        &self,
        elements: &[TextElement],
        before: usize,
        default_height: f32,
    ) -> f32 {
        let preceding = self.glyphs[..before]
            .iter()
            .rev()
            .map(|glyph| &elements[usize::from(glyph.element_index)])
            .find(|element| !element.is_embedded_object());
        let fallback = self
            .fallback_element
            .and_then(|index| elements.get(usize::from(index)))
            .filter(|element| !element.is_embedded_object());
        preceding
            .or(fallback)
            .map_or(default_height, TextElement::height)
    }

    /// Recomputes alignment of lines marked dirty.
    pub(crate) fn update_horizontal_formatting(&mut self, area_width: f32) {
        let formatting = self.horizontal_formatting();
        let last_formatting = self.last_justified_line_formatting();
        let last = self.lines.len().saturating_sub(1);
        for (index, line) in self.lines.iter_mut().enumerate() {
            if !line.horz_dirty {
                continue;
            }
            let formatting = match formatting {
                HorizontalFormatting::Justified if index == last => last_formatting,
                formatting => formatting,
            };
            line.horz_offset = 0.;
            line.justify_space = 0.;
            match formatting {
                HorizontalFormatting::Left => {}
                HorizontalFormatting::Right => line.horz_offset = area_width - line.width,
                HorizontalFormatting::Centre => {
                    line.horz_offset = (area_width - line.width) * 0.5;
                }
                HorizontalFormatting::Justified => {
                    if line.justifiable_count > 0 && line.width < area_width {
                        line.justify_space =
                            (area_width - line.width) / line.justifiable_count as f32;
                    }
                }
            }
            line.horz_dirty = false;
        }
    }
}

// Copyright 2026 the Rendered Text Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Index and point queries in paragraph-local coordinates.
//!
//! Text indices are byte offsets into the input text. The y axis starts at
//! the top of the paragraph and the x axis at the left edge of the area, so
//! alignment offsets are included.

use super::RenderedTextParagraph;
use crate::util::{rect, to_f32};
use peniko::kurbo::{Point, Rect};

/// Placement of a text index.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct IndexBounds {
    /// Box of the glyph at the index, or a zero-width box at the end of the
    /// paragraph.
    pub rect: Rect,
    /// The glyph runs right to left, so a caret belongs on the right edge.
    pub is_rtl: bool,
}

impl IndexBounds {
    /// Horizontal caret position.
    pub fn caret_x(&self) -> f64 {
        if self.is_rtl {
            self.rect.x1
        } else {
            self.rect.x0
        }
    }
}

impl RenderedTextParagraph {
    /// First glyph whose source does not end at or before `index`.
    fn glyph_at(&self, index: usize) -> usize {
        self.glyphs.partition_point(|glyph| glyph.source_end() <= index)
    }

    fn last_line(&self) -> usize {
        self.lines.len().saturating_sub(1)
    }

    fn line_of_glyph(&self, glyph: usize) -> usize {
        self.lines
            .partition_point(|line| line.glyph_end <= glyph)
            .min(self.last_line())
    }

    pub(crate) fn line_of_index(&self, index: usize) -> usize {
        self.line_of_glyph(self.glyph_at(index))
    }

    pub(crate) fn line_top(&self, line: usize) -> f32 {
        self.lines[..line.min(self.lines.len())]
            .iter()
            .map(|line| line.height)
            .sum()
    }

    /// Vertical centre of the line holding `index`.
    pub(crate) fn caret_centre_y(&self, index: usize) -> f32 {
        let line = self.line_of_index(index);
        let height = self.lines.get(line).map_or(0., |line| line.height);
        self.line_top(line) + height * 0.5
    }

    fn line_at_y(&self, y: f32) -> usize {
        let mut top = 0.;
        for (index, line) in self.lines.iter().enumerate() {
            top += line.height;
            if y < top {
                return index;
            }
        }
        self.last_line()
    }

    fn line_start_index(&self, line: usize) -> usize {
        match self.lines.get(line) {
            Some(line) if line.glyph_start < line.glyph_end => {
                self.glyphs[line.glyph_start].source_index as usize
            }
            _ => self.source_start,
        }
    }

    fn line_end_index(&self, line: usize) -> usize {
        if line >= self.last_line() {
            return self.source_end;
        }
        let line = self.lines[line];
        match self.glyphs[..line.glyph_end].last() {
            // The caret stays in front of whitespace hanging at a wrap point.
            Some(glyph) if glyph.is_whitespace => glyph.source_index as usize,
            _ => self.index_of_glyph(line.glyph_end),
        }
    }

    fn index_of_glyph(&self, glyph: usize) -> usize {
        self.glyphs
            .get(glyph)
            .map_or(self.source_end, |glyph| glyph.source_index as usize)
    }

    /// Index of the caret position after `glyph` on `line`.
    fn index_after(&self, glyph: usize, line: usize) -> usize {
        if glyph + 1 < self.lines[line].glyph_end {
            self.glyphs[glyph + 1].source_index as usize
        } else {
            self.line_end_index(line)
        }
    }

    /// Closest caret position to `x` on `line`.
    pub(crate) fn index_on_line(&self, line: usize, x: f32) -> usize {
        let Some(&line_data) = self.lines.get(line) else {
            return self.source_start;
        };
        let placed = self.place_line(&line_data);
        for p in &placed {
            if x < p.x + p.advance {
                let glyph = &self.glyphs[p.index];
                let left_half = x < p.x + p.advance * 0.5;
                return if left_half != glyph.is_right_to_left {
                    glyph.source_index as usize
                } else {
                    self.index_after(p.index, line)
                };
            }
        }
        match placed.last() {
            Some(p) if self.glyphs[p.index].is_right_to_left => {
                self.glyphs[p.index].source_index as usize
            }
            Some(_) => self.line_end_index(line),
            None => self.line_start_index(line),
        }
    }

    /// Caret position closest to `point`.
    pub fn text_index_at_point(&self, point: Point) -> usize {
        if self.lines.is_empty() {
            return self.source_start;
        }
        let line = self.line_at_y(to_f32(point.y));
        self.index_on_line(line, to_f32(point.x))
    }

    /// Placement of the glyph at `index`, or of the paragraph end.
    ///
    /// Returns `None` for indices outside the paragraph or before layout.
    pub fn text_index_bounds(&self, index: usize) -> Option<IndexBounds> {
        if index < self.source_start || index > self.source_end || self.lines.is_empty() {
            return None;
        }
        let glyph = self.glyph_at(index);
        let line = self.line_of_glyph(glyph);
        let line_data = self.lines[line];
        let top = self.line_top(line);
        let placed = self.place_line(&line_data);

        if let Some(p) = placed.iter().find(|p| p.index == glyph) {
            return Some(IndexBounds {
                rect: rect(p.x, top, p.advance, line_data.height),
                is_rtl: self.glyphs[glyph].is_right_to_left,
            });
        }

        // End of the paragraph: after the last logical glyph.
        let last = self.glyphs.len().checked_sub(1);
        let x = match last.and_then(|last| placed.iter().find(|p| p.index == last)) {
            Some(p) if self.glyphs[p.index].is_right_to_left => p.x,
            Some(p) => p.x + p.advance,
            None => line_data.horz_offset,
        };
        Some(IndexBounds {
            rect: rect(x, top, 0., line_data.height),
            is_rtl: self.direction.is_rtl(),
        })
    }

    /// Start of the glyph after the one at `index`, or the paragraph end.
    ///
    /// Returns `None` at the end of the paragraph.
    pub fn next_text_index(&self, index: usize) -> Option<usize> {
        if index >= self.source_end {
            return None;
        }
        let next = self.glyphs.partition_point(|glyph| glyph.source_index as usize <= index);
        Some(self.index_of_glyph(next))
    }

    /// Start of the glyph before `index`.
    ///
    /// Returns `None` at the start of the paragraph.
    pub fn prev_text_index(&self, index: usize) -> Option<usize> {
        if index <= self.source_start {
            return None;
        }
        let previous = self.glyphs.partition_point(|glyph| (glyph.source_index as usize) < index);
        previous
            .checked_sub(1)
            .map(|previous| self.glyphs[previous].source_index as usize)
    }

    /// Caret position on the line above, or `None` on the first line.
    pub fn line_up_text_index(&self, index: usize, caret_x: f32) -> Option<usize> {
        let line = self.line_of_index(index);
        (line > 0 && !self.lines.is_empty()).then(|| self.index_on_line(line - 1, caret_x))
    }

    /// Caret position on the line below, or `None` on the last line.
    pub fn line_down_text_index(&self, index: usize, caret_x: f32) -> Option<usize> {
        let line = self.line_of_index(index);
        (line + 1 < self.lines.len()).then(|| self.index_on_line(line + 1, caret_x))
    }

    /// Caret position `page_height` above, clamped to the first line.
    pub fn page_up_text_index(&self, index: usize, caret_x: f32, page_height: f32) -> usize {
        let y = self.caret_centre_y(index) - page_height;
        self.text_index_at_point(Point::new(f64::from(caret_x), f64::from(y)))
    }

    /// Caret position `page_height` below, clamped to the last line.
    pub fn page_down_text_index(&self, index: usize, caret_x: f32, page_height: f32) -> usize {
        let y = self.caret_centre_y(index) + page_height;
        self.text_index_at_point(Point::new(f64::from(caret_x), f64::from(y)))
    }

    /// Start of the line holding `index`.
    pub fn line_start_text_index(&self, index: usize) -> usize {
        self.line_start_index(self.line_of_index(index))
    }

    /// End of the line holding `index`.
    pub fn line_end_text_index(&self, index: usize) -> usize {
        self.line_end_index(self.line_of_index(index))
    }

    /// Start of the paragraph.
    pub fn paragraph_start_text_index(&self) -> usize {
        self.source_start
    }

    /// End of the paragraph.
    pub fn paragraph_end_text_index(&self) -> usize {
        self.source_end
    }
}

// Copyright 2026 the Rendered Text Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use super::{Line, RenderedTextParagraph};
use crate::bidi::reorder_visual;
use crate::element::{LineBox, PositionedGlyph, RenderContext, TextElement};
use crate::util::to_f32;
use peniko::kurbo::Point;
use smallvec::SmallVec;

/// A glyph placed on a line, in visual order.
#[derive(Copy, Clone, Debug)]
pub(crate) struct PlacedGlyph {
    /// Index into the paragraph's glyphs.
    pub(crate) index: usize,
    /// Pen position relative to the paragraph's left edge.
    pub(crate) x: f32,
    /// Advance including justification.
    pub(crate) advance: f32,
}

impl RenderedTextParagraph {
    /// Places the glyphs of `line` from left to right.
    ///
    /// Whitespace hanging at a wrap point is not part of the line width. It
    /// sits past the trailing edge: right of the line for left-to-right
    /// paragraphs, left of it for right-to-left ones.
    pub(crate) fn place_line(&self, line: &Line) -> SmallVec<[PlacedGlyph; 32]> {
        let glyphs = &self.glyphs[line.glyph_range()];
        let trailing = glyphs
            .iter()
            .rev()
            .take_while(|glyph| glyph.is_whitespace)
            .count();
        let content_end = glyphs.len() - trailing;

        let mut levels: SmallVec<[u8; 32]> = glyphs.iter().map(|glyph| glyph.bidi_level).collect();
        // Trailing whitespace takes the paragraph level (rule L1).
        let base = self.direction.level();
        for level in &mut levels[content_end..] {
            *level = base;
        }

        let hanging_start = if line.glyph_end < self.glyphs.len() {
            content_end
        } else {
            glyphs.len()
        };
        let mut x = line.horz_offset;
        if self.direction.is_rtl() {
            x -= glyphs[hanging_start..]
                .iter()
                .map(|glyph| glyph.advance)
                .sum::<f32>();
        }

        reorder_visual(&levels)
            .into_iter()
            .map(|offset| {
                let glyph = &glyphs[offset];
                let advance = if glyph.is_justifiable && offset < hanging_start {
                    glyph.advance + line.justify_space
                } else {
                    glyph.advance
                };
                let placed = PlacedGlyph {
                    index: line.glyph_start + offset,
                    x,
                    advance,
                };
                x += advance;
                placed
            })
            .collect()
    }

    /// Draws every line, the first one with its top at `origin.y`.
    pub(crate) fn create_render_geometry(
        &self,
        context: &mut RenderContext<'_>,
        elements: &[TextElement],
        origin: Point,
    ) {
        let origin_x = to_f32(origin.x);
        let mut top = to_f32(origin.y);
        let mut run: SmallVec<[PositionedGlyph<'_>; 32]> = SmallVec::new();
        for line in &self.lines {
            let line_box = LineBox {
                top,
                height: line.height,
            };
            run.clear();
            for placed in self.place_line(line) {
                let glyph = &self.glyphs[placed.index];
                if run
                    .last()
                    .is_some_and(|last| last.glyph.element_index != glyph.element_index)
                {
                    draw_run(context, elements, &run, line_box);
                    run.clear();
                }
                run.push(PositionedGlyph {
                    glyph,
                    x: origin_x + placed.x,
                    advance: placed.advance,
                });
            }
            draw_run(context, elements, &run, line_box);
            top += line.height;
        }
    }
}

fn draw_run(
    context: &mut RenderContext<'_>,
    elements: &[TextElement],
    run: &[PositionedGlyph<'_>],
    line: LineBox,
) {
    if let Some(first) = run.first() {
        elements[usize::from(first.glyph.element_index)].create_render_geometry(context, run, line);
    }
}

// Copyright 2026 the Rendered Text Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use super::{
    draw_selection_background, for_each_span, vertical_placement, GlyphContext, LineBox,
    PositionedGlyph, RenderContext,
};
use crate::colour::ColourRect;
use crate::format::{Padding, VerticalFormatting};
use crate::geometry::{push_quad, GeometrySource, Quad};
use crate::paragraph::RenderedGlyph;
use crate::resources::{DecorationMetrics, FontRef, GlyphBounds, GlyphId};
use crate::util::rect;
use peniko::Color;

/// Style of a text run.
#[derive(Clone, Debug)]
pub struct TextStyle {
    /// Font; `None` means the document's default font.
    pub font: Option<FontRef>,
    /// Text colours.
    pub colours: ColourRect,
    /// Background fill behind the run.
    pub background: Option<Color>,
    /// Draw an underline.
    pub underline: bool,
    /// Draw a strikeout line.
    pub strikeout: bool,
    /// Colour of the outline pass.
    pub outline_colour: ColourRect,
    /// Outline thickness; zero disables the outline pass.
    pub outline_size: f32,
    /// Space around the run.
    pub padding: Padding,
    /// Placement inside a taller line.
    pub vertical_formatting: VerticalFormatting,
    line_height: f32,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self::new(None)
    }
}

impl TextStyle {
    /// A plain style drawn with `font`.
    pub fn new(font: Option<FontRef>) -> Self {
        let line_height = font.as_ref().map_or(0., |font| font.line_height());
        Self {
            font,
            colours: ColourRect::default(),
            background: None,
            underline: false,
            strikeout: false,
            outline_colour: ColourRect::uniform(Color::BLACK),
            outline_size: 0.,
            padding: Padding::default(),
            vertical_formatting: VerticalFormatting::default(),
            line_height,
        }
    }

    pub(crate) fn resolve_font(&mut self, default: &FontRef) {
        if self.font.is_none() {
            self.font = Some(default.clone());
            self.line_height = default.line_height();
        }
    }

    pub(crate) fn height(&self) -> f32 {
        let line_height = self.font.as_ref().map_or(0., |font| font.line_height());
        line_height + self.padding.height()
    }

    pub(crate) fn setup_glyph(
        &self,
        glyph: &mut RenderedGlyph,
        codepoint: char,
        context: GlyphContext,
    ) {
        let Some(font) = &self.font else {
            glyph.font_glyph = None;
            glyph.advance = 0.;
            return;
        };

        let id = font
            .glyph_index(codepoint)
            .or_else(|| font.replacement_glyph());
        let kerning = match (context.previous, id) {
            (Some(previous), Some(id)) => font.kerning(previous, id),
            _ => 0.,
        };
        let left = if context.first_in_run {
            self.padding.left
        } else {
            0.
        };
        let right = if context.last_in_run {
            self.padding.right
        } else {
            0.
        };

        glyph.font_glyph = id;
        glyph.offset_x = kerning + left;
        glyph.offset_y = font.baseline() + self.padding.top;
        glyph.advance = id.map_or(0., |id| font.advance(id)) + kerning + left + right;
    }

    pub(crate) fn glyph_width(&self, glyph: &RenderedGlyph) -> f32 {
        let bounds = match (&self.font, glyph.font_glyph) {
            (Some(font), Some(id)) => font.glyph_bounds(id),
            _ => None,
        };
        bounds.map_or(glyph.advance, |bounds| glyph.offset_x + bounds.right())
    }

    pub(crate) fn update_metrics(&mut self) -> (f32, f32) {
        let line_height = self.font.as_ref().map_or(0., |font| font.line_height());
        let delta = line_height - self.line_height;
        self.line_height = line_height;
        (0., delta)
    }

    pub(crate) fn create_render_geometry(
        &self,
        context: &mut RenderContext<'_>,
        run: &[PositionedGlyph<'_>],
        line: LineBox,
    ) {
        let Some(font) = &self.font else {
            return;
        };
        let (top, scale) = vertical_placement(self.vertical_formatting, self.height(), line);

        if let Some(background) = self.background {
            let colours =
                ColourRect::uniform(background).modulated_by(context.mod_colours);
            for_each_span(run, |_| (), |start, end, ()| {
                push_quad(
                    context.out,
                    context.combine_from,
                    &GeometrySource::Solid,
                    context.clip,
                    Quad {
                        rect: rect(start, line.top, end - start, line.height),
                        colours,
                        glyph: None,
                    },
                );
            });
        }
        draw_selection_background(context, run, line);

        if self.outline_size > 0. {
            let source = GeometrySource::Glyphs {
                font: font.clone(),
                outline: Some(self.outline_size),
            };
            let colours = self.outline_colour.modulated_by(context.mod_colours);
            for positioned in run {
                let Some(id) = positioned.glyph.font_glyph else {
                    continue;
                };
                let Some(bounds) = font.outline_bounds(id, self.outline_size) else {
                    continue;
                };
                let quad = glyph_quad(positioned, bounds, top, scale, colours, id);
                push_quad(context.out, context.combine_from, &source, context.clip, quad);
            }
        }

        let source = GeometrySource::Glyphs {
            font: font.clone(),
            outline: None,
        };
        for positioned in run {
            let Some(id) = positioned.glyph.font_glyph else {
                continue;
            };
            let Some(bounds) = font.glyph_bounds(id) else {
                continue;
            };
            let colours = self
                .colours_for(context, positioned.glyph)
                .modulated_by(context.mod_colours);
            let quad = glyph_quad(positioned, bounds, top, scale, colours, id);
            push_quad(context.out, context.combine_from, &source, context.clip, quad);
        }

        if self.underline {
            self.draw_decoration(context, run, top, scale, font.underline());
        }
        if self.strikeout {
            self.draw_decoration(context, run, top, scale, font.strikeout());
        }
    }

    fn colours_for(&self, context: &RenderContext<'_>, glyph: &RenderedGlyph) -> ColourRect {
        match context.selection {
            Some(selection) if selection.contains(glyph) => selection.text_colours,
            _ => self.colours,
        }
    }

    /// Draws one decoration line per span of constant selection state.
    fn draw_decoration(
        &self,
        context: &mut RenderContext<'_>,
        run: &[PositionedGlyph<'_>],
        top: f32,
        scale: f32,
        metrics: DecorationMetrics,
    ) {
        let selection = context.selection;
        let y = top + (self.padding.top + metrics.offset) * scale;
        let height = metrics.thickness * scale;
        for_each_span(
            run,
            |glyph| selection.is_some_and(|selection| selection.contains(glyph)),
            |start, end, selected| {
                let colours = match selection {
                    Some(selection) if selected => selection.text_colours,
                    _ => self.colours,
                }
                .modulated_by(context.mod_colours);
                push_quad(
                    context.out,
                    context.combine_from,
                    &GeometrySource::Solid,
                    context.clip,
                    Quad {
                        rect: rect(start, y, end - start, height),
                        colours,
                        glyph: None,
                    },
                );
            },
        );
    }
}

fn glyph_quad(
    positioned: &PositionedGlyph<'_>,
    bounds: GlyphBounds,
    top: f32,
    scale: f32,
    colours: ColourRect,
    id: GlyphId,
) -> Quad {
    let glyph = positioned.glyph;
    let x = positioned.x + glyph.offset_x + bounds.x;
    let y = top + (glyph.offset_y + bounds.y) * scale;
    Quad {
        rect: rect(x, y, bounds.width, bounds.height * scale),
        colours,
        glyph: Some(id),
    }
}

// Copyright 2026 the Rendered Text Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Styling and embedding units referenced by glyphs.

mod image;
mod style;
mod widget;

pub use image::ImageElement;
pub use style::TextStyle;
pub use widget::WidgetElement;

use crate::colour::ColourRect;
use crate::format::{Padding, VerticalFormatting};
use crate::geometry::{push_quad, GeometryBuffer, GeometrySource, Quad};
use crate::paragraph::RenderedGlyph;
use crate::resources::{FontRef, GlyphId, HostWindow};
use crate::util::rect;
use alloc::vec::Vec;
use core::ops::Range;
use peniko::kurbo::{Point, Rect};
use peniko::Color;

/// A styling or embedding unit.
#[derive(Clone, Debug)]
pub enum TextElement {
    /// A run of text drawn with one style.
    Style(TextStyle),
    /// An embedded image.
    Image(ImageElement),
    /// A placeholder for a live child widget.
    Widget(WidgetElement),
}

/// Discriminant of [`TextElement`].
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum ElementKind {
    /// [`TextElement::Style`].
    Style,
    /// [`TextElement::Image`].
    Image,
    /// [`TextElement::Widget`].
    Widget,
}

/// Neighbourhood of a glyph during setup.
#[derive(Copy, Clone, Default, Debug)]
pub(crate) struct GlyphContext {
    /// Previous glyph in the same font, for kerning.
    pub(crate) previous: Option<GlyphId>,
    /// The glyph opens a run of its element.
    pub(crate) first_in_run: bool,
    /// The glyph closes a run of its element.
    pub(crate) last_in_run: bool,
}

/// A glyph with its final horizontal placement on a line.
#[derive(Copy, Clone, Debug)]
pub(crate) struct PositionedGlyph<'a> {
    pub(crate) glyph: &'a RenderedGlyph,
    /// Pen position, before the glyph's own offset.
    pub(crate) x: f32,
    /// Advance including justification.
    pub(crate) advance: f32,
}

/// Selection highlighting for rendering.
#[derive(Clone, PartialEq, Debug)]
pub struct TextSelection {
    /// Selected source byte range.
    pub range: Range<usize>,
    /// Text colours used inside the selection.
    pub text_colours: ColourRect,
    /// Selection background, if any.
    pub background: Option<Color>,
}

impl TextSelection {
    pub(crate) fn contains(&self, glyph: &RenderedGlyph) -> bool {
        let index = glyph.source_index as usize;
        index >= self.range.start && index < self.range.end
    }
}

/// Everything element rendering needs besides the run itself.
#[derive(Debug)]
pub(crate) struct RenderContext<'a> {
    pub(crate) out: &'a mut Vec<GeometryBuffer>,
    pub(crate) combine_from: usize,
    pub(crate) clip: Option<Rect>,
    pub(crate) mod_colours: Option<&'a ColourRect>,
    pub(crate) selection: Option<&'a TextSelection>,
}

/// Vertical box of a line.
#[derive(Copy, Clone, Debug)]
pub(crate) struct LineBox {
    pub(crate) top: f32,
    pub(crate) height: f32,
}

impl TextElement {
    /// The kind of this element.
    pub fn kind(&self) -> ElementKind {
        match self {
            Self::Style(_) => ElementKind::Style,
            Self::Image(_) => ElementKind::Image,
            Self::Widget(_) => ElementKind::Widget,
        }
    }

    /// Padding around the element's content.
    pub fn padding(&self) -> Padding {
        match self {
            Self::Style(style) => style.padding,
            Self::Image(image) => image.padding,
            Self::Widget(widget) => widget.padding,
        }
    }

    /// Vertical placement inside a taller line.
    pub fn vertical_formatting(&self) -> VerticalFormatting {
        match self {
            Self::Style(style) => style.vertical_formatting,
            Self::Image(image) => image.vertical_formatting,
            Self::Widget(widget) => widget.vertical_formatting,
        }
    }

    /// The font of a text style.
    pub fn font(&self) -> Option<&FontRef> {
        match self {
            Self::Style(style) => style.font.as_ref(),
            _ => None,
        }
    }

    /// Returns `true` for images and widgets.
    pub fn is_embedded_object(&self) -> bool {
        !matches!(self, Self::Style(_))
    }

    /// Height of the element box including padding.
    pub fn height(&self) -> f32 {
        match self {
            Self::Style(style) => style.height(),
            Self::Image(image) => image.height(),
            Self::Widget(widget) => widget.height(),
        }
    }

    /// Initializes offset, advance and traits of a glyph owned by this element.
    pub(crate) fn setup_glyph(
        &self,
        glyph: &mut RenderedGlyph,
        codepoint: char,
        context: GlyphContext,
    ) {
        match self {
            Self::Style(style) => style.setup_glyph(glyph, codepoint, context),
            Self::Image(image) => {
                let (width, _) = image.effective_size();
                setup_object_glyph(glyph, image.padding, width);
            }
            Self::Widget(widget) => {
                let (width, _) = widget.effective_size();
                setup_object_glyph(glyph, widget.padding, width);
            }
        }
    }

    /// Visual right edge of a glyph relative to its pen position.
    pub(crate) fn glyph_width(&self, glyph: &RenderedGlyph) -> f32 {
        match self {
            Self::Style(style) => style.glyph_width(glyph),
            _ => glyph.advance,
        }
    }

    /// Re-queries size-dependent metrics. Returns the change of the glyph
    /// advance and of the element height.
    pub(crate) fn update_metrics(&mut self, host: Option<&dyn HostWindow>) -> (f32, f32) {
        match self {
            Self::Style(style) => style.update_metrics(),
            Self::Image(image) => image.update_metrics(),
            Self::Widget(widget) => widget.update_metrics(host),
        }
    }

    /// Draws a run of consecutive glyphs that share this element.
    pub(crate) fn create_render_geometry(
        &self,
        context: &mut RenderContext<'_>,
        run: &[PositionedGlyph<'_>],
        line: LineBox,
    ) {
        match self {
            Self::Style(style) => style.create_render_geometry(context, run, line),
            Self::Image(image) => image.create_render_geometry(context, run, line),
            Self::Widget(widget) => widget.place(run, line),
        }
    }
}

fn setup_object_glyph(glyph: &mut RenderedGlyph, padding: Padding, width: f32) {
    glyph.font_glyph = None;
    glyph.offset_x = padding.left;
    glyph.offset_y = padding.top;
    glyph.advance = width + padding.width();
    glyph.is_justifiable = false;
    glyph.is_breakable = false;
    glyph.is_whitespace = false;
}

/// Offset and scale of an element box of `height` inside `line`.
pub(crate) fn vertical_placement(
    formatting: VerticalFormatting,
    height: f32,
    line: LineBox,
) -> (f32, f32) {
    match formatting {
        VerticalFormatting::Top | VerticalFormatting::Tiled => (line.top, 1.),
        VerticalFormatting::Centre => (line.top + (line.height - height) * 0.5, 1.),
        VerticalFormatting::Bottom => (line.top + line.height - height, 1.),
        VerticalFormatting::Stretched => {
            let scale = if height > 0. { line.height / height } else { 1. };
            (line.top, scale)
        }
    }
}

/// Draws solid quads under selected sub-runs.
pub(crate) fn draw_selection_background(
    context: &mut RenderContext<'_>,
    run: &[PositionedGlyph<'_>],
    line: LineBox,
) {
    let Some(selection) = context.selection else {
        return;
    };
    let Some(background) = selection.background else {
        return;
    };
    let colours = ColourRect::uniform(background);
    for_each_span(run, |glyph| selection.contains(glyph), |start, end, selected| {
        if selected {
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
        }
    });
}

/// Calls `f(start_x, end_x, key)` for every maximal span of glyphs with the
/// same `key`.
pub(crate) fn for_each_span<K: PartialEq + Copy>(
    run: &[PositionedGlyph<'_>],
    key: impl Fn(&RenderedGlyph) -> K,
    mut f: impl FnMut(f32, f32, K),
) {
    let Some(first) = run.first() else {
        return;
    };
    let mut current = key(first.glyph);
    let mut start = first.x;
    let mut end = first.x + first.advance;
    for positioned in &run[1..] {
        let k = key(positioned.glyph);
        if k != current {
            f(start, end, current);
            current = k;
            start = positioned.x;
        }
        end = positioned.x + positioned.advance;
    }
    f(start, end, current);
}

/// Position of the top-left corner of a placed object.
pub(crate) fn object_origin(positioned: &PositionedGlyph<'_>, y: f32) -> Point {
    Point::new(
        f64::from(positioned.x + positioned.glyph.offset_x),
        f64::from(y),
    )
}

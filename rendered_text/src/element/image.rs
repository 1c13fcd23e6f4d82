// Copyright 2026 the Rendered Text Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use super::{draw_selection_background, LineBox, PositionedGlyph, RenderContext};
use crate::colour::ColourRect;
use crate::format::{Padding, VerticalFormatting};
use crate::geometry::{push_quad, GeometrySource, Quad};
use crate::resources::ImageRef;
use crate::util::rect;
use peniko::kurbo::Size;

/// An image embedded in text.
#[derive(Clone, Debug)]
pub struct ImageElement {
    /// The image; `None` draws nothing but still occupies its target size.
    pub image: Option<ImageRef>,
    /// Colours the image is modulated with.
    pub colours: ColourRect,
    /// Requested size; a zero component uses the natural size.
    pub size: Size,
    /// Keep the natural aspect ratio when only one dimension is requested,
    /// or fit inside the requested size when both are.
    pub aspect_lock: bool,
    /// Space around the image.
    pub padding: Padding,
    /// Placement inside a taller line.
    pub vertical_formatting: VerticalFormatting,
    effective: (f32, f32),
}

impl ImageElement {
    /// An image drawn at its natural size.
    pub fn new(image: Option<ImageRef>) -> Self {
        let mut element = Self {
            image,
            colours: ColourRect::default(),
            size: Size::ZERO,
            aspect_lock: false,
            padding: Padding::default(),
            vertical_formatting: VerticalFormatting::default(),
            effective: (0., 0.),
        };
        element.effective = element.compute_size();
        element
    }

    /// Content size after resolving the requested size.
    pub fn effective_size(&self) -> (f32, f32) {
        self.effective
    }

    /// Recomputes the effective size after `image`, `size` or
    /// `aspect_lock` changed.
    pub fn refresh_size(&mut self) {
        self.effective = self.compute_size();
    }

    pub(crate) fn height(&self) -> f32 {
        self.effective.1 + self.padding.height()
    }

    fn compute_size(&self) -> (f32, f32) {
        let natural = self
            .image
            .as_ref()
            .map_or(Size::ZERO, |image| image.rendered_size());
        #[expect(
            clippy::cast_possible_truncation,
            reason = "layout works in f32; image sizes are far below f32 precision limits"
        )]
        let (nw, nh) = (natural.width as f32, natural.height as f32);
        #[expect(
            clippy::cast_possible_truncation,
            reason = "layout works in f32; image sizes are far below f32 precision limits"
        )]
        let (tw, th) = (self.size.width as f32, self.size.height as f32);

        match (tw > 0., th > 0.) {
            (true, true) if self.aspect_lock && nw > 0. && nh > 0. => {
                let scale = (tw / nw).min(th / nh);
                (nw * scale, nh * scale)
            }
            (true, true) => (tw, th),
            (true, false) if self.aspect_lock && nw > 0. => (tw, nh * tw / nw),
            (true, false) => (tw, nh),
            (false, true) if self.aspect_lock && nh > 0. => (nw * th / nh, th),
            (false, true) => (nw, th),
            (false, false) => (nw, nh),
        }
    }

    /// Recomputes the effective size and returns the change of the glyph
    /// advance and of the element height.
    pub(crate) fn update_metrics(&mut self) -> (f32, f32) {
        let (width, height) = self.compute_size();
        let delta = (width - self.effective.0, height - self.effective.1);
        self.effective = (width, height);
        delta
    }

    pub(crate) fn create_render_geometry(
        &self,
        context: &mut RenderContext<'_>,
        run: &[PositionedGlyph<'_>],
        line: LineBox,
    ) {
        draw_selection_background(context, run, line);

        let Some(image) = &self.image else {
            return;
        };
        let source = GeometrySource::Image(image.clone());
        let colours = self.colours.modulated_by(context.mod_colours);
        let (width, height) = self.effective;
        let inner_height = line.height - self.padding.height();

        for positioned in run {
            let top = match self.vertical_formatting {
                VerticalFormatting::Top
                | VerticalFormatting::Stretched
                | VerticalFormatting::Tiled => line.top,
                VerticalFormatting::Centre => line.top + (line.height - self.height()) * 0.5,
                VerticalFormatting::Bottom => line.top + line.height - self.height(),
            } + self.padding.top;
            let x = positioned.x + positioned.glyph.offset_x;

            match self.vertical_formatting {
                VerticalFormatting::Stretched => {
                    let quad = Quad {
                        rect: rect(x, top, width, inner_height),
                        colours,
                        glyph: None,
                    };
                    push_quad(context.out, context.combine_from, &source, context.clip, quad);
                }
                VerticalFormatting::Tiled if height > 0. => {
                    let line_rect = rect(x, top, width, inner_height);
                    let clip = match context.clip {
                        Some(clip) => clip.intersect(line_rect),
                        None => line_rect,
                    };
                    let mut y = top;
                    while y < top + inner_height {
                        let quad = Quad {
                            rect: rect(x, y, width, height),
                            colours,
                            glyph: None,
                        };
                        push_quad(context.out, context.combine_from, &source, Some(clip), quad);
                        y += height;
                    }
                }
                _ => {
                    let quad = Quad {
                        rect: rect(x, top, width, height),
                        colours,
                        glyph: None,
                    };
                    push_quad(context.out, context.combine_from, &source, context.clip, quad);
                }
            }
        }
    }
}

// Copyright 2026 the Rendered Text Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Output geometry.
//!
//! Rendering appends to a caller-owned `Vec<GeometryBuffer>`. Consecutive
//! quads that share a source and clip rect are batched into one buffer, but
//! only into buffers at or after the combine-from index so that geometry the
//! caller already owns is never touched.

use crate::colour::ColourRect;
use crate::resources::{same_font, FontRef, GlyphId, ImageRef};
use alloc::sync::Arc;
use alloc::vec::Vec;
use peniko::kurbo::Rect;

/// What a buffer draws from.
#[derive(Clone, Debug)]
pub enum GeometrySource {
    /// Glyph images of a font, optionally the outline variant.
    Glyphs {
        /// The font that owns the glyphs.
        font: FontRef,
        /// Outline thickness, for outline passes.
        outline: Option<f32>,
    },
    /// An image.
    Image(ImageRef),
    /// Solid colour rectangles (decorations, backgrounds, selection).
    Solid,
}

impl GeometrySource {
    fn is_compatible(&self, other: &Self) -> bool {
        match (self, other) {
            (
                Self::Glyphs { font, outline },
                Self::Glyphs {
                    font: other_font,
                    outline: other_outline,
                },
            ) => same_font(font, other_font) && outline == other_outline,
            (Self::Image(a), Self::Image(b)) => Arc::ptr_eq(a, b),
            (Self::Solid, Self::Solid) => true,
            _ => false,
        }
    }
}

/// One textured or solid rectangle.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Quad {
    /// Destination rectangle.
    pub rect: Rect,
    /// Corner colours.
    pub colours: ColourRect,
    /// Glyph to draw, for glyph sources.
    pub glyph: Option<GlyphId>,
}

/// A batch of quads sharing a source and clip rect.
#[derive(Clone, Debug)]
pub struct GeometryBuffer {
    /// What the quads draw from.
    pub source: GeometrySource,
    /// Clip rectangle applied to every quad.
    pub clip: Option<Rect>,
    /// The quads, in draw order.
    pub quads: Vec<Quad>,
}

/// Appends a quad, reusing the last buffer when it is compatible and not
/// before `combine_from`.
pub(crate) fn push_quad(
    out: &mut Vec<GeometryBuffer>,
    combine_from: usize,
    source: &GeometrySource,
    clip: Option<Rect>,
    quad: Quad,
) {
    if clip.is_some_and(|clip| clip.intersect(quad.rect).is_zero_area()) {
        return;
    }
    let len = out.len();
    if len > combine_from {
        if let Some(last) = out.last_mut() {
            if last.clip == clip && last.source.is_compatible(source) {
                last.quads.push(quad);
                return;
            }
        }
    }
    out.push(GeometryBuffer {
        source: source.clone(),
        clip,
        quads: alloc::vec![quad],
    });
}

#[cfg(test)]
mod tests {
    use super::{push_quad, GeometrySource, Quad};
    use crate::colour::ColourRect;
    use alloc::vec::Vec;
    use peniko::kurbo::Rect;

    fn quad(x: f64) -> Quad {
        Quad {
            rect: Rect::new(x, 0., x + 10., 10.),
            colours: ColourRect::default(),
            glyph: None,
        }
    }

    #[test]
    fn combines_compatible_quads() {
        let mut out = Vec::new();
        push_quad(&mut out, 0, &GeometrySource::Solid, None, quad(0.));
        push_quad(&mut out, 0, &GeometrySource::Solid, None, quad(10.));
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].quads.len(), 2);
    }

    #[test]
    fn respects_combine_from() {
        let mut out = Vec::new();
        push_quad(&mut out, 0, &GeometrySource::Solid, None, quad(0.));
        push_quad(&mut out, 1, &GeometrySource::Solid, None, quad(10.));
        assert_eq!(out.len(), 2, "the caller's buffer must not be extended");
    }

    #[test]
    fn skips_fully_clipped_quads() {
        let mut out = Vec::new();
        let clip = Some(Rect::new(100., 100., 200., 200.));
        push_quad(&mut out, 0, &GeometrySource::Solid, clip, quad(0.));
        assert!(out.is_empty());
    }
}

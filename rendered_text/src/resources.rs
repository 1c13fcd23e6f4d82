// Copyright 2026 the Rendered Text Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Contracts for the collaborators that live outside of this crate.
//!
//! Fonts, images and widgets are owned by the host application. Layout only
//! ever queries them; it never rasterizes glyphs or decodes images itself.

use alloc::sync::Arc;
use core::fmt::Debug;
use peniko::kurbo::{Point, Size};

/// Opaque glyph handle issued by a [`Font`].
pub type GlyphId = u32;

/// Shared reference to a font.
pub type FontRef = Arc<dyn Font>;

/// Shared reference to an image.
pub type ImageRef = Arc<dyn Image>;

/// Placement of a glyph image relative to the pen position on the baseline.
#[derive(Copy, Clone, Default, PartialEq, Debug)]
pub struct GlyphBounds {
    /// Horizontal offset of the image from the pen.
    pub x: f32,
    /// Vertical offset of the image from the baseline; negative is up.
    pub y: f32,
    /// Image width.
    pub width: f32,
    /// Image height.
    pub height: f32,
}

impl GlyphBounds {
    /// Grows the bounds by `amount` on every side.
    #[must_use]
    pub fn inflate(&self, amount: f32) -> Self {
        Self {
            x: self.x - amount,
            y: self.y - amount,
            width: self.width + 2. * amount,
            height: self.height + 2. * amount,
        }
    }

    /// The right edge relative to the pen.
    pub fn right(&self) -> f32 {
        self.x + self.width
    }
}

/// Position and thickness of a decoration line.
#[derive(Copy, Clone, Default, PartialEq, Debug)]
pub struct DecorationMetrics {
    /// Offset of the line's top edge from the top of the font's line box.
    pub offset: f32,
    /// Thickness of the line.
    pub thickness: f32,
}

/// A glyph provider.
pub trait Font: Debug + Send + Sync {
    /// Maps a codepoint to a glyph, if the font has one.
    fn glyph_index(&self, codepoint: char) -> Option<GlyphId>;

    /// Glyph used for codepoints the font cannot display.
    fn replacement_glyph(&self) -> Option<GlyphId> {
        None
    }

    /// Horizontal pen advance of a glyph.
    fn advance(&self, glyph: GlyphId) -> f32;

    /// Kerning adjustment between two consecutive glyphs.
    fn kerning(&self, _previous: GlyphId, _glyph: GlyphId) -> f32 {
        0.
    }

    /// Bounds of the glyph image, or `None` when there is nothing to draw.
    fn glyph_bounds(&self, glyph: GlyphId) -> Option<GlyphBounds>;

    /// Bounds of the outline image for `thickness`, or `None` when the font
    /// cannot produce one.
    fn outline_bounds(&self, glyph: GlyphId, thickness: f32) -> Option<GlyphBounds> {
        self.glyph_bounds(glyph).map(|bounds| bounds.inflate(thickness))
    }

    /// Distance from the top of the line box to the baseline.
    fn baseline(&self) -> f32;

    /// Height of the line box.
    fn line_height(&self) -> f32;

    /// Underline placement.
    fn underline(&self) -> DecorationMetrics {
        let thickness = (self.line_height() / 16.).max(1.);
        DecorationMetrics {
            offset: self.baseline() + thickness,
            thickness,
        }
    }

    /// Strikeout placement.
    fn strikeout(&self) -> DecorationMetrics {
        let thickness = (self.line_height() / 16.).max(1.);
        DecorationMetrics {
            offset: self.baseline() * 0.6,
            thickness,
        }
    }
}

/// An image provider.
pub trait Image: Debug + Send + Sync {
    /// Name used to look the image up.
    fn name(&self) -> &str;

    /// Natural rendered size.
    fn rendered_size(&self) -> Size;
}

/// A live child widget embedded in text.
pub trait ChildWidget: Debug + Send + Sync {
    /// Current size in pixels.
    fn pixel_size(&self) -> Size;

    /// Moves the widget, relative to the host's inner rect.
    fn set_position(&self, position: Point);
}

/// The window that owns the text and its child widgets.
pub trait HostWindow {
    /// Resolves a child widget by name.
    fn find_child(&self, name: &str) -> Option<Arc<dyn ChildWidget>>;
}

/// Named fonts and images for markup tags.
pub trait ResourceProvider: Debug + Send + Sync {
    /// Looks a font up by name.
    fn font(&self, name: &str) -> Option<FontRef>;

    /// Looks an image up by name.
    fn image(&self, name: &str) -> Option<ImageRef>;
}

/// Returns `true` if both references point at the same font.
pub(crate) fn same_font(a: &FontRef, b: &FontRef) -> bool {
    Arc::ptr_eq(a, b)
}

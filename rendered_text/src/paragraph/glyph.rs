// Copyright 2026 the Rendered Text Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::resources::GlyphId;

/// One shaped, positioned drawable unit.
///
/// Glyphs refer to their element by index into the owning
/// [`RenderedText`](crate::RenderedText)'s element table; the index is only
/// meaningful for that text.
#[derive(Copy, Clone, Default, PartialEq, Debug)]
pub struct RenderedGlyph {
    /// Glyph handle in the element's font, absent for embedded objects.
    pub font_glyph: Option<GlyphId>,
    /// Horizontal adjustment from the pen position (kerning, padding).
    pub offset_x: f32,
    /// Vertical adjustment from the top of the element box (baseline, padding).
    pub offset_y: f32,
    /// Distance the pen moves after this glyph.
    pub advance: f32,
    /// Byte offset of the glyph's source in the original markup.
    pub source_index: u32,
    /// Number of source bytes this glyph represents.
    pub source_length: u32,
    /// Index of the owning element.
    pub element_index: u16,
    /// Embedding level from bidi analysis.
    pub bidi_level: u8,
    /// May receive extra space under justified formatting.
    pub is_justifiable: bool,
    /// A valid word-wrap point.
    pub is_breakable: bool,
    /// Not rendered at the start of a wrapped line.
    pub is_whitespace: bool,
    /// Right-to-left glyph.
    pub is_right_to_left: bool,
}

impl RenderedGlyph {
    /// The source byte range covered by this glyph.
    pub fn source_range(&self) -> core::ops::Range<usize> {
        let start = self.source_index as usize;
        start..start + self.source_length as usize
    }

    /// Byte offset just past this glyph's source.
    pub fn source_end(&self) -> usize {
        self.source_index as usize + self.source_length as usize
    }
}

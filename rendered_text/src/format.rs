// Copyright 2026 the Rendered Text Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Formatting modes shared by elements, paragraphs and the document.

/// Horizontal placement of a line within the area width.
#[derive(Copy, Clone, Default, PartialEq, Eq, Debug)]
pub enum HorizontalFormatting {
    /// Lines start at the left edge.
    #[default]
    Left,
    /// Lines end at the right edge.
    Right,
    /// Lines are centred within the area.
    Centre,
    /// Extra space is distributed over the justifiable glyphs of each line so
    /// that it fills the area exactly.
    ///
    /// The last line of a paragraph uses the separately configured last
    /// justified line formatting instead.
    Justified,
}

/// Vertical placement of an element's content within a taller line.
#[derive(Copy, Clone, Default, PartialEq, Eq, Debug)]
pub enum VerticalFormatting {
    /// Content touches the top of the line.
    Top,
    /// Content is centred in the line.
    Centre,
    /// Content touches the bottom of the line.
    #[default]
    Bottom,
    /// Content is scaled to the line height.
    Stretched,
    /// Content is repeated to fill the line height.
    ///
    /// Text runs treat this as [`VerticalFormatting::Top`].
    Tiled,
}

/// Requested base direction of a paragraph.
#[derive(Copy, Clone, Default, PartialEq, Eq, Debug)]
pub enum ParagraphDirection {
    /// Left-to-right.
    #[default]
    LeftToRight,
    /// Right-to-left.
    RightToLeft,
    /// Determined from the first strong character. A paragraph without one
    /// continues the direction of the paragraph before it.
    Automatic,
}

/// Resolved base direction of a paragraph.
#[derive(Copy, Clone, Default, PartialEq, Eq, Debug)]
pub enum BaseDirection {
    /// Left-to-right.
    #[default]
    Ltr,
    /// Right-to-left.
    Rtl,
}

impl BaseDirection {
    /// Returns `true` for right-to-left.
    pub fn is_rtl(self) -> bool {
        self == Self::Rtl
    }

    /// The embedding level of the paragraph.
    pub(crate) fn level(self) -> u8 {
        match self {
            Self::Ltr => 0,
            Self::Rtl => 1,
        }
    }
}

/// Space reserved around an element's content.
#[derive(Copy, Clone, Default, PartialEq, Debug)]
pub struct Padding {
    /// Space before the content.
    pub left: f32,
    /// Space above the content.
    pub top: f32,
    /// Space after the content.
    pub right: f32,
    /// Space below the content.
    pub bottom: f32,
}

impl Padding {
    /// Padding with the same value on all sides.
    pub const fn uniform(value: f32) -> Self {
        Self {
            left: value,
            top: value,
            right: value,
            bottom: value,
        }
    }

    /// Total horizontal padding.
    pub fn width(&self) -> f32 {
        self.left + self.right
    }

    /// Total vertical padding.
    pub fn height(&self) -> f32 {
        self.top + self.bottom
    }
}

// Copyright 2026 the Rendered Text Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Corner colours and markup colour values.

use peniko::Color;

/// Colours for the four corners of a quad.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct ColourRect {
    /// Top-left corner.
    pub top_left: Color,
    /// Top-right corner.
    pub top_right: Color,
    /// Bottom-left corner.
    pub bottom_left: Color,
    /// Bottom-right corner.
    pub bottom_right: Color,
}

impl Default for ColourRect {
    fn default() -> Self {
        Self::uniform(Color::WHITE)
    }
}

impl From<Color> for ColourRect {
    fn from(colour: Color) -> Self {
        Self::uniform(colour)
    }
}

impl ColourRect {
    /// All four corners set to `colour`.
    pub const fn uniform(colour: Color) -> Self {
        Self {
            top_left: colour,
            top_right: colour,
            bottom_left: colour,
            bottom_right: colour,
        }
    }

    /// Returns `true` if every corner has the same colour.
    pub fn is_uniform(&self) -> bool {
        self.top_left == self.top_right
            && self.top_left == self.bottom_left
            && self.top_left == self.bottom_right
    }

    /// Component-wise product of two colour rects.
    #[must_use]
    pub fn modulate(&self, other: &Self) -> Self {
        Self {
            top_left: modulate(self.top_left, other.top_left),
            top_right: modulate(self.top_right, other.top_right),
            bottom_left: modulate(self.bottom_left, other.bottom_left),
            bottom_right: modulate(self.bottom_right, other.bottom_right),
        }
    }

    /// Applies an optional modulation.
    #[must_use]
    pub(crate) fn modulated_by(&self, other: Option<&Self>) -> Self {
        match other {
            Some(other) => self.modulate(other),
            None => *self,
        }
    }
}

fn modulate(a: Color, b: Color) -> Color {
    let [ar, ag, ab, aa] = a.components;
    let [br, bg, bb, ba] = b.components;
    Color::new([ar * br, ag * bg, ab * bb, aa * ba])
}

/// Parses a hexadecimal `AARRGGBB` or `RRGGBB` colour.
pub(crate) fn parse_colour(value: &str) -> Option<Color> {
    let value = value.trim();
    if !value.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let argb = u32::from_str_radix(value, 16).ok()?;
    let argb = match value.len() {
        8 => argb,
        6 => 0xFF00_0000 | argb,
        _ => return None,
    };
    let [a, r, g, b] = argb.to_be_bytes();
    Some(Color::from_rgba8(r, g, b, a))
}

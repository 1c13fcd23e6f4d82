// Copyright 2026 the Rendered Text Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Misc helpers.

use peniko::kurbo::Rect;

/// Tolerance used when comparing accumulated widths against the area width.
pub(crate) const WIDTH_EPSILON: f32 = 1.0e-4;

pub(crate) fn nearly_eq(x: f32, y: f32) -> bool {
    let d = x - y;
    d < f32::EPSILON && d > -f32::EPSILON
}

pub(crate) fn nearly_zero(x: f32) -> bool {
    nearly_eq(x, 0.)
}

pub(crate) fn rect(x: f32, y: f32, width: f32, height: f32) -> Rect {
    Rect::new(
        f64::from(x),
        f64::from(y),
        f64::from(x + width),
        f64::from(y + height),
    )
}

/// Narrows a kurbo coordinate to layout precision.
#[expect(
    clippy::cast_possible_truncation,
    reason = "layout works in f32; screen coordinates are far below f32 limits"
)]
pub(crate) fn to_f32(value: f64) -> f32 {
    value as f32
}

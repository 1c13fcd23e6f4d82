// Copyright 2026 the Rendered Text Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tag value syntax.

use crate::format::{Padding, VerticalFormatting};
use peniko::kurbo::Size;

pub(crate) fn parse_bool(value: &str) -> Option<bool> {
    let value = value.trim();
    if value.eq_ignore_ascii_case("true") || value.eq_ignore_ascii_case("yes") || value == "1" {
        Some(true)
    } else if value.eq_ignore_ascii_case("false")
        || value.eq_ignore_ascii_case("no")
        || value == "0"
    {
        Some(false)
    } else {
        None
    }
}

pub(crate) fn parse_float(value: &str) -> Option<f32> {
    value
        .trim()
        .parse::<f32>()
        .ok()
        .filter(|value| value.is_finite())
}

/// Splits `k1:v1 k2:v2 ...` into pairs.
fn pairs(value: &str) -> impl Iterator<Item = Option<(&str, f32)>> {
    value.split_whitespace().map(|pair| {
        let (key, number) = pair.split_once(':')?;
        Some((key, parse_float(number)?))
    })
}

/// Parses `l:<f> t:<f> r:<f> b:<f>`; unspecified sides are zero.
pub(crate) fn parse_padding(value: &str) -> Option<Padding> {
    let mut padding = Padding::default();
    for pair in pairs(value) {
        match pair? {
            ("l", v) => padding.left = v,
            ("t", v) => padding.top = v,
            ("r", v) => padding.right = v,
            ("b", v) => padding.bottom = v,
            _ => return None,
        }
    }
    Some(padding)
}

/// Parses `w:<f> h:<f>`; unspecified dimensions are zero.
pub(crate) fn parse_size(value: &str) -> Option<Size> {
    let mut size = Size::ZERO;
    for pair in pairs(value) {
        match pair? {
            ("w", v) => size.width = f64::from(v),
            ("h", v) => size.height = f64::from(v),
            _ => return None,
        }
    }
    Some(size)
}

pub(crate) fn parse_vertical_formatting(value: &str) -> Option<VerticalFormatting> {
    match value.trim() {
        "TopAligned" => Some(VerticalFormatting::Top),
        "CentreAligned" => Some(VerticalFormatting::Centre),
        "BottomAligned" => Some(VerticalFormatting::Bottom),
        "Stretched" => Some(VerticalFormatting::Stretched),
        "Tiled" => Some(VerticalFormatting::Tiled),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_bool, parse_padding, parse_size, parse_vertical_formatting};
    use crate::format::{Padding, VerticalFormatting};
    use peniko::kurbo::Size;

    #[test]
    fn padding_sides() {
        assert_eq!(
            parse_padding("l:1 t:2 r:3 b:4"),
            Some(Padding {
                left: 1.,
                top: 2.,
                right: 3.,
                bottom: 4.
            })
        );
        assert_eq!(
            parse_padding("t:5"),
            Some(Padding {
                top: 5.,
                ..Padding::default()
            })
        );
        assert_eq!(parse_padding("x:1"), None);
        assert_eq!(parse_padding("l:abc"), None);
    }

    #[test]
    fn sizes_and_flags() {
        assert_eq!(parse_size("w:16 h:8"), Some(Size::new(16., 8.)));
        assert_eq!(parse_size("h:8"), Some(Size::new(0., 8.)));
        assert_eq!(parse_bool("True"), Some(true));
        assert_eq!(parse_bool("0"), Some(false));
        assert_eq!(parse_bool("maybe"), None);
        assert_eq!(
            parse_vertical_formatting("CentreAligned"),
            Some(VerticalFormatting::Centre)
        );
        assert_eq!(parse_vertical_formatting("Centered"), None);
    }
}

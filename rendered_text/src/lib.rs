// Copyright 2026 the Rendered Text Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rich text layout for retained user interfaces.
//!
//! Rendered Text turns marked-up strings into laid out text: it parses tags
//! into styles and embedded objects, splits the result into paragraphs,
//! assigns bidi levels, breaks lines, aligns and justifies them, answers
//! caret and hit-testing queries, and emits drawable geometry.
//!
//! Fonts, images and child widgets are supplied by the host through the
//! traits in [`resources`]; geometry is appended to a list of
//! [`GeometryBuffer`]s that a renderer consumes.
//!
//! # Example
//!
//! ```
//! use rendered_text::{LegacyTextParser, ParagraphDirection, RenderedText};
//! # use rendered_text::resources::{Font, GlyphBounds, GlyphId};
//! # use std::sync::Arc;
//! # #[derive(Debug)]
//! # struct Mono;
//! # impl Font for Mono {
//! #     fn glyph_index(&self, ch: char) -> Option<GlyphId> { Some(ch as u32) }
//! #     fn advance(&self, _: GlyphId) -> f32 { 10. }
//! #     fn glyph_bounds(&self, _: GlyphId) -> Option<GlyphBounds> { None }
//! #     fn baseline(&self) -> f32 { 12. }
//! #     fn line_height(&self) -> f32 { 16. }
//! # }
//! let mut text = RenderedText::new();
//! text.set_word_wrap(true);
//! text.render_text(
//!     "[colour='FFFF0000']Hello[colour='FF00FF00'] world",
//!     Some(&LegacyTextParser::new()),
//!     Some(Arc::new(Mono)),
//!     ParagraphDirection::LeftToRight,
//! )?;
//! let fits = text.update_formatting(60.)?;
//! assert!(fits);
//! assert_eq!(text.line_count(), 2);
//! # Ok::<(), rendered_text::Error>(())
//! ```
//!
//! ## Features
//!
//! - `std` (enabled by default): Use the standard library.
//! - `libm`: Use floating point implementations from `libm` in `no_std`
//!   builds.

#![cfg_attr(all(not(feature = "std"), not(test)), no_std)]

#[cfg(not(any(feature = "std", feature = "libm")))]
compile_error!("rendered_text requires either the `std` or `libm` feature to be enabled");

extern crate alloc;

mod bidi;
mod colour;
mod element;
mod error;
mod format;
mod geometry;
mod paragraph;
mod parser;
mod text;
mod util;

pub mod resources;

#[cfg(test)]
mod tests;

pub use peniko::{kurbo, Color};

pub use bidi::{BidiAnalysis, NoBidi, ParagraphShaper, UnicodeBidi};
pub use colour::ColourRect;
pub use element::{ElementKind, ImageElement, TextElement, TextSelection, TextStyle, WidgetElement};
pub use error::{Error, ErrorKind};
pub use format::{
    BaseDirection, HorizontalFormatting, Padding, ParagraphDirection, VerticalFormatting,
};
pub use geometry::{GeometryBuffer, GeometrySource, Quad};
pub use paragraph::{IndexBounds, Line, RenderedGlyph, RenderedTextParagraph};
pub use parser::{
    BasicTextParser, LegacyTextParser, ParsedText, TextParser, OBJECT_PLACEHOLDER,
};
pub use text::RenderedText;

/// Maximum number of elements a text can hold.
///
/// Glyphs address elements with a 16-bit index.
pub const MAX_ELEMENTS: usize = u16::MAX as usize;

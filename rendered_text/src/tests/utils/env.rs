// Copyright 2026 the Rendered Text Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deterministic collaborators for layout tests.

use crate::kurbo::{Point, Size};
use crate::resources::{
    ChildWidget, Font, FontRef, GlyphBounds, GlyphId, HostWindow, Image, ImageRef,
    ResourceProvider,
};
use crate::{BasicTextParser, LegacyTextParser, ParagraphDirection, RenderedText, TextParser};
use std::string::String;
use std::sync::{Arc, Mutex};
use std::vec::Vec;

/// Advance of every glyph of [`MonoFont`].
pub(crate) const ADVANCE: f32 = 10.;
/// Line height of the default test font.
pub(crate) const LINE_HEIGHT: f32 = 16.;

/// A font where every glyph is `advance` wide.
#[derive(Debug)]
pub(crate) struct MonoFont {
    advance: f32,
    line_height: f32,
}

impl MonoFont {
    pub(crate) fn new(advance: f32, line_height: f32) -> Self {
        Self {
            advance,
            line_height,
        }
    }
}

impl Font for MonoFont {
    fn glyph_index(&self, codepoint: char) -> Option<GlyphId> {
        Some(u32::from(codepoint))
    }

    fn advance(&self, _glyph: GlyphId) -> f32 {
        self.advance
    }

    fn glyph_bounds(&self, glyph: GlyphId) -> Option<GlyphBounds> {
        if char::from_u32(glyph).is_some_and(char::is_whitespace) {
            return None;
        }
        Some(GlyphBounds {
            x: 0.,
            y: -self.baseline(),
            width: self.advance,
            height: self.line_height,
        })
    }

    fn baseline(&self) -> f32 {
        self.line_height * 0.75
    }

    fn line_height(&self) -> f32 {
        self.line_height
    }
}

/// An image whose size can change between layouts.
#[derive(Debug)]
pub(crate) struct MockImage {
    name: String,
    size: Mutex<Size>,
}

impl MockImage {
    pub(crate) fn set_size(&self, size: Size) {
        *self.size.lock().unwrap() = size;
    }
}

impl Image for MockImage {
    fn name(&self) -> &str {
        &self.name
    }

    fn rendered_size(&self) -> Size {
        *self.size.lock().unwrap()
    }
}

/// A child widget that records where it was placed.
#[derive(Debug)]
pub(crate) struct MockWidget {
    size: Mutex<Size>,
    position: Mutex<Option<Point>>,
}

impl MockWidget {
    pub(crate) fn new(size: Size) -> Self {
        Self {
            size: Mutex::new(size),
            position: Mutex::new(None),
        }
    }

    pub(crate) fn set_size(&self, size: Size) {
        *self.size.lock().unwrap() = size;
    }

    pub(crate) fn position(&self) -> Option<Point> {
        *self.position.lock().unwrap()
    }
}

impl ChildWidget for MockWidget {
    fn pixel_size(&self) -> Size {
        *self.size.lock().unwrap()
    }

    fn set_position(&self, position: Point) {
        *self.position.lock().unwrap() = Some(position);
    }
}

/// A host window with named children.
#[derive(Debug, Default)]
pub(crate) struct MockHost {
    children: Vec<(String, Arc<MockWidget>)>,
}

impl MockHost {
    pub(crate) fn add(&mut self, name: &str, widget: Arc<MockWidget>) {
        self.children.push((name.into(), widget));
    }

    pub(crate) fn remove(&mut self, name: &str) {
        self.children.retain(|(child, _)| child != name);
    }
}

impl HostWindow for MockHost {
    fn find_child(&self, name: &str) -> Option<Arc<dyn ChildWidget>> {
        self.children
            .iter()
            .find(|(child, _)| child == name)
            .map(|(_, widget)| widget.clone() as Arc<dyn ChildWidget>)
    }
}

#[derive(Debug)]
struct MockResources {
    fonts: Vec<(&'static str, FontRef)>,
    images: Vec<(&'static str, ImageRef)>,
}

impl ResourceProvider for MockResources {
    fn font(&self, name: &str) -> Option<FontRef> {
        self.fonts
            .iter()
            .find(|(font, _)| *font == name)
            .map(|(_, font)| font.clone())
    }

    fn image(&self, name: &str) -> Option<ImageRef> {
        self.images
            .iter()
            .find(|(image, _)| *image == name)
            .map(|(_, image)| image.clone())
    }
}

/// Owns the fonts, images and widgets a test lays text out with.
///
/// The default font is 10 wide and 16 high; the font `Big` is 20 wide and
/// 32 high. The image `Foo` is 20 by 8 and a widget named `Child` is
/// available through [`TestEnv::host`].
#[derive(Debug)]
pub(crate) struct TestEnv {
    pub(crate) font: FontRef,
    pub(crate) big_font: FontRef,
    pub(crate) image: Arc<MockImage>,
    pub(crate) widget: Arc<MockWidget>,
    pub(crate) host: MockHost,
    resources: Arc<MockResources>,
}

impl TestEnv {
    pub(crate) fn new() -> Self {
        let font: FontRef = Arc::new(MonoFont::new(ADVANCE, LINE_HEIGHT));
        let big_font: FontRef = Arc::new(MonoFont::new(2. * ADVANCE, 2. * LINE_HEIGHT));
        let image = Arc::new(MockImage {
            name: "Foo".into(),
            size: Mutex::new(Size::new(20., 8.)),
        });
        let widget = Arc::new(MockWidget::new(Size::new(30., 24.)));
        let mut host = MockHost::default();
        host.add("Child", widget.clone());
        let resources = Arc::new(MockResources {
            fonts: vec![("Big", big_font.clone())],
            images: vec![("Foo", image.clone() as ImageRef)],
        });
        Self {
            font,
            big_font,
            image,
            widget,
            host,
            resources,
        }
    }

    pub(crate) fn legacy_parser(&self) -> LegacyTextParser {
        LegacyTextParser::with_resources(self.resources.clone())
    }

    pub(crate) fn basic_parser(&self) -> BasicTextParser {
        BasicTextParser::with_resources(self.resources.clone())
    }

    /// Renders `text` without a parser.
    pub(crate) fn plain(&self, text: &str) -> RenderedText {
        self.build(text, None)
    }

    /// Renders `markup` through the legacy parser.
    pub(crate) fn markup(&self, markup: &str) -> RenderedText {
        self.build(markup, Some(&self.legacy_parser()))
    }

    fn build(&self, text: &str, parser: Option<&dyn TextParser>) -> RenderedText {
        let mut rendered = RenderedText::new();
        rendered
            .render_text(
                text,
                parser,
                Some(self.font.clone()),
                ParagraphDirection::LeftToRight,
            )
            .unwrap();
        rendered
    }
}

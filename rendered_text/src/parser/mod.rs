// Copyright 2026 the Rendered Text Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Markup parsers.
//!
//! A parser turns a marked-up string into plain text plus a table of
//! [`TextElement`]s and, for every output character, the element it belongs
//! to and the span of input it came from. Two syntaxes are provided:
//! [`LegacyTextParser`] for `[colour='FFFF0000']` style tags and
//! [`BasicTextParser`] for scoped `<colour='FFFF0000'>...</colour>` tags.
//! Both understand the same tag names and value syntax.

mod basic;
mod legacy;
mod values;

pub use basic::BasicTextParser;
pub use legacy::LegacyTextParser;

use crate::colour::{parse_colour, ColourRect};
use crate::element::{ImageElement, TextElement, TextStyle, WidgetElement};
use crate::error::Error;
use crate::format::{Padding, VerticalFormatting};
use crate::resources::{FontRef, ResourceProvider};
use crate::MAX_ELEMENTS;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt::Debug;
use core::ops::Range;
use hashbrown::HashMap;
use peniko::kurbo::Size;
use peniko::Color;

use values::{parse_bool, parse_float, parse_padding, parse_size, parse_vertical_formatting};

/// Zero-width space emitted for embedded objects.
pub const OBJECT_PLACEHOLDER: char = '\u{200B}';

/// Converts markup into plain text and elements.
pub trait TextParser: Debug + Send + Sync {
    /// Parses `input`.
    ///
    /// Fails on an unterminated tag or when more than [`MAX_ELEMENTS`]
    /// elements would be created. Unknown or malformed tags are logged and
    /// skipped.
    fn parse(&self, input: &str) -> Result<ParsedText, Error>;
}

/// Output of a [`TextParser`].
#[derive(Clone, Debug, Default)]
pub struct ParsedText {
    /// Plain text.
    pub text: Vec<char>,
    /// Byte offset in the input of each character of `text`.
    ///
    /// Empty when every character maps one to one onto a single input byte.
    pub original_indices: Vec<usize>,
    /// Number of input bytes each character of `text` stands for, parallel
    /// to `original_indices`.
    pub original_lengths: Vec<u32>,
    /// Element of each character of `text`.
    ///
    /// May be shorter than `text`; the remaining characters use the default
    /// style.
    pub element_indices: Vec<u16>,
    /// Element table.
    pub elements: Vec<TextElement>,
}

impl ParsedText {
    /// Plain text without markup or elements.
    pub fn verbatim(input: &str) -> Self {
        let mut parsed = Self::default();
        if input.is_ascii() {
            parsed.text = input.chars().collect();
            return parsed;
        }
        for (offset, ch) in input.char_indices() {
            parsed.text.push(ch);
            parsed.original_indices.push(offset);
            parsed.original_lengths.push(len_u32(ch.len_utf8()));
        }
        parsed
    }

    /// Input span of the character at `index`.
    pub fn source_span(&self, index: usize) -> Range<usize> {
        match (
            self.original_indices.get(index),
            self.original_lengths.get(index),
        ) {
            (Some(&start), Some(&length)) => start..start + length as usize,
            _ => index..index + 1,
        }
    }
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "source spans are bounded by a single tag"
)]
fn len_u32(len: usize) -> u32 {
    len.min(u32::MAX as usize) as u32
}

/// Cumulative attributes set by tags.
#[derive(Clone, Debug)]
pub(crate) struct StyleState {
    colours: ColourRect,
    background: Option<Color>,
    font: Option<FontRef>,
    underline: bool,
    strikeout: bool,
    outline_colour: ColourRect,
    outline_size: f32,
    padding: Padding,
    vertical_formatting: VerticalFormatting,
    image_size: Size,
    aspect_lock: bool,
}

impl Default for StyleState {
    fn default() -> Self {
        Self {
            colours: ColourRect::default(),
            background: None,
            font: None,
            underline: false,
            strikeout: false,
            outline_colour: ColourRect::uniform(Color::BLACK),
            outline_size: 0.,
            padding: Padding::default(),
            vertical_formatting: VerticalFormatting::default(),
            image_size: Size::ZERO,
            aspect_lock: false,
        }
    }
}

impl StyleState {
    fn style(&self) -> TextStyle {
        let mut style = TextStyle::new(self.font.clone());
        style.colours = self.colours;
        style.background = self.background;
        style.underline = self.underline;
        style.strikeout = self.strikeout;
        style.outline_colour = self.outline_colour;
        style.outline_size = self.outline_size;
        style.padding = self.padding;
        style.vertical_formatting = self.vertical_formatting;
        style
    }

    fn image(&self, resources: Option<&dyn ResourceProvider>, name: &str) -> ImageElement {
        let image = if name.is_empty() {
            None
        } else {
            let image = resources.and_then(|resources| resources.image(name));
            if image.is_none() {
                log::warn!("unknown image '{name}'");
            }
            image
        };
        let mut element = ImageElement::new(None);
        element.colours = self.colours;
        element.size = self.image_size;
        element.aspect_lock = self.aspect_lock;
        element.padding = self.padding;
        element.vertical_formatting = self.vertical_formatting;
        element.image = image;
        element.refresh_size();
        element
    }

    fn widget(&self, name: &str) -> WidgetElement {
        let mut element = WidgetElement::new(name);
        element.padding = self.padding;
        element.vertical_formatting = self.vertical_formatting;
        element
    }
}

/// Handler of a style tag. Returns `false` when the value was rejected.
type TagHandler = fn(&mut StyleState, &str, Option<&dyn ResourceProvider>) -> bool;

/// Style tag names and their handlers.
#[derive(Clone, Debug)]
pub(crate) struct TagHandlers {
    table: HashMap<&'static str, TagHandler>,
}

impl Default for TagHandlers {
    fn default() -> Self {
        let mut table: HashMap<&'static str, TagHandler> = HashMap::new();
        table.insert("colour", handle_colour);
        table.insert("color", handle_colour);
        table.insert("bg-colour", handle_background);
        table.insert("bg-color", handle_background);
        table.insert("font", handle_font);
        table.insert("underline", |state, value, _| {
            set_bool(&mut state.underline, value)
        });
        table.insert("strikeout", |state, value, _| {
            set_bool(&mut state.strikeout, value)
        });
        table.insert("outline-colour", handle_outline_colour);
        table.insert("outline-color", handle_outline_colour);
        table.insert("outline-size", |state, value, _| {
            set_float(&mut state.outline_size, value)
        });
        table.insert("vert-formatting", handle_vertical_formatting);
        table.insert("vert-image-formatting", handle_vertical_formatting);
        table.insert("vert-text-formatting", handle_vertical_formatting);
        table.insert("padding", |state, value, _| match parse_padding(value) {
            Some(padding) => {
                state.padding = padding;
                true
            }
            None => false,
        });
        table.insert("top-padding", |state, value, _| {
            set_float(&mut state.padding.top, value)
        });
        table.insert("bottom-padding", |state, value, _| {
            set_float(&mut state.padding.bottom, value)
        });
        table.insert("left-padding", |state, value, _| {
            set_float(&mut state.padding.left, value)
        });
        table.insert("right-padding", |state, value, _| {
            set_float(&mut state.padding.right, value)
        });
        table.insert("image-size", |state, value, _| match parse_size(value) {
            Some(size) => {
                state.image_size = size;
                true
            }
            None => false,
        });
        table.insert("image-width", |state, value, _| {
            let mut width = 0.;
            let ok = set_float(&mut width, value);
            state.image_size.width = f64::from(width);
            ok
        });
        table.insert("image-height", |state, value, _| {
            let mut height = 0.;
            let ok = set_float(&mut height, value);
            state.image_size.height = f64::from(height);
            ok
        });
        table.insert("aspect-lock", |state, value, _| {
            set_bool(&mut state.aspect_lock, value)
        });
        table.insert("reset", handle_reset);
        Self { table }
    }
}

fn set_bool(target: &mut bool, value: &str) -> bool {
    parse_bool(value).map(|value| *target = value).is_some()
}

fn set_float(target: &mut f32, value: &str) -> bool {
    parse_float(value).map(|value| *target = value).is_some()
}

fn handle_colour(state: &mut StyleState, value: &str, _: Option<&dyn ResourceProvider>) -> bool {
    parse_colour(value)
        .map(|colour| state.colours = ColourRect::uniform(colour))
        .is_some()
}

fn handle_background(
    state: &mut StyleState,
    value: &str,
    _: Option<&dyn ResourceProvider>,
) -> bool {
    parse_colour(value)
        .map(|colour| state.background = Some(colour))
        .is_some()
}

fn handle_outline_colour(
    state: &mut StyleState,
    value: &str,
    _: Option<&dyn ResourceProvider>,
) -> bool {
    parse_colour(value)
        .map(|colour| state.outline_colour = ColourRect::uniform(colour))
        .is_some()
}

fn handle_vertical_formatting(
    state: &mut StyleState,
    value: &str,
    _: Option<&dyn ResourceProvider>,
) -> bool {
    parse_vertical_formatting(value)
        .map(|formatting| state.vertical_formatting = formatting)
        .is_some()
}

fn handle_font(
    state: &mut StyleState,
    value: &str,
    resources: Option<&dyn ResourceProvider>,
) -> bool {
    // An empty name selects the default font.
    if value.is_empty() {
        state.font = None;
        return true;
    }
    match resources.and_then(|resources| resources.font(value)) {
        Some(font) => {
            state.font = Some(font);
            true
        }
        None => {
            log::warn!("unknown font '{value}', keeping the current font");
            true
        }
    }
}

fn handle_reset(state: &mut StyleState, value: &str, _: Option<&dyn ResourceProvider>) -> bool {
    let defaults = StyleState::default();
    match value {
        "full" => *state = defaults,
        "colour" | "color" => {
            state.colours = defaults.colours;
            state.background = defaults.background;
        }
        "font" => state.font = None,
        "image" => {
            state.image_size = defaults.image_size;
            state.aspect_lock = defaults.aspect_lock;
        }
        _ => {
            state.underline = defaults.underline;
            state.strikeout = defaults.strikeout;
            state.outline_colour = defaults.outline_colour;
            state.outline_size = defaults.outline_size;
            state.padding = defaults.padding;
            state.vertical_formatting = defaults.vertical_formatting;
        }
    }
    true
}

/// Splits a tag body into name and unquoted value.
///
/// Returns `None` for a malformed body. A body without `=` has no value.
/// Names are matched exactly and the quote must follow `=` directly, so
/// padded bodies such as `colour = 'x'` name no known tag.
pub(crate) fn split_tag(body: &str) -> Option<(&str, Option<&str>)> {
    let Some((name, value)) = body.split_once('=') else {
        return (!body.is_empty()).then_some((body, None));
    };
    let value = value.strip_prefix('\'')?.strip_suffix('\'')?;
    (!name.is_empty()).then_some((name, Some(value)))
}

/// Parse state shared by both syntaxes, reset for every input.
#[derive(Debug)]
pub(crate) struct TextWriter<'a> {
    output: ParsedText,
    state: StyleState,
    style_changed: bool,
    current_style: Option<u16>,
    identity: bool,
    resources: Option<&'a dyn ResourceProvider>,
    handlers: &'a TagHandlers,
}

impl<'a> TextWriter<'a> {
    pub(crate) fn new(
        handlers: &'a TagHandlers,
        resources: Option<&'a dyn ResourceProvider>,
    ) -> Self {
        Self {
            output: ParsedText::default(),
            state: StyleState::default(),
            style_changed: false,
            current_style: None,
            identity: true,
            resources,
            handlers,
        }
    }

    pub(crate) fn state(&self) -> &StyleState {
        &self.state
    }

    /// Replaces the cumulative style, as when a scope closes.
    pub(crate) fn restore_state(&mut self, state: StyleState) {
        self.state = state;
        self.style_changed = true;
    }

    fn push_element(&mut self, element: TextElement, offset: usize) -> Result<u16, Error> {
        if self.output.elements.len() >= MAX_ELEMENTS {
            return Err(Error::too_many_elements(offset));
        }
        #[expect(
            clippy::cast_possible_truncation,
            reason = "bounded by MAX_ELEMENTS above"
        )]
        let index = self.output.elements.len() as u16;
        self.output.elements.push(element);
        Ok(index)
    }

    fn record(&mut self, ch: char, source: Range<usize>, element: u16) {
        let position = self.output.text.len();
        if self.identity && (source.start != position || source.len() != 1) {
            self.identity = false;
        }
        self.output.text.push(ch);
        self.output.original_indices.push(source.start);
        self.output.original_lengths.push(len_u32(source.len()));
        self.output.element_indices.push(element);
    }

    /// Emits a text character, materializing the current style if needed.
    pub(crate) fn push_char(&mut self, ch: char, source: Range<usize>) -> Result<(), Error> {
        let element = match self.current_style {
            Some(index) if !self.style_changed => index,
            _ => {
                let index =
                    self.push_element(TextElement::Style(self.state.style()), source.start)?;
                self.current_style = Some(index);
                self.style_changed = false;
                index
            }
        };
        self.record(ch, source, element);
        Ok(())
    }

    fn push_object(&mut self, element: TextElement, source: Range<usize>) -> Result<(), Error> {
        let index = self.push_element(element, source.start)?;
        self.record(OBJECT_PLACEHOLDER, source, index);
        Ok(())
    }

    /// Applies a tag body spanning `span` of the input.
    ///
    /// Returns the tag name when the tag was recognized.
    pub(crate) fn apply_tag<'b>(
        &mut self,
        body: &'b str,
        span: Range<usize>,
    ) -> Result<Option<&'b str>, Error> {
        let Some((name, value)) = split_tag(body) else {
            log::warn!("ignoring malformed tag '{body}' at byte {}", span.start);
            return Ok(None);
        };
        let Some(value) = value else {
            if name == "br" {
                self.push_char('\n', span)?;
                return Ok(Some(name));
            }
            log::warn!("ignoring tag '{name}' without a value at byte {}", span.start);
            return Ok(None);
        };

        if let Some(handler) = self.handlers.table.get(name) {
            if handler(&mut self.state, value, self.resources) {
                self.style_changed = true;
            } else {
                log::warn!("ignoring invalid value '{value}' for tag '{name}'");
            }
            return Ok(Some(name));
        }
        match name {
            "image" => {
                let image = self.state.image(self.resources, value);
                self.push_object(TextElement::Image(image), span)?;
            }
            "window" => {
                let widget = self.state.widget(value);
                self.push_object(TextElement::Widget(widget), span)?;
            }
            _ => {
                log::warn!("ignoring unknown tag '{name}' at byte {}", span.start);
                return Ok(None);
            }
        }
        Ok(Some(name))
    }

    pub(crate) fn finish(mut self, input_len: usize) -> ParsedText {
        if self.identity && self.output.text.len() == input_len {
            self.output.original_indices.clear();
            self.output.original_lengths.clear();
        }
        self.output
    }
}

/// Shared construction state of the parsers.
#[derive(Clone, Debug, Default)]
pub(crate) struct ParserConfig {
    pub(crate) handlers: TagHandlers,
    pub(crate) resources: Option<Arc<dyn ResourceProvider>>,
}

impl ParserConfig {
    pub(crate) fn writer(&self) -> TextWriter<'_> {
        TextWriter::new(&self.handlers, self.resources.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::{split_tag, ParsedText};

    #[test]
    fn splits_tag_bodies() {
        assert_eq!(
            split_tag("colour='FFFF0000'"),
            Some(("colour", Some("FFFF0000")))
        );
        assert_eq!(split_tag("br"), Some(("br", None)));
        assert_eq!(split_tag("font=''"), Some(("font", Some(""))));
        assert_eq!(split_tag("colour=FFFF0000"), None);
        assert_eq!(split_tag("colour='FF"), None);
        assert_eq!(split_tag("='x'"), None);
        assert_eq!(split_tag(""), None);
        assert_eq!(split_tag("colour='"), None);
        assert_eq!(split_tag("colour= 'FFFF0000'"), None);
        assert_eq!(
            split_tag(" colour ='FFFF0000'"),
            Some((" colour ", Some("FFFF0000"))),
            "names are not trimmed"
        );
    }

    #[test]
    fn verbatim_maps_multibyte_characters() {
        let parsed = ParsedText::verbatim("aé");
        assert_eq!(parsed.text, ['a', 'é']);
        assert_eq!(parsed.original_indices, [0, 1]);
        assert_eq!(parsed.original_lengths, [1, 2]);
        assert_eq!(parsed.source_span(1), 1..3);

        let ascii = ParsedText::verbatim("ab");
        assert!(ascii.original_indices.is_empty());
        assert_eq!(ascii.source_span(1), 1..2);
    }
}

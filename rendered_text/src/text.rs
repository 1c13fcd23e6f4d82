// Copyright 2026 the Rendered Text Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The document: parsing, paragraph splitting and document-wide queries.

use crate::bidi::{ParagraphShaper, UnicodeBidi};
use crate::colour::ColourRect;
use crate::element::{RenderContext, TextElement, TextSelection, TextStyle};
use crate::error::Error;
use crate::format::{BaseDirection, HorizontalFormatting, ParagraphDirection};
use crate::geometry::GeometryBuffer;
use crate::paragraph::{IndexBounds, RenderedTextParagraph};
use crate::parser::{ParsedText, TextParser};
use crate::resources::{FontRef, HostWindow};
use crate::util::{nearly_zero, to_f32};
use crate::MAX_ELEMENTS;
use alloc::sync::Arc;
use alloc::vec::Vec;
use peniko::kurbo::{Point, Rect, Size, Vec2};

/// Returns `true` for characters that end a paragraph.
fn is_paragraph_separator(ch: char) -> bool {
    matches!(
        ch,
        '\n' | '\u{0B}' | '\u{0C}' | '\r' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

/// Laid out rich text.
///
/// Call [`render_text`](Self::render_text) to set the content, then
/// [`update_formatting`](Self::update_formatting) whenever the content,
/// a formatting option or the area width changed. Queries and rendering
/// use the state of the last formatting pass.
#[derive(Clone, Debug)]
pub struct RenderedText {
    paragraphs: Vec<RenderedTextParagraph>,
    elements: Vec<TextElement>,
    /// Parsed text; its elements live in `elements`.
    source: ParsedText,
    default_font: Option<FontRef>,
    /// Element used by characters without an explicit element.
    default_element: u16,
    shaper: Arc<dyn ParagraphShaper>,

    horizontal_formatting: HorizontalFormatting,
    last_justified_formatting: HorizontalFormatting,
    word_wrap: bool,

    extents: Size,
    fits: bool,
}

impl Default for RenderedText {
    fn default() -> Self {
        Self {
            paragraphs: Vec::new(),
            elements: Vec::new(),
            source: ParsedText::default(),
            default_font: None,
            default_element: 0,
            shaper: Arc::new(UnicodeBidi),
            horizontal_formatting: HorizontalFormatting::default(),
            last_justified_formatting: HorizontalFormatting::default(),
            word_wrap: false,
            extents: Size::ZERO,
            fits: true,
        }
    }
}

/// Checks output of a parser that is not necessarily one of ours.
fn is_consistent(parsed: &ParsedText) -> bool {
    let mapped = parsed.original_indices.is_empty()
        || (parsed.original_indices.len() == parsed.text.len()
            && parsed.original_lengths.len() == parsed.text.len());
    mapped
        && parsed.elements.len() <= MAX_ELEMENTS
        && parsed.element_indices.len() <= parsed.text.len()
        && parsed
            .element_indices
            .iter()
            .all(|&index| usize::from(index) < parsed.elements.len())
}

impl RenderedText {
    /// Empty text.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the bidi strategy used by the next [`render_text`](Self::render_text).
    pub fn set_paragraph_shaper(&mut self, shaper: Arc<dyn ParagraphShaper>) {
        self.shaper = shaper;
    }

    /// Parses `text` and builds paragraphs and glyphs.
    ///
    /// Without a parser, or when parsing fails, the text is used verbatim
    /// with the default style. Fails if a style needs `default_font` and
    /// none is given; the text is empty afterwards.
    pub fn render_text(
        &mut self,
        text: &str,
        parser: Option<&dyn TextParser>,
        default_font: Option<FontRef>,
        direction: ParagraphDirection,
    ) -> Result<(), Error> {
        self.clear();

        let mut parsed = match parser.map(|parser| parser.parse(text)) {
            Some(Ok(parsed)) if is_consistent(&parsed) => parsed,
            Some(Ok(_)) => {
                log::debug!("parser returned inconsistent output, using verbatim text");
                ParsedText::verbatim(text)
            }
            Some(Err(error)) => {
                log::debug!("{error}, using verbatim text");
                ParsedText::verbatim(text)
            }
            None => ParsedText::verbatim(text),
        };
        if parsed.text.is_empty() {
            self.default_font = default_font;
            return Ok(());
        }

        let mut elements = core::mem::take(&mut parsed.elements);
        let mut default_element = 0;
        if parsed.element_indices.len() < parsed.text.len() {
            let font = default_font.clone().ok_or_else(Error::missing_font)?;
            // At most `MAX_ELEMENTS` elements, so the new index fits.
            default_element = u16::try_from(elements.len())
                .map_err(|_| Error::too_many_elements(text.len()))?;
            elements.push(TextElement::Style(TextStyle::new(Some(font))));
        }
        for element in &mut elements {
            if let TextElement::Style(style) = element {
                if style.font.is_none() {
                    let font = default_font.as_ref().ok_or_else(Error::missing_font)?;
                    style.resolve_font(font);
                }
            }
            element.update_metrics(None);
        }

        let mut paragraphs = Vec::new();
        let mut previous_direction = BaseDirection::Ltr;
        let mut start = 0;
        let len = parsed.text.len();
        let element_at = |position: usize| {
            parsed
                .element_indices
                .get(position)
                .copied()
                .unwrap_or(default_element)
        };
        while start <= len {
            let end = parsed.text[start..]
                .iter()
                .position(|&ch| is_paragraph_separator(ch))
                .map_or(len, |offset| start + offset);

            let (source_range, fallback) = if end > start {
                (
                    parsed.source_span(start).start..parsed.source_span(end - 1).end,
                    None,
                )
            } else if end < len {
                let offset = parsed.source_span(end).start;
                (offset..offset, Some(element_at(end)))
            } else {
                let offset = parsed.source_span(len - 1).end;
                (offset..offset, Some(element_at(len - 1)))
            };

            let analysis = self
                .shaper
                .analyze(&parsed.text[start..end], direction, previous_direction);
            previous_direction = analysis.direction;

            let mut paragraph =
                RenderedTextParagraph::new(start..end, source_range, analysis.direction, fallback);
            paragraph.set_default_horizontal_formatting(self.horizontal_formatting);
            paragraph.set_default_last_justified_line_formatting(self.last_justified_formatting);
            paragraph.set_default_word_wrap(self.word_wrap);
            paragraph.setup_glyphs(&parsed, &elements, default_element, Some(&analysis.levels));
            paragraphs.push(paragraph);

            if end == len {
                break;
            }
            start = if parsed.text[end] == '\r' && parsed.text.get(end + 1) == Some(&'\n') {
                end + 2
            } else {
                end + 1
            };
        }

        self.paragraphs = paragraphs;
        self.elements = elements;
        self.source = parsed;
        self.default_font = default_font;
        self.default_element = default_element;
        Ok(())
    }

    /// Removes all content.
    pub fn clear(&mut self) {
        self.paragraphs.clear();
        self.elements.clear();
        self.source = ParsedText::default();
        self.default_element = 0;
        self.extents = Size::ZERO;
        self.fits = true;
    }

    /// Lays out every paragraph for `area_width`.
    ///
    /// Returns whether all paragraphs fit without a mid-word break. Fails on
    /// a negative width without touching any state.
    pub fn update_formatting(&mut self, area_width: f32) -> Result<bool, Error> {
        if area_width < 0. || area_width.is_nan() {
            return Err(Error::negative_area_width());
        }
        let default_height = self
            .default_font
            .as_ref()
            .map_or(0., |font| font.line_height());

        let mut width: f32 = 0.;
        let mut height = 0.;
        let mut fits = true;
        for paragraph in &mut self.paragraphs {
            paragraph.update_formatting(&self.elements, area_width, default_height);
            width = width.max(paragraph.width());
            height += paragraph.height();
            fits &= paragraph.is_fitting_into_area_width();
        }
        self.extents = Size::new(f64::from(width), f64::from(height));
        self.fits = fits;
        Ok(fits)
    }

    /// Re-queries the size of every element.
    ///
    /// Widget elements are resolved against `host`. Width changes invalidate
    /// the lines of word-wrapped paragraphs; height changes only the heights
    /// of the affected lines. Call [`update_formatting`](Self::update_formatting)
    /// afterwards.
    pub fn update_dynamic_object_extents(&mut self, host: &dyn HostWindow) {
        for (index, element) in self.elements.iter_mut().enumerate() {
            let (width, height) = element.update_metrics(Some(host));
            if nearly_zero(width) && nearly_zero(height) {
                continue;
            }
            let Ok(index) = u16::try_from(index) else {
                break;
            };
            for paragraph in &mut self.paragraphs {
                paragraph.on_element_metrics_changed(index, width, height);
            }
        }
    }

    /// Replaces an element with one of the same kind and reshapes the
    /// paragraphs using it.
    pub fn replace_element(&mut self, index: usize, mut element: TextElement) -> Result<(), Error> {
        let Some(current) = self.elements.get(index) else {
            return Err(Error::invalid_operation());
        };
        if current.kind() != element.kind() {
            return Err(Error::invalid_operation());
        }
        if let TextElement::Style(style) = &mut element {
            if style.font.is_none() {
                let font = self.default_font.as_ref().ok_or_else(Error::missing_font)?;
                style.resolve_font(font);
            }
        }
        element.update_metrics(None);
        self.elements[index] = element;

        let Ok(index) = u16::try_from(index) else {
            return Err(Error::invalid_operation());
        };
        for paragraph in &mut self.paragraphs {
            if paragraph.glyphs().iter().any(|glyph| glyph.element_index == index) {
                paragraph.setup_glyphs(&self.source, &self.elements, self.default_element, None);
            }
        }
        Ok(())
    }

    /// Appends geometry for all paragraphs to `out`.
    ///
    /// `position` is the top-left corner of the area. Widget elements move
    /// their child to the matching position and produce no geometry.
    pub fn create_render_geometry(
        &self,
        out: &mut Vec<GeometryBuffer>,
        position: Point,
        mod_colours: Option<&ColourRect>,
        clip: Option<Rect>,
        selection: Option<&TextSelection>,
    ) {
        let combine_from = out.len();
        let mut context = RenderContext {
            out,
            combine_from,
            clip,
            mod_colours,
            selection,
        };
        let mut origin = position;
        for paragraph in &self.paragraphs {
            paragraph.create_render_geometry(&mut context, &self.elements, origin);
            origin.y += f64::from(paragraph.height());
        }
    }

    /// Sets the default horizontal formatting.
    pub fn set_horizontal_formatting(&mut self, value: HorizontalFormatting) {
        self.horizontal_formatting = value;
        for paragraph in &mut self.paragraphs {
            paragraph.set_default_horizontal_formatting(value);
        }
    }

    /// Default horizontal formatting.
    pub fn horizontal_formatting(&self) -> HorizontalFormatting {
        self.horizontal_formatting
    }

    /// Sets the default formatting of the last line of justified paragraphs.
    pub fn set_last_justified_line_formatting(&mut self, value: HorizontalFormatting) {
        self.last_justified_formatting = value;
        for paragraph in &mut self.paragraphs {
            paragraph.set_default_last_justified_line_formatting(value);
        }
    }

    /// Default formatting of the last line of justified paragraphs.
    pub fn last_justified_line_formatting(&self) -> HorizontalFormatting {
        self.last_justified_formatting
    }

    /// Sets the default word wrap.
    pub fn set_word_wrap(&mut self, value: bool) {
        self.word_wrap = value;
        for paragraph in &mut self.paragraphs {
            paragraph.set_default_word_wrap(value);
        }
    }

    /// Default word wrap.
    pub fn word_wrap(&self) -> bool {
        self.word_wrap
    }

    /// Font of styles without an explicit font.
    pub fn default_font(&self) -> Option<&FontRef> {
        self.default_font.as_ref()
    }

    /// Plain text produced by the parser.
    pub fn text(&self) -> &[char] {
        &self.source.text
    }

    /// Element table.
    pub fn elements(&self) -> &[TextElement] {
        &self.elements
    }

    /// Paragraphs in document order.
    pub fn paragraphs(&self) -> &[RenderedTextParagraph] {
        &self.paragraphs
    }

    /// Paragraph `index`, for per-paragraph overrides.
    pub fn paragraph_mut(&mut self, index: usize) -> Option<&mut RenderedTextParagraph> {
        self.paragraphs.get_mut(index)
    }

    /// Number of paragraphs.
    pub fn paragraph_count(&self) -> usize {
        self.paragraphs.len()
    }

    /// Number of lines over all paragraphs.
    pub fn line_count(&self) -> usize {
        self.paragraphs
            .iter()
            .map(|paragraph| paragraph.lines().len())
            .sum()
    }

    /// Size of the laid out text.
    pub fn extents(&self) -> Size {
        self.extents
    }

    /// Result of the last [`update_formatting`](Self::update_formatting).
    pub fn is_fitting_into_area_width(&self) -> bool {
        self.fits
    }

    fn paragraph_top(&self, index: usize) -> f32 {
        self.paragraphs[..index]
            .iter()
            .map(RenderedTextParagraph::height)
            .sum()
    }

    /// Paragraph holding text index `index`.
    fn paragraph_of_index(&self, index: usize) -> Option<usize> {
        if self.paragraphs.is_empty() {
            return None;
        }
        let after = self
            .paragraphs
            .partition_point(|paragraph| paragraph.paragraph_start_text_index() <= index);
        Some(after.saturating_sub(1))
    }

    /// Caret position closest to `point`, relative to the top-left corner of
    /// the area.
    pub fn text_index_at_point(&self, point: Point) -> Option<usize> {
        let last = self.paragraphs.len().checked_sub(1)?;
        let y = to_f32(point.y);
        let mut top = 0.;
        let mut found = last;
        for (index, paragraph) in self.paragraphs.iter().enumerate() {
            if y < top + paragraph.height() {
                found = index;
                break;
            }
            if index < last {
                top += paragraph.height();
            }
        }
        let local = point - Vec2::new(0., f64::from(top));
        Some(self.paragraphs[found].text_index_at_point(local))
    }

    /// Placement of the glyph at `index`, relative to the top-left corner of
    /// the area.
    pub fn text_index_bounds(&self, index: usize) -> Option<IndexBounds> {
        let paragraph = self.paragraph_of_index(index)?;
        let mut bounds = self.paragraphs[paragraph].text_index_bounds(index)?;
        bounds.rect = bounds.rect + Vec2::new(0., f64::from(self.paragraph_top(paragraph)));
        Some(bounds)
    }

    /// Next caret position, crossing paragraph boundaries. `None` at the end
    /// of the text.
    pub fn next_text_index(&self, index: usize) -> Option<usize> {
        let paragraph = self.paragraph_of_index(index)?;
        self.paragraphs[paragraph].next_text_index(index).or_else(|| {
            self.paragraphs
                .get(paragraph + 1)
                .map(RenderedTextParagraph::paragraph_start_text_index)
        })
    }

    /// Previous caret position, crossing paragraph boundaries. `None` at the
    /// start of the text.
    pub fn prev_text_index(&self, index: usize) -> Option<usize> {
        let paragraph = self.paragraph_of_index(index)?;
        self.paragraphs[paragraph].prev_text_index(index).or_else(|| {
            paragraph
                .checked_sub(1)
                .map(|previous| self.paragraphs[previous].paragraph_end_text_index())
        })
    }

    /// Caret position one line up, or `None` on the first line.
    pub fn line_up_text_index(&self, index: usize, caret_x: f32) -> Option<usize> {
        let paragraph = self.paragraph_of_index(index)?;
        self.paragraphs[paragraph]
            .line_up_text_index(index, caret_x)
            .or_else(|| {
                let previous = &self.paragraphs[paragraph.checked_sub(1)?];
                let last = previous.lines().len().checked_sub(1)?;
                Some(previous.index_on_line(last, caret_x))
            })
    }

    /// Caret position one line down, or `None` on the last line.
    pub fn line_down_text_index(&self, index: usize, caret_x: f32) -> Option<usize> {
        let paragraph = self.paragraph_of_index(index)?;
        self.paragraphs[paragraph]
            .line_down_text_index(index, caret_x)
            .or_else(|| {
                let next = self.paragraphs.get(paragraph + 1)?;
                (!next.lines().is_empty()).then(|| next.index_on_line(0, caret_x))
            })
    }

    /// Caret position `page_height` further up.
    pub fn page_up_text_index(
        &self,
        index: usize,
        caret_x: f32,
        page_height: f32,
    ) -> Option<usize> {
        let paragraph = self.paragraph_of_index(index)?;
        let y = self.paragraph_top(paragraph) + self.paragraphs[paragraph].caret_centre_y(index)
            - page_height;
        self.text_index_at_point(Point::new(f64::from(caret_x), f64::from(y)))
    }

    /// Caret position `page_height` further down.
    pub fn page_down_text_index(
        &self,
        index: usize,
        caret_x: f32,
        page_height: f32,
    ) -> Option<usize> {
        let paragraph = self.paragraph_of_index(index)?;
        let y = self.paragraph_top(paragraph)
            + self.paragraphs[paragraph].caret_centre_y(index)
            + page_height;
        self.text_index_at_point(Point::new(f64::from(caret_x), f64::from(y)))
    }

    /// Start of the line holding `index`.
    pub fn line_start_text_index(&self, index: usize) -> Option<usize> {
        let paragraph = self.paragraph_of_index(index)?;
        Some(self.paragraphs[paragraph].line_start_text_index(index))
    }

    /// End of the line holding `index`.
    pub fn line_end_text_index(&self, index: usize) -> Option<usize> {
        let paragraph = self.paragraph_of_index(index)?;
        Some(self.paragraphs[paragraph].line_end_text_index(index))
    }

    /// Start of the paragraph holding `index`.
    pub fn paragraph_start_text_index(&self, index: usize) -> Option<usize> {
        let paragraph = self.paragraph_of_index(index)?;
        Some(self.paragraphs[paragraph].paragraph_start_text_index())
    }

    /// End of the paragraph holding `index`.
    pub fn paragraph_end_text_index(&self, index: usize) -> Option<usize> {
        let paragraph = self.paragraph_of_index(index)?;
        Some(self.paragraphs[paragraph].paragraph_end_text_index())
    }
}

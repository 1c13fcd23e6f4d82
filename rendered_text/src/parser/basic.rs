// Copyright 2026 the Rendered Text Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use super::{ParsedText, ParserConfig, StyleState, TextParser};
use crate::error::Error;
use crate::resources::ResourceProvider;
use alloc::sync::Arc;
use alloc::vec::Vec;

/// Parser for scoped `<tag='value'>...</tag>` markup.
///
/// A closing tag restores the style that was in effect before the matching
/// opening tag. `<br/>`, `<image='name'/>` and `<window='name'/>` are
/// self-closing, and the entities `&lt;`, `&gt;`, `&amp;`, `&apos;` and
/// `&quot;` stand for the characters they name.
#[derive(Clone, Debug, Default)]
pub struct BasicTextParser {
    config: ParserConfig,
}

impl BasicTextParser {
    /// A parser without named fonts or images.
    pub fn new() -> Self {
        Self::default()
    }

    /// A parser resolving `font` and `image` tags through `resources`.
    pub fn with_resources(resources: Arc<dyn ResourceProvider>) -> Self {
        let mut parser = Self::default();
        parser.config.resources = Some(resources);
        parser
    }
}

const ENTITIES: [(&str, char); 5] = [
    ("&lt;", '<'),
    ("&gt;", '>'),
    ("&amp;", '&'),
    ("&apos;", '\''),
    ("&quot;", '"'),
];

impl TextParser for BasicTextParser {
    fn parse(&self, input: &str) -> Result<ParsedText, Error> {
        let mut writer = self.config.writer();
        let mut scopes: Vec<(&str, StyleState)> = Vec::new();
        let mut pos = 0;

        while let Some(ch) = input[pos..].chars().next() {
            let rest = &input[pos..];
            match ch {
                '<' => {
                    let Some(close) = rest.find('>') else {
                        log::warn!("unterminated tag at byte {pos}");
                        return Err(Error::unterminated_tag(pos));
                    };
                    let span = pos..pos + close + 1;
                    let body = &rest[1..close];
                    if let Some(name) = body.strip_prefix('/') {
                        match scopes.iter().rposition(|(open, _)| *open == name) {
                            Some(index) => {
                                scopes.truncate(index + 1);
                                if let Some((_, state)) = scopes.pop() {
                                    writer.restore_state(state);
                                }
                            }
                            None => log::warn!("ignoring stray closing tag '{name}' at byte {pos}"),
                        }
                    } else if let Some(body) = body.strip_suffix('/') {
                        writer.apply_tag(body, span.clone())?;
                    } else {
                        let saved = writer.state().clone();
                        if let Some(name) = writer.apply_tag(body, span.clone())? {
                            scopes.push((name, saved));
                        }
                    }
                    pos = span.end;
                }
                '&' => match ENTITIES.iter().find(|(entity, _)| rest.starts_with(entity)) {
                    Some(&(entity, replacement)) => {
                        writer.push_char(replacement, pos..pos + entity.len())?;
                        pos += entity.len();
                    }
                    None => {
                        writer.push_char('&', pos..pos + 1)?;
                        pos += 1;
                    }
                },
                _ => {
                    writer.push_char(ch, pos..pos + ch.len_utf8())?;
                    pos += ch.len_utf8();
                }
            }
        }
        Ok(writer.finish(input.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::BasicTextParser;
    use crate::element::TextElement;
    use crate::parser::{TextParser, OBJECT_PLACEHOLDER};
    use crate::ErrorKind;
    use alloc::vec::Vec;

    fn underlines(input: &str) -> Vec<bool> {
        let parsed = BasicTextParser::new().parse(input).unwrap();
        parsed
            .element_indices
            .iter()
            .map(|&index| match &parsed.elements[usize::from(index)] {
                TextElement::Style(style) => style.underline,
                _ => false,
            })
            .collect()
    }

    #[test]
    fn closing_tag_restores_previous_style() {
        assert_eq!(
            underlines("a<underline='true'>b</underline>c"),
            [false, true, false]
        );
    }

    #[test]
    fn closing_an_outer_scope_closes_inner_ones() {
        assert_eq!(
            underlines("<colour='FF0000'>a<underline='yes'>b</colour>c"),
            [false, true, false]
        );
    }

    #[test]
    fn stray_closing_tag_is_ignored() {
        assert_eq!(underlines("a</underline>b"), [false, false]);
    }

    #[test]
    fn entities_and_self_closing_tags() {
        let parsed = BasicTextParser::new()
            .parse("&lt;a&gt;<br/>&amp;&x<image='Foo'/>")
            .unwrap();
        assert_eq!(
            parsed.text,
            ['<', 'a', '>', '\n', '&', '&', 'x', OBJECT_PLACEHOLDER]
        );
        assert_eq!(parsed.source_span(0), 0..4);
        assert_eq!(parsed.source_span(3), 9..14);
    }

    #[test]
    fn unterminated_tag_fails() {
        let error = BasicTextParser::new().parse("ab<colour='FF'").unwrap_err();
        assert_eq!(error.kind(), ErrorKind::UnterminatedTag);
        assert_eq!(error.offset(), Some(2));
    }
}
